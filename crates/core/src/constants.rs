//! Constants used throughout the clinic core crate.

/// Default listen address for the mock REST service.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

/// Lower bound of the simulated network latency, in milliseconds.
pub const DEFAULT_LATENCY_MIN_MS: u64 = 600;

/// Upper bound of the simulated network latency, in milliseconds.
pub const DEFAULT_LATENCY_MAX_MS: u64 = 1000;

/// First bookable hour of the day (inclusive).
pub const SLOT_START_HOUR: u8 = 9;

/// Last bookable hour of the day (exclusive).
pub const SLOT_END_HOUR: u8 = 17;

/// Spacing between generated time slots.
pub const SLOT_INTERVAL_MINUTES: u8 = 30;

/// Page number used when a request omits `page`.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when a request omits `limit`.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Largest page size a caller may ask for.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Label of the first breadcrumb.
pub const HOME_LABEL: &str = "Home";

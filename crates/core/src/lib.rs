//! # Clinic Core
//!
//! Business logic for the clinic portal.
//!
//! - [`booking`]: the multi-step appointment booking workflow
//! - [`catalog`]: clinic, specialty and doctor lists with stale-load protection
//! - [`breadcrumbs`]: breadcrumb trails and the label override registry
//! - [`navigation`]: portal roles and the sidebar sections they see
//! - [`pagination`]: page slicing for list endpoints
//!
//! **No API concerns**: HTTP servers and wire DTOs belong in `api-rest` and `api-shared`.

pub mod booking;
pub mod breadcrumbs;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod fixtures;
pub mod navigation;
pub mod pagination;

pub use booking::{
    can_proceed, generate_time_slots, BookingController, BookingRequest, BookingSelection,
    BookingStep, Confirmation, DownstreamPolicy, SessionStatus, SlotWindow, StepOutcome,
    StepView,
};
pub use breadcrumbs::{Breadcrumb, BreadcrumbRegistry, OverrideGuard};
pub use catalog::{
    CatalogAccessor, CatalogData, CatalogKind, DoctorRecord, FixtureCatalog, OptionCatalog,
};
pub use config::PortalConfig;
pub use constants::DEFAULT_REST_ADDR;
pub use error::{PortalError, PortalResult};
pub use navigation::{NavItem, PortalRole};
pub use pagination::{paginate, Page, PageRequest};

pub use clinic_types::{NonEmptyText, SelectOption, TimeSlot};

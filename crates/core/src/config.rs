//! Portal runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into services as an
//! `Arc<PortalConfig>`. The parsing helpers take the raw environment value as an `Option<String>`
//! instead of reading the environment themselves, so request handling never touches process-wide
//! state and the helpers stay testable.

use crate::booking::{DownstreamPolicy, SlotWindow};
use crate::constants::{DEFAULT_LATENCY_MAX_MS, DEFAULT_LATENCY_MIN_MS};
use crate::{PortalError, PortalResult};

/// Inclusive range of simulated response latency, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LatencyRange {
    min_ms: u64,
    max_ms: u64,
}

impl LatencyRange {
    pub fn new(min_ms: u64, max_ms: u64) -> PortalResult<Self> {
        if min_ms > max_ms {
            return Err(PortalError::InvalidConfig {
                key: "CLINIC_LATENCY_MS",
                message: format!("minimum {min_ms} exceeds maximum {max_ms}"),
            });
        }
        Ok(Self { min_ms, max_ms })
    }

    /// No delay at all. Used by tests and when `CLINIC_LATENCY_MS=0`.
    pub fn disabled() -> Self {
        Self { min_ms: 0, max_ms: 0 }
    }

    pub fn min_ms(&self) -> u64 {
        self.min_ms
    }

    pub fn max_ms(&self) -> u64 {
        self.max_ms
    }

    pub fn is_disabled(&self) -> bool {
        self.max_ms == 0
    }
}

impl Default for LatencyRange {
    fn default() -> Self {
        Self {
            min_ms: DEFAULT_LATENCY_MIN_MS,
            max_ms: DEFAULT_LATENCY_MAX_MS,
        }
    }
}

/// Configuration resolved at startup.
#[derive(Clone, Debug, Default)]
pub struct PortalConfig {
    latency: LatencyRange,
    downstream_policy: DownstreamPolicy,
    slot_window: SlotWindow,
}

impl PortalConfig {
    pub fn new(
        latency: LatencyRange,
        downstream_policy: DownstreamPolicy,
        slot_window: SlotWindow,
    ) -> Self {
        Self {
            latency,
            downstream_policy,
            slot_window,
        }
    }

    pub fn latency(&self) -> LatencyRange {
        self.latency
    }

    pub fn downstream_policy(&self) -> DownstreamPolicy {
        self.downstream_policy
    }

    pub fn slot_window(&self) -> &SlotWindow {
        &self.slot_window
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the simulated latency from an optional `CLINIC_LATENCY_MS` value.
///
/// Accepts `MIN-MAX` or a single number. `0` disables the delay; a missing or blank value gives
/// the default 600–1000 ms range.
pub fn latency_from_env_value(value: Option<String>) -> PortalResult<LatencyRange> {
    let Some(value) = non_blank(value) else {
        return Ok(LatencyRange::default());
    };

    let parse = |part: &str| {
        part.trim()
            .parse::<u64>()
            .map_err(|e| PortalError::InvalidConfig {
                key: "CLINIC_LATENCY_MS",
                message: format!("'{value}': {e}"),
            })
    };

    match value.split_once('-') {
        Some((min, max)) => LatencyRange::new(parse(min)?, parse(max)?),
        None => {
            let fixed = parse(&value)?;
            LatencyRange::new(fixed, fixed)
        }
    }
}

/// Parse `CLINIC_CLEAR_DOWNSTREAM` into a [`DownstreamPolicy`].
///
/// A missing value keeps downstream selections (the portal's long-standing behaviour).
pub fn downstream_policy_from_env_value(value: Option<String>) -> PortalResult<DownstreamPolicy> {
    let Some(value) = non_blank(value) else {
        return Ok(DownstreamPolicy::Keep);
    };

    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(DownstreamPolicy::Clear),
        "0" | "false" | "no" | "off" => Ok(DownstreamPolicy::Keep),
        other => Err(PortalError::InvalidConfig {
            key: "CLINIC_CLEAR_DOWNSTREAM",
            message: format!("expected a boolean, got '{other}'"),
        }),
    }
}

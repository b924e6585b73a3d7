use crate::booking::BookingStep;
use crate::catalog::CatalogKind;

#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid value: {0}")]
    Type(#[from] clinic_types::TypeError),
    #[error("invalid configuration value for {key}: {message}")]
    InvalidConfig { key: &'static str, message: String },

    #[error("step index {index} is out of range (0..={max})")]
    StepOutOfRange { index: usize, max: usize },
    #[error("booking is incomplete: the {missing} step has no selection")]
    Incomplete { missing: BookingStep },
    #[error("submission is only possible from the review step")]
    NotOnReviewStep,
    #[error("booking session has been disposed")]
    SessionDisposed,
    #[error("booking has already been submitted")]
    AlreadySubmitted,
    #[error("submission rejected: {0}")]
    SubmissionRejected(String),
    #[error("time {time} is not a bookable slot")]
    SlotUnavailable { time: clinic_types::TimeSlot },
    #[error("invalid time slot window: {0}")]
    InvalidSlotWindow(String),

    #[error("failed to fetch {kind}: {reason}")]
    CatalogFetch { kind: CatalogKind, reason: String },
    #[error("a {ticket} ticket cannot complete a {data} fetch")]
    CatalogMismatch {
        ticket: CatalogKind,
        data: CatalogKind,
    },

    #[error("unknown portal role: {0}")]
    UnknownRole(String),
    #[error("failed to serialise: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type PortalResult<T> = std::result::Result<T, PortalError>;

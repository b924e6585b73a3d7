//! # Clinic Types
//!
//! Validated value types shared across the clinic portal crates.
//!
//! - [`NonEmptyText`]: trimmed text guaranteed to contain something
//! - [`SelectOption`]: a value/label pair for anything the user can pick (clinic, specialty,
//!   doctor)
//! - [`TimeSlot`]: an `HH:MM` time of day

mod option;
mod text;
mod time_slot;

pub use option::SelectOption;
pub use text::NonEmptyText;
pub use time_slot::TimeSlot;

/// Errors raised while constructing validated types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TypeError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
    /// The input was not a valid `HH:MM` time of day
    #[error("invalid time slot '{0}': expected HH:MM")]
    InvalidTimeSlot(String),
}

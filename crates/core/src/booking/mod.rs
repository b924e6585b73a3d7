//! Multi-step appointment booking.
//!
//! A booking session walks the user through five fixed steps:
//!
//! ```text
//! clinic -> specialty -> doctor -> date/time -> review -> (submit)
//! ```
//!
//! - [`BookingSelection`] holds the choices made so far
//! - [`can_proceed`] decides whether the active step may advance
//! - [`BookingController`] owns the selection and sequences the steps
//! - [`generate_time_slots`] produces the bookable times for a day
//!
//! Nothing in here knows about rendering; callers subscribe to [`StepView`] updates and draw
//! whatever they like.

mod controller;
mod request;
mod selection;
mod slots;
mod step;
mod validator;

pub use controller::{
    BookingController, Confirmation, SessionStatus, StepOutcome, StepView, SubscriptionId,
};
pub use request::BookingRequest;
pub use selection::{BookingSelection, DownstreamPolicy};
pub use slots::{generate_time_slots, SlotWindow};
pub use step::BookingStep;
pub use validator::{can_proceed, can_proceed_from, first_incomplete_step};

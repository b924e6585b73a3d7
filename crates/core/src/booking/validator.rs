use super::{BookingSelection, BookingStep};

/// Whether the step at `step_index` has enough of a selection to move forward.
///
/// Indexes past the date/time step (review, or anything out of range) are never gated.
pub fn can_proceed(step_index: usize, selection: &BookingSelection) -> bool {
    match BookingStep::from_index(step_index) {
        Some(step) => can_proceed_from(step, selection),
        None => true,
    }
}

pub fn can_proceed_from(step: BookingStep, selection: &BookingSelection) -> bool {
    match step {
        BookingStep::Clinic => selection.clinic.is_some(),
        BookingStep::Specialty => selection.specialty.is_some(),
        BookingStep::Doctor => selection.doctor.is_some(),
        BookingStep::DateTime => selection.date.is_some() && selection.time.is_some(),
        BookingStep::Review => true,
    }
}

/// The earliest step whose gate fails, if any.
pub fn first_incomplete_step(selection: &BookingSelection) -> Option<BookingStep> {
    BookingStep::ALL
        .into_iter()
        .find(|step| !can_proceed_from(*step, selection))
}

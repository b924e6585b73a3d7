use super::{BookingSelection, BookingStep, SlotWindow};
use crate::{PortalError, PortalResult};
use chrono::NaiveDate;
use clinic_types::{SelectOption, TimeSlot};
use serde::{Deserialize, Serialize};

/// Submission payload built from a complete selection.
///
/// Carries exactly the five step choices plus the optional free-text reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub clinic: SelectOption,
    pub specialty: SelectOption,
    pub doctor: SelectOption,
    pub date: NaiveDate,
    pub time: TimeSlot,
    #[serde(default)]
    pub reason: String,
}

impl BookingRequest {
    /// Builds the payload, or reports the earliest step that still lacks a choice.
    pub fn from_selection(selection: &BookingSelection) -> PortalResult<Self> {
        let incomplete = |missing| PortalError::Incomplete { missing };
        Ok(Self {
            clinic: selection
                .clinic
                .clone()
                .ok_or_else(|| incomplete(BookingStep::Clinic))?,
            specialty: selection
                .specialty
                .clone()
                .ok_or_else(|| incomplete(BookingStep::Specialty))?,
            doctor: selection
                .doctor
                .clone()
                .ok_or_else(|| incomplete(BookingStep::Doctor))?,
            date: selection.date.ok_or_else(|| incomplete(BookingStep::DateTime))?,
            time: selection.time.ok_or_else(|| incomplete(BookingStep::DateTime))?,
            reason: selection.reason.clone(),
        })
    }

    /// Rejects a time that `window` would never have offered.
    pub fn ensure_bookable(&self, window: &SlotWindow) -> PortalResult<()> {
        if window.contains(&self.time) {
            Ok(())
        } else {
            Err(PortalError::SlotUnavailable { time: self.time })
        }
    }
}

impl TryFrom<&BookingSelection> for BookingRequest {
    type Error = PortalError;

    fn try_from(selection: &BookingSelection) -> Result<Self, Self::Error> {
        Self::from_selection(selection)
    }
}

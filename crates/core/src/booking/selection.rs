use super::BookingStep;
use chrono::NaiveDate;
use clinic_types::{SelectOption, TimeSlot};
use serde::{Deserialize, Serialize};

/// What happens to later-step choices when an earlier choice changes.
///
/// The portal has always kept them (`Keep`), which lets a user revise the clinic without losing
/// the doctor they picked. `Clear` drops every choice that belongs to a later step instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownstreamPolicy {
    #[default]
    Keep,
    Clear,
}

/// The user's choices so far, one field per step.
///
/// Setters replace the field wholesale. They never touch other fields; downstream clearing is
/// the controller's job and depends on its [`DownstreamPolicy`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSelection {
    pub clinic: Option<SelectOption>,
    pub specialty: Option<SelectOption>,
    pub doctor: Option<SelectOption>,
    pub date: Option<NaiveDate>,
    pub time: Option<TimeSlot>,
    #[serde(default)]
    pub reason: String,
}

impl BookingSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_clinic(&mut self, clinic: Option<SelectOption>) {
        self.clinic = clinic;
    }

    pub fn set_specialty(&mut self, specialty: Option<SelectOption>) {
        self.specialty = specialty;
    }

    pub fn set_doctor(&mut self, doctor: Option<SelectOption>) {
        self.doctor = doctor;
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        self.date = date;
    }

    pub fn set_time(&mut self, time: Option<TimeSlot>) {
        self.time = time;
    }

    pub fn set_reason(&mut self, reason: impl Into<String>) {
        self.reason = reason.into();
    }

    /// Clears every step-bound field that belongs to a step after `step`.
    ///
    /// `reason` is free text on the review step and is left alone.
    pub fn clear_after(&mut self, step: BookingStep) {
        if step < BookingStep::Specialty {
            self.specialty = None;
        }
        if step < BookingStep::Doctor {
            self.doctor = None;
        }
        if step < BookingStep::DateTime {
            self.date = None;
            self.time = None;
        }
    }

    /// True when no step-bound field has been chosen yet.
    pub fn is_empty(&self) -> bool {
        self.clinic.is_none()
            && self.specialty.is_none()
            && self.doctor.is_none()
            && self.date.is_none()
            && self.time.is_none()
    }
}

use super::{can_proceed_from, BookingRequest, BookingSelection, BookingStep, DownstreamPolicy};
use crate::{PortalError, PortalResult};
use chrono::NaiveDate;
use clinic_types::{SelectOption, TimeSlot};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Acknowledgement returned by whoever accepted the booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    pub reference: String,
}

impl Confirmation {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Active,
    Submitted(Confirmation),
    Disposed,
}

/// Result of [`BookingController::go_next`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Advanced {
        from: BookingStep,
        to: BookingStep,
    },
    /// Nothing moved. `missing` is the step whose selection is lacking; it differs from `at` only
    /// on the review step, reached by jumping past unfinished steps.
    Blocked {
        at: BookingStep,
        missing: BookingStep,
    },
    /// The review step was confirmed; hand the request to a submitter.
    SubmitRequested(BookingRequest),
}

/// Derived state pushed to subscribers after every change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepView {
    pub active_step: BookingStep,
    pub can_proceed: bool,
    pub is_last_step: bool,
    pub submitted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&StepView) + Send>;

/// Sequencer for one booking session.
///
/// Owns the [`BookingSelection`] exclusively. Forward movement is gated by the step validator;
/// backward movement and direct jumps are not. Once submitted or disposed the session refuses
/// further changes.
pub struct BookingController {
    active: BookingStep,
    selection: BookingSelection,
    policy: DownstreamPolicy,
    status: SessionStatus,
    last_error: Option<String>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl BookingController {
    /// Start a session on the clinic step that keeps later choices when an earlier one changes.
    pub fn new() -> Self {
        Self::with_policy(DownstreamPolicy::default())
    }

    /// Start a session on the clinic step with an explicit downstream policy.
    ///
    /// # Arguments
    /// * `policy` - Whether changing an earlier choice keeps or clears the later ones
    pub fn with_policy(policy: DownstreamPolicy) -> Self {
        Self {
            active: BookingStep::FIRST,
            selection: BookingSelection::new(),
            policy,
            status: SessionStatus::Active,
            last_error: None,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn active_step(&self) -> BookingStep {
        self.active
    }

    /// The choices made so far. Read-only; change them through the setters.
    pub fn selection(&self) -> &BookingSelection {
        &self.selection
    }

    pub fn policy(&self) -> DownstreamPolicy {
        self.policy
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    /// Message of the most recent failed submission, cleared by a successful one.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether the active step's gate passes for the current selection.
    pub fn can_proceed(&self) -> bool {
        can_proceed_from(self.active, &self.selection)
    }

    /// Snapshot of the derived state, the same value subscribers receive.
    pub fn view(&self) -> StepView {
        StepView {
            active_step: self.active,
            can_proceed: self.can_proceed(),
            is_last_step: self.active.is_last(),
            submitted: matches!(self.status, SessionStatus::Submitted(_)),
        }
    }

    fn ensure_active(&self) -> PortalResult<()> {
        match self.status {
            SessionStatus::Active => Ok(()),
            SessionStatus::Submitted(_) => Err(PortalError::AlreadySubmitted),
            SessionStatus::Disposed => Err(PortalError::SessionDisposed),
        }
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Advance one step if the active step's gate passes.
    ///
    /// On the review step this does not move; it returns the request to submit instead.
    ///
    /// # Returns
    /// * `Advanced` - The gate passed and the session moved one step forward
    /// * `Blocked` - The gate failed; nothing changed and observers are not called
    /// * `SubmitRequested` - The review step was confirmed with every step filled in
    ///
    /// # Errors
    /// Returns [`PortalError::AlreadySubmitted`] or [`PortalError::SessionDisposed`] once the
    /// session is over.
    pub fn go_next(&mut self) -> PortalResult<StepOutcome> {
        self.ensure_active()?;
        let at = self.active;

        if !self.can_proceed() {
            tracing::debug!(step = %at, "forward navigation blocked");
            return Ok(StepOutcome::Blocked { at, missing: at });
        }

        match at.next() {
            Some(to) => {
                self.active = to;
                self.notify();
                Ok(StepOutcome::Advanced { from: at, to })
            }
            None => match BookingRequest::from_selection(&self.selection) {
                Ok(request) => Ok(StepOutcome::SubmitRequested(request)),
                Err(PortalError::Incomplete { missing }) => {
                    tracing::debug!(%missing, "review confirmed with an unfinished step");
                    Ok(StepOutcome::Blocked { at, missing })
                }
                Err(e) => Err(e),
            },
        }
    }

    /// Step back once, stopping at the first step. Never gated.
    pub fn go_prev(&mut self) -> PortalResult<BookingStep> {
        self.ensure_active()?;
        if let Some(prev) = self.active.prev() {
            self.active = prev;
            self.notify();
        }
        Ok(self.active)
    }

    /// Jump straight to `index`, completed or not. Downstream steps may hold no selection.
    ///
    /// # Arguments
    /// * `index` - Zero-based step index, `0` (clinic) to `4` (review)
    ///
    /// # Errors
    /// Returns [`PortalError::StepOutOfRange`] for an index past the review step; the active
    /// step is left unchanged.
    pub fn go_to(&mut self, index: usize) -> PortalResult<BookingStep> {
        self.ensure_active()?;
        let step = BookingStep::from_index(index).ok_or(PortalError::StepOutOfRange {
            index,
            max: BookingStep::LAST.index(),
        })?;
        if step != self.active {
            self.active = step;
            self.notify();
        }
        Ok(step)
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Replace the clinic choice. `None` clears it.
    ///
    /// Under [`DownstreamPolicy::Clear`] a different clinic also clears specialty, doctor, date
    /// and time. Re-selecting the same clinic value never clears anything.
    ///
    /// # Errors
    /// Returns [`PortalError::AlreadySubmitted`] or [`PortalError::SessionDisposed`] once the
    /// session is over. The same holds for every setter.
    pub fn set_clinic(&mut self, clinic: Option<SelectOption>) -> PortalResult<()> {
        self.ensure_active()?;
        let changed = !same_choice(self.selection.clinic.as_ref(), clinic.as_ref());
        self.selection.set_clinic(clinic);
        self.apply_policy(BookingStep::Clinic, changed);
        self.notify();
        Ok(())
    }

    /// Replace the specialty choice; see [`set_clinic`](Self::set_clinic) for clearing.
    pub fn set_specialty(&mut self, specialty: Option<SelectOption>) -> PortalResult<()> {
        self.ensure_active()?;
        let changed = !same_choice(self.selection.specialty.as_ref(), specialty.as_ref());
        self.selection.set_specialty(specialty);
        self.apply_policy(BookingStep::Specialty, changed);
        self.notify();
        Ok(())
    }

    /// Replace the doctor choice; a change clears date and time under the `Clear` policy.
    pub fn set_doctor(&mut self, doctor: Option<SelectOption>) -> PortalResult<()> {
        self.ensure_active()?;
        let changed = !same_choice(self.selection.doctor.as_ref(), doctor.as_ref());
        self.selection.set_doctor(doctor);
        self.apply_policy(BookingStep::Doctor, changed);
        self.notify();
        Ok(())
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>) -> PortalResult<()> {
        self.ensure_active()?;
        self.selection.set_date(date);
        self.notify();
        Ok(())
    }

    pub fn set_time(&mut self, time: Option<TimeSlot>) -> PortalResult<()> {
        self.ensure_active()?;
        self.selection.set_time(time);
        self.notify();
        Ok(())
    }

    /// Free-text reason for the visit. Optional and never cleared by the downstream policy.
    pub fn set_reason(&mut self, reason: impl Into<String>) -> PortalResult<()> {
        self.ensure_active()?;
        self.selection.set_reason(reason);
        Ok(())
    }

    fn apply_policy(&mut self, step: BookingStep, changed: bool) {
        if changed && self.policy == DownstreamPolicy::Clear {
            tracing::debug!(%step, "clearing downstream selections");
            self.selection.clear_after(step);
        }
    }

    // ------------------------------------------------------------------
    // Submission
    // ------------------------------------------------------------------

    /// The payload to submit. Only available on the review step with every step filled in.
    ///
    /// # Errors
    /// * [`PortalError::NotOnReviewStep`] - The active step is not the review step
    /// * [`PortalError::Incomplete`] - A step has no selection; `missing` names the first one
    pub fn submission_request(&self) -> PortalResult<BookingRequest> {
        self.ensure_active()?;
        if self.active != BookingStep::Review {
            return Err(PortalError::NotOnReviewStep);
        }
        BookingRequest::from_selection(&self.selection)
    }

    /// Record the submitter's answer.
    ///
    /// A rejection is kept in [`last_error`](Self::last_error) and leaves the selection untouched
    /// so the user can retry straight from the review step.
    pub fn complete_submission<E: fmt::Display>(
        &mut self,
        result: Result<Confirmation, E>,
    ) -> PortalResult<Confirmation> {
        self.ensure_active()?;
        match result {
            Ok(confirmation) => {
                tracing::info!(reference = %confirmation.reference, "booking submitted");
                self.status = SessionStatus::Submitted(confirmation.clone());
                self.last_error = None;
                self.notify();
                Ok(confirmation)
            }
            Err(e) => {
                let message = e.to_string();
                tracing::warn!(error = %message, "booking submission rejected");
                self.last_error = Some(message.clone());
                self.notify();
                Err(PortalError::SubmissionRejected(message))
            }
        }
    }

    /// Build the request, hand it to `submit` and record the outcome.
    ///
    /// # Arguments
    /// * `submit` - Sends the request somewhere and returns its confirmation or a displayable error
    ///
    /// # Returns
    /// The confirmation. The session is then marked submitted.
    ///
    /// # Errors
    /// Returns the [`submission_request`](Self::submission_request) errors without calling
    /// `submit`, or [`PortalError::SubmissionRejected`] when `submit` fails. In that case the
    /// selection is kept for a retry.
    pub fn submit_with<F, E>(&mut self, submit: F) -> PortalResult<Confirmation>
    where
        F: FnOnce(&BookingRequest) -> Result<Confirmation, E>,
        E: fmt::Display,
    {
        let request = self.submission_request()?;
        let result = submit(&request);
        self.complete_submission(result)
    }

    // ------------------------------------------------------------------
    // Observers and teardown
    // ------------------------------------------------------------------

    /// Call `observer` with a fresh [`StepView`] after every change to the session.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&StepView) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove a subscription. Returns `false` if `id` was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    /// Tear the session down. Observers are dropped and every later call fails.
    pub fn dispose(&mut self) {
        if self.status == SessionStatus::Disposed {
            return;
        }
        tracing::debug!(step = %self.active, "booking session disposed");
        self.status = SessionStatus::Disposed;
        self.observers.clear();
    }

    pub fn is_disposed(&self) -> bool {
        self.status == SessionStatus::Disposed
    }

    fn notify(&mut self) {
        let view = self.view();
        for (_, observer) in self.observers.iter_mut() {
            observer(&view);
        }
    }
}

impl Default for BookingController {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BookingController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookingController")
            .field("active", &self.active)
            .field("selection", &self.selection)
            .field("policy", &self.policy)
            .field("status", &self.status)
            .field("last_error", &self.last_error)
            .field("observers", &self.observers.len())
            .finish()
    }
}

fn same_choice(current: Option<&SelectOption>, next: Option<&SelectOption>) -> bool {
    match (current, next) {
        (Some(a), Some(b)) => a.same_value(b),
        (None, None) => true,
        _ => false,
    }
}

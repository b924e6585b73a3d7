//! Candidate lists for the booking steps.
//!
//! The catalog is loaded from an external source (the mock REST service, or the built-in
//! fixtures). Loads can finish out of order or after the booking session is gone, so every load
//! is tagged with a [`FetchTicket`] and [`OptionCatalog::complete`] drops anything that is no
//! longer wanted.
//!
//! A failed load never aborts the workflow: the list is left empty and its status says why, so
//! the UI can show "no doctors found" and let the user go back.

use crate::fixtures;
use crate::{PortalError, PortalResult};
use clinic_types::{NonEmptyText, SelectOption};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    Clinics,
    Specialties,
    Doctors,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 3] = [
        CatalogKind::Clinics,
        CatalogKind::Specialties,
        CatalogKind::Doctors,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CatalogKind::Clinics => "clinics",
            CatalogKind::Specialties => "specialties",
            CatalogKind::Doctors => "doctors",
        }
    }
}

impl std::fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CatalogKind {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clinics" => Ok(CatalogKind::Clinics),
            "specialties" => Ok(CatalogKind::Specialties),
            "doctors" => Ok(CatalogKind::Doctors),
            other => Err(PortalError::InvalidInput(format!(
                "unknown catalog '{other}' (expected clinics, specialties or doctors)"
            ))),
        }
    }
}

/// A doctor row as served by the catalog, before it is narrowed to a [`SelectOption`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorRecord {
    pub id: NonEmptyText,
    pub name: String,
    pub specialty_id: String,
    pub clinic_id: String,
}

impl DoctorRecord {
    pub fn to_option(&self) -> SelectOption {
        SelectOption {
            value: self.id.clone(),
            label: self.name.clone(),
        }
    }

    /// True when the doctor matches every filter that is set.
    pub fn matches(&self, specialty: Option<&SelectOption>, clinic: Option<&SelectOption>) -> bool {
        specialty.map_or(true, |s| s.value() == self.specialty_id)
            && clinic.map_or(true, |c| c.value() == self.clinic_id)
    }
}

/// Payload of one completed load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogData {
    Clinics(Vec<SelectOption>),
    Specialties(Vec<SelectOption>),
    Doctors(Vec<DoctorRecord>),
}

impl CatalogData {
    pub fn kind(&self) -> CatalogKind {
        match self {
            CatalogData::Clinics(_) => CatalogKind::Clinics,
            CatalogData::Specialties(_) => CatalogKind::Specialties,
            CatalogData::Doctors(_) => CatalogKind::Doctors,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            CatalogData::Clinics(items) | CatalogData::Specialties(items) => items.len(),
            CatalogData::Doctors(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Source of catalog lists. Performs no filtering of its own.
pub trait CatalogAccessor {
    fn fetch(&self, kind: CatalogKind) -> PortalResult<CatalogData>;
}

/// Accessor backed by the built-in demo data.
#[derive(Debug, Clone)]
pub struct FixtureCatalog {
    clinics: Vec<SelectOption>,
    specialties: Vec<SelectOption>,
    doctors: Vec<DoctorRecord>,
}

impl FixtureCatalog {
    /// Build the catalog from the built-in clinics, specialties and doctors.
    ///
    /// # Errors
    /// Returns [`PortalError::Type`] if a fixture row has an empty value, which would be a bug
    /// in the fixtures themselves.
    pub fn new() -> PortalResult<Self> {
        Ok(Self {
            clinics: fixtures::clinics()?,
            specialties: fixtures::specialties()?,
            doctors: fixtures::doctors()?,
        })
    }

    pub fn clinics(&self) -> &[SelectOption] {
        &self.clinics
    }

    pub fn specialties(&self) -> &[SelectOption] {
        &self.specialties
    }

    pub fn doctors(&self) -> &[DoctorRecord] {
        &self.doctors
    }

    /// Look up an option of `kind` by its value.
    ///
    /// # Returns
    /// The matching option, or `None` if no row has that value. Doctors come back as their
    /// `id`/`name` option.
    pub fn find(&self, kind: CatalogKind, value: &str) -> Option<SelectOption> {
        match kind {
            CatalogKind::Clinics => self.clinics.iter().find(|o| o.value() == value).cloned(),
            CatalogKind::Specialties => self
                .specialties
                .iter()
                .find(|o| o.value() == value)
                .cloned(),
            CatalogKind::Doctors => self
                .doctors
                .iter()
                .find(|d| d.id.as_str() == value)
                .map(DoctorRecord::to_option),
        }
    }
}

impl CatalogAccessor for FixtureCatalog {
    fn fetch(&self, kind: CatalogKind) -> PortalResult<CatalogData> {
        Ok(match kind {
            CatalogKind::Clinics => CatalogData::Clinics(self.clinics.clone()),
            CatalogKind::Specialties => CatalogData::Specialties(self.specialties.clone()),
            CatalogKind::Doctors => CatalogData::Doctors(self.doctors.clone()),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    /// Loaded fine, nothing in it.
    Empty,
    /// Load failed; the list is empty and the message explains why.
    Failed(String),
}

/// Proof that a load was started. Hand it back to [`OptionCatalog::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    kind: CatalogKind,
    epoch: u64,
}

impl FetchTicket {
    pub fn kind(&self) -> CatalogKind {
        self.kind
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    /// The load failed and the list was reset to an empty state.
    Failed,
    /// A newer load of the same kind was started; this result was dropped.
    Stale,
    /// The catalog was disposed before the result arrived; it was dropped.
    Disposed,
}

/// Loaded candidate lists plus the bookkeeping that keeps late results out.
#[derive(Debug, Default)]
pub struct OptionCatalog {
    clinics: Vec<SelectOption>,
    specialties: Vec<SelectOption>,
    doctors: Vec<DoctorRecord>,
    status: HashMap<CatalogKind, LoadStatus>,
    latest: HashMap<CatalogKind, u64>,
    epoch: u64,
    disposed: bool,
}

impl OptionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `kind` as loading and issue the ticket its result must carry.
    ///
    /// Starting a second load of the same kind supersedes the first.
    ///
    /// # Returns
    /// A ticket tagged with a fresh epoch. After [`dispose`](Self::dispose) the ticket is still
    /// issued but its result will be dropped.
    pub fn begin_fetch(&mut self, kind: CatalogKind) -> FetchTicket {
        self.epoch += 1;
        self.latest.insert(kind, self.epoch);
        if !self.disposed {
            self.status.insert(kind, LoadStatus::Loading);
        }
        FetchTicket {
            kind,
            epoch: self.epoch,
        }
    }

    /// Apply the result of a load if it is still wanted.
    ///
    /// # Arguments
    /// * `ticket` - The ticket issued by [`OptionCatalog::begin_fetch`]
    /// * `result` - What the accessor produced for that ticket
    ///
    /// # Returns
    /// How the result was handled. Failures, stale and post-dispose results never surface as
    /// errors; the list is left empty with a `Failed` status instead.
    ///
    /// # Errors
    /// Returns [`PortalError::CatalogMismatch`] when the payload does not match the ticket's kind.
    /// The list for the ticket's kind is still reset to an empty `Failed` state.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: PortalResult<CatalogData>,
    ) -> PortalResult<FetchOutcome> {
        if self.disposed {
            tracing::debug!(kind = %ticket.kind, "catalog disposed; dropping fetch result");
            return Ok(FetchOutcome::Disposed);
        }
        if self.latest.get(&ticket.kind) != Some(&ticket.epoch) {
            tracing::debug!(
                kind = %ticket.kind,
                epoch = ticket.epoch,
                "dropping stale fetch result"
            );
            return Ok(FetchOutcome::Stale);
        }

        let data = match result {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(kind = %ticket.kind, error = %e, "catalog fetch failed");
                self.replace(ticket.kind, None);
                self.status
                    .insert(ticket.kind, LoadStatus::Failed(e.to_string()));
                return Ok(FetchOutcome::Failed);
            }
        };

        if data.kind() != ticket.kind {
            let err = PortalError::CatalogMismatch {
                ticket: ticket.kind,
                data: data.kind(),
            };
            tracing::warn!(
                kind = %ticket.kind,
                error = %err,
                "catalog fetch returned the wrong list"
            );
            self.replace(ticket.kind, None);
            self.status
                .insert(ticket.kind, LoadStatus::Failed(err.to_string()));
            return Err(err);
        }

        let status = if data.is_empty() {
            LoadStatus::Empty
        } else {
            LoadStatus::Ready
        };
        self.replace(ticket.kind, Some(data));
        self.status.insert(ticket.kind, status);
        Ok(FetchOutcome::Applied)
    }

    /// Fetch `kind` from `accessor` and apply it in one go.
    ///
    /// # Errors
    /// Same as [`complete`](Self::complete): only a payload of the wrong kind is an error.
    pub fn load_from<A: CatalogAccessor + ?Sized>(
        &mut self,
        accessor: &A,
        kind: CatalogKind,
    ) -> PortalResult<FetchOutcome> {
        let ticket = self.begin_fetch(kind);
        let result = accessor.fetch(kind);
        self.complete(ticket, result)
    }

    fn replace(&mut self, kind: CatalogKind, data: Option<CatalogData>) {
        match (kind, data) {
            (_, Some(CatalogData::Clinics(items))) => self.clinics = items,
            (_, Some(CatalogData::Specialties(items))) => self.specialties = items,
            (_, Some(CatalogData::Doctors(items))) => self.doctors = items,
            (CatalogKind::Clinics, None) => self.clinics.clear(),
            (CatalogKind::Specialties, None) => self.specialties.clear(),
            (CatalogKind::Doctors, None) => self.doctors.clear(),
        }
    }

    /// Load status of `kind`; `Idle` if it was never requested.
    pub fn status(&self, kind: CatalogKind) -> LoadStatus {
        self.status.get(&kind).cloned().unwrap_or_default()
    }

    pub fn clinics(&self) -> &[SelectOption] {
        &self.clinics
    }

    pub fn specialties(&self) -> &[SelectOption] {
        &self.specialties
    }

    /// Doctors narrowed to the chosen specialty and clinic.
    ///
    /// # Arguments
    /// * `specialty` - The specialty picked on the previous step, or `None` for any
    /// * `clinic` - The clinic picked on the first step, or `None` for any
    ///
    /// # Returns
    /// Doctor options in catalog order. Empty while doctors are not loaded or failed to load.
    pub fn doctors_for(
        &self,
        specialty: Option<&SelectOption>,
        clinic: Option<&SelectOption>,
    ) -> Vec<SelectOption> {
        filter_doctors(&self.doctors, specialty, clinic)
    }

    /// Stop accepting results. Lists already loaded stay readable.
    pub fn dispose(&mut self) {
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

/// Narrow doctor rows to those matching the chosen specialty and clinic.
pub fn filter_doctors(
    doctors: &[DoctorRecord],
    specialty: Option<&SelectOption>,
    clinic: Option<&SelectOption>,
) -> Vec<SelectOption> {
    doctors
        .iter()
        .filter(|d| d.matches(specialty, clinic))
        .map(DoctorRecord::to_option)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenCatalog;

    impl CatalogAccessor for BrokenCatalog {
        fn fetch(&self, kind: CatalogKind) -> PortalResult<CatalogData> {
            Err(PortalError::CatalogFetch {
                kind,
                reason: "connection reset".into(),
            })
        }
    }

    fn opt(value: &str, label: &str) -> SelectOption {
        SelectOption::new(value, label).unwrap()
    }

    #[test]
    fn load_from_fixtures_marks_lists_ready() {
        let fixtures = FixtureCatalog::new().unwrap();
        let mut catalog = OptionCatalog::new();

        assert_eq!(catalog.status(CatalogKind::Clinics), LoadStatus::Idle);
        for kind in CatalogKind::ALL {
            assert_eq!(catalog.load_from(&fixtures, kind).unwrap(), FetchOutcome::Applied);
            assert_eq!(catalog.status(kind), LoadStatus::Ready);
        }
        assert_eq!(catalog.clinics(), fixtures.clinics());
        assert_eq!(catalog.doctors_for(None, None).len(), fixtures.doctors().len());
    }

    #[test]
    fn stale_result_is_dropped_in_favour_of_newer_fetch() {
        let mut catalog = OptionCatalog::new();
        let first = catalog.begin_fetch(CatalogKind::Clinics);
        let second = catalog.begin_fetch(CatalogKind::Clinics);

        let newer = CatalogData::Clinics(vec![opt("c2", "Clinic B")]);
        assert_eq!(catalog.complete(second, Ok(newer)).unwrap(), FetchOutcome::Applied);

        let older = CatalogData::Clinics(vec![opt("c1", "Clinic A")]);
        assert_eq!(catalog.complete(first, Ok(older)).unwrap(), FetchOutcome::Stale);
        assert_eq!(catalog.clinics(), &[opt("c2", "Clinic B")]);
    }

    #[test]
    fn tickets_of_different_kinds_do_not_supersede_each_other() {
        let mut catalog = OptionCatalog::new();
        let clinics = catalog.begin_fetch(CatalogKind::Clinics);
        let specialties = catalog.begin_fetch(CatalogKind::Specialties);

        let data = CatalogData::Clinics(vec![opt("c1", "Clinic A")]);
        assert_eq!(catalog.complete(clinics, Ok(data)).unwrap(), FetchOutcome::Applied);
        assert_eq!(catalog.status(CatalogKind::Specialties), LoadStatus::Loading);
        assert_eq!(specialties.kind(), CatalogKind::Specialties);
    }

    #[test]
    fn results_after_dispose_are_dropped() {
        let mut catalog = OptionCatalog::new();
        let ticket = catalog.begin_fetch(CatalogKind::Doctors);
        catalog.dispose();

        let outcome = catalog
            .complete(ticket, Ok(CatalogData::Doctors(Vec::new())))
            .unwrap();
        assert_eq!(outcome, FetchOutcome::Disposed);
        assert_eq!(catalog.status(CatalogKind::Doctors), LoadStatus::Loading);
        assert!(catalog.is_disposed());
    }

    #[test]
    fn failed_fetch_leaves_an_empty_navigable_state() {
        let fixtures = FixtureCatalog::new().unwrap();
        let mut catalog = OptionCatalog::new();
        catalog.load_from(&fixtures, CatalogKind::Doctors).unwrap();
        assert!(!catalog.doctors_for(None, None).is_empty());

        let outcome = catalog.load_from(&BrokenCatalog, CatalogKind::Doctors).unwrap();
        assert_eq!(outcome, FetchOutcome::Failed);
        assert!(catalog.doctors_for(None, None).is_empty());
        assert!(matches!(
            catalog.status(CatalogKind::Doctors),
            LoadStatus::Failed(message) if message.contains("connection reset")
        ));
    }

    #[test]
    fn empty_result_is_reported_as_empty() {
        let mut catalog = OptionCatalog::new();
        let ticket = catalog.begin_fetch(CatalogKind::Specialties);
        catalog
            .complete(ticket, Ok(CatalogData::Specialties(Vec::new())))
            .unwrap();
        assert_eq!(catalog.status(CatalogKind::Specialties), LoadStatus::Empty);
    }

    #[test]
    fn mismatched_payload_is_an_error() {
        let mut catalog = OptionCatalog::new();
        let ticket = catalog.begin_fetch(CatalogKind::Clinics);
        let err = catalog
            .complete(ticket, Ok(CatalogData::Specialties(Vec::new())))
            .unwrap_err();
        assert!(matches!(err, PortalError::CatalogMismatch { .. }));
        assert!(matches!(
            catalog.status(CatalogKind::Clinics),
            LoadStatus::Failed(_)
        ));
        assert!(catalog.clinics().is_empty());
        assert_eq!(catalog.status(CatalogKind::Specialties), LoadStatus::Idle);
    }

    #[test]
    fn mismatched_payload_clears_previously_loaded_list() {
        let mut catalog = OptionCatalog::new();
        let fixtures = FixtureCatalog::new().unwrap();
        catalog.load_from(&fixtures, CatalogKind::Clinics).unwrap();
        assert!(!catalog.clinics().is_empty());

        let ticket = catalog.begin_fetch(CatalogKind::Clinics);
        assert!(catalog
            .complete(ticket, Ok(CatalogData::Doctors(Vec::new())))
            .is_err());
        assert!(catalog.clinics().is_empty());
        assert_ne!(catalog.status(CatalogKind::Clinics), LoadStatus::Loading);
    }

    #[test]
    fn doctors_are_filtered_by_specialty_and_clinic() {
        let doctors = vec![
            DoctorRecord {
                id: NonEmptyText::new("d1").unwrap(),
                name: "Dr. Smith".into(),
                specialty_id: "s1".into(),
                clinic_id: "c1".into(),
            },
            DoctorRecord {
                id: NonEmptyText::new("d2").unwrap(),
                name: "Dr. Jones".into(),
                specialty_id: "s1".into(),
                clinic_id: "c2".into(),
            },
            DoctorRecord {
                id: NonEmptyText::new("d3").unwrap(),
                name: "Dr. Patel".into(),
                specialty_id: "s2".into(),
                clinic_id: "c1".into(),
            },
        ];
        let s1 = opt("s1", "Cardiology");
        let c1 = opt("c1", "Clinic A");

        let values = |options: Vec<SelectOption>| {
            options
                .iter()
                .map(|o| o.value().to_string())
                .collect::<Vec<_>>()
        };

        assert_eq!(values(filter_doctors(&doctors, Some(&s1), None)), ["d1", "d2"]);
        assert_eq!(values(filter_doctors(&doctors, None, Some(&c1))), ["d1", "d3"]);
        assert_eq!(values(filter_doctors(&doctors, Some(&s1), Some(&c1))), ["d1"]);
        assert!(filter_doctors(&doctors, Some(&opt("s9", "None")), None).is_empty());
    }

    #[test]
    fn catalog_kind_parses_case_insensitively() {
        assert_eq!("Doctors".parse::<CatalogKind>().unwrap(), CatalogKind::Doctors);
        assert!("nurses".parse::<CatalogKind>().is_err());
    }

    #[test]
    fn fixture_lookup_by_value() {
        let fixtures = FixtureCatalog::new().unwrap();
        let clinic = fixtures.find(CatalogKind::Clinics, "c1").unwrap();
        assert_eq!(clinic.value(), "c1");
        assert!(fixtures.find(CatalogKind::Doctors, "nobody").is_none());
    }
}

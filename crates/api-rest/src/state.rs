//! Shared application state for the REST handlers.
//!
//! Everything lives in memory for the life of the process; a restart brings back the seed data.

use crate::seed;
use api_shared::{AppointmentRes, Clinic, DoctorProfile, LabTest, Medication, User};
use clinic_core::{FixtureCatalog, PortalConfig, PortalResult};
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory records behind the mock endpoints.
#[derive(Debug)]
pub struct MockStore {
    pub clinics: RwLock<Vec<Clinic>>,
    pub users: RwLock<Vec<User>>,
    pub appointments: RwLock<Vec<AppointmentRes>>,
    pub lab_tests: Vec<LabTest>,
    pub medications: Vec<Medication>,
    pub doctor_profile: DoctorProfile,
}

impl MockStore {
    pub fn seeded() -> Self {
        Self {
            clinics: RwLock::new(seed::clinics()),
            users: RwLock::new(seed::users()),
            appointments: RwLock::new(Vec::new()),
            lab_tests: seed::lab_tests(),
            medications: seed::medications(),
            doctor_profile: seed::doctor_profile(),
        }
    }
}

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<PortalConfig>,
    pub catalog: Arc<FixtureCatalog>,
    pub store: Arc<MockStore>,
}

impl AppState {
    /// Build state from resolved configuration with freshly seeded records.
    ///
    /// # Errors
    /// Returns an error if the built-in catalog fixtures fail validation.
    pub fn new(cfg: Arc<PortalConfig>) -> PortalResult<Self> {
        Ok(Self {
            cfg,
            catalog: Arc::new(FixtureCatalog::new()?),
            store: Arc::new(MockStore::seeded()),
        })
    }
}

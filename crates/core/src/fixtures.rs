//! Demo catalog data served by the mock REST service and the CLI.

use crate::catalog::DoctorRecord;
use crate::{PortalError, PortalResult};
use clinic_types::{NonEmptyText, SelectOption};

const CLINICS: &[(&str, &str)] = &[
    ("c1", "Al Noor Medical Center"),
    ("c2", "City Health Clinic"),
    ("c3", "Riverside Family Practice"),
];

const SPECIALTIES: &[(&str, &str)] = &[
    ("s1", "Cardiology"),
    ("s2", "Dermatology"),
    ("s3", "Pediatrics"),
    ("s4", "Orthopedics"),
];

// (id, name, specialty, clinic)
const DOCTORS: &[(&str, &str, &str, &str)] = &[
    ("d1", "Dr. Sarah Ahmed", "s1", "c1"),
    ("d2", "Dr. Omar Khalil", "s1", "c2"),
    ("d3", "Dr. Elena Ruiz", "s2", "c1"),
    ("d4", "Dr. James Carter", "s3", "c3"),
    ("d5", "Dr. Lina Haddad", "s3", "c1"),
    ("d6", "Dr. Miguel Torres", "s4", "c2"),
];

fn options(rows: &[(&str, &str)]) -> PortalResult<Vec<SelectOption>> {
    rows.iter()
        .map(|(value, label)| SelectOption::new(value, *label).map_err(PortalError::from))
        .collect()
}

pub fn clinics() -> PortalResult<Vec<SelectOption>> {
    options(CLINICS)
}

pub fn specialties() -> PortalResult<Vec<SelectOption>> {
    options(SPECIALTIES)
}

pub fn doctors() -> PortalResult<Vec<DoctorRecord>> {
    DOCTORS
        .iter()
        .map(|(id, name, specialty_id, clinic_id)| -> PortalResult<DoctorRecord> {
            Ok(DoctorRecord {
                id: NonEmptyText::new(id)?,
                name: (*name).to_string(),
                specialty_id: (*specialty_id).to_string(),
                clinic_id: (*clinic_id).to_string(),
            })
        })
        .collect()
}

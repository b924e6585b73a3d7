//! Request and response bodies.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// A selectable entry (clinic, specialty, doctor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OptionDto {
    pub value: String,
    pub label: String,
}

// ============================================================================
// CLINICS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Clinic {
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClinicReq {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    /// Defaults to `active`.
    #[serde(default)]
    pub status: Option<String>,
}

// ============================================================================
// USERS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// One of `admin`, `clinic`, `doctor`, `patient`.
    pub role: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserReq {
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPageRes {
    pub items: Vec<User>,
    pub total: usize,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

// ============================================================================
// LAB TESTS, MEDICATIONS, DOCTOR PROFILE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LabTest {
    pub id: String,
    pub patient_name: String,
    pub test_name: String,
    pub category: String,
    /// `pending`, `in_progress` or `completed`.
    pub status: String,
    pub ordered_on: String,
    pub result: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub id: String,
    pub name: String,
    pub generic_name: String,
    pub dosage: String,
    pub form: String,
    pub manufacturer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoctorProfile {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub clinic: String,
    pub email: String,
    pub phone: String,
    pub bio: String,
    pub years_of_experience: u32,
    pub languages: Vec<String>,
}

// ============================================================================
// BOOKING
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TimeSlotsRes {
    pub slots: Vec<String>,
}

/// Booking submission. Every field except `reason` is required; missing ones are reported by
/// the first step that lacks them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentReq {
    pub clinic: Option<OptionDto>,
    pub specialty: Option<OptionDto>,
    pub doctor: Option<OptionDto>,
    /// `YYYY-MM-DD`
    pub date: Option<String>,
    /// `HH:MM`
    pub time: Option<String>,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRes {
    pub id: String,
    pub status: String,
    pub clinic: OptionDto,
    pub specialty: OptionDto,
    pub doctor: OptionDto,
    pub date: String,
    pub time: String,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_page_uses_camel_case_total_pages() {
        let page = UserPageRes {
            items: vec![],
            total: 0,
            page: 1,
            limit: 10,
            total_pages: 0,
        };
        let json = serde_json::to_value(&page).unwrap();
        assert!(json.get("totalPages").is_some());
        assert!(json.get("total_pages").is_none());
    }

    #[test]
    fn appointment_req_tolerates_missing_fields() {
        let body = r#"{ "clinic": { "value": "c1", "label": "A" } }"#;
        let req: AppointmentReq = serde_json::from_str(body).unwrap();
        assert!(req.specialty.is_none());
        assert_eq!(req.reason, "");
    }
}

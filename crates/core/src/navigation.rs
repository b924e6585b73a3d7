//! Portal roles and the sections each role sees in the sidebar.
//!
//! This only decides what is shown. It is not an access check.

use crate::{PortalError, PortalResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortalRole {
    Admin,
    Clinic,
    Doctor,
    Patient,
}

impl PortalRole {
    pub const ALL: [PortalRole; 4] = [
        PortalRole::Admin,
        PortalRole::Clinic,
        PortalRole::Doctor,
        PortalRole::Patient,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PortalRole::Admin => "admin",
            PortalRole::Clinic => "clinic",
            PortalRole::Doctor => "doctor",
            PortalRole::Patient => "patient",
        }
    }

    pub fn parse(input: &str) -> PortalResult<Self> {
        let wanted = input.trim();
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PortalError::UnknownRole(wanted.to_string()))
    }
}

impl std::fmt::Display for PortalRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PortalRole {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub path: String,
    pub label: String,
    pub roles: Vec<PortalRole>,
}

impl NavItem {
    pub fn new(path: &str, label: &str, roles: &[PortalRole]) -> Self {
        Self {
            path: path.to_string(),
            label: label.to_string(),
            roles: roles.to_vec(),
        }
    }

    pub fn visible_to(&self, role: PortalRole) -> bool {
        self.roles.contains(&role)
    }
}

/// The portal sidebar, in display order.
pub fn default_navigation() -> Vec<NavItem> {
    use PortalRole::*;

    vec![
        NavItem::new("/dashboard", "Dashboard", &PortalRole::ALL),
        NavItem::new("/clinics", "Clinics", &[Admin]),
        NavItem::new("/users", "Users", &[Admin]),
        NavItem::new("/doctors", "Doctors", &[Admin, Clinic]),
        NavItem::new("/patients", "Patients", &[Clinic, Doctor]),
        NavItem::new("/appointments", "Appointments", &[Clinic, Doctor, Patient]),
        NavItem::new("/appointments/book", "Book Appointment", &[Patient]),
        NavItem::new("/lab-tests", "Lab Tests", &[Clinic, Doctor, Patient]),
        NavItem::new("/medications", "Medications", &[Doctor]),
        NavItem::new("/invoices", "Invoices", &[Admin, Clinic, Patient]),
        NavItem::new("/profile", "Profile", &[Doctor, Patient]),
        NavItem::new("/settings", "Settings", &PortalRole::ALL),
    ]
}

/// Items `role` may see, in their original order.
pub fn visible_for(items: &[NavItem], role: PortalRole) -> Vec<&NavItem> {
    items.iter().filter(|item| item.visible_to(role)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(items: &[&NavItem]) -> Vec<String> {
        items.iter().map(|i| i.path.clone()).collect()
    }

    #[test]
    fn patient_sees_booking_but_not_admin_sections() {
        let nav = default_navigation();
        let visible = paths(&visible_for(&nav, PortalRole::Patient));

        assert!(visible.contains(&"/appointments/book".to_string()));
        assert!(!visible.contains(&"/users".to_string()));
        assert!(!visible.contains(&"/medications".to_string()));
    }

    #[test]
    fn order_is_preserved() {
        let nav = default_navigation();
        let visible = paths(&visible_for(&nav, PortalRole::Admin));
        assert_eq!(
            visible,
            ["/dashboard", "/clinics", "/users", "/doctors", "/invoices", "/settings"]
        );
    }

    #[test]
    fn every_role_has_dashboard_and_settings() {
        let nav = default_navigation();
        for role in PortalRole::ALL {
            let visible = paths(&visible_for(&nav, role));
            assert_eq!(visible.first().map(String::as_str), Some("/dashboard"));
            assert_eq!(visible.last().map(String::as_str), Some("/settings"));
        }
    }

    #[test]
    fn role_parsing_is_case_insensitive() {
        assert_eq!(PortalRole::parse(" Doctor ").unwrap(), PortalRole::Doctor);
        assert_eq!("ADMIN".parse::<PortalRole>().unwrap(), PortalRole::Admin);
        assert!(matches!(
            PortalRole::parse("nurse"),
            Err(PortalError::UnknownRole(role)) if role == "nurse"
        ));
    }
}

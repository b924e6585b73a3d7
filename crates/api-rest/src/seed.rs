//! Seed records for the mock endpoints.

use api_shared::{Clinic, DoctorProfile, LabTest, Medication, User};
use clinic_core::PortalRole;

pub fn clinics() -> Vec<Clinic> {
    [
        (
            "c1",
            "Al Noor Medical Center",
            "12 King Fahd Rd, Riyadh",
            "+966 11 555 0101",
            "info@alnoor.example",
            "active",
        ),
        (
            "c2",
            "City Health Clinic",
            "48 Gran Via, Madrid",
            "+34 91 555 0102",
            "contact@cityhealth.example",
            "active",
        ),
        (
            "c3",
            "Riverside Family Practice",
            "7 River St, Boston",
            "+1 617 555 0103",
            "hello@riverside.example",
            "inactive",
        ),
    ]
    .into_iter()
    .map(|(id, name, address, phone, email, status)| Clinic {
        id: id.into(),
        name: name.into(),
        address: address.into(),
        phone: phone.into(),
        email: email.into(),
        status: status.into(),
    })
    .collect()
}

const USER_NAMES: &[&str] = &[
    "Amina Yusuf", "Carlos Mendez", "Fatima Zahra", "George Miller", "Hana Saleh",
    "Ivan Petrov", "Julia Santos", "Karim Nasser", "Laura Gomez", "Mohammed Ali",
    "Nadia Farouk", "Oscar Reyes", "Priya Sharma", "Rami Aziz", "Sofia Lopez",
    "Tariq Hamdan", "Uma Patel", "Victor Hugo", "Wafa Mansour", "Xavier Ortiz",
    "Yara Haddad", "Zaid Qasim", "Elena Ruiz",
];

pub fn users() -> Vec<User> {
    USER_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let role = PortalRole::ALL[i % PortalRole::ALL.len()];
            let login = name.to_lowercase().replace(' ', ".");
            User {
                id: format!("u{}", i + 1),
                name: (*name).to_string(),
                email: format!("{login}@clinic.example"),
                role: role.as_str().to_string(),
                status: if i % 7 == 6 { "inactive" } else { "active" }.to_string(),
            }
        })
        .collect()
}

pub fn lab_tests() -> Vec<LabTest> {
    [
        (
            "lt1",
            "Amina Yusuf",
            "Complete Blood Count",
            "Hematology",
            "completed",
            "2024-05-20",
            Some("Within normal range"),
        ),
        (
            "lt2",
            "Carlos Mendez",
            "Lipid Panel",
            "Biochemistry",
            "completed",
            "2024-05-22",
            Some("LDL slightly elevated"),
        ),
        ("lt3", "Hana Saleh", "HbA1c", "Biochemistry", "in_progress", "2024-05-28", None),
        ("lt4", "Oscar Reyes", "Thyroid Panel", "Endocrinology", "pending", "2024-06-01", None),
        ("lt5", "Priya Sharma", "Urinalysis", "Microbiology", "pending", "2024-06-02", None),
    ]
    .into_iter()
    .map(|(id, patient, test, category, status, ordered_on, result)| LabTest {
        id: id.into(),
        patient_name: patient.into(),
        test_name: test.into(),
        category: category.into(),
        status: status.into(),
        ordered_on: ordered_on.into(),
        result: result.map(Into::into),
    })
    .collect()
}

pub fn medications() -> Vec<Medication> {
    [
        ("m1", "Amoxicillin", "Amoxicillin", "500 mg", "capsule", "GSK"),
        ("m2", "Lipitor", "Atorvastatin", "20 mg", "tablet", "Pfizer"),
        ("m3", "Glucophage", "Metformin", "850 mg", "tablet", "Merck"),
        ("m4", "Ventolin", "Salbutamol", "100 mcg", "inhaler", "GSK"),
        ("m5", "Panadol", "Paracetamol", "500 mg", "tablet", "Haleon"),
        ("m6", "Augmentin", "Amoxicillin/Clavulanate", "625 mg", "tablet", "GSK"),
    ]
    .into_iter()
    .map(|(id, name, generic, dosage, form, manufacturer)| Medication {
        id: id.into(),
        name: name.into(),
        generic_name: generic.into(),
        dosage: dosage.into(),
        form: form.into(),
        manufacturer: manufacturer.into(),
    })
    .collect()
}

pub fn doctor_profile() -> DoctorProfile {
    DoctorProfile {
        id: "d1".into(),
        name: "Dr. Sarah Ahmed".into(),
        specialty: "Cardiology".into(),
        clinic: "Al Noor Medical Center".into(),
        email: "sarah.ahmed@alnoor.example".into(),
        phone: "+966 11 555 0199".into(),
        bio: "Consultant cardiologist focused on preventive care and heart failure management."
            .into(),
        years_of_experience: 14,
        languages: vec!["Arabic".into(), "English".into()],
    }
}

//! # API REST
//!
//! Mock REST backend for the clinic portal.
//!
//! Handles:
//! - HTTP endpoints with axum (clinics, users, lab tests, medications, doctor profile, booking)
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialisation, CORS, simulated latency)
//!
//! Records live in memory for the lifetime of the process. Uses `api-shared` for wire types and
//! `clinic-core` for booking validation, catalog data and pagination.

#![warn(rust_2018_idioms)]

pub mod handlers;
pub mod latency;
pub mod seed;
pub mod state;

pub use state::{AppState, MockStore};

use axum::{middleware, routing::get, Router};
use handlers::*;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        list_clinics,
        create_clinic,
        get_clinic,
        update_clinic,
        delete_clinic,
        list_users,
        create_user,
        get_user,
        update_user,
        delete_user,
        list_lab_tests,
        search_medications,
        doctor_profile,
        catalog_clinics,
        catalog_specialties,
        catalog_doctors,
        time_slots,
        list_appointments,
        create_appointment,
    ),
    components(schemas(
        api_shared::HealthRes,
        api_shared::OptionDto,
        api_shared::Clinic,
        api_shared::ClinicReq,
        api_shared::User,
        api_shared::UserReq,
        api_shared::UserPageRes,
        api_shared::LabTest,
        api_shared::Medication,
        api_shared::DoctorProfile,
        api_shared::TimeSlotsRes,
        api_shared::AppointmentReq,
        api_shared::AppointmentRes,
    )),
    tags(
        (name = "clinic-portal", description = "Clinic portal mock API")
    )
)]
pub struct ApiDoc;

/// Build the full router: mock endpoints behind simulated latency, `/health` without it,
/// Swagger UI at `/swagger-ui` and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/clinics", get(list_clinics).post(create_clinic))
        .route(
            "/clinics/:id",
            get(get_clinic).put(update_clinic).delete(delete_clinic),
        )
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/lab-tests", get(list_lab_tests))
        .route("/medications", get(search_medications))
        .route("/doctor/profile", get(doctor_profile))
        .route("/catalog/clinics", get(catalog_clinics))
        .route("/catalog/specialties", get(catalog_specialties))
        .route("/catalog/doctors", get(catalog_doctors))
        .route("/time-slots", get(time_slots))
        .route(
            "/appointments",
            get(list_appointments).post(create_appointment),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            latency::simulate_latency,
        ))
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_shared::{
        AppointmentRes, Clinic, DoctorProfile, LabTest, Medication, OptionDto, TimeSlotsRes, User,
        UserPageRes,
    };
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use clinic_core::config::LatencyRange;
    use clinic_core::{PortalConfig, SlotWindow};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    fn app_with_latency(latency: LatencyRange) -> Router {
        let cfg = PortalConfig::new(latency, Default::default(), SlotWindow::default());
        router(AppState::new(Arc::new(cfg)).unwrap())
    }

    fn app() -> Router {
        app_with_latency(LatencyRange::disabled())
    }

    fn json(body: &[u8]) -> Value {
        serde_json::from_slice(body).unwrap()
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    fn booking() -> Value {
        json!({
            "clinic": { "value": "c1", "label": "Al Noor Medical Center" },
            "specialty": { "value": "s1", "label": "Cardiology" },
            "doctor": { "value": "d1", "label": "Dr. Sarah Ahmed" },
            "date": "2024-06-01",
            "time": "10:00"
        })
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (status, body) = send(&app(), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn time_slots_cover_the_working_day() {
        let (status, body) = send(&app(), "GET", "/time-slots", None).await;
        assert_eq!(status, StatusCode::OK);
        let res: TimeSlotsRes = serde_json::from_slice(&body).unwrap();
        assert_eq!(res.slots.len(), 16);
        assert_eq!(res.slots.first().map(String::as_str), Some("09:00"));
        assert_eq!(res.slots.last().map(String::as_str), Some("16:30"));
    }

    #[tokio::test]
    async fn doctors_are_filtered_by_specialty_and_clinic() {
        let app = app();
        let (_, body) = send(&app, "GET", "/catalog/doctors?specialty=s1", None).await;
        let doctors: Vec<OptionDto> = serde_json::from_slice(&body).unwrap();
        let ids: Vec<_> = doctors.iter().map(|d| d.value.as_str()).collect();
        assert_eq!(ids, ["d1", "d2"]);

        let (_, body) = send(&app, "GET", "/catalog/doctors?specialty=s1&clinic=c2", None).await;
        let doctors: Vec<OptionDto> = serde_json::from_slice(&body).unwrap();
        assert_eq!(doctors.len(), 1);
        assert_eq!(doctors[0].value, "d2");

        let (_, body) = send(&app, "GET", "/catalog/doctors", None).await;
        let doctors: Vec<OptionDto> = serde_json::from_slice(&body).unwrap();
        assert_eq!(doctors.len(), 6);
    }

    #[tokio::test]
    async fn users_are_paginated() {
        let app = app();
        let (status, body) = send(&app, "GET", "/users?page=3&limit=10", None).await;
        assert_eq!(status, StatusCode::OK);
        let page: UserPageRes = serde_json::from_slice(&body).unwrap();
        assert_eq!(page.total, 23);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 3);

        let (_, body) = send(&app, "GET", "/users?limit=500", None).await;
        let page: UserPageRes = serde_json::from_slice(&body).unwrap();
        assert_eq!(page.limit, 100);
        assert_eq!(page.items.len(), 23);
    }

    #[tokio::test]
    async fn user_with_unknown_role_is_rejected() {
        let body = json!({ "name": "Zed", "email": "zed@clinic.example", "role": "janitor" });
        let (status, _) = send(&app(), "POST", "/users", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn clinic_lifecycle() {
        let app = app();
        let body = json!({ "name": "Harbour Clinic", "address": "1 Quay St", "phone": "555-0100" });
        let (status, created) = send(&app, "POST", "/clinics", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        let created: Value = serde_json::from_slice(&created).unwrap();
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(created["status"], "active");

        let uri = format!("/clinics/{id}");
        let (status, _) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn medications_match_brand_or_generic_name() {
        let (_, body) = send(&app(), "GET", "/medications?query=amox", None).await;
        let meds: Vec<Value> = serde_json::from_slice(&body).unwrap();
        let names: Vec<_> = meds.iter().filter_map(|m| m["name"].as_str()).collect();
        assert!(names.contains(&"Amoxicillin"));
        assert!(names.contains(&"Augmentin"));
    }

    #[tokio::test]
    async fn booking_is_created_then_slot_is_taken() {
        let app = app();
        let (status, body) = send(&app, "POST", "/appointments", Some(booking())).await;
        assert_eq!(status, StatusCode::CREATED);
        let res: AppointmentRes = serde_json::from_slice(&body).unwrap();
        assert_eq!(res.status, "confirmed");
        assert_eq!(res.doctor.value, "d1");
        assert_eq!(res.time, "10:00");
        assert_eq!(res.reason, "");

        let (status, _) = send(&app, "POST", "/appointments", Some(booking())).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (_, body) = send(&app, "GET", "/appointments", None).await;
        let all: Vec<AppointmentRes> = serde_json::from_slice(&body).unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn incomplete_booking_is_rejected() {
        let mut body = booking();
        body["doctor"] = Value::Null;
        let (status, _) = send(&app(), "POST", "/appointments", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn booking_outside_slot_window_is_rejected() {
        let mut body = booking();
        body["time"] = json!("18:00");
        let (status, _) = send(&app(), "POST", "/appointments", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let mut body = booking();
        body["time"] = json!("10:15");
        let (status, _) = send(&app(), "POST", "/appointments", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test(start_paused = true)]
    async fn health_skips_simulated_latency() {
        let app = app_with_latency(LatencyRange::new(300, 300).unwrap());

        let started = tokio::time::Instant::now();
        let (status, _) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(started.elapsed(), Duration::ZERO);

        let started = tokio::time::Instant::now();
        let (status, _) = send(&app, "GET", "/lab-tests", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(started.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test]
    async fn clinic_create_and_update_validate_name() {
        let app = app();
        let blank = json!({ "name": "   " });
        let (status, _) = send(&app, "POST", "/clinics", Some(blank.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, "PUT", "/clinics/c1", Some(blank)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn clinic_update_replaces_fields() {
        let app = app();
        let body = json!({
            "name": "Al Noor Medical Centre",
            "address": "14 King Fahd Rd",
            "phone": "+966 11 555 0000",
            "email": "desk@alnoor.example",
            "status": "inactive"
        });
        let (status, body) = send(&app, "PUT", "/clinics/c1", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        let clinic: Clinic = serde_json::from_slice(&body).unwrap();
        assert_eq!(clinic.id, "c1");
        assert_eq!(clinic.name, "Al Noor Medical Centre");
        assert_eq!(clinic.status, "inactive");

        let (_, body) = send(&app, "GET", "/clinics/c1", None).await;
        let stored: Clinic = serde_json::from_slice(&body).unwrap();
        assert_eq!(stored, clinic);

        let missing = json!({ "name": "Nowhere" });
        let (status, _) = send(&app, "PUT", "/clinics/c404", Some(missing)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "DELETE", "/clinics/c404", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn user_lifecycle() {
        let app = app();
        let body = json!({ "name": "Zed Noor", "email": "zed@clinic.example", "role": "Doctor" });
        let (status, body) = send(&app, "POST", "/users", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        let created: User = serde_json::from_slice(&body).unwrap();
        assert_eq!(created.role, "doctor");
        assert_eq!(created.status, "active");

        let uri = format!("/users/{}", created.id);
        let (status, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::from_slice::<User>(&body).unwrap(), created);

        let update = json!({
            "name": "Zed Noor",
            "email": "zed.noor@clinic.example",
            "role": "admin",
            "status": "inactive"
        });
        let (status, body) = send(&app, "PUT", &uri, Some(update)).await;
        assert_eq!(status, StatusCode::OK);
        let updated: User = serde_json::from_slice(&body).unwrap();
        assert_eq!(updated.email, "zed.noor@clinic.example");
        assert_eq!(updated.role, "admin");
        assert_eq!(updated.status, "inactive");

        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_users_are_not_found() {
        let app = app();
        let (status, _) = send(&app, "GET", "/users/u404", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let body = json!({ "name": "Ghost", "email": "ghost@clinic.example", "role": "patient" });
        let (status, _) = send(&app, "PUT", "/users/u404", Some(body)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "DELETE", "/users/u404", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn user_without_name_or_email_is_rejected() {
        let app = app();
        let no_name = json!({ "name": "", "email": "a@clinic.example", "role": "admin" });
        let (status, _) = send(&app, "POST", "/users", Some(no_name)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let no_email = json!({ "name": "Amal", "email": "  ", "role": "admin" });
        let (status, _) = send(&app, "POST", "/users", Some(no_email)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = send(&app, "GET", "/users", None).await;
        let page: UserPageRes = serde_json::from_slice(&body).unwrap();
        assert_eq!(page.total, 23);
    }

    #[tokio::test]
    async fn lab_tests_and_doctor_profile_are_served() {
        let app = app();
        let (status, body) = send(&app, "GET", "/lab-tests", None).await;
        assert_eq!(status, StatusCode::OK);
        let tests: Vec<LabTest> = serde_json::from_slice(&body).unwrap();
        assert_eq!(tests.len(), 5);
        assert!(tests.iter().any(|t| t.result.is_none()));
        assert!(json(&body)[0]["patientName"].is_string());

        let (status, body) = send(&app, "GET", "/doctor/profile", None).await;
        assert_eq!(status, StatusCode::OK);
        let profile: DoctorProfile = serde_json::from_slice(&body).unwrap();
        assert_eq!(profile.id, "d1");
        assert_eq!(profile.name, "Dr. Sarah Ahmed");
        assert!(json(&body)["yearsOfExperience"].is_number());
    }

    #[tokio::test]
    async fn catalog_lists_clinics_and_specialties() {
        let app = app();
        let (status, body) = send(&app, "GET", "/catalog/clinics", None).await;
        assert_eq!(status, StatusCode::OK);
        let clinics: Vec<OptionDto> = serde_json::from_slice(&body).unwrap();
        let ids: Vec<_> = clinics.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(ids, ["c1", "c2", "c3"]);

        let (status, body) = send(&app, "GET", "/catalog/specialties", None).await;
        assert_eq!(status, StatusCode::OK);
        let specialties: Vec<OptionDto> = serde_json::from_slice(&body).unwrap();
        assert_eq!(specialties.len(), 4);
        assert_eq!(specialties[0].label, "Cardiology");
    }

    #[tokio::test]
    async fn empty_medication_query_returns_everything() {
        let app = app();
        let (_, body) = send(&app, "GET", "/medications", None).await;
        let all: Vec<Medication> = serde_json::from_slice(&body).unwrap();
        assert_eq!(all.len(), 6);

        let (_, body) = send(&app, "GET", "/medications?query=", None).await;
        let blank: Vec<Medication> = serde_json::from_slice(&body).unwrap();
        assert_eq!(blank.len(), 6);

        let (_, body) = send(&app, "GET", "/medications?query=PARACET", None).await;
        let generic: Vec<Medication> = serde_json::from_slice(&body).unwrap();
        assert_eq!(generic.len(), 1);
        assert_eq!(generic[0].name, "Panadol");
    }

    #[tokio::test]
    async fn booking_outside_catalog_is_rejected() {
        let app = app();
        let mut unknown = booking();
        unknown["clinic"] = json!({ "value": "c9", "label": "Nowhere" });
        let (status, _) = send(&app, "POST", "/appointments", Some(unknown)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let mut unknown_doctor = booking();
        unknown_doctor["doctor"] = json!({ "value": "d99", "label": "Dr. Nobody" });
        let (status, _) = send(&app, "POST", "/appointments", Some(unknown_doctor)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // d1 is a cardiologist at c1 only.
        let mut wrong_clinic = booking();
        wrong_clinic["clinic"] = json!({ "value": "c2", "label": "City Health Clinic" });
        let (status, _) = send(&app, "POST", "/appointments", Some(wrong_clinic)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = send(&app, "GET", "/appointments", None).await;
        let all: Vec<AppointmentRes> = serde_json::from_slice(&body).unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let (status, body) = send(&app(), "GET", "/api-docs/openapi.json", None).await;
        assert_eq!(status, StatusCode::OK);
        let doc: Value = serde_json::from_slice(&body).unwrap();
        assert!(doc["paths"]["/appointments"].is_object());
    }
}

//! REST handlers for the mock portal endpoints.
//!
//! Handlers log the underlying error and return a short, fixed message with the status code.

use crate::state::AppState;
use api_shared::{
    AppointmentReq, AppointmentRes, Clinic, ClinicReq, DoctorProfile, HealthRes, HealthService,
    LabTest, Medication, OptionDto, TimeSlotsRes, User, UserPageRes, UserReq,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDate;
use clinic_core::catalog::filter_doctors;
use clinic_core::{
    paginate, BookingRequest, BookingSelection, CatalogAccessor, CatalogData, CatalogKind,
    FixtureCatalog, PageRequest, PortalError, PortalResult, PortalRole, SelectOption, TimeSlot,
};
use serde::Deserialize;
use utoipa::IntoParams;

type ApiError = (StatusCode, &'static str);

const DEFAULT_STATUS: &str = "active";

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// 1-based page number (default 1)
    pub page: Option<u32>,
    /// Page size, 1 to 100 (default 10)
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MedicationParams {
    /// Case-insensitive search on brand or generic name
    pub query: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DoctorFilterParams {
    /// Specialty value to filter by
    pub specialty: Option<String>,
    /// Clinic value to filter by
    pub clinic: Option<String>,
}

fn to_dto(option: &SelectOption) -> OptionDto {
    OptionDto {
        value: option.value().to_string(),
        label: option.label().to_string(),
    }
}

fn not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

// ============================================================================
// HEALTH
// ============================================================================

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint. Answers immediately, without simulated latency.
pub async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

// ============================================================================
// CLINICS
// ============================================================================

#[utoipa::path(
    get,
    path = "/clinics",
    responses(
        (status = 200, description = "All clinics", body = [Clinic])
    )
)]
pub async fn list_clinics(State(state): State<AppState>) -> Json<Vec<Clinic>> {
    Json(state.store.clinics.read().await.clone())
}

#[utoipa::path(
    post,
    path = "/clinics",
    request_body = ClinicReq,
    responses(
        (status = 201, description = "Clinic created", body = Clinic),
        (status = 400, description = "Name is required")
    )
)]
pub async fn create_clinic(
    State(state): State<AppState>,
    Json(req): Json<ClinicReq>,
) -> Result<(StatusCode, Json<Clinic>), ApiError> {
    if !not_blank(&req.name) {
        return Err((StatusCode::BAD_REQUEST, "Clinic name is required"));
    }

    let clinic = Clinic {
        id: uuid::Uuid::new_v4().simple().to_string(),
        name: req.name.trim().to_string(),
        address: req.address,
        phone: req.phone,
        email: req.email,
        status: req.status.unwrap_or_else(|| DEFAULT_STATUS.into()),
    };
    tracing::info!(id = %clinic.id, "clinic created");
    state.store.clinics.write().await.push(clinic.clone());
    Ok((StatusCode::CREATED, Json(clinic)))
}

#[utoipa::path(
    get,
    path = "/clinics/{id}",
    params(("id" = String, Path, description = "Clinic id")),
    responses(
        (status = 200, description = "Clinic", body = Clinic),
        (status = 404, description = "No such clinic")
    )
)]
pub async fn get_clinic(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Clinic>, ApiError> {
    let clinics = state.store.clinics.read().await;
    clinics
        .iter()
        .find(|c| c.id == id)
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Clinic not found"))
}

#[utoipa::path(
    put,
    path = "/clinics/{id}",
    params(("id" = String, Path, description = "Clinic id")),
    request_body = ClinicReq,
    responses(
        (status = 200, description = "Clinic updated", body = Clinic),
        (status = 400, description = "Name is required"),
        (status = 404, description = "No such clinic")
    )
)]
pub async fn update_clinic(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ClinicReq>,
) -> Result<Json<Clinic>, ApiError> {
    if !not_blank(&req.name) {
        return Err((StatusCode::BAD_REQUEST, "Clinic name is required"));
    }

    let mut clinics = state.store.clinics.write().await;
    let clinic = clinics
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or((StatusCode::NOT_FOUND, "Clinic not found"))?;

    clinic.name = req.name.trim().to_string();
    clinic.address = req.address;
    clinic.phone = req.phone;
    clinic.email = req.email;
    if let Some(status) = req.status {
        clinic.status = status;
    }
    Ok(Json(clinic.clone()))
}

#[utoipa::path(
    delete,
    path = "/clinics/{id}",
    params(("id" = String, Path, description = "Clinic id")),
    responses(
        (status = 204, description = "Clinic deleted"),
        (status = 404, description = "No such clinic")
    )
)]
pub async fn delete_clinic(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let mut clinics = state.store.clinics.write().await;
    let before = clinics.len();
    clinics.retain(|c| c.id != id);
    if clinics.len() == before {
        return Err((StatusCode::NOT_FOUND, "Clinic not found"));
    }
    tracing::info!(%id, "clinic deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// USERS
// ============================================================================

fn validate_user(req: &UserReq) -> Result<PortalRole, ApiError> {
    if !not_blank(&req.name) || !not_blank(&req.email) {
        return Err((StatusCode::BAD_REQUEST, "Name and email are required"));
    }
    PortalRole::parse(&req.role).map_err(|e| {
        tracing::warn!("Rejected user: {}", e);
        (StatusCode::BAD_REQUEST, "Unknown role")
    })
}

#[utoipa::path(
    get,
    path = "/users",
    params(PageParams),
    responses(
        (status = 200, description = "One page of users", body = UserPageRes),
        (status = 400, description = "Malformed page parameters")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Json<UserPageRes> {
    let users = state.store.users.read().await;
    let page = paginate(&users, PageRequest::new(params.page, params.limit));
    Json(UserPageRes {
        items: page.items,
        total: page.total,
        page: page.page,
        limit: page.limit,
        total_pages: page.total_pages,
    })
}

#[utoipa::path(
    post,
    path = "/users",
    request_body = UserReq,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Missing name/email or unknown role")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<UserReq>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let role = validate_user(&req)?;
    let user = User {
        id: uuid::Uuid::new_v4().simple().to_string(),
        name: req.name.trim().to_string(),
        email: req.email.trim().to_string(),
        role: role.as_str().to_string(),
        status: req.status.unwrap_or_else(|| DEFAULT_STATUS.into()),
    };
    tracing::info!(id = %user.id, role = %role, "user created");
    state.store.users.write().await.push(user.clone());
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 404, description = "No such user")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let users = state.store.users.read().await;
    users
        .iter()
        .find(|u| u.id == id)
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "User not found"))
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User id")),
    request_body = UserReq,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Missing name/email or unknown role"),
        (status = 404, description = "No such user")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UserReq>,
) -> Result<Json<User>, ApiError> {
    let role = validate_user(&req)?;
    let mut users = state.store.users.write().await;
    let user = users
        .iter_mut()
        .find(|u| u.id == id)
        .ok_or((StatusCode::NOT_FOUND, "User not found"))?;

    user.name = req.name.trim().to_string();
    user.email = req.email.trim().to_string();
    user.role = role.as_str().to_string();
    if let Some(status) = req.status {
        user.status = status;
    }
    Ok(Json(user.clone()))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "No such user")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let mut users = state.store.users.write().await;
    let before = users.len();
    users.retain(|u| u.id != id);
    if users.len() == before {
        return Err((StatusCode::NOT_FOUND, "User not found"));
    }
    tracing::info!(%id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// LAB TESTS, MEDICATIONS, DOCTOR PROFILE
// ============================================================================

#[utoipa::path(
    get,
    path = "/lab-tests",
    responses(
        (status = 200, description = "All lab tests", body = [LabTest])
    )
)]
pub async fn list_lab_tests(State(state): State<AppState>) -> Json<Vec<LabTest>> {
    Json(state.store.lab_tests.clone())
}

#[utoipa::path(
    get,
    path = "/medications",
    params(MedicationParams),
    responses(
        (status = 200, description = "Medications matching the query", body = [Medication])
    )
)]
pub async fn search_medications(
    State(state): State<AppState>,
    Query(params): Query<MedicationParams>,
) -> Json<Vec<Medication>> {
    let needle = params
        .query
        .map(|q| q.trim().to_lowercase())
        .unwrap_or_default();

    let matches = state
        .store
        .medications
        .iter()
        .filter(|m| {
            needle.is_empty()
                || m.name.to_lowercase().contains(&needle)
                || m.generic_name.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();
    Json(matches)
}

#[utoipa::path(
    get,
    path = "/doctor/profile",
    responses(
        (status = 200, description = "The signed-in doctor's profile", body = DoctorProfile)
    )
)]
pub async fn doctor_profile(State(state): State<AppState>) -> Json<DoctorProfile> {
    Json(state.store.doctor_profile.clone())
}

// ============================================================================
// BOOKING CATALOG
// ============================================================================

fn fetch_options(state: &AppState, kind: CatalogKind) -> Result<Vec<SelectOption>, ApiError> {
    match state.catalog.fetch(kind) {
        Ok(CatalogData::Clinics(items)) | Ok(CatalogData::Specialties(items)) => Ok(items),
        Ok(CatalogData::Doctors(doctors)) => Ok(doctors.iter().map(|d| d.to_option()).collect()),
        Err(e) => {
            tracing::error!("Catalog fetch error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}

#[utoipa::path(
    get,
    path = "/catalog/clinics",
    responses(
        (status = 200, description = "Clinics to choose from", body = [OptionDto])
    )
)]
pub async fn catalog_clinics(
    State(state): State<AppState>,
) -> Result<Json<Vec<OptionDto>>, ApiError> {
    let options = fetch_options(&state, CatalogKind::Clinics)?;
    Ok(Json(options.iter().map(to_dto).collect()))
}

#[utoipa::path(
    get,
    path = "/catalog/specialties",
    responses(
        (status = 200, description = "Specialties to choose from", body = [OptionDto])
    )
)]
pub async fn catalog_specialties(
    State(state): State<AppState>,
) -> Result<Json<Vec<OptionDto>>, ApiError> {
    let options = fetch_options(&state, CatalogKind::Specialties)?;
    Ok(Json(options.iter().map(to_dto).collect()))
}

#[utoipa::path(
    get,
    path = "/catalog/doctors",
    params(DoctorFilterParams),
    responses(
        (status = 200, description = "Doctors matching the filters", body = [OptionDto])
    )
)]
pub async fn catalog_doctors(
    State(state): State<AppState>,
    Query(params): Query<DoctorFilterParams>,
) -> Result<Json<Vec<OptionDto>>, ApiError> {
    let doctors = match state.catalog.fetch(CatalogKind::Doctors) {
        Ok(CatalogData::Doctors(doctors)) => doctors,
        Ok(other) => {
            tracing::error!("Catalog returned {} for a doctors fetch", other.kind());
            return Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"));
        }
        Err(e) => {
            tracing::error!("Catalog fetch error: {:?}", e);
            return Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"));
        }
    };

    // Filters only compare values, so the label is irrelevant here.
    let filter = |value: Option<String>| value.and_then(|v| SelectOption::new(v, "").ok());
    let specialty = filter(params.specialty);
    let clinic = filter(params.clinic);

    let options = filter_doctors(&doctors, specialty.as_ref(), clinic.as_ref());
    Ok(Json(options.iter().map(to_dto).collect()))
}

#[utoipa::path(
    get,
    path = "/time-slots",
    responses(
        (status = 200, description = "Bookable times of day", body = TimeSlotsRes)
    )
)]
pub async fn time_slots(State(state): State<AppState>) -> Json<TimeSlotsRes> {
    let slots = state
        .cfg
        .slot_window()
        .slots()
        .map(|slot| slot.to_string())
        .collect();
    Json(TimeSlotsRes { slots })
}

// ============================================================================
// APPOINTMENTS
// ============================================================================

/// Turn the wire request into a validated booking, reporting the first missing step.
fn booking_request_from(req: AppointmentReq) -> PortalResult<BookingRequest> {
    let option = |dto: Option<OptionDto>| -> PortalResult<Option<SelectOption>> {
        Ok(dto.map(|o| SelectOption::new(o.value, o.label)).transpose()?)
    };

    let date = req
        .date
        .map(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d"))
        .transpose()
        .map_err(|e| PortalError::InvalidInput(format!("date: {e}")))?;
    let time = req.time.map(|t| TimeSlot::parse(&t)).transpose()?;

    let selection = BookingSelection {
        clinic: option(req.clinic)?,
        specialty: option(req.specialty)?,
        doctor: option(req.doctor)?,
        date,
        time,
        reason: req.reason,
    };
    BookingRequest::from_selection(&selection)
}

/// Check that the booking names catalog entries and that the doctor practises the chosen
/// specialty at the chosen clinic.
fn ensure_in_catalog(catalog: &FixtureCatalog, request: &BookingRequest) -> Result<(), ApiError> {
    let known = catalog
        .find(CatalogKind::Clinics, request.clinic.value())
        .is_some()
        && catalog
            .find(CatalogKind::Specialties, request.specialty.value())
            .is_some()
        && catalog
            .find(CatalogKind::Doctors, request.doctor.value())
            .is_some();
    if !known {
        tracing::warn!(
            clinic = request.clinic.value(),
            specialty = request.specialty.value(),
            doctor = request.doctor.value(),
            "Rejected booking: unknown catalog entry"
        );
        return Err((StatusCode::BAD_REQUEST, "Unknown clinic, specialty or doctor"));
    }

    let practises = filter_doctors(
        catalog.doctors(),
        Some(&request.specialty),
        Some(&request.clinic),
    )
    .iter()
    .any(|d| d.same_value(&request.doctor));
    if !practises {
        tracing::warn!(
            doctor = request.doctor.value(),
            "Rejected booking: doctor does not practise the specialty at the clinic"
        );
        return Err((
            StatusCode::BAD_REQUEST,
            "Doctor does not practise this specialty at this clinic",
        ));
    }
    Ok(())
}

#[utoipa::path(
    get,
    path = "/appointments",
    responses(
        (status = 200, description = "Appointments booked since start-up", body = [AppointmentRes])
    )
)]
pub async fn list_appointments(State(state): State<AppState>) -> Json<Vec<AppointmentRes>> {
    Json(state.store.appointments.read().await.clone())
}

#[utoipa::path(
    post,
    path = "/appointments",
    request_body = AppointmentReq,
    responses(
        (status = 201, description = "Appointment booked", body = AppointmentRes),
        (status = 400, description = "Incomplete booking, invalid value or unknown catalog entry"),
        (status = 409, description = "Slot already taken")
    )
)]
pub async fn create_appointment(
    State(state): State<AppState>,
    Json(req): Json<AppointmentReq>,
) -> Result<(StatusCode, Json<AppointmentRes>), ApiError> {
    let request = booking_request_from(req).map_err(|e| {
        tracing::warn!("Rejected booking: {}", e);
        match e {
            PortalError::Incomplete { .. } => (StatusCode::BAD_REQUEST, "Booking is incomplete"),
            _ => (StatusCode::BAD_REQUEST, "Invalid booking value"),
        }
    })?;

    ensure_in_catalog(&state.catalog, &request)?;

    request.ensure_bookable(state.cfg.slot_window()).map_err(|e| {
        tracing::warn!("Rejected booking: {}", e);
        (StatusCode::BAD_REQUEST, "Time is not a bookable slot")
    })?;

    let date = request.date.format("%Y-%m-%d").to_string();
    let time = request.time.to_string();

    let mut appointments = state.store.appointments.write().await;
    let taken = appointments.iter().any(|a| {
        a.doctor.value == request.doctor.value() && a.date == date && a.time == time
    });
    if taken {
        return Err((StatusCode::CONFLICT, "Slot already taken"));
    }

    let appointment = AppointmentRes {
        id: uuid::Uuid::new_v4().to_string(),
        status: "confirmed".into(),
        clinic: to_dto(&request.clinic),
        specialty: to_dto(&request.specialty),
        doctor: to_dto(&request.doctor),
        date,
        time,
        reason: request.reason,
    };
    tracing::info!(
        id = %appointment.id,
        doctor = %appointment.doctor.value,
        "appointment booked"
    );
    appointments.push(appointment.clone());
    Ok((StatusCode::CREATED, Json(appointment)))
}

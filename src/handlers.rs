use crate::clock::today_string;
use crate::errors::AppError;
use crate::finance::{self, Kind};
use crate::models::{
    Appointment, AppointmentInput, Catalog, CategoryOption, ClinicSettings, DashboardSummary,
    LoginRequest, MonthlyFinances, Patient, PatientInput, Session, SessionNoteInput, StatusUpdate,
    TransactionInput,
};
use crate::state::AppState;
use crate::storage;
use crate::{auth, dashboard, patients, scheduler};
use axum::{
    extract::{Path, Query, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub year: i32,
    /// Zero-based month index, as the stored data counts months.
    pub month: u32,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

// Session

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Session>, AppError> {
    let mut data = state.data.lock().await;
    let session = auth::login(&data.users, &payload.email, &payload.password)
        .ok_or_else(|| AppError::unauthorized("Credenciales incorrectas. Intenta de nuevo."))?;

    data.current_user = Some(session.clone());
    storage::persist_key(&state.data_dir, storage::CURRENT_USER, &data.current_user).await?;
    Ok(Json(session))
}

pub async fn logout(State(state): State<AppState>) -> Result<(), AppError> {
    let mut data = state.data.lock().await;
    data.current_user = None;
    storage::remove_key(&state.data_dir, storage::CURRENT_USER).await
}

pub async fn get_session(State(state): State<AppState>) -> Json<Option<Session>> {
    let data = state.data.lock().await;
    Json(data.current_user.clone())
}

// Appointments

pub async fn list_appointments(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Json<Vec<Appointment>> {
    let date = query.date.unwrap_or_else(today_string);
    let data = state.data.lock().await;
    Json(scheduler::list_for_date(&data.appointments, &date))
}

pub async fn create_appointment(
    State(state): State<AppState>,
    Json(payload): Json<AppointmentInput>,
) -> Result<Json<Appointment>, AppError> {
    let mut data = state.data.lock().await;
    let therapist = data
        .current_user
        .as_ref()
        .map(|s| s.name.clone())
        .unwrap_or_else(|| scheduler::UNASSIGNED_THERAPIST.to_owned());

    let created = scheduler::create_confirmed(&mut data.appointments, payload, &therapist)?;
    storage::persist_key(&state.data_dir, storage::APPOINTMENTS, &data.appointments).await?;
    Ok(Json(created))
}

pub async fn request_booking(
    State(state): State<AppState>,
    Json(payload): Json<AppointmentInput>,
) -> Result<Json<Appointment>, AppError> {
    let mut data = state.data.lock().await;
    let created = scheduler::request_booking(&mut data.appointments, payload)?;
    storage::persist_key(&state.data_dir, storage::APPOINTMENTS, &data.appointments).await?;
    Ok(Json(created))
}

pub async fn update_appointment_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdate>,
) -> Result<Json<Appointment>, AppError> {
    let mut data = state.data.lock().await;
    let updated = scheduler::update_status(&mut data.appointments, &id, payload.status)?;
    storage::persist_key(&state.data_dir, storage::APPOINTMENTS, &data.appointments).await?;
    Ok(Json(updated))
}

pub async fn delete_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(), AppError> {
    let mut data = state.data.lock().await;
    scheduler::delete(&mut data.appointments, &id)?;
    storage::persist_key(&state.data_dir, storage::APPOINTMENTS, &data.appointments).await?;
    Ok(())
}

pub async fn calendar(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<crate::models::CalendarCell>>, AppError> {
    let data = state.data.lock().await;
    let cells = scheduler::calendar_grid(&data.appointments, query.year, query.month)?;
    Ok(Json(cells))
}

pub async fn catalog() -> Json<Catalog> {
    Json(Catalog {
        time_slots: &scheduler::TIME_SLOTS,
        services: &scheduler::SERVICES,
        statuses: &scheduler::STATUSES,
        income_categories: finance::INCOME_CATEGORIES
            .iter()
            .copied()
            .map(|(value, label)| CategoryOption { value, label })
            .collect(),
        expense_categories: finance::EXPENSE_CATEGORIES
            .iter()
            .copied()
            .map(|(value, label)| CategoryOption { value, label })
            .collect(),
    })
}

// Patients

pub async fn list_patients(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<Patient>> {
    let data = state.data.lock().await;
    Json(patients::search(
        &data.patients,
        query.search.as_deref().unwrap_or(""),
    ))
}

pub async fn create_patient(
    State(state): State<AppState>,
    Json(payload): Json<PatientInput>,
) -> Result<Json<Patient>, AppError> {
    let mut data = state.data.lock().await;
    let created = patients::create(&mut data.patients, payload)?;
    storage::persist_key(&state.data_dir, storage::PATIENTS, &data.patients).await?;
    Ok(Json(created))
}

pub async fn update_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<PatientInput>,
) -> Result<Json<Patient>, AppError> {
    let mut data = state.data.lock().await;
    let updated = patients::update(&mut data.patients, &id, payload)?;
    storage::persist_key(&state.data_dir, storage::PATIENTS, &data.patients).await?;
    Ok(Json(updated))
}

pub async fn delete_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(), AppError> {
    let mut data = state.data.lock().await;
    patients::delete(&mut data.patients, &id)?;
    storage::persist_key(&state.data_dir, storage::PATIENTS, &data.patients).await?;
    Ok(())
}

pub async fn append_patient_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<SessionNoteInput>,
) -> Result<Json<Patient>, AppError> {
    let mut data = state.data.lock().await;
    let updated = patients::append_session(&mut data.patients, &id, payload)?;
    storage::persist_key(&state.data_dir, storage::PATIENTS, &data.patients).await?;
    Ok(Json(updated))
}

// Finances

pub async fn monthly_finances(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Json<MonthlyFinances> {
    let data = state.data.lock().await;
    Json(MonthlyFinances {
        summary: finance::monthly_aggregate(&data.finances, query.year, query.month),
        income: finance::filter_by_month(&data.finances, Kind::Income, query.year, query.month),
        expenses: finance::filter_by_month(&data.finances, Kind::Expense, query.year, query.month),
    })
}

pub async fn record_transaction(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(payload): Json<TransactionInput>,
) -> Result<Json<crate::models::Transaction>, AppError> {
    let kind: Kind = kind.parse()?;
    let mut data = state.data.lock().await;
    let recorded = finance::record_transaction(&mut data.finances, kind, payload)?;
    storage::persist_key(&state.data_dir, storage::FINANCES, &data.finances).await?;
    Ok(Json(recorded))
}

pub async fn delete_transaction(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<(), AppError> {
    let kind: Kind = kind.parse()?;
    let mut data = state.data.lock().await;
    finance::delete_transaction(&mut data.finances, kind, &id)?;
    storage::persist_key(&state.data_dir, storage::FINANCES, &data.finances).await?;
    Ok(())
}

pub async fn finance_report(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<impl IntoResponse, AppError> {
    let data = state.data.lock().await;
    let report = finance::render_report(&data.finances, query.year, query.month);
    let filename = finance::report_filename(query.year, query.month);
    Ok((
        [
            (CONTENT_TYPE, "text/plain; charset=utf-8".to_owned()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        report,
    ))
}

// Settings and dashboard

pub async fn get_settings(State(state): State<AppState>) -> Json<ClinicSettings> {
    let data = state.data.lock().await;
    Json(data.clinic_settings.clone().unwrap_or_default())
}

pub async fn update_settings(
    State(state): State<AppState>,
    Json(payload): Json<ClinicSettings>,
) -> Result<Json<ClinicSettings>, AppError> {
    let mut data = state.data.lock().await;
    data.clinic_settings = Some(payload);
    storage::persist_key(
        &state.data_dir,
        storage::CLINIC_SETTINGS,
        &data.clinic_settings,
    )
    .await?;
    Ok(Json(data.clinic_settings.clone().unwrap_or_default()))
}

pub async fn dashboard_summary(State(state): State<AppState>) -> Json<DashboardSummary> {
    let data = state.data.lock().await;
    Json(dashboard::summary(&data))
}

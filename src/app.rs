use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/login", post(handlers::login))
        .route("/api/logout", post(handlers::logout))
        .route("/api/session", get(handlers::get_session))
        .route(
            "/api/appointments",
            get(handlers::list_appointments).post(handlers::create_appointment),
        )
        .route(
            "/api/appointments/:id/status",
            patch(handlers::update_appointment_status),
        )
        .route("/api/appointments/:id", delete(handlers::delete_appointment))
        .route("/api/booking", post(handlers::request_booking))
        .route("/api/calendar", get(handlers::calendar))
        .route("/api/catalog", get(handlers::catalog))
        .route(
            "/api/patients",
            get(handlers::list_patients).post(handlers::create_patient),
        )
        .route(
            "/api/patients/:id",
            put(handlers::update_patient).delete(handlers::delete_patient),
        )
        .route(
            "/api/patients/:id/sessions",
            post(handlers::append_patient_session),
        )
        .route("/api/finances", get(handlers::monthly_finances))
        .route("/api/finances/report", get(handlers::finance_report))
        .route("/api/finances/:kind", post(handlers::record_transaction))
        .route(
            "/api/finances/:kind/:id",
            delete(handlers::delete_transaction),
        )
        .route(
            "/api/settings",
            get(handlers::get_settings).put(handlers::update_settings),
        )
        .route("/api/dashboard", get(handlers::dashboard_summary))
        .with_state(state)
}

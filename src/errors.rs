use axum::http::StatusCode;
use thiserror::Error;

/// Failures the domain modules can report. Everything is synchronous; there
/// is no transient-failure class because the store is local.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("falta el campo requerido: {field}")]
    Validation { field: &'static str },
    #[error("valor inválido para el campo: {field}")]
    Invalid { field: &'static str },
    #[error("ya existe una cita en ese horario (cita {conflicting_id})")]
    Conflict { conflicting_id: String },
    #[error("{entity} {id} no encontrado")]
    NotFound { entity: &'static str, id: String },
}

impl DomainError {
    pub fn missing(field: &'static str) -> Self {
        Self::Validation { field }
    }

    pub fn invalid(field: &'static str) -> Self {
        Self::Invalid { field }
    }

    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        let status = match &err {
            DomainError::Validation { .. } | DomainError::Invalid { .. } => StatusCode::BAD_REQUEST,
            DomainError::Conflict { .. } => StatusCode::CONFLICT,
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

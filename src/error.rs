//! Errores del dominio de notas y su traducción a respuestas HTTP.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum NotasError {
    #[error("no encontrado: {0}")]
    NotFound(String),
    #[error("capacidad excedida: {tipo} ya tiene {actual} de {maximo} notas")]
    CapacityExceeded {
        tipo: String,
        actual: usize,
        maximo: usize,
    },
    #[error("tipo de nota inválido: '{0}'")]
    InvalidKind(String),
    #[error("datos inválidos: {0}")]
    Validation(String),
    #[error("conflicto: {0}")]
    Conflict(String),
    #[error("error del almacén: {0}")]
    Store(String),
    #[error("configuración inválida: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, NotasError>;

impl NotasError {
    /// Código corto que acompaña al mensaje en el cuerpo JSON.
    pub fn codigo(&self) -> &'static str {
        match self {
            NotasError::NotFound(_) => "not_found",
            NotasError::CapacityExceeded { .. } => "capacity_exceeded",
            NotasError::InvalidKind(_) => "invalid_kind",
            NotasError::Validation(_) => "validation",
            NotasError::Conflict(_) => "conflict",
            NotasError::Store(_) => "store",
            NotasError::Config(_) => "config",
        }
    }
}

impl ResponseError for NotasError {
    fn status_code(&self) -> StatusCode {
        match self {
            NotasError::NotFound(_) => StatusCode::NOT_FOUND,
            NotasError::CapacityExceeded { .. } | NotasError::Conflict(_) => StatusCode::CONFLICT,
            NotasError::InvalidKind(_) | NotasError::Validation(_) => StatusCode::BAD_REQUEST,
            NotasError::Store(_) | NotasError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            tracing::error!(codigo = self.codigo(), "{}", self);
        } else {
            tracing::debug!(codigo = self.codigo(), "{}", self);
        }
        HttpResponse::build(self.status_code())
            .json(json!({"error": self.to_string(), "codigo": self.codigo()}))
    }
}

impl From<rusqlite::Error> for NotasError {
    fn from(e: rusqlite::Error) -> Self {
        NotasError::Store(format!("sqlite: {}", e))
    }
}

impl From<reqwest::Error> for NotasError {
    fn from(e: reqwest::Error) -> Self {
        NotasError::Store(format!("http: {}", e))
    }
}

impl From<serde_json::Error> for NotasError {
    fn from(e: serde_json::Error) -> Self {
        NotasError::Store(format!("fila con formato inesperado: {}", e))
    }
}

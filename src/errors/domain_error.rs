use thiserror::Error;

/// Errores de negocio lanzados por los pipes de texto.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validación fallida: {0}")]
    Validation(String),
    #[error("Texto rechazado: {0}")]
    Rejected(String),
}

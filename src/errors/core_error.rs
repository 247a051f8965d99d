use pipe_core::PipelineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de pipeline: {0}")]
    Pipeline(#[from] PipelineError),
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("Error de serialización: {0}")]
    Serialization(#[from] serde_json::Error),
}

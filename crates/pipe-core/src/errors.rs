//! Errores del compositor.
//!
//! Hay dos familias:
//! - `ConfigError`: la lista de pipes o el builder están mal formados. Se
//!   detecta al construir la cadena o cuando la ejecución alcanza un slot
//!   inválido.
//! - Fallos propios de un pipe: viajan dentro de `PipelineError::Pipe` sin
//!   traducción ni envoltorio adicional hasta quien llamó a `run`.

use thiserror::Error;

/// Error opaco producido por la lógica de un pipe.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("[Pipeline] the {pipe} pipe should be either callable or an object exposing a callable \"{method}\" method")]
    NotAPipe { pipe: String, method: String },
    #[error("[Pipeline] the \"{type_name}\" is missing callable \"{method}\" method")]
    MissingMethod {
        type_name: String,
        method: String,
        /// Miembros que el objeto sí expone (puede estar vacío).
        available: Vec<String>,
    },
    #[error("[Pipeline] empty pipe slot at position {position}")]
    EmptySlot { position: usize },
    #[error("[Pipeline] no payload was sent through the pipeline")]
    MissingPayload,
    #[error("[Pipeline] method name must not be empty")]
    EmptyMethod,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Pipe(BoxError),
    #[error("runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Resultado de cualquier pipe y de la cadena completa.
pub type PipeResult<T> = Result<T, PipelineError>;

impl PipelineError {
    /// Envuelve el error de negocio de un pipe.
    pub fn pipe<E>(err: E) -> Self
        where E: std::error::Error + Send + Sync + 'static
    {
        Self::Pipe(Box::new(err))
    }

    pub fn from_box(err: BoxError) -> Self {
        Self::Pipe(err)
    }

    /// Fallo de pipe a partir de un mensaje libre.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Pipe(message.into().into())
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    pub fn as_config(&self) -> Option<&ConfigError> {
        match self {
            Self::Config(err) => Some(err),
            _ => None,
        }
    }

    /// Acceso tipado al error original de un pipe.
    pub fn downcast_ref<E>(&self) -> Option<&E>
        where E: std::error::Error + 'static
    {
        match self {
            Self::Pipe(err) => err.downcast_ref::<E>(),
            _ => None,
        }
    }

    /// Devuelve el error del pipe tal como fue lanzado; cualquier otra
    /// variante se devuelve intacta en `Err`.
    pub fn into_pipe_error(self) -> Result<BoxError, Self> {
        match self {
            Self::Pipe(err) => Ok(err),
            other => Err(other),
        }
    }
}

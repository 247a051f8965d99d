//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone una estructura inmutable
//! (`AppConfig`) con la configuración del compositor, el filtro de logs y el
//! límite de palabras de la cadena de demostración.
use std::env;

use pipe_core::config::{init_dotenv, PipelineConfig};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Filtro de `env_logger` si no se define `PIPEFLOW_LOG`.
pub const DEFAULT_LOG_FILTER: &str = "info";
/// Límite de palabras si no se define `PIPEFLOW_MAX_WORDS`.
pub const DEFAULT_MAX_WORDS: usize = 32;

/// Configuración global de la aplicación.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuración del compositor (método por defecto de pipes objeto).
    pub pipeline: PipelineConfig,
    /// Filtro de logs en formato `env_logger` (p.ej. `pipe_core=debug`).
    pub log_filter: String,
    /// Máximo de palabras que acepta `WordLimit`.
    pub max_words: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { pipeline: PipelineConfig::default(),
               log_filter: DEFAULT_LOG_FILTER.to_string(),
               max_words: DEFAULT_MAX_WORDS }
    }
}

impl AppConfig {
    /// Lee `PIPEFLOW_METHOD`, `PIPEFLOW_LOG` y `PIPEFLOW_MAX_WORDS`.
    pub fn from_env() -> Result<Self, AppError> {
        init_dotenv();
        let log_filter = env::var("PIPEFLOW_LOG").ok()
                                                 .filter(|v| !v.trim().is_empty())
                                                 .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        let max_words = match env::var("PIPEFLOW_MAX_WORDS") {
            Ok(raw) => parse_max_words(&raw)?,
            Err(_) => DEFAULT_MAX_WORDS,
        };
        Ok(Self { pipeline: PipelineConfig::from_env(),
                  log_filter,
                  max_words })
    }
}

fn parse_max_words(raw: &str) -> Result<usize, AppError> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err(AppError::Config("PIPEFLOW_MAX_WORDS debe ser mayor que 0".into())),
        Ok(n) => Ok(n),
        Err(e) => Err(AppError::Config(format!("PIPEFLOW_MAX_WORDS inválido ({raw}): {e}"))),
    }
}

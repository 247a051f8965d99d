//! Carga de configuración del compositor desde variables de entorno.
//! Usa la convención `PIPEFLOW_METHOD` para el miembro por defecto de los
//! pipes objeto.

use std::env;

use dotenvy::dotenv;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_METHOD, METHOD_ENV};

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Miembro invocado sobre pipes objeto.
    #[serde(default = "default_method")]
    pub method: String,
}

fn default_method() -> String {
    DEFAULT_METHOD.to_string()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { method: default_method() }
    }
}

impl PipelineConfig {
    /// Lee la configuración del entorno. Valores vacíos se ignoran.
    pub fn from_env() -> Self {
        Lazy::force(&DOTENV_LOADED);
        let method = env::var(METHOD_ENV).ok()
                                         .map(|v| v.trim().to_string())
                                         .filter(|v| !v.is_empty())
                                         .unwrap_or_else(default_method);
        Self { method }
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}

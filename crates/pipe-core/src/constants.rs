//! Constantes del compositor.
//!
//! Agrupa los valores por defecto que comparten el builder y la carga de
//! configuración desde entorno.

/// Miembro que se invoca sobre los pipes de tipo objeto cuando no se llama a
/// `Pipeline::via`.
pub const DEFAULT_METHOD: &str = "handle";

/// Variable de entorno que sobreescribe `DEFAULT_METHOD` en `PipelineConfig::from_env`.
pub const METHOD_ENV: &str = "PIPEFLOW_METHOD";

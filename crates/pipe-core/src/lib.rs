//! pipe-core: compositor secuencial de pipes.
//!
//! Dado un payload y una lista ordenada de pipes, construye una única cadena
//! de continuaciones (plegando de derecha a izquierda desde la identidad) y la
//! ejecuta. Cada pipe decide si llama a `next`, corta la cadena o falla.
pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod pipe;

pub use config::PipelineConfig;
pub use constants::DEFAULT_METHOD;
pub use engine::{Composition, Pipeline};
pub use errors::{BoxError, ConfigError, PipeResult, PipelineError};
pub use pipe::{BoxFuture, Flow, MethodTable, Next, Pipe, PipeObject, PipeSpec, Pipes, SyncPipe};

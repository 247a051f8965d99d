//! Engine module: builder, handler resolution and composed chain.
//!
//! Ciclo de vida de una ejecución: `Pipeline` (configurado) -> `Composition`
//! (cadena construida) -> `Composition::run` (ejecutando) -> `PipeResult`
//! (resuelto, éxito o error).

pub mod builder;
pub mod composition;
pub(crate) mod handler;

pub use builder::Pipeline;
pub use composition::Composition;

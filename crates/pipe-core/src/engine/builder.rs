//! Builder para `Composition`.
//!
//! `Pipeline` acumula la configuración de una ejecución: payload, lista de
//! pipes y nombre del miembro a invocar sobre pipes objeto. Cada llamada
//! consume el builder y devuelve uno nuevo, así que la configuración nunca se
//! solapa con una ejecución en curso.
//!
//! Notas de diseño
//! - `build` resuelve cada pipe a un `Handler` una sola vez y pliega la lista
//!   de derecha a izquierda partiendo de la continuación identidad.
//! - `run` / `execute` son atajos async sobre `build` + `Composition::run`.
//! - `run_blocking` ejecuta la cadena en un runtime tokio propio
//!   (current-thread); no debe llamarse desde dentro de otro runtime.
//!
//! ```ignore
//! let out = Pipeline::new()
//!     .send(1)
//!     .via("process")
//!     .run(vec![PipeSpec::func(increment), PipeSpec::object(doubler)])
//!     .await?;
//! ```

use std::fmt;

use log::debug;
use uuid::Uuid;

use super::composition::Composition;
use super::handler::Handler;
use crate::config::PipelineConfig;
use crate::constants::DEFAULT_METHOD;
use crate::errors::{ConfigError, PipeResult};
use crate::pipe::{Next, PipeSpec, Pipes};

pub struct Pipeline<P> {
    payload: Option<P>,
    pipes: Vec<PipeSpec<P>>,
    method: String,
}

impl<P: Send + 'static> Pipeline<P> {
    pub fn new() -> Self {
        Self { payload: None,
               pipes: Vec::new(),
               method: DEFAULT_METHOD.to_string() }
    }

    /// Builder con el método por defecto tomado de la configuración.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new().via(config.method.clone())
    }

    /// Payload que recorrerá los pipes. Reemplaza el anterior.
    pub fn send(self, payload: P) -> Self {
        Self { payload: Some(payload),
               ..self }
    }

    /// Miembro invocado sobre pipes objeto.
    pub fn via(self, method: impl Into<String>) -> Self {
        Self { method: method.into(),
               ..self }
    }

    /// Instala la lista de pipes, reemplazando la anterior.
    pub fn through(self, pipes: impl Into<Pipes<P>>) -> Self {
        Self { pipes: pipes.into().into_vec(),
               ..self }
    }

    /// Añade un pipe al final de la lista.
    pub fn pipe(mut self, pipe: PipeSpec<P>) -> Self {
        self.pipes.push(pipe);
        self
    }

    pub fn payload(&self) -> Option<&P> {
        self.payload.as_ref()
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn pipes(&self) -> &[PipeSpec<P>] {
        &self.pipes
    }

    pub fn len(&self) -> usize {
        self.pipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipes.is_empty()
    }

    /// Resuelve los pipes y construye la cadena de continuaciones.
    pub fn build(self) -> PipeResult<Composition<P>> {
        let Pipeline { payload, pipes, method } = self;
        if method.is_empty() {
            return Err(ConfigError::EmptyMethod.into());
        }
        let payload = payload.ok_or(ConfigError::MissingPayload)?;

        let run_id = Uuid::new_v4();
        let len = pipes.len();
        let handlers: Vec<Handler<P>> = pipes.into_iter()
                                             .enumerate()
                                             .map(|(position, spec)| Handler::resolve(spec, &method, position))
                                             .collect();

        let chain = handlers.into_iter()
                            .enumerate()
                            .rev()
                            .fold(Next::terminal(), |next, (position, handler)| Next::link(run_id, position, handler, next));

        debug!("pipeline {run_id}: built chain of {len} pipe(s) via \"{method}\"");
        Ok(Composition::new(run_id, payload, chain, method, len))
    }

    /// Construye y ejecuta con los pipes ya instalados.
    pub async fn execute(self) -> PipeResult<P> {
        self.build()?.run().await
    }

    /// Equivale a `through(pipes)` seguido de `execute()`.
    pub async fn run(self, pipes: impl Into<Pipes<P>>) -> PipeResult<P> {
        self.through(pipes).execute().await
    }

    /// Versión bloqueante de `run`.
    pub fn run_blocking(self, pipes: impl Into<Pipes<P>>) -> PipeResult<P> {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        runtime.block_on(self.run(pipes))
    }
}

impl<P: Send + 'static> Default for Pipeline<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: 'static> fmt::Debug for Pipeline<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
         .field("has_payload", &self.payload.is_some())
         .field("pipes", &self.pipes)
         .field("method", &self.method)
         .finish()
    }
}

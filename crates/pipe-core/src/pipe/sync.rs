use async_trait::async_trait;

use super::{Next, Pipe};
use crate::errors::PipeResult;

/// Decisión de un pipe síncrono.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow<P> {
    /// Continuar con el siguiente pipe usando este payload.
    Continue(P),
    /// Cortar la cadena; el valor pasa a ser el resultado.
    Halt(P),
}

/// Adaptador para pipes síncronos `Fn(P) -> PipeResult<Flow<P>>`.
///
/// El pipe no ve la continuación: el adaptador llama a `next` cuando el
/// closure devuelve `Flow::Continue`.
pub struct SyncPipe<F> {
    f: F,
}

impl<F> SyncPipe<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<P, F> Pipe<P> for SyncPipe<F>
    where P: Send + 'static,
          F: Fn(P) -> PipeResult<Flow<P>> + Send + Sync + 'static
{
    async fn handle(&self, payload: P, next: Next<P>) -> PipeResult<P> {
        match (self.f)(payload)? {
            Flow::Continue(payload) => next.run(payload).await,
            Flow::Halt(payload) => Ok(payload),
        }
    }
}

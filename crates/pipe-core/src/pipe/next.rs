use std::fmt;
use std::sync::Arc;

use log::trace;
use uuid::Uuid;

use super::BoxFuture;
use crate::engine::handler::Handler;
use crate::errors::PipeResult;

enum Step<P> {
    Terminal,
    Link {
        run_id: Uuid,
        position: usize,
        handler: Handler<P>,
        next: Next<P>,
    },
}

/// Continuación: "el resto de la cadena" desde una posición.
///
/// Se construye de nuevo en cada `build`, nunca se reutiliza entre ejecuciones.
/// Clonar es barato (comparte el mismo `Arc`).
///
/// `run` devuelve directamente el future del pipe siguiente, de modo que cada
/// posición de la cadena añade un único nivel de anidamiento al hacer poll.
pub struct Next<P> {
    step: Arc<Step<P>>,
}

impl<P: Send + 'static> Next<P> {
    /// Continuación terminal: identidad, devuelve su entrada sin cambios.
    pub fn terminal() -> Self {
        Self { step: Arc::new(Step::Terminal) }
    }

    /// Envuelve `next` como argumento del pipe en `position`.
    pub(crate) fn link(run_id: Uuid, position: usize, handler: Handler<P>, next: Next<P>) -> Self {
        Self { step: Arc::new(Step::Link { run_id,
                                           position,
                                           handler,
                                           next }) }
    }

    /// Continúa la cadena con `payload` y devuelve el resultado río abajo.
    pub fn run(&self, payload: P) -> BoxFuture<'_, PipeResult<P>> {
        match &*self.step {
            Step::Terminal => {
                let done: PipeResult<P> = Ok(payload);
                Box::pin(std::future::ready(done))
            }
            Step::Link { run_id,
                         position,
                         handler,
                         next, } => {
                trace!("pipeline {run_id}: dispatch #{position} ({handler})");
                handler.dispatch(payload, next.clone())
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn from_pipe<T: super::Pipe<P> + 'static>(pipe: T) -> Self {
        Self::link(Uuid::nil(), 0, Handler::Function(Arc::new(pipe)), Self::terminal())
    }
}

impl<P> Clone for Next<P> {
    fn clone(&self) -> Self {
        Self { step: Arc::clone(&self.step) }
    }
}

impl<P> fmt::Debug for Next<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.step {
            Step::Terminal => f.write_str("Next(terminal)"),
            Step::Link { position, .. } => write!(f, "Next(#{position})"),
        }
    }
}

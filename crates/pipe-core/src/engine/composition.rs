use std::fmt;

use log::debug;
use uuid::Uuid;

use crate::errors::PipeResult;
use crate::pipe::Next;

/// Cadena ya construida junto con su payload.
///
/// Se ejecuta una sola vez: `run` consume el valor.
pub struct Composition<P> {
    run_id: Uuid,
    payload: P,
    chain: Next<P>,
    method: String,
    len: usize,
}

impl<P: Send + 'static> Composition<P> {
    pub(crate) fn new(run_id: Uuid, payload: P, chain: Next<P>, method: String, len: usize) -> Self {
        Self { run_id,
               payload,
               chain,
               method,
               len }
    }

    /// Identificador de esta ejecución (aparece en los logs).
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Invoca la continuación más externa con el payload y espera a que toda
    /// la cadena se resuelva.
    pub async fn run(self) -> PipeResult<P> {
        let Composition { run_id, payload, chain, len, .. } = self;
        debug!("pipeline {run_id}: executing {len} pipe(s)");
        let outcome = chain.run(payload).await;
        match &outcome {
            Ok(_) => debug!("pipeline {run_id}: settled ok"),
            Err(err) => debug!("pipeline {run_id}: settled with error: {err}"),
        }
        outcome
    }
}

impl<P> fmt::Debug for Composition<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composition")
         .field("run_id", &self.run_id)
         .field("method", &self.method)
         .field("len", &self.len)
         .finish()
    }
}

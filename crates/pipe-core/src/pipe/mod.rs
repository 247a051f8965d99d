//! Definiciones relacionadas a Pipes.
//!
//! Un pipe recibe el payload actual y la continuación `next` que representa el
//! resto de la cadena. Decide por sí mismo si continúa (`next.run(p)`), corta
//! la cadena devolviendo un valor, o falla. Este módulo define:
//! - `Pipe`: interfaz invocable `(payload, next)`; todo closure async con esa
//!   forma la implementa.
//! - `Next`: continuación clonable construida por el engine.
//! - `SyncPipe` y `Flow` para pipes síncronos.
//! - `PipeObject` y `MethodTable` para pipes que exponen miembros por nombre.
//! - `PipeSpec` / `Pipes`: entrada heterogénea de la lista de pipes.

mod macros;
mod next;
mod object;
mod spec;
mod sync;

use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;

use crate::errors::PipeResult;

pub use next::Next;
pub use object::{MethodTable, PipeObject};
pub use spec::{PipeSpec, Pipes};
pub use sync::{Flow, SyncPipe};

/// Future boxeado y `Send` que devuelven continuaciones y pipes.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Trait que define un Pipe.
#[async_trait]
pub trait Pipe<P>: Send + Sync {
    /// Procesa `payload`; llamar a `next` continúa con el siguiente pipe.
    async fn handle(&self, payload: P, next: Next<P>) -> PipeResult<P>;
}

// -------------------------------------------------------------
// Adaptador: cualquier closure `(P, Next<P>) -> Future` es un `Pipe`.
// Firma expandida de `#[async_trait]` escrita a mano: el future del closure
// se boxea tal cual, sin un estado async intermedio.
// -------------------------------------------------------------
impl<P, F, Fut> Pipe<P> for F
    where P: Send + 'static,
          F: Fn(P, Next<P>) -> Fut + Send + Sync + 'static,
          Fut: Future<Output = PipeResult<P>> + Send + 'static
{
    fn handle<'life0, 'async_trait>(&'life0 self, payload: P, next: Next<P>) -> BoxFuture<'async_trait, PipeResult<P>>
        where 'life0: 'async_trait,
              Self: 'async_trait
    {
        Box::pin((self)(payload, next))
    }
}

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use serde_json::Value;

use super::{Flow, Next, Pipe, PipeObject, SyncPipe};
use crate::errors::PipeResult;

/// Entrada de la lista de pipes tal como la entrega el caller.
///
/// Solo `Callable` y `Object` son invocables. `Value` y `Empty` representan
/// slots mal formados (por ejemplo cargados desde configuración) y producen
/// un `ConfigError` cuando la ejecución los alcanza.
pub enum PipeSpec<P> {
    Callable(Arc<dyn Pipe<P>>),
    Object(Arc<dyn PipeObject<P>>),
    Value(Value),
    Empty,
}

impl<P: Send + 'static> PipeSpec<P> {
    /// Pipe a partir de un closure async `(payload, next)`.
    pub fn func<F, Fut>(f: F) -> Self
        where F: Fn(P, Next<P>) -> Fut + Send + Sync + 'static,
              Fut: Future<Output = PipeResult<P>> + Send + 'static
    {
        Self::Callable(Arc::new(f))
    }

    pub fn callable<T>(pipe: T) -> Self
        where T: Pipe<P> + 'static
    {
        Self::Callable(Arc::new(pipe))
    }

    /// Pipe síncrono; ver `SyncPipe`.
    pub fn sync<F>(f: F) -> Self
        where F: Fn(P) -> PipeResult<Flow<P>> + Send + Sync + 'static
    {
        Self::callable(SyncPipe::new(f))
    }

    pub fn object<T>(object: T) -> Self
        where T: PipeObject<P>
    {
        Self::Object(Arc::new(object))
    }

    pub fn shared(object: Arc<dyn PipeObject<P>>) -> Self {
        Self::Object(object)
    }

    /// Slot no invocable. `Value::Null` se normaliza a `Empty`.
    pub fn value(value: impl Into<Value>) -> Self {
        match value.into() {
            Value::Null => Self::Empty,
            other => Self::Value(other),
        }
    }
}

impl<P: 'static> PipeSpec<P> {
    pub fn is_invocable(&self) -> bool {
        matches!(self, Self::Callable(_) | Self::Object(_))
    }

    /// Descripción corta para logs.
    pub fn describe(&self) -> String {
        match self {
            Self::Callable(_) => "callable".to_string(),
            Self::Object(obj) => format!("object {}", obj.type_name()),
            Self::Value(v) => format!("value {v}"),
            Self::Empty => "empty".to_string(),
        }
    }
}

impl<P> Clone for PipeSpec<P> {
    fn clone(&self) -> Self {
        match self {
            Self::Callable(p) => Self::Callable(Arc::clone(p)),
            Self::Object(o) => Self::Object(Arc::clone(o)),
            Self::Value(v) => Self::Value(v.clone()),
            Self::Empty => Self::Empty,
        }
    }
}

impl<P: 'static> fmt::Debug for PipeSpec<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PipeSpec({})", self.describe())
    }
}

/// Lista ordenada de pipes. Un pipe suelto se normaliza a una lista de un
/// elemento.
pub struct Pipes<P>(Vec<PipeSpec<P>>);

impl<P> Pipes<P> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<PipeSpec<P>> {
        self.0
    }
}

impl<P> Default for Pipes<P> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<P> From<PipeSpec<P>> for Pipes<P> {
    fn from(pipe: PipeSpec<P>) -> Self {
        Self(vec![pipe])
    }
}

impl<P> From<Vec<PipeSpec<P>>> for Pipes<P> {
    fn from(pipes: Vec<PipeSpec<P>>) -> Self {
        Self(pipes)
    }
}

impl<P, const N: usize> From<[PipeSpec<P>; N]> for Pipes<P> {
    fn from(pipes: [PipeSpec<P>; N]) -> Self {
        Self(pipes.into())
    }
}

// Un pipe ausente sigue ocupando su posición.
impl<P> From<Option<PipeSpec<P>>> for Pipes<P> {
    fn from(pipe: Option<PipeSpec<P>>) -> Self {
        Self(vec![pipe.unwrap_or(PipeSpec::Empty)])
    }
}

impl<P> FromIterator<PipeSpec<P>> for Pipes<P> {
    fn from_iter<I: IntoIterator<Item = PipeSpec<P>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<P> IntoIterator for Pipes<P> {
    type Item = PipeSpec<P>;
    type IntoIter = std::vec::IntoIter<PipeSpec<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

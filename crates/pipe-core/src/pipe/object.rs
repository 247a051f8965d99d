use std::fmt;
use std::future::Future;
use std::sync::Arc;

use indexmap::IndexMap;

use super::{Next, Pipe};
use crate::errors::PipeResult;

/// Pipe de tipo objeto: expone uno o más miembros invocables por nombre.
///
/// El engine resuelve el miembro una sola vez, al construir la cadena, usando
/// el nombre configurado con `Pipeline::via` (por defecto `"handle"`).
pub trait PipeObject<P>: Send + Sync + 'static {
    /// Nombre del tipo, usado en los errores de configuración.
    fn type_name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Nombres de los miembros expuestos.
    fn methods(&self) -> Vec<String>;

    /// Devuelve el miembro `name` como pipe, si existe.
    fn method(self: Arc<Self>, name: &str) -> Option<Arc<dyn Pipe<P>>>;
}

/// Objeto construido a partir de closures con nombre.
///
/// Conserva el orden de registro de los miembros.
pub struct MethodTable<P> {
    type_name: String,
    methods: IndexMap<String, Arc<dyn Pipe<P>>>,
}

impl<P: Send + 'static> MethodTable<P> {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self { type_name: type_name.into(),
               methods: IndexMap::new() }
    }

    /// Registra un miembro a partir de un closure async. Un nombre repetido
    /// reemplaza al anterior.
    pub fn on<F, Fut>(self, name: impl Into<String>, f: F) -> Self
        where F: Fn(P, Next<P>) -> Fut + Send + Sync + 'static,
              Fut: Future<Output = PipeResult<P>> + Send + 'static
    {
        self.on_pipe(name, f)
    }

    /// Registra cualquier `Pipe` como miembro.
    pub fn on_pipe<T>(mut self, name: impl Into<String>, pipe: T) -> Self
        where T: Pipe<P> + 'static
    {
        self.methods.insert(name.into(), Arc::new(pipe));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }
}

impl<P: Send + 'static> PipeObject<P> for MethodTable<P> {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn methods(&self) -> Vec<String> {
        self.methods.keys().cloned().collect()
    }

    fn method(self: Arc<Self>, name: &str) -> Option<Arc<dyn Pipe<P>>> {
        self.methods.get(name).cloned()
    }
}

impl<P> fmt::Debug for MethodTable<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodTable")
         .field("type_name", &self.type_name)
         .field("methods", &self.methods.keys().collect::<Vec<_>>())
         .finish()
    }
}

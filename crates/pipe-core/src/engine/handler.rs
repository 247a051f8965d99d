use std::fmt;
use std::sync::Arc;

use log::warn;
use serde_json::Value;

use crate::errors::{ConfigError, PipeResult, PipelineError};
use crate::pipe::{BoxFuture, Next, Pipe, PipeSpec};

/// Pipe ya resuelto para un `method` concreto.
///
/// La forma del pipe se inspecciona una sola vez en `resolve`. Un slot que no
/// se puede invocar queda como `Rejected` y solo falla cuando la cadena llega
/// a él, de modo que los pipes anteriores se ejecutan normalmente.
pub(crate) enum Handler<P> {
    Function(Arc<dyn Pipe<P>>),
    Method {
        owner: String,
        method: String,
        pipe: Arc<dyn Pipe<P>>,
    },
    Rejected(ConfigError),
}

impl<P: Send + 'static> Handler<P> {
    pub(crate) fn resolve(spec: PipeSpec<P>, method: &str, position: usize) -> Self {
        match spec {
            PipeSpec::Callable(pipe) => Handler::Function(pipe),
            PipeSpec::Object(object) => {
                let owner = object.type_name().to_string();
                let available = object.methods();
                match object.method(method) {
                    Some(pipe) => Handler::Method { owner,
                                                    method: method.to_string(),
                                                    pipe },
                    None => Handler::Rejected(ConfigError::MissingMethod { type_name: owner,
                                                                           method: method.to_string(),
                                                                           available }),
                }
            }
            PipeSpec::Value(value) => Handler::Rejected(reject_value(value, method)),
            PipeSpec::Empty => Handler::Rejected(ConfigError::EmptySlot { position }),
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Handler::Function(_) => "function",
            Handler::Method { .. } => "method",
            Handler::Rejected(_) => "rejected",
        }
    }

    /// Future del pipe resuelto, sin envoltorio propio.
    pub(crate) fn dispatch(&self, payload: P, next: Next<P>) -> BoxFuture<'_, PipeResult<P>> {
        match self {
            Handler::Function(pipe) | Handler::Method { pipe, .. } => pipe.handle(payload, next),
            Handler::Rejected(err) => {
                warn!("pipeline reached a rejected pipe: {err}");
                let failed: PipeResult<P> = Err(PipelineError::from(err.clone()));
                Box::pin(std::future::ready(failed))
            }
        }
    }
}

impl<P: 'static> fmt::Display for Handler<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Function(_) => f.write_str("function"),
            Handler::Method { owner, method, .. } => write!(f, "method {owner}::{method}"),
            Handler::Rejected(err) => write!(f, "rejected: {err}"),
        }
    }
}

// Los contenedores JSON se tratan como objetos sin el miembro pedido; el
// resto de escalares no es un pipe.
fn reject_value(value: Value, method: &str) -> ConfigError {
    match value {
        Value::Object(map) => ConfigError::MissingMethod { type_name: "Object".to_string(),
                                                           method: method.to_string(),
                                                           available: map.keys().cloned().collect() },
        Value::Array(_) => ConfigError::MissingMethod { type_name: "Array".to_string(),
                                                        method: method.to_string(),
                                                        available: vec![] },
        Value::String(s) => ConfigError::NotAPipe { pipe: s,
                                                    method: method.to_string() },
        other => ConfigError::NotAPipe { pipe: other.to_string(),
                                         method: method.to_string() },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipe::MethodTable;
    use serde_json::json;

    fn table() -> PipeSpec<u32> {
        PipeSpec::object(MethodTable::new("Doubler").on("handle", |n: u32, next: Next<u32>| async move {
                                                        next.run(n * 2).await
                                                    }))
    }

    #[test]
    fn callable_resolves_to_function() {
        let spec = PipeSpec::func(|n: u32, next: Next<u32>| async move { next.run(n).await });
        assert_eq!(Handler::resolve(spec, "handle", 0).kind(), "function");
    }

    #[test]
    fn object_with_member_resolves_to_method() {
        match Handler::resolve(table(), "handle", 0) {
            Handler::Method { owner, method, .. } => {
                assert_eq!(owner, "Doubler");
                assert_eq!(method, "handle");
            }
            other => panic!("expected method handler, got {}", other.kind()),
        }
    }

    #[test]
    fn display_names_owner_and_member() {
        assert_eq!(Handler::resolve(table(), "handle", 0).to_string(), "method Doubler::handle");
        let spec = PipeSpec::func(|n: u32, next: Next<u32>| async move { next.run(n).await });
        assert_eq!(Handler::resolve(spec, "handle", 0).to_string(), "function");
        assert_eq!(Handler::<u32>::resolve(PipeSpec::Empty, "handle", 3).to_string(),
                   "rejected: [Pipeline] empty pipe slot at position 3");
    }

    #[test]
    fn object_without_member_is_rejected() {
        match Handler::resolve(table(), "process", 2) {
            Handler::Rejected(ConfigError::MissingMethod { type_name, method, available }) => {
                assert_eq!(type_name, "Doubler");
                assert_eq!(method, "process");
                assert_eq!(available, vec!["handle".to_string()]);
            }
            other => panic!("expected missing method, got {}", other.kind()),
        }
    }

    #[test]
    fn scalars_are_not_pipes() {
        let err = |v: Value| match Handler::<u32>::resolve(PipeSpec::value(v), "handle", 0) {
            Handler::Rejected(e) => e,
            other => panic!("expected rejection, got {}", other.kind()),
        };
        assert_eq!(err(json!(42)),
                   ConfigError::NotAPipe { pipe: "42".into(),
                                           method: "handle".into() });
        assert_eq!(err(json!("oops")),
                   ConfigError::NotAPipe { pipe: "oops".into(),
                                           method: "handle".into() });
        assert!(matches!(err(json!({"handle": 1})),
                         ConfigError::MissingMethod { ref type_name, .. } if type_name == "Object"));
        assert!(matches!(err(json!([1, 2])),
                         ConfigError::MissingMethod { ref type_name, .. } if type_name == "Array"));
        assert_eq!(err(json!(null)), ConfigError::EmptySlot { position: 0 });
    }

    #[tokio::test]
    async fn rejected_handler_fails_on_dispatch() {
        let handler = Handler::<u32>::resolve(PipeSpec::Empty, "handle", 4);
        let err = handler.dispatch(1, Next::terminal()).await.unwrap_err();
        assert_eq!(err.as_config(), Some(&ConfigError::EmptySlot { position: 4 }));
    }
}

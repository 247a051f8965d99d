//! Macro para exponer métodos async de un struct como miembros de un
//! `PipeObject`.
//!
//! Cada método debe tener la forma
//! `async fn nombre(&self, payload: P, next: Next<P>) -> PipeResult<P>`.
//!
//! ```ignore
//! struct Auth { token: String }
//!
//! impl Auth {
//!     async fn handle(&self, req: Request, next: Next<Request>) -> PipeResult<Request> { ... }
//!     async fn audit(&self, req: Request, next: Next<Request>) -> PipeResult<Request> { ... }
//! }
//!
//! pipe_methods!(Auth: Request { "handle" => handle, "audit" => audit });
//! ```

#[macro_export]
macro_rules! pipe_methods {
    ($ty:ty : $payload:ty { $($name:literal => $method:ident),+ $(,)? }) => {
        impl $crate::PipeObject<$payload> for $ty {
            fn methods(&self) -> ::std::vec::Vec<::std::string::String> {
                vec![$(::std::string::String::from($name)),+]
            }

            fn method(self: ::std::sync::Arc<Self>, name: &str)
                      -> ::std::option::Option<::std::sync::Arc<dyn $crate::Pipe<$payload>>> {
                match name {
                    $(
                        $name => {
                            let this = self;
                            let bound = move |payload: $payload, next: $crate::Next<$payload>| {
                                let this = ::std::sync::Arc::clone(&this);
                                async move { this.$method(payload, next).await }
                            };
                            let pipe: ::std::sync::Arc<dyn $crate::Pipe<$payload>> = ::std::sync::Arc::new(bound);
                            ::std::option::Option::Some(pipe)
                        }
                    )+
                    _ => ::std::option::Option::None,
                }
            }
        }
    };
}

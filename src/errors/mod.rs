//! Errores de la aplicación.
//!
//! `AppError` agrupa lo que puede fallar en el binario; `DomainError` son los
//! fallos de negocio que lanzan los pipes de texto.

pub mod core_error;
pub mod domain_error;

pub use core_error::AppError;
pub use domain_error::DomainError;

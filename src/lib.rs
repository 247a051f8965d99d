//! pipeflow
//!
//! Binario de demostración sobre `pipe-core`:
//! - Expone `config` para leer la configuración desde el entorno.
//! - Expone `errors` para manejar errores de aplicación y de dominio.
//! - Expone `pipes` con una cadena de pipes de texto lista para usar.
//!
//! Puede usarse desde `main.rs` o por otros crates/clientes.

pub mod config;
pub mod errors;
pub mod pipes;

#[cfg(test)]
mod tests {
	use super::config::AppConfig;
	use super::errors::{AppError, DomainError};
	use super::pipes::process;

	#[tokio::test]
	async fn process_runs_default_chain() {
		let out = process("  hola mundo ", &AppConfig::default()).await.unwrap();
		assert_eq!(out.text, "HOLA MUNDO");
		assert_eq!(out.words, vec!["HOLA", "MUNDO"]);
		assert_eq!(out.trail.last().map(String::as_str), Some("audit:2"));
	}

	#[tokio::test]
	async fn process_surfaces_domain_errors() {
		let cfg = AppConfig { max_words: 1,
		                      ..AppConfig::default() };
		let err = process("uno dos", &cfg).await.unwrap_err();
		match err {
			AppError::Pipeline(inner) => {
				assert!(matches!(inner.downcast_ref::<DomainError>(), Some(DomainError::Validation(_))));
			}
			other => panic!("error inesperado: {other}"),
		}
	}
}

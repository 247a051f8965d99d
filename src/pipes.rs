//! Pipes de demostración sobre texto.
//!
//! Cadena por defecto: `AuditTrail` -> `trim` -> `uppercase` -> `tokenize` ->
//! `WordLimit`. Cada pipe deja una marca en `trail` para poder seguir el
//! orden de ejecución.

use async_trait::async_trait;
use log::info;
use pipe_core::{pipe_methods, Flow, Next, Pipe, PipeResult, PipeSpec, Pipeline, PipelineError};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::errors::{AppError, DomainError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPayload {
    pub text: String,
    pub words: Vec<String>,
    /// Marcas de los pipes por los que pasó el payload, en orden.
    pub trail: Vec<String>,
}

impl TextPayload {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(),
               ..Self::default() }
    }
}

/// Recorta espacios. Un texto vacío corta la cadena.
pub fn trim() -> PipeSpec<TextPayload> {
    PipeSpec::sync(|mut payload: TextPayload| {
        payload.text = payload.text.trim().to_string();
        payload.trail.push("trim".into());
        if payload.text.is_empty() {
            Ok(Flow::Halt(payload))
        } else {
            Ok(Flow::Continue(payload))
        }
    })
}

pub fn uppercase() -> PipeSpec<TextPayload> {
    PipeSpec::func(|mut payload: TextPayload, next: Next<TextPayload>| async move {
        payload.text = payload.text.to_uppercase();
        payload.trail.push("uppercase".into());
        next.run(payload).await
    })
}

/// Separa en palabras. Cede el turno al runtime antes de continuar.
pub fn tokenize() -> PipeSpec<TextPayload> {
    PipeSpec::func(|mut payload: TextPayload, next: Next<TextPayload>| async move {
        tokio::task::yield_now().await;
        payload.words = payload.text.split_whitespace().map(str::to_string).collect();
        payload.trail.push("tokenize".into());
        next.run(payload).await
    })
}

/// Rechaza el texto si contiene alguna de las palabras prohibidas (sin
/// distinguir mayúsculas).
pub fn forbid(words: &[&str]) -> PipeSpec<TextPayload> {
    let banned: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
    PipeSpec::sync(move |mut payload: TextPayload| {
        let lowered = payload.text.to_lowercase();
        if let Some(hit) = banned.iter().find(|w| lowered.split_whitespace().any(|t| t == w.as_str())) {
            return Err(PipelineError::pipe(DomainError::Rejected(hit.clone())));
        }
        payload.trail.push("forbid".into());
        Ok(Flow::Continue(payload))
    })
}

/// Límite de palabras.
///
/// `handle` rechaza el payload si lo supera; `truncate` recorta las palabras
/// sobrantes y continúa.
#[derive(Debug, Clone)]
pub struct WordLimit {
    max: usize,
}

impl WordLimit {
    pub fn new(max: usize) -> Self {
        Self { max }
    }

    async fn handle(&self, mut payload: TextPayload, next: Next<TextPayload>) -> PipeResult<TextPayload> {
        if payload.words.len() > self.max {
            return Err(PipelineError::pipe(DomainError::Validation(format!("{} palabras superan el límite de {}",
                                                                           payload.words.len(),
                                                                           self.max))));
        }
        payload.trail.push("word_limit".into());
        next.run(payload).await
    }

    async fn truncate(&self, mut payload: TextPayload, next: Next<TextPayload>) -> PipeResult<TextPayload> {
        payload.words.truncate(self.max);
        payload.text = payload.words.join(" ");
        payload.trail.push("word_limit.truncate".into());
        next.run(payload).await
    }
}

pipe_methods!(WordLimit: TextPayload { "handle" => handle, "truncate" => truncate });

/// Registra el resultado de toda la cadena después de que ésta termina.
pub struct AuditTrail;

#[async_trait]
impl Pipe<TextPayload> for AuditTrail {
    async fn handle(&self, payload: TextPayload, next: Next<TextPayload>) -> PipeResult<TextPayload> {
        let mut out = next.run(payload).await?;
        out.trail.push(format!("audit:{}", out.words.len()));
        Ok(out)
    }
}

pub fn default_chain(max_words: usize) -> Vec<PipeSpec<TextPayload>> {
    vec![PipeSpec::callable(AuditTrail),
         trim(),
         uppercase(),
         tokenize(),
         PipeSpec::object(WordLimit::new(max_words))]
}

/// Pasa `text` por la cadena por defecto.
pub async fn process(text: impl Into<String>, config: &AppConfig) -> Result<TextPayload, AppError> {
    let composition = Pipeline::from_config(&config.pipeline).send(TextPayload::new(text))
                                                             .through(default_chain(config.max_words))
                                                             .build()?;
    info!("procesando texto (run {}, via \"{}\")", composition.run_id(), composition.method());
    Ok(composition.run().await?)
}

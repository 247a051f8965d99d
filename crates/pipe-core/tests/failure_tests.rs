//! Propagación de errores: configuración y fallos de pipes.
//!
//! Un slot mal formado o un fallo de negocio abortan el resto de la cadena;
//! los efectos de los pipes anteriores se conservan.

use std::sync::{Arc, Mutex};

use pipe_core::{ConfigError, Flow, MethodTable, Next, PipeResult, PipeSpec, Pipeline, PipelineError};
use serde_json::json;
use thiserror::Error;

type Log = Arc<Mutex<Vec<&'static str>>>;

fn record(name: &'static str, log: Log) -> PipeSpec<u32> {
    PipeSpec::func(move |n: u32, next: Next<u32>| {
        log.lock().unwrap().push(name);
        async move { next.run(n + 1).await }
    })
}

#[derive(Debug, Error, PartialEq)]
enum BillingError {
    #[error("card declined for account {0}")]
    Declined(u32),
}

#[tokio::test]
async fn scalar_pipe_fails_with_configuration_error() {
    let log: Log = Arc::default();
    let err = Pipeline::new().send(0)
                             .run(vec![record("before", log.clone()), PipeSpec::value(42), record("after", log.clone())])
                             .await
                             .unwrap_err();

    assert!(err.is_config());
    assert_eq!(err.as_config(),
               Some(&ConfigError::NotAPipe { pipe: "42".into(),
                                             method: "handle".into() }));
    assert!(err.to_string().contains("should be either callable"));
    assert_eq!(*log.lock().unwrap(), vec!["before"]);
}

#[tokio::test]
async fn string_pipe_is_named_in_the_message() {
    let err = Pipeline::new().send(0_u32).run(PipeSpec::value("auth")).await.unwrap_err();
    assert_eq!(err.to_string(),
               "[Pipeline] the auth pipe should be either callable or an object exposing a callable \"handle\" method");
}

#[tokio::test]
async fn object_missing_configured_method_names_type_and_method() {
    let log: Log = Arc::default();
    let guard = MethodTable::new("AuthGuard").on("handle", |n: u32, next: Next<u32>| async move { next.run(n).await });

    let err = Pipeline::new().send(0)
                             .via("process")
                             .run(vec![record("first", log.clone()), PipeSpec::object(guard), record("last", log.clone())])
                             .await
                             .unwrap_err();

    match err.as_config() {
        Some(ConfigError::MissingMethod { type_name, method, available }) => {
            assert_eq!(type_name, "AuthGuard");
            assert_eq!(method, "process");
            assert_eq!(available, &vec!["handle".to_string()]);
        }
        other => panic!("expected MissingMethod, got {other:?}"),
    }
    assert_eq!(err.to_string(), "[Pipeline] the \"AuthGuard\" is missing callable \"process\" method");
    // el primer pipe ya se ejecutó y su efecto no se deshace
    assert_eq!(*log.lock().unwrap(), vec!["first"]);
}

#[tokio::test]
async fn json_object_pipe_is_missing_the_method() {
    let err = Pipeline::new().send(0_u32).run(PipeSpec::value(json!({"name": "x"}))).await.unwrap_err();
    assert!(matches!(err.as_config(), Some(ConfigError::MissingMethod { type_name, .. }) if type_name == "Object"));
}

#[tokio::test]
async fn empty_slot_fails_fast_at_its_position() {
    let log: Log = Arc::default();
    let err = Pipeline::new().send(0)
                             .run(vec![record("a", log.clone()), record("b", log.clone()), PipeSpec::Empty])
                             .await
                             .unwrap_err();
    assert_eq!(err.as_config(), Some(&ConfigError::EmptySlot { position: 2 }));
    assert_eq!(*log.lock().unwrap(), vec!["a", "b"]);

    let err = Pipeline::new().send(0_u32).run(None::<PipeSpec<u32>>).await.unwrap_err();
    assert_eq!(err.as_config(), Some(&ConfigError::EmptySlot { position: 0 }));
}

#[tokio::test]
async fn pipe_failure_propagates_unchanged() {
    let log: Log = Arc::default();
    let billing = PipeSpec::func(|n: u32, _next: Next<u32>| async move {
        Err::<u32, _>(PipelineError::pipe(BillingError::Declined(n)))
    });

    let err = Pipeline::new().send(7)
                             .run(vec![record("auth", log.clone()), billing, record("ship", log.clone())])
                             .await
                             .unwrap_err();

    assert!(!err.is_config());
    assert_eq!(err.downcast_ref::<BillingError>(), Some(&BillingError::Declined(8)));
    assert_eq!(err.to_string(), "card declined for account 8");
    assert_eq!(*log.lock().unwrap(), vec!["auth"]);
}

#[tokio::test]
async fn failure_bubbles_through_outer_pipes() {
    // El pipe externo ve el error de `next` y lo reenvía con `?`.
    let outer = PipeSpec::func(|n: u32, next: Next<u32>| async move {
        let out = next.run(n).await?;
        Ok(out + 1000)
    });
    let inner = PipeSpec::sync(|_: u32| -> PipeResult<Flow<u32>> { Err(PipelineError::msg("inner broke")) });

    let err = Pipeline::new().send(1).run(vec![outer, inner]).await.unwrap_err();
    assert_eq!(err.to_string(), "inner broke");
}

#[tokio::test]
async fn outer_pipe_may_recover_from_downstream_failure() {
    let fallback = PipeSpec::func(|n: u32, next: Next<u32>| async move {
        match next.run(n).await {
            Ok(v) => Ok(v),
            Err(PipelineError::Pipe(_)) => Ok(0),
            Err(other) => Err(other),
        }
    });
    let failing = PipeSpec::func(|_: u32, _next: Next<u32>| async move { Err::<u32, _>(PipelineError::msg("down")) });

    let out = Pipeline::new().send(9).run(vec![fallback, failing]).await.unwrap();
    assert_eq!(out, 0);
}

#[tokio::test]
async fn missing_payload_is_a_configuration_error() {
    let err = Pipeline::<u32>::new().run(Vec::<PipeSpec<u32>>::new()).await.unwrap_err();
    assert_eq!(err.as_config(), Some(&ConfigError::MissingPayload));
}

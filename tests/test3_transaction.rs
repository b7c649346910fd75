use std::sync::{Arc, Mutex};

use neon_http::catalog::oid;
use neon_http::prelude::*;
use neon_http::test_utils::{RecordingTransport, batch_body, result_json, test_config};
use serde_json::json;
use tokio::runtime::Runtime;

fn two_results(row_as_array: bool) -> String {
    let (first, second) = if row_as_array {
        (json!([["1"]]), json!([["2"]]))
    } else {
        (json!([{"?column?": "1"}]), json!([{"?column?": "2"}]))
    };
    batch_body(vec![
        result_json("SELECT", &[("?column?", oid::INT4)], first, row_as_array),
        result_json("SELECT", &[("?column?", oid::INT4)], second, row_as_array),
    ])
}

fn statements() -> Vec<QueryAndParams> {
    vec![
        QueryAndParams::new_without_params("SELECT 1"),
        QueryAndParams::new("SELECT $1::int", vec![PgValue::Int(2)]),
    ]
}

#[test]
fn test3_default_mode_headers_and_body() -> Result<(), Box<dyn std::error::Error>> {
    let transport = Arc::new(RecordingTransport::new().respond(200, two_results(false)));
    let client = NeonClient::with_transport(test_config()?, transport.clone());
    let rt = Runtime::new()?;

    let options = TransactionOptions::default()
        .with_query_options(HttpQueryOptions::default().with_full_results(true));
    let results = rt.block_on(client.transaction(&statements(), &options))?;

    let request = transport.last_request().ok_or("no request recorded")?;
    assert_eq!(
        request.body,
        json!({"queries": [
            {"query": "SELECT 1", "params": []},
            {"query": "SELECT $1::int", "params": ["2"]},
        ]})
    );
    assert_eq!(request.header("Neon-Batch-Isolation-Level"), Some("ReadUncommitted"));
    assert_eq!(request.header("Neon-Batch-Read-Only"), Some("false"));
    assert_eq!(request.header("Neon-Batch-Deferrable"), Some("false"));
    assert_eq!(request.header("Neon-Array-Mode"), Some("false"));
    assert_eq!(request.header("Neon-Raw-Text-Output"), Some("true"));
    assert_eq!(transport.request_count(), 1);

    assert_eq!(results.len(), 2);
    let first = results[0].as_full().ok_or("expected full results")?;
    assert!(!first.row_as_array);
    assert_eq!(first.rows[0].get("?column?"), Some(&PgValue::Int(1)));
    Ok(())
}

#[test]
fn test3_results_keep_submission_order() -> Result<(), Box<dyn std::error::Error>> {
    let transport = Arc::new(RecordingTransport::new().respond(200, two_results(true)));
    let client = NeonClient::with_transport(test_config()?, transport.clone());
    let rt = Runtime::new()?;

    let options = TransactionOptions::default()
        .with_query_options(HttpQueryOptions::default().with_array_mode(true));
    let results = rt.block_on(client.transaction(&statements(), &options))?;

    let values: Vec<_> = results
        .iter()
        .map(|r| r.rows()[0].get_by_index(0).cloned())
        .collect();
    assert_eq!(values, vec![Some(PgValue::Int(1)), Some(PgValue::Int(2))]);
    assert!(results.iter().all(|r| r.as_full().is_none()));
    Ok(())
}

#[test]
fn test3_serializable_read_only_deferrable() -> Result<(), Box<dyn std::error::Error>> {
    let transport = Arc::new(RecordingTransport::new().respond(200, two_results(true)));
    let client = NeonClient::with_transport(test_config()?, transport.clone());
    let rt = Runtime::new()?;

    let options = TransactionOptions::default()
        .with_mode(TransactionMode::new(IsolationLevel::Serializable, true, true)?)
        .with_query_options(
            HttpQueryOptions::default()
                .with_array_mode(true)
                .with_auth_token(|| Some("abc".into())),
        );
    rt.block_on(client.transaction(&statements(), &options))?;

    let request = transport.last_request().ok_or("no request recorded")?;
    assert_eq!(request.header("Neon-Batch-Isolation-Level"), Some("Serializable"));
    assert_eq!(request.header("Neon-Batch-Read-Only"), Some("true"));
    assert_eq!(request.header("Neon-Batch-Deferrable"), Some("true"));
    assert_eq!(request.header("Authorization"), Some("Bearer abc"));
    Ok(())
}

#[test]
fn test3_invalid_modes_are_configuration_errors() {
    for (level, read_only) in [
        (IsolationLevel::ReadCommitted, true),
        (IsolationLevel::RepeatableRead, true),
        (IsolationLevel::Serializable, false),
    ] {
        let err = TransactionMode::new(level, read_only, true).unwrap_err();
        assert!(err.is_configuration_error(), "{level} read_only={read_only}");
    }
}

#[test]
fn test3_http_failure_yields_no_results() -> Result<(), Box<dyn std::error::Error>> {
    let transport = Arc::new(RecordingTransport::new().respond(500, "Internal Server Error"));
    let client = NeonClient::with_transport(test_config()?, transport.clone());
    let rt = Runtime::new()?;

    let err = rt
        .block_on(client.transaction(&statements(), &TransactionOptions::default()))
        .unwrap_err();
    assert!(matches!(err, NeonHttpError::HttpResponse { status: 500, ref body } if body == "Internal Server Error"));
    Ok(())
}

#[test]
fn test3_result_count_mismatch_is_malformed() -> Result<(), Box<dyn std::error::Error>> {
    let one = batch_body(vec![result_json("SELECT", &[("?column?", oid::INT4)], json!([["1"]]), true)]);
    let transport = Arc::new(RecordingTransport::new().respond(200, one));
    let client = NeonClient::with_transport(test_config()?, transport.clone());
    let rt = Runtime::new()?;

    let err = rt
        .block_on(client.transaction(&statements(), &TransactionOptions::default()))
        .unwrap_err();
    assert!(matches!(err, NeonHttpError::MalformedResponse(_)));
    Ok(())
}

#[test]
fn test3_callbacks_fire_per_statement() -> Result<(), Box<dyn std::error::Error>> {
    let transport = Arc::new(RecordingTransport::new().respond(200, two_results(true)));
    let client = NeonClient::with_transport(test_config()?, transport.clone());
    let rt = Runtime::new()?;

    let events = Arc::new(Mutex::new(Vec::new()));
    let before = Arc::clone(&events);
    let after = Arc::clone(&events);
    let options = TransactionOptions::default().with_query_options(
        HttpQueryOptions::default()
            .with_array_mode(true)
            .with_query_callback(move |statement| {
                before.lock().unwrap().push(format!("query {}", statement.query));
            })
            .with_result_callback(move |statement, full, array_mode, _| {
                after.lock().unwrap().push(format!(
                    "result {} rows={} array={array_mode}",
                    statement.query,
                    full.rows.len()
                ));
            }),
    );
    rt.block_on(client.transaction(&statements(), &options))?;

    assert_eq!(
        *events.lock().unwrap(),
        vec![
            "query SELECT 1",
            "query SELECT $1::int",
            "result SELECT 1 rows=1 array=true",
            "result SELECT $1::int rows=1 array=true",
        ]
    );
    Ok(())
}

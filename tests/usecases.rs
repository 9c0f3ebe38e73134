//! End-to-end pipeline tests over JSON payloads.

use relay::prelude::*;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn record() -> Value {
    json!({ "a": 1, "b": 2, "c": "hello" })
}

fn validate(payload: Value) -> Result<Value, String> {
    if payload["a"] == json!(1) {
        Ok(payload)
    } else {
        Err("fail".to_string())
    }
}

fn mark_validated(mut payload: Value) -> Result<Value, String> {
    payload["validated"] = json!(true);
    Ok(payload)
}

#[test]
fn single_step_passes_a_valid_record_through() {
    let seq = step(validate);
    assert_eq!(run(seq, record()), Ok(record()));
}

#[test]
fn single_step_rejects_an_invalid_record() {
    let seq = step(validate);
    assert_eq!(
        run(seq, json!({ "a": 2, "b": 2, "c": "hello" })),
        Err("fail".to_string())
    );
}

#[test]
fn two_steps_validate_then_annotate() {
    let seq = step(validate).chain(step(mark_validated));

    let mut expected = record();
    expected["validated"] = json!(true);
    assert_eq!(run(seq, record()), Ok(expected));
}

#[test]
fn a_failed_step_skips_everything_after_it() {
    let annotated = Rc::new(RefCell::new(false));
    let touched = Rc::clone(&annotated);

    let seq = step(validate).chain(step(move |payload: Value| {
        *touched.borrow_mut() = true;
        mark_validated(payload)
    }));

    assert_eq!(
        run(seq, json!({ "a": 0, "b": 2, "c": "hello" })),
        Err("fail".to_string())
    );
    assert!(!*annotated.borrow());
}

#[test]
fn a_nested_sequence_reports_errors_through_map_err() {
    let inner = step(validate);
    let seq = inner.nested().map_err(|e| format!("mapped: {e}"));

    assert_eq!(
        run(seq, json!({ "a": 7, "b": 2, "c": "hello" })),
        Err("mapped: fail".to_string())
    );
}

#[test]
fn a_nested_sequence_is_transparent_on_success() {
    let inner = step(validate).chain(step(mark_validated));
    let seq = inner.nested().chain(step(|mut payload: Value| {
        payload["stamped"] = json!(true);
        Ok::<_, String>(payload)
    }));

    let mut expected = record();
    expected["validated"] = json!(true);
    expected["stamped"] = json!(true);
    assert_eq!(run(seq, record()), Ok(expected));
}

#[tokio::test]
async fn async_steps_run_strictly_in_order() {
    let order = Arc::new(AtomicUsize::new(0));

    let first = {
        let order = Arc::clone(&order);
        step_async(move |payload: Value| {
            let seen = order.fetch_add(1, Ordering::SeqCst);
            async move {
                assert_eq!(seen, 0);
                validate(payload)
            }
        })
    };
    let second = {
        let order = Arc::clone(&order);
        step_async(move |payload: Value| {
            let seen = order.fetch_add(1, Ordering::SeqCst);
            async move {
                assert_eq!(seen, 1);
                mark_validated(payload)
            }
        })
    };

    let mut expected = record();
    expected["validated"] = json!(true);
    assert_eq!(run_async(first.chain(second), record()).await, Ok(expected));
    assert_eq!(order.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn async_failure_skips_the_remaining_steps() {
    let annotated = Arc::new(AtomicUsize::new(0));
    let touched = Arc::clone(&annotated);

    let seq = step_async(|payload: Value| async move { validate(payload) }).chain(step_async(
        move |payload: Value| {
            touched.fetch_add(1, Ordering::SeqCst);
            async move { mark_validated(payload) }
        },
    ));

    assert_eq!(
        run_async(seq, json!({ "a": 9, "b": 2, "c": "hello" })).await,
        Err("fail".to_string())
    );
    assert_eq!(annotated.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn sync_steps_lift_into_an_async_pipeline() {
    let seq = step(validate)
        .into_async()
        .chain(step_async(|payload: Value| async move {
            mark_validated(payload)
        }));

    let mut expected = record();
    expected["validated"] = json!(true);
    assert_eq!(run_async(seq, record()).await, Ok(expected));
}

#[tokio::test]
async fn async_nesting_with_map_err_prefixes_inner_failures() {
    let inner = step_async(|payload: Value| async move { validate(payload) });
    let seq = inner.nested().map_err(|e| format!("mapped: {e}"));

    assert_eq!(
        run_async(seq, json!({ "a": 3, "b": 2, "c": "hello" })).await,
        Err("mapped: fail".to_string())
    );
}

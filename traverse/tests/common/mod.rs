//! Shared fixture for the integration tests

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::time::Duration;

use safe_traverse::{Error, Function, Object, Pending, Value};
use serde_json::json;
use tracing_subscriber::EnvFilter;

/// Route engine logs to the test writer, filtered by `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn number(args: &[Value], index: usize) -> f64 {
    args.get(index).and_then(Value::as_f64).unwrap_or(f64::NAN)
}

fn functions() -> Object {
    Object::new()
        .with("return42", Function::new("return42", |_, _| Ok(Value::from(42))))
        .with(
            "sum",
            Function::new("sum", |_, args| Ok(Value::from(number(args, 0) + number(args, 1)))),
        )
        .with(
            "sumByThis",
            Function::new("sumByThis", |receiver, args| {
                receiver
                    .member("sum")
                    .as_function()
                    .ok_or_else(|| Error::message("this.sum is not a function"))?
                    .invoke(receiver, args)
            }),
        )
        .with(
            "returnFnObj",
            Function::new("returnFnObj", |_, _| {
                let c = Function::new("c", |_, _| Ok(Value::from(42)));
                Ok(Object::new().with("c", c).into())
            }),
        )
        .with(
            "throwError",
            Function::new("throwError", |_, _| Err(Error::message("Error message!"))),
        )
        .with(
            "async42",
            Function::new("async42", |_, _| {
                let pending = Pending::new(async {
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    Ok(Value::from(42))
                });
                Ok(pending.into())
            }),
        )
        .with(
            "asyncReject",
            Function::new("asyncReject", |_, _| {
                Ok(Pending::rejected(Error::message("Rejected!")).into())
            }),
        )
}

fn point() -> Function {
    Function::class("Point", |args| {
        Ok(Object::new()
            .with("x", args.first().cloned())
            .with("y", args.get(1).cloned())
            .into())
    })
}

/// The subject most tests traverse
pub fn basic_object() -> Value {
    init_tracing();
    Object::new()
        .with("a", json!({"b": {"c": 42}}))
        .with(
            "arrayOut",
            json!({
                "array": [
                    {"type": "aa", "a": 1, "b": 2},
                    {"type": "aa", "a": 3, "b": 4},
                    {"type": "bb", "a": 11, "b": 12},
                    {"type": "bb", "a": 13, "b": 14},
                ]
            }),
        )
        .with("functions", functions())
        .with("Point", point())
        .with("pending", Pending::resolved(json!({"answer": 42})))
        .into()
}

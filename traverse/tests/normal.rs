//! Plain chain operations

mod common;

use std::cell::RefCell;

use common::basic_object;
use safe_traverse::{Error, Lookup, Object, Value, traverse};
use serde_json::json;

#[test]
fn entry_point_is_exported_under_both_names() {
    let via_traverse = traverse(basic_object()).get("a").get("b").get("c");
    let via_from = safe_traverse::from(basic_object()).get("a").get("b").get("c");

    assert_eq!(via_traverse.value(), via_from.value());
    assert_eq!(via_traverse.path(), via_from.path());
}

#[test]
fn root_path_is_dollar() {
    let state = traverse(basic_object());

    assert_eq!(state.path(), "$");
    assert!(!state.is_terminal());
}

#[test]
fn should_return_42() {
    let state = traverse(basic_object())
        .get_property("a")
        .get_property("b")
        .get_property("c");

    assert_eq!(state.value(), &Value::from(42));
    assert_eq!(state.path(), "$.a.b.c");
}

#[test]
fn should_return_object() {
    let state = traverse(basic_object()).get_property("a").get_property("b");

    assert_eq!(state.value(), &Value::from(json!({"c": 42})));
    assert_eq!(state.path(), "$.a.b");
}

#[test]
fn path_stops_growing_at_first_missing_property() {
    let state = traverse(basic_object())
        .get_property("a")
        .get_property("b")
        .get_property("d")
        .get_property("e");

    assert!(state.value().is_undefined());
    assert!(state.is_terminal());
    assert_eq!(state.path(), "$.a.b.d");
}

#[test]
fn present_key_sequences_reach_their_value() {
    for depth in 1..6 {
        let keys: Vec<String> = (0..depth).map(|i| format!("k{i}")).collect();
        let subject = keys
            .iter()
            .rev()
            .fold(Value::from(depth), |inner, key| Object::new().with(key.clone(), inner).into());

        let state = keys
            .iter()
            .fold(traverse(subject), |state, key| state.get(key));

        assert_eq!(state.value(), &Value::from(depth));
        assert_eq!(state.path(), format!("$.{}", keys.join(".")));
    }
}

#[test]
fn missing_key_sequences_stop_at_first_miss() {
    let subject = Value::from(json!({"k0": {"k1": {"k2": true}}}));
    let chain = ["k0", "k1", "missing", "k3", "k4"];

    let state = chain
        .iter()
        .fold(traverse(subject), |state, key| state.get(key));

    assert!(state.value().is_undefined());
    assert_eq!(state.path(), "$.k0.k1.missing");
}

#[test]
fn get_all_without_names_reads_the_value() {
    let value = traverse(basic_object())
        .get("a")
        .get("b")
        .get("c")
        .get_all::<&str>(&[])
        .into_value();

    assert_eq!(value, Value::from(42));
}

#[test]
fn get_all_with_one_name_navigates() {
    let state = traverse(basic_object())
        .get("a")
        .get_all(&["b"])
        .into_state()
        .map(|state| state.path());

    assert_eq!(state.as_deref(), Some("$.a.b"));
}

#[test]
fn get_all_with_several_names_does_not_chain() {
    let lookup = traverse(basic_object()).get("a").get_all(&["b", "c"]);

    assert!(matches!(lookup, Lookup::Raw(_)));
    assert_eq!(lookup.into_value(), Value::from(json!({"b": {"c": 42}})));
}

#[test]
fn select_the_correct_array_element() {
    let state = traverse(basic_object())
        .get_property("arrayOut")
        .get("array")
        .select(|items| {
            items
                .as_array()
                .and_then(|array| array.find(|item| item.member("a") == Value::from(1)))
        });

    assert_eq!(state.value(), &Value::from(json!({"type": "aa", "a": 1, "b": 2})));
    assert_eq!(state.path(), "$.arrayOut.array.(selector)");
}

#[test]
fn chain_after_selector() {
    let state = traverse(basic_object())
        .get_property("arrayOut")
        .get("array")
        .select(|items| {
            items
                .as_array()
                .and_then(|array| array.find(|item| item.member("a") == Value::from(1)))
        })
        .get_property("b");

    assert_eq!(state.value(), &Value::from(2));
    assert_eq!(state.path(), "$.arrayOut.array.(selector).b");
}

#[test]
fn falsy_selector_results_end_the_chain() {
    for falsy in [Value::Bool(false), Value::from(0), Value::from(""), Value::Null] {
        let state = traverse(basic_object())
            .get_property("arrayOut")
            .get("array")
            .select(move |_| falsy);

        assert!(state.value().is_undefined());
        assert_eq!(state.path(), "$.arrayOut.array.(selector)");
    }
}

#[test]
fn select_is_skipped_on_a_dead_chain() {
    let state = traverse(basic_object())
        .get_property("arrayOut")
        .get("array")
        .get("nothing")
        .select(|_| -> Value { panic!("never call me") });

    assert!(state.value().is_undefined());
    assert_eq!(state.path(), "$.arrayOut.array.nothing");
}

#[test]
fn call_function() -> safe_traverse::Result<()> {
    let state = traverse(basic_object())
        .get_property("functions")
        .call("return42", &[])?;

    assert_eq!(state.value(), &Value::from(42));
    assert_eq!(state.path(), "$.functions.#return42");
    Ok(())
}

#[test]
fn call_function_with_arguments() -> safe_traverse::Result<()> {
    let state = traverse(basic_object())
        .get_property("functions")
        .call("sum", &[Value::from(1), Value::from(2)])?;

    assert_eq!(state.value(), &Value::from(3));
    assert_eq!(state.path(), "$.functions.#sum");
    Ok(())
}

#[test]
fn call_binds_the_current_value_as_receiver() -> safe_traverse::Result<()> {
    let state = traverse(basic_object())
        .get_property("functions")
        .call("sumByThis", &[Value::from(1), Value::from(2)])?;

    assert_eq!(state.value(), &Value::from(3));
    assert_eq!(state.path(), "$.functions.#sumByThis");
    Ok(())
}

#[test]
fn calls_chain_through_returned_objects() -> safe_traverse::Result<()> {
    let state = traverse(basic_object())
        .get_property("functions")
        .call("returnFnObj", &[])?
        .call("c", &[])?;

    assert_eq!(state.value(), &Value::from(42));
    assert_eq!(state.path(), "$.functions.#returnFnObj.#c");
    Ok(())
}

#[test]
fn call_not_a_function_should_return_undefined() -> safe_traverse::Result<()> {
    let state = traverse(basic_object())
        .get_property("functions")
        .call("notAFunction", &[])?;

    assert!(state.value().is_undefined());
    assert_eq!(state.path(), "$.functions.#notAFunction");
    Ok(())
}

#[test]
fn call_function_after_chaining_undefined() -> safe_traverse::Result<()> {
    let state = traverse(basic_object())
        .get_property("functions")
        .get("nothing")
        .call("return42", &[])?;

    assert!(state.value().is_undefined());
    assert_eq!(state.path(), "$.functions.nothing");
    Ok(())
}

#[test]
fn call_function_that_throws_error() {
    let result = traverse(basic_object())
        .get_property("functions")
        .call("throwError", &[]);

    assert_eq!(result.err(), Some(Error::message("Error message!")));
}

#[test]
fn safe_call_function_that_throws_error() {
    let state = traverse(basic_object())
        .get_property("functions")
        .safe_call("throwError", &[]);

    assert!(state.value().is_undefined());
    assert_eq!(state.path(), "$.functions.#throwError(fail)");
    assert_eq!(
        state.error().as_ref().and_then(Error::as_message),
        Some("Error message!")
    );
}

#[test]
fn safe_call_that_succeeds_matches_call() {
    let state = traverse(basic_object())
        .get_property("functions")
        .safe_call("return42", &[]);

    assert_eq!(state.value(), &Value::from(42));
    assert_eq!(state.path(), "$.functions.#return42");
    assert!(state.error().is_none());
}

#[test]
fn dead_end_is_shared_within_one_traversal() {
    let failed = traverse(basic_object())
        .get_property("functions")
        .safe_call("throwError", &[]);
    let next = failed.get("anything");

    assert_eq!(next.path(), "$.functions.#throwError(fail)");
    assert!(next.error().is_none());
    assert!(failed.error().is_none());
}

#[test]
fn action_passes_the_state_through() {
    let seen = RefCell::new(Vec::new());
    let state = traverse(basic_object())
        .get("a")
        .get("b")
        .get("c")
        .action(|value| seen.borrow_mut().push(value.clone()));

    assert_eq!(state.value(), &Value::from(42));
    assert_eq!(state.path(), "$.a.b.c");
    assert_eq!(seen.into_inner(), vec![Value::from(42)]);
}

#[test]
fn action_runs_on_a_dead_chain() {
    let seen = RefCell::new(None);
    let state = traverse(basic_object())
        .get("nothing")
        .action(|value| *seen.borrow_mut() = Some(value.clone()));

    assert_eq!(seen.into_inner(), Some(Value::Undefined));
    assert_eq!(state.path(), "$.nothing");
}

#[test]
fn action_can_mutate_the_subject() {
    let subject = basic_object();
    let state = traverse(subject.clone()).get("a").action(|value| {
        if let Some(object) = value.as_object() {
            object.insert("added", true);
        }
    });

    assert_eq!(state.get("added").value(), &Value::Bool(true));
    assert_eq!(subject.member("a").member("added"), Value::Bool(true));
}

#[test]
fn try_action_errors_propagate() {
    let result = traverse(basic_object())
        .get("a")
        .try_action(|_| Err(Error::thrown("boom")));

    assert_eq!(result.err(), Some(Error::thrown("boom")));
}

#[test]
fn validate_accepts_and_rejects() {
    let accepted = traverse(basic_object())
        .get("a")
        .get("b")
        .get("c")
        .validate(|value| value.as_f64().is_some_and(|n| n > 40.0));
    assert_eq!(accepted.value(), &Value::from(42));
    assert_eq!(accepted.path(), "$.a.b.c");

    let rejected = accepted.validate(|value| value.as_str().is_some());
    assert!(rejected.value().is_undefined());
    assert_eq!(rejected.path(), "$.a.b.c.(validator)");
}

#[test]
fn try_validate_errors_propagate() {
    let result = traverse(basic_object())
        .get("a")
        .try_validate(|_| Err(Error::message("invalid")));

    assert_eq!(result.err(), Some(Error::message("invalid")));
}

#[test]
fn keys_values_and_entries() {
    let subject = || Value::from(json!({"a": 1, "b": {}, "c": false}));

    let keys = traverse(subject()).keys();
    assert_eq!(keys.value(), &Value::from(json!(["a", "b", "c"])));
    assert_eq!(keys.path(), "$+Object.#keys");

    let values = traverse(subject()).values();
    assert_eq!(values.value(), &Value::from(json!([1, {}, false])));
    assert_eq!(values.path(), "$+Object.#values");

    let entries = traverse(subject()).entries();
    assert_eq!(
        entries.value(),
        &Value::from(json!([["a", 1], ["b", {}], ["c", false]]))
    );
    assert_eq!(entries.path(), "$+Object.#entries");
}

#[test]
fn introspection_extends_the_current_path() {
    let state = traverse(basic_object()).get("a").keys().get("0");

    assert_eq!(state.value(), &Value::from("b"));
    assert_eq!(state.path(), "$.a+Object.#keys.0");
}

#[test]
fn introspection_on_a_dead_chain_keeps_the_path() {
    let state = traverse(basic_object()).get("nothing").entries();

    assert!(state.value().is_undefined());
    assert_eq!(state.path(), "$.nothing");
}

#[test]
fn subject_loaded_from_json_text() -> Result<(), serde_json::Error> {
    let subject: Value = serde_json::from_str(r#"{"users": [{"name": "ada"}]}"#)?;
    let state = traverse(subject).get("users").get("0").get("name");

    assert_eq!(state.value(), &Value::from("ada"));
    assert_eq!(state.path(), "$.users.0.name");
    Ok(())
}

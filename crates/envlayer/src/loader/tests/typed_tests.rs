//! Tests for typed reads and fallbacks.

use std::cell::Cell;
use std::rc::Rc;

use super::memory;
use crate::cast::{CastError, Caster, TypedValue};
use crate::loader::{EnvError, Fallback, get_typed, get_typed_or};

fn caster(name: &str) -> Caster {
    name.parse().unwrap()
}

#[test]
fn test_get_typed_casts_value() {
    let store = memory(&[("PORT", "8080"), ("DEBUG", "false"), ("LEVEL", "info")]);

    assert_eq!(
        get_typed(&store, "PORT", &caster("integer!")).unwrap(),
        Some(TypedValue::Int(8080))
    );
    assert_eq!(
        get_typed(&store, "DEBUG", &caster("boolean")).unwrap(),
        Some(TypedValue::Bool(false))
    );
    assert_eq!(
        get_typed(&store, "LEVEL", &caster("atom")).unwrap(),
        Some(TypedValue::Atom("info".to_string()))
    );
}

#[test]
fn test_get_typed_unset_is_undefined() {
    let store = memory(&[]);

    let err = get_typed(&store, "MISSING", &caster("string")).unwrap_err();

    assert!(matches!(&err, EnvError::Undefined { name } if name == "MISSING"));
    assert_eq!(err.to_string(), "Environment variable MISSING is not defined");
}

#[test]
fn test_cast_failure_names_variable_not_value() {
    let store = memory(&[("PORT", "s3cr3t")]);

    let err = get_typed(&store, "PORT", &caster("integer")).unwrap_err();

    match &err {
        EnvError::Cast { name, source } => {
            assert_eq!(name, "PORT");
            assert!(matches!(source, CastError::BadCast { .. }));
        }
        other => panic!("expected cast error, got {other:?}"),
    }
    assert!(err.to_string().contains("PORT"));
    assert!(!err.to_string().contains("s3cr3t"));
}

#[test]
fn test_empty_value_follows_flavor() {
    let store = memory(&[("EMPTY", "")]);

    assert_eq!(get_typed(&store, "EMPTY", &caster("integer?")).unwrap(), None);
    assert!(matches!(
        get_typed(&store, "EMPTY", &caster("string!")),
        Err(EnvError::Cast {
            source: CastError::Empty { .. },
            ..
        })
    ));
}

#[test]
fn test_fallback_used_only_when_unset() {
    let store = memory(&[("EMPTY", "")]);

    assert_eq!(
        get_typed_or(&store, "MISSING", &caster("integer"), TypedValue::Int(5)).unwrap(),
        Some(TypedValue::Int(5))
    );
    assert_eq!(
        get_typed_or(&store, "EMPTY", &caster("integer?"), TypedValue::Int(5)).unwrap(),
        None
    );
    assert_eq!(
        get_typed_or(&store, "MISSING", &caster("integer"), None::<TypedValue>).unwrap(),
        None
    );
}

#[test]
fn test_fallback_is_not_cast() {
    let store = memory(&[]);

    let value = get_typed_or(
        &store,
        "MISSING",
        &caster("integer!"),
        TypedValue::Str("not a number".to_string()),
    )
    .unwrap();

    assert_eq!(value, Some(TypedValue::Str("not a number".to_string())));
}

#[test]
fn test_lazy_fallback_runs_only_when_unset() {
    let store = memory(&[("SET", "1")]);
    let calls = Rc::new(Cell::new(0));

    let counter = Rc::clone(&calls);
    let value = get_typed_or(
        &store,
        "SET",
        &caster("integer"),
        Fallback::lazy(move || {
            counter.set(counter.get() + 1);
            Some(TypedValue::Int(0))
        }),
    )
    .unwrap();
    assert_eq!(value, Some(TypedValue::Int(1)));
    assert_eq!(calls.get(), 0);

    let counter = Rc::clone(&calls);
    let value = get_typed_or(
        &store,
        "UNSET",
        &caster("integer"),
        Fallback::lazy(move || {
            counter.set(counter.get() + 1);
            Some(TypedValue::Int(42))
        }),
    )
    .unwrap();
    assert_eq!(value, Some(TypedValue::Int(42)));
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_custom_caster_through_get_typed() {
    let store = memory(&[("RATIO", "75%")]);
    let percent = Caster::custom(|raw| {
        raw.strip_suffix('%')
            .and_then(|n| n.parse::<f64>().ok())
            .map(|n| TypedValue::Float(n / 100.0))
            .ok_or_else(|| "must be a percentage".to_string())
    });

    assert_eq!(
        get_typed(&store, "RATIO", &percent).unwrap(),
        Some(TypedValue::Float(0.75))
    );
}

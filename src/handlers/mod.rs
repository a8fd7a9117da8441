//! HTTP handlers for heroes, powers and hero_powers.

pub mod hero;
pub mod hero_power;
pub mod power;

use crate::error::AppError;
use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde_json::Value;
use std::collections::HashMap;

/// Path ids that are not integers cannot name a row, so they are treated as missing.
fn parse_id(id_str: &str, not_found: &str) -> Result<i64, AppError> {
    id_str.parse().map_err(|_| AppError::NotFound(not_found.to_string()))
}

/// Unreadable bodies (bad JSON, wrong content type) and non-object bodies are validation failures.
fn body_to_map(body: Result<Json<Value>, JsonRejection>) -> Result<HashMap<String, Value>, AppError> {
    let Json(value) = body.map_err(|e| {
        tracing::debug!(rejection = %e.body_text(), "unreadable request body");
        AppError::validation()
    })?;
    match value {
        Value::Object(m) => Ok(m.into_iter().collect()),
        _ => Err(AppError::validation()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_integer_ids_are_not_found() {
        assert_eq!(parse_id("12", "Hero not found").unwrap(), 12);
        match parse_id("abc", "Hero not found") {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "Hero not found"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn body_must_be_an_object() {
        let ok = body_to_map(Ok(Json(serde_json::json!({"a": 1})))).unwrap();
        assert_eq!(ok.get("a"), Some(&serde_json::json!(1)));
        let not_object = body_to_map(Ok(Json(serde_json::json!([1, 2]))));
        assert!(matches!(not_object, Err(AppError::Validation(_))));
    }

    #[test]
    fn unreadable_body_is_a_validation_error() {
        let rejection = JsonRejection::from(axum::extract::rejection::MissingJsonContentType::default());
        match body_to_map(Err(rejection)) {
            Err(AppError::Validation(errors)) => assert_eq!(errors, vec!["validation errors".to_string()]),
            other => panic!("unexpected: {other:?}"),
        }
    }
}

//! Field validation, run before any write is attempted.

use crate::error::AppError;
use crate::model::{NewHero, NewHeroPower, NewPower, Strength};
use serde_json::Value;
use std::collections::HashMap;

/// Minimum length of a power description, in characters.
pub const MIN_DESCRIPTION_CHARS: usize = 20;

pub struct RequestValidator;

impl RequestValidator {
    /// Extract and validate `description` from a PATCH body.
    pub fn description(body: &HashMap<String, Value>) -> Result<String, AppError> {
        let description = match body.get("description") {
            Some(Value::String(s)) => s,
            Some(Value::Null) | None => return Err(reject("description", "missing")),
            Some(_) => return Err(reject("description", "not a string")),
        };
        validate_description(description)?;
        Ok(description.clone())
    }

    /// Validate a POST /hero_powers body. Strength is checked first, then the two ids.
    /// Whether the ids resolve is decided later, inside the write transaction.
    pub fn hero_power(body: &HashMap<String, Value>) -> Result<NewHeroPower, AppError> {
        let strength = validate_strength(body.get("strength"))?;
        let hero_id = required_id(body, "hero_id")?;
        let power_id = required_id(body, "power_id")?;
        Ok(NewHeroPower {
            strength,
            hero_id,
            power_id,
        })
    }

    pub fn new_hero(hero: &NewHero) -> Result<(), AppError> {
        if hero.name.trim().is_empty() {
            return Err(reject("name", "empty"));
        }
        if hero.super_name.trim().is_empty() {
            return Err(reject("super_name", "empty"));
        }
        Ok(())
    }

    pub fn new_power(power: &NewPower) -> Result<(), AppError> {
        if power.name.trim().is_empty() {
            return Err(reject("name", "empty"));
        }
        validate_description(&power.description)
    }
}

pub fn validate_description(description: &str) -> Result<(), AppError> {
    let len = description.chars().count();
    if len < MIN_DESCRIPTION_CHARS {
        tracing::debug!(len, min = MIN_DESCRIPTION_CHARS, "description too short");
        return Err(AppError::validation());
    }
    Ok(())
}

pub fn validate_strength(value: Option<&Value>) -> Result<Strength, AppError> {
    let raw = value
        .and_then(Value::as_str)
        .ok_or_else(|| reject("strength", "missing or not a string"))?;
    raw.parse::<Strength>()
        .map_err(|_| reject("strength", "not one of Strong, Weak, Average"))
}

fn required_id(body: &HashMap<String, Value>, key: &'static str) -> Result<i64, AppError> {
    body.get(key)
        .and_then(Value::as_i64)
        .ok_or_else(|| reject(key, "missing or not an integer"))
}

fn reject(field: &'static str, reason: &'static str) -> AppError {
    tracing::debug!(field, reason, "validation failed");
    AppError::validation()
}

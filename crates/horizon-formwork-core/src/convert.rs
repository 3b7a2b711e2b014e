//! Typed coercion and bounds-checking over parameter values.
//!
//! These helpers turn a loosely-typed [`ParamValue`] into a typed value or a
//! [`ValueError`] describing the offending value and the violated constraint.
//! They carry no megawidget context; the specifier and megawidget layers fold
//! each [`ValueError`] into their own error types together with the owning
//! identifier, type tag, and parameter name.
//!
//! Two families are provided:
//!
//! - `to_*` — the value must be present and of the right shape.
//! - `optional_*` — a missing or null value yields the supplied default; a
//!   present value of the wrong shape is still an error.

use crate::value::{ParamValue, ParameterMap};

/// A failed conversion: the offending value and a human-readable constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueError {
    /// The value that failed the conversion.
    pub value: ParamValue,
    /// What the value was required to be.
    pub constraint: String,
}

impl ValueError {
    /// Create a new conversion error.
    pub fn new(value: impl Into<ParamValue>, constraint: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            constraint: constraint.into(),
        }
    }
}

/// Result type alias for conversions.
pub type ConvertResult<T> = Result<T, ValueError>;

/// Coerce a value to a boolean.
pub fn to_bool(value: &ParamValue) -> ConvertResult<bool> {
    value
        .as_bool()
        .ok_or_else(|| ValueError::new(value.clone(), "must be a boolean"))
}

/// Coerce a value to an integer.
pub fn to_i64(value: &ParamValue) -> ConvertResult<i64> {
    value
        .as_i64()
        .ok_or_else(|| ValueError::new(value.clone(), "must be an integer"))
}

/// Coerce a value to an integer within `[minimum, maximum]`.
pub fn to_i64_in(value: &ParamValue, minimum: i64, maximum: i64) -> ConvertResult<i64> {
    let n = to_i64(value)?;
    if n < minimum || n > maximum {
        return Err(ValueError::new(
            value.clone(),
            format!("must be an integer between {minimum} and {maximum}"),
        ));
    }
    Ok(n)
}

/// Coerce a value to an integer no smaller than `minimum`.
pub fn to_i64_at_least(value: &ParamValue, minimum: i64) -> ConvertResult<i64> {
    let n = to_i64(value)?;
    if n < minimum {
        return Err(ValueError::new(
            value.clone(),
            format!("must be an integer of at least {minimum}"),
        ));
    }
    Ok(n)
}

/// Coerce a value to a floating-point number (integers widen).
pub fn to_f64(value: &ParamValue) -> ConvertResult<f64> {
    value
        .as_f64()
        .ok_or_else(|| ValueError::new(value.clone(), "must be a number"))
}

/// Coerce a value to an owned string.
pub fn to_string(value: &ParamValue) -> ConvertResult<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ValueError::new(value.clone(), "must be a string"))
}

/// Coerce a value to a non-empty string.
pub fn to_nonempty_string(value: &ParamValue) -> ConvertResult<String> {
    let s = to_string(value)?;
    if s.is_empty() {
        return Err(ValueError::new(value.clone(), "must be a non-empty string"));
    }
    Ok(s)
}

/// Coerce a value to a list of values.
pub fn to_list(value: &ParamValue) -> ConvertResult<&[ParamValue]> {
    value
        .as_list()
        .ok_or_else(|| ValueError::new(value.clone(), "must be a list"))
}

/// Coerce a value to a nested map.
pub fn to_map(value: &ParamValue) -> ConvertResult<&ParameterMap> {
    value
        .as_map()
        .ok_or_else(|| ValueError::new(value.clone(), "must be a map"))
}

/// Coerce a value to one of an enumerated set of string constants.
pub fn to_one_of(value: &ParamValue, allowed: &[&str]) -> ConvertResult<String> {
    let s = to_string(value)?;
    if allowed.contains(&s.as_str()) {
        Ok(s)
    } else {
        Err(ValueError::new(
            value.clone(),
            format!("must be one of [{}]", allowed.join(", ")),
        ))
    }
}

/// An optional boolean: missing or null yields the default.
pub fn optional_bool(value: Option<&ParamValue>, default: bool) -> ConvertResult<bool> {
    match value {
        None | Some(ParamValue::Null) => Ok(default),
        Some(v) => to_bool(v),
    }
}

/// An optional integer: missing or null yields the default.
pub fn optional_i64(value: Option<&ParamValue>, default: i64) -> ConvertResult<i64> {
    match value {
        None | Some(ParamValue::Null) => Ok(default),
        Some(v) => to_i64(v),
    }
}

/// An optional bounded integer: missing or null yields the default.
pub fn optional_i64_in(
    value: Option<&ParamValue>,
    default: i64,
    minimum: i64,
    maximum: i64,
) -> ConvertResult<i64> {
    match value {
        None | Some(ParamValue::Null) => Ok(default),
        Some(v) => to_i64_in(v, minimum, maximum),
    }
}

/// An optional lower-bounded integer: missing or null yields the default.
pub fn optional_i64_at_least(
    value: Option<&ParamValue>,
    default: i64,
    minimum: i64,
) -> ConvertResult<i64> {
    match value {
        None | Some(ParamValue::Null) => Ok(default),
        Some(v) => to_i64_at_least(v, minimum),
    }
}

/// An optional string: missing or null yields the default.
pub fn optional_string(value: Option<&ParamValue>, default: &str) -> ConvertResult<String> {
    match value {
        None | Some(ParamValue::Null) => Ok(default.to_string()),
        Some(v) => to_string(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_bool() {
        assert_eq!(to_bool(&ParamValue::Bool(true)), Ok(true));
        let err = to_bool(&ParamValue::Int(1)).unwrap_err();
        assert_eq!(err.constraint, "must be a boolean");
        assert_eq!(err.value, ParamValue::Int(1));
    }

    #[test]
    fn test_to_i64_in() {
        assert_eq!(to_i64_in(&ParamValue::Int(5), 1, 10), Ok(5));
        assert!(to_i64_in(&ParamValue::Int(0), 1, 10).is_err());
        assert!(to_i64_in(&ParamValue::Int(11), 1, 10).is_err());
        let err = to_i64_in(&ParamValue::from("five"), 1, 10).unwrap_err();
        assert_eq!(err.constraint, "must be an integer");
    }

    #[test]
    fn test_to_f64_widens_integers() {
        assert_eq!(to_f64(&ParamValue::Int(2)), Ok(2.0));
        assert_eq!(to_f64(&ParamValue::Float(2.5)), Ok(2.5));
        assert!(to_f64(&ParamValue::from("2.5")).is_err());
    }

    #[test]
    fn test_to_nonempty_string() {
        assert_eq!(to_nonempty_string(&ParamValue::from("x")), Ok("x".to_string()));
        assert!(to_nonempty_string(&ParamValue::from("")).is_err());
        assert!(to_nonempty_string(&ParamValue::Int(1)).is_err());
    }

    #[test]
    fn test_to_one_of() {
        let allowed = ["left", "right"];
        assert_eq!(
            to_one_of(&ParamValue::from("left"), &allowed),
            Ok("left".to_string())
        );
        let err = to_one_of(&ParamValue::from("up"), &allowed).unwrap_err();
        assert_eq!(err.constraint, "must be one of [left, right]");
    }

    #[test]
    fn test_optional_defaults() {
        assert_eq!(optional_bool(None, true), Ok(true));
        assert_eq!(optional_bool(Some(&ParamValue::Null), false), Ok(false));
        assert_eq!(optional_i64_in(None, 1, 1, 100), Ok(1));
        assert_eq!(optional_string(None, "fallback"), Ok("fallback".to_string()));
    }

    #[test]
    fn test_optional_present_wrong_type_still_fails() {
        assert!(optional_bool(Some(&ParamValue::Int(1)), true).is_err());
        assert!(optional_i64(Some(&ParamValue::from("3")), 0).is_err());
    }
}

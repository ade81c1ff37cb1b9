//! Request payload → model input row.
//!
//! Mirrors the loose coercion rules clients already depend on: numeric
//! fields accept numbers, numeric strings and booleans; categorical fields
//! only fail when they hold a container.

use axum::http::{header::CONTENT_TYPE, HeaderMap};
use serde_json::{Map, Value};
use tracing::debug;

use crate::models::errors::{AppError, AppResult};
use crate::models::types::{airport_code, risk_code, FeatureVector};
use crate::utils::constants::{FIELD_AIRPORT, FIELD_COMMUTE, FIELD_POPULATION, FIELD_RISK, FIELD_TRIP};

/// Accept `application/json` and `application/*+json`, parameters ignored.
pub fn ensure_json_content_type(headers: &HeaderMap) -> AppResult<()> {
    let raw = headers
        .get(CONTENT_TYPE)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());
    let essence = raw
        .as_deref()
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase());

    match essence.as_deref() {
        Some("application/json") => Ok(()),
        Some(mime) if mime.starts_with("application/") && mime.ends_with("+json") => Ok(()),
        _ => Err(AppError::not_json(raw.as_deref())),
    }
}

/// Decode a raw request body and extract its features.
pub fn parse_payload(body: &[u8]) -> AppResult<FeatureVector> {
    let value: Value = serde_json::from_slice(body)?;
    extract_features(&value)
}

/// Build the feature row from a decoded JSON payload.
pub fn extract_features(payload: &Value) -> AppResult<FeatureVector> {
    let object = payload.as_object().ok_or_else(AppError::not_object)?;

    let risk = risk_code(required(object, FIELD_RISK)?)?;
    let population = numeric_field(object, FIELD_POPULATION)?;
    let commute = numeric_field(object, FIELD_COMMUTE)?;
    let airport = airport_code(required(object, FIELD_AIRPORT)?);
    let trip = numeric_field(object, FIELD_TRIP)?;

    let features = FeatureVector::new(risk, population, commute, airport, trip);
    debug!(?features, "Extracted features");
    Ok(features)
}

fn required<'a>(object: &'a Map<String, Value>, field: &str) -> AppResult<&'a Value> {
    object.get(field).ok_or_else(|| AppError::missing_field(field))
}

fn numeric_field(object: &Map<String, Value>, field: &str) -> AppResult<f64> {
    coerce_f64(field, required(object, field)?)
}

/// Number coercion: numbers as-is, trimmed numeric strings, booleans as 1/0.
pub fn coerce_f64(field: &str, value: &Value) -> AppResult<f64> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| AppError::invalid_field(field, format!("{} is out of range", n))),
        Value::String(s) => strip_digit_separators(s.trim())
            .and_then(|digits| digits.parse::<f64>().ok())
            .ok_or_else(|| AppError::invalid_field(field, format!("could not convert string '{}'", s))),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::Null => Err(AppError::invalid_field(field, "got null")),
        Value::Array(_) => Err(AppError::invalid_field(field, "got an array")),
        Value::Object(_) => Err(AppError::invalid_field(field, "got an object")),
    }
}

/// Drop single underscores that sit between two digits ("1_000").
/// Any other underscore makes the literal invalid.
fn strip_digit_separators(literal: &str) -> Option<String> {
    if !literal.contains('_') {
        return Some(literal.to_string());
    }
    let chars: Vec<char> = literal.chars().collect();
    let mut out = String::with_capacity(literal.len());
    for (i, &c) in chars.iter().enumerate() {
        if c != '_' {
            out.push(c);
            continue;
        }
        let before = i.checked_sub(1).and_then(|j| chars.get(j));
        let after = chars.get(i + 1);
        match (before, after) {
            (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit() => {}
            _ => return None,
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::errors::ErrorCode;
    use axum::http::HeaderValue;
    use serde_json::json;

    fn headers_with(content_type: Option<&'static str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(ct) = content_type {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(ct));
        }
        headers
    }

    fn valid() -> Value {
        json!({
            "risk": "Medium",
            "population": 250000,
            "commute": 32.5,
            "airport": "Yes",
            "trip": 14
        })
    }

    #[test]
    fn test_extract_valid_payload() {
        let features = extract_features(&valid()).unwrap();
        assert_eq!(features.as_slice(), &[2.0, 250000.0, 32.5, 1.0, 14.0]);
    }

    #[test]
    fn test_unknown_risk_encodes_zero() {
        let mut payload = valid();
        payload["risk"] = json!("Severe");
        let features = extract_features(&payload).unwrap();
        assert_eq!(features.risk(), 0.0);
    }

    #[test]
    fn test_airport_other_than_yes() {
        let mut payload = valid();
        payload["airport"] = json!("Maybe");
        assert_eq!(extract_features(&payload).unwrap().airport(), 0.0);
    }

    #[test]
    fn test_missing_each_field() {
        for field in ["risk", "population", "commute", "airport", "trip"] {
            let mut payload = valid();
            payload.as_object_mut().unwrap().remove(field);
            let err = extract_features(&payload).unwrap_err();
            assert_eq!(err.code, ErrorCode::RequestMissingField, "field {}", field);
            assert!(err.message.contains(field));
        }
    }

    #[test]
    fn test_numeric_strings_and_bools_coerce() {
        let mut payload = valid();
        payload["population"] = json!(" 1200.5 ");
        payload["commute"] = json!(true);
        payload["trip"] = json!("7");
        let features = extract_features(&payload).unwrap();
        assert_eq!(features.as_slice(), &[2.0, 1200.5, 1.0, 1.0, 7.0]);
    }

    #[test]
    fn test_digit_separators() {
        assert_eq!(coerce_f64("trip", &json!("1_000")).unwrap(), 1000.0);
        assert_eq!(coerce_f64("trip", &json!("1_000.2_5")).unwrap(), 1000.25);
        for bad in ["1__0", "_1", "1_", "1_.5", "_"] {
            let err = coerce_f64("trip", &json!(bad)).unwrap_err();
            assert_eq!(err.code, ErrorCode::RequestInvalidField, "{}", bad);
        }
    }

    #[test]
    fn test_container_risk_fails() {
        let mut payload = valid();
        payload["risk"] = json!(["Low"]);
        let err = extract_features(&payload).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequestInvalidField);
        assert!(err.message.contains("risk"));
    }

    #[test]
    fn test_json_content_types_accepted() {
        for ct in [
            "application/json",
            "application/json; charset=utf-8",
            "Application/JSON",
            "application/vnd.api+json",
        ] {
            assert!(ensure_json_content_type(&headers_with(Some(ct))).is_ok(), "{}", ct);
        }
    }

    #[test]
    fn test_other_content_types_rejected() {
        for ct in [None, Some("text/plain"), Some("application/x-www-form-urlencoded"), Some("text/json")] {
            let err = ensure_json_content_type(&headers_with(ct)).unwrap_err();
            assert_eq!(err.code, ErrorCode::RequestNotJson);
        }
    }

    #[test]
    fn test_non_numeric_values_fail() {
        for bad in [json!("lots"), json!(null), json!([1]), json!({"v": 1})] {
            let mut payload = valid();
            payload["trip"] = bad;
            let err = extract_features(&payload).unwrap_err();
            assert_eq!(err.code, ErrorCode::RequestInvalidField);
        }
    }

    #[test]
    fn test_extra_fields_ignored() {
        let mut payload = valid();
        payload["driver"] = json!("ignored");
        assert!(extract_features(&payload).is_ok());
    }

    #[test]
    fn test_parse_payload_errors() {
        assert_eq!(
            parse_payload(b"not json").unwrap_err().code,
            ErrorCode::RequestMalformedJson
        );
        assert_eq!(
            parse_payload(b"[1, 2, 3]").unwrap_err().code,
            ErrorCode::RequestNotObject
        );
        assert_eq!(
            parse_payload(b"").unwrap_err().code,
            ErrorCode::RequestMalformedJson
        );
    }
}

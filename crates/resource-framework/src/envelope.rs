//! # Response Envelopes
//!
//! The dashboard API is not consistent about response shapes. Most endpoints answer
//! `{ "success": true, "data": ..., "message": ..., "count": ... }`, some use a
//! resource-named key instead of `data`, and some return the bare array or object.
//!
//! [`decode`] accepts all of these and returns a tagged [`Payload`]: either the typed
//! data or the raw body it could not interpret. Callers must handle both arms; nothing
//! here silently substitutes a default. `{ "success": false }` is a domain rejection and
//! comes back as [`ApiError::Rejected`].

use crate::error::ApiError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Successfully decoded data plus the envelope's metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply<D> {
    pub data: D,
    pub message: Option<String>,
    pub count: Option<u64>,
}

/// Outcome of decoding a response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload<D> {
    Data(Reply<D>),
    Malformed(Value),
}

/// Decodes `body` into `D`, looking under `data`, then `key` (if given), then at the
/// body itself.
pub fn decode<D: DeserializeOwned>(body: Value, key: Option<&str>) -> Result<Payload<D>, ApiError> {
    reject_failure(&body)?;

    let Value::Object(map) = &body else {
        return Ok(match serde_json::from_value::<D>(body.clone()) {
            Ok(data) => Payload::Data(Reply {
                data,
                message: None,
                count: None,
            }),
            Err(_) => Payload::Malformed(body),
        });
    };

    let message = message_of(&body);
    let count = map.get("count").and_then(Value::as_u64);
    let inner = map
        .get("data")
        .or_else(|| key.and_then(|key| map.get(key)))
        .cloned();

    let candidate = match inner {
        Some(inner) => inner,
        // An envelope that carries no payload at all.
        None if map.contains_key("success") => return Ok(Payload::Malformed(body)),
        None => body.clone(),
    };

    Ok(match serde_json::from_value::<D>(candidate) {
        Ok(data) => Payload::Data(Reply {
            data,
            message,
            count,
        }),
        Err(_) => Payload::Malformed(body),
    })
}

/// Decodes a response that carries no data (delete, bulk actions) and returns its message.
pub fn decode_ack(body: &Value) -> Result<Option<String>, ApiError> {
    reject_failure(body)?;
    Ok(message_of(body))
}

/// The envelope's `message`, if any.
pub fn message_of(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string)
}

/// Top-level keys of an object body, for logging unexpected shapes.
pub fn shape_of(body: &Value) -> String {
    match body {
        Value::Object(map) => format!("object{:?}", map.keys().collect::<Vec<_>>()),
        Value::Array(items) => format!("array[{}]", items.len()),
        Value::Null => "null".to_string(),
        Value::Bool(_) => "bool".to_string(),
        Value::Number(_) => "number".to_string(),
        Value::String(_) => "string".to_string(),
    }
}

fn reject_failure(body: &Value) -> Result<(), ApiError> {
    if body.get("success").and_then(Value::as_bool) == Some(false) {
        return Err(ApiError::Rejected { body: body.clone() });
    }
    Ok(())
}

//! Top-level JSON:API documents.

use serde_json::Value;

use super::Record;
use crate::error::MbtaError;

/// Take the `data` member out of a document.
fn take_data<R: Record>(document: Value) -> Result<Value, MbtaError> {
    match document {
        Value::Object(mut map) => map.remove("data").ok_or_else(|| MbtaError::Malformed {
            kind: R::KIND,
            message: "document has no data member".to_string(),
        }),
        other => Err(MbtaError::Malformed {
            kind: R::KIND,
            message: format!("expected a document object, got {other}"),
        }),
    }
}

/// Map every element of a collection document's `data` array, in order.
///
/// One malformed element fails the whole document.
pub fn records_from_document<R: Record>(document: Value) -> Result<Vec<R>, MbtaError> {
    match take_data::<R>(document)? {
        Value::Array(items) => items.into_iter().map(R::from_json).collect(),
        _ => Err(MbtaError::Malformed {
            kind: R::KIND,
            message: "expected data to be an array".to_string(),
        }),
    }
}

/// Map a single-resource document's `data` object.
pub fn record_from_document<R: Record>(document: Value) -> Result<R, MbtaError> {
    match take_data::<R>(document)? {
        data @ Value::Object(_) => R::from_json(data),
        _ => Err(MbtaError::Malformed {
            kind: R::KIND,
            message: "expected data to be an object".to_string(),
        }),
    }
}

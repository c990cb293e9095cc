//! Failure body interpretation.
//!
//! The backend reports errors as `{"detail": "..."}`. Request validation
//! failures use `{"detail": [{"loc": [...], "msg": "..."}, ...]}` instead.

use serde_json::Value;

use super::error::FALLBACK_MESSAGE;

/// Extract the user-facing message from an error body.
pub fn detail_message(body: Option<&Value>) -> String {
    match body.and_then(|b| b.get("detail")) {
        Some(Value::String(detail)) if !detail.trim().is_empty() => detail.clone(),
        Some(Value::Array(items)) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() { FALLBACK_MESSAGE.to_string() } else { messages.join("; ") }
        }
        _ => FALLBACK_MESSAGE.to_string(),
    }
}

//! Raw text to JSON value.

use serde_json::Value;
use thiserror::Error;

/// Document that could not be turned into a JSON value.
#[derive(Debug, Error)]
pub enum DocumentError {
	/// The text is not valid JSON.
	#[error("Invalid JSON: {0}")]
	Invalid(#[from] serde_json::Error),
}

/// Parses user-supplied text, keeping object keys in the order written.
pub fn parse_document(raw: &str) -> Result<Value, DocumentError> {
	Ok(serde_json::from_str(raw)?)
}

/// Document loaded on first visit and by the "Sample JSON" button.
pub const SAMPLE_DOCUMENT: &str = r#"{
  "user": { "id": 1, "name": "Rohan", "address": { "city": "Pune", "zip": 411001 }, "phones": ["9999999999", "8888888888"] },
  "items": [{ "name": "pen", "price": 10 }, { "name": "book", "price": 200 }],
  "active": true
}"#;

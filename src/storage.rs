//! Browser local storage, JSON-encoded.

use leptos::prelude::*;
use log::warn;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use wasm_bindgen::JsValue;
use web_sys::Storage;

/// Key holding the raw text of the JSON input panel.
pub const JSON_INPUT_KEY: &str = "jsonInput";
/// Key holding the selected theme.
pub const THEME_KEY: &str = "theme";

/// Local storage failure. Never fatal: callers log it and carry on in memory.
#[derive(Debug, Error)]
pub enum StorageError {
	/// No window, or storage disabled by the browser.
	#[error("local storage is not available")]
	Unavailable,
	/// The browser rejected the read or write (quota, privacy mode).
	#[error("local storage access failed: {0}")]
	Access(String),
	/// The stored value could not be encoded or decoded.
	#[error("stored value is not valid JSON: {0}")]
	Encode(#[from] serde_json::Error),
}

fn access(err: JsValue) -> StorageError {
	StorageError::Access(format!("{err:?}"))
}

fn local_storage() -> Result<Storage, StorageError> {
	web_sys::window()
		.ok_or(StorageError::Unavailable)?
		.local_storage()
		.map_err(access)?
		.ok_or(StorageError::Unavailable)
}

/// Reads and decodes `key`, `Ok(None)` when it was never written.
pub fn load<T: DeserializeOwned>(key: &str) -> Result<Option<T>, StorageError> {
	match local_storage()?.get_item(key).map_err(access)? {
		Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
		None => Ok(None),
	}
}

/// Encodes and writes `value` under `key`.
pub fn store<T: Serialize>(key: &str, value: &T) -> Result<(), StorageError> {
	let raw = serde_json::to_string(value)?;
	local_storage()?.set_item(key, &raw).map_err(access)
}

/// A signal seeded from local storage that writes every change back.
pub fn use_local_storage<T>(key: &'static str, initial: T) -> RwSignal<T>
where
	T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
	let value = match load(key) {
		Ok(Some(stored)) => stored,
		Ok(None) => initial,
		Err(err) => {
			warn!("ignoring stored {key}: {err}");
			initial
		}
	};
	let signal = RwSignal::new(value);
	Effect::new(move |_| {
		signal.with(|value| {
			if let Err(err) = store(key, value) {
				warn!("could not persist {key}: {err}");
			}
		});
	});
	signal
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::theme::Theme;

	#[test]
	fn undecodable_value_is_an_encode_error() {
		let err: StorageError = serde_json::from_str::<Theme>("\"sepia\"").unwrap_err().into();
		assert!(matches!(err, StorageError::Encode(_)));
		assert!(err.to_string().starts_with("stored value is not valid JSON: "));
	}
}

//! Colour scheme selection.

use serde::{Deserialize, Serialize};

/// Light or dark colour scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
	/// Light background, the default.
	#[default]
	Light,
	/// Dark background.
	Dark,
}

impl Theme {
	/// The other theme.
	pub fn toggled(self) -> Self {
		match self {
			Self::Light => Self::Dark,
			Self::Dark => Self::Light,
		}
	}

	/// Value for the `data-theme` attribute.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Light => "light",
			Self::Dark => "dark",
		}
	}

	/// Text of the button that switches away from this theme.
	pub fn toggle_label(self) -> &'static str {
		match self {
			Self::Light => "🌙 Dark Mode",
			Self::Dark => "☀️ Light Mode",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn toggles_back_and_forth() {
		assert_eq!(Theme::Light.toggled(), Theme::Dark);
		assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
	}

	#[test]
	fn stored_as_lowercase_name() {
		assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
		let theme: Theme = serde_json::from_str("\"light\"").unwrap();
		assert_eq!(theme, Theme::Light);
		assert_eq!(Theme::Dark.as_str(), "dark");
	}
}

//! Path query normalization.
//!
//! Accepts loose dot/bracket paths such as `$.user.address.city` or
//! `items[0].name`. This is not JSONPath: anything it can't make sense of is
//! dropped rather than rejected.

use std::sync::LazyLock;

use regex::Regex;

static INDEX_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\[([0-9]+)\]").expect("index pattern is valid"));

/// Splits a path query into its key/index segments.
pub fn parse_path(query: &str) -> Vec<String> {
	let query = query.trim();
	if query.is_empty() {
		return Vec::new();
	}
	let query = query
		.strip_prefix("$.")
		.or_else(|| query.strip_prefix('$'))
		.unwrap_or(query);
	INDEX_RE
		.replace_all(query, ".$1")
		.split('.')
		.filter(|segment| !segment.is_empty())
		.map(str::to_owned)
		.collect()
}

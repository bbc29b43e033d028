use log::debug;

use super::path::parse_path;
use super::types::GraphNode;

/// Outcome of a path search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Resolution<'a> {
	/// First node, in pre-order, whose path matches the query.
	Found(&'a GraphNode),
	/// The query was blank.
	EmptyQuery,
	/// No node path matches the query.
	NoMatch,
}

impl<'a> Resolution<'a> {
	/// The matched node, if any.
	pub fn node(self) -> Option<&'a GraphNode> {
		match self {
			Self::Found(node) => Some(node),
			Self::EmptyQuery | Self::NoMatch => None,
		}
	}
}

/// Every node matching `query`, in node-list order.
///
/// A node matches when its path equals the normalized query or ends with it
/// after a `.`, so `city` finds `user.address.city`.
pub fn candidates<'a>(nodes: &'a [GraphNode], query: &str) -> Vec<&'a GraphNode> {
	let target = parse_path(query).join(".");
	let suffix = format!(".{target}");
	nodes
		.iter()
		.filter(|node| node.path == target || node.path.ends_with(&suffix))
		.collect()
}

/// Finds the node a path query refers to. Ties go to the earliest node.
pub fn resolve<'a>(nodes: &'a [GraphNode], query: &str) -> Resolution<'a> {
	if query.trim().is_empty() {
		return Resolution::EmptyQuery;
	}
	match candidates(nodes, query).first() {
		Some(&node) => {
			debug!("path {query:?} resolved to node {} ({})", node.id, node.path);
			Resolution::Found(node)
		}
		None => {
			debug!("path {query:?} matched nothing");
			Resolution::NoMatch
		}
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::tree::build;

	#[test]
	fn finds_by_full_path() {
		let graph = build(&json!({"user": {"address": {"city": "Pune"}}}));
		let node = resolve(&graph.nodes, "$.user.address.city").node().unwrap();
		assert_eq!(node.path, "user.address.city");
		assert_eq!(node.label, "city: \"Pune\"");
	}

	#[test]
	fn finds_bracket_index() {
		let graph = build(&json!({"items": [{"name": "pen"}]}));
		let node = resolve(&graph.nodes, "items[0].name").node().unwrap();
		assert_eq!(node.path, "items.0.name");
	}

	#[test]
	fn suffix_matches_pick_first_in_traversal_order() {
		let graph = build(&json!({
			"items": [{"name": "pen"}, {"name": "book"}],
			"owner": {"name": "Rohan"}
		}));
		let found = candidates(&graph.nodes, "name");
		let paths: Vec<_> = found.iter().map(|n| n.path.as_str()).collect();
		assert_eq!(paths, ["items.0.name", "items.1.name", "owner.name"]);
		assert_eq!(resolve(&graph.nodes, "name").node().unwrap().path, "items.0.name");
		assert_eq!(resolve(&graph.nodes, "1.name").node().unwrap().label, "name: \"book\"");
	}

	#[test]
	fn suffix_needs_a_separator() {
		let graph = build(&json!({"username": 1}));
		assert_eq!(resolve(&graph.nodes, "name"), Resolution::NoMatch);
	}

	#[test]
	fn missing_path() {
		let graph = build(&json!({"a": {"b": 1}}));
		assert_eq!(resolve(&graph.nodes, "nonexistent.path"), Resolution::NoMatch);
		assert_eq!(resolve(&[], "a"), Resolution::NoMatch);
	}

	#[test]
	fn blank_query() {
		let graph = build(&json!({"a": 1}));
		assert_eq!(resolve(&graph.nodes, ""), Resolution::EmptyQuery);
		assert_eq!(resolve(&graph.nodes, " \t"), Resolution::EmptyQuery);
		assert_eq!(resolve(&graph.nodes, "").node(), None);
	}

	#[test]
	fn bare_dollar_finds_root() {
		let graph = build(&json!({"a": 1}));
		assert_eq!(resolve(&graph.nodes, "$").node().unwrap().id, "1");
	}
}

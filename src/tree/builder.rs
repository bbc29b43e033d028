//! JSON value to positioned tree graph.

use log::debug;
use serde_json::Value;

use super::types::{GraphEdge, GraphNode, LayoutConfig, NodeKind, Position, TreeGraph};

/// Builds the graph for `value` with the default layout.
pub fn build(value: &Value) -> TreeGraph {
	build_with_layout(value, LayoutConfig::default())
}

/// Builds the graph for `value`, placing nodes on a grid with the given spacing.
///
/// Nodes are emitted in pre-order. A node's `y` is its depth times the row
/// spacing, its `x` the number of nodes already placed on that depth times
/// the column spacing.
pub fn build_with_layout(value: &Value, layout: LayoutConfig) -> TreeGraph {
	let mut builder = Builder::new(layout);
	builder.walk(value);
	debug!(
		"built tree graph: {} nodes, {} edges",
		builder.graph.nodes.len(),
		builder.graph.edges.len()
	);
	builder.graph
}

struct Frame<'a> {
	value: &'a Value,
	key: Option<String>,
	parent: Option<String>,
	depth: usize,
	path: String,
}

/// Per-build counters and output.
struct Builder {
	layout: LayoutConfig,
	next_id: u64,
	per_depth: Vec<usize>,
	graph: TreeGraph,
}

impl Builder {
	fn new(layout: LayoutConfig) -> Self {
		Self {
			layout,
			next_id: 1,
			per_depth: Vec::new(),
			graph: TreeGraph::default(),
		}
	}

	fn walk(&mut self, root: &Value) {
		let mut stack = vec![Frame {
			value: root,
			key: None,
			parent: None,
			depth: 0,
			path: String::new(),
		}];

		while let Some(frame) = stack.pop() {
			let id = self.next_id.to_string();
			self.next_id += 1;

			let current_path = join_path(&frame.path, frame.key.as_deref());
			let kind = NodeKind::of(frame.value);
			let position = self.place(frame.depth);

			self.graph.nodes.push(GraphNode {
				id: id.clone(),
				position,
				kind,
				label: label(kind, frame.key.as_deref(), frame.value),
				path: current_path
					.strip_prefix('.')
					.unwrap_or(&current_path)
					.to_owned(),
				raw_key: frame.key,
				value: frame.value.clone(),
			});

			if let Some(parent) = frame.parent {
				self.graph.edges.push(GraphEdge {
					id: format!("e{parent}-{id}"),
					source: parent,
					target: id.clone(),
				});
			}

			// Children go on in reverse so they pop in document order.
			let depth = frame.depth + 1;
			match frame.value {
				Value::Object(map) => {
					for (key, child) in map.iter().rev() {
						stack.push(Frame {
							value: child,
							key: Some(key.clone()),
							parent: Some(id.clone()),
							depth,
							path: current_path.clone(),
						});
					}
				}
				Value::Array(items) => {
					for (index, child) in items.iter().enumerate().rev() {
						stack.push(Frame {
							value: child,
							key: Some(index.to_string()),
							parent: Some(id.clone()),
							depth,
							path: current_path.clone(),
						});
					}
				}
				_ => {}
			}
		}
	}

	fn place(&mut self, depth: usize) -> Position {
		if self.per_depth.len() <= depth {
			self.per_depth.resize(depth + 1, 0);
		}
		let ordinal = self.per_depth[depth];
		self.per_depth[depth] += 1;
		Position {
			x: ordinal as f64 * self.layout.column_spacing,
			y: depth as f64 * self.layout.row_spacing,
		}
	}
}

fn join_path(parent: &str, key: Option<&str>) -> String {
	match key {
		Some(key) if parent.is_empty() => key.to_owned(),
		Some(key) => format!("{parent}.{key}"),
		None => parent.to_owned(),
	}
}

// An empty-string key renders like the root.
fn label(kind: NodeKind, key: Option<&str>, value: &Value) -> String {
	let key = key.filter(|k| !k.is_empty());
	match (kind, key) {
		(NodeKind::Object, Some(key)) => format!("{key} {{}}"),
		(NodeKind::Object, None) => "{root}".to_owned(),
		(NodeKind::Array, Some(key)) => format!("{key} [ ]"),
		(NodeKind::Array, None) => "[root]".to_owned(),
		(NodeKind::Primitive, Some(key)) => format!("{key}: {value}"),
		(NodeKind::Primitive, None) => value.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	fn paths(graph: &TreeGraph) -> Vec<&str> {
		graph.nodes.iter().map(|n| n.path.as_str()).collect()
	}

	#[test]
	fn ids_follow_pre_order() {
		let graph = build(&json!({"a": {"b": 1}, "c": [true, null]}));
		let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["1", "2", "3", "4", "5", "6"]);
		assert_eq!(paths(&graph), ["", "a", "a.b", "c", "c.0", "c.1"]);
	}

	#[test]
	fn edges_link_parent_to_child() {
		let graph = build(&json!({"a": {"b": 1}, "c": 2}));
		let edges: Vec<_> = graph
			.edges
			.iter()
			.map(|e| (e.id.as_str(), e.source.as_str(), e.target.as_str()))
			.collect();
		assert_eq!(
			edges,
			[("e1-2", "1", "2"), ("e2-3", "2", "3"), ("e1-4", "1", "4")]
		);
	}

	#[test]
	fn labels_by_kind() {
		let graph = build(&json!({
			"user": {"name": "Rohan"},
			"phones": ["999"],
			"active": true,
			"zip": 411001,
			"nothing": null
		}));
		let labels: Vec<_> = graph.nodes.iter().map(|n| n.label.as_str()).collect();
		assert_eq!(
			labels,
			[
				"{root}",
				"user {}",
				"name: \"Rohan\"",
				"phones [ ]",
				"0: \"999\"",
				"active: true",
				"zip: 411001",
				"nothing: null",
			]
		);
	}

	#[test]
	fn keyless_roots() {
		assert_eq!(build(&json!([1])).nodes[0].label, "[root]");
		assert_eq!(build(&json!("hi")).nodes[0].label, "\"hi\"");

		let graph = build(&Value::Null);
		assert_eq!(graph.nodes.len(), 1);
		assert!(graph.edges.is_empty());
		assert_eq!(graph.nodes[0].label, "null");
		assert_eq!(graph.nodes[0].kind, NodeKind::Primitive);
		assert_eq!(graph.nodes[0].raw_key, None);
	}

	#[test]
	fn positions_use_depth_and_ordinal() {
		let graph = build(&json!({"a": {"x": 1}, "b": {"y": 2}}));
		let pos: Vec<_> = graph.nodes.iter().map(|n| (n.position.x, n.position.y)).collect();
		assert_eq!(
			pos,
			[
				(0.0, 0.0),
				(0.0, 120.0),
				(0.0, 240.0),
				(220.0, 120.0),
				(220.0, 240.0),
			]
		);
	}

	#[test]
	fn custom_layout_spacing() {
		let layout = LayoutConfig {
			column_spacing: 10.0,
			row_spacing: 5.0,
		};
		let graph = build_with_layout(&json!([1, 2]), layout);
		assert_eq!(graph.nodes[2].position, Position { x: 10.0, y: 5.0 });
	}

	#[test]
	fn empty_containers_have_no_children() {
		let graph = build(&json!({"o": {}, "a": []}));
		assert_eq!(graph.nodes.len(), 3);
		assert_eq!(graph.nodes[1].kind, NodeKind::Object);
		assert_eq!(graph.nodes[2].kind, NodeKind::Array);
	}

	#[test]
	fn empty_key_keeps_paths_consistent() {
		let graph = build(&json!({"": {"x": 1}, "a": {"": 2}}));
		assert_eq!(paths(&graph), ["", "", "x", "a", "a."]);
		assert_eq!(graph.nodes[1].label, "{root}");
		assert_eq!(graph.nodes[1].raw_key.as_deref(), Some(""));
		assert_eq!(graph.nodes[4].label, "2");
	}

	#[test]
	fn leading_separator_is_stripped_once() {
		let graph = build(&json!({".a": {"b": 1}}));
		assert_eq!(paths(&graph), ["", "a", "a.b"]);
	}

	#[test]
	fn rebuild_restarts_numbering() {
		let value = json!({"a": [1, 2]});
		assert_eq!(build(&value), build(&value));
	}

	#[test]
	fn deep_nesting_places_every_level() {
		let mut value = json!(0);
		for _ in 0..500 {
			value = json!([value]);
		}
		let graph = build(&value);
		assert_eq!(graph.nodes.len(), 501);
		assert_eq!(graph.edges.len(), 500);
		assert!(graph.nodes.iter().all(|n| n.position.x == 0.0));
		assert_eq!(graph.nodes.last().map(|n| n.position.y), Some(60_000.0));
	}
}

use serde_json::Value;

/// Structural shape of a JSON value as shown on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
	/// A JSON object (`{}`).
	Object,
	/// A JSON array (`[]`).
	Array,
	/// Any scalar: string, number, boolean or `null`.
	Primitive,
}

impl NodeKind {
	/// Classifies a value by its runtime shape.
	pub fn of(value: &Value) -> Self {
		match value {
			Value::Object(_) => Self::Object,
			Value::Array(_) => Self::Array,
			Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Self::Primitive,
		}
	}
}

/// Top-left corner of a node box in layout space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate.
	pub y: f64,
}

/// One JSON value placed on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	/// Pre-order id, `"1"` for the root. Only unique within one build.
	pub id: String,
	/// Layout position derived from depth and per-depth ordinal.
	pub position: Position,
	/// Shape of the value.
	pub kind: NodeKind,
	/// Display text drawn inside the node box.
	pub label: String,
	/// Dot-joined keys and indices from the root; empty for the root.
	pub path: String,
	/// Key or index used to reach this node from its parent.
	pub raw_key: Option<String>,
	/// The value this node was built from.
	pub value: Value,
}

/// Parent to child link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphEdge {
	/// `e<source>-<target>`.
	pub id: String,
	/// Parent node id.
	pub source: String,
	/// Child node id.
	pub target: String,
}

/// Output of one build: every node in pre-order plus the edges between them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TreeGraph {
	/// Nodes in pre-order (id order).
	pub nodes: Vec<GraphNode>,
	/// One edge per non-root node.
	pub edges: Vec<GraphEdge>,
}

impl TreeGraph {
	/// Looks up a node by id.
	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|node| node.id == id)
	}
}

/// Spacing of the per-depth grid layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
	/// Distance between neighbouring nodes on the same depth.
	pub column_spacing: f64,
	/// Distance between depths.
	pub row_spacing: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			column_spacing: 220.0,
			row_spacing: 120.0,
		}
	}
}

//! JSON to tree graph conversion and path search.

mod builder;
mod path;
mod search;
mod types;

pub use builder::{build, build_with_layout};
pub use path::parse_path;
pub use search::{Resolution, candidates, resolve};
pub use types::{GraphEdge, GraphNode, LayoutConfig, NodeKind, Position, TreeGraph};

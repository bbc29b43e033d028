use std::collections::{HashMap, HashSet};

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::types::ViewCommand;
use crate::theme::Theme;
use crate::tree::{NodeKind, TreeGraph};

pub const NODE_WIDTH: f64 = 170.0;
pub const NODE_HEIGHT: f64 = 40.0;
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;
pub const ZOOM_STEP: f64 = 1.2;
pub const FOCUS_ZOOM: f64 = 1.3;
pub const FOCUS_SECONDS: f64 = 0.4;
pub const FIT_PADDING: f64 = 0.2;
const CLICK_SLOP: f64 = 3.0;

pub fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

#[derive(Clone, Debug)]
pub struct NodeInfo {
	pub id: String,
	pub label: String,
	pub kind: NodeKind,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl ViewTransform {
	fn lerp(self, to: Self, t: f64) -> Self {
		Self {
			x: self.x + (to.x - self.x) * t,
			y: self.y + (to.y - self.y) * t,
			k: self.k + (to.k - self.k) * t,
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub moved: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

#[derive(Clone, Debug)]
struct CameraTween {
	from: ViewTransform,
	to: ViewTransform,
	elapsed: f64,
}

/// Graph-space bounding box of all node boxes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub min_x: f64,
	pub min_y: f64,
	pub max_x: f64,
	pub max_y: f64,
}

impl Bounds {
	pub fn width(&self) -> f64 {
		self.max_x - self.min_x
	}

	pub fn height(&self) -> f64 {
		self.max_y - self.min_y
	}
}

pub struct TreeCanvasState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub theme: Theme,
	pub selected: Option<DefaultNodeIdx>,
	pub width: f64,
	pub height: f64,
	pub time: f64,
	camera: Option<CameraTween>,
	index: HashMap<String, DefaultNodeIdx>,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
}

impl TreeCanvasState {
	pub fn new(data: &TreeGraph, width: f64, height: f64) -> Self {
		let mut state = Self {
			graph: empty_graph(),
			transform: ViewTransform {
				x: 0.0,
				y: 0.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			theme: Theme::default(),
			selected: None,
			width,
			height,
			time: 0.0,
			camera: None,
			index: HashMap::new(),
			edges: Vec::new(),
		};
		state.load(data);
		state
	}

	/// Replaces the scene with a freshly built tree and fits it into view.
	pub fn load(&mut self, data: &TreeGraph) {
		let mut graph = empty_graph();
		let mut index = HashMap::new();
		let mut edges = Vec::new();

		// Layout positions are final, so every node is pinned.
		for node in &data.nodes {
			let idx = graph.add_node(NodeData {
				x: node.position.x as f32,
				y: node.position.y as f32,
				mass: 10.0,
				is_anchor: true,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone(),
					kind: node.kind,
				},
			});
			index.insert(node.id.clone(), idx);
		}

		for edge in &data.edges {
			if let (Some(&src), Some(&tgt)) = (index.get(&edge.source), index.get(&edge.target)) {
				graph.add_edge(src, tgt, EdgeData::default());
				edges.push((src, tgt));
			}
		}

		self.graph = graph;
		self.index = index;
		self.edges = edges;
		self.drag = DragState::default();
		self.pan = PanState::default();
		self.hover = HoverState::default();
		self.selected = None;
		self.camera = None;
		self.transform = self.fit_transform();
	}

	pub fn node_count(&self) -> usize {
		self.index.len()
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (x, y) = (node.x() as f64, node.y() as f64);
			if gx >= x && gx <= x + NODE_WIDTH && gy >= y && gy <= y + NODE_HEIGHT {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(node.data.user_data.id.clone());
			}
		});
		found
	}

	pub fn node_position(&self, idx: DefaultNodeIdx) -> Option<(f64, f64)> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some((node.x() as f64, node.y() as f64));
			}
		});
		found
	}

	pub fn bounds(&self) -> Option<Bounds> {
		let mut bounds: Option<Bounds> = None;
		self.graph.visit_nodes(|node| {
			let (x, y) = (node.x() as f64, node.y() as f64);
			let b = bounds.get_or_insert(Bounds {
				min_x: x,
				min_y: y,
				max_x: x + NODE_WIDTH,
				max_y: y + NODE_HEIGHT,
			});
			b.min_x = b.min_x.min(x);
			b.min_y = b.min_y.min(y);
			b.max_x = b.max_x.max(x + NODE_WIDTH);
			b.max_y = b.max_y.max(y + NODE_HEIGHT);
		});
		bounds
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Keep the old highlight around so it can fade out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for &(src, tgt) in &self.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	/// Marks the node with this id as the search hit; `None` clears it.
	pub fn select(&mut self, id: Option<&str>) {
		self.selected = id.and_then(|id| self.index.get(id).copied());
	}

	pub fn apply(&mut self, command: &ViewCommand) {
		match command {
			ViewCommand::ZoomIn => self.zoom_about(self.width / 2.0, self.height / 2.0, ZOOM_STEP),
			ViewCommand::ZoomOut => {
				self.zoom_about(self.width / 2.0, self.height / 2.0, 1.0 / ZOOM_STEP)
			}
			ViewCommand::FitView => self.animate_to(self.fit_transform()),
			ViewCommand::Focus(id) => {
				let Some(&idx) = self.index.get(id) else {
					return;
				};
				if let Some((x, y)) = self.node_position(idx) {
					let (cx, cy) = (x + NODE_WIDTH / 2.0, y + NODE_HEIGHT / 2.0);
					self.animate_to(ViewTransform {
						x: self.width / 2.0 - cx * FOCUS_ZOOM,
						y: self.height / 2.0 - cy * FOCUS_ZOOM,
						k: FOCUS_ZOOM,
					});
				}
			}
		}
	}

	/// Zooms by `factor` keeping the screen point `(sx, sy)` fixed.
	pub fn zoom_about(&mut self, sx: f64, sy: f64, factor: f64) {
		self.camera = None;
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn start_drag(&mut self, idx: DefaultNodeIdx, x: f64, y: f64) {
		self.camera = None;
		self.drag.active = true;
		self.drag.moved = false;
		self.drag.node_idx = Some(idx);
		self.drag.start_x = x;
		self.drag.start_y = y;
		if let Some((nx, ny)) = self.node_position(idx) {
			self.drag.node_start_x = nx as f32;
			self.drag.node_start_y = ny as f32;
		}
	}

	pub fn start_pan(&mut self, x: f64, y: f64) {
		self.camera = None;
		self.pan.active = true;
		self.pan.start_x = x;
		self.pan.start_y = y;
		self.pan.transform_start_x = self.transform.x;
		self.pan.transform_start_y = self.transform.y;
	}

	/// Applies pointer movement to the active drag or pan.
	pub fn pointer_moved(&mut self, x: f64, y: f64) {
		if !self.drag.active {
			let hovered = self.node_at_position(x, y);
			self.set_hover(hovered);
		}

		if self.drag.active {
			let (dx, dy) = (x - self.drag.start_x, y - self.drag.start_y);
			if dx.abs() > CLICK_SLOP || dy.abs() > CLICK_SLOP {
				self.drag.moved = true;
			}
			if let (Some(idx), true) = (self.drag.node_idx, self.drag.moved) {
				let (nx, ny) = (
					self.drag.node_start_x + (dx / self.transform.k) as f32,
					self.drag.node_start_y + (dy / self.transform.k) as f32,
				);
				self.graph.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.x = nx;
						node.data.y = ny;
					}
				});
			}
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
	}

	/// Ends any drag or pan. Returns the node that was clicked without moving.
	pub fn pointer_released(&mut self) -> Option<DefaultNodeIdx> {
		let clicked = match (self.drag.active, self.drag.moved) {
			(true, false) => self.drag.node_idx,
			_ => None,
		};
		self.drag = DragState::default();
		self.pan.active = false;
		clicked
	}

	pub fn pointer_left(&mut self) {
		self.drag = DragState::default();
		self.pan.active = false;
		self.set_hover(None);
	}

	pub fn tick(&mut self, dt: f64) {
		self.time += dt;

		if let Some(tween) = &mut self.camera {
			tween.elapsed = (tween.elapsed + dt).min(FOCUS_SECONDS);
			let t = ease_out_cubic(tween.elapsed / FOCUS_SECONDS);
			self.transform = tween.from.lerp(tween.to, t);
			if tween.elapsed >= FOCUS_SECONDS {
				self.camera = None;
			}
		}

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	fn animate_to(&mut self, to: ViewTransform) {
		self.camera = Some(CameraTween {
			from: self.transform,
			to,
			elapsed: 0.0,
		});
	}

	fn fit_transform(&self) -> ViewTransform {
		let Some(bounds) = self.bounds() else {
			return ViewTransform {
				x: self.width / 2.0,
				y: self.height / 2.0,
				k: 1.0,
			};
		};
		let k = ((self.width / bounds.width()).min(self.height / bounds.height())
			/ (1.0 + FIT_PADDING))
			.clamp(MIN_ZOOM, MAX_ZOOM);
		let (cx, cy) = (
			bounds.min_x + bounds.width() / 2.0,
			bounds.min_y + bounds.height() / 2.0,
		);
		ViewTransform {
			x: self.width / 2.0 - cx * k,
			y: self.height / 2.0 - cy * k,
			k,
		}
	}
}

fn empty_graph() -> ForceGraph<NodeInfo, ()> {
	ForceGraph::new(SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	})
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::tree::build;

	fn state() -> TreeCanvasState {
		let graph = build(&json!({"a": {"b": 1}, "c": 2}));
		TreeCanvasState::new(&graph, 800.0, 600.0)
	}

	fn settle(state: &mut TreeCanvasState) {
		for _ in 0..60 {
			state.tick(0.016);
		}
	}

	#[test]
	fn loads_every_node_at_its_layout_position() {
		let s = state();
		assert_eq!(s.node_count(), 4);
		let bounds = s.bounds().unwrap();
		assert_eq!(bounds.min_x, 0.0);
		assert_eq!(bounds.max_x, 220.0 + NODE_WIDTH);
		assert_eq!(bounds.max_y, 240.0 + NODE_HEIGHT);
	}

	#[test]
	fn fit_centers_the_tree() {
		let s = state();
		let bounds = s.bounds().unwrap();
		let (cx, cy) = (
			bounds.min_x + bounds.width() / 2.0,
			bounds.min_y + bounds.height() / 2.0,
		);
		let sx = cx * s.transform.k + s.transform.x;
		let sy = cy * s.transform.k + s.transform.y;
		assert!((sx - 400.0).abs() < 1e-6);
		assert!((sy - 300.0).abs() < 1e-6);
	}

	#[test]
	fn focus_centers_node_at_focus_zoom() {
		let mut s = state();
		s.apply(&ViewCommand::Focus("3".into()));
		settle(&mut s);
		assert!((s.transform.k - FOCUS_ZOOM).abs() < 1e-9);
		// node 3 ("a.b") sits at (0, 240)
		let (gx, gy) = s.screen_to_graph(400.0, 300.0);
		assert!((gx - NODE_WIDTH / 2.0).abs() < 1e-6);
		assert!((gy - (240.0 + NODE_HEIGHT / 2.0)).abs() < 1e-6);
	}

	#[test]
	fn focus_on_unknown_id_is_ignored() {
		let mut s = state();
		let before = s.transform;
		s.apply(&ViewCommand::Focus("99".into()));
		settle(&mut s);
		assert_eq!(s.transform, before);
	}

	#[test]
	fn zoom_is_clamped() {
		let mut s = state();
		for _ in 0..50 {
			s.apply(&ViewCommand::ZoomIn);
		}
		assert_eq!(s.transform.k, MAX_ZOOM);
		for _ in 0..100 {
			s.apply(&ViewCommand::ZoomOut);
		}
		assert_eq!(s.transform.k, MIN_ZOOM);
	}

	#[test]
	fn click_without_movement_reports_node() {
		let mut s = state();
		s.transform = ViewTransform { x: 0.0, y: 0.0, k: 1.0 };
		let idx = s.node_at_position(10.0, 10.0).unwrap();
		assert_eq!(s.node_id(idx).as_deref(), Some("1"));
		s.start_drag(idx, 10.0, 10.0);
		s.pointer_moved(11.0, 11.0);
		assert_eq!(s.pointer_released(), Some(idx));
	}

	#[test]
	fn dragging_moves_node_and_is_not_a_click() {
		let mut s = state();
		s.transform = ViewTransform { x: 0.0, y: 0.0, k: 1.0 };
		let idx = s.node_at_position(230.0, 130.0).unwrap();
		s.start_drag(idx, 230.0, 130.0);
		s.pointer_moved(280.0, 130.0);
		assert_eq!(s.pointer_released(), None);
		assert_eq!(s.node_position(idx), Some((270.0, 120.0)));
	}

	#[test]
	fn hover_collects_neighbors() {
		let mut s = state();
		s.transform = ViewTransform { x: 0.0, y: 0.0, k: 1.0 };
		s.pointer_moved(10.0, 130.0);
		let hovered = s.hover.node.unwrap();
		assert_eq!(s.node_id(hovered).as_deref(), Some("2"));
		assert_eq!(s.hover.neighbors.len(), 2);
	}

	#[test]
	fn node_ids_round_trip_through_the_scene() {
		let s = state();
		for id in ["1", "2", "3", "4"] {
			let idx = s.index[id];
			assert_eq!(s.node_id(idx).as_deref(), Some(id));
		}
	}

	#[test]
	fn select_tracks_search_hit() {
		let mut s = state();
		s.select(Some("4"));
		assert!(s.selected.is_some());
		s.select(Some("missing"));
		assert!(s.selected.is_none());
	}
}

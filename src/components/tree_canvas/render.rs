use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::{NODE_HEIGHT, NODE_WIDTH, TreeCanvasState, ease_out_cubic};
use crate::theme::Theme;
use crate::tree::NodeKind;

const CORNER_RADIUS: f64 = 8.0;
const LABEL_CHARS: usize = 22;
const MINIMAP_WIDTH: f64 = 180.0;
const MINIMAP_HEIGHT: f64 = 120.0;
const MINIMAP_MARGIN: f64 = 12.0;

struct Palette {
	background: &'static str,
	minimap: &'static str,
	viewport: &'static str,
}

fn palette(theme: Theme) -> Palette {
	match theme {
		Theme::Light => Palette {
			background: "#f8fafc",
			minimap: "rgba(226, 232, 240, 0.9)",
			viewport: "rgba(71, 85, 105, 0.8)",
		},
		Theme::Dark => Palette {
			background: "#1e293b",
			minimap: "rgba(15, 23, 42, 0.9)",
			viewport: "rgba(203, 213, 225, 0.8)",
		},
	}
}

pub fn kind_color(kind: NodeKind) -> &'static str {
	match kind {
		NodeKind::Object => "#7c3aed",
		NodeKind::Array => "#10b981",
		NodeKind::Primitive => "#f97316",
	}
}

pub fn render(state: &TreeCanvasState, ctx: &CanvasRenderingContext2d) {
	let palette = palette(state.theme);
	ctx.set_fill_style_str(palette.background);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
	if state.node_count() > 0 {
		draw_minimap(state, ctx, &palette);
	}
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

fn truncate(label: &str) -> String {
	if label.chars().count() <= LABEL_CHARS {
		return label.to_owned();
	}
	let mut short: String = label.chars().take(LABEL_CHARS - 1).collect();
	short.push('…');
	short
}

fn draw_edges(state: &TreeCanvasState, ctx: &CanvasRenderingContext2d) {
	let t = ease_out_cubic(state.hover.highlight_t);

	// Parent's right side to child's left side.
	state.graph.visit_edges(|parent, child, _| {
		let (x1, y1) = (
			parent.x() as f64 + NODE_WIDTH,
			parent.y() as f64 + NODE_HEIGHT / 2.0,
		);
		let (x2, y2) = (child.x() as f64, child.y() as f64 + NODE_HEIGHT / 2.0);
		let bend = ((x2 - x1).abs() / 2.0).max(40.0);

		let is_highlighted =
			state.is_highlighted(parent.index()) && state.is_highlighted(child.index());
		let (alpha, width) = if is_highlighted {
			(0.8 + 0.2 * t, 1.5 * (1.0 + 0.5 * t))
		} else {
			(0.8 - 0.55 * t, 1.5)
		};

		ctx.set_stroke_style_str(&format!("rgba(148, 163, 184, {})", alpha));
		ctx.set_line_width(width);
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.bezier_curve_to(x1 + bend, y1, x2 - bend, y2, x2, y2);
		ctx.stroke();
	});
}

fn draw_nodes(state: &TreeCanvasState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
	);

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		let (x, y) = (node.x() as f64, node.y() as f64);
		let info = &node.data.user_data;
		let dimmed = has_highlight && !state.is_highlighted(idx);
		let alpha = if dimmed { 1.0 - 0.6 * t } else { 1.0 };

		if state.selected == Some(idx) {
			draw_selection(state, ctx, x, y);
		}

		ctx.set_global_alpha(alpha);
		rounded_rect(ctx, x, y, NODE_WIDTH, NODE_HEIGHT, CORNER_RADIUS);
		ctx.set_fill_style_str(kind_color(info.kind));
		ctx.fill();

		ctx.set_fill_style_str("white");
		ctx.set_font("12px sans-serif");
		let _ = ctx.fill_text(&truncate(&info.label), x + 10.0, y + NODE_HEIGHT / 2.0 + 4.0);
		ctx.set_global_alpha(1.0);

		if state.is_hovered(idx) && t > 0.01 {
			rounded_rect(
				ctx,
				x - 2.0,
				y - 2.0,
				NODE_WIDTH + 4.0,
				NODE_HEIGHT + 4.0,
				CORNER_RADIUS + 2.0,
			);
			ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.7 * t));
			ctx.set_line_width(1.5);
			ctx.stroke();
		}
	});
}

fn draw_selection(state: &TreeCanvasState, ctx: &CanvasRenderingContext2d, x: f64, y: f64) {
	let pulse = 0.7 + 0.3 * (state.time * 4.0).sin().abs();
	let (cx, cy) = (x + NODE_WIDTH / 2.0, y + NODE_HEIGHT / 2.0);

	if let Ok(gradient) = ctx.create_radial_gradient(cx, cy, NODE_HEIGHT / 2.0, cx, cy, NODE_WIDTH) {
		let _ = gradient.add_color_stop(0.0, &format!("rgba(59, 130, 246, {})", 0.35 * pulse));
		let _ = gradient.add_color_stop(1.0, "rgba(59, 130, 246, 0)");
		ctx.begin_path();
		let _ = ctx.arc(cx, cy, NODE_WIDTH, 0.0, 2.0 * PI);
		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
		ctx.fill();
	}

	rounded_rect(
		ctx,
		x - 4.0,
		y - 4.0,
		NODE_WIDTH + 8.0,
		NODE_HEIGHT + 8.0,
		CORNER_RADIUS + 4.0,
	);
	ctx.set_stroke_style_str(&format!("rgba(59, 130, 246, {})", pulse));
	ctx.set_line_width(3.0);
	ctx.stroke();
}

fn draw_minimap(state: &TreeCanvasState, ctx: &CanvasRenderingContext2d, palette: &Palette) {
	let Some(bounds) = state.bounds() else {
		return;
	};
	let (left, top) = (
		state.width - MINIMAP_WIDTH - MINIMAP_MARGIN,
		state.height - MINIMAP_HEIGHT - MINIMAP_MARGIN,
	);
	let scale = (MINIMAP_WIDTH / bounds.width()).min(MINIMAP_HEIGHT / bounds.height()) * 0.9;
	let (ox, oy) = (
		left + (MINIMAP_WIDTH - bounds.width() * scale) / 2.0,
		top + (MINIMAP_HEIGHT - bounds.height() * scale) / 2.0,
	);
	let to_map = |gx: f64, gy: f64| {
		(
			ox + (gx - bounds.min_x) * scale,
			oy + (gy - bounds.min_y) * scale,
		)
	};

	ctx.set_fill_style_str(palette.minimap);
	ctx.fill_rect(left, top, MINIMAP_WIDTH, MINIMAP_HEIGHT);

	state.graph.visit_nodes(|node| {
		let (mx, my) = to_map(node.x() as f64, node.y() as f64);
		ctx.set_fill_style_str(kind_color(node.data.user_data.kind));
		ctx.fill_rect(
			mx,
			my,
			(NODE_WIDTH * scale).max(1.0),
			(NODE_HEIGHT * scale).max(1.0),
		);
	});

	// Visible area, clipped to the minimap frame.
	let (gx0, gy0) = state.screen_to_graph(0.0, 0.0);
	let (gx1, gy1) = state.screen_to_graph(state.width, state.height);
	let (vx0, vy0) = to_map(gx0, gy0);
	let (vx1, vy1) = to_map(gx1, gy1);
	ctx.save();
	ctx.begin_path();
	ctx.rect(left, top, MINIMAP_WIDTH, MINIMAP_HEIGHT);
	ctx.clip();
	ctx.set_stroke_style_str(palette.viewport);
	ctx.set_line_width(1.5);
	ctx.stroke_rect(vx0, vy0, vx1 - vx0, vy1 - vy0);
	ctx.restore();
}

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::{ForceGraphState, NODE_RADIUS};

const BACKGROUND: &str = "#1a1a2e";

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_title(state, ctx);
	if state.nodes.is_empty() {
		draw_placeholder(state, ctx);
		return;
	}
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_title(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("rgba(255, 255, 255, 0.85)");
	ctx.set_font("16px sans-serif");
	ctx.set_text_align("left");
	let _ = ctx.fill_text(&state.title, 12.0, 26.0);
}

fn draw_placeholder(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("rgba(255, 255, 255, 0.5)");
	ctx.set_font("14px sans-serif");
	ctx.set_text_align("center");
	let _ = ctx.fill_text(
		"No rows match the current filters",
		state.width / 2.0,
		state.height / 2.0,
	);
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let line_width = 0.8 / state.transform.k;
	let t = ease_out_cubic(state.hover.highlight_t);

	for &(a, b) in &state.edges {
		let (n1, n2) = (&state.nodes[a], &state.nodes[b]);
		let is_highlighted = state.is_highlighted(a) && state.is_highlighted(b);

		// t=0: all edges at base (0.5), t=1: highlighted at 0.9, others at 0.1
		let (alpha, width) = if is_highlighted {
			(0.5 + 0.4 * t, line_width * (1.0 + 0.8 * t))
		} else {
			(0.5 - 0.4 * t, line_width)
		};

		ctx.set_stroke_style_str(&format!("rgba(136, 136, 136, {})", alpha));
		ctx.set_line_width(width);
		ctx.begin_path();
		ctx.move_to(n1.x, n1.y);
		ctx.line_to(n2.x, n2.y);
		ctx.stroke();
	}
}

fn draw_label(ctx: &CanvasRenderingContext2d, label: &str, x: f64, y: f64, k: f64, style: &str) {
	ctx.set_fill_style_str(style);
	ctx.set_font(&format!("{}px sans-serif", 11.0 / k.max(0.5)));
	ctx.set_text_align("center");
	// top center
	let _ = ctx.fill_text(label, x, y - NODE_RADIUS - 4.0 / k.max(0.5));
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);

	for (idx, node) in state.nodes.iter().enumerate() {
		if has_highlight && state.is_highlighted(idx) {
			continue;
		}
		let (alpha, radius) = (1.0 - 0.7 * t, NODE_RADIUS * (1.0 - 0.15 * t));

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&node.color);
		ctx.fill();
		ctx.set_stroke_style_str("rgba(255, 255, 255, 0.6)");
		ctx.set_line_width(1.0 / k);
		ctx.stroke();
		ctx.set_global_alpha(1.0);

		let style = format!("rgba(255, 255, 255, {})", alpha * 0.8);
		draw_label(ctx, &node.label, node.x, node.y, k, &style);
	}

	if !has_highlight {
		return;
	}

	for (idx, node) in state.nodes.iter().enumerate() {
		if !state.is_highlighted(idx) {
			continue;
		}
		let (x, y) = (node.x, node.y);
		let is_hovered = state.is_hovered(idx);

		let (radius, glow_radius) = if is_hovered {
			(
				NODE_RADIUS * (1.0 + 0.35 * t),
				NODE_RADIUS * (1.8 + 1.2 * t),
			)
		} else {
			(NODE_RADIUS * (1.0 + 0.2 * t), NODE_RADIUS * (1.4 + 0.6 * t))
		};

		if t > 0.01 {
			if let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.3, x, y, glow_radius) {
				let alpha = if is_hovered { 0.35 * t } else { 0.2 * t };
				let _ = gradient.add_color_stop(0.0, &format!("rgba(255, 255, 255, {})", alpha));
				let _ = gradient.add_color_stop(0.6, &format!("rgba(200, 220, 255, {})", alpha * 0.3));
				let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
				ctx.begin_path();
				let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&node.color);
		ctx.fill();

		if is_hovered && t > 0.01 {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 2.0 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.7 * t));
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}

		draw_label(ctx, &node.label, x, y, k, "white");
	}
}

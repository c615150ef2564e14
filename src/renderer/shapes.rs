//! Shape generation for 2D primitives
//!
//! All coordinates are logical screen pixels, origin top-left, y down.

use glam::{IVec2, Vec2};

use super::vertex::{Vertex, colors};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::{GamePhase, GameState};

/// Width of the center lines in pixels
const LINE_WIDTH: f32 = 1.0;

/// Axis-aligned filled rectangle from its top-left corner
pub fn rect(top_left: Vec2, size: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    let (x0, y0) = (top_left.x, top_left.y);
    let (x1, y1) = (top_left.x + size.x, top_left.y + size.y);
    [
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Rectangle for a center-anchored entity
///
/// Half extents use integer division so odd sizes land on the same pixels
/// the simulation's collision checks use.
pub fn centered_rect(center: IVec2, size: IVec2, color: [f32; 4]) -> [Vertex; 6] {
    let top_left = center - size / 2;
    rect(top_left.as_vec2(), size.as_vec2(), color)
}

/// Straight line as a thin quad
pub fn line(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> [Vertex; 6] {
    let dir = (to - from).normalize_or_zero();
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let a = from + perp;
    let b = from - perp;
    let c = to + perp;
    let d = to - perp;
    [
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}

/// Everything drawn on the canvas this frame
///
/// The menu is text only, so it yields no geometry.
pub fn build_scene(state: &GameState) -> Vec<Vertex> {
    match state.phase {
        GamePhase::Menu | GamePhase::Quit => Vec::new(),
        GamePhase::Playing => playing_scene(state),
    }
}

fn playing_scene(state: &GameState) -> Vec<Vertex> {
    let (w, h) = (SCREEN_WIDTH as f32, SCREEN_HEIGHT as f32);
    let mut vertices = Vec::with_capacity(5 * 6);

    vertices.extend(centered_rect(state.paddle.pos, state.paddle.size, colors::PADDLE));
    vertices.extend(centered_rect(state.ai.pos, state.ai.size, colors::PADDLE));
    vertices.extend(centered_rect(state.ball.pos, state.ball.size, colors::BALL));

    vertices.extend(line(
        Vec2::new(0.0, h / 2.0),
        Vec2::new(w, h / 2.0),
        LINE_WIDTH,
        colors::CENTER_LINE,
    ));
    vertices.extend(line(
        Vec2::new(w / 2.0, 0.0),
        Vec2::new(w / 2.0, h),
        LINE_WIDTH,
        colors::CENTER_LINE,
    ));

    vertices
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, velocities are per-frame displacements
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod ai;
pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{
    clamp_paddle, integrate, resolve_collisions, resolve_horizontal_bounds,
    resolve_paddle_collision, resolve_vertical_bounds,
};
pub use state::{Ball, GameEvent, GamePhase, GameState, Paddle, Score, Side};
pub use tick::{FrameControl, TickInput, tick};

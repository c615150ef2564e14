//! Pong - one player against a ball-tracking AI
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, state machine)
//! - `input`: Keyboard state to per-frame tick input
//! - `audio`: Sound cue synthesis and single-voice playback
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: User preferences

pub mod audio;
pub mod error;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::StartupError;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Logical screen size; the window is scaled to fit
    pub const SCREEN_WIDTH: i32 = 640;
    pub const SCREEN_HEIGHT: i32 = 480;

    /// Fixed simulation timestep (one frame at 60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per animation frame
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Paddle defaults
    pub const PADDLE_WIDTH: i32 = 10;
    pub const PADDLE_HEIGHT: i32 = 80;
    pub const PADDLE_SPEED: i32 = 7;
    /// Distance of each paddle's center from its side of the screen
    pub const PADDLE_INSET: i32 = 20;

    /// Ball defaults
    pub const BALL_SIZE: i32 = 10;
    /// Velocity clamp, per axis
    pub const BALL_MAX_SPEED: i32 = 20;

    /// Serve velocity ranges (inclusive)
    pub const SERVE_VX: (i32, i32) = (3, 7);
    pub const SERVE_VY: (i32, i32) = (3, 6);
    /// Re-serve after a point draws vy from a narrower range
    pub const RESERVE_VY: (i32, i32) = (3, 5);

    /// HUD/menu font size in points
    pub const FONT_SIZE_PT: u32 = 24;
    /// HUD text margin from the screen edge
    pub const HUD_MARGIN: i32 = 20;

    pub const WINDOW_TITLE: &str = "Pong";
}

/// Logical resolution for any output size
#[inline]
pub fn layout(_out_width: u32, _out_height: u32) -> (u32, u32) {
    (consts::SCREEN_WIDTH as u32, consts::SCREEN_HEIGHT as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_fixed() {
        assert_eq!(layout(640, 480), (640, 480));
        assert_eq!(layout(1920, 1080), (640, 480));
        assert_eq!(layout(1, 1), (640, 480));
    }
}

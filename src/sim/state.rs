//! Game state and core simulation types
//!
//! Positions are integer screen pixels, center-anchored. Velocities are the
//! per-frame displacement; there is no separate timestep scaling.

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::audio::AudioCue;
use crate::consts::*;

/// Which update/draw routine runs this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Title menu, waiting for play or quit
    #[default]
    Menu,
    /// Ball in play against the AI
    Playing,
    /// Terminal; the driver stops the frame loop
    Quit,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Menu => "Menu",
            GamePhase::Playing => "Playing",
            GamePhase::Quit => "Quit",
        }
    }
}

/// Which side of the screen a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Human player, near x = 20
    Left,
    /// AI, near x = width - 20
    Right,
}

/// Something the platform layer should react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Play a sound effect
    Cue(AudioCue),
    /// A point was decided; `player_won` is false for a loss
    PointScored { player_won: bool },
    /// The phase changed this frame
    PhaseChanged { from: GamePhase, to: GamePhase },
}

/// A paddle (player or AI)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paddle {
    pub pos: IVec2,
    pub size: IVec2,
    /// Pixels moved per frame
    pub speed_y: i32,
}

impl Paddle {
    pub fn new(side: Side) -> Self {
        let x = match side {
            Side::Left => PADDLE_INSET,
            Side::Right => SCREEN_WIDTH - PADDLE_INSET,
        };
        Self {
            pos: IVec2::new(x, SCREEN_HEIGHT / 2),
            size: IVec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
            speed_y: PADDLE_SPEED,
        }
    }

    #[inline]
    pub fn half_width(&self) -> i32 {
        self.size.x / 2
    }

    #[inline]
    pub fn half_height(&self) -> i32 {
        self.size.y / 2
    }

    pub fn move_up(&mut self) {
        self.pos.y -= self.speed_y;
    }

    pub fn move_down(&mut self) {
        self.pos.y += self.speed_y;
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ball {
    pub pos: IVec2,
    pub vel: IVec2,
    pub size: IVec2,
}

impl Ball {
    /// Centered ball at rest
    pub fn new() -> Self {
        Self {
            pos: screen_center(),
            vel: IVec2::ZERO,
            size: IVec2::splat(BALL_SIZE),
        }
    }
}

impl Default for Ball {
    fn default() -> Self {
        Self::new()
    }
}

/// Center of the logical screen
#[inline]
pub fn screen_center() -> IVec2 {
    IVec2::new(SCREEN_WIDTH / 2, SCREEN_HEIGHT / 2)
}

/// Random serve velocity with both ranges inclusive
pub fn serve_velocity(rng: &mut Pcg32, vx: (i32, i32), vy: (i32, i32)) -> IVec2 {
    IVec2::new(rng.random_range(vx.0..=vx.1), rng.random_range(vy.0..=vy.1))
}

/// Points won and lost since the last Menu -> Playing transition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub wins: u32,
    pub losses: u32,
}

impl Score {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Complete game state, owned by the frame driver
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Human paddle (left)
    pub paddle: Paddle,
    /// AI paddle (right)
    pub ai: Paddle,
    pub ball: Ball,
    pub score: Score,
    /// Frames simulated while Playing
    pub frame: u64,
    /// Events raised since the last drain
    pub(super) events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh game in the menu, ball centered with an initial serve velocity
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut ball = Ball::new();
        ball.vel = serve_velocity(&mut rng, SERVE_VX, SERVE_VY);

        Self {
            seed,
            rng,
            phase: GamePhase::Menu,
            paddle: Paddle::new(Side::Left),
            ai: Paddle::new(Side::Right),
            ball,
            score: Score::default(),
            frame: 0,
            events: Vec::new(),
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events raised since the last call, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_starts_in_menu() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.paddle.pos, IVec2::new(20, 240));
        assert_eq!(state.ai.pos, IVec2::new(620, 240));
        assert_eq!(state.ball.pos, IVec2::new(320, 240));
        assert_eq!(state.score, Score::default());
    }

    #[test]
    fn test_initial_serve_in_range() {
        for seed in 0..200 {
            let state = GameState::new(seed);
            assert!((3..=7).contains(&state.ball.vel.x), "vx {}", state.ball.vel.x);
            assert!((3..=6).contains(&state.ball.vel.y), "vy {}", state.ball.vel.y);
        }
    }

    #[test]
    fn test_paddle_halves() {
        let paddle = Paddle::new(Side::Left);
        assert_eq!(paddle.half_width(), 5);
        assert_eq!(paddle.half_height(), 40);
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut state = GameState::new(7);
        state.push_event(GameEvent::Cue(AudioCue::Hit));
        state.push_event(GameEvent::PointScored { player_won: true });

        let drained = state.drain_events();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0], GameEvent::Cue(AudioCue::Hit));
        assert!(state.pending_events().is_empty());
    }
}

//! Per-frame update and phase transitions
//!
//! `tick` is the only entry point the frame driver needs. It never exits the
//! process; reaching `Quit` is reported back as `FrameControl::Exit`.

use super::ai::track_ball;
use super::collision::{clamp_paddle, integrate, resolve_collisions};
use super::state::{GameEvent, GamePhase, GameState, serve_velocity};
use crate::consts::*;

/// Held keys for a single frame (level-triggered)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Either up-equivalent key is held
    pub up: bool,
    /// Either down-equivalent key is held
    pub down: bool,
    /// Start a match from the menu
    pub play: bool,
    /// Leave the game from the menu
    pub quit: bool,
    /// Back to the menu from play
    pub menu: bool,
}

/// What the driver should do after this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    /// Stop the frame loop; no further ticks will do anything
    Exit,
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> FrameControl {
    match state.phase {
        GamePhase::Menu => update_menu(state, input),
        GamePhase::Playing => update_playing(state, input),
        GamePhase::Quit => {}
    }

    if state.phase == GamePhase::Quit {
        FrameControl::Exit
    } else {
        FrameControl::Continue
    }
}

fn update_menu(state: &mut GameState, input: &TickInput) {
    if input.quit {
        quit(state);
        return;
    }
    if input.play {
        start_playing(state);
    }
}

fn update_playing(state: &mut GameState, input: &TickInput) {
    state.frame += 1;

    if input.up {
        state.paddle.move_up();
    }
    if input.down {
        state.paddle.move_down();
    }
    clamp_paddle(&mut state.paddle);

    integrate(&mut state.ball);
    resolve_collisions(state);

    track_ball(&mut state.ai, &state.ball);
    clamp_paddle(&mut state.ai);

    log::trace!(
        "frame {}: ball {:?} vel {:?} paddle {} ai {}",
        state.frame,
        state.ball.pos,
        state.ball.vel,
        state.paddle.pos.y,
        state.ai.pos.y
    );

    if input.menu {
        return_to_menu(state);
    }
}

fn set_phase(state: &mut GameState, to: GamePhase) {
    let from = state.phase;
    state.phase = to;
    state.push_event(GameEvent::PhaseChanged { from, to });
    log::info!("{} -> {}", from.as_str(), to.as_str());
}

/// Menu -> Playing: clear the score and serve a fresh velocity
///
/// The ball keeps whatever position it had; only scoring re-centers it.
pub fn start_playing(state: &mut GameState) {
    state.score.reset();
    state.ball.vel = serve_velocity(&mut state.rng, SERVE_VX, SERVE_VY);
    set_phase(state, GamePhase::Playing);
}

/// Playing -> Menu; the score stays on display until the next match
pub fn return_to_menu(state: &mut GameState) {
    set_phase(state, GamePhase::Menu);
}

/// Menu -> Quit
pub fn quit(state: &mut GameState) {
    set_phase(state, GamePhase::Quit);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioCue;
    use crate::sim::state::Score;
    use glam::IVec2;

    fn play() -> TickInput {
        TickInput {
            play: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_menu_waits_for_input() {
        let mut state = GameState::new(12345);
        let ball = state.ball.clone();

        assert_eq!(tick(&mut state, &TickInput::default()), FrameControl::Continue);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.ball, ball, "menu does not move the ball");
    }

    #[test]
    fn test_menu_to_playing_resets_score() {
        let mut state = GameState::new(12345);
        state.score = Score { wins: 4, losses: 2 };
        state.ball.pos = IVec2::new(100, 50);

        tick(&mut state, &play());

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, Score::default());
        assert_eq!(state.ball.pos, IVec2::new(100, 50), "position is kept");
        assert!((3..=7).contains(&state.ball.vel.x));
        assert!((3..=6).contains(&state.ball.vel.y));
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::PhaseChanged {
                from: GamePhase::Menu,
                to: GamePhase::Playing
            }]
        );
    }

    #[test]
    fn test_quit_wins_over_play() {
        let mut state = GameState::new(1);
        let input = TickInput {
            play: true,
            quit: true,
            ..Default::default()
        };
        assert_eq!(tick(&mut state, &input), FrameControl::Exit);
        assert_eq!(state.phase, GamePhase::Quit);
    }

    #[test]
    fn test_quit_is_terminal() {
        let mut state = GameState::new(1);
        quit(&mut state);
        state.drain_events();
        let snapshot = (state.ball.clone(), state.paddle.clone(), state.score);

        for _ in 0..10 {
            assert_eq!(tick(&mut state, &play()), FrameControl::Exit);
        }
        assert_eq!(state.phase, GamePhase::Quit);
        assert_eq!((state.ball.clone(), state.paddle.clone(), state.score), snapshot);
        assert!(state.pending_events().is_empty());
    }

    #[test]
    fn test_quit_key_ignored_while_playing() {
        let mut state = GameState::new(2);
        tick(&mut state, &play());
        let input = TickInput {
            quit: true,
            ..Default::default()
        };
        assert_eq!(tick(&mut state, &input), FrameControl::Continue);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_escape_returns_to_menu_keeping_score() {
        let mut state = GameState::new(3);
        tick(&mut state, &play());
        state.score = Score { wins: 3, losses: 1 };

        let input = TickInput {
            menu: true,
            ..Default::default()
        };
        tick(&mut state, &input);

        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.score, Score { wins: 3, losses: 1 });
    }

    #[test]
    fn test_escape_in_menu_does_nothing() {
        let mut state = GameState::new(3);
        let input = TickInput {
            menu: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.pending_events().is_empty());
    }

    #[test]
    fn test_paddle_moves_with_input() {
        let mut state = GameState::new(4);
        tick(&mut state, &play());

        let up = TickInput {
            up: true,
            ..Default::default()
        };
        tick(&mut state, &up);
        assert_eq!(state.paddle.pos.y, 233);

        let down = TickInput {
            down: true,
            ..Default::default()
        };
        tick(&mut state, &down);
        tick(&mut state, &down);
        assert_eq!(state.paddle.pos.y, 247);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut state = GameState::new(5);
        tick(&mut state, &play());
        let both = TickInput {
            up: true,
            down: true,
            ..Default::default()
        };
        tick(&mut state, &both);
        assert_eq!(state.paddle.pos.y, 240);
    }

    #[test]
    fn test_paddle_stops_at_top() {
        let mut state = GameState::new(6);
        tick(&mut state, &play());
        let up = TickInput {
            up: true,
            ..Default::default()
        };
        for _ in 0..100 {
            tick(&mut state, &up);
        }
        assert_eq!(state.paddle.pos.y, 40);
    }

    #[test]
    fn test_playing_frame_order() {
        let mut state = GameState::new(7);
        tick(&mut state, &play());
        state.drain_events();
        state.ball.pos = IVec2::new(320, 240);
        state.ball.vel = IVec2::new(5, 4);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.ball.pos, IVec2::new(325, 244));
        // AI reacts to the ball's post-integration position
        assert_eq!(state.ai.pos.y, 247);
        assert_eq!(state.frame, 1);
    }

    #[test]
    fn test_point_lost_through_tick() {
        let mut state = GameState::new(8);
        tick(&mut state, &play());
        state.drain_events();
        state.ball.pos = IVec2::new(2, 420);
        state.ball.vel = IVec2::new(-5, 1);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.score.losses, 1);
        assert_eq!(state.ball.pos, IVec2::new(320, 240));
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Cue(AudioCue::Loss)));
        assert!(events.contains(&GameEvent::PointScored { player_won: false }));
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            play(),
            TickInput {
                up: true,
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                down: true,
                ..Default::default()
            },
        ];

        for _ in 0..500 {
            for input in &inputs {
                tick(&mut state1, input);
                tick(&mut state2, input);
            }
        }

        assert_eq!(state1.frame, state2.frame);
        assert_eq!(state1.ball, state2.ball);
        assert_eq!(state1.ai, state2.ai);
        assert_eq!(state1.score, state2.score);
    }
}

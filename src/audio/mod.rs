//! Sound cues
//!
//! The simulation only names which cue to play. Clips are synthesized once at
//! startup (`bank`) and handed to a `CueSink`, which owns a single voice: a
//! new cue cuts off whatever is playing and starts from the beginning.

pub mod bank;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use bank::{CueBank, Tone, Waveform};
#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCue {
    /// Ball hits a paddle
    Hit,
    /// Ball got past the AI
    Win,
    /// Ball got past the player
    Loss,
}

impl AudioCue {
    pub const ALL: [AudioCue; 3] = [AudioCue::Hit, AudioCue::Win, AudioCue::Loss];

    pub fn as_str(&self) -> &'static str {
        match self {
            AudioCue::Hit => "hit",
            AudioCue::Win => "win",
            AudioCue::Loss => "loss",
        }
    }
}

/// Something that can play a cue
pub trait CueSink {
    /// Start `cue` from the beginning, cutting off the previous one
    fn play(&mut self, cue: AudioCue);
}

/// Play every cue in `events`, in order; returns how many were requested
///
/// Several cues in one frame preempt each other, so only the last is heard.
pub fn dispatch_cues<S: CueSink + ?Sized>(events: &[GameEvent], sink: &mut S) -> usize {
    let mut played = 0;
    for event in events {
        if let GameEvent::Cue(cue) = event {
            sink.play(*cue);
            played += 1;
        }
    }
    played
}

/// Sink for headless runs: logs each cue and remembers the one "playing"
#[derive(Debug, Default)]
pub struct LogSink {
    voice: Option<AudioCue>,
    requests: u64,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cue currently occupying the voice
    pub fn current(&self) -> Option<AudioCue> {
        self.voice
    }

    pub fn requests(&self) -> u64 {
        self.requests
    }
}

impl CueSink for LogSink {
    fn play(&mut self, cue: AudioCue) {
        if let Some(previous) = self.voice.replace(cue) {
            log::trace!("cue {} cut off", previous.as_str());
        }
        self.requests += 1;
        log::debug!("cue {}", cue.as_str());
    }
}

//! Web Audio playback
//!
//! Clips are uploaded into `AudioBuffer`s once. Every cue creates a fresh
//! `AudioBufferSourceNode` (sources are single-use) and stops the previous one.

use web_sys::{AudioBuffer, AudioBufferSourceNode, AudioContext, GainNode};

use super::{AudioCue, CueBank, CueSink};
use crate::error::StartupError;

fn audio_err(what: &str, err: wasm_bindgen::JsValue) -> StartupError {
    StartupError::Audio(format!("{what}: {err:?}"))
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: AudioContext,
    /// Master gain, all sources route through it
    gain: GainNode,
    /// Indexed like `AudioCue::ALL`
    buffers: Vec<AudioBuffer>,
    /// The one source allowed to sound
    voice: Option<AudioBufferSourceNode>,
}

impl AudioManager {
    /// Create the context and upload all cue clips
    pub fn new(volume: f32) -> Result<Self, StartupError> {
        let ctx = AudioContext::new().map_err(|e| audio_err("AudioContext", e))?;
        let gain = ctx.create_gain().map_err(|e| audio_err("gain node", e))?;
        gain.gain().set_value(volume.clamp(0.0, 1.0));
        gain.connect_with_audio_node(&ctx.destination())
            .map_err(|e| audio_err("connect gain", e))?;

        let bank = CueBank::new(ctx.sample_rate());
        let mut buffers = Vec::with_capacity(AudioCue::ALL.len());
        for cue in AudioCue::ALL {
            let mut clip = bank.clip(cue).to_vec();
            let buffer = ctx
                .create_buffer(1, clip.len() as u32, bank.sample_rate())
                .map_err(|e| audio_err("create buffer", e))?;
            buffer
                .copy_to_channel(&mut clip, 0)
                .map_err(|e| audio_err("fill buffer", e))?;
            log::info!(
                "Loaded {} cue ({:.2}s)",
                cue.as_str(),
                bank.duration(cue)
            );
            buffers.push(buffer);
        }

        Ok(Self {
            ctx,
            gain,
            buffers,
            voice: None,
        })
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if self.ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = self.ctx.resume();
        }
    }

    /// Set output volume (0.0 - 1.0)
    pub fn set_volume(&self, volume: f32) {
        self.gain.gain().set_value(volume.clamp(0.0, 1.0));
    }

    /// Cut off whatever is playing
    #[allow(deprecated)]
    pub fn stop(&mut self) {
        if let Some(source) = self.voice.take() {
            let _ = source.stop();
        }
    }

    fn buffer(&self, cue: AudioCue) -> &AudioBuffer {
        let index = AudioCue::ALL
            .iter()
            .position(|c| *c == cue)
            .unwrap_or_default();
        &self.buffers[index]
    }

    #[allow(deprecated)]
    fn start_source(&self, cue: AudioCue) -> Option<AudioBufferSourceNode> {
        let source = self.ctx.create_buffer_source().ok()?;
        source.set_buffer(Some(self.buffer(cue)));
        source.connect_with_audio_node(&self.gain).ok()?;
        source.start().ok()?;
        Some(source)
    }
}

impl CueSink for AudioManager {
    fn play(&mut self, cue: AudioCue) {
        self.stop();
        self.resume();
        match self.start_source(cue) {
            Some(source) => {
                log::debug!("cue {}", cue.as_str());
                self.voice = Some(source);
            }
            None => log::warn!("Failed to start {} cue", cue.as_str()),
        }
    }
}

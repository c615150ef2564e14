//! Procedurally generated cue clips
//!
//! Each clip is a short sequence of tones rendered to mono f32 PCM. No
//! external files needed.

use std::f32::consts::TAU;

use super::AudioCue;

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
}

impl Waveform {
    /// Sample at phase in [0, 1)
    fn sample(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (phase * TAU).sin(),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * phase - 1.0,
        }
    }
}

/// One note: exponential pitch sweep under an exponential decay envelope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub wave: Waveform,
    pub start_hz: f32,
    pub end_hz: f32,
    /// Seconds
    pub duration: f32,
    /// Peak amplitude, 0-1
    pub gain: f32,
}

/// Envelope floor reached at the end of each tone
const DECAY_FLOOR: f32 = 0.01;

impl Tone {
    const fn new(wave: Waveform, start_hz: f32, end_hz: f32, duration: f32, gain: f32) -> Self {
        Self {
            wave,
            start_hz,
            end_hz,
            duration,
            gain,
        }
    }

    /// Append this tone's samples to `out`
    fn render_into(&self, sample_rate: f32, out: &mut Vec<f32>) {
        let count = (self.duration * sample_rate).round() as usize;
        let mut phase = 0.0f32;
        for i in 0..count {
            let t = i as f32 / count as f32;
            let freq = self.start_hz * (self.end_hz / self.start_hz).powf(t);
            let envelope = self.gain * DECAY_FLOOR.powf(t);
            out.push(self.wave.sample(phase) * envelope);
            phase = (phase + freq / sample_rate).fract();
        }
    }
}

/// Paddle hit - solid thump
const HIT: &[Tone] = &[Tone::new(Waveform::Sine, 150.0, 60.0, 0.12, 0.6)];

/// Point won - rising two-note arpeggio
const WIN: &[Tone] = &[
    Tone::new(Waveform::Square, 523.25, 523.25, 0.09, 0.25),
    Tone::new(Waveform::Square, 783.99, 783.99, 0.18, 0.25),
];

/// Point lost - sad descending sweep
const LOSS: &[Tone] = &[Tone::new(Waveform::Sawtooth, 300.0, 80.0, 0.4, 0.35)];

/// Tone recipe for a cue
pub fn recipe(cue: AudioCue) -> &'static [Tone] {
    match cue {
        AudioCue::Hit => HIT,
        AudioCue::Win => WIN,
        AudioCue::Loss => LOSS,
    }
}

/// Render a sequence of tones back to back
pub fn render(tones: &[Tone], sample_rate: f32) -> Vec<f32> {
    let total: f32 = tones.iter().map(|t| t.duration).sum();
    let mut out = Vec::with_capacity((total * sample_rate).ceil() as usize);
    for tone in tones {
        tone.render_into(sample_rate, &mut out);
    }
    out
}

/// All three cue clips, rendered at one sample rate
#[derive(Debug, Clone)]
pub struct CueBank {
    sample_rate: f32,
    hit: Vec<f32>,
    win: Vec<f32>,
    loss: Vec<f32>,
}

impl CueBank {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            hit: render(recipe(AudioCue::Hit), sample_rate),
            win: render(recipe(AudioCue::Win), sample_rate),
            loss: render(recipe(AudioCue::Loss), sample_rate),
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn clip(&self, cue: AudioCue) -> &[f32] {
        match cue {
            AudioCue::Hit => &self.hit,
            AudioCue::Win => &self.win,
            AudioCue::Loss => &self.loss,
        }
    }

    /// Clip length in seconds
    pub fn duration(&self, cue: AudioCue) -> f32 {
        self.clip(cue).len() as f32 / self.sample_rate
    }
}

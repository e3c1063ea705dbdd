//! Procedurally synthesized sound cues.
//!
//! Cues are rendered once with fundsp and replayed through rodio. Without an
//! output device the game simply runs silent.

use fundsp::prelude32::*;
use rodio::{OutputStream, OutputStreamBuilder, Sink, buffer::SamplesBuffer};

use crate::game::FrameEvent;

const SAMPLE_RATE: u32 = 44_100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Flap,
    Score,
    Crash,
    Clear,
}

/// Linear ramp from `a` to `b` over `secs`, holding `b` afterwards.
fn sweep(a: f32, b: f32, t: f32, secs: f32) -> f32 {
    a + (b - a) * (t / secs).min(1.0)
}

/// Ascending major arpeggio for the clear jingle.
const CLEAR_NOTES: [f32; 4] = [523.25, 659.25, 783.99, 1046.5];
const CLEAR_NOTE_SECS: f32 = 0.09;

/// Arpeggio pitch at `t`, holding the top note once the run is over.
fn clear_note(t: f32) -> f32 {
    CLEAR_NOTES[Ord::min((t / CLEAR_NOTE_SECS) as usize, CLEAR_NOTES.len() - 1)]
}

impl Cue {
    pub const ALL: [Cue; 4] = [Cue::Flap, Cue::Score, Cue::Crash, Cue::Clear];

    pub fn for_event(event: FrameEvent) -> Option<Cue> {
        match event {
            FrameEvent::Jumped => Some(Cue::Flap),
            FrameEvent::Scored(_) => Some(Cue::Score),
            FrameEvent::Crashed => Some(Cue::Crash),
            FrameEvent::Cleared => Some(Cue::Clear),
            FrameEvent::Started | FrameEvent::Restarted => None,
        }
    }

    pub fn duration_secs(self) -> f32 {
        match self {
            Cue::Flap => 0.08,
            Cue::Score => 0.12,
            Cue::Crash => 0.5,
            Cue::Clear => CLEAR_NOTE_SECS * CLEAR_NOTES.len() as f32 + 0.15,
        }
    }

    /// Mono samples at [`SAMPLE_RATE`].
    pub fn render(self) -> Vec<f32> {
        let secs = self.duration_secs();
        match self {
            // Quick upward chirp
            Cue::Flap => synth(
                (lfo(|t: f32| sweep(520.0, 900.0, t, 0.08)) >> sine())
                    * lfo(|t: f32| sweep(0.12, 0.0, t, 0.08)),
                secs,
            ),
            // Two-tone blip
            Cue::Score => synth(
                (lfo(|t: f32| -> f32 { if t < 0.05 { 880.0 } else { 1320.0 } }) >> sine())
                    * lfo(|t: f32| sweep(0.1, 0.0, t, 0.12)),
                secs,
            ),
            // Falling sawtooth, 400Hz down to 80Hz
            Cue::Crash => synth(
                (lfo(|t: f32| sweep(400.0, 80.0, t, 0.4)) >> saw())
                    * lfo(|t: f32| sweep(0.15, 0.0, t, 0.5)),
                secs,
            ),
            Cue::Clear => synth(
                (lfo(clear_note) >> square())
                    * lfo(move |t: f32| sweep(0.08, 0.0, t, secs)),
                secs,
            ),
        }
    }
}

fn synth(mut node: impl AudioUnit, secs: f32) -> Vec<f32> {
    node.set_sample_rate(SAMPLE_RATE as f64);
    let len = (SAMPLE_RATE as f32 * secs) as usize;
    (0..len).map(|_| node.get_mono()).collect()
}

pub struct Audio {
    stream: Option<OutputStream>,
    // Indexed like Cue::ALL
    samples: Vec<Vec<f32>>,
}

impl Audio {
    /// Open the default output device. Failure is logged, not fatal.
    pub fn open() -> Self {
        match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                stream.log_on_drop(false);
                log::info!("audio output opened");
                Self::with_stream(Some(stream))
            }
            Err(e) => {
                log::warn!("no audio output, running silent: {e}");
                Self::silent()
            }
        }
    }

    pub fn silent() -> Self {
        Self::with_stream(None)
    }

    fn with_stream(stream: Option<OutputStream>) -> Self {
        let samples = if stream.is_some() {
            Cue::ALL.iter().map(|cue| cue.render()).collect()
        } else {
            Vec::new()
        };
        Self { stream, samples }
    }

    pub fn is_enabled(&self) -> bool {
        self.stream.is_some()
    }

    pub fn play(&self, cue: Cue) {
        let Some(stream) = &self.stream else {
            return;
        };
        let Some(samples) = Cue::ALL
            .iter()
            .position(|&c| c == cue)
            .and_then(|i| self.samples.get(i))
        else {
            return;
        };

        let sink = Sink::connect_new(stream.mixer());
        sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples.clone()));
        sink.detach(); // Play in background
    }
}

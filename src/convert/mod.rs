//! Conversion utilities for audio (time, frequency, note, MIDI).

pub(crate) const A4_HZ: f64 = 440.0;
pub(crate) const MIDI_A4: f64 = 69.0;

/// Default sample rate in Hz.
pub const DEFAULT_SR: f64 = 22050.0;

/// Default number of samples between successive frames.
pub const DEFAULT_HOP_LENGTH: i64 = 512;

/// Default floor (in dB) for the A/B/C/D weighting curves.
pub const DEFAULT_MIN_DB: f64 = -80.0;

mod frequency;
mod keys;
mod notation;
mod pitch;
mod scales;
mod timing;
mod weighting;

pub use frequency::*;
pub use keys::*;
pub use notation::*;
pub use pitch::*;
pub use scales::*;
pub use timing::*;
pub use weighting::*;

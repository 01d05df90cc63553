//! Time, frequency and pitch conversions for audio analysis.
//!
//! timefreq collects the unit conversions that audio and music analysis code
//! keeps reaching for: frame/sample/time indexing, MIDI numbers and note
//! names, mel and octave scales, bin-frequency tables, and the standard
//! A/B/C/D/Z loudness weighting curves. It also spells note names correctly
//! for a given key signature.
//!
//! # Quick Start
//!
//! ```rust
//! use timefreq::convert::{self, NoteFormat};
//!
//! // Frame 10 at hop 512, 22050 Hz
//! let t = convert::frames_to_time(10, 22050.0, 512, None);
//! assert!((t - 0.2322).abs() < 1e-3);
//!
//! // Note names round-trip through MIDI
//! let midi = convert::note_to_midi("C♯4", true).unwrap();
//! assert_eq!(midi, 61.0);
//! let name = convert::midi_to_note(61.0, &NoteFormat::default().with_key("Db:maj")).unwrap();
//! assert_eq!(name, "D♭4");
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`convert`] | Frequency/pitch/time conversions, key spelling, weighting curves |
//! | [`error`] | Crate error type |
//!
//! Every numeric conversion comes as a scalar function and an `_array`
//! variant that maps element-wise over any [`ndarray`] array, keeping its
//! shape.
//!
//! # Error Handling
//!
//! Fallible operations return [`Result<T>`], an alias for
//! `std::result::Result<T, Error>`. Only malformed text input (note names,
//! key signatures, weighting kinds) and inconsistent formatting options are
//! errors. Numerically degenerate arguments such as a zero sample rate are
//! computed as-is and may produce `inf` or `NaN`.
//!
//! # Safety
//!
//! This crate uses `#![forbid(unsafe_code)]`.

#![forbid(unsafe_code)]

pub mod error;
pub use error::{Error, Result};

pub mod convert;

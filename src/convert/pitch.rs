use ndarray::{Array, Array1, ArrayBase, Data, Dimension};

use super::keys::{key_cache, Key};
use super::notation::Note;
use super::{A4_HZ, MIDI_A4};
use crate::{Error, Result};

/// Convert frequency (Hz) to a (fractional) MIDI note number.
///
/// Non-positive frequencies are not rejected: 0 Hz maps to `-inf` and
/// negative frequencies to `NaN`.
///
/// # Example
/// ```
/// use timefreq::convert::hz_to_midi;
///
/// assert_eq!(hz_to_midi(440.0), 69.0);
/// assert!((hz_to_midi(261.6256) - 60.0).abs() < 1e-4);
/// ```
pub fn hz_to_midi(frequency: f64) -> f64 {
    12.0 * (frequency.log2() - A4_HZ.log2()) + MIDI_A4
}

/// Convert frequencies (Hz) to MIDI note numbers, element-wise.
pub fn hz_to_midi_array<S, D>(frequencies: &ArrayBase<S, D>) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    frequencies.mapv(hz_to_midi)
}

/// Convert a MIDI note number to frequency (Hz).
///
/// # Example
/// ```
/// use timefreq::convert::midi_to_hz;
///
/// assert_eq!(midi_to_hz(69.0), 440.0);
/// assert!((midi_to_hz(81.0) - 880.0).abs() < 1e-9);
/// ```
pub fn midi_to_hz(note: f64) -> f64 {
    A4_HZ * 2.0_f64.powf((note - MIDI_A4) / 12.0)
}

/// Convert MIDI note numbers to frequencies (Hz), element-wise.
pub fn midi_to_hz_array<S, D>(notes: &ArrayBase<S, D>) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    notes.mapv(midi_to_hz)
}

/// Convert a spelled note name to a MIDI number.
///
/// # Arguments
/// * `note` - Note name: letter, accidentals, optional octave and optional
///   signed cents, e.g. `"C#4"`, `"E♭5"`, `"A4+25"`, `"Gb"`. A missing octave
///   means octave 0.
/// * `round_midi` - Round to the nearest integer (ties to even)
///
/// # Errors
/// `InvalidParameter` if `note` does not follow the note grammar.
///
/// # Example
/// ```
/// use timefreq::convert::note_to_midi;
///
/// assert_eq!(note_to_midi("C4", true).unwrap(), 60.0);
/// assert_eq!(note_to_midi("C♯𝄪4", true).unwrap(), 63.0);
/// assert_eq!(note_to_midi("A4+25", false).unwrap(), 69.25);
/// assert!(note_to_midi("H4", true).is_err());
/// ```
pub fn note_to_midi(note: &str, round_midi: bool) -> Result<f64> {
    let note: Note = note.parse()?;
    Ok(note.to_midi(round_midi))
}

/// Convert a sequence of note names to MIDI numbers.
///
/// # Example
/// ```
/// use timefreq::convert::notes_to_midi;
///
/// let midi = notes_to_midi(["C", "E", "G"], true).unwrap();
/// assert_eq!(midi.to_vec(), vec![12.0, 16.0, 19.0]);
/// ```
pub fn notes_to_midi<I, T>(notes: I, round_midi: bool) -> Result<Array1<f64>>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    notes
        .into_iter()
        .map(|n| note_to_midi(n.as_ref(), round_midi))
        .collect::<Result<Vec<_>>>()
        .map(Array1::from)
}

/// Convert a spelled note name to frequency (Hz).
///
/// # Example
/// ```
/// use timefreq::convert::note_to_hz;
///
/// assert!((note_to_hz("A4", true).unwrap() - 440.0).abs() < 1e-9);
/// ```
pub fn note_to_hz(note: &str, round_midi: bool) -> Result<f64> {
    note_to_midi(note, round_midi).map(midi_to_hz)
}

/// Convert a sequence of note names to frequencies (Hz).
pub fn notes_to_hz<I, T>(notes: I, round_midi: bool) -> Result<Array1<f64>>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    notes_to_midi(notes, round_midi).map(|midi| midi.mapv(midi_to_hz))
}

/// Rendering options for [`midi_to_note`].
///
/// # Example
/// ```
/// use timefreq::convert::{midi_to_note, NoteFormat};
///
/// let fmt = NoteFormat::default().with_cents(true).with_unicode(false);
/// assert_eq!(midi_to_note(61.33, &fmt).unwrap(), "C#4+33");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteFormat {
    /// Append the octave number
    pub octave: bool,
    /// Append the cent deviation (requires `octave`)
    pub cents: bool,
    /// Key signature used to spell accidentals
    pub key: String,
    /// Use Unicode accidentals instead of ASCII
    pub unicode: bool,
}

impl Default for NoteFormat {
    fn default() -> Self {
        Self {
            octave: true,
            cents: false,
            key: "C:maj".to_string(),
            unicode: true,
        }
    }
}

impl NoteFormat {
    pub fn with_octave(mut self, octave: bool) -> Self {
        self.octave = octave;
        self
    }

    pub fn with_cents(mut self, cents: bool) -> Self {
        self.cents = cents;
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_unicode(mut self, unicode: bool) -> Self {
        self.unicode = unicode;
        self
    }

    fn validate(&self) -> Result<Key> {
        if self.cents && !self.octave {
            return Err(Error::invalid(
                "cents",
                true,
                "cannot encode cents without octave information",
            ));
        }
        self.key.parse()
    }
}

fn format_note(midi: f64, key: Key, fmt: &NoteFormat) -> Result<String> {
    if !midi.is_finite() {
        return Err(Error::invalid("midi", midi, "must be finite to name a note"));
    }

    let note_num = midi.round_ties_even();
    // Two-decimal rounding, then truncation, as the cent value is reported.
    let note_cents = (100.0 * ((midi - note_num) * 100.0).round_ties_even() / 100.0) as i64;
    let note_num = note_num as i64;

    let notes = key_cache().notes_for(key, fmt.unicode);
    let mut note = notes[note_num.rem_euclid(12) as usize].clone();
    if fmt.octave {
        note.push_str(&(note_num.div_euclid(12) - 1).to_string());
    }
    if fmt.cents {
        note.push_str(&format!("{note_cents:+02}"));
    }
    Ok(note)
}

/// Convert a MIDI number to a note name.
///
/// The pitch class is spelled according to `fmt.key` (see
/// [`key_to_notes`](super::key_to_notes)). The number is rounded to the
/// nearest semitone; the remainder is reported as cents when requested.
///
/// # Errors
/// `InvalidParameter` if `fmt.cents` is set without `fmt.octave`, if the
/// key is malformed, or if `midi` is not finite.
///
/// # Example
/// ```
/// use timefreq::convert::{midi_to_note, NoteFormat};
///
/// let fmt = NoteFormat::default();
/// assert_eq!(midi_to_note(0.0, &fmt).unwrap(), "C-1");
/// assert_eq!(midi_to_note(25.0, &fmt).unwrap(), "C♯1");
/// assert_eq!(midi_to_note(-2.0, &fmt).unwrap(), "A♯-2");
///
/// let no_octave = NoteFormat::default().with_octave(false);
/// assert_eq!(midi_to_note(104.7, &no_octave).unwrap(), "A");
///
/// let f_minor = NoteFormat::default().with_key("F:min");
/// assert_eq!(midi_to_note(70.0, &f_minor).unwrap(), "B♭4");
/// ```
pub fn midi_to_note(midi: f64, fmt: &NoteFormat) -> Result<String> {
    let key = fmt.validate()?;
    format_note(midi, key, fmt)
}

/// Convert a sequence of MIDI numbers to note names.
pub fn midi_to_notes(midi: &[f64], fmt: &NoteFormat) -> Result<Vec<String>> {
    let key = fmt.validate()?;
    midi.iter().map(|&m| format_note(m, key, fmt)).collect()
}

/// Convert a frequency (Hz) to a note name.
///
/// # Example
/// ```
/// use timefreq::convert::{hz_to_note, NoteFormat};
///
/// assert_eq!(hz_to_note(440.0, &NoteFormat::default()).unwrap(), "A4");
/// let fmt = NoteFormat::default().with_cents(true);
/// assert_eq!(hz_to_note(450.0, &fmt).unwrap(), "A4+39");
/// ```
pub fn hz_to_note(frequency: f64, fmt: &NoteFormat) -> Result<String> {
    midi_to_note(hz_to_midi(frequency), fmt)
}

/// Convert a sequence of frequencies (Hz) to note names.
pub fn hz_to_notes(frequencies: &[f64], fmt: &NoteFormat) -> Result<Vec<String>> {
    let midi: Vec<f64> = frequencies.iter().copied().map(hz_to_midi).collect();
    midi_to_notes(&midi, fmt)
}

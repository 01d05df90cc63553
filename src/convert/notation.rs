use std::str::FromStr;

use crate::{Error, Result};

/// Semitone offset of a natural pitch letter above C.
pub(crate) fn pitch_offset(letter: char) -> Option<i32> {
    match letter.to_ascii_uppercase() {
        'C' => Some(0),
        'D' => Some(2),
        'E' => Some(4),
        'F' => Some(5),
        'G' => Some(7),
        'A' => Some(9),
        'B' => Some(11),
        _ => None,
    }
}

/// Semitone offset of a single accidental glyph.
pub(crate) fn accidental_offset(symbol: char) -> Option<i32> {
    match symbol {
        '#' | '♯' => Some(1),
        '𝄪' => Some(2),
        'b' | '!' | '♭' => Some(-1),
        '𝄫' => Some(-2),
        '♮' => Some(0),
        _ => None,
    }
}

/// A spelled note name such as `C♯4`, `Bb`, `A4+25` or `E𝄫-1`.
///
/// Grammar: a pitch letter `A`-`G` (either case), zero or more accidentals
/// from `# ♯ 𝄪 b ! ♭ 𝄫 ♮`, an optional signed octave and optional cents,
/// which always carry an explicit sign. Octave and cents must fit in an
/// `i64`.
///
/// Values are only built by parsing, so the letter is always one of `A`-`G`.
///
/// # Example
/// ```
/// use timefreq::convert::Note;
///
/// let note: Note = "Db5+20".parse().unwrap();
/// assert_eq!(note.letter(), 'D');
/// assert_eq!(note.accidental(), -1);
/// assert_eq!(note.octave(), Some(5));
/// assert_eq!(note.cents(), Some(20));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Note {
    letter: char,
    accidental: i32,
    octave: Option<i64>,
    cents: Option<i64>,
}

impl Note {
    /// Upper-case pitch letter.
    pub fn letter(&self) -> char {
        self.letter
    }

    /// Sum of all accidental offsets, in semitones.
    pub fn accidental(&self) -> i32 {
        self.accidental
    }

    /// Octave number (scientific pitch notation), if written.
    pub fn octave(&self) -> Option<i64> {
        self.octave
    }

    /// Deviation in cents, if written.
    pub fn cents(&self) -> Option<i64> {
        self.cents
    }

    /// MIDI number of this note. A missing octave counts as octave 0.
    pub fn to_midi(&self, round_midi: bool) -> f64 {
        let octave = self.octave.unwrap_or(0) as f64;
        let cents = self.cents.unwrap_or(0) as f64 * 0.01;
        let pitch = pitch_offset(self.letter).unwrap_or(0) as f64;
        let value = 12.0 * (octave + 1.0) + pitch + self.accidental as f64 + cents;
        if round_midi {
            value.round_ties_even()
        } else {
            value
        }
    }
}

/// Split a leading `[+-]?digits` run off `s`.
fn split_signed(s: &str, sign_required: bool) -> Option<(&str, &str)> {
    let sign_len = usize::from(s.starts_with(['+', '-']));
    if sign_required && sign_len == 0 {
        return None;
    }
    let digits = s[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    Some(s.split_at(sign_len + digits))
}

impl FromStr for Note {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = || {
            log::debug!("rejecting note name {s:?}");
            Error::invalid(
                "note",
                s,
                "improper note format (expected e.g. \"C#4\", \"Bb\", \"A4-15\")",
            )
        };

        let mut chars = s.char_indices();
        let letter = match chars.next() {
            Some((_, c)) if pitch_offset(c).is_some() && c.is_ascii_alphabetic() => {
                c.to_ascii_uppercase()
            }
            _ => return Err(malformed()),
        };

        let mut accidental = 0;
        let mut rest = "";
        for (i, c) in chars {
            match accidental_offset(c) {
                Some(offset) => accidental += offset,
                None => {
                    rest = &s[i..];
                    break;
                }
            }
        }

        let mut octave = None;
        let mut cents = None;
        if !rest.is_empty() {
            let (oct, tail) = split_signed(rest, false).ok_or_else(malformed)?;
            octave = Some(oct.parse::<i64>().map_err(|_| malformed())?);
            if !tail.is_empty() {
                let (cts, tail) = split_signed(tail, true).ok_or_else(malformed)?;
                if !tail.is_empty() {
                    return Err(malformed());
                }
                cents = Some(cts.parse::<i64>().map_err(|_| malformed())?);
            }
        }

        Ok(Note {
            letter,
            accidental,
            octave,
            cents,
        })
    }
}

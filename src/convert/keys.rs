use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use super::notation::pitch_offset;
use crate::{Error, Result};

const NOTES_SHARP: [&str; 12] = [
    "C", "C♯", "D", "D♯", "E", "F", "F♯", "G", "G♯", "A", "A♯", "B",
];
const NOTES_FLAT: [&str; 12] = [
    "C", "D♭", "D", "E♭", "E", "F", "G♭", "G", "A♭", "A", "B♭", "B",
];

// Respellings applied in order once a key reaches six sharps or flats, so
// that each letter name appears once per octave.
const SHARP_CORRECTIONS: [(usize, &str); 7] = [
    (5, "E♯"),
    (0, "B♯"),
    (7, "F𝄪"),
    (2, "C𝄪"),
    (9, "G𝄪"),
    (4, "D𝄪"),
    (11, "A𝄪"),
];
const FLAT_CORRECTIONS: [(usize, &str); 6] = [
    (11, "C♭"),
    (4, "F♭"),
    (9, "B𝄫"),
    (2, "E𝄫"),
    (7, "A𝄫"),
    (0, "D𝄫"),
];

const MAJOR_DEGREES: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];
const MINOR_DEGREES: [i32; 7] = [0, 2, 3, 5, 7, 8, 10];

/// Scale mode of a key signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Major,
    Minor,
}

/// A parsed key signature such as `C:maj`, `F#:min` or `Eb:major`.
///
/// Grammar: tonic letter `A`-`G` (either case), at most one accidental from
/// `# ♯ b ! ♭`, a colon, then `maj`, `min`, `major` or `minor`. Keys are
/// only built by parsing.
///
/// # Example
/// ```
/// use timefreq::convert::{Key, Mode};
///
/// let key: Key = "Bb:minor".parse().unwrap();
/// assert_eq!(key.tonic(), 'B');
/// assert_eq!(key.accidental(), -1);
/// assert_eq!(key.mode(), Mode::Minor);
/// assert_eq!(key.to_string(), "B♭:min");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    tonic: char,
    accidental: i32,
    mode: Mode,
}

impl FromStr for Key {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = || {
            log::debug!("rejecting key signature {s:?}");
            Error::invalid(
                "key",
                s,
                "improper key format (expected e.g. \"C:maj\", \"F#:min\", \"Eb:major\")",
            )
        };

        let (tonic_str, mode_str) = s.split_once(':').ok_or_else(malformed)?;

        let mut chars = tonic_str.chars();
        let tonic = match chars.next() {
            Some(c) if c.is_ascii_alphabetic() && pitch_offset(c).is_some() => {
                c.to_ascii_uppercase()
            }
            _ => return Err(malformed()),
        };
        let accidental = match chars.next() {
            None => 0,
            Some('#' | '♯') => 1,
            Some('b' | '!' | '♭') => -1,
            Some(_) => return Err(malformed()),
        };
        if chars.next().is_some() {
            return Err(malformed());
        }

        let mode = match mode_str {
            "maj" | "major" => Mode::Major,
            "min" | "minor" => Mode::Minor,
            _ => return Err(malformed()),
        };

        Ok(Key {
            tonic,
            accidental,
            mode,
        })
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let accidental = match self.accidental {
            1 => "♯",
            -1 => "♭",
            _ => "",
        };
        let mode = match self.mode {
            Mode::Major => "maj",
            Mode::Minor => "min",
        };
        write!(f, "{}{}:{}", self.tonic, accidental, mode)
    }
}

impl Key {
    /// Upper-case tonic letter.
    pub fn tonic(&self) -> char {
        self.tonic
    }

    /// Tonic accidental: -1, 0 or +1.
    pub fn accidental(&self) -> i32 {
        self.accidental
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Pitch class of the tonic (0 = C).
    pub fn pitch_class(&self) -> i32 {
        (pitch_offset(self.tonic).unwrap_or(0) + self.accidental).rem_euclid(12)
    }

    /// Position of the key on the circle of fifths, counted in sharps
    /// (0..12). Minor keys are placed at their relative major.
    pub fn tonic_number(&self) -> i32 {
        let fifths = (pitch_offset(self.tonic).unwrap_or(0) + self.accidental) * 7;
        match self.mode {
            Mode::Major => fifths.rem_euclid(12),
            Mode::Minor => (fifths + 9).rem_euclid(12),
        }
    }

    /// Whether the key is spelled with sharps rather than flats.
    ///
    /// An explicit tonic accidental decides; otherwise keys up to five
    /// sharps use sharps and keys past the tritone use flats. Position 6 is
    /// never reached by a natural tonic and falls to sharps.
    pub fn uses_sharps(&self) -> bool {
        match self.accidental {
            a if a < 0 => false,
            a if a > 0 => true,
            _ => self.tonic_number() <= 6,
        }
    }

    /// Spell the 12 pitch classes (index 0 = C) in this key, using Unicode
    /// accidentals.
    pub fn spell(&self) -> [String; 12] {
        let tonic_number = self.tonic_number();

        let (base, corrections, count): (&[&str; 12], &[(usize, &str)], i32) =
            if self.uses_sharps() {
                // B♯ shares C's position but needs every letter raised.
                let n_sharps = if tonic_number == 0 && self.tonic == 'B' {
                    12
                } else {
                    tonic_number
                };
                (&NOTES_SHARP, &SHARP_CORRECTIONS[..], n_sharps)
            } else {
                let n_flats = (12 - tonic_number).rem_euclid(12);
                (&NOTES_FLAT, &FLAT_CORRECTIONS[..], n_flats)
            };

        let mut notes = base.map(String::from);
        let n_corrections = (count - 5).clamp(0, corrections.len() as i32) as usize;
        for &(index, name) in &corrections[..n_corrections] {
            notes[index] = name.to_string();
        }
        notes
    }

    /// The seven diatonic pitch classes of the key, starting at the tonic.
    pub fn degrees(&self) -> [i32; 7] {
        let pattern = match self.mode {
            Mode::Major => MAJOR_DEGREES,
            Mode::Minor => MINOR_DEGREES,
        };
        let tonic = self.pitch_class();
        pattern.map(|d| (d + tonic).rem_euclid(12))
    }
}

/// Translate Unicode accidentals to their ASCII spelling.
pub(crate) fn to_ascii(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '♯' => out.push('#'),
            '𝄪' => out.push_str("##"),
            '♭' => out.push('b'),
            '𝄫' => out.push_str("bb"),
            _ => out.push(c),
        }
    }
    out
}

fn render(notes: [String; 12], unicode: bool) -> [String; 12] {
    if unicode {
        notes
    } else {
        notes.map(|n| to_ascii(&n))
    }
}

/// List all 12 note names as spelled in a given key.
///
/// # Arguments
/// * `key` - Key signature in format "TONIC:MODE" (e.g., "C:maj", "F#:min")
/// * `unicode` - If true, use Unicode accidentals (♯, ♭, 𝄪, 𝄫); otherwise
///   ASCII (`#`, `b`, `##`, `bb`)
///
/// # Returns
/// 12 note names indexed by pitch class, starting from C
///
/// # Example
/// ```
/// use timefreq::convert::key_to_notes;
///
/// let c_major = key_to_notes("C:maj", true).unwrap();
/// assert_eq!(c_major[1], "C♯");
///
/// let f_major = key_to_notes("F:maj", true).unwrap();
/// assert_eq!(f_major[10], "B♭");
///
/// // Seven sharps: every letter appears once
/// let c_sharp = key_to_notes("C#:maj", false).unwrap();
/// assert_eq!(c_sharp[0], "B#");
/// assert_eq!(c_sharp[5], "E#");
/// ```
pub fn key_to_notes(key: &str, unicode: bool) -> Result<Vec<String>> {
    let key: Key = key.parse()?;
    Ok(render(key.spell(), unicode).to_vec())
}

/// Construct the diatonic scale degrees for a given key.
///
/// # Example
/// ```
/// use timefreq::convert::key_to_degrees;
///
/// assert_eq!(key_to_degrees("C:maj").unwrap(), [0, 2, 4, 5, 7, 9, 11]);
/// assert_eq!(key_to_degrees("A:min").unwrap(), [9, 11, 0, 2, 4, 5, 7]);
/// ```
pub fn key_to_degrees(key: &str) -> Result<[i32; 7]> {
    let key: Key = key.parse()?;
    Ok(key.degrees())
}

/// Memo table for key spellings.
///
/// Spelling a key is cheap but note formatting asks for the same handful of
/// keys over and over. Entries are keyed by the parsed key, so `C:maj` and
/// `C:major` share one entry. The cache is unbounded: there are at most
/// 7 x 3 x 2 x 2 distinct entries.
///
/// # Example
/// ```
/// use timefreq::convert::KeyCache;
///
/// let cache = KeyCache::new();
/// let notes = cache.notes("Eb:maj", true).unwrap();
/// assert_eq!(notes[3], "E♭");
/// cache.notes("Eb:major", true).unwrap();
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct KeyCache {
    entries: RwLock<HashMap<(Key, bool), Arc<[String; 12]>>>,
}

impl KeyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spelling table for `key`, computed on first use.
    pub fn notes(&self, key: &str, unicode: bool) -> Result<Arc<[String; 12]>> {
        let key: Key = key.parse()?;
        Ok(self.notes_for(key, unicode))
    }

    /// Spelling table for an already parsed key.
    pub fn notes_for(&self, key: Key, unicode: bool) -> Arc<[String; 12]> {
        if let Some(notes) = self.entries.read().get(&(key, unicode)) {
            return Arc::clone(notes);
        }

        log::trace!("key spelling cache miss for {key} (unicode={unicode})");
        let notes = Arc::new(render(key.spell(), unicode));
        let mut entries = self.entries.write();
        Arc::clone(entries.entry((key, unicode)).or_insert(notes))
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

static KEY_CACHE: Lazy<KeyCache> = Lazy::new(KeyCache::new);

/// Process-wide spelling cache used by note formatting.
pub fn key_cache() -> &'static KeyCache {
    &KEY_CACHE
}

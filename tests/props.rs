use proptest::prelude::*;
use timefreq::convert::{self, NoteFormat};

const TONICS: [&str; 21] = [
    "C", "C#", "Cb", "D", "D#", "Db", "E", "E#", "Eb", "F", "F#", "Fb", "G", "G#", "Gb", "A",
    "A#", "Ab", "B", "B#", "Bb",
];

// Keys with at most five sharps or flats need no enharmonic respelling, so
// octave numbers survive a round trip through the note name.
const PLAIN_KEYS: [&str; 8] = [
    "C:maj", "G:maj", "D:min", "B:maj", "Db:maj", "F:min", "E:maj", "Bb:min",
];

// Six and seven accidentals, where respelling kicks in.
const CROWDED_KEYS: [&str; 5] = ["F#:maj", "C#:maj", "Gb:maj", "Cb:maj", "D#:min"];

fn key_strategy() -> impl Strategy<Value = String> {
    (
        prop::sample::select(TONICS.to_vec()),
        prop::sample::select(vec!["maj", "min", "major", "minor"]),
    )
        .prop_map(|(tonic, mode)| format!("{tonic}:{mode}"))
}

// Note names drawn from the whole grammar, paired with their pitch class.
// Cents stay clear of the half-semitone so rounding keeps the pitch class.
fn note_strategy() -> impl Strategy<Value = (String, i64)> {
    (
        prop::sample::select(vec![
            ('C', 0),
            ('D', 2),
            ('E', 4),
            ('F', 5),
            ('G', 7),
            ('A', 9),
            ('B', 11),
        ]),
        any::<bool>(),
        prop::collection::vec(
            prop::sample::select(vec![
                ("#", 1),
                ("♯", 1),
                ("𝄪", 2),
                ("b", -1),
                ("!", -1),
                ("♭", -1),
                ("𝄫", -2),
                ("♮", 0),
            ]),
            0..4,
        ),
        prop::option::of((-4i64..10, any::<bool>(), prop::option::of(-49i64..=49))),
    )
        .prop_map(|((letter, offset), lowercase, accidentals, suffix)| {
            let letter = if lowercase { letter.to_ascii_lowercase() } else { letter };
            let mut name = letter.to_string();
            let mut pitch_class: i64 = offset;
            for (glyph, shift) in accidentals {
                name.push_str(glyph);
                pitch_class += shift;
            }
            if let Some((octave, explicit_plus, cents)) = suffix {
                if explicit_plus && octave >= 0 {
                    name.push('+');
                }
                name.push_str(&octave.to_string());
                if let Some(cents) = cents {
                    name.push_str(&format!("{cents:+}"));
                }
            }
            (name, pitch_class.rem_euclid(12))
        })
}

proptest! {
    #[test]
    fn note_strings_keep_pitch_class_through_midi(
        (name, pitch_class) in note_strategy(),
        round_midi in any::<bool>(),
    ) {
        let midi = convert::note_to_midi(&name, round_midi).unwrap();
        let spelled = convert::midi_to_note(midi, &NoteFormat::default()).unwrap();
        let back = convert::note_to_midi(&spelled, true).unwrap() as i64;
        prop_assert_eq!(back.rem_euclid(12), pitch_class, "{} -> {} -> {}", name, midi, spelled);
    }

    #[test]
    fn frames_samples_roundtrip(
        frame in -10_000i64..10_000,
        hop in 1i64..4096,
        n_fft in prop::option::of(1i64..8192),
    ) {
        let samples = convert::frames_to_samples(frame, hop, n_fft);
        prop_assert_eq!(convert::samples_to_frames(samples, hop, n_fft), frame);
    }

    #[test]
    fn samples_to_frames_is_monotone(sample in -100_000i64..100_000, hop in 1i64..2048) {
        let a = convert::samples_to_frames(sample, hop, None);
        let b = convert::samples_to_frames(sample + 1, hop, None);
        prop_assert!(b == a || b == a + 1);
    }

    #[test]
    fn mel_roundtrip(hz in 0.0f64..22050.0, htk in any::<bool>()) {
        let back = convert::mel_to_hz(convert::hz_to_mel(hz, htk), htk);
        prop_assert!((back - hz).abs() <= 1e-9 * hz.max(1.0));
    }

    #[test]
    fn midi_hz_roundtrip(midi in -20.0f64..140.0) {
        let back = convert::hz_to_midi(convert::midi_to_hz(midi));
        prop_assert!((back - midi).abs() < 1e-9);
    }

    #[test]
    fn spelled_names_keep_their_pitch_class(key in key_strategy(), unicode in any::<bool>()) {
        let names = convert::key_to_notes(&key, unicode).unwrap();
        prop_assert_eq!(names.len(), 12);
        for (pitch_class, name) in names.iter().enumerate() {
            let midi = convert::note_to_midi(name, true).unwrap() as i64;
            prop_assert_eq!(midi.rem_euclid(12) as usize, pitch_class, "{} in {}", name, key);
        }
    }

    #[test]
    fn degrees_are_spelled_with_distinct_letters(
        key in prop::sample::select([&PLAIN_KEYS[..], &CROWDED_KEYS[..]].concat()),
    ) {
        let names = convert::key_to_notes(key, false).unwrap();
        let degrees = convert::key_to_degrees(key).unwrap();
        let mut letters: Vec<char> = degrees
            .iter()
            .filter_map(|&d| names[d as usize].chars().next())
            .collect();
        letters.sort_unstable();
        letters.dedup();
        prop_assert_eq!(letters.len(), 7, "{:?}", names);
    }

    #[test]
    fn note_names_roundtrip(midi in 0i64..128, key in prop::sample::select(PLAIN_KEYS.to_vec())) {
        let fmt = NoteFormat::default().with_key(key);
        let name = convert::midi_to_note(midi as f64, &fmt).unwrap();
        prop_assert_eq!(convert::note_to_midi(&name, true).unwrap(), midi as f64);
    }

    #[test]
    fn cents_stay_within_half_a_semitone(midi in 0.0f64..127.0) {
        let fmt = NoteFormat::default().with_cents(true).with_unicode(false);
        let name = convert::midi_to_note(midi, &fmt).unwrap();
        let split = name.rfind(['+', '-']).unwrap();
        let cents: i64 = name[split..].parse().unwrap();
        prop_assert!(cents.abs() <= 50, "{}", name);
    }

    #[test]
    fn tempo_bins_decrease(n_bins in 2usize..512, hop in 1i64..2048) {
        let tempos = convert::tempo_frequencies(n_bins, hop, 22050.0);
        prop_assert!(tempos[0].is_infinite());
        for pair in tempos.windows(2) {
            prop_assert!(pair[1] < pair[0]);
        }
    }
}

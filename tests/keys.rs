use std::sync::Arc;
use std::thread;

use timefreq::convert::{self, key_cache, Key, KeyCache, Mode, NoteFormat};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn circle_of_fifths_spelling() {
    let expected = [
        ("C:maj", "C C♯ D D♯ E F F♯ G G♯ A A♯ B"),
        ("F:maj", "C D♭ D E♭ E F G♭ G A♭ A B♭ B"),
        ("F#:maj", "C C♯ D D♯ E E♯ F♯ G G♯ A A♯ B"),
        ("Gb:maj", "C D♭ D E♭ E F G♭ G A♭ A B♭ C♭"),
        ("C#:maj", "B♯ C♯ D D♯ E E♯ F♯ G G♯ A A♯ B"),
        ("Cb:maj", "C D♭ D E♭ F♭ F G♭ G A♭ A B♭ C♭"),
        ("A:min", "C C♯ D D♯ E F F♯ G G♯ A A♯ B"),
        ("D:min", "C D♭ D E♭ E F G♭ G A♭ A B♭ B"),
    ];
    for (key, names) in expected {
        let notes = convert::key_to_notes(key, true).unwrap();
        assert_eq!(notes.join(" "), names, "{key}");
    }
}

#[test]
fn explicit_accidental_overrides_circle_position() {
    // G♭ and F♯ sit on the same pitch class but spell differently.
    let flat = convert::key_to_notes("Gb:maj", false).unwrap();
    let sharp = convert::key_to_notes("F#:maj", false).unwrap();
    assert_eq!(flat[6], "Gb");
    assert_eq!(sharp[6], "F#");
}

#[test]
fn key_display_is_canonical() {
    init_logging();
    assert!("H:maj".parse::<Key>().is_err());
    for (input, shown) in [("c:major", "C:maj"), ("f#:minor", "F♯:min"), ("E!:maj", "E♭:maj")] {
        let key: Key = input.parse().unwrap();
        assert_eq!(key.to_string(), shown);
        assert_eq!(key.to_string().parse::<Key>().unwrap(), key);
    }
    let key: Key = "a:min".parse().unwrap();
    assert_eq!(key.mode(), Mode::Minor);
}

#[test]
fn midi_to_note_follows_key() {
    let fmt = NoteFormat::default().with_key("Eb:maj").with_unicode(false);
    let names = convert::midi_to_notes(&[63.0, 68.0, 70.0], &fmt).unwrap();
    assert_eq!(names, vec!["Eb4", "Ab4", "Bb4"]);

    let fmt = NoteFormat::default().with_key("C#:maj").with_octave(false);
    assert_eq!(convert::midi_to_note(60.0, &fmt).unwrap(), "B♯");
}

#[test]
fn cache_is_shared_across_threads() {
    init_logging();
    let cache = Arc::new(KeyCache::new());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                let key = if i % 2 == 0 { "A:min" } else { "A:minor" };
                cache.notes(key, true).unwrap()
            })
        })
        .collect();

    let tables: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(cache.len(), 1);
    assert!(tables.iter().all(|t| t[..] == tables[0][..]));

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn global_cache_serves_note_formatting() {
    let fmt = NoteFormat::default().with_key("Ab:min");
    convert::midi_to_note(59.0, &fmt).unwrap();
    let notes = key_cache().notes("Ab:min", true).unwrap();
    assert_eq!(notes[11], "C♭");
}

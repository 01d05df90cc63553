use approx::assert_abs_diff_eq;
use ndarray::array;
use timefreq::convert::{self, NoteFormat};
use timefreq::Error;

#[test]
fn convert_hz_to_midi() {
    // A4 = 440 Hz = MIDI note 69
    assert_eq!(convert::hz_to_midi(440.0), 69.0);
    let midi = convert::hz_to_midi_array(&array![440.0, 27.5]);
    assert_eq!(midi[0], 69.0);
    assert_abs_diff_eq!(midi[1], 21.0, epsilon = 1e-12);
}

#[test]
fn convert_midi_to_hz() {
    assert_eq!(convert::midi_to_hz(69.0), 440.0);
    assert_abs_diff_eq!(convert::midi_to_hz(60.0), 261.6255653, epsilon = 1e-6);
}

#[test]
fn convert_note_to_midi() {
    assert_eq!(convert::note_to_midi("A4", true).unwrap(), 69.0);
    assert_eq!(convert::note_to_midi("C4", true).unwrap(), 60.0);

    let midi = convert::notes_to_midi(vec!["C1".to_string(), "E1".into(), "G1".into()], true).unwrap();
    assert_eq!(midi.to_vec(), vec![24.0, 28.0, 31.0]);
}

#[test]
fn convert_note_to_hz() {
    assert_abs_diff_eq!(convert::note_to_hz("A4", true).unwrap(), 440.0, epsilon = 1e-9);
    let hz = convert::notes_to_hz(["A3", "A5"], true).unwrap();
    assert_abs_diff_eq!(hz[0], 220.0, epsilon = 1e-9);
    assert_abs_diff_eq!(hz[1], 880.0, epsilon = 1e-9);
}

#[test]
fn convert_midi_to_note() {
    let fmt = NoteFormat::default();
    assert_eq!(convert::midi_to_note(69.0, &fmt).unwrap(), "A4");
    assert_eq!(convert::midi_to_note(60.0, &fmt).unwrap(), "C4");

    let names = convert::midi_to_notes(&[0.0, 1.0, 2.0], &fmt.clone().with_unicode(false)).unwrap();
    assert_eq!(names, vec!["C-1", "C#-1", "D-1"]);
}

#[test]
fn convert_hz_to_note() {
    let fmt = NoteFormat::default().with_cents(true);
    assert_eq!(convert::hz_to_note(440.0, &fmt).unwrap(), "A4+0");
    let names = convert::hz_to_notes(&[32.0, 64.0], &fmt.with_unicode(false)).unwrap();
    assert_eq!(names, vec!["C1-38", "C2-38"]);
}

#[test]
fn convert_parameter_errors() {
    assert!(matches!(
        convert::note_to_midi("H4", true),
        Err(Error::InvalidParameter { .. })
    ));
    assert!(matches!(
        convert::key_to_notes("X:maj", true),
        Err(Error::InvalidParameter { .. })
    ));
    let fmt = NoteFormat::default().with_octave(false).with_cents(true);
    assert!(matches!(
        convert::midi_to_note(60.0, &fmt),
        Err(Error::InvalidParameter { .. })
    ));
}

#[test]
fn convert_error_messages() {
    let err = convert::note_to_midi("H4", true).unwrap_err();
    assert!(err.to_string().contains("H4"));

    let err = convert::frequency_weighting(&array![1.0], Some("Q"), None).unwrap_err();
    assert!(err.to_string().contains("`Q`"));
}

#[test]
fn convert_times_like() {
    let result = convert::times_like(100, 22050.0, 512, None);
    assert_eq!(result.len(), 100);
    assert_abs_diff_eq!(result[99], 99.0 * 512.0 / 22050.0, epsilon = 1e-12);
}

#[test]
fn convert_a_weighting_near_zero_at_1khz() {
    let w = convert::a_weighting(&array![1000.0], Some(convert::DEFAULT_MIN_DB));
    assert_abs_diff_eq!(w[0], 0.0, epsilon = 1e-3);
}

#[test]
fn convert_tempo_first_bin_is_infinite() {
    for n in [1, 2, 384] {
        assert_eq!(convert::tempo_frequencies(n, 512, 22050.0)[0], f64::INFINITY);
    }
}

#[test]
fn convert_frames_roundtrip_with_offset_loses_nothing_for_centered_frames() {
    let frames = array![0i64, 1, 2, 50, 1000];
    let samples = convert::frames_to_samples_array(&frames, 256, Some(1024));
    let back = convert::samples_to_frames_array(&samples, 256, Some(1024));
    assert_eq!(back, frames);
}

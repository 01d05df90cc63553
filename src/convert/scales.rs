use ndarray::{Array, ArrayBase, Data, Dimension};

use super::A4_HZ;

// Slaney mel scale: linear below 1 kHz, logarithmic above.
const F_MIN: f64 = 0.0;
const F_SP: f64 = 200.0 / 3.0;
const MIN_LOG_HZ: f64 = 1000.0;
const MIN_LOG_MEL: f64 = (MIN_LOG_HZ - F_MIN) / F_SP;

fn logstep() -> f64 {
    6.4_f64.ln() / 27.0
}

/// Convert a frequency (Hz) to mels.
///
/// # Arguments
/// * `frequency` - Input frequency in Hz
/// * `htk` - If true, use the HTK formula; otherwise the Slaney formula
///
/// # Example
/// ```
/// use timefreq::convert::hz_to_mel;
///
/// assert!((hz_to_mel(60.0, false) - 0.9).abs() < 1e-12);
/// assert!((hz_to_mel(1000.0, false) - 15.0).abs() < 1e-12);
/// assert!((hz_to_mel(60.0, true) - 92.6661).abs() < 1e-3);
/// ```
pub fn hz_to_mel(frequency: f64, htk: bool) -> f64 {
    if htk {
        return 2595.0 * (1.0 + frequency / 700.0).log10();
    }
    if frequency >= MIN_LOG_HZ {
        MIN_LOG_MEL + (frequency / MIN_LOG_HZ).ln() / logstep()
    } else {
        (frequency - F_MIN) / F_SP
    }
}

/// Convert frequencies (Hz) to mels, element-wise.
pub fn hz_to_mel_array<S, D>(frequencies: &ArrayBase<S, D>, htk: bool) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    frequencies.mapv(|f| hz_to_mel(f, htk))
}

/// Convert mels to a frequency (Hz).
///
/// # Example
/// ```
/// use timefreq::convert::{hz_to_mel, mel_to_hz};
///
/// assert!((mel_to_hz(3.0, false) - 200.0).abs() < 1e-9);
/// let back = mel_to_hz(hz_to_mel(4000.0, false), false);
/// assert!((back - 4000.0).abs() < 1e-6);
/// ```
pub fn mel_to_hz(mel: f64, htk: bool) -> f64 {
    if htk {
        return 700.0 * (10.0_f64.powf(mel / 2595.0) - 1.0);
    }
    if mel >= MIN_LOG_MEL {
        MIN_LOG_HZ * (logstep() * (mel - MIN_LOG_MEL)).exp()
    } else {
        F_MIN + F_SP * mel
    }
}

/// Convert mels to frequencies (Hz), element-wise.
pub fn mel_to_hz_array<S, D>(mels: &ArrayBase<S, D>, htk: bool) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    mels.mapv(|m| mel_to_hz(m, htk))
}

/// Reference A4 frequency after applying a tuning offset.
fn tuned_a4(tuning: f64, bins_per_octave: u32) -> f64 {
    A4_HZ * 2.0_f64.powf(tuning / bins_per_octave as f64)
}

/// Convert a frequency (Hz) to (fractional) octave number.
///
/// Octave numbers count from A0 (A4/16), so A440 sits at octave 4.
///
/// # Arguments
/// * `frequency` - Input frequency in Hz
/// * `tuning` - Tuning deviation from A440 in fractional bins
/// * `bins_per_octave` - Number of bins per octave
///
/// # Example
/// ```
/// use timefreq::convert::hz_to_octs;
///
/// assert!((hz_to_octs(440.0, 0.0, 12) - 4.0).abs() < 1e-12);
/// assert!((hz_to_octs(880.0, 0.0, 12) - 5.0).abs() < 1e-12);
/// ```
pub fn hz_to_octs(frequency: f64, tuning: f64, bins_per_octave: u32) -> f64 {
    (frequency / (tuned_a4(tuning, bins_per_octave) / 16.0)).log2()
}

/// Convert frequencies (Hz) to octave numbers, element-wise.
pub fn hz_to_octs_array<S, D>(
    frequencies: &ArrayBase<S, D>,
    tuning: f64,
    bins_per_octave: u32,
) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    frequencies.mapv(|f| hz_to_octs(f, tuning, bins_per_octave))
}

/// Convert an octave number to frequency (Hz).
///
/// # Example
/// ```
/// use timefreq::convert::octs_to_hz;
///
/// assert!((octs_to_hz(1.0, 0.0, 12) - 55.0).abs() < 1e-12);
/// ```
pub fn octs_to_hz(octs: f64, tuning: f64, bins_per_octave: u32) -> f64 {
    tuned_a4(tuning, bins_per_octave) / 16.0 * 2.0_f64.powf(octs)
}

/// Convert octave numbers to frequencies (Hz), element-wise.
pub fn octs_to_hz_array<S, D>(octs: &ArrayBase<S, D>, tuning: f64, bins_per_octave: u32) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    octs.mapv(|o| octs_to_hz(o, tuning, bins_per_octave))
}

/// Convert a reference A4 frequency to a tuning deviation from A440.
///
/// # Arguments
/// * `a4` - Reference frequency of A4 in Hz
/// * `bins_per_octave` - Number of bins per octave
///
/// # Returns
/// Tuning deviation in fractional bins
///
/// # Example
/// ```
/// use timefreq::convert::a4_to_tuning;
///
/// assert!(a4_to_tuning(440.0, 12).abs() < 1e-12);
/// assert!((a4_to_tuning(432.0, 12) + 0.3177).abs() < 1e-3);
/// assert!((a4_to_tuning(432.0, 24) + 0.6354).abs() < 1e-3);
/// ```
pub fn a4_to_tuning(a4: f64, bins_per_octave: u32) -> f64 {
    bins_per_octave as f64 * (a4.log2() - A4_HZ.log2())
}

/// Convert reference A4 frequencies to tuning deviations, element-wise.
pub fn a4_to_tuning_array<S, D>(a4: &ArrayBase<S, D>, bins_per_octave: u32) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    a4.mapv(|a| a4_to_tuning(a, bins_per_octave))
}

/// Convert a tuning deviation to the reference A4 frequency.
///
/// # Example
/// ```
/// use timefreq::convert::tuning_to_a4;
///
/// assert!((tuning_to_a4(0.0, 12) - 440.0).abs() < 1e-12);
/// assert!((tuning_to_a4(-0.318, 12) - 431.992).abs() < 1e-2);
/// ```
pub fn tuning_to_a4(tuning: f64, bins_per_octave: u32) -> f64 {
    tuned_a4(tuning, bins_per_octave)
}

/// Convert tuning deviations to reference A4 frequencies, element-wise.
pub fn tuning_to_a4_array<S, D>(tuning: &ArrayBase<S, D>, bins_per_octave: u32) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    tuning.mapv(|t| tuning_to_a4(t, bins_per_octave))
}

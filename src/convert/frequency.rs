use ndarray::Array1;

use super::{hz_to_mel, mel_to_hz};

/// `n` evenly spaced points over `[start, stop]`, endpoint included.
fn linspace(start: f64, stop: f64, n: usize) -> Array1<f64> {
    if n == 1 {
        return Array1::from_elem(1, start);
    }
    let step = (stop - start) / (n.saturating_sub(1)) as f64;
    let mut values = Array1::from_shape_fn(n, |i| start + i as f64 * step);
    if let Some(last) = values.last_mut() {
        *last = stop;
    }
    values
}

/// Get FFT bin frequencies.
///
/// # Arguments
/// * `sr` - Sample rate in Hz
/// * `n_fft` - FFT size
///
/// # Returns
/// `1 + n_fft / 2` frequencies (Hz) from 0 to `sr / 2` inclusive
///
/// # Example
/// ```
/// use timefreq::convert::fft_frequencies;
///
/// let freqs = fft_frequencies(22050.0, 2048);
/// assert_eq!(freqs.len(), 1025);
/// assert_eq!(freqs[0], 0.0);
/// assert_eq!(freqs[1024], 11025.0);
/// ```
pub fn fft_frequencies(sr: f64, n_fft: usize) -> Array1<f64> {
    linspace(0.0, sr / 2.0, 1 + n_fft / 2)
}

/// Compute the center frequencies of Constant-Q bins.
///
/// # Arguments
/// * `n_bins` - Number of CQ bins
/// * `fmin` - Minimum frequency in Hz
/// * `bins_per_octave` - Number of bins per octave
/// * `tuning` - Deviation from A440 tuning in fractional bins
///
/// # Example
/// ```
/// use timefreq::convert::cqt_frequencies;
///
/// // 24 semitones starting at C2 (~65 Hz)
/// let freqs = cqt_frequencies(24, 65.406, 12, 0.0);
/// assert_eq!(freqs.len(), 24);
/// assert!((freqs[0] - 65.406).abs() < 1e-9);
/// assert!((freqs[12] - 130.812).abs() < 1e-9); // One octave up
/// ```
pub fn cqt_frequencies(n_bins: usize, fmin: f64, bins_per_octave: u32, tuning: f64) -> Array1<f64> {
    let bpo = bins_per_octave as f64;
    let correction = 2.0_f64.powf(tuning / bpo);
    Array1::from_shape_fn(n_bins, |i| correction * fmin * 2.0_f64.powf(i as f64 / bpo))
}

/// Get mel-spaced frequencies.
///
/// # Arguments
/// * `n_mels` - Number of mel bins
/// * `fmin` - Minimum frequency (Hz)
/// * `fmax` - Maximum frequency (Hz)
/// * `htk` - Use the HTK mel formula instead of Slaney
///
/// # Returns
/// `n_mels` frequencies (Hz) spaced uniformly on the mel scale
///
/// # Example
/// ```
/// use timefreq::convert::mel_frequencies;
///
/// let freqs = mel_frequencies(128, 0.0, 8000.0, false);
/// assert_eq!(freqs.len(), 128);
/// assert_eq!(freqs[0], 0.0);
/// assert!((freqs[127] - 8000.0).abs() < 1e-6);
/// ```
pub fn mel_frequencies(n_mels: usize, fmin: f64, fmax: f64, htk: bool) -> Array1<f64> {
    let mel_min = hz_to_mel(fmin, htk);
    let mel_max = hz_to_mel(fmax, htk);
    linspace(mel_min, mel_max, n_mels).mapv(|m| mel_to_hz(m, htk))
}

/// Compute the tempo (BPM) of each autocorrelation tempogram bin.
///
/// Bin `k` corresponds to a lag of `k` frames, so bin 0 is infinite.
///
/// # Arguments
/// * `n_bins` - Number of lag bins
/// * `hop_length` - Number of samples between frames
/// * `sr` - Sample rate
///
/// # Example
/// ```
/// use timefreq::convert::tempo_frequencies;
///
/// let tempos = tempo_frequencies(384, 512, 22050.0);
/// assert_eq!(tempos.len(), 384);
/// assert!(tempos[0].is_infinite());
/// assert!((tempos[1] - 2583.984375).abs() < 1e-9);
/// ```
pub fn tempo_frequencies(n_bins: usize, hop_length: i64, sr: f64) -> Array1<f64> {
    Array1::from_shape_fn(n_bins, |k| {
        if k == 0 {
            f64::INFINITY
        } else {
            60.0 * sr / (hop_length as f64 * k as f64)
        }
    })
}

/// Compute the tempo (BPM) of each Fourier tempogram bin.
///
/// # Arguments
/// * `sr` - Sample rate
/// * `win_length` - Tempogram window length (in frames)
/// * `hop_length` - Number of samples between frames
///
/// # Example
/// ```
/// use timefreq::convert::fourier_tempo_frequencies;
///
/// let tempos = fourier_tempo_frequencies(22050.0, 384, 512);
/// assert_eq!(tempos.len(), 193);
/// assert_eq!(tempos[0], 0.0);
/// ```
pub fn fourier_tempo_frequencies(sr: f64, win_length: usize, hop_length: i64) -> Array1<f64> {
    fft_frequencies(sr * 60.0 / hop_length as f64, win_length)
}

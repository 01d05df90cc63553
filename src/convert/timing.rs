use ndarray::{Array, Array1, ArrayBase, Data, Dimension};
use num_traits::AsPrimitive;

use super::{DEFAULT_HOP_LENGTH, DEFAULT_SR};
use crate::{Error, Result};

fn fft_offset(n_fft: Option<i64>) -> f64 {
    n_fft.map_or(0.0, |n| n.div_euclid(2) as f64)
}

/// Convert a frame index to a sample index.
///
/// Frames may be fractional. The sample position is computed in floating
/// point and truncated toward zero once at the end.
///
/// # Arguments
/// * `frame` - Frame index (integer or float)
/// * `hop_length` - Number of samples between successive frames
/// * `n_fft` - Optional FFT window length. If given, an offset of
///   `n_fft / 2` is added to counteract windowing effects of a
///   non-centered STFT.
///
/// # Example
/// ```
/// use timefreq::convert::frames_to_samples;
///
/// assert_eq!(frames_to_samples(3, 512, None), 1536);
/// assert_eq!(frames_to_samples(3, 512, Some(2048)), 2560);
/// assert_eq!(frames_to_samples(2.5, 512, None), 1280);
/// ```
pub fn frames_to_samples<T>(frame: T, hop_length: i64, n_fft: Option<i64>) -> i64
where
    T: AsPrimitive<f64>,
{
    (frame.as_() * hop_length as f64 + fft_offset(n_fft)) as i64
}

/// Convert frame indices to sample indices, element-wise.
pub fn frames_to_samples_array<A, S, D>(
    frames: &ArrayBase<S, D>,
    hop_length: i64,
    n_fft: Option<i64>,
) -> Array<i64, D>
where
    A: AsPrimitive<f64>,
    S: Data<Elem = A>,
    D: Dimension,
{
    frames.mapv(|f| frames_to_samples(f, hop_length, n_fft))
}

/// Convert a sample index to the frame containing it.
///
/// `frame = floor((sample - n_fft / 2) / hop_length)`. With an FFT offset the
/// result may be negative. A zero `hop_length` gives frame 0.
///
/// # Example
/// ```
/// use timefreq::convert::samples_to_frames;
///
/// assert_eq!(samples_to_frames(1535, 512, None), 2);
/// assert_eq!(samples_to_frames(0, 512, Some(2048)), -2);
/// assert_eq!(samples_to_frames(1023.5, 512, None), 1);
/// ```
pub fn samples_to_frames<T>(sample: T, hop_length: i64, n_fft: Option<i64>) -> i64
where
    T: AsPrimitive<f64>,
{
    if hop_length == 0 {
        return 0;
    }
    ((sample.as_() - fft_offset(n_fft)) / hop_length as f64).floor() as i64
}

/// Convert sample indices to frame indices, element-wise.
pub fn samples_to_frames_array<A, S, D>(
    samples: &ArrayBase<S, D>,
    hop_length: i64,
    n_fft: Option<i64>,
) -> Array<i64, D>
where
    A: AsPrimitive<f64>,
    S: Data<Elem = A>,
    D: Dimension,
{
    samples.mapv(|s| samples_to_frames(s, hop_length, n_fft))
}

/// Convert a frame index to time (seconds).
///
/// The time is that of the (truncated) sample index of the frame.
///
/// # Example
/// ```
/// use timefreq::convert::frames_to_time;
///
/// let t = frames_to_time(10, 22050.0, 512, None);
/// assert!((t - 0.232).abs() < 1e-3);
/// assert_eq!(frames_to_time(2.5, 22050.0, 512, None), 1280.0 / 22050.0);
/// ```
pub fn frames_to_time<T>(frame: T, sr: f64, hop_length: i64, n_fft: Option<i64>) -> f64
where
    T: AsPrimitive<f64>,
{
    samples_to_time(frames_to_samples(frame, hop_length, n_fft), sr)
}

/// Convert frame indices to time (seconds), element-wise.
pub fn frames_to_time_array<A, S, D>(
    frames: &ArrayBase<S, D>,
    sr: f64,
    hop_length: i64,
    n_fft: Option<i64>,
) -> Array<f64, D>
where
    A: AsPrimitive<f64>,
    S: Data<Elem = A>,
    D: Dimension,
{
    frames.mapv(|f| frames_to_time(f, sr, hop_length, n_fft))
}

/// Convert time (seconds) to a frame index.
pub fn time_to_frames(time: f64, sr: f64, hop_length: i64, n_fft: Option<i64>) -> i64 {
    samples_to_frames(time_to_samples(time, sr), hop_length, n_fft)
}

/// Convert times (seconds) to frame indices, element-wise.
pub fn time_to_frames_array<S, D>(
    times: &ArrayBase<S, D>,
    sr: f64,
    hop_length: i64,
    n_fft: Option<i64>,
) -> Array<i64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    times.mapv(|t| time_to_frames(t, sr, hop_length, n_fft))
}

/// Convert time (seconds) to a sample index, truncating toward zero.
pub fn time_to_samples(time: f64, sr: f64) -> i64 {
    (time * sr) as i64
}

/// Convert times (seconds) to sample indices, element-wise.
pub fn time_to_samples_array<S, D>(times: &ArrayBase<S, D>, sr: f64) -> Array<i64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    times.mapv(|t| time_to_samples(t, sr))
}

/// Convert a sample index to time (seconds). Fractional samples keep
/// their fraction.
///
/// # Example
/// ```
/// use timefreq::convert::samples_to_time;
///
/// assert_eq!(samples_to_time(22050, 22050.0), 1.0);
/// assert_eq!(samples_to_time(1000.5, 1000.0), 1.0005);
/// ```
pub fn samples_to_time<T>(sample: T, sr: f64) -> f64
where
    T: AsPrimitive<f64>,
{
    sample.as_() / sr
}

/// Convert sample indices to time (seconds), element-wise.
pub fn samples_to_time_array<A, S, D>(samples: &ArrayBase<S, D>, sr: f64) -> Array<f64, D>
where
    A: AsPrimitive<f64>,
    S: Data<Elem = A>,
    D: Dimension,
{
    samples.mapv(|s| samples_to_time(s, sr))
}

/// Convert a block index to the index of the first frame in that block.
///
/// # Arguments
/// * `block` - Block index
/// * `block_length` - Number of frames per block
///
/// # Example
/// ```
/// use timefreq::convert::blocks_to_frames;
///
/// assert_eq!(blocks_to_frames(2, 16), 32);
/// ```
pub fn blocks_to_frames(block: i64, block_length: i64) -> i64 {
    block.wrapping_mul(block_length)
}

/// Convert block indices to frame indices, element-wise.
pub fn blocks_to_frames_array<S, D>(blocks: &ArrayBase<S, D>, block_length: i64) -> Array<i64, D>
where
    S: Data<Elem = i64>,
    D: Dimension,
{
    blocks.mapv(|b| blocks_to_frames(b, block_length))
}

/// Convert a block index to the index of the first sample in that block.
///
/// Blocks are not centered, so no FFT offset is applied.
///
/// # Example
/// ```
/// use timefreq::convert::blocks_to_samples;
///
/// assert_eq!(blocks_to_samples(1, 16, 512), 8192);
/// ```
pub fn blocks_to_samples(block: i64, block_length: i64, hop_length: i64) -> i64 {
    frames_to_samples(blocks_to_frames(block, block_length), hop_length, None)
}

/// Convert block indices to sample indices, element-wise.
pub fn blocks_to_samples_array<S, D>(
    blocks: &ArrayBase<S, D>,
    block_length: i64,
    hop_length: i64,
) -> Array<i64, D>
where
    S: Data<Elem = i64>,
    D: Dimension,
{
    blocks.mapv(|b| blocks_to_samples(b, block_length, hop_length))
}

/// Convert a block index to the time (seconds) of its first sample.
///
/// # Example
/// ```
/// use timefreq::convert::blocks_to_time;
///
/// let t = blocks_to_time(1, 16, 512, 22050.0);
/// assert!((t - 0.3715).abs() < 1e-3);
/// ```
pub fn blocks_to_time(block: i64, block_length: i64, hop_length: i64, sr: f64) -> f64 {
    samples_to_time(blocks_to_samples(block, block_length, hop_length), sr)
}

/// Convert block indices to time (seconds), element-wise.
pub fn blocks_to_time_array<S, D>(
    blocks: &ArrayBase<S, D>,
    block_length: i64,
    hop_length: i64,
    sr: f64,
) -> Array<f64, D>
where
    S: Data<Elem = i64>,
    D: Dimension,
{
    blocks.mapv(|b| blocks_to_time(b, block_length, hop_length, sr))
}

/// Sample index of each of `n_frames` consecutive frames starting at 0.
///
/// # Example
/// ```
/// use timefreq::convert::samples_like;
///
/// let samples = samples_like(4, 512, None);
/// assert_eq!(samples.to_vec(), vec![0, 512, 1024, 1536]);
/// ```
pub fn samples_like(n_frames: usize, hop_length: i64, n_fft: Option<i64>) -> Array1<i64> {
    Array1::from_iter((0..n_frames as i64).map(|f| frames_to_samples(f, hop_length, n_fft)))
}

/// Time (seconds) of each of `n_frames` consecutive frames starting at 0.
///
/// # Example
/// ```
/// use timefreq::convert::times_like;
///
/// let times = times_like(100, 22050.0, 512, None);
/// assert_eq!(times.len(), 100);
/// assert_eq!(times[0], 0.0);
/// ```
pub fn times_like(n_frames: usize, sr: f64, hop_length: i64, n_fft: Option<i64>) -> Array1<f64> {
    samples_like(n_frames, hop_length, n_fft).mapv(|s| samples_to_time(s, sr))
}

/// Resolve a possibly negative axis against `ndim`.
fn resolve_axis(axis: isize, ndim: usize) -> Result<usize> {
    let resolved = if axis < 0 {
        axis + ndim as isize
    } else {
        axis
    };
    if resolved < 0 || resolved as usize >= ndim {
        return Err(Error::invalid(
            "axis",
            axis,
            format!("out of range for an array with {ndim} dimension(s)"),
        ));
    }
    Ok(resolved as usize)
}

/// Sample indices for the frames along `axis` of a feature array.
///
/// The frame count is `x.shape()[axis]`; negative axes count from the end,
/// so `-1` selects the last (time) axis.
///
/// # Example
/// ```
/// use ndarray::Array2;
/// use timefreq::convert::samples_like_array;
///
/// let mel_spec = Array2::<f32>::zeros((128, 40));
/// let samples = samples_like_array(&mel_spec, 512, None, -1).unwrap();
/// assert_eq!(samples.len(), 40);
/// ```
pub fn samples_like_array<A, S, D>(
    x: &ArrayBase<S, D>,
    hop_length: i64,
    n_fft: Option<i64>,
    axis: isize,
) -> Result<Array1<i64>>
where
    S: Data<Elem = A>,
    D: Dimension,
{
    let axis = resolve_axis(axis, x.ndim())?;
    Ok(samples_like(x.shape()[axis], hop_length, n_fft))
}

/// Times (seconds) for the frames along `axis` of a feature array.
pub fn times_like_array<A, S, D>(
    x: &ArrayBase<S, D>,
    sr: f64,
    hop_length: i64,
    n_fft: Option<i64>,
    axis: isize,
) -> Result<Array1<f64>>
where
    S: Data<Elem = A>,
    D: Dimension,
{
    let samples = samples_like_array(x, hop_length, n_fft, axis)?;
    Ok(samples_to_time_array(&samples, sr))
}

/// Shared framing parameters for time/frame/sample conversions.
///
/// # Example
/// ```
/// use timefreq::convert::FrameConfig;
///
/// let cfg = FrameConfig::new(44100.0).with_hop_length(1024);
/// assert_eq!(cfg.frames_to_samples(2), 2048);
/// assert_eq!(cfg.samples_to_frames(2047), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameConfig {
    /// Sample rate in Hz
    pub sr: f64,
    /// Number of samples between successive frames
    pub hop_length: i64,
    /// Optional FFT window length used to offset non-centered frames
    pub n_fft: Option<i64>,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            sr: DEFAULT_SR,
            hop_length: DEFAULT_HOP_LENGTH,
            n_fft: None,
        }
    }
}

impl FrameConfig {
    /// Create a configuration for the given sample rate with default hop.
    pub fn new(sr: f64) -> Self {
        Self {
            sr,
            ..Self::default()
        }
    }

    /// Set the hop length.
    pub fn with_hop_length(mut self, hop_length: i64) -> Self {
        self.hop_length = hop_length;
        self
    }

    /// Set the FFT window length used for the frame offset.
    pub fn with_n_fft(mut self, n_fft: Option<i64>) -> Self {
        self.n_fft = n_fft;
        self
    }

    pub fn frames_to_samples<T: AsPrimitive<f64>>(&self, frame: T) -> i64 {
        frames_to_samples(frame, self.hop_length, self.n_fft)
    }

    pub fn samples_to_frames<T: AsPrimitive<f64>>(&self, sample: T) -> i64 {
        samples_to_frames(sample, self.hop_length, self.n_fft)
    }

    pub fn frames_to_time<T: AsPrimitive<f64>>(&self, frame: T) -> f64 {
        frames_to_time(frame, self.sr, self.hop_length, self.n_fft)
    }

    pub fn samples_to_time<T: AsPrimitive<f64>>(&self, sample: T) -> f64 {
        samples_to_time(sample, self.sr)
    }

    pub fn time_to_frames(&self, time: f64) -> i64 {
        time_to_frames(time, self.sr, self.hop_length, self.n_fft)
    }

    pub fn samples_like(&self, n_frames: usize) -> Array1<i64> {
        samples_like(n_frames, self.hop_length, self.n_fft)
    }

    pub fn times_like(&self, n_frames: usize) -> Array1<f64> {
        times_like(n_frames, self.sr, self.hop_length, self.n_fft)
    }
}

use std::fmt;
use std::str::FromStr;

use ndarray::{Array, ArrayBase, Axis, Data, Dimension, RemoveAxis};

use super::DEFAULT_MIN_DB;
use crate::{Error, Result};

/// Standard frequency weighting curves.
///
/// # Example
/// ```
/// use timefreq::convert::WeightingKind;
///
/// assert_eq!("a".parse::<WeightingKind>().unwrap(), WeightingKind::A);
/// assert_eq!(WeightingKind::from_key(None).unwrap(), WeightingKind::Z);
/// assert!("Q".parse::<WeightingKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeightingKind {
    /// Loudness at low levels (IEC 61672)
    A,
    /// Loudness at medium levels
    B,
    /// Loudness at high levels
    C,
    /// Aircraft noise (IEC 537)
    D,
    /// Flat, unweighted reference
    Z,
}

impl WeightingKind {
    /// Look up a weighting by key; a missing key selects [`WeightingKind::Z`].
    pub fn from_key(kind: Option<&str>) -> Result<Self> {
        kind.map_or(Ok(WeightingKind::Z), str::parse)
    }

    /// Floor used when none is chosen: [`DEFAULT_MIN_DB`] for A-D, none
    /// for Z.
    ///
    /// # Example
    /// ```
    /// use timefreq::convert::{WeightingKind, DEFAULT_MIN_DB};
    ///
    /// assert_eq!(WeightingKind::C.default_min_db(), Some(DEFAULT_MIN_DB));
    /// assert_eq!(WeightingKind::Z.default_min_db(), None);
    /// ```
    pub fn default_min_db(self) -> Option<f64> {
        match self {
            WeightingKind::Z => None,
            _ => Some(DEFAULT_MIN_DB),
        }
    }

    /// Weighting curve over `frequencies` with this kind's default floor.
    ///
    /// # Example
    /// ```
    /// use ndarray::array;
    /// use timefreq::convert::WeightingKind;
    ///
    /// let weights = WeightingKind::A.curve(&array![0.0, 1000.0]);
    /// assert_eq!(weights[0], -80.0);
    /// ```
    pub fn curve<S, D>(self, frequencies: &ArrayBase<S, D>) -> Array<f64, D>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        weigh(self, frequencies, self.default_min_db())
    }

    /// Weight in dB of a single frequency, before any `min_db` floor.
    pub fn weight(self, frequency: f64) -> f64 {
        let f_sq = frequency * frequency;
        match self {
            WeightingKind::A => a_weight(f_sq),
            WeightingKind::B => b_weight(f_sq),
            WeightingKind::C => c_weight(f_sq),
            WeightingKind::D => d_weight(f_sq),
            WeightingKind::Z => 0.0,
        }
    }
}

impl TryFrom<char> for WeightingKind {
    type Error = Error;

    fn try_from(c: char) -> Result<Self> {
        match c.to_ascii_uppercase() {
            'A' => Ok(WeightingKind::A),
            'B' => Ok(WeightingKind::B),
            'C' => Ok(WeightingKind::C),
            'D' => Ok(WeightingKind::D),
            'Z' => Ok(WeightingKind::Z),
            _ => Err(Error::UnknownWeighting { kind: c.to_string() }),
        }
    }
}

impl FromStr for WeightingKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => WeightingKind::try_from(c),
            _ => Err(Error::UnknownWeighting { kind: s.to_string() }),
        }
    }
}

impl fmt::Display for WeightingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            WeightingKind::A => 'A',
            WeightingKind::B => 'B',
            WeightingKind::C => 'C',
            WeightingKind::D => 'D',
            WeightingKind::Z => 'Z',
        };
        write!(f, "{c}")
    }
}

fn a_weight(f_sq: f64) -> f64 {
    let c = [12200.0_f64.powi(2), 20.6_f64.powi(2), 107.7_f64.powi(2), 737.9_f64.powi(2)];
    2.0 + 20.0
        * (c[0].log10() + 2.0 * f_sq.log10()
            - (f_sq + c[0]).log10()
            - (f_sq + c[1]).log10()
            - 0.5 * (f_sq + c[2]).log10()
            - 0.5 * (f_sq + c[3]).log10())
}

fn b_weight(f_sq: f64) -> f64 {
    let c = [12194.0_f64.powi(2), 20.6_f64.powi(2), 158.5_f64.powi(2)];
    0.17 + 20.0
        * (c[0].log10() + 1.5 * f_sq.log10()
            - (f_sq + c[0]).log10()
            - (f_sq + c[1]).log10()
            - 0.5 * (f_sq + c[2]).log10())
}

fn c_weight(f_sq: f64) -> f64 {
    let c = [12194.0_f64.powi(2), 20.6_f64.powi(2)];
    0.062 + 20.0 * (c[0].log10() + f_sq.log10() - (f_sq + c[0]).log10() - (f_sq + c[1]).log10())
}

fn d_weight(f_sq: f64) -> f64 {
    let c = [
        0.0083046305_f64.powi(2),
        1018.7_f64.powi(2),
        1039.6_f64.powi(2),
        3136.5_f64.powi(2),
        3424.0_f64.powi(2),
        282.7_f64.powi(2),
        1160.0_f64.powi(2),
    ];
    20.0 * (0.5 * f_sq.log10() - c[0].log10()
        + 0.5
            * (((c[1] - f_sq).powi(2) + c[2] * f_sq).log10()
                - ((c[3] - f_sq).powi(2) + c[4] * f_sq).log10()
                - (c[5] + f_sq).log10()
                - (c[6] + f_sq).log10()))
}

/// Apply an optional dB floor. NaN weights pass through unchanged.
fn floor_db(weight: f64, min_db: Option<f64>) -> f64 {
    match min_db {
        Some(min_db) if !weight.is_nan() => weight.max(min_db),
        _ => weight,
    }
}

fn weigh<S, D>(kind: WeightingKind, frequencies: &ArrayBase<S, D>, min_db: Option<f64>) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    frequencies.mapv(|f| floor_db(kind.weight(f), min_db))
}

/// Compute the A-weighting of a set of frequencies.
///
/// # Arguments
/// * `frequencies` - Frequencies in Hz
/// * `min_db` - Clip weights below this threshold; `None` disables clipping
///   (see [`DEFAULT_MIN_DB`](super::DEFAULT_MIN_DB))
///
/// # Returns
/// Weight in dB for each frequency, same shape as the input
///
/// # Example
/// ```
/// use ndarray::array;
/// use timefreq::convert::a_weighting;
///
/// let weights = a_weighting(&array![0.0, 100.0, 1000.0, 10000.0], Some(-80.0));
/// assert_eq!(weights[0], -80.0);
/// assert!((weights[1] + 19.145).abs() < 0.01);
/// assert!(weights[2].abs() < 0.01);
/// ```
pub fn a_weighting<S, D>(frequencies: &ArrayBase<S, D>, min_db: Option<f64>) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    weigh(WeightingKind::A, frequencies, min_db)
}

/// Compute the B-weighting of a set of frequencies.
pub fn b_weighting<S, D>(frequencies: &ArrayBase<S, D>, min_db: Option<f64>) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    weigh(WeightingKind::B, frequencies, min_db)
}

/// Compute the C-weighting of a set of frequencies.
pub fn c_weighting<S, D>(frequencies: &ArrayBase<S, D>, min_db: Option<f64>) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    weigh(WeightingKind::C, frequencies, min_db)
}

/// Compute the D-weighting of a set of frequencies.
pub fn d_weighting<S, D>(frequencies: &ArrayBase<S, D>, min_db: Option<f64>) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    weigh(WeightingKind::D, frequencies, min_db)
}

/// Z-weighting: 0 dB everywhere, floored at `min_db` if one is given.
pub fn z_weighting<S, D>(frequencies: &ArrayBase<S, D>, min_db: Option<f64>) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    weigh(WeightingKind::Z, frequencies, min_db)
}

/// Compute the weighting of a set of frequencies by kind.
///
/// # Arguments
/// * `frequencies` - Frequencies in Hz
/// * `kind` - One of `"A"`, `"B"`, `"C"`, `"D"`, `"Z"` (case-insensitive);
///   `None` means Z
/// * `min_db` - Optional dB floor
///
/// # Errors
/// `UnknownWeighting` for any other kind.
///
/// # Example
/// ```
/// use ndarray::array;
/// use timefreq::convert::frequency_weighting;
///
/// let weights = frequency_weighting(&array![1000.0], Some("a"), Some(-80.0)).unwrap();
/// assert!(weights[0].abs() < 0.01);
/// assert!(frequency_weighting(&array![1000.0], Some("E"), None).is_err());
/// ```
pub fn frequency_weighting<S, D>(
    frequencies: &ArrayBase<S, D>,
    kind: Option<&str>,
    min_db: Option<f64>,
) -> Result<Array<f64, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let kind = WeightingKind::from_key(kind)?;
    Ok(weigh(kind, frequencies, min_db))
}

/// Compute several frequency weightings at once.
///
/// # Arguments
/// * `frequencies` - Frequencies in Hz
/// * `kinds` - Weighting kinds, one character each (e.g. `"ZAC"`)
/// * `min_db` - Optional dB floor
///
/// # Returns
/// Array with a new leading axis of length `kinds.chars().count()`, one
/// weighting curve per entry in the given order
///
/// # Example
/// ```
/// use ndarray::array;
/// use timefreq::convert::multi_frequency_weighting;
///
/// let freqs = array![100.0, 1000.0, 10000.0];
/// let weights = multi_frequency_weighting(&freqs, "ZAC", Some(-80.0)).unwrap();
/// assert_eq!(weights.shape(), &[3, 3]);
/// assert_eq!(weights[(0, 1)], 0.0); // Z is flat
/// assert!(weights[(1, 1)].abs() < 0.01); // A is ~0 dB at 1 kHz
/// ```
pub fn multi_frequency_weighting<S, D>(
    frequencies: &ArrayBase<S, D>,
    kinds: &str,
    min_db: Option<f64>,
) -> Result<Array<f64, D::Larger>>
where
    S: Data<Elem = f64>,
    D: Dimension,
    D::Larger: RemoveAxis,
{
    let kinds = kinds
        .chars()
        .map(WeightingKind::try_from)
        .collect::<Result<Vec<_>>>()?;

    if kinds.is_empty() {
        let mut dim = D::Larger::zeros(frequencies.ndim() + 1);
        for (i, &n) in frequencies.shape().iter().enumerate() {
            dim[i + 1] = n;
        }
        return Ok(Array::zeros(dim));
    }

    let curves: Vec<Array<f64, D>> = kinds
        .iter()
        .map(|&kind| weigh(kind, frequencies, min_db))
        .collect();
    let views: Vec<_> = curves.iter().map(|c| c.view()).collect();
    ndarray::stack(Axis(0), &views).map_err(|e| Error::ShapeMismatch {
        expected: format!("{} curves of shape {:?}", kinds.len(), frequencies.shape()),
        got: e.to_string(),
    })
}

use std::fmt;
use std::str::FromStr;

use log::trace;
use ndarray::{Array1, ArrayD};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TranslateError};

// ---------------------------------------------------------------------------
// Statistic – how non-spectral axes are collapsed
// ---------------------------------------------------------------------------

/// Reduction applied to every spectral slice of a cube.
///
/// `Percentile` carries its percentile in `[0, 100]`; the bare name
/// `"percentile"` is not accepted because it has no meaningful default.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Statistic {
    Minimum,
    Maximum,
    #[default]
    Mean,
    Median,
    Sum,
    Percentile(f64),
}

impl Statistic {
    pub fn percentile(p: f64) -> Result<Self> {
        let stat = Statistic::Percentile(p);
        stat.validate()?;
        Ok(stat)
    }

    /// Reject a `Percentile` built directly with a value outside `[0, 100]`.
    pub fn validate(&self) -> Result<()> {
        match self {
            Statistic::Percentile(p) if !(0.0..=100.0).contains(p) => {
                Err(TranslateError::InvalidArgument(format!(
                    "percentile must be within [0, 100], got {p}"
                )))
            }
            _ => Ok(()),
        }
    }

    /// Reduce a set of values. An empty set sums to zero and is NaN for
    /// every other statistic.
    pub fn reduce(&self, values: &mut [f64]) -> f64 {
        if values.is_empty() {
            return match self {
                Statistic::Sum => 0.0,
                _ => f64::NAN,
            };
        }
        match self {
            Statistic::Minimum => values.iter().copied().fold(f64::INFINITY, f64::min),
            Statistic::Maximum => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Statistic::Sum => values.iter().sum(),
            Statistic::Mean => values.iter().sum::<f64>() / values.len() as f64,
            Statistic::Median => percentile_of(values, 50.0),
            Statistic::Percentile(p) => percentile_of(values, *p),
        }
    }
}

/// Linear interpolation between order statistics. `p` is clamped to
/// `[0, 100]`.
fn percentile_of(values: &mut [f64], p: f64) -> f64 {
    values.sort_by(f64::total_cmp);
    let last = values.len() - 1;
    let rank = p.clamp(0.0, 100.0) / 100.0 * last as f64;
    let lo = (rank.floor() as usize).min(last);
    let hi = (rank.ceil() as usize).min(last);
    values[lo] + (values[hi] - values[lo]) * (rank - lo as f64)
}

impl FromStr for Statistic {
    type Err = TranslateError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "minimum" => Ok(Statistic::Minimum),
            "maximum" => Ok(Statistic::Maximum),
            "mean" => Ok(Statistic::Mean),
            "median" => Ok(Statistic::Median),
            "sum" => Ok(Statistic::Sum),
            "percentile" => Err(TranslateError::InvalidArgument(
                "percentile statistic needs an explicit value, e.g. 'percentile:90'".into(),
            )),
            other => match other.strip_prefix("percentile:") {
                Some(p) => {
                    let p: f64 = p.trim().parse().map_err(|_| {
                        TranslateError::InvalidArgument(format!("invalid percentile '{p}'"))
                    })?;
                    Statistic::percentile(p)
                }
                None => Err(TranslateError::InvalidArgument(format!(
                    "unknown statistic '{other}'"
                ))),
            },
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statistic::Minimum => write!(f, "minimum"),
            Statistic::Maximum => write!(f, "maximum"),
            Statistic::Mean => write!(f, "mean"),
            Statistic::Median => write!(f, "median"),
            Statistic::Sum => write!(f, "sum"),
            Statistic::Percentile(p) => write!(f, "percentile:{p}"),
        }
    }
}

impl TryFrom<String> for Statistic {
    type Error = TranslateError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Statistic> for String {
    fn from(stat: Statistic) -> Self {
        stat.to_string()
    }
}

// ---------------------------------------------------------------------------
// Collapse
// ---------------------------------------------------------------------------

/// Collapse every axis except `spectral_axis`, giving one value per spectral
/// index. NaN values and elements outside `selection` do not contribute.
pub fn collapse(
    values: &ArrayD<f64>,
    spectral_axis: usize,
    selection: Option<&ArrayD<bool>>,
    statistic: Statistic,
) -> Result<Array1<f64>> {
    statistic.validate()?;
    if spectral_axis >= values.ndim() {
        return Err(TranslateError::InvalidArgument(format!(
            "spectral axis {spectral_axis} out of range for {}-d data",
            values.ndim()
        )));
    }
    let fallback;
    let mask = match selection {
        Some(mask) => mask,
        None => {
            fallback = ArrayD::from_elem(values.raw_dim(), true);
            &fallback
        }
    };
    if mask.shape() != values.shape() {
        return Err(TranslateError::ShapeMismatch {
            expected: values.shape().to_vec(),
            actual: mask.shape().to_vec(),
        });
    }

    let n = values.shape()[spectral_axis];
    trace!("collapsing {:?} to {n} with {statistic}", values.shape());
    let mut slices: Vec<Vec<f64>> = vec![Vec::new(); n];
    for ((idx, &v), &selected) in values.indexed_iter().zip(mask.iter()) {
        if selected && !v.is_nan() {
            slices[idx[spectral_axis]].push(v);
        }
    }

    Ok(slices
        .into_iter()
        .map(|mut slice| statistic.reduce(&mut slice))
        .collect())
}

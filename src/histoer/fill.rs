//! Weighted filling of booked histograms from per-event arrays.

use super::histo1d::histogram1d::Histogram;
use super::histo2d::histogram2d::Histogram2D;
use crate::error::{HistError, Result};

/// Event weights, either one value broadcast to every event or one per event.
#[derive(Debug, Clone, Copy)]
pub enum Weights<'a> {
    Scalar(f64),
    PerEvent(&'a [f64]),
}

impl Weights<'_> {
    fn check_len(&self, expected: usize, name: &str) -> Result<()> {
        match self {
            Self::Scalar(_) => Ok(()),
            Self::PerEvent(w) if w.len() == expected => Ok(()),
            Self::PerEvent(w) => Err(HistError::length_mismatch(
                format!("weights for {name}"),
                expected,
                w.len(),
            )),
        }
    }

    fn get(&self, i: usize) -> f64 {
        match self {
            Self::Scalar(w) => *w,
            Self::PerEvent(w) => w[i],
        }
    }
}

impl From<f64> for Weights<'_> {
    fn from(weight: f64) -> Self {
        Self::Scalar(weight)
    }
}

impl<'a> From<&'a [f64]> for Weights<'a> {
    fn from(weights: &'a [f64]) -> Self {
        Self::PerEvent(weights)
    }
}

impl<'a> From<&'a Vec<f64>> for Weights<'a> {
    fn from(weights: &'a Vec<f64>) -> Self {
        Self::PerEvent(weights.as_slice())
    }
}

/// Fill `hist` with `values`. Folding happens once, after every value is in.
pub fn fill_1d<'a>(
    hist: &mut Histogram,
    values: &[f64],
    weights: impl Into<Weights<'a>>,
    overflow_in_last_bin: bool,
) -> Result<()> {
    if values.is_empty() {
        return Ok(());
    }

    let weights = weights.into();
    weights.check_len(values.len(), &hist.name)?;

    for (i, &value) in values.iter().enumerate() {
        hist.fill(value, weights.get(i));
    }

    if overflow_in_last_bin {
        hist.fold_overflow_into_last_bin();
    }

    Ok(())
}

/// Fill `hist` with `(x, y)` pairs. Flow slots are left as filled.
pub fn fill_2d<'a>(
    hist: &mut Histogram2D,
    x_values: &[f64],
    y_values: &[f64],
    weights: impl Into<Weights<'a>>,
) -> Result<()> {
    if x_values.is_empty() {
        return Ok(());
    }

    if y_values.len() != x_values.len() {
        return Err(HistError::length_mismatch(
            format!("y values for {}", hist.name),
            x_values.len(),
            y_values.len(),
        ));
    }

    let weights = weights.into();
    weights.check_len(x_values.len(), &hist.name)?;

    for (i, (&x, &y)) in x_values.iter().zip(y_values).enumerate() {
        hist.fill(x, y, weights.get(i));
    }

    Ok(())
}

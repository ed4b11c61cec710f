use super::configs::Binning;
use crate::error::{HistError, Result};

/// Where a value lands on an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinLocation {
    Underflow,
    Bin(usize),
    Overflow,
}

/// Concrete, validated binning of one histogram axis.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum Axis {
    Uniform { bins: usize, min: f64, max: f64 },
    Variable { edges: Vec<f64> },
}

impl Axis {
    pub fn from_binning(binning: &Binning) -> Result<Self> {
        match binning {
            Binning::FixedWidth { count, low, high } => {
                if *count == 0 {
                    return Err(HistError::config("fixed-width axis needs at least one bin"));
                }
                if !low.is_finite() || !high.is_finite() || low >= high {
                    return Err(HistError::config(format!(
                        "fixed-width axis has an invalid range ({low}, {high})"
                    )));
                }
                Ok(Self::Uniform {
                    bins: *count,
                    min: *low,
                    max: *high,
                })
            }
            Binning::VariableWidth { edges } => {
                if edges.len() < 2 {
                    return Err(HistError::config(format!(
                        "variable-width axis needs at least two edges, got {}",
                        edges.len()
                    )));
                }
                if edges.iter().any(|e| !e.is_finite()) {
                    return Err(HistError::config("variable-width axis has non-finite edges"));
                }
                if edges.windows(2).any(|pair| pair[0] >= pair[1]) {
                    return Err(HistError::config(format!(
                        "variable-width edges must be strictly increasing: {edges:?}"
                    )));
                }
                Ok(Self::Variable {
                    edges: edges.clone(),
                })
            }
        }
    }

    pub fn n_bins(&self) -> usize {
        match self {
            Self::Uniform { bins, .. } => *bins,
            Self::Variable { edges } => edges.len() - 1,
        }
    }

    pub fn min(&self) -> f64 {
        match self {
            Self::Uniform { min, .. } => *min,
            Self::Variable { edges } => edges[0],
        }
    }

    pub fn max(&self) -> f64 {
        match self {
            Self::Uniform { max, .. } => *max,
            Self::Variable { edges } => edges[edges.len() - 1],
        }
    }

    /// Common bin width, only defined for uniform axes.
    pub fn bin_width(&self) -> Option<f64> {
        match self {
            Self::Uniform { bins, min, max } => Some((max - min) / *bins as f64),
            Self::Variable { .. } => None,
        }
    }

    pub fn is_uniform(&self) -> bool {
        matches!(self, Self::Uniform { .. })
    }

    pub fn edges(&self) -> Vec<f64> {
        match self {
            Self::Uniform { bins, min, max } => {
                let width = (max - min) / *bins as f64;
                (0..=*bins).map(|i| min + i as f64 * width).collect()
            }
            Self::Variable { edges } => edges.clone(),
        }
    }

    pub fn bin_centers(&self) -> Vec<f64> {
        self.edges()
            .windows(2)
            .map(|pair| 0.5 * (pair[0] + pair[1]))
            .collect()
    }

    // Bins are [low, high); NaN is counted as overflow
    pub fn locate(&self, x: f64) -> BinLocation {
        if x < self.min() {
            return BinLocation::Underflow;
        }
        if !(x < self.max()) {
            return BinLocation::Overflow;
        }

        match self {
            Self::Uniform { bins, min, max } => {
                let width = (max - min) / *bins as f64;
                let index = ((x - min) / width) as usize;
                // rounding can push values just below max into a phantom bin
                BinLocation::Bin(index.min(bins - 1))
            }
            Self::Variable { edges } => {
                let index = edges.partition_point(|&edge| edge <= x) - 1;
                BinLocation::Bin(index)
            }
        }
    }
}

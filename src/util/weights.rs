use polars::prelude::DataFrame;

use crate::config::BosonMode;
use crate::error::Result;
use crate::samples::column_values;

/// Per-event factors every selected event carries.
pub const COMMON_WEIGHT_COLUMNS: [&str; 4] =
    ["gen_weight", "trig_eff_weight", "id_eff_weight", "pu_weight"];

/// Efficiency factors of the second lepton, Z-mode only.
pub const SECOND_LEPTON_WEIGHT_COLUMNS: [&str; 2] = ["trig_eff_weight2", "id_eff_weight2"];

pub const BTAG0_WEIGHT_COLUMN: &str = "btag0_weight";

pub fn weight_columns(boson: BosonMode, apply_btag0_weight: bool) -> Vec<&'static str> {
    let mut columns = COMMON_WEIGHT_COLUMNS.to_vec();
    if boson == BosonMode::Z {
        columns.extend(SECOND_LEPTON_WEIGHT_COLUMNS);
    }
    if apply_btag0_weight {
        columns.push(BTAG0_WEIGHT_COLUMN);
    }
    columns
}

/// Total per-event weight of the selected rows: the cross-section weight times
/// every factor column. A missing factor column is an error, never a 1.0.
pub fn compose_total_weight(
    skim: &DataFrame,
    sample: &str,
    xs_weight: f64,
    boson: BosonMode,
    apply_btag0_weight: bool,
) -> Result<Vec<f64>> {
    let mut total = vec![xs_weight; skim.height()];

    for column in weight_columns(boson, apply_btag0_weight) {
        let factors = column_values(skim, sample, column)?;
        for (weight, factor) in total.iter_mut().zip(factors) {
            *weight *= factor;
        }
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HistError;
    use approx::assert_relative_eq;
    use polars::prelude::*;

    fn skim() -> DataFrame {
        df!(
            "gen_weight" => [1.0, 0.5],
            "trig_eff_weight" => [1.0, 1.0],
            "id_eff_weight" => [1.0, 1.0],
            "pu_weight" => [1.0, 1.0],
            "trig_eff_weight2" => [0.5, 1.0],
            "id_eff_weight2" => [1.0, 0.8],
            "btag0_weight" => [0.9, 0.9]
        )
        .unwrap()
    }

    #[test]
    fn test_w_mode_weights() {
        let total = compose_total_weight(&skim(), "ttbar/p0", 2.0, BosonMode::W, false).unwrap();
        assert_eq!(total, vec![2.0, 1.0]);
    }

    #[test]
    fn test_z_mode_adds_second_lepton_factors() {
        let total = compose_total_weight(&skim(), "ttbar/p0", 2.0, BosonMode::Z, false).unwrap();
        assert_relative_eq!(total[0], 1.0);
        assert_relative_eq!(total[1], 0.8);
    }

    #[test]
    fn test_btag0_weight() {
        let total = compose_total_weight(&skim(), "ttbar/p0", 2.0, BosonMode::W, true).unwrap();
        assert_relative_eq!(total[0], 1.8);
        assert_relative_eq!(total[1], 0.9);
    }

    #[test]
    fn test_missing_weight_column_is_not_defaulted() {
        let df = skim().drop("pu_weight").unwrap();
        let err = compose_total_weight(&df, "ttbar/p0", 1.0, BosonMode::W, false).unwrap_err();
        assert!(matches!(err, HistError::MissingColumn { column, .. } if column == "pu_weight"));
    }

    #[test]
    fn test_column_lists() {
        assert_eq!(weight_columns(BosonMode::W, false).len(), 4);
        assert_eq!(weight_columns(BosonMode::Z, true).len(), 7);
    }
}

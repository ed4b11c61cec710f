//! top_cr_W: signal_loose_W kinematics with at least one medium b-tagged jet.
//! Events are b-tagged on purpose, so the veto weight is not applied.

use polars::prelude::*;

use super::{ExprRegion, lepton_flavour};

pub fn region() -> ExprRegion {
    let common = col("fatjet_pt")
        .gt(lit(200.0))
        .and(col("fatjet_m").gt_eq(lit(50.0)))
        .and(col("fatjet_m").lt(lit(150.0)))
        .and(col("vbf_jj_m").gt(lit(500.0)))
        .and(col("vbf_jj_Deta").gt(lit(2.5)))
        .and(col("nbtag_medium").gt_eq(lit(1)));

    let region_e = col("lept1_pt")
        .gt(lit(50.0))
        .and(col("pf_met_corr").gt(lit(80.0)))
        .and(common.clone());

    let region_m = col("lept1_pt")
        .gt(lit(35.0))
        .and(col("pf_met_corr").gt(lit(30.0)))
        .and(common);

    ExprRegion::new(
        "top_cr_W",
        lepton_flavour("lept1_pdg_id", 11),
        lepton_flavour("lept1_pdg_id", 13),
        region_e.clone(),
    )
    .with_region_per_channel(region_e, region_m)
    .with_btag0_weight(false)
    .with_source(include_str!("top_cr_w.rs"))
}

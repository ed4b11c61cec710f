//! signal_loose_W: one lepton, a boosted V candidate in a loose mass window
//! and a VBF jet pair. The b-tag veto is applied as an event weight.

use polars::prelude::*;

use super::{ExprRegion, lepton_flavour};

pub fn region() -> ExprRegion {
    let vbf = col("vbf_jj_m")
        .gt(lit(500.0))
        .and(col("vbf_jj_Deta").gt(lit(2.5)));

    let fatjet = col("fatjet_pt")
        .gt(lit(200.0))
        .and(col("fatjet_m").gt_eq(lit(50.0)))
        .and(col("fatjet_m").lt(lit(150.0)));

    let region_e = col("lept1_pt")
        .gt(lit(50.0))
        .and(col("pf_met_corr").gt(lit(80.0)))
        .and(fatjet.clone())
        .and(vbf.clone());

    let region_m = col("lept1_pt")
        .gt(lit(35.0))
        .and(col("pf_met_corr").gt(lit(30.0)))
        .and(fatjet)
        .and(vbf);

    ExprRegion::new(
        "signal_loose_W",
        lepton_flavour("lept1_pdg_id", 11),
        lepton_flavour("lept1_pdg_id", 13),
        region_e.clone(),
    )
    .with_region_per_channel(region_e, region_m)
    .with_btag0_weight(true)
    .with_source(include_str!("signal_loose_w.rs"))
}

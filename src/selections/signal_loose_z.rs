//! signal_loose_Z: two same-flavour leptons compatible with a Z, a boosted V
//! candidate and a VBF jet pair. The b-tag veto is applied as an event weight.

use polars::prelude::*;

use super::{ExprRegion, lepton_flavour};

pub fn region() -> ExprRegion {
    let region = col("lept1_pt")
        .gt(lit(40.0))
        .and(col("lept2_pt").gt(lit(20.0)))
        .and(col("fatjet_pt").gt(lit(200.0)))
        .and(col("fatjet_m").gt_eq(lit(50.0)))
        .and(col("fatjet_m").lt(lit(150.0)))
        .and(col("vbf_jj_m").gt(lit(500.0)))
        .and(col("vbf_jj_Deta").gt(lit(2.5)));

    ExprRegion::new(
        "signal_loose_Z",
        lepton_flavour("lept1_pdg_id", 11),
        lepton_flavour("lept1_pdg_id", 13),
        region,
    )
    .with_second_lepton(
        lepton_flavour("lept2_pdg_id", 11),
        lepton_flavour("lept2_pdg_id", 13),
    )
    .with_btag0_weight(true)
    .with_source(include_str!("signal_loose_z.rs"))
}

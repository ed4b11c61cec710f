//! Selection regions: which rows pass a lepton channel and analysis region.
//!
//! A region is injected into the pipeline as a [`Region`] trait object. The
//! built-in regions are plain [`ExprRegion`]s written with polars expressions
//! and can be looked up by name with [`region_by_name`].

use polars::prelude::*;

use crate::config::LeptonChannel;
use crate::error::{HistError, Result};

pub mod signal_loose_w;
pub mod signal_loose_z;
pub mod top_cr_w;

const MASK_COLUMN: &str = "__selection_mask";

pub trait Region: Send + Sync {
    fn name(&self) -> &str;

    /// Rows with the requested lepton flavour.
    fn lepton_selection(&self, df: &DataFrame, lepton: LeptonChannel) -> Result<BooleanChunked>;

    /// Rows whose second lepton matches the channel, `None` if the region has no second lepton.
    fn second_lepton_selection(
        &self,
        df: &DataFrame,
        lepton: LeptonChannel,
    ) -> Result<Option<BooleanChunked>>;

    fn region_selection(&self, df: &DataFrame, lepton: LeptonChannel) -> Result<BooleanChunked>;

    /// Whether the b-tag veto weight multiplies the event weight.
    fn apply_btag0_weight(&self) -> bool;

    /// Human readable selection code stored next to the histograms.
    fn source_text(&self) -> &str;

    fn has_second_lepton(&self) -> bool;
}

/// Evaluate a boolean expression over `df`; nulls count as failing. Constant
/// expressions are broadcast to one value per row.
pub fn evaluate_mask(df: &DataFrame, expr: Expr) -> Result<BooleanChunked> {
    let out = df
        .clone()
        .lazy()
        .with_column(expr.fill_null(lit(false)).alias(MASK_COLUMN))
        .select([col(MASK_COLUMN)])
        .collect()?;
    let mut mask = out.column(MASK_COLUMN)?.bool()?.clone();

    if mask.len() == 1 && df.height() != 1 {
        mask = mask.new_from_index(0, df.height());
    }

    if mask.len() != df.height() {
        return Err(HistError::length_mismatch(
            "selection mask",
            df.height(),
            mask.len(),
        ));
    }

    Ok(mask)
}

#[derive(Clone)]
pub struct ExprRegion {
    pub name: String,
    pub e_channel: Expr,
    pub m_channel: Expr,
    pub e_channel2: Option<Expr>,
    pub m_channel2: Option<Expr>,
    pub region_e: Expr,
    pub region_m: Expr,
    pub apply_btag0_weight: bool,
    pub source: String,
}

impl ExprRegion {
    /// Region with the same cuts for both channels and no second lepton.
    pub fn new(name: &str, e_channel: Expr, m_channel: Expr, region: Expr) -> Self {
        Self {
            name: name.to_owned(),
            e_channel,
            m_channel,
            e_channel2: None,
            m_channel2: None,
            region_e: region.clone(),
            region_m: region,
            apply_btag0_weight: false,
            source: String::new(),
        }
    }

    pub fn with_region_per_channel(mut self, region_e: Expr, region_m: Expr) -> Self {
        self.region_e = region_e;
        self.region_m = region_m;
        self
    }

    pub fn with_second_lepton(mut self, e_channel2: Expr, m_channel2: Expr) -> Self {
        self.e_channel2 = Some(e_channel2);
        self.m_channel2 = Some(m_channel2);
        self
    }

    pub fn with_btag0_weight(mut self, apply: bool) -> Self {
        self.apply_btag0_weight = apply;
        self
    }

    pub fn with_source(mut self, source: &str) -> Self {
        self.source = source.to_owned();
        self
    }
}

impl Region for ExprRegion {
    fn name(&self) -> &str {
        &self.name
    }

    fn lepton_selection(&self, df: &DataFrame, lepton: LeptonChannel) -> Result<BooleanChunked> {
        let expr = match lepton {
            LeptonChannel::Electron => self.e_channel.clone(),
            LeptonChannel::Muon => self.m_channel.clone(),
        };
        evaluate_mask(df, expr)
    }

    fn second_lepton_selection(
        &self,
        df: &DataFrame,
        lepton: LeptonChannel,
    ) -> Result<Option<BooleanChunked>> {
        let expr = match lepton {
            LeptonChannel::Electron => self.e_channel2.clone(),
            LeptonChannel::Muon => self.m_channel2.clone(),
        };
        expr.map(|expr| evaluate_mask(df, expr)).transpose()
    }

    fn region_selection(&self, df: &DataFrame, lepton: LeptonChannel) -> Result<BooleanChunked> {
        let expr = match lepton {
            LeptonChannel::Electron => self.region_e.clone(),
            LeptonChannel::Muon => self.region_m.clone(),
        };
        evaluate_mask(df, expr)
    }

    fn apply_btag0_weight(&self) -> bool {
        self.apply_btag0_weight
    }

    fn source_text(&self) -> &str {
        &self.source
    }

    fn has_second_lepton(&self) -> bool {
        self.e_channel2.is_some() && self.m_channel2.is_some()
    }
}

/// The pdg id column matches the flavour, either charge.
pub fn lepton_flavour(column: &str, pdg_id: i32) -> Expr {
    col(column)
        .eq(lit(pdg_id))
        .or(col(column).eq(lit(-pdg_id)))
}

type RegionBuilder = fn() -> ExprRegion;

const REGIONS: &[(&str, RegionBuilder)] = &[
    ("signal_loose_W", signal_loose_w::region),
    ("signal_loose_Z", signal_loose_z::region),
    ("top_cr_W", top_cr_w::region),
];

pub fn region_names() -> Vec<&'static str> {
    REGIONS.iter().map(|(name, _)| *name).collect()
}

pub fn region_by_name(name: &str) -> Result<Box<dyn Region>> {
    REGIONS
        .iter()
        .find(|(region_name, _)| *region_name == name)
        .map(|(_, build)| Box::new(build()) as Box<dyn Region>)
        .ok_or_else(|| {
            HistError::config(format!(
                "unknown region '{name}', available regions: {}",
                region_names().join(", ")
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> DataFrame {
        df!(
            "lept1_pdg_id" => [11, -13, 13, -11],
            "lept1_pt" => [60.0, 20.0, 45.0, 30.0]
        )
        .unwrap()
    }

    fn region() -> ExprRegion {
        ExprRegion::new(
            "test",
            lepton_flavour("lept1_pdg_id", 11),
            lepton_flavour("lept1_pdg_id", 13),
            col("lept1_pt").gt(lit(35.0)),
        )
    }

    fn as_vec(mask: &BooleanChunked) -> Vec<bool> {
        mask.into_iter().map(|v| v.unwrap_or(false)).collect()
    }

    #[test]
    fn test_channel_masks() {
        let df = records();
        let region = region();
        let e = region.lepton_selection(&df, LeptonChannel::Electron).unwrap();
        let m = region.lepton_selection(&df, LeptonChannel::Muon).unwrap();
        assert_eq!(as_vec(&e), vec![true, false, false, true]);
        assert_eq!(as_vec(&m), vec![false, true, true, false]);

        let r = region.region_selection(&df, LeptonChannel::Muon).unwrap();
        assert_eq!(as_vec(&r), vec![true, false, true, false]);
    }

    #[test]
    fn test_second_lepton_optional() {
        let df = records();
        let region = region();
        assert!(!region.has_second_lepton());
        assert!(
            region
                .second_lepton_selection(&df, LeptonChannel::Electron)
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_constant_mask_covers_every_row() {
        let mask = evaluate_mask(&records(), lit(true)).unwrap();
        assert_eq!(as_vec(&mask), vec![true; 4]);

        let rejected = evaluate_mask(&records(), lit(false)).unwrap();
        assert_eq!(as_vec(&rejected), vec![false; 4]);

        let empty = records().head(Some(0));
        assert_eq!(evaluate_mask(&empty, lit(true)).unwrap().len(), 0);

        let single = records().head(Some(1));
        assert_eq!(as_vec(&evaluate_mask(&single, lit(true)).unwrap()), vec![true]);
    }

    #[test]
    fn test_open_region_selects_channel_only() {
        let df = records();
        let region = ExprRegion::new(
            "open",
            lepton_flavour("lept1_pdg_id", 11),
            lepton_flavour("lept1_pdg_id", 13),
            lit(true),
        );
        let r = region.region_selection(&df, LeptonChannel::Muon).unwrap();
        assert_eq!(as_vec(&r), vec![true; 4]);
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let df = df!("other" => [1.0]).unwrap();
        assert!(region().lepton_selection(&df, LeptonChannel::Electron).is_err());
    }

    #[test]
    fn test_region_lookup() {
        let region = region_by_name("signal_loose_W").unwrap();
        assert_eq!(region.name(), "signal_loose_W");
        assert!(region.source_text().contains("signal_loose_W"));

        assert!(region_by_name("signal_loose_Z").unwrap().has_second_lepton());
        assert!(region_by_name("nope").err().unwrap().is_configuration());
    }
}

use std::collections::hash_map::Entry;

use fnv::FnvHashMap;
use indicatif::ProgressBar;
use polars::prelude::*;
use rayon::prelude::*;

use super::weights::compose_total_weight;
use crate::config::{BosonMode, LeptonChannel};
use crate::error::{HistError, Result};
use crate::histoer::configs::HistogramSpec;
use crate::histoer::counter::EntryCounter;
use crate::histoer::fill::{fill_1d, fill_2d};
use crate::histoer::histogrammer::Histogrammer;
use crate::samples::{Sample, SampleRegistry, column_values};
use crate::selections::{Region, evaluate_mask};

pub const TOTAL_ENTRIES: &str = "total_entries";

/// Secondary category filled alongside each sample key, e.g. a jet flavour tag.
#[derive(Clone)]
pub struct SubCategory {
    pub name: String,
    pub selection: Expr,
}

impl SubCategory {
    pub fn new(name: &str, selection: Expr) -> Self {
        Self {
            name: name.to_owned(),
            selection,
        }
    }

    /// Rows where a boolean (or 0/1) column is set.
    pub fn from_flag_column(name: &str, column: &str) -> Self {
        Self::new(name, col(column).cast(DataType::Boolean))
    }
}

/// AND together row masks, all of which must cover every record.
pub fn combine_masks(masks: &[&BooleanChunked], height: usize) -> Result<BooleanChunked> {
    for mask in masks {
        if mask.len() != height {
            return Err(HistError::length_mismatch("selection mask", height, mask.len()));
        }
    }

    let mut combined = BooleanChunked::full("selection".into(), true, height);
    for mask in masks {
        combined = &combined & *mask;
    }
    Ok(combined)
}

/// Drives selection, weighting and filling of every booked histogram, one
/// sample partition at a time.
pub struct EventPipeline<'r> {
    region: &'r dyn Region,
    lepton: LeptonChannel,
    boson: BosonMode,
    specs: Vec<HistogramSpec>,
    sub_categories: Vec<SubCategory>,
    histogrammer: Histogrammer,
    total_entries: EntryCounter,
}

impl<'r> EventPipeline<'r> {
    /// Validates the configuration and books every histogram up front.
    pub fn new(
        region: &'r dyn Region,
        lepton: LeptonChannel,
        boson: BosonMode,
        specs: Vec<HistogramSpec>,
        sub_categories: Vec<SubCategory>,
        keys: &[String],
    ) -> Result<Self> {
        if boson == BosonMode::Z && !region.has_second_lepton() {
            return Err(HistError::config(format!(
                "region '{}' has no second lepton selection, it cannot run in Z mode",
                region.name()
            )));
        }

        let sub_keys: Vec<String> = sub_categories.iter().map(|s| s.name.clone()).collect();
        let histogrammer = Histogrammer::book(&specs, keys, &sub_keys)?;

        log::info!(
            "Booked {} histograms for region {} ({} channel, {} mode)",
            histogrammer.len(),
            region.name(),
            lepton,
            boson
        );

        Ok(Self {
            region,
            lepton,
            boson,
            specs,
            sub_categories,
            histogrammer,
            total_entries: EntryCounter::new(TOTAL_ENTRIES),
        })
    }

    pub fn region(&self) -> &dyn Region {
        self.region
    }

    pub fn lepton(&self) -> LeptonChannel {
        self.lepton
    }

    pub fn boson(&self) -> BosonMode {
        self.boson
    }

    pub fn histogrammer(&self) -> &Histogrammer {
        &self.histogrammer
    }

    pub fn total_entries(&self) -> &EntryCounter {
        &self.total_entries
    }

    pub fn into_parts(self) -> (Histogrammer, EntryCounter) {
        (self.histogrammer, self.total_entries)
    }

    /// Row mask of events passing the channel and region selections.
    pub fn selection_mask(&self, records: &DataFrame) -> Result<BooleanChunked> {
        let lepton_sel = self.region.lepton_selection(records, self.lepton)?;
        let region_sel = self.region.region_selection(records, self.lepton)?;

        match self.boson {
            BosonMode::W => combine_masks(&[&lepton_sel, &region_sel], records.height()),
            BosonMode::Z => {
                let lepton_sel2 = self
                    .region
                    .second_lepton_selection(records, self.lepton)?
                    .ok_or_else(|| {
                        HistError::config(format!(
                            "region '{}' has no second lepton selection",
                            self.region.name()
                        ))
                    })?;
                combine_masks(
                    &[&lepton_sel, &lepton_sel2, &region_sel],
                    records.height(),
                )
            }
        }
    }

    pub fn process(&mut self, sample: &Sample) -> Result<()> {
        let mut histogrammer = std::mem::take(&mut self.histogrammer);
        let mut counter = std::mem::take(&mut self.total_entries);
        let result = self.fill_sample(&mut histogrammer, &mut counter, sample);
        self.histogrammer = histogrammer;
        self.total_entries = counter;
        result
    }

    /// Process every partition in order, stopping at the first error.
    pub fn run(&mut self, samples: &SampleRegistry) -> Result<()> {
        let bar = ProgressBar::new(samples.len() as u64);
        for sample in samples.samples() {
            bar.set_message(sample.id.to_string());
            self.process(sample)?;
            bar.inc(1);
        }
        bar.finish_and_clear();
        Ok(())
    }

    /// Fill partitions on the rayon pool, each into its own empty copy of the
    /// booked histograms, then add the copies together.
    pub fn run_parallel(&mut self, samples: &SampleRegistry) -> Result<()> {
        let template = self.histogrammer.empty_clone();
        let bar = ProgressBar::new(samples.len() as u64);

        let (filled, counter) = samples
            .samples()
            .par_iter()
            .map(|sample| -> Result<(Histogrammer, EntryCounter)> {
                let mut histogrammer = template.clone();
                let mut counter = EntryCounter::new(TOTAL_ENTRIES);
                self.fill_sample(&mut histogrammer, &mut counter, sample)?;
                bar.inc(1);
                Ok((histogrammer, counter))
            })
            .try_reduce(
                || (template.clone(), EntryCounter::new(TOTAL_ENTRIES)),
                |(mut hists_a, mut counter_a), (hists_b, counter_b)| {
                    hists_a.merge(&hists_b)?;
                    counter_a.merge(&counter_b);
                    Ok((hists_a, counter_a))
                },
            )?;
        bar.finish_and_clear();

        self.histogrammer.merge(&filled)?;
        self.total_entries.merge(&counter);
        Ok(())
    }

    fn fill_sample(
        &self,
        histogrammer: &mut Histogrammer,
        counter: &mut EntryCounter,
        sample: &Sample,
    ) -> Result<()> {
        let sample_name = sample.id.to_string();
        log::info!(
            "{} {} {}",
            sample.key(),
            sample.xs_weight,
            sample.id.partition
        );

        let mask = self.selection_mask(&sample.records)?;
        let skim = sample.records.filter(&mask)?;
        let weights = compose_total_weight(
            &skim,
            &sample_name,
            sample.xs_weight,
            self.boson,
            self.region.apply_btag0_weight(),
        )?;

        counter.fill_sample(sample.key(), skim.height() as u64);
        if skim.height() == 0 {
            log::warn!("No events of {sample_name} pass the selection");
        } else {
            log::info!("Filling histograms with {} selected events", skim.height());
        }

        self.fill_histograms(histogrammer, &skim, &weights, sample, None)?;

        for sub in &self.sub_categories {
            let sub_mask = evaluate_mask(&skim, sub.selection.clone())?;
            let sub_skim = skim.filter(&sub_mask)?;
            let sub_weights: Vec<f64> = weights
                .iter()
                .zip(&sub_mask)
                .filter(|(_, pass)| pass.unwrap_or(false))
                .map(|(w, _)| *w)
                .collect();
            self.fill_histograms(histogrammer, &sub_skim, &sub_weights, sample, Some(&sub.name))?;
        }

        Ok(())
    }

    fn fill_histograms(
        &self,
        histogrammer: &mut Histogrammer,
        skim: &DataFrame,
        weights: &[f64],
        sample: &Sample,
        sub_key: Option<&str>,
    ) -> Result<()> {
        let sample_name = sample.id.to_string();
        let mut columns: FnvHashMap<String, Vec<f64>> = FnvHashMap::default();

        let filled = || self.specs.iter().filter(|spec| !spec.unfilled);

        for spec in filled() {
            for column in spec_columns(spec) {
                if let Entry::Vacant(slot) = columns.entry(column.to_owned()) {
                    slot.insert(column_values(skim, &sample_name, column)?);
                }
            }
        }

        for spec in filled() {
            let name = spec.name();
            let xs = &columns[spec.x.column_name()];

            match &spec.y {
                None => {
                    let hist = histogrammer.hist1d_mut(&name, sample.key(), sub_key)?;
                    fill_1d(hist, xs, weights, spec.overflow_in_last_bin)?;
                }
                Some(y) => {
                    let ys = &columns[y.column_name()];
                    let hist = histogrammer.hist2d_mut(&name, sample.key(), sub_key)?;
                    fill_2d(hist, xs, ys, weights)?;
                }
            }
        }

        Ok(())
    }
}

fn spec_columns(spec: &HistogramSpec) -> Vec<&str> {
    let mut columns = vec![spec.x.column_name()];
    if let Some(y) = &spec.y {
        columns.push(y.column_name());
    }
    columns
}

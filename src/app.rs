use std::path::PathBuf;

use crate::config::RunConfig;
use crate::error::Result;
use crate::histoer::configs::{HistogramList, HistogramSpec};
use crate::histogram_scripter::manual_histogram_scripts::vbs_histograms;
use crate::report::{JsonSink, Report, ReportSink};
use crate::samples::SampleRegistry;
use crate::selections::{Region, region_by_name};
use crate::util::processer::{EventPipeline, SubCategory};

/// Histogram list for the run: a YAML file when given, the built-in list otherwise.
pub fn histogram_specs(config: &RunConfig) -> Result<Vec<HistogramSpec>> {
    let list = match &config.histograms {
        Some(path) => HistogramList::load(path)?,
        None => HistogramList {
            histograms: vbs_histograms(),
        },
    };
    list.validate_names()?;
    Ok(list.histograms)
}

pub fn sub_categories(config: &RunConfig) -> Vec<SubCategory> {
    config
        .sub_keys
        .iter()
        .map(|(name, column)| SubCategory::from_flag_column(name, column))
        .collect()
}

/// Book, fill and summarize every sample of `samples`. Nothing is written.
pub fn run_with(
    config: &RunConfig,
    region: &dyn Region,
    specs: Vec<HistogramSpec>,
    samples: &SampleRegistry,
) -> Result<Report> {
    let mut pipeline = EventPipeline::new(
        region,
        config.lepton,
        config.boson,
        specs,
        sub_categories(config),
        &samples.keys(),
    )?;

    if config.parallel {
        pipeline.run_parallel(samples)?;
    } else {
        pipeline.run(samples)?;
    }

    let (histogrammer, total_entries) = pipeline.into_parts();
    Report::new(
        region,
        config.lepton,
        config.boson,
        &histogrammer,
        total_entries,
    )
}

/// Full run: configuration is checked before any sample is loaded, and the
/// output only appears once every sample has been filled.
pub fn run(config: &RunConfig) -> Result<PathBuf> {
    let region = region_by_name(&config.region)?;
    let specs = histogram_specs(config)?;

    let samples = SampleRegistry::load_bundle(&config.dframes)?;
    let report = run_with(config, region.as_ref(), specs, &samples)?;

    let output = config.output_path();
    JsonSink::new(&output).write(&report)?;
    Ok(output)
}

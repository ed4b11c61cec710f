use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::{BosonMode, LeptonChannel};
use crate::error::Result;
use crate::histoer::counter::EntryCounter;
use crate::histoer::histo1d::histogram1d::Histogram;
use crate::histoer::histo2d::histogram2d::Histogram2D;
use crate::histoer::histogrammer::{Booked, EntryKey, Histogrammer};
use crate::selections::Region;

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Histogram1DRecord {
    pub sample: String,
    pub sub_key: Option<String>,
    pub name: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub edges: Vec<f64>,
    pub contents: Vec<f64>,
    pub sumw2: Vec<f64>,
    pub underflow: f64,
    pub overflow: f64,
    pub entries: u64,
}

impl Histogram1DRecord {
    fn new(key: &EntryKey, hist: &Histogram) -> Self {
        Self {
            sample: key.sample.clone(),
            sub_key: key.sub.clone(),
            name: hist.name.clone(),
            title: hist.title.clone(),
            x_label: hist.x_label.clone(),
            y_label: hist.y_label.clone(),
            edges: hist.get_bin_edges(),
            contents: hist.bins.clone(),
            sumw2: hist.sumw2.clone(),
            underflow: hist.underflow,
            overflow: hist.overflow,
            entries: hist.entries,
        }
    }
}

/// 2D contents are written dense, flow slots included, indexed `[ix][iy]`.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Histogram2DRecord {
    pub sample: String,
    pub sub_key: Option<String>,
    pub name: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_edges: Vec<f64>,
    pub y_edges: Vec<f64>,
    pub contents: Vec<Vec<f64>>,
    pub entries: u64,
}

impl Histogram2DRecord {
    fn new(key: &EntryKey, hist: &Histogram2D) -> Self {
        Self {
            sample: key.sample.clone(),
            sub_key: key.sub.clone(),
            name: hist.name.clone(),
            title: hist.title.clone(),
            x_label: hist.x_label.clone(),
            y_label: hist.y_label.clone(),
            x_edges: hist.x_axis.edges(),
            y_edges: hist.y_axis.edges(),
            contents: hist.dense_counts(),
            entries: hist.entries,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct SelectionCode {
    pub region: String,
    pub text: String,
}

/// Everything a run produces, ready to be handed to a sink.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Report {
    pub region: String,
    pub lepton: LeptonChannel,
    pub boson: BosonMode,
    pub histograms_1d: Vec<Histogram1DRecord>,
    pub histograms_2d: Vec<Histogram2DRecord>,
    pub total_entries: EntryCounter,
    pub selection_code: SelectionCode,
}

impl Report {
    /// Records are grouped per sample key, then per sub-key, in booking order.
    pub fn new(
        region: &dyn Region,
        lepton: LeptonChannel,
        boson: BosonMode,
        histogrammer: &Histogrammer,
        total_entries: EntryCounter,
    ) -> Result<Self> {
        let mut histograms_1d = Vec::new();
        let mut histograms_2d = Vec::new();

        let subs: Vec<Option<&str>> = std::iter::once(None)
            .chain(histogrammer.sub_keys.iter().map(|s| Some(s.as_str())))
            .collect();

        for key in &histogrammer.keys {
            for sub in &subs {
                let entry = EntryKey::new(key, *sub);
                for collection in histogrammer.collections() {
                    match histogrammer.get(&collection.name, key, *sub)? {
                        Booked::Hist1D(hist) => {
                            histograms_1d.push(Histogram1DRecord::new(&entry, hist));
                        }
                        Booked::Hist2D(hist) => {
                            histograms_2d.push(Histogram2DRecord::new(&entry, hist));
                        }
                    }
                }
            }
        }

        Ok(Self {
            region: region.name().to_owned(),
            lepton,
            boson,
            histograms_1d,
            histograms_2d,
            total_entries,
            selection_code: SelectionCode {
                region: region.name().to_owned(),
                text: region.source_text().to_owned(),
            },
        })
    }

    pub fn histogram_1d(&self, name: &str) -> Option<&Histogram1DRecord> {
        self.histograms_1d.iter().find(|h| h.name == name)
    }

    pub fn histogram_2d(&self, name: &str) -> Option<&Histogram2DRecord> {
        self.histograms_2d.iter().find(|h| h.name == name)
    }
}

pub trait ReportSink {
    fn write(&mut self, report: &Report) -> Result<()>;
}

/// Pretty JSON file. The report goes to `<path>.tmp` first and is renamed
/// over `path` once fully written.
#[derive(Debug, Clone)]
pub struct JsonSink {
    pub path: PathBuf,
}

impl JsonSink {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl ReportSink for JsonSink {
    fn write(&mut self, report: &Report) -> Result<()> {
        let tmp = self.tmp_path();
        {
            let file = File::create(&tmp)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, report)?;
            writer.flush()?;
        }
        std::fs::rename(&tmp, &self.path)?;

        log::info!(
            "Wrote {} 1D and {} 2D histograms to {:?}",
            report.histograms_1d.len(),
            report.histograms_2d.len(),
            self.path
        );
        Ok(())
    }
}

/// Keeps the last report in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub report: Option<Report>,
}

impl ReportSink for MemorySink {
    fn write(&mut self, report: &Report) -> Result<()> {
        self.report = Some(report.clone());
        Ok(())
    }
}

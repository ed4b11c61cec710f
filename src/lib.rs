//! Weighted histogram booking and filling for the per-sample dataframes of a
//! VBS analysis, written out as one JSON report per region and channel.

#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod error;
pub mod histoer;
pub mod histogram_scripter;
pub mod report;
pub mod samples;
pub mod selections;
pub mod util;

pub use config::{BosonMode, LeptonChannel, RunConfig};
pub use error::{HistError, Result};
pub use report::{JsonSink, MemorySink, Report, ReportSink};
pub use samples::{Sample, SampleRegistry};
pub use selections::{ExprRegion, Region, region_by_name};
pub use util::processer::{EventPipeline, SubCategory};

pub mod axis;
pub mod configs;
pub mod counter;
pub mod fill;
pub mod histogrammer;

pub mod histo1d {
    pub mod filling;
    pub mod histogram1d;
    pub mod statistics;
}

pub mod histo2d {
    pub mod histogram2d;
    pub mod projections;
}

pub use axis::{Axis, BinLocation};
pub use configs::{AxisConfig, Binning, HistogramList, HistogramSpec};
pub use counter::EntryCounter;
pub use fill::{Weights, fill_1d, fill_2d};
pub use histo1d::histogram1d::Histogram;
pub use histo2d::histogram2d::Histogram2D;
pub use histogrammer::{Booked, EntryKey, HistogramCollection, Histogrammer, build, clone_for_keys};

use crate::error::{HistError, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Binning of one axis as written in a histogram list.
#[derive(Clone, serde::Deserialize, serde::Serialize, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Binning {
    FixedWidth { count: usize, low: f64, high: f64 },
    VariableWidth { edges: Vec<f64> },
}

#[derive(Clone, serde::Deserialize, serde::Serialize, Debug, PartialEq)]
pub struct AxisConfig {
    pub name: String, // Variable name, the histogram identity
    #[serde(default)]
    pub column: Option<String>, // Data column to fill from, defaults to the name
    pub binning: Binning,
    #[serde(default)]
    pub label: Option<String>, // Axis title, defaults to the name
}

impl AxisConfig {
    pub fn new(name: &str, binning: Binning) -> Self {
        Self {
            name: name.to_owned(),
            column: None,
            binning,
            label: None,
        }
    }

    pub fn with_column(mut self, column: &str) -> Self {
        self.column = Some(column.to_owned());
        self
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_owned());
        self
    }

    pub fn column_name(&self) -> &str {
        self.column.as_deref().unwrap_or(&self.name)
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// Declarative description of one histogram. Owns no histogram instance.
#[derive(Clone, serde::Deserialize, serde::Serialize, Debug, PartialEq)]
pub struct HistogramSpec {
    pub x: AxisConfig,
    #[serde(default)]
    pub y: Option<AxisConfig>,
    #[serde(default)]
    pub overflow_in_last_bin: bool, // Only meaningful for 1D histograms
    #[serde(default)]
    pub unfilled: bool, // Booked and written empty, its column is never read
}

impl HistogramSpec {
    /// 1D histogram with `count` bins over `[low, high)`.
    pub fn fixed_1d(name: &str, count: usize, low: f64, high: f64) -> Self {
        Self {
            x: AxisConfig::new(name, Binning::FixedWidth { count, low, high }),
            y: None,
            overflow_in_last_bin: false,
            unfilled: false,
        }
    }

    pub fn variable_1d(name: &str, edges: &[f64]) -> Self {
        Self {
            x: AxisConfig::new(
                name,
                Binning::VariableWidth {
                    edges: edges.to_vec(),
                },
            ),
            y: None,
            overflow_in_last_bin: false,
            unfilled: false,
        }
    }

    pub fn new_2d(x: AxisConfig, y: AxisConfig) -> Self {
        Self {
            x,
            y: Some(y),
            overflow_in_last_bin: false,
            unfilled: false,
        }
    }

    pub fn folded(mut self) -> Self {
        self.overflow_in_last_bin = true;
        self
    }

    pub fn never_filled(mut self) -> Self {
        self.unfilled = true;
        self
    }

    pub fn reading(mut self, column: &str) -> Self {
        self.x.column = Some(column.to_owned());
        self
    }

    pub fn is_2d(&self) -> bool {
        self.y.is_some()
    }

    /// Variable name for 1D, `{x_name}_{y_name}` for 2D.
    pub fn name(&self) -> String {
        match &self.y {
            None => self.x.name.clone(),
            Some(y) => format!("{}_{}", self.x.name, y.name),
        }
    }
}

#[derive(serde::Deserialize, serde::Serialize, Clone, Debug, Default)]
pub struct HistogramList {
    pub histograms: Vec<HistogramSpec>,
}

impl HistogramList {
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let list: Self = serde_yaml::from_reader(BufReader::new(file))?;
        log::info!(
            "Loaded {} histogram definitions from {:?}",
            list.histograms.len(),
            path
        );
        Ok(list)
    }

    // Names are suffixed by sample key later on, so they have to be unique up front
    pub fn validate_names(&self) -> Result<()> {
        let mut seen = fnv::FnvHashSet::default();
        for spec in &self.histograms {
            let name = spec.name();
            if !seen.insert(name.clone()) {
                return Err(HistError::DuplicateHistogram(name));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_names() {
        let h1 = HistogramSpec::fixed_1d("lept1_pt", 40, 0.0, 2000.0);
        assert_eq!(h1.name(), "lept1_pt");
        assert_eq!(h1.x.column_name(), "lept1_pt");
        assert!(!h1.is_2d());

        let h2 = HistogramSpec::new_2d(
            AxisConfig::new(
                "n2b1",
                Binning::FixedWidth {
                    count: 40,
                    low: 0.0,
                    high: 0.5,
                },
            )
            .with_column("fatjet_n2b1"),
            AxisConfig::new(
                "tau21",
                Binning::FixedWidth {
                    count: 40,
                    low: 0.0,
                    high: 1.0,
                },
            )
            .with_column("fatjet_tau21"),
        );
        assert_eq!(h2.name(), "n2b1_tau21");
        assert_eq!(h2.x.column_name(), "fatjet_n2b1");
    }

    #[test]
    fn test_yaml_list() {
        let yaml = r#"
histograms:
  - x:
      name: wv_m_8bin
      column: wv_m
      binning:
        variable_width:
          edges: [600, 700, 800, 900, 1000, 1200, 1500, 2000, 2500]
    overflow_in_last_bin: true
  - x:
      name: lept1_eta
      binning:
        fixed_width: { count: 26, low: -2.6, high: 2.6 }
"#;
        let list = HistogramList::from_yaml_str(yaml).unwrap();
        assert_eq!(list.histograms.len(), 2);
        assert!(list.histograms[0].overflow_in_last_bin);
        assert_eq!(list.histograms[0].x.column_name(), "wv_m");
        assert!(!list.histograms[1].overflow_in_last_bin);
        list.validate_names().unwrap();
    }

    #[test]
    fn test_unknown_binning_form_is_rejected() {
        let yaml = r#"
histograms:
  - x:
      name: lept1_eta
      binning:
        logarithmic: { count: 26 }
"#;
        let err = HistogramList::from_yaml_str(yaml).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let list = HistogramList {
            histograms: vec![
                HistogramSpec::fixed_1d("w_pt", 50, 0.0, 2000.0),
                HistogramSpec::fixed_1d("w_pt", 10, 0.0, 100.0),
            ],
        };
        assert!(matches!(
            list.validate_names(),
            Err(HistError::DuplicateHistogram(name)) if name == "w_pt"
        ));
    }
}

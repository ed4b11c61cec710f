use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{HistError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
pub enum LeptonChannel {
    #[serde(rename = "e")]
    Electron,
    #[serde(rename = "m")]
    Muon,
}

impl LeptonChannel {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Electron => "e",
            Self::Muon => "m",
        }
    }
}

impl FromStr for LeptonChannel {
    type Err = HistError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "e" => Ok(Self::Electron),
            "m" => Ok(Self::Muon),
            other => Err(HistError::config(format!(
                "unknown lepton channel '{other}', expected 'e' or 'm'"
            ))),
        }
    }
}

impl fmt::Display for LeptonChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// W-like analyses select one lepton, Z-like analyses two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
pub enum BosonMode {
    W,
    Z,
}

impl FromStr for BosonMode {
    type Err = HistError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "W" => Ok(Self::W),
            "Z" => Ok(Self::Z),
            other => Err(HistError::config(format!(
                "unknown boson mode '{other}', expected 'W' or 'Z'"
            ))),
        }
    }
}

impl fmt::Display for BosonMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::W => write!(f, "W"),
            Self::Z => write!(f, "Z"),
        }
    }
}

/// Everything one histogramming run needs to know.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct RunConfig {
    pub dframes: PathBuf,            // Sample bundle directory
    pub lepton: LeptonChannel,       // Lepton channel
    pub boson: BosonMode,            // W or Z selection
    pub region: String,              // Name of the selection region
    pub output: Option<PathBuf>,     // Defaults to {region}_{lepton}.json
    pub histograms: Option<PathBuf>, // YAML histogram list, defaults to the built-in list
    pub sub_keys: Vec<(String, String)>, // (sub-key, boolean column)
    pub parallel: bool,
}

impl RunConfig {
    pub fn new(dframes: PathBuf, lepton: LeptonChannel, boson: BosonMode, region: &str) -> Self {
        Self {
            dframes,
            lepton,
            boson,
            region: region.to_owned(),
            output: None,
            histograms: None,
            sub_keys: Vec::new(),
            parallel: false,
        }
    }

    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => PathBuf::from(format!("{}_{}.json", self.region, self.lepton)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        assert_eq!("e".parse::<LeptonChannel>().unwrap(), LeptonChannel::Electron);
        assert_eq!("m".parse::<LeptonChannel>().unwrap(), LeptonChannel::Muon);
        assert_eq!("Z".parse::<BosonMode>().unwrap(), BosonMode::Z);

        assert!("tau".parse::<LeptonChannel>().unwrap_err().is_configuration());
        assert!("H".parse::<BosonMode>().unwrap_err().is_configuration());
    }

    #[test]
    fn test_default_output_path() {
        let mut config = RunConfig::new(
            PathBuf::from("df_step1"),
            LeptonChannel::Muon,
            BosonMode::W,
            "signal_loose_W",
        );
        assert_eq!(config.output_path(), PathBuf::from("signal_loose_W_m.json"));

        config.output = Some(PathBuf::from("out/hists.json"));
        assert_eq!(config.output_path(), PathBuf::from("out/hists.json"));
    }
}

use polars::prelude::*;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{HistError, Result};

pub const BUNDLE_MANIFEST: &str = "bundle.yaml";

/// `{key}/{partition}`: several partitions (files) merge into one sample key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SampleId {
    pub key: String,
    pub partition: String,
}

impl FromStr for SampleId {
    type Err = HistError;

    fn from_str(s: &str) -> Result<Self> {
        let (key, partition) = s.split_once('/').unwrap_or((s, ""));
        if key.is_empty() {
            return Err(HistError::config(format!("sample id '{s}' has an empty key")));
        }
        Ok(Self {
            key: key.to_owned(),
            partition: partition.to_owned(),
        })
    }
}

impl std::fmt::Display for SampleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.partition.is_empty() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{}/{}", self.key, self.partition)
        }
    }
}

/// One partition of a sample: its cross-section weight and event records.
#[derive(Debug, Clone)]
pub struct Sample {
    pub id: SampleId,
    pub xs_weight: f64,
    pub records: DataFrame,
}

impl Sample {
    pub fn new(id: &str, xs_weight: f64, records: DataFrame) -> Result<Self> {
        Ok(Self {
            id: id.parse()?,
            xs_weight,
            records,
        })
    }

    pub fn key(&self) -> &str {
        &self.id.key
    }

    pub fn is_data(&self) -> bool {
        self.id.key.contains(crate::histoer::counter::DATA_LABEL)
    }

    /// Column as f64 values; a missing column or nulls are data-contract errors.
    pub fn column_values(&self, column: &str) -> Result<Vec<f64>> {
        column_values(&self.records, &self.id.to_string(), column)
    }
}

pub fn column_values(df: &DataFrame, sample: &str, column: &str) -> Result<Vec<f64>> {
    let series = df
        .column(column)
        .ok()
        .ok_or_else(|| HistError::MissingColumn {
            sample: sample.to_owned(),
            column: column.to_owned(),
        })?;

    let casted = series.cast(&DataType::Float64)?;
    let values = casted.f64()?;
    if values.null_count() > 0 {
        return Err(HistError::NullValues {
            sample: sample.to_owned(),
            column: column.to_owned(),
        });
    }

    Ok(values.into_no_null_iter().collect())
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct PartitionEntry {
    pub id: String,
    pub xs_weight: f64,
    pub path: PathBuf, // Parquet file, relative to the bundle directory
}

#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
pub struct BundleManifest {
    pub partitions: Vec<PartitionEntry>,
}

/// Every sample partition of one run, in processing order.
#[derive(Debug, Clone)]
pub struct SampleRegistry {
    samples: Vec<Sample>,
}

impl SampleRegistry {
    pub fn new(samples: Vec<Sample>) -> Result<Self> {
        if samples.is_empty() {
            return Err(HistError::EmptyRegistry);
        }
        Ok(Self { samples })
    }

    /// Distinct sample keys, in first-seen order.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        for sample in &self.samples {
            if !keys.iter().any(|k| k == sample.key()) {
                keys.push(sample.key().to_owned());
            }
        }
        keys
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn load_bundle(dir: &Path) -> Result<Self> {
        let manifest_path = dir.join(BUNDLE_MANIFEST);
        let file = File::open(&manifest_path)?;
        let manifest: BundleManifest = serde_yaml::from_reader(BufReader::new(file))?;
        log::info!(
            "Loading {} partitions listed in {:?}",
            manifest.partitions.len(),
            manifest_path
        );

        let samples = manifest
            .partitions
            .iter()
            .map(|entry| {
                let path = dir.join(&entry.path);
                let records = ParquetReader::new(File::open(&path)?).finish()?;
                log::info!("Loaded {} ({} rows) from {:?}", entry.id, records.height(), path);
                Sample::new(&entry.id, entry.xs_weight, records)
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_id_parsing() {
        let id: SampleId = "ttbar/tree_12.root".parse().unwrap();
        assert_eq!(id.key, "ttbar");
        assert_eq!(id.partition, "tree_12.root");
        assert_eq!(id.to_string(), "ttbar/tree_12.root");

        let bare: SampleId = "wjets".parse().unwrap();
        assert_eq!(bare.partition, "");
        assert!("/part0".parse::<SampleId>().is_err());
    }

    #[test]
    fn test_registry_keys_merge_partitions() {
        let df = df!("x" => [1.0, 2.0]).unwrap();
        let registry = SampleRegistry::new(vec![
            Sample::new("ttbar/p0", 1.0, df.clone()).unwrap(),
            Sample::new("wjets/p0", 1.0, df.clone()).unwrap(),
            Sample::new("ttbar/p1", 1.0, df).unwrap(),
        ])
        .unwrap();
        assert_eq!(registry.keys(), vec!["ttbar".to_string(), "wjets".to_string()]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_empty_registry_is_an_error() {
        assert!(matches!(
            SampleRegistry::new(vec![]),
            Err(HistError::EmptyRegistry)
        ));
    }

    #[test]
    fn test_column_values() {
        let df = df!(
            "n" => [1i32, 2, 3],
            "maybe" => [Some(1.0), None, Some(2.0)]
        )
        .unwrap();
        let sample = Sample::new("ttbar/p0", 1.0, df).unwrap();

        assert_eq!(sample.column_values("n").unwrap(), vec![1.0, 2.0, 3.0]);
        assert!(matches!(
            sample.column_values("missing"),
            Err(HistError::MissingColumn { .. })
        ));
        assert!(matches!(
            sample.column_values("maybe"),
            Err(HistError::NullValues { .. })
        ));
    }

    #[test]
    fn test_load_bundle_roundtrip() {
        let dir = std::env::temp_dir().join(format!("vbs_histos_bundle_{}", std::process::id()));
        std::fs::create_dir_all(dir.join("ttbar")).unwrap();

        let mut df = df!("lept1_pt" => [45.0, 80.0, 120.0]).unwrap();
        let file = File::create(dir.join("ttbar/part0.parquet")).unwrap();
        ParquetWriter::new(file).finish(&mut df).unwrap();

        std::fs::write(
            dir.join(BUNDLE_MANIFEST),
            "partitions:\n  - id: ttbar/part0\n    xs_weight: 0.25\n    path: ttbar/part0.parquet\n",
        )
        .unwrap();

        let registry = SampleRegistry::load_bundle(&dir).unwrap();
        assert_eq!(registry.keys(), vec!["ttbar".to_string()]);
        assert_eq!(registry.samples()[0].xs_weight, 0.25);
        assert_eq!(registry.samples()[0].records.height(), 3);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}

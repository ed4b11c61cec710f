use polars::error::PolarsError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HistError>;

#[derive(Debug, Error)]
pub enum HistError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("histogram '{0}' is booked more than once")]
    DuplicateHistogram(String),
    #[error("no booked histogram '{name}' for key '{key}'")]
    UnregisteredHistogram { name: String, key: String },
    #[error("sample '{sample}' has no column '{column}'")]
    MissingColumn { sample: String, column: String },
    #[error("column '{column}' of sample '{sample}' contains null values")]
    NullValues { sample: String, column: String },
    #[error("length mismatch in {context}: expected {expected}, found {found}")]
    LengthMismatch {
        context: String,
        expected: usize,
        found: usize,
    },
    #[error("the sample registry is empty")]
    EmptyRegistry,
    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HistError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn length_mismatch(context: impl Into<String>, expected: usize, found: usize) -> Self {
        Self::LengthMismatch {
            context: context.into(),
            expected,
            found,
        }
    }

    /// Errors that abort the run before booking completes.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::DuplicateHistogram(_) | Self::Yaml(_)
        )
    }

    /// Errors raised while reading or filling a sample's records.
    pub fn is_data_contract(&self) -> bool {
        matches!(
            self,
            Self::MissingColumn { .. }
                | Self::NullValues { .. }
                | Self::LengthMismatch { .. }
                | Self::EmptyRegistry
        )
    }
}

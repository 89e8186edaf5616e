use std::path::PathBuf;

use thiserror::Error;

/// Set of errors occurring while producing the performance report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The benchmark results file does not exist.
    #[error("benchmark results not found at {}", .0.display())]
    DataNotFound(PathBuf),

    /// Results table lacks a required column or holds a non-numeric value in one.
    #[error("results table does not match the expected schema: {0}")]
    SchemaMismatch(String),

    #[error("results table loaded from {} has no rows to plot", .0.display())]
    EmptyResults(PathBuf),

    /// An error related to reading the delimited results file.
    #[error("Could not properly load CSV results: {0}")]
    Csv(#[from] csv::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Drawing or encoding the chart image failed.
    #[error("failed to render chart: {0}")]
    Render(String),

    /// The chart could not be presented in a viewer. The artifact is already on disk.
    #[error("chart viewer unavailable: {0}")]
    DisplayUnavailable(String),

    #[error("{0}")]
    Settings(#[from] SettingsError),
}

impl ReportError {
    /// Short, stable label for the error kind, recorded on log events.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::DataNotFound(_) => "data_not_found",
            Self::SchemaMismatch(_) => "schema_mismatch",
            Self::EmptyResults(_) => "empty_results",
            Self::Csv(_) => "csv",
            Self::Io(_) => "io",
            Self::Render(_) => "render",
            Self::DisplayUnavailable(_) => "display_unavailable",
            Self::Settings(_) => "settings",
        }
    }

    /// Whether the pipeline may carry on after this error. Only a failure to display the
    /// already written chart qualifies.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::DisplayUnavailable(_))
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    /// Error in configuration settings.
    #[error(transparent)]
    Configuration(#[from] config::ConfigError),

    #[error("{0}")]
    IOError(#[from] std::io::Error),
}

use std::path::{Path, PathBuf};

use sortbench_report::settings::{ChartSettings, Settings};
use tempfile::TempDir;

pub fn init_tracing() {
    once_cell::sync::Lazy::force(&sortbench_report::tracing::TEST_TRACING);
}

pub fn data_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data").join(name)
}

/// Working directory for a report run, laid out the way the tool expects: `results.csv` at the
/// root and charts written under `charts/`.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn empty() -> Self {
        Self { dir: tempfile::tempdir().expect("failed to create temp workspace") }
    }

    pub fn with_results(fixture: &str) -> Self {
        let workspace = Self::empty();
        std::fs::copy(data_path(fixture), workspace.input_path()).expect("failed to copy results fixture");
        workspace
    }

    pub fn input_path(&self) -> PathBuf {
        self.dir.path().join("results.csv")
    }

    pub fn charts_dir(&self) -> PathBuf {
        self.dir.path().join("charts")
    }

    pub fn settings(&self) -> Settings {
        Settings {
            input_path: self.input_path(),
            output_directory: self.charts_dir(),
            display: false,
            chart: ChartSettings { width: 480, height: 320, draw_labels: false, ..ChartSettings::default() },
            ..Settings::default()
        }
    }
}

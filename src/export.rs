pub use viewer::{HeadlessViewer, SystemViewer, Viewer};

mod viewer;

use std::fs;
use std::path::{Path, PathBuf};

use crate::chart::{self, Figure};
use crate::error::ReportError;
use crate::settings::Settings;

/// Chart image persisted on disk. Only [`Exporter::write`] produces one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartArtifact {
    path: PathBuf,
}

impl ChartArtifact {
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }
}

/// Create `directory` and any missing parents. Succeeds when it already exists.
#[tracing::instrument(level = "debug")]
pub fn ensure_directory(directory: &Path) -> Result<(), ReportError> {
    fs::create_dir_all(directory)?;
    Ok(())
}

/// Writes figures to `<directory>/<file_name>`, replacing the previous chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exporter {
    directory: PathBuf,
    file_name: String,
    draw_labels: bool,
}

impl Exporter {
    pub fn new(directory: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self { directory: directory.into(), file_name: file_name.into(), draw_labels: true }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.output_directory.clone(), settings.output_filename.clone())
            .with_labels(settings.chart.draw_labels)
    }

    pub fn with_labels(self, draw_labels: bool) -> Self {
        Self { draw_labels, ..self }
    }

    pub fn target_path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }

    #[tracing::instrument(level = "info", skip(figure))]
    pub fn write(&self, figure: &Figure) -> Result<ChartArtifact, ReportError> {
        ensure_directory(&self.directory)?;
        let path = self.target_path();
        chart::draw_png(figure, &path, self.draw_labels)?;
        tracing::info!(?path, "chart written.");
        Ok(ChartArtifact { path })
    }

    /// Best-effort display of a written chart. A viewer failure is logged and returned for the
    /// caller to inspect; the artifact stays on disk either way.
    pub fn present(&self, artifact: &ChartArtifact, viewer: &dyn Viewer) -> Result<(), ReportError> {
        viewer.show(artifact).map_err(|err| {
            tracing::warn!(error=?err, kind=%err.slug(), path=?artifact.path(), "could not display chart.");
            err
        })
    }
}

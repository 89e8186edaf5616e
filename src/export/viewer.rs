use std::ffi::OsString;
use std::fmt::Debug;
use std::process::Command;

use super::ChartArtifact;
use crate::error::ReportError;

/// Presents a chart that has already been written to disk.
///
/// Taking a [`ChartArtifact`] means a viewer can only ever run after the write.
pub trait Viewer: Debug {
    fn show(&self, artifact: &ChartArtifact) -> Result<(), ReportError>;
}

/// Opens the chart with the platform's default image viewer.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct SystemViewer;

impl SystemViewer {
    fn opener() -> Command {
        if cfg!(target_os = "macos") {
            Command::new("open")
        } else if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", ""]);
            cmd
        } else {
            Command::new("xdg-open")
        }
    }

    /// On X11/Wayland platforms a surface exists when `DISPLAY` or `WAYLAND_DISPLAY`, as
    /// resolved by `lookup`, is set and non-empty.
    fn has_display_surface(lookup: impl Fn(&str) -> Option<OsString>) -> bool {
        if cfg!(any(target_os = "macos", target_os = "windows")) {
            return true;
        }

        ["DISPLAY", "WAYLAND_DISPLAY"]
            .iter()
            .any(|var| lookup(var).map_or(false, |v| !v.is_empty()))
    }

    fn show_with(
        &self, artifact: &ChartArtifact, lookup: impl Fn(&str) -> Option<OsString>,
    ) -> Result<(), ReportError> {
        if !Self::has_display_surface(lookup) {
            return Err(ReportError::DisplayUnavailable("no display surface available".to_string()));
        }

        let status = Self::opener()
            .arg(artifact.path())
            .status()
            .map_err(|err| ReportError::DisplayUnavailable(format!("failed to launch viewer: {}", err)))?;

        if status.success() {
            Ok(())
        } else {
            Err(ReportError::DisplayUnavailable(format!("viewer exited with {}", status)))
        }
    }
}

impl Viewer for SystemViewer {
    #[tracing::instrument(level = "debug")]
    fn show(&self, artifact: &ChartArtifact) -> Result<(), ReportError> {
        self.show_with(artifact, |var| std::env::var_os(var))
    }
}

/// Viewer for headless runs: presents nothing.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct HeadlessViewer;

impl Viewer for HeadlessViewer {
    fn show(&self, artifact: &ChartArtifact) -> Result<(), ReportError> {
        tracing::debug!(path=?artifact.path(), "headless run - chart not displayed.");
        Ok(())
    }
}

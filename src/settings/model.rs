use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const DEFAULT_INPUT_PATH: &str = "results.csv";
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "charts";
pub const DEFAULT_OUTPUT_FILENAME: &str = "performance_analysis.png";
pub const DEFAULT_TITLE: &str = "External Merge Sort Performance Analysis";

/// Where the report reads from and writes to, and how it looks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub input_path: PathBuf,
    pub output_directory: PathBuf,
    pub output_filename: String,
    pub locale: Locale,
    /// Open the written chart in the platform viewer.
    pub display: bool,
    pub chart: ChartSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_directory: PathBuf::from(DEFAULT_OUTPUT_DIRECTORY),
            output_filename: DEFAULT_OUTPUT_FILENAME.to_string(),
            locale: Locale::default(),
            display: true,
            chart: ChartSettings::default(),
        }
    }
}

impl Settings {
    pub fn output_path(&self) -> PathBuf {
        self.output_directory.join(&self.output_filename)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Draw the title, axis descriptions and tick labels. Without labels the chart is drawn
    /// from shapes alone and never loads a font.
    pub draw_labels: bool,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            width: 1000,
            height: 600,
            draw_labels: true,
        }
    }
}

/// Language of the console messages.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    #[default]
    Vi,
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        match self {
            Self::En => "en",
            Self::Vi => "vi",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Self::En),
            "vi" | "vietnamese" => Ok(Self::Vi),
            other => Err(format!("do not recognize {} locale.", other)),
        }
    }
}

// /////////////////////////////////////////////////////
// // Unit Tests ///////////////////////////////////////

pub use model::*;

mod model;

use std::path::{Path, PathBuf};

use clap::Parser;
use config::builder::DefaultState;
use config::ConfigBuilder;

use crate::error::SettingsError;

/// Load settings from the current working directory, the command line and `APP__*` environment
/// variables.
pub fn get_settings(opts: &CliOptions) -> Result<Settings, SettingsError> {
    let base_path = std::env::current_dir()?;
    load_settings(opts, &base_path)
}

/// Layer settings, lowest precedence first: built-in defaults, optional
/// `<base_path>/configuration/base`, the `--config` file, `APP__*` environment, then CLI flags.
#[tracing::instrument(level = "debug", skip(opts))]
pub fn load_settings(opts: &CliOptions, base_path: &Path) -> Result<Settings, SettingsError> {
    let configuration_directory = base_path.join("configuration");

    let mut builder = config::Config::builder()
        .add_source(config::Config::try_from(&Settings::default())?)
        .add_source(config::File::from(configuration_directory.join("base")).required(false));

    if let Some(ref config_path) = opts.config {
        builder = builder.add_source(config::File::from(config_path.clone()).required(true));
    }

    // Add in settings from environment variables (with a prefix of APP and '__' as separator)
    // E.g. `APP__CHART__WIDTH=1200` would set `Settings.chart.width`
    builder = builder.add_source(
        config::Environment::with_prefix("app")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    builder = apply_cli_overrides(builder, opts)?;
    let settings: Settings = builder.build()?.try_deserialize()?;
    tracing::debug!(?settings, "settings loaded");
    Ok(settings)
}

fn apply_cli_overrides(
    builder: ConfigBuilder<DefaultState>, opts: &CliOptions,
) -> Result<ConfigBuilder<DefaultState>, SettingsError> {
    let path_rep = |p: &PathBuf| p.to_string_lossy().into_owned();

    let mut builder = builder
        .set_override_option("input_path", opts.input.as_ref().map(path_rep))?
        .set_override_option("output_directory", opts.output_dir.as_ref().map(path_rep))?
        .set_override_option("output_filename", opts.output_file.clone())?
        .set_override_option("locale", opts.locale.map(|l| l.to_string()))?;

    if opts.no_display {
        builder = builder.set_override("display", false)?;
    }

    if opts.no_labels {
        builder = builder.set_override("chart.draw_labels", false)?;
    }

    Ok(builder)
}

/// Command line options. With none given, the report reads `results.csv` and writes
/// `charts/performance_analysis.png` relative to the working directory.
#[derive(Parser, Debug, Default, Clone)]
#[command(version, about = "Render the external merge sort benchmark performance chart")]
pub struct CliOptions {
    /// Configuration file layered over the defaults and `configuration/base`.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Benchmark results table (CSV).
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Directory receiving the chart image; created when missing.
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// File name of the chart image inside the output directory.
    #[arg(long, value_name = "NAME")]
    pub output_file: Option<String>,

    /// Language of console messages (vi|en), Vietnamese unless set.
    #[arg(long)]
    pub locale: Option<Locale>,

    /// Write the chart without opening a viewer.
    #[arg(long, default_value_t = false)]
    pub no_display: bool,

    /// Draw the chart without title, axis descriptions or tick labels.
    #[arg(long, default_value_t = false)]
    pub no_labels: bool,
}

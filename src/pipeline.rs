use std::io::Write;

use crate::chart;
use crate::error::ReportError;
use crate::export::{ChartArtifact, Exporter, Viewer};
use crate::messages;
use crate::results::{self, BenchmarkRecord, ResultsTable, RunSummary};
use crate::settings::Settings;

/// Load the benchmark results, render the performance chart, write it, then hand it to the
/// viewer.
///
/// Console messages for the person running the report go to `console`: the diagnostic for a
/// missing results file, or the success message naming the chart path. A missing results file
/// short-circuits before anything is created on disk. A viewer failure is logged and does not
/// fail the run since the chart is already written by then.
#[tracing::instrument(level = "info", skip(settings, viewer, console), fields(input=?settings.input_path))]
pub fn run<W: Write>(settings: &Settings, viewer: &dyn Viewer, console: &mut W) -> Result<ChartArtifact, ReportError> {
    let table = match results::load_results(&settings.input_path) {
        Ok(table) => table,
        Err(err @ ReportError::DataNotFound(_)) => {
            writeln!(console, "{}", messages::data_not_found(settings.locale, &settings.input_path))?;
            return Err(err);
        },
        Err(err) => return Err(err),
    };

    let records = table.records()?;
    log_summary(&table, &records);
    let figure = chart::render_records(&records, table.source(), &settings.chart)?;

    let exporter = Exporter::from_settings(settings);
    let artifact = exporter.write(&figure)?;
    writeln!(console, "{}", messages::chart_saved(settings.locale, artifact.path()))?;
    console.flush()?;

    if let Err(err) = exporter.present(&artifact, viewer) {
        if !err.is_recoverable() {
            return Err(err);
        }
    }

    Ok(artifact)
}

fn log_summary(table: &ResultsTable, records: &[BenchmarkRecord]) {
    match RunSummary::from_records(records) {
        Some(summary) => tracing::info!(
            nr_runs=%summary.nr_runs,
            fastest_chunk_mb=%summary.fastest.chunk_size_mb,
            fastest_total_time_s=%summary.fastest.total_time_s,
            peak_throughput_chunk_mb=%summary.peak_throughput.chunk_size_mb,
            peak_throughput=%summary.peak_throughput.throughput_elements_per_sec,
            "benchmark results summary."
        ),
        None => tracing::info!(source=?table.source(), "benchmark results table is empty."),
    }
}

use std::io;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use serde::Deserialize;

use crate::error::ReportError;

pub const CHUNK_SIZE_COLUMN: &str = "ChunkSize_MB";
pub const TOTAL_TIME_COLUMN: &str = "TotalTime_s";
pub const THROUGHPUT_COLUMN: &str = "Throughput_elements_sec";
pub const REQUIRED_COLUMNS: [&str; 3] = [CHUNK_SIZE_COLUMN, TOTAL_TIME_COLUMN, THROUGHPUT_COLUMN];

/// One benchmark run: the chunk size the external sort was configured with and what it
/// measured.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
pub struct BenchmarkRecord {
    #[serde(rename = "ChunkSize_MB")]
    pub chunk_size_mb: f64,
    #[serde(rename = "TotalTime_s")]
    pub total_time_s: f64,
    #[serde(rename = "Throughput_elements_sec")]
    pub throughput_elements_per_sec: f64,
}

impl BenchmarkRecord {
    pub fn new(chunk_size_mb: f64, total_time_s: f64, throughput_elements_per_sec: f64) -> Self {
        Self { chunk_size_mb, total_time_s, throughput_elements_per_sec }
    }

    /// Category label of the run on the chart's x-axis, e.g. `"10 MB"` or `"2.5 MB"`.
    pub fn chunk_label(&self) -> String {
        format!("{} MB", self.chunk_size_mb)
    }
}

/// Benchmark results as read from the delimited source, in source row order.
///
/// The table holds the raw header and rows; columns are only interpreted when typed records
/// are requested, so a table lacking a required column still loads.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsTable {
    source: PathBuf,
    headers: StringRecord,
    rows: Vec<StringRecord>,
}

impl ResultsTable {
    pub fn from_reader<R: io::Read>(rdr: R, source: impl Into<PathBuf>) -> Result<Self, ReportError> {
        let reader = reader_builder().from_reader(rdr);
        Self::read_all(reader, source.into())
    }

    fn read_all<R: io::Read>(mut reader: csv::Reader<R>, source: PathBuf) -> Result<Self, ReportError> {
        let headers = reader.headers()?.clone();
        let rows = reader.records().collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(?source, nr_rows=%rows.len(), ?headers, "read results table.");
        Ok(Self { source, headers, rows })
    }

    pub fn source(&self) -> &Path {
        self.source.as_path()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn missing_columns(&self) -> Vec<&'static str> {
        REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|column| !self.headers.iter().any(|h| h == *column))
            .collect()
    }

    /// Typed view of every row, in source order. Columns are matched by name; extra columns
    /// are ignored.
    pub fn records(&self) -> Result<Vec<BenchmarkRecord>, ReportError> {
        let missing = self.missing_columns();
        if !missing.is_empty() {
            return Err(ReportError::SchemaMismatch(format!(
                "missing required column(s) {} in {}",
                missing.join(", "),
                self.source.display()
            )));
        }

        self.rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                row.deserialize::<BenchmarkRecord>(Some(&self.headers)).map_err(|err| {
                    ReportError::SchemaMismatch(format!("row {} of {}: {}", idx + 1, self.source.display(), err))
                })
            })
            .collect()
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RunSummary {
    pub nr_runs: usize,
    pub fastest: BenchmarkRecord,
    pub peak_throughput: BenchmarkRecord,
}

impl RunSummary {
    /// Fastest and highest-throughput runs, or `None` when there are no records.
    pub fn from_records(records: &[BenchmarkRecord]) -> Option<Self> {
        let fastest = records.iter().min_by(|lhs, rhs| lhs.total_time_s.total_cmp(&rhs.total_time_s));
        let peak = records
            .iter()
            .max_by(|lhs, rhs| lhs.throughput_elements_per_sec.total_cmp(&rhs.throughput_elements_per_sec));

        fastest.zip(peak).map(|(fastest, peak)| Self {
            nr_runs: records.len(),
            fastest: *fastest,
            peak_throughput: *peak,
        })
    }
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    // short rows load; their missing fields surface once typed records are requested
    builder.has_headers(true).flexible(true).trim(csv::Trim::All);
    builder
}

/// Load the benchmark results table at `path`.
///
/// A missing file yields [`ReportError::DataNotFound`]; nothing else about the file is
/// checked here.
#[tracing::instrument(level = "info")]
pub fn load_results(path: &Path) -> Result<ResultsTable, ReportError> {
    let reader = reader_builder().from_path(path).map_err(|err| {
        let not_found = matches!(err.kind(), csv::ErrorKind::Io(io_err) if io_err.kind() == io::ErrorKind::NotFound);
        if not_found {
            ReportError::DataNotFound(path.to_path_buf())
        } else {
            err.into()
        }
    })?;

    ResultsTable::read_all(reader, path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use claim::*;
    use pretty_assertions::assert_eq;

    use super::*;

    const RESULTS: &str = "\
ChunkSize_MB,TotalTime_s,Throughput_elements_sec
1,5.0,100
5,3.0,500
10,2.0,1000
";

    #[test]
    fn test_records_preserve_row_order() {
        let table = assert_ok!(ResultsTable::from_reader(RESULTS.as_bytes(), "results.csv"));
        assert_eq!(table.len(), 3);

        let records = assert_ok!(table.records());
        assert_eq!(
            records,
            vec![
                BenchmarkRecord::new(1.0, 5.0, 100.0),
                BenchmarkRecord::new(5.0, 3.0, 500.0),
                BenchmarkRecord::new(10.0, 2.0, 1000.0),
            ]
        );
    }

    #[test]
    fn test_rows_are_not_sorted() {
        let data = "ChunkSize_MB,TotalTime_s,Throughput_elements_sec\n10,2.0,1000\n1,5.0,100\n10,2.2,950\n";
        let table = assert_ok!(ResultsTable::from_reader(data.as_bytes(), "results.csv"));
        let labels: Vec<_> = assert_ok!(table.records()).iter().map(|r| r.chunk_label()).collect();
        assert_eq!(labels, vec!["10 MB", "1 MB", "10 MB"]);
    }

    #[test]
    fn test_columns_matched_by_name_and_extras_ignored() {
        let data = "\
Run, Throughput_elements_sec, ChunkSize_MB, Notes, TotalTime_s
a, 400000, 10, warm cache, 2.5
";
        let table = assert_ok!(ResultsTable::from_reader(data.as_bytes(), "results.csv"));
        let records = assert_ok!(table.records());
        assert_eq!(records, vec![BenchmarkRecord::new(10.0, 2.5, 400_000.0)]);
    }

    #[test]
    fn test_missing_column_loads_but_fails_typed_access() {
        let data = "ChunkSize_MB,TotalTime_s\n1,5.0\n";
        let table = assert_ok!(ResultsTable::from_reader(data.as_bytes(), "results.csv"));
        assert_eq!(table.missing_columns(), vec![THROUGHPUT_COLUMN]);

        let err = assert_err!(table.records());
        assert!(matches!(err, ReportError::SchemaMismatch(ref msg) if msg.contains(THROUGHPUT_COLUMN)));
    }

    #[test]
    fn test_non_numeric_value_is_schema_mismatch() {
        let data = "ChunkSize_MB,TotalTime_s,Throughput_elements_sec\n1,fast,100\n";
        let table = assert_ok!(ResultsTable::from_reader(data.as_bytes(), "results.csv"));
        let err = assert_err!(table.records());
        assert!(matches!(err, ReportError::SchemaMismatch(ref msg) if msg.contains("row 1")));
    }

    #[test]
    fn test_load_missing_file_is_data_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        let err = assert_err!(load_results(&path));
        assert!(matches!(err, ReportError::DataNotFound(ref p) if p == &path));
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        std::fs::write(&path, RESULTS).unwrap();

        let table = assert_ok!(load_results(&path));
        assert_eq!(table.source(), path.as_path());
        assert_eq!(table.len(), 3);
        assert!(table.missing_columns().is_empty());
    }

    #[test]
    fn test_summary() {
        let table = assert_ok!(ResultsTable::from_reader(RESULTS.as_bytes(), "results.csv"));
        let records = assert_ok!(table.records());
        let summary = assert_some!(RunSummary::from_records(&records));
        assert_eq!(summary.nr_runs, 3);
        assert_eq!(summary.fastest.chunk_size_mb, 10.0);
        assert_eq!(summary.peak_throughput.chunk_size_mb, 10.0);

        let empty = assert_ok!(ResultsTable::from_reader(
            "ChunkSize_MB,TotalTime_s,Throughput_elements_sec\n".as_bytes(),
            "results.csv"
        ));
        assert!(empty.is_empty());
        assert_none!(RunSummary::from_records(&assert_ok!(empty.records())));
    }

    #[test]
    fn test_short_row_loads_but_fails_typed_access() {
        let data = "ChunkSize_MB,TotalTime_s,Throughput_elements_sec\n1,5.0,100\n5,3.0\n";
        let table = assert_ok!(ResultsTable::from_reader(data.as_bytes(), "results.csv"));
        assert_eq!(table.len(), 2);
        assert!(table.missing_columns().is_empty());

        let err = assert_err!(table.records());
        assert!(matches!(err, ReportError::SchemaMismatch(ref msg) if msg.contains("row 2")));
    }

    #[test]
    fn test_chunk_label_uses_shortest_form() {
        assert_eq!(BenchmarkRecord::new(10.0, 0.0, 0.0).chunk_label(), "10 MB");
        assert_eq!(BenchmarkRecord::new(2.5, 0.0, 0.0).chunk_label(), "2.5 MB");
    }
}

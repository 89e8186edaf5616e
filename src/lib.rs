pub mod chart;
pub mod error;
pub mod export;
pub mod messages;
pub mod pipeline;
pub mod results;
pub mod settings;
pub mod tracing;

pub use chart::{render, Figure};
pub use error::ReportError;
pub use export::{ChartArtifact, Exporter};
pub use pipeline::run;
pub use results::{load_results, BenchmarkRecord, ResultsTable};
pub use settings::Settings;

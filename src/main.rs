use std::process::ExitCode;

use clap::Parser;
use sortbench_report::export::{HeadlessViewer, SystemViewer, Viewer};
use sortbench_report::settings::{get_settings, CliOptions};
use sortbench_report::tracing::{get_subscriber, init_subscriber};
use sortbench_report::ReportError;

fn main() -> ExitCode {
    let subscriber = get_subscriber("sortbench-report", "warn");
    init_subscriber(subscriber);

    let main_span = tracing::info_span!("main");
    let _main_span_guard = main_span.enter();

    let opts = CliOptions::parse();
    let settings = match get_settings(&opts) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("failed to load settings: {}", err);
            return ExitCode::FAILURE;
        },
    };

    let viewer: Box<dyn Viewer> = if settings.display { Box::new(SystemViewer) } else { Box::new(HeadlessViewer) };

    let mut stdout = std::io::stdout();
    match sortbench_report::run(&settings, viewer.as_ref(), &mut stdout) {
        Ok(artifact) => {
            tracing::info!(path=?artifact.path(), "performance report complete.");
            ExitCode::SUCCESS
        },
        // the diagnostic has already been printed
        Err(ReportError::DataNotFound(_)) => ExitCode::FAILURE,
        Err(err) => {
            tracing::error!(error=?err, kind=%err.slug(), "performance report failed.");
            eprintln!("{}", err);
            ExitCode::FAILURE
        },
    }
}

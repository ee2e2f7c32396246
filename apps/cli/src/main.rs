mod config;
mod render;
mod shell;

use std::io;
use std::sync::Arc;

use config::Config;
use shell::Shell;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vitals_core::patients::PatientService;
use vitals_storage_file::FileVisitRepository;

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if config.json_logs() {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(io::stderr),
            )
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing(&config);

    let repository = Arc::new(FileVisitRepository::new(&config.data_file));
    let report = repository.load();
    tracing::info!(
        "Loaded {} visits for {} patients from {}",
        report.store.visit_count(),
        report.store.patient_count(),
        repository.path().display()
    );

    let stdout = io::stdout();
    let mut output = stdout.lock();
    for diagnostic in &report.diagnostics {
        tracing::warn!(
            kind = ?diagnostic.kind,
            line_number = ?diagnostic.line_number,
            "{}",
            diagnostic.message
        );
    }
    render::write_diagnostics(&mut output, &report.diagnostics)?;

    let service = PatientService::new(report.store, repository);
    let stdin = io::stdin();
    Shell::new(stdin.lock(), output, service).run()?;
    Ok(())
}

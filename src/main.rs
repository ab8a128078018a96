use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Log filter variable; defaults to `warn` so command output stays clean.
const LOG_ENV: &str = "PROJECTBOOK_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    match projectbook::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // 2 = the caller can fix the input, 1 = storage failure.
            let code = if err.is_storage() { 1 } else { 2 };
            let err = anyhow::Error::new(err).context("projectbook command failed");
            eprintln!("{err:#}");
            ExitCode::from(code)
        }
    }
}

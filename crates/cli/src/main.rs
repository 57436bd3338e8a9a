use std::process::ExitCode;

/// Diagnostics go to stderr so command output on stdout stays parseable.
fn init_logging() {
    use tracing::Level;

    let log_level = std::env::var("SOIREE_LOG_LEVEL")
        .ok()
        .and_then(|raw| raw.parse::<Level>().ok())
        .unwrap_or(Level::WARN);

    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> ExitCode {
    init_logging();
    soiree_cli::run()
}

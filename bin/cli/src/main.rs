use clap::Parser;
use peakwave_cli::Cli;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match peakwave_cli::execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => {
            let err = report.current_context();
            if !err.already_reported() {
                eprintln!("error: {err}");
            }
            ExitCode::FAILURE
        }
    }
}

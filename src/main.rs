//! botblitz CLI entry point.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// `RUST_LOG` wins over `--log-level`.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = botblitz_engine::cli::parse_cli();
    init_tracing(&cli.log_level);

    botblitz_engine::cli::run_with_cli(cli).await
}

use cert_jwks::cli::{self, Args};
use cert_jwks::config::Config;
use clap::Parser;
use jwks_core::{KeySetBuilder, X509KeyEncoder};
use std::io;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "cert_jwks=info,jwks=info";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Logging format depends on config, so load it before reporting its errors
    let config = Config::from_env();
    init_tracing(args.json_logs || config.as_ref().is_ok_and(|c| c.json_logs));

    let config = config.map_err(|e| {
        error!(target: "cert_jwks.cli", "Failed to load configuration: {}", e);
        e
    })?;

    let options = args.options().or(&config.defaults);
    let inputs = args.inputs().map_err(|e| {
        error!(target: "cert_jwks.cli", "{}", e);
        e
    })?;
    let builder = KeySetBuilder::new(X509KeyEncoder::new());

    let published = cli::run(
        &builder,
        &inputs,
        &options,
        io::stdin().lock(),
        io::stdout().lock(),
    )
    .map_err(|e| {
        error!(target: "cert_jwks.cli", "{}", e);
        e
    })?;

    info!(target: "cert_jwks.cli", documents = published, "Finished");
    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(io::stderr)).init();
    }
}

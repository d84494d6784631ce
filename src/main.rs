//! txlens main entry point

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use txlens_api::start_server;
use txlens_config::{Config, ConfigError, ConfigErrorSeverity};
use txlens_core::{FixtureSource, JsonFileSource, QueryEngine, TransactionSource, TransactionStore};

#[derive(Parser, Debug)]
#[command(name = "txlens")]
#[command(version = "0.1.0")]
#[command(about = "Browse, filter and sort transactions in the browser", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// JSON file with transactions (overrides data.path)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Port to listen on (overrides server.port)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    env_logger::Builder::from_env(env).init();
}

/// Load the config file; warning-level errors fall back to defaults and are
/// handed back so they can be logged once logging is up.
fn load_config(args: &Args) -> anyhow::Result<(Config, Option<ConfigError>)> {
    let (mut config, warning) = match Config::load(&args.config) {
        Ok(config) => (config, None),
        Err(e) if e.severity() == ConfigErrorSeverity::Warning => (Config::default(), Some(e)),
        Err(e) => anyhow::bail!("Failed to load {}: {}", args.config.display(), e.to_details()),
    };

    if let Some(data) = &args.data {
        config.data.path = Some(data.clone());
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate()?;
    Ok((config, warning))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let (config, warning) = load_config(&args)?;
    init_logging(&config.logging.level);

    if let Some(warning) = warning {
        log::warn!("{}, using defaults", warning);
    }

    let rt = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;

    rt.block_on(async {
        let source: Box<dyn TransactionSource> = match &config.data.path {
            Some(path) => Box::new(JsonFileSource::new(path)),
            None => Box::new(FixtureSource),
        };

        let engine = QueryEngine::new(config.query.text_scope);
        let store = match TransactionStore::load(source.as_ref(), engine).await {
            Ok(store) => store,
            Err(e) => anyhow::bail!(
                "Failed to load transactions from {}: {}",
                source.describe(),
                e.to_details()
            ),
        };

        start_server(config, store).await.context("Server error")
    })
}

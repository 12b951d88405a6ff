//! bridge-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), builds the
//! in-memory request store and serves the JSON API over HTTP.
//!
//! ```
//! BRIDGE_PORT=4000 cargo run -p bridge-server
//! ```

use std::path::PathBuf;

use anyhow::Context as _;
use bridge_server::ServerConfig;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Bridge triage request service")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Start with an empty request collection instead of the demo data.
  #[arg(long)]
  no_seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("BRIDGE").try_parsing(true))
    .build()
    .context("failed to read config file")?;

  let mut server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;
  if cli.no_seed {
    server_cfg.seed = false;
  }

  let state = server_cfg.initial_state();
  let loaded = state.store.read().await.len();
  tracing::info!(
    requests = loaded,
    resources = state.resources.len(),
    "initial data loaded"
  );

  let app = bridge_server::router(state);
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

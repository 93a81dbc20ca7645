use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use modport_populate::Populator;
use modport_proxy::{admin_router, proxy_router};
use modport_resolver::CommandResolver;
use modport_store::{FsStore, Store};

/// Modport - a caching proxy for module-registry artifacts
#[derive(Parser)]
#[command(name = "modport")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Address for the data-plane proxy server
  #[arg(long, default_value = "0.0.0.0:8080")]
  listen: SocketAddr,

  /// Address for the admin (population) server
  #[arg(long, default_value = "0.0.0.0:9999")]
  admin: SocketAddr,

  /// Root directory of the blob store
  #[arg(long)]
  storage_root: PathBuf,

  /// External resolver program invoked for populations
  #[arg(long, default_value = "go")]
  resolver: String,
}

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    )
    .init();

  let cli = Cli::parse();

  let store: Arc<dyn Store> = Arc::new(FsStore::new(&cli.storage_root));
  let resolver = CommandResolver::new(cli.resolver);
  let populator = Arc::new(Populator::new(Box::new(resolver), store.clone()));

  let admin_app = admin_router(populator);
  let admin_listener = tokio::net::TcpListener::bind(cli.admin)
    .await
    .with_context(|| format!("failed to bind admin address {}", cli.admin))?;
  tokio::spawn(async move {
    tracing::info!(addr = %cli.admin, "admin server starting");
    if let Err(e) = axum::serve(admin_listener, admin_app.into_make_service()).await {
      tracing::error!(error = %e, "admin server exited");
    }
  });

  let proxy_app = proxy_router(store);
  let listener = tokio::net::TcpListener::bind(cli.listen)
    .await
    .with_context(|| format!("failed to bind listen address {}", cli.listen))?;
  tracing::info!(addr = %cli.listen, "proxy server starting");
  axum::serve(listener, proxy_app.into_make_service())
    .await
    .context("proxy server exited")?;

  Ok(())
}

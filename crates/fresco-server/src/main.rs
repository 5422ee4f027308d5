//! fresco binary - design preset compilation server.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fresco_server::{PresetStore, server};

#[derive(Parser, Debug)]
#[command(name = "fresco")]
#[command(about = "Design preset compilation server")]
struct Args {
    /// Storage root directory (defaults to current directory)
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Port to listen on (defaults to the PORT environment variable,
    /// then 3000). The server always binds to loopback.
    #[arg(short = 'P', long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fresco_server=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let root = match args.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };
    let port = match args.port {
        Some(port) => port,
        None => std::env::var("PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(3000),
    };

    info!(root = %root.display(), port, "starting fresco");

    let store = PresetStore::new(&root)?;
    server::run_server(store, port).await?;

    Ok(())
}

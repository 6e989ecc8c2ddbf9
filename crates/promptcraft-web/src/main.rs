//! promptcraft API server.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p promptcraft-web
//! cargo run -p promptcraft-web -- --port 8080 --static-dir web/out
//! cargo run -p promptcraft-web -- --catalog catalog.json --scoring scoring.json
//! ```
//!
//! Then point the front end (or curl) at the printed address:
//!
//! ```bash
//! curl -s localhost:3001/api/seed -H 'content-type: application/json' \
//!   -d '{"templateId":"code-review"}'
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use promptcraft::{Catalog, ScoringConfig, Synthesizer};
use promptcraft_web::{WebConfig, spawn_web};
use tracing::Level;

/// JSON API server for the promptcraft engine.
#[derive(Parser)]
#[command(about = "Serve the promptcraft engine over HTTP")]
struct Args {
    /// Port for the API server.
    #[arg(long, default_value_t = 3001)]
    port: u16,

    /// Serve a static front-end build from this directory.
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Catalog JSON file. Defaults to the built-in catalog.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Scoring config JSON file.
    #[arg(long)]
    scoring: Option<PathBuf>,

    /// Log requests and synthesis summaries.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let catalog = match &args.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin(),
    };
    let config = match &args.scoring {
        Some(path) => ScoringConfig::load(path)?,
        None => ScoringConfig::default(),
    };
    let synth = Arc::new(Synthesizer::new(catalog, config));

    let web_config = WebConfig {
        bind_addr: ([127, 0, 0, 1], args.port).into(),
        static_dir: args.static_dir,
    };
    let addr = spawn_web(synth, web_config).await?;
    println!("promptcraft API: http://{addr}/api/catalog");

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("failed to listen for ctrl-c: {e}"))?;
    Ok(())
}

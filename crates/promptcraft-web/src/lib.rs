//! Browser-facing JSON API for the promptcraft engine.
//!
//! The server is stateless: every request carries the caller's draft
//! snapshot and every response is a fresh value computed by the shared
//! [`Synthesizer`]. Drafts live in the browser.
//!
//! # Quick start
//!
//! ```ignore
//! use std::sync::Arc;
//! use promptcraft::Synthesizer;
//! use promptcraft_web::{WebConfig, spawn_web};
//!
//! let synth = Arc::new(Synthesizer::default());
//! let addr = spawn_web(synth, WebConfig::default()).await?;
//! println!("API: http://{addr}/api/catalog");
//! ```
//!
//! # Endpoints
//!
//! | Method | Path              | Body                               | Response          |
//! |--------|-------------------|------------------------------------|-------------------|
//! | GET    | `/api/catalog`    |                                    | `Catalog`         |
//! | POST   | `/api/seed`       | `{templateId?, previous?}`         | `Draft`           |
//! | POST   | `/api/synthesize` | `{sections, options}`              | `SynthesisResult` |
//! | POST   | `/api/apply`      | `{draft, improvementId}`           | `{draft, applied, result}` |
//! | POST   | `/api/export`     | `{draft, exportedAt?}`             | `PromptExport`    |

mod api;
mod server;

pub use api::{ApplyRequest, ApplyResponse, ExportRequest, SeedRequest, SynthesizeRequest};

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use promptcraft::Synthesizer;

/// Configuration for the web server.
pub struct WebConfig {
    /// Address to bind to. Default: `127.0.0.1:3001`.
    pub bind_addr: SocketAddr,
    /// Directory holding a static front-end build.
    ///
    /// If `None`, only the API is served and the front end runs separately.
    pub static_dir: Option<PathBuf>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3001)),
            static_dir: None,
        }
    }
}

/// Spawn the web server on a Tokio task and return the bound address.
///
/// The server runs until the Tokio runtime shuts down.
pub async fn spawn_web(synth: Arc<Synthesizer>, config: WebConfig) -> Result<SocketAddr, String> {
    let router = server::build_router(synth, config.static_dir);
    server::start_server(router, config.bind_addr).await
}

//! git-browser - a read-only web browser for local git repositories
//!
//! # Usage
//! ```bash
//! git-browser                          # Serve repos from ./repos.json
//! git-browser --config ~/repos.json    # Explicit config file
//! git-browser --port 9000 --open       # Another port, open the browser
//! ```

mod config;
mod error;
mod git;
mod models;
mod routes;
#[cfg(test)]
mod test_support;

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use clap::Parser;
use rust_embed::Embed;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::AppConfig;
use routes::AppState;

/// Embedded frontend static files
#[derive(Embed)]
#[folder = "static"]
struct Assets;

/// git-browser - Browse local git repositories in your browser
#[derive(Parser)]
#[command(name = "git-browser")]
#[command(about = "A read-only web browser for local git repositories", long_about = None)]
struct Cli {
    /// JSON file listing the repositories to serve
    #[arg(short, long, env = "GITBROWSER_CONFIG", default_value = "repos.json")]
    config: PathBuf,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to run the server on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Open browser automatically after starting
    #[arg(short, long)]
    open: bool,
}

fn embedded(path: &str) -> Option<Response<Body>> {
    let content = Assets::get(path)?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    Some(
        (
            [(header::CONTENT_TYPE, mime.as_ref().to_string())],
            content.data.into_owned(),
        )
            .into_response(),
    )
}

/// Serve embedded static files, falling back to index.html for client routes
async fn serve_static(req: Request<Body>) -> Response<Body> {
    let path = req.uri().path().trim_start_matches('/');

    let path = if path.is_empty() || !path.contains('.') {
        "index.html"
    } else {
        path
    };

    embedded(path)
        .or_else(|| embedded("index.html"))
        .unwrap_or_else(|| (StatusCode::NOT_FOUND, "Not Found").into_response())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutting down server");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load(&cli.config)?;
    let limits = config.limits()?;
    let repos = config.registry()?;
    tracing::info!(
        config = %cli.config.display(),
        repos = ?repos.names(),
        log_limit = limits.log,
        history_limit = limits.history,
        "loaded configuration"
    );

    let state = Arc::new(AppState { repos, limits });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(routes::create_router(state))
        .fallback(get(serve_static))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let url = format!("http://{addr}");
    tracing::info!(%url, "server listening");

    if cli.open {
        if let Err(e) = open::that(&url) {
            tracing::warn!(error = %e, "could not open browser");
        }
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server exited");
    Ok(())
}

//! Quillpost server
//!
//! # Usage
//!
//! ```bash
//! # Layered config for the "blog" service (/etc, XDG, ./config.toml, env)
//! quillpost
//!
//! # Explicit config file
//! quillpost --config deploy/quillpost.toml
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use quillpost::articles::{ArticleSource, InMemoryArticles};
use quillpost::config::QuillpostConfig;
use quillpost::handlers;
use quillpost::observability;
use quillpost::state::QuillpostState;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "quillpost")]
#[command(version)]
#[command(about = "Blog server with validated image uploads", long_about = None)]
struct Cli {
    /// Service name used to locate layered configuration
    #[arg(long, default_value = "blog")]
    service: String,

    /// Load configuration from this file instead of the layered sources
    #[arg(long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    observability::init()?;

    let config = match cli.config.as_deref() {
        Some(path) => QuillpostConfig::load_from(path)
            .with_context(|| format!("failed to load configuration from {path}"))?,
        None => QuillpostConfig::load_for_service(&cli.service)
            .context("failed to load configuration")?,
    };

    let articles: Arc<dyn ArticleSource> = match &config.articles.seed_file {
        Some(path) => Arc::new(InMemoryArticles::from_json_file(path).await?),
        None => Arc::new(InMemoryArticles::default()),
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = QuillpostState::with_config(config, articles)?;
    let app = handlers::router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "Quillpost listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Quillpost stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

use anyhow::Context;
use clap::Parser; // for cli
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use research_agent::config::Args;
use research_agent::{AppState, create_router};

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("research_agent={level},tower_http={level}"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    init_logging(&args.log_level);

    let state = Arc::new(AppState::from_args(&args));
    let app = create_router(state);

    let addr = args.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(
        addr = %addr,
        ollama = %args.ollama_base_url,
        model = %args.ollama_model,
        "Research agent running on http://localhost:{}",
        args.port
    );

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

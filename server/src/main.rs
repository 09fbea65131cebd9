use anyhow::Result;
use axum::Router;
use clap::Parser;
use faq_core::EngineConfig;
use faq_server::{build_app, AppState};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// FAQ document: a PDF, a text file, or an entry export (.json)
    #[arg(long)]
    document: String,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Minimum similarity for an answer (inclusive)
    #[arg(long, default_value_t = faq_core::matcher::DEFAULT_THRESHOLD)]
    threshold: f32,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let config = EngineConfig::default().with_threshold(args.threshold);
    let state = AppState::open(&args.document, config)?.with_admin_token(std::env::var("ADMIN_TOKEN").ok());
    let app: Router = build_app(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, document = %args.document, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

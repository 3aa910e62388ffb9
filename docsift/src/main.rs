use std::sync::Arc;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docsift::api::{create_router, AppState};
use docsift::config::Config;
use docsift::db::{Database, DocumentStore, LibSqlBackend};
use docsift::llm::RefinementProvider;
use docsift::ocr::OcrProvider;
use docsift::storage::{BlobStore, FilesystemStore};

#[derive(Parser)]
#[command(name = "docsift")]
#[command(about = "Session-scoped document ingestion and text extraction")]
struct Args {
    /// Scan stored blobs for this session, register records, then exit
    #[arg(long, value_name = "SESSION_ID")]
    ingest_session: Option<String>,

    /// Run the extraction pipeline for this session, then exit
    #[arg(long, value_name = "SESSION_ID")]
    process_session: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docsift=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    tracing::info!("Initializing database...");
    let raw_db = Database::new(&config.database).await?;
    let db: Arc<dyn DocumentStore> = Arc::new(LibSqlBackend::new(raw_db));

    tracing::info!("Validating blob storage at {}...", config.storage.root);
    let fs_store = FilesystemStore::new(&config.storage);
    fs_store.validate().await?;
    let storage: Arc<dyn BlobStore> = Arc::new(fs_store);

    tracing::info!("Initializing OCR provider...");
    let ocr = OcrProvider::new(&config.ocr)?;
    if !ocr.is_available() {
        tracing::warn!("OCR unavailable - image documents will yield empty text");
    }

    let llm = RefinementProvider::new(config.llm.as_ref());
    if !llm.is_available() {
        tracing::warn!("LLM not configured - refinement runs as a pass-through");
    }

    let cancel_token = CancellationToken::new();
    let state = AppState::new(
        config.clone(),
        db,
        storage,
        ocr,
        llm,
        cancel_token.clone(),
    );

    // One-shot console modes, mirroring the service endpoints.
    if let Some(session_id) = args.ingest_session {
        let report = state.receiver.ingest_session(&session_id).await?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    if let Some(session_id) = args.process_session {
        let report = state
            .pipeline
            .process_session(&session_id, &cancel_token.child_token())
            .await?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Docsift starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/api/v1/health", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel_token))
        .await?;

    Ok(())
}

async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, cancelling in-flight session runs...");
    cancel_token.cancel();
}

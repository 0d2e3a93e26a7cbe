//! Medicine Recommender - Binary Entry Point
//!
//! Builds the recommendation service once, serves it over HTTP, and drops
//! it after a graceful shutdown.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use medicine_recommender::api::{create_router, AppState};
use medicine_recommender::{EngineConfig, RankerChoice, RecommendationService, TranslatorChoice};

#[derive(Debug, Parser)]
#[command(name = "medrec-server", version, about = "Symptom-to-medicine recommendation service")]
struct Cli {
    /// Address to bind
    #[arg(long, env = "MEDREC_HOST", default_value = "0.0.0.0")]
    host: String,

    #[arg(long, env = "MEDREC_PORT", default_value_t = 8001)]
    port: u16,

    /// Dataset CSV; when set, the built-in candidate locations are not searched
    #[arg(long, env = "MEDREC_DATASET")]
    dataset: Option<PathBuf>,

    /// Directory for the persisted embedding bundle
    #[arg(long, env = "MEDREC_CACHE_DIR", default_value = "models")]
    cache_dir: PathBuf,

    /// auto | lexical | embedding
    #[arg(long, env = "MEDREC_RANKER", default_value = "auto")]
    ranker: RankerChoice,

    /// auto | identity | model
    #[arg(long, env = "MEDREC_TRANSLATOR", default_value = "auto")]
    translator: TranslatorChoice,

    /// Directory with `te-en/` and `en-te/` translation models
    #[arg(long, env = "MEDREC_TRANSLATION_MODELS")]
    translation_models: Option<PathBuf>,

    #[arg(long, env = "MEDREC_TRANSLATION_CACHE", default_value_t = 256)]
    translation_cache: usize,

    #[arg(long, env = "MEDREC_TOP_K", default_value_t = 5)]
    top_k: usize,

    #[arg(long, env = "MEDREC_MAX_TOP_K", default_value_t = 50)]
    max_top_k: usize,

    /// Requests processed at once; the rest queue
    #[arg(long, env = "MEDREC_MAX_CONCURRENT", default_value_t = 64)]
    max_concurrent: usize,

    #[arg(long, env = "MEDREC_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, env = "MEDREC_JSON_LOGS")]
    json_logs: bool,
}

impl Cli {
    fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            dataset_path: self.dataset.clone(),
            cache_dir: self.cache_dir.clone(),
            ranker: self.ranker,
            translator: self.translator,
            translation_model_dir: self.translation_models.clone(),
            translation_cache_capacity: self.translation_cache,
            default_top_k: self.top_k,
            max_top_k: self.max_top_k,
            ..Default::default()
        }
    }
}

fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_target(true))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    info!(version = medicine_recommender::VERSION, "medicine recommender starting");

    // Index build and model loading are blocking; failures stop the process
    let config = cli.engine_config();
    let service = tokio::task::spawn_blocking(move || RecommendationService::from_config(config))
        .await
        .context("startup task panicked")?
        .context("failed to build recommendation service")?;
    let service = Arc::new(service);

    let state = Arc::new(AppState::new(Arc::clone(&service)).with_max_concurrent_requests(cli.max_concurrent));
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", cli.host, cli.port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    // Router and state are gone once serve returns
    if let Ok(service) = Arc::try_unwrap(service) {
        service.shutdown();
    }

    Ok(())
}

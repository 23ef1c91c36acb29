//! Tracing setup and HTTP server startup.

use std::sync::Arc;

use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use highlighter_channel_http::{HttpChannel, HttpChannelState};
use highlighter_config::Config;
use highlighter_core::{register_builtin_handlers, Dispatcher};
use highlighter_storage::LocalStore;

use crate::adapters::build_services;

/// Initialize tracing with console output and, when enabled, a daily log
/// file under `<data_dir>/logs`.
///
/// `RUST_LOG` takes precedence over `[logging] level`.
pub(crate) fn init_tracing(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let file_layer = if config.logging.file {
        let log_dir = config.storage.resolved_data_dir().join("logs");
        std::fs::create_dir_all(&log_dir)?;

        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("highlighter")
            .filename_suffix("log")
            .max_log_files(14)
            .build(&log_dir)?;

        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // The guard flushes buffered lines on drop; keep it for the process lifetime.
        static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
            std::sync::OnceLock::new();
        let _ = GUARD.set(guard);

        Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
    } else {
        None
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let json = config.logging.json;
    tracing_subscriber::registry()
        .with(env_filter)
        .with(json.then(|| fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| {
            fmt::layer()
                .with_target(true)
                .with_ansi(true)
                .with_writer(std::io::stderr)
        }))
        .with(file_layer)
        .init();

    Ok(())
}

/// Build the dispatcher with every built-in handler registered.
pub(crate) fn build_dispatcher(config: &Config) -> Result<Arc<Dispatcher>, Box<dyn std::error::Error>> {
    let services = build_services(config);
    let dispatcher = Dispatcher::new();
    register_builtin_handlers(&dispatcher, &services)?;
    Ok(Arc::new(dispatcher))
}

/// Run the HTTP surface until Ctrl-C.
pub(crate) async fn run_server(
    config: Config,
    host: Option<String>,
    port: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    let dispatcher = build_dispatcher(&config)?;
    info!("Registered handlers: {:?}", dispatcher.kinds());

    let data_dir = config.storage.resolved_data_dir();
    let store = Arc::new(LocalStore::open(&data_dir).await?);
    info!("Local store at {}", store.path().display());

    let state = HttpChannelState::new(dispatcher).with_store(store, config.storage.history_limit);
    HttpChannel::new(host, port)
        .serve(state, shutdown_signal())
        .await?;

    info!("Highlighter shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

use tracing::Subscriber;
use tracing::subscriber::{SetGlobalDefaultError, set_global_default};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_ENV_FILTER: &str = "confirm_links=info,tower_http=info";

#[derive(thiserror::Error, Debug)]
pub enum TelemetryError {
    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),
    #[error("failed to redirect `log` records: {0}")]
    Logger(String),
    #[error("failed to install the subscriber: {0}")]
    Subscriber(#[from] SetGlobalDefaultError),
}

/// Compose a bunyan JSON subscriber named `name` writing to `sink`.
///
/// `RUST_LOG` wins over `default_filter` when it holds a valid filter.
pub fn get_subscriber<Sink>(
    name: &str,
    default_filter: &str,
    sink: Sink,
) -> Result<impl Subscriber + Send + Sync, TelemetryError>
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)?,
    };

    Ok(Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(BunyanFormattingLayer::new(name.to_string(), sink)))
}

/// Install `subscriber` process-wide. Fails if one is already installed.
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) -> Result<(), TelemetryError> {
    // reqwest and hyper still log through `log`
    LogTracer::init().map_err(|e| TelemetryError::Logger(e.to_string()))?;
    set_global_default(subscriber)?;
    Ok(())
}

// Path: crates/telemetry/src/init.rs
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Output format of the global subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per event, for node processes.
    #[default]
    Json,
    /// Human-readable single-line output, for command-line tools.
    Compact,
}

/// Initializes the global `tracing` subscriber for structured JSON logging.
pub fn init_tracing() -> Result<(), anyhow::Error> {
    init_tracing_with(LogFormat::Json, "info")
}

/// Initializes the global `tracing` subscriber.
///
/// `RUST_LOG` overrides `default_filter` when set. Events from the `log`
/// crate are forwarded into `tracing`. Output goes to stderr.
pub fn init_tracing_with(format: LogFormat, default_filter: &str) -> Result<(), anyhow::Error> {
    let json_layer = (format == LogFormat::Json).then(|| {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
    });
    let compact_layer = (format == LogFormat::Compact).then(|| {
        fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_target(true)
    });
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let subscriber = Registry::default()
        .with(filter)
        .with(json_layer)
        .with(compact_layer);
    tracing_log::LogTracer::init()?;
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

use tracing_subscriber::{
    fmt::format::{Compact, Format},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Default filter when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "vidmeta=debug,tower_http=debug";

/// Compact one-line events with timestamps and without targets.
fn console_format() -> Format<Compact> {
    Format::default().compact().with_target(false)
}

/// Initialize console tracing. `RUST_LOG` overrides the default filter.
pub fn init_telemetry() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let console_fmt = tracing_subscriber::fmt::layer().event_format(console_format());

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(console_fmt)
        .try_init()?;

    Ok(())
}

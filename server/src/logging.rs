use std::sync::OnceLock;

use tracing::Subscriber;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::{LoggingConfig, LoggingFormat};

static LOGGING_INIT: OnceLock<WorkerGuard> = OnceLock::new();

fn new_fmt_layer<S>(
    format: LoggingFormat,
    writer: NonBlocking,
) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    match format {
        LoggingFormat::Full => fmt::layer().with_writer(writer).boxed(),
        LoggingFormat::Compact => fmt::layer().with_writer(writer).compact().boxed(),
        LoggingFormat::Pretty => fmt::layer().with_writer(writer).pretty().boxed(),
        LoggingFormat::Json => fmt::layer().with_writer(writer).json().boxed(),
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over the
/// configured filter. Calls after the first are no-ops.
pub fn init_tracing(logging_config: &LoggingConfig) -> crate::Result<()> {
    let mut setup_result = Ok(());
    LOGGING_INIT.get_or_init(|| {
        let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(logging_config.filter.as_str()));

        let layered = tracing_subscriber::registry()
            .with(filter)
            .with(new_fmt_layer(logging_config.format, writer));

        if let Err(e) = layered.try_init() {
            setup_result = Err(crate::Error::Logging(e.to_string()));
        }
        guard
    });
    setup_result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        let config = LoggingConfig {
            format: LoggingFormat::Compact,
            filter: "warn".to_string(),
        };
        let first = init_tracing(&config);
        assert!(init_tracing(&config).is_ok());
        // another test binary may have installed a subscriber first
        if let Err(e) = first {
            assert!(matches!(e, crate::Error::Logging(_)));
        }
    }
}

use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    EnvFilter { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::EnvFilter { value, .. } => {
                write!(
                    f,
                    "invalid log level/filter '{}': unable to build EnvFilter",
                    value
                )
            }
            TelemetryError::Subscriber(err) => write!(f, "telemetry error: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::EnvFilter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// Filter built from the configured level. A bare level also applies to the
/// decision engine's own target so its debug trail can be switched on alone.
pub fn filter_for(log_level: &str) -> Result<EnvFilter, TelemetryError> {
    let directive = log_level.trim();
    let expanded = if directive.contains('=') || directive.contains(',') {
        directive.to_string()
    } else {
        format!("{directive},upgrade_engine={directive}")
    };

    EnvFilter::try_new(&expanded).map_err(|source| TelemetryError::EnvFilter {
        value: log_level.to_string(),
        source,
    })
}

/// Installs the global fmt subscriber. `RUST_LOG` wins over the configured level.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => filter_for(&config.log_level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_level_is_scoped_to_the_engine_too() {
        let filter = filter_for("debug").expect("debug is a valid level");
        assert!(filter.to_string().contains("upgrade_engine=debug"));
    }

    #[test]
    fn explicit_directives_are_kept_as_is() {
        let filter = filter_for("warn,upgrade_engine::decision=trace").expect("valid directives");
        assert!(filter
            .to_string()
            .contains("upgrade_engine::decision=trace"));
    }

    #[test]
    fn invalid_level_is_reported() {
        let err = filter_for("upgrade_engine=loud").expect_err("not a level");
        assert!(err.to_string().contains("upgrade_engine=loud"));
    }
}

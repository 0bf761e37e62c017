use crate::config::TelemetryConfig;
use std::fmt;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    Directive { directive: String, source: ParseError },
    Install(SetGlobalDefaultError),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::Directive { directive, .. } => {
                write!(
                    f,
                    "APP_LOG_LEVEL directive '{}' is not a valid tracing filter",
                    directive
                )
            }
            TelemetryError::Install(err) => write!(f, "failed to install subscriber: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::Directive { source, .. } => Some(source),
            TelemetryError::Install(err) => Some(err),
        }
    }
}

/// Install the process-wide subscriber: compact single-line output, no ANSI,
/// no target paths. `RUST_LOG` outranks the configured directive so verbosity
/// can be raised per invocation without touching config.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => directive_filter(&config.log_level)?,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).map_err(TelemetryError::Install)
}

fn directive_filter(directive: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(directive).map_err(|source| TelemetryError::Directive {
        directive: directive.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_level_and_per_module_directives() {
        assert!(directive_filter("info").is_ok());
        assert!(directive_filter("hostel_ops=debug,tower=warn").is_ok());
    }

    #[test]
    fn malformed_directive_is_echoed_back() {
        let err = directive_filter("allocation=debug=trace").expect_err("malformed directive");
        assert!(matches!(err, TelemetryError::Directive { .. }));
        assert!(err.to_string().contains("allocation=debug=trace"));
    }
}

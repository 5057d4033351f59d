use std::env;
use std::io::{stdout, IsTerminal};
use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset: our crates at info, request spans from
/// tower-http, and only warnings from the pool and the HTTP client.
const DEFAULT_DIRECTIVES: &str =
    "info,estate=info,estate_core=info,estate_api=info,tower_http=info,r2d2=warn,hyper=warn,reqwest=warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    /// `LOG_FORMAT=json|pretty` wins; otherwise pretty on a terminal and JSON
    /// lines when piped into a collector.
    pub fn resolve(requested: Option<&str>, is_terminal: bool) -> Self {
        match requested.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("json") => LogFormat::Json,
            Some("pretty") | Some("text") => LogFormat::Pretty,
            _ if is_terminal => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

pub fn setup_logging() {
    let format = LogFormat::resolve(
        env::var("LOG_FORMAT").ok().as_deref(),
        stdout().is_terminal(),
    );
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
    let directives = env_filter.to_string();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true);

    match format {
        LogFormat::Pretty => builder.with_ansi(true).init(),
        LogFormat::Json => builder
            .json()
            .with_ansi(false)
            .with_current_span(true)
            .init(),
    }

    tracing::info!(?format, filter = %directives, "Logging initialized");
}

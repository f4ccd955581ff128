//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Environment variable holding a level or a full filter spec.
pub const LOG_ENV: &str = "DOCSN_LOG";

/// Crates whose events the plain-level shorthand applies to.
const LOG_TARGETS: [&str; 2] = ["docsn_core", "docsn_cli"];

/// Build the filter spec from the `DOCSN_LOG` value, if set.
///
/// A plain level ("trace", "debug", "info", "warn", "error") applies to the
/// docsn crates; anything else is taken as a full filter spec such as
/// `docsn_core=trace,docsn_cli=info`.
pub fn filter_spec(env_value: Option<&str>) -> String {
    match env_value {
        Some(level) if is_plain_level(level) => targets_at(level),
        Some(spec) => spec.to_string(),
        None => targets_at("info"),
    }
}

fn targets_at(level: &str) -> String {
    LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the stderr fmt subscriber.
pub fn init_tracing() {
    let env_value = std::env::var(LOG_ENV).ok();
    let filter = filter_spec(env_value.as_deref());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}

//! Tracing setup.
//!
//! Native builds log to stderr; the browser build hands a console writer to
//! [`init_with_writer`]. `RUST_LOG` wins over the default directive when set.

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const DEFAULT_DIRECTIVE: &str = "replyguy=info";

/// Filter from `RUST_LOG`, or `directive`, or [`DEFAULT_DIRECTIVE`].
pub fn filter(directive: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directive.unwrap_or(DEFAULT_DIRECTIVE)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install a stderr subscriber. Returns `false` when one was already set.
pub fn init() -> bool {
    tracing_subscriber::registry()
        .with(filter(None))
        .with(fmt::layer().with_target(true).with_ansi(true))
        .try_init()
        .is_ok()
}

/// Install a subscriber writing plain lines through `writer`. Timestamps are
/// left out since the wasm target has no system clock.
pub fn init_with_writer<W>(writer: W, directive: Option<&str>) -> bool
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(filter(directive))
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .without_time()
                .with_target(true),
        )
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_accepts_directive() {
        let filter = filter(Some("replyguy_core=debug"));
        assert!(!filter.to_string().is_empty());
    }

    #[test]
    fn test_bad_directive_falls_back() {
        let filter = filter(Some("[[not a directive"));
        assert!(!filter.to_string().is_empty());
    }

    #[test]
    fn test_second_init_reports_existing() {
        let _ = init();
        assert!(!init());
    }
}

//! Tracing subscriber setup shared by hosts and demos.

/// Installs a global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence; otherwise errors are shown for everything and
/// info for the carousel crates. Calling this more than once is harmless.
pub fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new(
            "error,carousel_ui=info,carousel_components=info,carousel_shard=info",
        ) {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .try_init();
}

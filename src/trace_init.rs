//! Optional JSON-lines tracing for hosts that embed the engine.

/// File written inside the log directory.
pub const TRACE_FILE: &str = "lemma-engine-trace.jsonl";

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "lemma_engine=debug,lemma_core=debug";

#[cfg(feature = "trace")]
static INIT: std::sync::Once = std::sync::Once::new();

/// Send spans and events to `log_dir/TRACE_FILE`. Later calls are ignored,
/// and so is the first one if the host already installed a global subscriber.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: &std::path::Path) {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    INIT.call_once(|| {
        let (writer, guard) =
            tracing_appender::non_blocking(tracing_appender::rolling::never(log_dir, TRACE_FILE));
        // The writer must outlive every later event; the host process owns us.
        std::mem::forget(guard);

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let installed = tracing_subscriber::fmt()
            .json()
            .with_writer(writer)
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_env_filter(filter)
            .try_init()
            .is_ok();
        if installed {
            tracing::info!(dir = %log_dir.display(), "tracing initialised");
        }
    });
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: &std::path::Path) {}

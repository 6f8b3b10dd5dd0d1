use std::sync::Once;

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install the stderr subscriber. `RUST_LOG` wins over `verbose` when set.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let default = if verbose {
            "utsushi_core=debug"
        } else {
            "utsushi_core=info"
        };
        let span_events = if verbose {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_span_events(span_events)
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
            )
            .init();
    });
}

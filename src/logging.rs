//! Shared tracing setup for the server and the CLI.

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber. `RUST_LOG` overrides the `info` default.
///
/// The CLI passes `to_stderr = true` so stdout only carries the report.
pub fn init(to_stderr: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    let result = if to_stderr {
        builder.with_writer(std::io::stderr).try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        eprintln!("tracing subscriber already installed: {}", e);
    }
}

/// Fresh per-invocation / per-request trace id
pub fn new_trace_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

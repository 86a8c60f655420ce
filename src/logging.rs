use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter directives
pub const LOG_ENV: &str = "PROCFIXTURES_LOG";

/// Install the global tracing subscriber.
///
/// The fixtures' stdout and stderr are what the harness asserts on, so logging
/// is off unless `PROCFIXTURES_LOG` is set. When enabled, log lines go to stderr.
pub fn init() {
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter())
        .try_init();
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"))
}

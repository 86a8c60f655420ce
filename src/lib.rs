//! Standalone fixture programs for exercising a process supervisor.
//!
//! Each binary under `src/bin` is a thin wrapper around one of the modules
//! here: [`mixed_output`] writes interleaved bytes to both standard streams and
//! sleeps, [`signal_catcher`] sleeps until SIGTERM and exits with a policy
//! dependent status.

pub type Result<T> = color_eyre::eyre::Result<T>;

pub mod cli;
pub mod logging;
pub mod mixed_output;
pub mod signal_catcher;
pub mod signals;

pub use cli::{CatcherCli, Config, MixedOutputCli};
pub use mixed_output::StreamCounts;
pub use signal_catcher::{CatcherState, ExitPolicy};

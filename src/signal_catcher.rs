//! SIGTERM catchers.
//!
//! Both catcher binaries subscribe to the termination signal, announce the
//! sleep and then wait for whichever comes first: the timer or the signal.
//! They differ only in what happens on the signal branch, see [`ExitPolicy`].

use super::Result;
use crate::cli::Config;
use crate::signals::Signals;

use eyre::bail;
use nix::sys::signal::Signal;
use std::future::Future;
use std::io::{self, Write};
use std::time::Duration;
use tokio::select;
use tokio::time::sleep;
use tracing::{debug, info};

/// What a catcher does once the termination signal arrives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitPolicy {
    /// Print the notice and exit 1 without flushing stdout
    Error,
    /// Print the notice, flush stdout and exit 0
    Success,
}

impl ExitPolicy {
    /// Exit status used on the signal branch
    pub fn exit_code(self) -> i32 {
        match self {
            ExitPolicy::Error => 1,
            ExitPolicy::Success => 0,
        }
    }

    pub fn flushes_on_signal(self) -> bool {
        matches!(self, ExitPolicy::Success)
    }
}

/// Lifecycle of a catcher run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatcherState {
    /// Subscribed to signals, nothing printed yet
    Started,
    /// Sleep announced, waiting on timer or signal
    Sleeping,
    /// A termination signal arrived while sleeping
    SignalHandled(Signal),
    /// The sleep ran to completion
    TimedOut,
}

impl CatcherState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, CatcherState::SignalHandled(_) | CatcherState::TimedOut)
    }
}

/// Print the sleep announcement and flush it
pub fn announce<W: Write>(config: &Config, out: &mut W) -> Result<()> {
    writeln!(out, "Sleep {} seconds", config.sleep.as_secs())?;
    out.flush()?;
    Ok(())
}

/// Wait for `duration` or for `signal` to resolve, whichever happens first.
///
/// A signal source that resolves to `None` has closed; the timer still decides
/// the outcome in that case.
pub async fn sleep_or_signal<F>(duration: Duration, signal: F) -> CatcherState
where
    F: Future<Output = Option<Signal>>,
{
    select! {
        Some(sig) = signal => CatcherState::SignalHandled(sig),
        _ = sleep(duration) => CatcherState::TimedOut,
    }
}

/// Write the line for a terminal state and return the exit status to end with
pub fn report<W: Write>(state: CatcherState, policy: ExitPolicy, out: &mut W) -> Result<i32> {
    match state {
        CatcherState::SignalHandled(sig) => {
            writeln!(out, "{} RECEIVED", sig as i32)?;
            if policy.flushes_on_signal() {
                out.flush()?;
            }
            Ok(policy.exit_code())
        }
        CatcherState::TimedOut => {
            writeln!(out, "Done sleeping")?;
            out.flush()?;
            Ok(0)
        }
        CatcherState::Started | CatcherState::Sleeping => {
            bail!("cannot report non-terminal state {:?}", state)
        }
    }
}

/// Run a catcher against the real stdout. Returns the process exit status.
///
/// The caller is expected to end the process with the returned status right
/// away: on the error policy nothing flushes stdout after the notice.
pub async fn run(policy: ExitPolicy, config: &Config) -> Result<i32> {
    let mut state = CatcherState::Started;
    let mut signals = Signals::new()?;
    debug!("{:?}: subscribed to termination signals", state);

    announce(config, &mut io::stdout().lock())?;
    state = CatcherState::Sleeping;
    debug!("{:?} for {:?}", state, config.sleep);

    state = sleep_or_signal(config.sleep, signals.next()).await;
    info!("catcher finished in state {:?} with policy {:?}", state, policy);

    report(state, policy, &mut io::stdout().lock())
}

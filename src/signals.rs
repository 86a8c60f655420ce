use super::Result;

use std::pin::Pin;

use eyre::WrapErr;
use futures::stream::{select_all, Stream, StreamExt};
use nix::sys::signal::Signal;
use tokio::signal::unix::{signal, SignalKind};
use tokio_stream::wrappers::SignalStream;
use tracing::debug;

/// Signals that request a fixture to shut down
pub static TERMINATION_SIGNALS: [Signal; 1] = [Signal::SIGTERM];

/// Stream of termination signal notifications.
///
/// Subscribing replaces the default disposition, so a SIGTERM delivered after
/// [`Signals::new`] returns is queued here instead of killing the process.
pub struct Signals {
    stream: Pin<Box<dyn Stream<Item = Signal> + Send>>,
}

impl Signals {
    /// Subscribe to [`TERMINATION_SIGNALS`]. Must be called inside a tokio runtime.
    pub fn new() -> Result<Self> {
        Self::subscribe(&TERMINATION_SIGNALS)
    }

    pub fn subscribe(signals: &[Signal]) -> Result<Self> {
        let signal_streams = signals
            .iter()
            .map(|&sig| -> Result<_> {
                let listener = signal(SignalKind::from_raw(sig as i32))
                    .wrap_err_with(|| format!("failed to subscribe to {sig}"))?;
                debug!("subscribed to {}", sig);
                Ok(SignalStream::new(listener).map(move |()| sig).boxed())
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Signals {
            stream: Box::pin(select_all(signal_streams)),
        })
    }

    /// Wait for the next signal. `None` once every underlying stream has closed.
    pub async fn next(&mut self) -> Option<Signal> {
        self.stream.next().await
    }
}

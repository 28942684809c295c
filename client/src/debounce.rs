//! Search-as-you-type debouncing.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::sleep;

/// Default quiet period before a search term is forwarded.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Forwards the last value pushed once no new value has arrived for `delay`.
///
/// Dropping the debouncer flushes a pending value and then closes the output
/// channel. Already forwarded values are never recalled.
pub struct Debouncer<T> {
    input: mpsc::UnboundedSender<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawns the debounce task. Must be called inside a tokio runtime.
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (input, input_rx) = mpsc::unbounded_channel();
        let (output, output_rx) = mpsc::unbounded_channel();
        tokio::spawn(run(delay, input_rx, output));
        (Self { input }, output_rx)
    }

    /// Returns `false` once the receiving side has gone away.
    pub fn push(&self, value: T) -> bool {
        self.input.send(value).is_ok()
    }
}

async fn run<T>(delay: Duration, mut input: mpsc::UnboundedReceiver<T>, output: mpsc::UnboundedSender<T>) {
    let mut pending: Option<T> = None;

    loop {
        let Some(value) = pending.take() else {
            match input.recv().await {
                Some(value) => pending = Some(value),
                None => return,
            }
            continue;
        };

        tokio::select! {
            next = input.recv() => match next {
                Some(next) => pending = Some(next),
                None => {
                    let _ = output.send(value);
                    return;
                }
            },
            () = sleep(delay) => {
                if output.send(value).is_err() {
                    return;
                }
            }
        }
    }
}

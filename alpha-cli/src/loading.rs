//! Stderr progress line shown while a generation is in flight.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use prompt_alpha::kernel::SessionState;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Messages cycled while the model works.
pub const LOADING_STEPS: [&str; 5] = [
    "Analyzing raw intent...",
    "Deconstructing semantic meaning...",
    "Aligning with selected framework...",
    "Optimizing token density...",
    "Finalizing output...",
];

/// Time each message stays on screen.
pub const STEP_INTERVAL: Duration = Duration::from_millis(800);

const CLEAR_LINE: &str = "\r\x1b[2K";

/// Handle to a running indicator; call [`Indicator::finish`] once the
/// generation has settled.
pub struct Indicator<W> {
    handle: JoinHandle<()>,
    out: Arc<Mutex<W>>,
}

impl<W: Write> Indicator<W> {
    /// Stops the ticker and wipes the progress line.
    pub async fn finish(self) {
        self.handle.abort();
        // Cancellation is the expected outcome here.
        let _ = self.handle.await;
        emit(&self.out, CLEAR_LINE);
    }
}

/// Step shown on the `tick`th interval.
pub fn step(tick: usize) -> &'static str {
    LOADING_STEPS[tick % LOADING_STEPS.len()]
}

/// Starts the indicator on stderr.
pub fn spawn(snapshots: watch::Receiver<SessionState>) -> Indicator<io::Stderr> {
    spawn_to(snapshots, io::stderr(), STEP_INTERVAL)
}

/// Starts ticking on `snapshots`, writing to `out`; a message is printed only
/// while the session reports `Generating`.
pub fn spawn_to<W>(
    mut snapshots: watch::Receiver<SessionState>,
    out: W,
    period: Duration,
) -> Indicator<W>
where
    W: Write + Send + 'static,
{
    let out = Arc::new(Mutex::new(out));
    let sink = Arc::clone(&out);
    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        let mut tick = 0usize;
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if snapshots.borrow().phase().is_generating() {
                        emit(&sink, &format!("{CLEAR_LINE}{}", step(tick)));
                        tick += 1;
                    }
                }
                changed = snapshots.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let generating = snapshots.borrow_and_update().phase().is_generating();
                    // Show the first step without waiting a full interval.
                    if generating && tick == 0 {
                        emit(&sink, &format!("{CLEAR_LINE}{}", step(tick)));
                        tick += 1;
                    }
                }
            }
        }
    });
    Indicator { handle, out }
}

/// Progress output is best effort; a closed terminal must not fail the run.
fn emit<W: Write>(out: &Mutex<W>, text: &str) {
    if let Ok(mut out) = out.lock() {
        out.write_all(text.as_bytes())
            .and_then(|()| out.flush())
            .ok();
    }
}

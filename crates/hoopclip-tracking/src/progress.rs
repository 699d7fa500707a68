//! Progress reporting hooks.

use hoopclip_models::ProgressUpdate;

/// Receives progress updates during a detection pass.
///
/// Observers must not block; the pass waits for `on_progress` to return.
pub trait ProgressObserver {
    fn on_progress(&self, update: ProgressUpdate);
}

impl<F> ProgressObserver for F
where
    F: Fn(ProgressUpdate),
{
    fn on_progress(&self, update: ProgressUpdate) {
        self(update)
    }
}

/// Observer that drops every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&self, _update: ProgressUpdate) {}
}

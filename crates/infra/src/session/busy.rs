//! Process-wide busy flag

use authconsole_core::BusyIndicator;
use tokio::sync::watch;

/// Boolean busy indicator with change notifications
///
/// UI layers subscribe to re-render a spinner; the client only toggles it.
#[derive(Debug)]
pub struct BusyFlag {
    state: watch::Sender<bool>,
}

impl BusyFlag {
    pub fn new() -> Self {
        let (state, _) = watch::channel(false);
        Self { state }
    }

    /// Receiver that observes every toggle
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.state.subscribe()
    }
}

impl Default for BusyFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl BusyIndicator for BusyFlag {
    fn show(&self) {
        self.state.send_replace(true);
    }

    fn hide(&self) {
        self.state.send_replace(false);
    }

    fn is_busy(&self) -> bool {
        *self.state.borrow()
    }
}

//! Bounded alert queue

use std::collections::VecDeque;

use authconsole_core::AlertSink;
use authconsole_domain::constants::DEFAULT_ALERT_CAPACITY;
use authconsole_domain::Alert;
use parking_lot::Mutex;
use tracing::debug;

/// FIFO of alerts waiting to be shown; the oldest is dropped when full
#[derive(Debug)]
pub struct AlertQueue {
    alerts: Mutex<VecDeque<Alert>>,
    capacity: usize,
}

impl AlertQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { alerts: Mutex::new(VecDeque::with_capacity(capacity)), capacity }
    }

    /// Take every pending alert, oldest first
    pub fn drain(&self) -> Vec<Alert> {
        self.alerts.lock().drain(..).collect()
    }

    /// Most recent alert without removing it
    pub fn latest(&self) -> Option<Alert> {
        self.alerts.lock().back().cloned()
    }

    pub fn len(&self) -> usize {
        self.alerts.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.lock().is_empty()
    }
}

impl Default for AlertQueue {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_ALERT_CAPACITY)
    }
}

impl AlertSink for AlertQueue {
    fn push(&self, alert: Alert) {
        let mut alerts = self.alerts.lock();
        if alerts.len() == self.capacity {
            if let Some(dropped) = alerts.pop_front() {
                debug!(message = %dropped.message, "alert queue full, dropping oldest");
            }
        }
        alerts.push_back(alert);
    }
}

#[cfg(test)]
mod tests {
    use authconsole_domain::AlertSeverity;

    use super::*;

    #[test]
    fn drains_in_arrival_order() {
        let queue = AlertQueue::default();
        queue.push(Alert::error("first"));
        queue.push(Alert::success("second"));

        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].message, "first");
        assert_eq!(drained[1].severity, AlertSeverity::Success);
        assert!(queue.is_empty());
    }

    #[test]
    fn drops_oldest_when_full() {
        let queue = AlertQueue::with_capacity(2);
        queue.push(Alert::error("a"));
        queue.push(Alert::error("b"));
        queue.push(Alert::error("c"));

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.latest().map(|a| a.message), Some("c".to_string()));
        assert_eq!(queue.drain()[0].message, "b");
    }
}

use std::collections::VecDeque;
use std::sync::Mutex;

use herdbook_core::{LogNotifier, Notification, Notifier};

/// Number of undelivered notifications kept before the oldest are dropped.
pub const TOAST_CAPACITY: usize = 50;

/// Buffers notifications until the UI collects them.
/// Every notification is also logged.
#[derive(Default)]
pub struct ToastQueue {
    pending: Mutex<VecDeque<Notification>>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all buffered notifications, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        pending.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, notification: Notification) {
        LogNotifier.notify(notification.clone());

        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if pending.len() == TOAST_CAPACITY {
            pending.pop_front();
        }
        pending.push_back(notification);
    }
}

//! Notification sink for transient success/error messages.
//!
//! The event handler receives a `&mut dyn Notifier` and decides when to notify
//! and with which message; how the message is shown is up to the sink. The
//! runtime uses [`ToastQueue`], which keeps the most recent toasts for the
//! renderer and asks the runtime to schedule one expiry timer per toast.

/// Receives user-facing notifications. Fire-and-forget.
pub trait Notifier {
    fn notify_success(&mut self, message: &str);
    fn notify_error(&mut self, message: &str);
}

/// Kind of toast, used for coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// A single visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

/// FIFO of visible toasts.
///
/// Every pushed toast schedules exactly one expiry timer of the same length,
/// so timers fire in push order and each tick expires the oldest toast.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    unscheduled: usize,
}

impl ToastQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, kind: ToastKind, message: &str) {
        self.toasts.push(Toast {
            kind,
            message: message.to_string(),
        });
        self.unscheduled += 1;
    }

    /// Number of expiry timers the runtime still has to start. Resets to zero.
    pub fn take_unscheduled(&mut self) -> usize {
        std::mem::take(&mut self.unscheduled)
    }

    /// Removes the oldest toast. Returns `true` if something was removed.
    pub fn expire_oldest(&mut self) -> bool {
        if self.toasts.is_empty() {
            return false;
        }
        self.toasts.remove(0);
        true
    }

    /// The newest `limit` toasts, oldest first.
    #[must_use]
    pub fn visible(&self, limit: usize) -> &[Toast] {
        &self.toasts[self.toasts.len().saturating_sub(limit)..]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl Notifier for ToastQueue {
    fn notify_success(&mut self, message: &str) {
        tracing::debug!(message, "success toast");
        self.push(ToastKind::Success, message);
    }

    fn notify_error(&mut self, message: &str) {
        tracing::debug!(message, "error toast");
        self.push(ToastKind::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_expire_in_push_order() {
        let mut queue = ToastQueue::new();
        queue.notify_success("Vehicle added!");
        queue.notify_error("Error fetching vehicles!");
        assert_eq!(queue.take_unscheduled(), 2);
        assert_eq!(queue.take_unscheduled(), 0);

        assert!(queue.expire_oldest());
        assert_eq!(queue.visible(5)[0].message, "Error fetching vehicles!");
        assert_eq!(queue.visible(5)[0].kind, ToastKind::Error);
        assert!(queue.expire_oldest());
        assert!(!queue.expire_oldest());
        assert!(queue.is_empty());
    }

    #[test]
    fn visible_keeps_newest() {
        let mut queue = ToastQueue::new();
        for i in 0..5 {
            queue.notify_success(&format!("toast {i}"));
        }
        let shown: Vec<&str> = queue.visible(2).iter().map(|t| t.message.as_str()).collect();
        assert_eq!(shown, ["toast 3", "toast 4"]);
        assert_eq!(queue.len(), 5);
    }
}

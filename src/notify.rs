//! Transient notifications: a toast queue and a single modal slot.
//!
//! Toasts expire after a fixed timeout or on manual dismissal; there is no
//! de-duplication and no queue cap. The modal is one slot: opening it
//! overwrites whatever was shown before, and Esc closes it. No stacking.

use std::time::{Duration, Instant};

/// How long a toast stays visible without manual dismissal.
pub const TOAST_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub title: String,
    pub message: String,
    pub kind: ToastKind,
    created: Instant,
}

#[derive(Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
}

impl ToastQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: ToastKind, title: &str, message: &str) {
        self.toasts.push(Toast {
            title: title.to_string(),
            message: message.to_string(),
            kind,
            created: Instant::now(),
        });
    }

    pub fn info(&mut self, title: &str, message: &str) {
        self.push(ToastKind::Info, title, message);
    }

    pub fn success(&mut self, title: &str, message: &str) {
        self.push(ToastKind::Success, title, message);
    }

    pub fn warning(&mut self, title: &str, message: &str) {
        self.push(ToastKind::Warning, title, message);
    }

    pub fn error(&mut self, title: &str, message: &str) {
        self.push(ToastKind::Error, title, message);
    }

    /// Drops toasts older than [`TOAST_TTL`]. Called once per loop tick.
    pub fn prune(&mut self) {
        self.toasts.retain(|t| t.created.elapsed() < TOAST_TTL);
    }

    /// Dismisses the oldest toast.
    pub fn dismiss(&mut self) {
        if !self.toasts.is_empty() {
            self.toasts.remove(0);
        }
    }

    #[must_use]
    pub fn visible(&self) -> &[Toast] {
        &self.toasts
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Modal {
    pub title: String,
    pub body: Vec<String>,
    pub footer: String,
}

#[derive(Default)]
pub struct ModalSlot {
    modal: Option<Modal>,
}

impl ModalSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows a modal, replacing any previous one.
    pub fn open(&mut self, title: &str, body: Vec<String>, footer: &str) {
        self.modal = Some(Modal {
            title: title.to_string(),
            body,
            footer: footer.to_string(),
        });
    }

    pub fn close(&mut self) {
        self.modal = None;
    }

    #[must_use]
    pub fn current(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.modal.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_append_without_dedup() {
        let mut queue = ToastQueue::new();
        queue.info("Refreshing", "Updating dashboard data...");
        queue.info("Refreshing", "Updating dashboard data...");
        assert_eq!(queue.visible().len(), 2);
    }

    #[test]
    fn dismiss_removes_oldest() {
        let mut queue = ToastQueue::new();
        queue.info("first", "a");
        queue.error("second", "b");
        queue.dismiss();
        assert_eq!(queue.visible().len(), 1);
        assert_eq!(queue.visible()[0].title, "second");
    }

    #[test]
    fn prune_keeps_fresh_toasts() {
        let mut queue = ToastQueue::new();
        queue.success("Saved", "Onboarding progress saved");
        queue.prune();
        assert_eq!(queue.visible().len(), 1);
    }

    #[test]
    fn modal_overwrites_previous() {
        let mut slot = ModalSlot::new();
        slot.open("Password Reset", vec!["User: jdoe".to_string()], "Esc close");
        slot.open("User Details", vec!["Username: asmith".to_string()], "");
        assert!(slot.is_open());
        assert_eq!(slot.current().unwrap().title, "User Details");

        slot.close();
        assert!(!slot.is_open());
    }
}

//! Toast queue
//!
//! Every notice gets its own id, so an expiring timer only removes the toast
//! it was started for.

/// How long a success toast stays up
pub const SUCCESS_TOAST_MS: u32 = 3000;

/// How long an error toast stays up
pub const ERROR_TOAST_MS: u32 = 5000;

/// Toasts kept on screen at once; the oldest goes first
pub const MAX_TOASTS: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn lifetime_ms(self) -> u32 {
        match self {
            ToastKind::Success => SUCCESS_TOAST_MS,
            ToastKind::Error => ERROR_TOAST_MS,
        }
    }

    /// ARIA role, errors interrupt the screen reader
    pub fn role(self) -> &'static str {
        match self {
            ToastKind::Success => "status",
            ToastKind::Error => "alert",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ToastEntry {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastQueue {
    next_id: u64,
    entries: Vec<ToastEntry>,
}

impl ToastQueue {
    /// Queue a notice and return its id.
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.entries.push(ToastEntry {
            id,
            kind,
            message: message.into(),
        });
        if self.entries.len() > MAX_TOASTS {
            let overflow = self.entries.len() - MAX_TOASTS;
            self.entries.drain(..overflow);
        }
        id
    }

    /// Remove one toast. Unknown ids are ignored.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|t| t.id != id);
        self.entries.len() != before
    }

    pub fn entries(&self) -> &[ToastEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_only_removes_its_own_toast() {
        let mut queue = ToastQueue::default();
        let first = queue.push(ToastKind::Success, "Redeemed! Remaining: 520.0 pts");
        let second = queue.push(ToastKind::Success, "Redeemed! Remaining: 510.0 pts");

        // The first toast's timer fires after the second was shown
        assert!(queue.dismiss(first));
        assert_eq!(queue.entries().len(), 1);
        assert_eq!(queue.entries()[0].id, second);
        assert_eq!(queue.entries()[0].message, "Redeemed! Remaining: 510.0 pts");

        assert!(!queue.dismiss(first));
    }

    #[test]
    fn test_success_and_error_stack() {
        let mut queue = ToastQueue::default();
        queue.push(ToastKind::Error, "insufficient points");
        queue.push(ToastKind::Success, "Redeemed! Remaining: 40.0 pts");

        let kinds: Vec<_> = queue.entries().iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![ToastKind::Error, ToastKind::Success]);
        assert_eq!(ToastKind::Error.lifetime_ms(), 5000);
        assert_eq!(ToastKind::Success.role(), "status");
    }

    #[test]
    fn test_overflow_drops_oldest() {
        let mut queue = ToastQueue::default();
        let ids: Vec<u64> = (0..5)
            .map(|i| queue.push(ToastKind::Success, format!("notice {}", i)))
            .collect();

        let kept: Vec<u64> = queue.entries().iter().map(|t| t.id).collect();
        assert_eq!(kept, ids[2..].to_vec());
    }
}

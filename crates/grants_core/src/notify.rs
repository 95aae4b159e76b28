use std::time::Duration;

/// How long a toast stays visible.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    remaining: Duration,
}

/// Fire-and-forget toasts, expired by elapsed time reported through `Msg::Tick`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Notifications {
    next_id: u64,
    active: Vec<Notification>,
}

impl Notifications {
    pub fn success(&mut self, message: impl Into<String>) {
        self.post(NotificationKind::Success, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.post(NotificationKind::Error, message.into());
    }

    fn post(&mut self, kind: NotificationKind, message: String) {
        self.next_id += 1;
        self.active.push(Notification {
            id: self.next_id,
            kind,
            message,
            remaining: NOTIFICATION_TTL,
        });
    }

    /// Ages every toast; returns true if any expired.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        let before = self.active.len();
        for toast in &mut self.active {
            toast.remaining = toast.remaining.saturating_sub(elapsed);
        }
        self.active.retain(|toast| !toast.remaining.is_zero());
        self.active.len() != before
    }

    pub fn active(&self) -> &[Notification] {
        &self.active
    }
}

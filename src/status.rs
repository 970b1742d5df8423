use std::time::Duration;
use std::time::Instant;

/// How long a message stays visible before it disappears on its own.
pub const MESSAGE_TTL: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

/// Transient user-facing feedback for one submission attempt.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: MessageKind,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Error,
        }
    }
}

/// Holds at most one `StatusMessage` at a time. Showing a new message evicts
/// the previous one immediately; an unreplaced message expires after
/// `MESSAGE_TTL`.
#[derive(Debug, Default)]
pub struct MessageSlot {
    current: Option<(StatusMessage, Instant)>,
}

impl MessageSlot {
    pub fn new() -> Self { Self::default() }

    pub fn show(
        &mut self,
        message: StatusMessage,
    ) {
        self.show_at(message, Instant::now());
    }

    pub fn current(&self) -> Option<&StatusMessage> { self.current_at(Instant::now()) }

    fn show_at(
        &mut self,
        message: StatusMessage,
        now: Instant,
    ) {
        self.current = Some((message, now));
    }

    fn current_at(
        &self,
        now: Instant,
    ) -> Option<&StatusMessage> {
        match &self.current {
            Some((message, shown_at))
                if now.saturating_duration_since(*shown_at) < MESSAGE_TTL =>
            {
                Some(message)
            }
            _ => None,
        }
    }
}

use crate::event::ShellEvent;
use crate::registrar::{NotificationId, WindowHandle};
use serde::{Deserialize, Serialize};

/// A decoded shell hook broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellNotification {
    pub event: ShellEvent,
    /// The window the event is about, not the subscribed window.
    pub window: WindowHandle,
}

impl ShellNotification {
    /// Translates a raw window message. Returns `None` for anything that is
    /// not a shell hook broadcast, including every message when `id` is
    /// unavailable.
    pub fn from_message(
        id: NotificationId,
        message: u32,
        wparam: usize,
        lparam: isize,
    ) -> Option<Self> {
        if !id.matches(message) {
            return None;
        }

        Some(Self {
            event: ShellEvent::decode(wparam),
            window: WindowHandle(lparam),
        })
    }
}

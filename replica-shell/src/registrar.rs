use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::sync::OnceLock;

/// Name of the registered window message the shell broadcasts on.
pub const SHELL_HOOK_CHANNEL: &str = "SHELLHOOK";

/// Message identifier negotiated for shell hook broadcasts. Zero means the
/// negotiation failed and no broadcasts will ever arrive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u32);

impl NotificationId {
    pub const UNAVAILABLE: NotificationId = NotificationId(0);

    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }

    pub fn get(self) -> Option<NonZeroU32> {
        NonZeroU32::new(self.0)
    }

    pub fn is_available(self) -> bool {
        self.0 != 0
    }

    /// Whether an incoming message type is a shell hook broadcast.
    /// Always false when unavailable, so message 0 (WM_NULL) never matches.
    pub fn matches(self, message: u32) -> bool {
        self.is_available() && self.0 == message
    }
}

/// Opaque handle of a top-level window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowHandle(pub isize);

impl WindowHandle {
    pub fn raw(self) -> isize {
        self.0
    }
}

/// Calls into the platform's window messaging facility.
///
/// Every call touches global window manager state and must run on the
/// thread that owns the window.
pub trait ShellHookApi {
    /// Returns the message identifier for `name`, or 0 on failure.
    fn register_message(&self, name: &str) -> u32;
    fn register_shell_hook_window(&self, window: WindowHandle) -> bool;
    fn deregister_shell_hook_window(&self, window: WindowHandle) -> bool;
}

/// Negotiates the shell hook message once and toggles window subscriptions.
pub struct Registrar<A> {
    api: A,
    id: OnceLock<NotificationId>,
}

impl<A: ShellHookApi> Registrar<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            id: OnceLock::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Negotiates the notification identifier on first call and returns the
    /// cached value afterwards. A failed negotiation is cached too; the
    /// channel name never changes so asking again would not help.
    pub fn resolve_notification_id(&self) -> NotificationId {
        *self.id.get_or_init(|| {
            let id = NotificationId::from_raw(self.api.register_message(SHELL_HOOK_CHANNEL));
            if id.is_available() {
                tracing::debug!("{} registered as message {:#x}", SHELL_HOOK_CHANNEL, id.raw());
            } else {
                tracing::error!(
                    "Failed to register {} window message, window tracking disabled",
                    SHELL_HOOK_CHANNEL
                );
            }
            id
        })
    }

    /// The cached identifier, without negotiating.
    pub fn notification_id(&self) -> Option<NotificationId> {
        self.id.get().copied()
    }

    /// Asks the window manager to send shell hook broadcasts to `window`.
    ///
    /// Callers should check [`Registrar::resolve_notification_id`] first:
    /// without a channel the subscription is accepted or refused by the OS
    /// but nothing will ever be delivered.
    pub fn subscribe(&self, window: WindowHandle) -> bool {
        if self.notification_id() == Some(NotificationId::UNAVAILABLE) {
            tracing::warn!(
                "Subscribing window {:#x} while {} is unavailable",
                window.raw(),
                SHELL_HOOK_CHANNEL
            );
        }

        let ok = self.api.register_shell_hook_window(window);
        if ok {
            tracing::info!("Window {:#x} subscribed to shell hook", window.raw());
        } else {
            tracing::warn!("Failed to subscribe window {:#x} to shell hook", window.raw());
        }
        ok
    }

    pub fn unsubscribe(&self, window: WindowHandle) -> bool {
        let ok = self.api.deregister_shell_hook_window(window);
        if ok {
            tracing::info!("Window {:#x} unsubscribed from shell hook", window.raw());
        } else {
            tracing::debug!("Window {:#x} was not subscribed to shell hook", window.raw());
        }
        ok
    }

    /// Subscribes `window` and returns a guard that unsubscribes it on drop.
    /// Returns `None` when the OS refused the subscription.
    pub fn subscribe_scoped(&self, window: WindowHandle) -> Option<Subscription<'_, A>> {
        if self.subscribe(window) {
            Some(Subscription {
                registrar: self,
                window,
                active: true,
            })
        } else {
            None
        }
    }
}

/// A live shell hook subscription. Unsubscribes exactly once.
pub struct Subscription<'a, A: ShellHookApi> {
    registrar: &'a Registrar<A>,
    window: WindowHandle,
    active: bool,
}

impl<A: ShellHookApi> Subscription<'_, A> {
    pub fn window(&self) -> WindowHandle {
        self.window
    }

    /// Unsubscribes now and reports whether the OS accepted it.
    pub fn release(mut self) -> bool {
        self.active = false;
        self.registrar.unsubscribe(self.window)
    }
}

impl<A: ShellHookApi> Drop for Subscription<'_, A> {
    fn drop(&mut self) {
        if self.active {
            self.registrar.unsubscribe(self.window);
        }
    }
}

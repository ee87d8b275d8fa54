use replica_shell::{
    NotificationId, Registrar, ShellEvent, ShellHookApi, ShellNotification, WindowHandle,
};
use std::cell::{Cell, RefCell};
use std::collections::HashSet;

/// In-memory window manager: remembers hooked windows and counts calls.
struct FakeShell {
    message: u32,
    accept_subscriptions: bool,
    negotiations: Cell<usize>,
    subscribe_attempts: Cell<usize>,
    hooked: RefCell<HashSet<WindowHandle>>,
}

impl FakeShell {
    fn new(message: u32) -> Self {
        Self {
            message,
            accept_subscriptions: true,
            negotiations: Cell::new(0),
            subscribe_attempts: Cell::new(0),
            hooked: RefCell::new(HashSet::new()),
        }
    }

    fn without_channel() -> Self {
        Self {
            accept_subscriptions: false,
            ..Self::new(0)
        }
    }
}

impl ShellHookApi for FakeShell {
    fn register_message(&self, _name: &str) -> u32 {
        self.negotiations.set(self.negotiations.get() + 1);
        self.message
    }

    fn register_shell_hook_window(&self, window: WindowHandle) -> bool {
        self.subscribe_attempts.set(self.subscribe_attempts.get() + 1);
        if !self.accept_subscriptions {
            return false;
        }
        self.hooked.borrow_mut().insert(window);
        true
    }

    fn deregister_shell_hook_window(&self, window: WindowHandle) -> bool {
        self.hooked.borrow_mut().remove(&window)
    }
}

/// What a host window procedure does with each incoming message.
fn pump(id: NotificationId, messages: &[(u32, usize, isize)]) -> Vec<ShellNotification> {
    messages
        .iter()
        .filter_map(|&(msg, wparam, lparam)| ShellNotification::from_message(id, msg, wparam, lparam))
        .collect()
}

#[test]
fn test_broadcasts_are_classified() {
    let registrar = Registrar::new(FakeShell::new(0x8001));
    let host = WindowHandle(0x100);

    let id = registrar.resolve_notification_id();
    assert_eq!(id.raw(), 0x8001);
    assert!(registrar.subscribe(host));

    let received = pump(
        id,
        &[
            (0x8001, 4, 0x200),
            (0x000F, 0, 0),
            (0x8001, 0x8006, 0x300),
        ],
    );

    assert_eq!(
        received,
        vec![
            ShellNotification {
                event: ShellEvent::Activated,
                window: WindowHandle(0x200),
            },
            ShellNotification {
                event: ShellEvent::Flash,
                window: WindowHandle(0x300),
            },
        ]
    );

    assert!(registrar.unsubscribe(host));
    assert!(!registrar.unsubscribe(host));
}

#[test]
fn test_missing_channel_degrades_quietly() {
    let registrar = Registrar::new(FakeShell::without_channel());
    let host = WindowHandle(0x100);

    let id = registrar.resolve_notification_id();
    assert!(!id.is_available());

    // Callers are expected to check the id first; skipping the check must not crash.
    assert!(!registrar.subscribe(host));
    assert_eq!(registrar.api().subscribe_attempts.get(), 1);
    assert!(registrar.subscribe_scoped(host).is_none());

    assert!(pump(id, &[(0, 4, 0x200), (0x8001, 4, 0x200)]).is_empty());

    assert_eq!(registrar.resolve_notification_id(), id);
    assert_eq!(registrar.api().negotiations.get(), 1);
}

#[test]
fn test_scoped_subscription_lifecycle() {
    let registrar = Registrar::new(FakeShell::new(0xC0DE));
    let host = WindowHandle(0x100);
    registrar.resolve_notification_id();

    let subscription = registrar.subscribe_scoped(host).unwrap();
    assert!(registrar.api().hooked.borrow().contains(&host));
    drop(subscription);

    assert!(registrar.api().hooked.borrow().is_empty());
    assert!(!registrar.unsubscribe(host));
}

#[test]
fn test_unmapped_codes_reach_the_caller() {
    let registrar = Registrar::new(FakeShell::new(0xC0DE));
    let id = registrar.resolve_notification_id();

    let received = pump(id, &[(0xC0DE, 13, 0x1), (0xC0DE, 0x8001, 0x2)]);
    assert_eq!(received[0].event, ShellEvent::Unrecognized(13));
    assert_eq!(received[1].event, ShellEvent::Created);
}

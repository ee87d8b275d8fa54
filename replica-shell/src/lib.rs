pub mod event;
pub mod message;
pub mod registrar;

pub use event::ShellEvent;
pub use message::ShellNotification;
pub use registrar::{
    NotificationId, Registrar, ShellHookApi, Subscription, WindowHandle, SHELL_HOOK_CHANNEL,
};

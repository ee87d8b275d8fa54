use serde::{Deserialize, Serialize};
use std::fmt;

const HSHELL_HIGHBIT: usize = 0x8000;

const HSHELL_WINDOWCREATED: usize = 1;
const HSHELL_WINDOWDESTROYED: usize = 2;
const HSHELL_WINDOWACTIVATED: usize = 4;
const HSHELL_REDRAW: usize = 6;

/// Window lifecycle change broadcast by the shell to subscribed windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShellEvent {
    Created,
    Destroyed,
    Activated,
    /// Activation that bypassed normal focus rules, e.g. a full-screen app taking over.
    ActivatedRude,
    Redraw,
    /// The window asked for attention.
    Flash,
    /// A code outside the known set. Carries the raw payload untouched.
    Unrecognized(usize),
}

impl ShellEvent {
    /// Classifies a raw shell hook payload.
    ///
    /// The high bit is not an event of its own: it only turns `Activated`
    /// into `ActivatedRude` and `Redraw` into `Flash`. On any other base
    /// code it is ignored.
    pub fn decode(code: usize) -> Self {
        let high = (code & HSHELL_HIGHBIT) != 0;
        let base = code & !HSHELL_HIGHBIT;

        match (base, high) {
            (HSHELL_WINDOWCREATED, _) => ShellEvent::Created,
            (HSHELL_WINDOWDESTROYED, _) => ShellEvent::Destroyed,
            (HSHELL_WINDOWACTIVATED, false) => ShellEvent::Activated,
            (HSHELL_WINDOWACTIVATED, true) => ShellEvent::ActivatedRude,
            (HSHELL_REDRAW, false) => ShellEvent::Redraw,
            (HSHELL_REDRAW, true) => ShellEvent::Flash,
            _ => ShellEvent::Unrecognized(code),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, ShellEvent::Unrecognized(_))
    }
}

impl From<usize> for ShellEvent {
    fn from(code: usize) -> Self {
        Self::decode(code)
    }
}

impl fmt::Display for ShellEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellEvent::Created => f.write_str("created"),
            ShellEvent::Destroyed => f.write_str("destroyed"),
            ShellEvent::Activated => f.write_str("activated"),
            ShellEvent::ActivatedRude => f.write_str("activated-rude"),
            ShellEvent::Redraw => f.write_str("redraw"),
            ShellEvent::Flash => f.write_str("flash"),
            ShellEvent::Unrecognized(code) => write!(f, "unrecognized({:#x})", code),
        }
    }
}

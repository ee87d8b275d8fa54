#![cfg_attr(not(windows), allow(dead_code))]

use anyhow::Result;
use replica_shell::ShellNotification;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn render(notification: &ShellNotification, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(format!(
            "{:<16} {:#x}",
            notification.event.to_string(),
            notification.window.raw()
        )),
        OutputFormat::Json => Ok(serde_json::to_string(notification)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use replica_shell::{ShellEvent, WindowHandle};

    fn notification(event: ShellEvent) -> ShellNotification {
        ShellNotification {
            event,
            window: WindowHandle(0x1f2e),
        }
    }

    #[test]
    fn test_text_output() {
        let line = render(&notification(ShellEvent::ActivatedRude), OutputFormat::Text).unwrap();
        assert_eq!(line, "activated-rude   0x1f2e");
    }

    #[test]
    fn test_text_output_unrecognized() {
        let line = render(&notification(ShellEvent::Unrecognized(13)), OutputFormat::Text).unwrap();
        assert_eq!(line, "unrecognized(0xd) 0x1f2e");
    }

    #[test]
    fn test_json_output() {
        let line = render(&notification(ShellEvent::Flash), OutputFormat::Json).unwrap();
        assert_eq!(line, r#"{"event":"flash","window":7982}"#);
    }
}

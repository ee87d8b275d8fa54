mod output;
#[cfg(windows)]
mod win;

use anyhow::Result;
use argh::FromArgs;
use output::OutputFormat;
use tracing_subscriber::EnvFilter;

#[derive(FromArgs, Debug)]
#[cfg_attr(not(windows), allow(dead_code))]
/// Watch top-level window lifecycle broadcasts from the shell.
struct Args {
    /// print one JSON object per notification
    #[argh(switch)]
    json: bool,

    /// exit after this many notifications
    #[argh(option)]
    count: Option<usize>,

    /// do not print codes outside the known event set
    #[argh(switch)]
    skip_unrecognized: bool,
}

#[cfg_attr(not(windows), allow(dead_code))]
impl Args {
    fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Args = argh::from_env();

    tracing::info!("replica starting");

    run(args)
}

#[cfg(windows)]
fn run(args: Args) -> Result<()> {
    use replica_shell::Registrar;
    use std::io::Write;
    use std::ops::ControlFlow;

    if args.count == Some(0) {
        return Ok(());
    }

    let registrar = Registrar::new(win::Win32ShellHook);
    let id = registrar.resolve_notification_id();
    if !id.is_available() {
        tracing::warn!("Shell hook channel unavailable, nothing to watch");
        return Ok(());
    }

    let host = win::HostWindow::create()?;
    let Some(subscription) = registrar.subscribe_scoped(host.handle()) else {
        anyhow::bail!("Window manager refused the shell hook subscription");
    };
    tracing::debug!("Subscription held for {:#x}", subscription.window().raw());

    let format = args.format();
    let limit = args.count;
    let skip_unrecognized = args.skip_unrecognized;
    let mut seen = 0usize;

    win::run_message_loop(id, &host, move |notification| {
        if skip_unrecognized && !notification.event.is_recognized() {
            return ControlFlow::Continue(());
        }

        match output::render(&notification, format) {
            Ok(line) => {
                let mut stdout = std::io::stdout().lock();
                if let Err(e) = writeln!(stdout, "{}", line).and_then(|_| stdout.flush()) {
                    tracing::error!("Failed to write notification: {}", e);
                    return ControlFlow::Break(());
                }
            }
            Err(e) => tracing::error!("Failed to render notification: {}", e),
        }

        seen += 1;
        match limit {
            Some(limit) if seen >= limit => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    })
}

#[cfg(not(windows))]
fn run(_args: Args) -> Result<()> {
    anyhow::bail!("replica needs Windows: shell hook broadcasts are a Win32 facility")
}

use super::from_hwnd;
use anyhow::{Context, Result};
use replica_shell::{NotificationId, ShellNotification, WindowHandle};
use std::cell::RefCell;
use std::ops::ControlFlow;
use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetMessageW,
    PostQuitMessage, RegisterClassW, TranslateMessage, MSG, WINDOW_EX_STYLE, WM_DESTROY,
    WNDCLASSW, WS_OVERLAPPED,
};

const HOST_CLASS: PCWSTR = w!("OnTopReplicaShellHookHost");

type Handler = Box<dyn FnMut(ShellNotification) -> ControlFlow<()>>;

struct Dispatch {
    id: NotificationId,
    handler: Handler,
}

thread_local! {
    static DISPATCH: RefCell<Option<Dispatch>> = const { RefCell::new(None) };
}

/// Hidden top-level window that receives shell hook broadcasts.
///
/// Message-only windows are never sent shell hook messages, so this is a
/// regular overlapped window that is simply never shown.
pub struct HostWindow {
    hwnd: HWND,
}

impl HostWindow {
    pub fn create() -> Result<Self> {
        unsafe {
            let instance = GetModuleHandleW(None).context("Failed to get module handle")?;

            let wc = WNDCLASSW {
                lpfnWndProc: Some(host_window_proc),
                hInstance: instance.into(),
                lpszClassName: HOST_CLASS,
                ..Default::default()
            };
            // Fails if the class is already registered, which is fine
            RegisterClassW(&wc);

            let hwnd = CreateWindowExW(
                WINDOW_EX_STYLE::default(),
                HOST_CLASS,
                w!("OnTopReplica shell hook"),
                WS_OVERLAPPED,
                0,
                0,
                0,
                0,
                None,
                None,
                Some(instance.into()),
                None,
            )
            .context("Failed to create shell hook host window")?;

            tracing::debug!("Host window created: {:#x}", hwnd.0 as isize);
            Ok(Self { hwnd })
        }
    }

    pub fn handle(&self) -> WindowHandle {
        from_hwnd(self.hwnd)
    }
}

impl Drop for HostWindow {
    fn drop(&mut self) {
        if let Err(e) = unsafe { DestroyWindow(self.hwnd) } {
            tracing::debug!("Host window already gone: {}", e);
        }
    }
}

/// Pumps messages for the current thread until the handler breaks or the
/// host window is destroyed. Must run on the thread that created `host`.
pub fn run_message_loop<F>(id: NotificationId, host: &HostWindow, handler: F) -> Result<()>
where
    F: FnMut(ShellNotification) -> ControlFlow<()> + 'static,
{
    DISPATCH.with(|slot| {
        *slot.borrow_mut() = Some(Dispatch {
            id,
            handler: Box::new(handler),
        });
    });

    if let Some(message) = id.get() {
        tracing::info!(
            "Listening for shell hook message {:#x} on {:#x}",
            message.get(),
            host.handle().raw()
        );
    }

    let mut msg = MSG::default();
    unsafe {
        loop {
            let ret = GetMessageW(&mut msg, None, 0, 0).0;
            if ret == 0 {
                break;
            }
            if ret == -1 {
                DISPATCH.with(|slot| slot.borrow_mut().take());
                anyhow::bail!("GetMessageW failed for {:#x}", host.handle().raw());
            }
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }

    DISPATCH.with(|slot| slot.borrow_mut().take());
    tracing::info!("Message loop finished");
    Ok(())
}

fn dispatch(message: u32, wparam: WPARAM, lparam: LPARAM) -> bool {
    DISPATCH.with(|slot| {
        // Re-entrant messages sent while the handler runs are left to DefWindowProc
        let Ok(mut slot) = slot.try_borrow_mut() else {
            return false;
        };
        let Some(dispatch) = slot.as_mut() else {
            return false;
        };
        let Some(notification) =
            ShellNotification::from_message(dispatch.id, message, wparam.0, lparam.0)
        else {
            return false;
        };

        if !notification.event.is_recognized() {
            tracing::debug!("Unrecognized shell hook code: {}", notification.event);
        }

        if (dispatch.handler)(notification).is_break() {
            unsafe { PostQuitMessage(0) };
        }
        true
    })
}

unsafe extern "system" fn host_window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if dispatch(msg, wparam, lparam) {
        return LRESULT(0);
    }

    match msg {
        WM_DESTROY => {
            tracing::debug!("Host window {:#x} destroyed", from_hwnd(hwnd).raw());
            PostQuitMessage(0);
            LRESULT(0)
        }
        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}


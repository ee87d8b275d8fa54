use replica_shell::{ShellHookApi, WindowHandle};
use std::ffi::c_void;
use windows::core::{HSTRING, PCWSTR};
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::{
    DeregisterShellHookWindow, RegisterShellHookWindow, RegisterWindowMessageW,
};

/// Shell hook calls backed by user32.
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32ShellHook;

impl ShellHookApi for Win32ShellHook {
    fn register_message(&self, name: &str) -> u32 {
        let name = HSTRING::from(name);
        unsafe { RegisterWindowMessageW(PCWSTR(name.as_ptr())) }
    }

    fn register_shell_hook_window(&self, window: WindowHandle) -> bool {
        unsafe { RegisterShellHookWindow(to_hwnd(window)).as_bool() }
    }

    fn deregister_shell_hook_window(&self, window: WindowHandle) -> bool {
        unsafe { DeregisterShellHookWindow(to_hwnd(window)).as_bool() }
    }
}

pub fn to_hwnd(window: WindowHandle) -> HWND {
    HWND(window.raw() as *mut c_void)
}

pub fn from_hwnd(hwnd: HWND) -> WindowHandle {
    WindowHandle(hwnd.0 as isize)
}

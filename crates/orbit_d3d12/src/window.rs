//! Win32 window plumbing.
//!
//! The window procedure translates the raw messages the core cares about
//! into [`InputEvent`]s and pushes them onto an [`EventQueue`] reached
//! through the window's user-data slot; everything else falls through to
//! `DefWindowProc`. The frame loop itself never sees a Win32 message.

use std::collections::VecDeque;

use orbit_core::input::InputEvent;
use windows::core::s;
use windows::Win32::Foundation::{HMODULE, HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleA;
use windows::Win32::UI::WindowsAndMessaging::{
    AdjustWindowRect, CreateWindowExA, DefWindowProcA, GetWindowLongPtrA, LoadCursorW,
    PostQuitMessage, RegisterClassExA, SetWindowLongPtrA, CREATESTRUCTA, CS_HREDRAW, CS_VREDRAW,
    CW_USEDEFAULT, GWLP_USERDATA, IDC_ARROW, WINDOW_EX_STYLE, WM_CREATE, WM_DESTROY, WM_KEYDOWN,
    WM_SIZE, WNDCLASSEXA, WS_OVERLAPPEDWINDOW,
};

/// Virtual-key code the original app quits on.
const VK_ESCAPE_CODE: u8 = 27;

/// Events translated by the window procedure, drained by the message pump.
#[derive(Default)]
pub struct EventQueue {
    pub events: VecDeque<InputEvent>,
}

pub fn register_window_class() -> eyre::Result<HMODULE> {
    let instance = unsafe { GetModuleHandleA(None)? };

    let wc = WNDCLASSEXA {
        cbSize: std::mem::size_of::<WNDCLASSEXA>() as u32,
        style: CS_HREDRAW | CS_VREDRAW,
        lpfnWndProc: Some(wndproc),
        hInstance: instance.into(),
        hCursor: unsafe { LoadCursorW(None, IDC_ARROW)? },
        lpszClassName: s!("OrbitLightsWindowClass"),
        ..Default::default()
    };

    let atom = unsafe { RegisterClassExA(&wc) };
    debug_assert_ne!(atom, 0, "Failed to register window class");
    Ok(instance)
}

/// Create the main window with a client area of exactly `client_size`.
/// The queue pointer lands in the window's user-data slot via the create
/// params; the caller keeps the queue alive for the window's lifetime.
pub fn create_app_window(
    instance: HMODULE,
    client_size: (u32, u32),
    event_queue: &mut EventQueue,
) -> eyre::Result<HWND> {
    let mut window_rect = RECT {
        left: 0,
        top: 0,
        right: client_size.0 as i32,
        bottom: client_size.1 as i32,
    };
    // Grow the rect so the *client* area matches the requested size.
    unsafe { AdjustWindowRect(&mut window_rect, WS_OVERLAPPEDWINDOW, false)? };

    let hwnd = unsafe {
        CreateWindowExA(
            WINDOW_EX_STYLE::default(),
            s!("OrbitLightsWindowClass"),
            s!("D3D12 App - Lights! Camera! Action!"),
            WS_OVERLAPPEDWINDOW,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            window_rect.right - window_rect.left,
            window_rect.bottom - window_rect.top,
            None,
            None,
            Some(instance.into()),
            Some(event_queue as *mut EventQueue as _),
        )
    }?;
    Ok(hwnd)
}

extern "system" fn wndproc(window: HWND, message: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if message == WM_CREATE {
        unsafe {
            let create_struct: &CREATESTRUCTA = &*(lparam.0 as *const CREATESTRUCTA);
            SetWindowLongPtrA(window, GWLP_USERDATA, create_struct.lpCreateParams as _);
        }
        return LRESULT(0);
    }

    let user_data = unsafe { GetWindowLongPtrA(window, GWLP_USERDATA) };
    if user_data == 0 {
        // Messages can arrive before WM_CREATE or after WM_DESTROY.
        return unsafe { DefWindowProcA(window, message, wparam, lparam) };
    }
    // Safety: the slot holds the EventQueue pointer installed at WM_CREATE,
    // which the main function keeps alive for the life of the window.
    let queue = unsafe { &mut *(user_data as *mut EventQueue) };

    match message {
        WM_DESTROY => {
            unsafe { PostQuitMessage(0) };
            LRESULT(0)
        }
        WM_KEYDOWN => {
            let code = wparam.0 as u8;
            queue.events.push_back(InputEvent::KeyDown(code));
            if code == VK_ESCAPE_CODE {
                queue.events.push_back(InputEvent::Quit);
            }
            LRESULT(0)
        }
        WM_SIZE => {
            let width = (lparam.0 as u32) & 0xffff;
            let height = ((lparam.0 as u32) >> 16) & 0xffff;
            queue.events.push_back(InputEvent::Resize(width, height));
            LRESULT(0)
        }
        _ => unsafe { DefWindowProcA(window, message, wparam, lparam) },
    }
}

//! The non-blocking message pump behind POLL_INPUT.

use orbit_core::input::InputEvent;
use windows::Win32::UI::WindowsAndMessaging::{
    DispatchMessageA, PeekMessageA, TranslateMessage, MSG, PM_REMOVE, WM_QUIT,
};

use crate::window::EventQueue;

/// Drains the thread's message queue each frame and hands the translated
/// events to the frame loop.
pub struct MessagePump {
    queue: Box<EventQueue>,
}

impl MessagePump {
    pub fn new(queue: Box<EventQueue>) -> Self {
        Self { queue }
    }

    /// Pump all pending messages without blocking. Dispatching lets the
    /// window procedure fill the event queue; `WM_QUIT` is the one message
    /// that never reaches a window procedure, so it is translated here.
    pub fn poll(&mut self, out: &mut Vec<InputEvent>) {
        let mut message = MSG::default();
        while unsafe { PeekMessageA(&mut message, None, 0, 0, PM_REMOVE) }.into() {
            unsafe {
                _ = TranslateMessage(&message);
                DispatchMessageA(&message);
            }
            if message.message == WM_QUIT {
                self.queue.events.push_back(InputEvent::Quit);
            }
        }
        out.extend(self.queue.events.drain(..));
    }
}

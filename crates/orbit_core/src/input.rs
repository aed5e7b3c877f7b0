//! Input events delivered by the platform collaborator.
//!
//! The window and message pump live outside the core; each POLL_INPUT phase
//! receives whatever discrete events accumulated since the last tick, in
//! arrival order.

/// One discrete event from the platform layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// End the frame loop. No further frame is recorded after this.
    Quit,
    /// A key was pressed; the raw virtual-key code is forwarded unmodified.
    KeyDown(u8),
    /// The drawable surface changed to a new client size, in pixels.
    Resize(u32, u32),
}

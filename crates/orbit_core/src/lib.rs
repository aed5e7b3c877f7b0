//! Platform-neutral core of the orbit-lights frame pipeline.
//!
//! This crate owns everything about the renderer that is not a Direct3D call:
//! the fence ticket protocol and per-slot ledger, the swapchain slot rotation,
//! the scene state (orbit camera, drawables, light palette, constant-buffer
//! records), the input event model, and the frame-loop state machine that
//! drives a [`frame_loop::RenderBackend`] implementation each tick.

pub mod camera;
pub mod constants;
pub mod drawable;
pub mod error;
pub mod frame_loop;
pub mod geometry;
pub mod input;
pub mod palette;
pub mod scene;
pub mod sync;

pub use error::{RenderError, RenderResult};
pub use frame_loop::{FrameContext, FrameFlow, FrameLoop, RenderBackend, SLOT_COUNT};
pub use sync::{FenceLedger, FenceTicket, GpuFence};

//! The Direct3D 12 rendition of the frame pipeline's render backend.
//!
//! Creation helpers return `windows::core::Result` and are grouped behind
//! [`bind_to_window::bind_to_window`], which maps driver failures into the
//! core's error taxonomy: resource and heap creation to `Allocation`, shader
//! and pipeline-state builds to `Compilation`. Per-frame failures surface as
//! `Submission` from the backend.

pub mod backend;
pub mod bind_to_window;
pub mod compile_shader;
pub mod create_constant_buffers;
pub mod create_depth_stencil;
pub mod create_device;
pub mod create_geometry_buffers;
pub mod create_pipeline_state;
pub mod create_root_signature;
pub mod create_texture;
pub mod frame_fence;
pub mod populate_command_list;
pub mod resources;

use windows::Win32::Graphics::Dxgi::Common::{
    DXGI_FORMAT, DXGI_FORMAT_D24_UNORM_S8_UINT, DXGI_FORMAT_R8G8B8A8_UNORM,
};

/// Render-target format of the swapchain and pipeline state.
pub const RENDER_TARGET_FORMAT: DXGI_FORMAT = DXGI_FORMAT_R8G8B8A8_UNORM;

/// Format of the shared depth-stencil view.
pub const DEPTH_STENCIL_FORMAT: DXGI_FORMAT = DXGI_FORMAT_D24_UNORM_S8_UINT;

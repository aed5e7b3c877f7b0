use orbit_core::constants::SceneConstants;
use orbit_core::input::InputEvent;
use orbit_core::{
    FenceTicket, FrameContext, GpuFence, RenderBackend, RenderError, RenderResult,
};
use windows::core::Interface;
use windows::Win32::Graphics::Direct3D12::ID3D12CommandList;
use windows::Win32::Graphics::Dxgi::DXGI_PRESENT;

use crate::message_pump::MessagePump;

use super::populate_command_list::populate_command_list;
use super::resources::Resources;

/// The Direct3D 12 render backend: the GPU objects plus the window's message
/// pump, driven by `orbit_core::FrameLoop`.
pub struct D3d12Backend {
    resources: Resources,
    pump: MessagePump,
}

impl D3d12Backend {
    pub fn new(resources: Resources, pump: MessagePump) -> Self {
        Self { resources, pump }
    }
}

impl GpuFence for D3d12Backend {
    fn completed_value(&self) -> u64 {
        self.resources.fence.completed_value()
    }

    fn wait_until(&mut self, ticket: FenceTicket) -> RenderResult<()> {
        self.resources.fence.wait_until(ticket)
    }
}

impl RenderBackend for D3d12Backend {
    fn poll_input(&mut self, events: &mut Vec<InputEvent>) -> RenderResult<()> {
        self.pump.poll(events);
        Ok(())
    }

    fn write_constants(&mut self, slot: usize, constants: &SceneConstants) -> RenderResult<()> {
        let buffer = &self.resources.constant_buffers[slot];
        unsafe {
            let mut data = std::ptr::null_mut();
            buffer
                .Map(0, None, Some(&mut data))
                .map_err(|e| RenderError::Submission(format!("constant slot {slot} map: {e}")))?;
            std::ptr::copy_nonoverlapping(constants, data as *mut SceneConstants, 1);
            buffer.Unmap(0, None);
        }
        Ok(())
    }

    fn submit_frame(&mut self, ctx: &FrameContext, ticket: FenceTicket) -> RenderResult<()> {
        populate_command_list(&self.resources, ctx)
            .map_err(|e| RenderError::Submission(format!("frame {}: {e}", ctx.frame_count)))?;

        let command_lists = [Some(
            self.resources
                .command_list
                .cast::<ID3D12CommandList>()
                .map_err(|e| RenderError::Submission(format!("command list cast: {e}")))?,
        )];
        unsafe { self.resources.command_queue.ExecuteCommandLists(&command_lists) };

        self.resources
            .fence
            .signal_on(&self.resources.command_queue, ticket)
            .map_err(|e| RenderError::Submission(format!("fence signal: {e}")))
    }

    fn present(&mut self) -> RenderResult<()> {
        // Vsync interval 1 locks the loop to the display refresh.
        unsafe { self.resources.swap_chain.Present(1, DXGI_PRESENT(0)) }
            .ok()
            .map_err(|e| RenderError::Submission(format!("present: {e}")))
    }
}

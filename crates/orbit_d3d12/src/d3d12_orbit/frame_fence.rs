use orbit_core::{FenceTicket, GpuFence, RenderError, RenderResult};
use windows::core::Result;
use windows::Win32::Foundation::{CloseHandle, HANDLE};
use windows::Win32::Graphics::Direct3D12::{ID3D12CommandQueue, ID3D12Device, ID3D12Fence, D3D12_FENCE_FLAG_NONE};
use windows::Win32::System::Threading::{CreateEventA, WaitForSingleObjectEx, INFINITE};

/// An `ID3D12Fence` plus the event its completions are waited on.
///
/// The counter starts at 0 and only the GPU advances it; waits arm the event
/// at the requested value and block without a timeout.
pub struct FrameFence {
    fence: ID3D12Fence,
    event: HANDLE,
}

impl FrameFence {
    pub fn new(device: &ID3D12Device) -> Result<Self> {
        let fence = unsafe { device.CreateFence(0, D3D12_FENCE_FLAG_NONE)? };
        let event = unsafe { CreateEventA(None, false, false, None)? };
        if event.is_invalid() {
            return Err(windows::core::Error::from_win32());
        }
        Ok(Self { fence, event })
    }

    /// Ask the queue to set the counter to `ticket` once the work submitted
    /// so far retires.
    pub fn signal_on(&self, queue: &ID3D12CommandQueue, ticket: FenceTicket) -> Result<()> {
        unsafe { queue.Signal(&self.fence, ticket.value()) }
    }
}

impl GpuFence for FrameFence {
    fn completed_value(&self) -> u64 {
        unsafe { self.fence.GetCompletedValue() }
    }

    fn wait_until(&mut self, ticket: FenceTicket) -> RenderResult<()> {
        if self.completed_value() < ticket.value() {
            unsafe {
                self.fence
                    .SetEventOnCompletion(ticket.value(), self.event)
                    .map_err(|e| RenderError::Submission(format!("fence wait arming: {e}")))?;
                WaitForSingleObjectEx(self.event, INFINITE, false);
            }
        }
        Ok(())
    }
}

impl Drop for FrameFence {
    fn drop(&mut self) {
        unsafe {
            if !self.event.is_invalid() {
                CloseHandle(self.event).ok();
            }
        }
    }
}

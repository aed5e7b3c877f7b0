use orbit_core::drawable::DRAW_SLOT_COUNT;
use orbit_core::SLOT_COUNT;
use windows::Win32::Foundation::RECT;
use windows::Win32::Graphics::Direct3D12::*;
use windows::Win32::Graphics::Dxgi::IDXGISwapChain3;

use super::frame_fence::FrameFence;

/// Every GPU object the backend owns.
///
/// Singletons are created once at startup and released deterministically in
/// drop order; the per-slot arrays (render targets, command allocators) are
/// owned by whichever frame currently occupies that slot, and the frame loop
/// only reuses them after the slot's fence ticket retires.
pub struct Resources {
    pub command_queue: ID3D12CommandQueue,
    pub swap_chain: IDXGISwapChain3,
    pub render_targets: [ID3D12Resource; SLOT_COUNT],
    pub rtv_heap: ID3D12DescriptorHeap,
    pub rtv_descriptor_size: u32,
    pub dsv_heap: ID3D12DescriptorHeap,
    pub depth_stencil: ID3D12Resource,
    pub srv_heap: ID3D12DescriptorHeap,
    pub texture: ID3D12Resource,
    pub viewport: D3D12_VIEWPORT,
    pub scissor_rect: RECT,
    pub command_allocators: [ID3D12CommandAllocator; SLOT_COUNT],
    pub command_list: ID3D12GraphicsCommandList,
    pub root_signature: ID3D12RootSignature,
    pub pso: ID3D12PipelineState,
    pub vertex_buffer: ID3D12Resource,
    pub vbv: D3D12_VERTEX_BUFFER_VIEW,
    pub index_buffer: ID3D12Resource,
    pub ibv: D3D12_INDEX_BUFFER_VIEW,
    pub index_count: u32,
    pub constant_buffers: [ID3D12Resource; DRAW_SLOT_COUNT],
    pub fence: FrameFence,
}

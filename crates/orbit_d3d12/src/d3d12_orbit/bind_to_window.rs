use orbit_core::{FenceTicket, GpuFence, RenderError, RenderResult, SLOT_COUNT};
use tracing::info;
use windows::core::Interface;
use windows::Win32::Foundation::{HWND, RECT};
use windows::Win32::Graphics::Direct3D12::*;
use windows::Win32::Graphics::Dxgi::Common::*;
use windows::Win32::Graphics::Dxgi::*;

use crate::checker_image::DecodedImage;

use super::create_constant_buffers::create_constant_buffers;
use super::create_depth_stencil::create_depth_stencil;
use super::create_geometry_buffers::{create_index_buffer, create_vertex_buffer};
use super::create_pipeline_state::create_pipeline_state;
use super::create_root_signature::create_root_signature;
use super::create_texture::create_texture;
use super::frame_fence::FrameFence;
use super::resources::Resources;
use super::RENDER_TARGET_FORMAT;

fn alloc_err(what: &str) -> impl Fn(windows::core::Error) -> RenderError + '_ {
    move |e| RenderError::Allocation(format!("{what}: {e}"))
}

// Build every GPU object the frame loop needs against the presentation
// surface, and run the one-off texture upload to completion before the first
// frame. All startup resources are mandatory; any failure here is fatal.
pub fn bind_to_window(
    device: &ID3D12Device,
    dxgi_factory: &IDXGIFactory4,
    hwnd: HWND,
    window_size: (u32, u32),
    image: &DecodedImage,
) -> RenderResult<Resources> {
    let (width, height) = window_size;

    let command_queue: ID3D12CommandQueue = unsafe {
        device.CreateCommandQueue(&D3D12_COMMAND_QUEUE_DESC {
            Type: D3D12_COMMAND_LIST_TYPE_DIRECT,
            ..Default::default()
        })
    }
    .map_err(alloc_err("command queue"))?;

    let swap_chain_desc = DXGI_SWAP_CHAIN_DESC1 {
        BufferCount: SLOT_COUNT as u32,
        Width: width,
        Height: height,
        Format: RENDER_TARGET_FORMAT,
        BufferUsage: DXGI_USAGE_RENDER_TARGET_OUTPUT,
        SwapEffect: DXGI_SWAP_EFFECT_FLIP_DISCARD,
        SampleDesc: DXGI_SAMPLE_DESC {
            Count: 1,
            Quality: 0,
        },
        ..Default::default()
    };
    let swap_chain: IDXGISwapChain3 = unsafe {
        dxgi_factory.CreateSwapChainForHwnd(&command_queue, hwnd, &swap_chain_desc, None, None)
    }
    .and_then(|sc| sc.cast())
    .map_err(alloc_err("swap chain"))?;

    // Alt+Enter fullscreen transitions would invalidate the fixed-size slot
    // ring; keep them off.
    unsafe { dxgi_factory.MakeWindowAssociation(hwnd, DXGI_MWA_NO_ALT_ENTER) }
        .map_err(alloc_err("window association"))?;

    let rtv_heap: ID3D12DescriptorHeap = unsafe {
        device.CreateDescriptorHeap(&D3D12_DESCRIPTOR_HEAP_DESC {
            NumDescriptors: SLOT_COUNT as u32,
            Type: D3D12_DESCRIPTOR_HEAP_TYPE_RTV,
            Flags: D3D12_DESCRIPTOR_HEAP_FLAG_NONE,
            ..Default::default()
        })
    }
    .map_err(alloc_err("render target view heap"))?;

    let rtv_descriptor_size =
        unsafe { device.GetDescriptorHandleIncrementSize(D3D12_DESCRIPTOR_HEAP_TYPE_RTV) };
    let rtv_handle = unsafe { rtv_heap.GetCPUDescriptorHandleForHeapStart() };

    let render_targets: [ID3D12Resource; SLOT_COUNT] = array_init::try_array_init(|i| {
        let resource: ID3D12Resource = unsafe { swap_chain.GetBuffer(i as u32)? };
        let slot_rtv_handle = D3D12_CPU_DESCRIPTOR_HANDLE {
            ptr: rtv_handle.ptr + i * rtv_descriptor_size as usize,
        };
        unsafe { device.CreateRenderTargetView(&resource, None, slot_rtv_handle) };
        Ok::<_, windows::core::Error>(resource)
    })
    .map_err(alloc_err("render target views"))?;

    let (dsv_heap, depth_stencil) =
        create_depth_stencil(device, width, height).map_err(alloc_err("depth stencil"))?;

    let command_allocators: [ID3D12CommandAllocator; SLOT_COUNT] =
        array_init::try_array_init(|_| unsafe {
            device.CreateCommandAllocator(D3D12_COMMAND_LIST_TYPE_DIRECT)
        })
        .map_err(alloc_err("command allocators"))?;

    let root_signature = create_root_signature(device)
        .map_err(|e| RenderError::Compilation(format!("root signature: {e}")))?;
    let pso = create_pipeline_state(device, &root_signature)
        .map_err(|e| RenderError::Compilation(format!("pipeline state: {e}")))?;

    // The list opens against slot 0's allocator so the startup texture
    // upload can be recorded before the first frame resets it.
    let command_list: ID3D12GraphicsCommandList = unsafe {
        device.CreateCommandList(0, D3D12_COMMAND_LIST_TYPE_DIRECT, &command_allocators[0], &pso)
    }
    .map_err(alloc_err("command list"))?;

    let (vertex_buffer, vbv) =
        create_vertex_buffer(device).map_err(alloc_err("vertex buffer"))?;
    let (index_buffer, ibv) = create_index_buffer(device).map_err(alloc_err("index buffer"))?;
    let constant_buffers = create_constant_buffers(device).map_err(alloc_err("constant buffers"))?;

    let (texture, srv_heap, texture_upload) =
        create_texture(device, &command_list, image).map_err(alloc_err("texture"))?;

    // Flush the recorded upload and wait it out on a throwaway ticket so the
    // upload buffer can drop here. The frame fence proper starts afterwards,
    // still at zero.
    {
        let upload_ticket = FenceTicket::new(1);
        let mut upload_fence = FrameFence::new(device).map_err(alloc_err("upload fence"))?;
        unsafe {
            command_list
                .Close()
                .map_err(|e| RenderError::Submission(format!("texture upload close: {e}")))?;
            let lists = [Some(command_list.cast::<ID3D12CommandList>().map_err(
                |e| RenderError::Submission(format!("texture upload cast: {e}")),
            )?)];
            command_queue.ExecuteCommandLists(&lists);
        }
        upload_fence
            .signal_on(&command_queue, upload_ticket)
            .map_err(|e| RenderError::Submission(format!("texture upload signal: {e}")))?;
        upload_fence.wait_until(upload_ticket)?;
        drop(texture_upload);
        info!(width = image.width, height = image.height, "texture upload complete");
    }

    let viewport = D3D12_VIEWPORT {
        TopLeftX: 0.0,
        TopLeftY: 0.0,
        Width: width as f32,
        Height: height as f32,
        MinDepth: D3D12_MIN_DEPTH,
        MaxDepth: D3D12_MAX_DEPTH,
    };
    let scissor_rect = RECT {
        left: 0,
        top: 0,
        right: width as i32,
        bottom: height as i32,
    };

    let fence = FrameFence::new(device).map_err(alloc_err("frame fence"))?;

    Ok(Resources {
        command_queue,
        swap_chain,
        render_targets,
        rtv_heap,
        rtv_descriptor_size,
        dsv_heap,
        depth_stencil,
        srv_heap,
        texture,
        viewport,
        scissor_rect,
        command_allocators,
        command_list,
        root_signature,
        pso,
        vertex_buffer,
        vbv,
        index_buffer,
        ibv,
        index_count: orbit_core::geometry::CUBE_INDICES.len() as u32,
        constant_buffers,
        fence,
    })
}

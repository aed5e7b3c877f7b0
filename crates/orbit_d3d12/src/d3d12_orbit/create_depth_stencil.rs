use windows::core::*;
use windows::Win32::Graphics::Direct3D12::*;
use windows::Win32::Graphics::Dxgi::Common::*;

use super::DEPTH_STENCIL_FORMAT;

// Create the single shared depth-stencil buffer and its descriptor heap.
// The resource starts (and stays) in the depth-write state; all three
// swapchain slots clear and test against the same buffer because only one
// frame is ever being recorded at a time.
pub fn create_depth_stencil(
    device: &ID3D12Device,
    width: u32,
    height: u32,
) -> Result<(ID3D12DescriptorHeap, ID3D12Resource)> {
    let dsv_heap: ID3D12DescriptorHeap = unsafe {
        device.CreateDescriptorHeap(&D3D12_DESCRIPTOR_HEAP_DESC {
            NumDescriptors: 1,
            Type: D3D12_DESCRIPTOR_HEAP_TYPE_DSV,
            ..Default::default()
        })?
    };

    let heap_props = D3D12_HEAP_PROPERTIES {
        Type: D3D12_HEAP_TYPE_DEFAULT,
        ..Default::default()
    };
    let resource_desc = D3D12_RESOURCE_DESC {
        Dimension: D3D12_RESOURCE_DIMENSION_TEXTURE2D,
        Width: width as u64,
        Height: height,
        DepthOrArraySize: 1,
        MipLevels: 1,
        // Typeless storage; the view narrows it to the depth format.
        Format: DXGI_FORMAT_R24G8_TYPELESS,
        SampleDesc: DXGI_SAMPLE_DESC {
            Count: 1,
            Quality: 0,
        },
        Layout: D3D12_TEXTURE_LAYOUT_UNKNOWN,
        Flags: D3D12_RESOURCE_FLAG_ALLOW_DEPTH_STENCIL,
        ..Default::default()
    };
    let clear_value = D3D12_CLEAR_VALUE {
        Format: DEPTH_STENCIL_FORMAT,
        Anonymous: D3D12_CLEAR_VALUE_0 {
            DepthStencil: D3D12_DEPTH_STENCIL_VALUE {
                Depth: 1.0,
                Stencil: 0,
            },
        },
    };

    let mut depth_stencil: Option<ID3D12Resource> = None;
    unsafe {
        device.CreateCommittedResource(
            &heap_props,
            D3D12_HEAP_FLAG_NONE,
            &resource_desc,
            D3D12_RESOURCE_STATE_DEPTH_WRITE,
            Some(&clear_value),
            &mut depth_stencil,
        )?
    };
    let depth_stencil = depth_stencil.unwrap();
    unsafe { depth_stencil.SetName(w!("DepthStencil")) }.ok();

    let dsv_desc = D3D12_DEPTH_STENCIL_VIEW_DESC {
        Format: DEPTH_STENCIL_FORMAT,
        ViewDimension: D3D12_DSV_DIMENSION_TEXTURE2D,
        Flags: D3D12_DSV_FLAG_NONE,
        ..Default::default()
    };
    unsafe {
        device.CreateDepthStencilView(
            &depth_stencil,
            Some(&dsv_desc),
            dsv_heap.GetCPUDescriptorHandleForHeapStart(),
        );
    }

    Ok((dsv_heap, depth_stencil))
}

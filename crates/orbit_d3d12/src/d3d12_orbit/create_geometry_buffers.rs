use orbit_core::geometry::{Vertex, CUBE_INDICES, CUBE_VERTICES};
use windows::core::*;
use windows::Win32::Graphics::Direct3D12::*;
use windows::Win32::Graphics::Dxgi::Common::*;

// Upload-heap buffer sized for `size` bytes, in the generic-read state.
fn create_upload_buffer(device: &ID3D12Device, size: u64, name: PCWSTR) -> Result<ID3D12Resource> {
    let heap_props = D3D12_HEAP_PROPERTIES {
        Type: D3D12_HEAP_TYPE_UPLOAD,
        ..Default::default()
    };
    let resource_desc = D3D12_RESOURCE_DESC {
        Dimension: D3D12_RESOURCE_DIMENSION_BUFFER,
        Alignment: 0,
        Width: size,
        Height: 1,
        DepthOrArraySize: 1,
        MipLevels: 1,
        Format: DXGI_FORMAT_UNKNOWN,
        SampleDesc: DXGI_SAMPLE_DESC {
            Count: 1,
            Quality: 0,
        },
        Layout: D3D12_TEXTURE_LAYOUT_ROW_MAJOR,
        Flags: D3D12_RESOURCE_FLAG_NONE,
    };

    let mut buffer: Option<ID3D12Resource> = None;
    unsafe {
        device.CreateCommittedResource(
            &heap_props,
            D3D12_HEAP_FLAG_NONE,
            &resource_desc,
            D3D12_RESOURCE_STATE_GENERIC_READ,
            None,
            &mut buffer,
        )?
    };
    let buffer = buffer.unwrap();
    unsafe { buffer.SetName(name) }.ok();
    Ok(buffer)
}

pub(super) fn create_slot_buffer(device: &ID3D12Device, size: u64, name: PCWSTR) -> Result<ID3D12Resource> {
    create_upload_buffer(device, size, name)
}

// Create the shared cube vertex buffer and its view.
pub fn create_vertex_buffer(device: &ID3D12Device) -> Result<(ID3D12Resource, D3D12_VERTEX_BUFFER_VIEW)> {
    let vertex_buffer_size = std::mem::size_of_val(&CUBE_VERTICES) as u64;
    let vertex_buffer = create_upload_buffer(device, vertex_buffer_size, w!("VertexBuffer"))?;

    // Map, copy data, unmap
    unsafe {
        let mut data_ptr = std::ptr::null_mut();
        let read_range = D3D12_RANGE { Begin: 0, End: 0 }; // We do not intend to read
        vertex_buffer.Map(0, Some(&read_range), Some(&mut data_ptr))?;
        std::ptr::copy_nonoverlapping(
            CUBE_VERTICES.as_ptr(),
            data_ptr as *mut Vertex,
            CUBE_VERTICES.len(),
        );
        vertex_buffer.Unmap(0, None);
    }

    let vbv = D3D12_VERTEX_BUFFER_VIEW {
        BufferLocation: unsafe { vertex_buffer.GetGPUVirtualAddress() },
        StrideInBytes: std::mem::size_of::<Vertex>() as u32,
        SizeInBytes: vertex_buffer_size as u32,
    };

    Ok((vertex_buffer, vbv))
}

// Create the shared cube index buffer and its view.
pub fn create_index_buffer(device: &ID3D12Device) -> Result<(ID3D12Resource, D3D12_INDEX_BUFFER_VIEW)> {
    let index_buffer_size = std::mem::size_of_val(&CUBE_INDICES) as u64;
    let index_buffer = create_upload_buffer(device, index_buffer_size, w!("IndexBuffer"))?;

    unsafe {
        let mut data_ptr = std::ptr::null_mut();
        let read_range = D3D12_RANGE { Begin: 0, End: 0 };
        index_buffer.Map(0, Some(&read_range), Some(&mut data_ptr))?;
        std::ptr::copy_nonoverlapping(
            CUBE_INDICES.as_ptr(),
            data_ptr as *mut u16,
            CUBE_INDICES.len(),
        );
        index_buffer.Unmap(0, None);
    }

    let ibv = D3D12_INDEX_BUFFER_VIEW {
        BufferLocation: unsafe { index_buffer.GetGPUVirtualAddress() },
        SizeInBytes: index_buffer_size as u32,
        Format: DXGI_FORMAT_R16_UINT,
    };

    Ok((index_buffer, ibv))
}

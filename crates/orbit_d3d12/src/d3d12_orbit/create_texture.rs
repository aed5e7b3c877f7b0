use std::mem::ManuallyDrop;

use windows::core::*;
use windows::Win32::Graphics::Direct3D12::*;
use windows::Win32::Graphics::Dxgi::Common::*;

use crate::checker_image::DecodedImage;

use super::create_geometry_buffers::create_slot_buffer;
use super::populate_command_list::transition_barrier;
use super::RENDER_TARGET_FORMAT;

// Create the sampled texture from the decoded image and record its upload
// onto `command_list`. The texture is created in the copy-dest state and
// transitioned to pixel-shader-resource at the end of the recorded copy; the
// returned upload buffer must stay alive until that submission retires.
pub fn create_texture(
    device: &ID3D12Device,
    command_list: &ID3D12GraphicsCommandList,
    image: &DecodedImage,
) -> Result<(ID3D12Resource, ID3D12DescriptorHeap, ID3D12Resource)> {
    let heap_props = D3D12_HEAP_PROPERTIES {
        Type: D3D12_HEAP_TYPE_DEFAULT,
        ..Default::default()
    };
    let texture_desc = D3D12_RESOURCE_DESC {
        Dimension: D3D12_RESOURCE_DIMENSION_TEXTURE2D,
        Width: image.width as u64,
        Height: image.height,
        DepthOrArraySize: 1,
        MipLevels: 1,
        Format: RENDER_TARGET_FORMAT,
        SampleDesc: DXGI_SAMPLE_DESC {
            Count: 1,
            Quality: 0,
        },
        Layout: D3D12_TEXTURE_LAYOUT_UNKNOWN,
        ..Default::default()
    };

    let mut texture: Option<ID3D12Resource> = None;
    unsafe {
        device.CreateCommittedResource(
            &heap_props,
            D3D12_HEAP_FLAG_NONE,
            &texture_desc,
            D3D12_RESOURCE_STATE_COPY_DEST,
            None,
            &mut texture,
        )?
    };
    let texture = texture.unwrap();
    unsafe { texture.SetName(w!("CheckerTexture")) }.ok();

    // Stage the pixels with rows placed on the copy alignment the footprint
    // demands.
    let row_pitch = image.aligned_row_pitch();
    let upload_size = (row_pitch * image.height) as u64;
    let upload_buffer = create_slot_buffer(device, upload_size, w!("CheckerTextureUpload"))?;

    unsafe {
        let mut mapped = std::ptr::null_mut();
        upload_buffer.Map(0, None, Some(&mut mapped))?;
        let mapped = mapped as *mut u8;
        let tight_pitch = (image.width * 4) as usize;
        for y in 0..image.height as usize {
            std::ptr::copy_nonoverlapping(
                image.pixels.as_ptr().add(y * tight_pitch),
                mapped.add(y * row_pitch as usize),
                tight_pitch,
            );
        }
        upload_buffer.Unmap(0, None);
    }

    let dst = D3D12_TEXTURE_COPY_LOCATION {
        pResource: ManuallyDrop::new(Some(texture.clone())),
        Type: D3D12_TEXTURE_COPY_TYPE_SUBRESOURCE_INDEX,
        Anonymous: D3D12_TEXTURE_COPY_LOCATION_0 {
            SubresourceIndex: 0,
        },
    };
    let src = D3D12_TEXTURE_COPY_LOCATION {
        pResource: ManuallyDrop::new(Some(upload_buffer.clone())),
        Type: D3D12_TEXTURE_COPY_TYPE_PLACED_FOOTPRINT,
        Anonymous: D3D12_TEXTURE_COPY_LOCATION_0 {
            PlacedFootprint: D3D12_PLACED_SUBRESOURCE_FOOTPRINT {
                Offset: 0,
                Footprint: D3D12_SUBRESOURCE_FOOTPRINT {
                    Format: RENDER_TARGET_FORMAT,
                    Width: image.width,
                    Height: image.height,
                    Depth: 1,
                    RowPitch: row_pitch,
                },
            },
        },
    };
    unsafe {
        command_list.CopyTextureRegion(&dst, 0, 0, 0, &src, None);
        command_list.ResourceBarrier(&[transition_barrier(
            &texture,
            D3D12_RESOURCE_STATE_COPY_DEST,
            D3D12_RESOURCE_STATE_PIXEL_SHADER_RESOURCE,
        )]);
    }

    // Shader-visible heap holding the one SRV the root table points at.
    let srv_heap: ID3D12DescriptorHeap = unsafe {
        device.CreateDescriptorHeap(&D3D12_DESCRIPTOR_HEAP_DESC {
            NumDescriptors: 1,
            Type: D3D12_DESCRIPTOR_HEAP_TYPE_CBV_SRV_UAV,
            Flags: D3D12_DESCRIPTOR_HEAP_FLAG_SHADER_VISIBLE,
            ..Default::default()
        })?
    };
    unsafe {
        device.CreateShaderResourceView(
            &texture,
            Some(&D3D12_SHADER_RESOURCE_VIEW_DESC {
                Format: RENDER_TARGET_FORMAT,
                ViewDimension: D3D12_SRV_DIMENSION_TEXTURE2D,
                Shader4ComponentMapping: D3D12_DEFAULT_SHADER_4_COMPONENT_MAPPING,
                Anonymous: D3D12_SHADER_RESOURCE_VIEW_DESC_0 {
                    Texture2D: D3D12_TEX2D_SRV {
                        MipLevels: 1,
                        ..Default::default()
                    },
                },
            }),
            srv_heap.GetCPUDescriptorHandleForHeapStart(),
        );
    }

    Ok((texture, srv_heap, upload_buffer))
}

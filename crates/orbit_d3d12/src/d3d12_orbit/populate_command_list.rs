use std::mem::ManuallyDrop;

use orbit_core::FrameContext;
use windows::core::*;
use windows::Win32::Graphics::Direct3D::*;
use windows::Win32::Graphics::Direct3D12::*;

use super::resources::Resources;

// Record one frame against the slot in `ctx`, in the fixed order the
// pipeline requires.
//
// Command list allocators can only be reset when the associated command
// lists have finished execution on the GPU; the frame loop's ACQUIRE_SLOT
// phase guarantees that for `ctx.slot` before this runs.
pub fn populate_command_list(resources: &Resources, ctx: &FrameContext) -> Result<()> {
    let command_allocator = &resources.command_allocators[ctx.slot];
    unsafe { command_allocator.Reset()? };

    let command_list = &resources.command_list;
    unsafe { command_list.Reset(command_allocator, &resources.pso)? };

    // Fixed state: root layout, output rectangle, and the slot's image as
    // the render target.
    unsafe {
        command_list.SetGraphicsRootSignature(&resources.root_signature);
        command_list.RSSetViewports(&[resources.viewport]);
        command_list.RSSetScissorRects(&[resources.scissor_rect]);
    }

    let barrier = transition_barrier(
        &resources.render_targets[ctx.slot],
        D3D12_RESOURCE_STATE_PRESENT,
        D3D12_RESOURCE_STATE_RENDER_TARGET,
    );
    unsafe { command_list.ResourceBarrier(&[barrier]) };

    let rtv_handle = D3D12_CPU_DESCRIPTOR_HANDLE {
        ptr: unsafe { resources.rtv_heap.GetCPUDescriptorHandleForHeapStart() }.ptr
            + ctx.slot * resources.rtv_descriptor_size as usize,
    };
    let dsv_handle = unsafe { resources.dsv_heap.GetCPUDescriptorHandleForHeapStart() };

    let clear_color = [0.0_f32, 0.0_f32, 0.2_f32, 1.0_f32];
    unsafe {
        command_list.OMSetRenderTargets(1, Some(&rtv_handle), false, Some(&dsv_handle));
        command_list.ClearRenderTargetView(rtv_handle, &clear_color, None);
        command_list.ClearDepthStencilView(
            dsv_handle,
            D3D12_CLEAR_FLAG_DEPTH | D3D12_CLEAR_FLAG_STENCIL,
            1.0,
            0,
            None,
        );
    }

    // Shared bindings: texture table, geometry, topology. Bound once; only
    // the constant-buffer view changes between draws.
    unsafe {
        command_list.SetDescriptorHeaps(&[Some(resources.srv_heap.clone())]);
        command_list
            .SetGraphicsRootDescriptorTable(1, resources.srv_heap.GetGPUDescriptorHandleForHeapStart());
        command_list.IASetVertexBuffers(0, Some(&[resources.vbv]));
        command_list.IASetIndexBuffer(Some(&resources.ibv));
        command_list.IASetPrimitiveTopology(D3D_PRIMITIVE_TOPOLOGY_TRIANGLELIST);
    }

    // One draw per constant slot; the records were written during this
    // frame's RECORD_AND_SUBMIT before recording started.
    for constant_buffer in &resources.constant_buffers {
        unsafe {
            command_list.SetGraphicsRootConstantBufferView(0, constant_buffer.GetGPUVirtualAddress());
            command_list.DrawIndexedInstanced(resources.index_count, 1, 0, 0, 0);
        }
    }

    unsafe {
        command_list.ResourceBarrier(&[transition_barrier(
            &resources.render_targets[ctx.slot],
            D3D12_RESOURCE_STATE_RENDER_TARGET,
            D3D12_RESOURCE_STATE_PRESENT,
        )]);
        command_list.Close()?;
    }
    Ok(())
}

pub fn transition_barrier(
    resource: &ID3D12Resource,
    state_before: D3D12_RESOURCE_STATES,
    state_after: D3D12_RESOURCE_STATES,
) -> D3D12_RESOURCE_BARRIER {
    D3D12_RESOURCE_BARRIER {
        Type: D3D12_RESOURCE_BARRIER_TYPE_TRANSITION,
        Flags: D3D12_RESOURCE_BARRIER_FLAG_NONE,
        Anonymous: D3D12_RESOURCE_BARRIER_0 {
            // Use ManuallyDrop to prevent premature Drop of the inner union field
            Transition: ManuallyDrop::new(D3D12_RESOURCE_TRANSITION_BARRIER {
                pResource: unsafe { std::mem::transmute_copy(resource) }, // Clone resource pointer
                StateBefore: state_before,
                StateAfter: state_after,
                Subresource: D3D12_RESOURCE_BARRIER_ALL_SUBRESOURCES,
            }),
        },
    }
}

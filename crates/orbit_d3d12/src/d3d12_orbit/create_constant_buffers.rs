use orbit_core::constants::CONSTANT_SLOT_BYTES;
use orbit_core::drawable::DRAW_SLOT_COUNT;
use windows::core::*;
use windows::Win32::Graphics::Direct3D12::*;

use super::create_geometry_buffers::create_slot_buffer;

// One persistent 256-byte upload buffer per drawable. Each slot is owned by
// exactly one object; the CPU rewrites it every frame and the GPU reads it
// through the root CBV, so the slots never need cross-object synchronization.
pub fn create_constant_buffers(
    device: &ID3D12Device,
) -> Result<[ID3D12Resource; DRAW_SLOT_COUNT]> {
    array_init::try_array_init(|i| {
        let name: HSTRING = format!("ConstantBuffer{i}").into();
        create_slot_buffer(device, CONSTANT_SLOT_BYTES, PCWSTR(name.as_ptr()))
    })
}

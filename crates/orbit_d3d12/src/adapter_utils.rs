use tracing::info;
use windows::core::*;
use windows::Win32::Graphics::Direct3D::*;
use windows::Win32::Graphics::Direct3D12::*;
use windows::Win32::Graphics::Dxgi::*;

/// Find the first hardware adapter that can create a feature-level 11.0
/// device. Software adapters are skipped; WARP is selected explicitly through
/// the command line instead.
pub fn get_hardware_adapter(factory: &IDXGIFactory4) -> Result<IDXGIAdapter1> {
    for i in 0.. {
        let adapter = unsafe { factory.EnumAdapters1(i)? };
        let desc = unsafe { adapter.GetDesc1()? };

        if (DXGI_ADAPTER_FLAG(desc.Flags as i32) & DXGI_ADAPTER_FLAG_SOFTWARE)
            != DXGI_ADAPTER_FLAG_NONE
        {
            continue;
        }

        if unsafe {
            D3D12CreateDevice(
                &adapter,
                D3D_FEATURE_LEVEL_11_0,
                std::ptr::null_mut::<Option<ID3D12Device>>(),
            )
        }
        .is_ok()
        {
            info!(
                "Using hardware adapter: {}",
                String::from_utf16_lossy(&desc.Description)
            );
            return Ok(adapter);
        }
    }
    // Only reachable if EnumAdapters1 ran out without erroring.
    Err(Error::new(E_FAIL, "No suitable hardware adapter found."))
}

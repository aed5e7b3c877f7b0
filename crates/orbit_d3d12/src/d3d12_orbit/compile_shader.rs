use tracing::error;
use windows::core::*;
use windows::Win32::Graphics::Direct3D::Fxc::*;
use windows::Win32::Graphics::Direct3D::*;

// Helper to compile shaders
pub fn compile_shader(
    hlsl_path: &HSTRING,
    entry_point: PCSTR,
    target: PCSTR,
    flags: u32,
) -> Result<ID3DBlob> {
    let mut shader_blob = None;
    let mut error_blob = None;
    let result = unsafe {
        D3DCompileFromFile(
            hlsl_path,
            None, // Defines
            None, // Include handler
            entry_point,
            target,
            flags,
            0, // Effect flags
            &mut shader_blob,
            Some(&mut error_blob),
        )
    };

    if let Err(e) = result {
        if let Some(error) = error_blob {
            let error_msg = unsafe {
                String::from_utf8_lossy(std::slice::from_raw_parts(
                    error.GetBufferPointer() as *const u8,
                    error.GetBufferSize(),
                ))
            };
            let entry_point_str = unsafe { String::from_utf8_lossy(entry_point.as_bytes()) };
            let target_str = unsafe { String::from_utf8_lossy(target.as_bytes()) };
            error!(
                "Shader Compile Error ({} {}): {}",
                entry_point_str, target_str, error_msg
            );
        }
        Err(e)
    } else {
        Ok(shader_blob.unwrap()) // Safe on success
    }
}

/// Locate `shaders.hlsl` next to the executable, with a fallback into the
/// crate's `src/` during development.
pub fn find_shader_source() -> Result<HSTRING> {
    let exe_path = std::env::current_exe()
        .map_err(|e| Error::new(E_FAIL, format!("Failed to get executable path: {e}")))?;
    let asset_dir = exe_path
        .parent()
        .ok_or_else(|| Error::new(E_FAIL, "Failed to get executable directory"))?;
    let mut shaders_hlsl_path = asset_dir.join("shaders.hlsl");

    if !shaders_hlsl_path.exists() {
        let fallback_path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("src")
            .join("shaders.hlsl");
        if !fallback_path.exists() {
            return Err(Error::new(
                E_FAIL,
                format!(
                    "shaders.hlsl not found next to executable ({:?}) or in src/",
                    asset_dir.join("shaders.hlsl")
                ),
            ));
        }
        shaders_hlsl_path = fallback_path;
    }

    Ok(shaders_hlsl_path.to_string_lossy().as_ref().into())
}

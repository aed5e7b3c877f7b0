//! Two textured cubes orbiting a point light, rendered through Direct3D 12
//! with triple buffering. The platform-neutral frame pipeline lives in
//! `orbit_core`; this binary supplies the Win32 window, the message pump, and
//! the D3D12 rendition of the render backend.

mod checker_image;
mod command_line;

#[cfg(windows)]
mod adapter_utils;
#[cfg(windows)]
mod d3d12_orbit;
#[cfg(windows)]
mod message_pump;
#[cfg(windows)]
mod window;

#[cfg(windows)]
fn main() -> eyre::Result<()> {
    use orbit_core::scene::SceneState;
    use orbit_core::FrameLoop;
    use tracing::info;
    use windows::Win32::UI::WindowsAndMessaging::{ShowWindow, SW_SHOW};

    use crate::command_line::build_command_line;
    use crate::d3d12_orbit::backend::D3d12Backend;
    use crate::d3d12_orbit::bind_to_window::bind_to_window;
    use crate::d3d12_orbit::create_device::create_device;
    use crate::message_pump::MessagePump;
    use crate::window::{create_app_window, register_window_class, EventQueue};

    color_eyre::install()?;
    tracing_subscriber::fmt::SubscriberBuilder::default()
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .with_target(false)
        .init();

    let command_line = build_command_line();
    let window_size = (800u32, 600u32);

    let instance = register_window_class()?;
    let mut event_queue = Box::new(EventQueue::default());
    let hwnd = create_app_window(instance, window_size, &mut event_queue)?;

    let (dxgi_factory, device) = create_device(&command_line)?;
    let image = checker_image::checkerboard(256, 256, 32);
    let resources = bind_to_window(&device, &dxgi_factory, hwnd, window_size, &image)?;

    unsafe { _ = ShowWindow(hwnd, SW_SHOW) };
    info!("startup complete, entering frame loop");

    let backend = D3d12Backend::new(resources, MessagePump::new(event_queue));
    let scene = SceneState::new(window_size.0, window_size.1);
    let mut frame_loop = FrameLoop::new(backend, scene);
    frame_loop.run()?;

    info!(frames = frame_loop.context().frame_count, "frame loop ended");
    Ok(())
}

#[cfg(not(windows))]
fn main() {
    eprintln!("orbit_d3d12 renders through Direct3D 12 and only runs on Windows.");
    std::process::exit(1);
}

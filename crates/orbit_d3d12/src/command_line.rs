/// Command line arguments for renderer initialization.
#[derive(Clone)]
pub struct CommandLine {
    pub use_warp_device: bool,
}

/// Builds a CommandLine from the process arguments.
pub fn build_command_line() -> CommandLine {
    let mut use_warp_device = false;

    for arg in std::env::args() {
        if arg.eq_ignore_ascii_case("-warp") || arg.eq_ignore_ascii_case("/warp") {
            use_warp_device = true;
        }
    }

    CommandLine { use_warp_device }
}

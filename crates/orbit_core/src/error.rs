//! Error types for the frame pipeline.

use thiserror::Error;

/// Failures the frame pipeline can report.
///
/// All of these are unrecoverable: the pipeline never retries, and the only
/// recovery boundary is process exit. The first two can only occur during
/// startup; `Submission` can also occur mid-loop, at which point the frame's
/// resource state is unknown and the loop must stop.
#[derive(Error, Debug)]
pub enum RenderError {
    /// GPU object or buffer creation failed.
    #[error("GPU allocation failed: {0}")]
    Allocation(String),

    /// Shader compilation or pipeline-state build failed.
    #[error("shader or pipeline compilation failed: {0}")]
    Compilation(String),

    /// Command-list close, queue execution, or fence signaling failed.
    #[error("command submission failed: {0}")]
    Submission(String),
}

pub type RenderResult<T> = std::result::Result<T, RenderError>;

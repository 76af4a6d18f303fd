use std::fmt;

use crate::shader::ShaderError;

/// Start-up failure that ends the harness.
#[derive(Debug, Clone, PartialEq)]
pub enum HarnessError {
    /// The windowing event loop could not be created.
    EventLoop(String),
    /// The window or its surface could not be created.
    WindowCreation(String),
    /// No adapter/device could be loaded for the surface.
    Loader(String),
    /// Shader build failed under `ShaderPolicy::Fatal`.
    Shader(ShaderError),
}

impl fmt::Display for HarnessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HarnessError::EventLoop(msg) => write!(f, "failed to initialize windowing: {msg}"),
            HarnessError::WindowCreation(msg) => write!(f, "failed to create window: {msg}"),
            HarnessError::Loader(msg) => write!(f, "failed to load graphics device: {msg}"),
            HarnessError::Shader(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for HarnessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HarnessError::Shader(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ShaderError> for HarnessError {
    fn from(e: ShaderError) -> Self {
        HarnessError::Shader(e)
    }
}

/// How a harness run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum HarnessExit {
    /// The window was closed normally.
    Closed,
    /// Start-up failed; nothing was rendered.
    Failed(HarnessError),
}

impl HarnessExit {
    /// Process exit status: `0` on a normal close, `-1` on failure.
    pub fn code(&self) -> i32 {
        match self {
            HarnessExit::Closed => 0,
            HarnessExit::Failed(_) => -1,
        }
    }
}

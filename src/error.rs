use std::path::PathBuf;

/// Failures the render and export pipeline can report.
#[derive(Debug, thiserror::Error)]
pub enum IconError {
    /// The preferred font could not be used. The renderer recovers from this
    /// by switching to the built-in font, so export callers never see it.
    #[error("font '{}' unavailable: {reason}", .path.display())]
    ResourceUnavailable { path: PathBuf, reason: String },

    #[error("failed to create directory '{}'", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{}'", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("canvas error: {0}")]
    Canvas(String),
}

impl IconError {
    pub fn resource_unavailable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ResourceUnavailable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn canvas(msg: impl Into<String>) -> Self {
        Self::Canvas(msg.into())
    }
}

//! Errors raised while writing tree exports.

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

/// Errors raised by the dot and SVG exporters.
///
/// Export failures never invalidate the sampled tree; callers are expected
/// to log them and carry on.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    /// Creating or writing the output file failed.
    #[error("failed to write `{path}`: {source}")]
    Io {
        /// Destination that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The drawing backend rejected the picture.
    #[error("failed to render `{path}`: {message}")]
    Render {
        /// Destination of the picture.
        path: PathBuf,
        /// Backend error description.
        message: String,
    },
}

/// Stable machine-readable codes for [`ExportError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum ExportErrorCode {
    /// File creation or writing failed.
    Io,
    /// The drawing backend failed.
    Render,
}

impl ExportErrorCode {
    /// Return the stable machine-readable representation of this error code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Io => "EXPORT_IO_FAILURE",
            Self::Render => "EXPORT_RENDER_FAILURE",
        }
    }
}

impl fmt::Display for ExportErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ExportError {
    /// Retrieve the stable [`ExportErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> ExportErrorCode {
        match self {
            Self::Io { .. } => ExportErrorCode::Io,
            Self::Render { .. } => ExportErrorCode::Render,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

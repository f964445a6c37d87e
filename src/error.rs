//! Error types for the white-background-removal crate.

use std::path::PathBuf;

/// Errors that can occur while removing a white background.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input could not be opened or decoded as an image.
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        /// Path of the input file.
        path: PathBuf,
        /// Underlying decoder error.
        #[source]
        source: image::ImageError,
    },

    /// The output image could not be encoded or persisted.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Path the output was destined for.
        path: PathBuf,
        /// Underlying encoder or filesystem error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The threshold is outside `0..=255`.
    #[error("threshold {0} is out of range (expected 0-255)")]
    InvalidThreshold(i64),

    /// No input path was chosen or supplied.
    #[error("no input image selected")]
    NoInputSelected,

    /// The host could not open the output in a viewer.
    #[error("failed to open {} in viewer: {source}", path.display())]
    Viewer {
        /// Path of the file that should have been shown.
        path: PathBuf,
        /// Underlying launcher error.
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn write(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Write {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let write = Error::write(
            "/nope/out.png",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        let msg = write.to_string();
        assert!(msg.contains("/nope/out.png"));
        assert!(msg.contains("gone"));

        let threshold = Error::InvalidThreshold(300);
        assert!(threshold.to_string().contains("300"));

        assert_eq!(Error::NoInputSelected.to_string(), "no input image selected");
    }

    #[test]
    fn decode_error_exposes_source() {
        let source = image::ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let err = Error::Decode {
            path: PathBuf::from("photo.jpg"),
            source,
        };
        assert!(err.to_string().starts_with("failed to decode photo.jpg"));
        assert!(std::error::Error::source(&err).is_some());
    }
}

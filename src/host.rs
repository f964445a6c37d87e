//! Platform capabilities used around the core transform: choosing an input
//! file and showing the result.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Side effects the surrounding environment provides.
pub trait Host {
    /// Ask the operator for an input image. `None` means they cancelled.
    fn pick_file(&self) -> Option<PathBuf>;

    /// Show `path` in the platform's default image viewer.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Viewer`] if the viewer cannot be launched.
    fn open_in_viewer(&self, path: &Path) -> Result<()>;
}

/// Host for non-interactive runs: never picks a file and only logs the
/// output path instead of opening it.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessHost;

impl Host for HeadlessHost {
    fn pick_file(&self) -> Option<PathBuf> {
        None
    }

    fn open_in_viewer(&self, path: &Path) -> Result<()> {
        tracing::debug!(output = %path.display(), "viewer hand-off skipped");
        Ok(())
    }
}

/// Desktop host backed by the native file dialog and the default viewer.
#[cfg(feature = "desktop")]
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopHost;

#[cfg(feature = "desktop")]
impl Host for DesktopHost {
    fn pick_file(&self) -> Option<PathBuf> {
        let picked = rfd::FileDialog::new()
            .set_title("Select an image")
            .add_filter("Images", crate::engine::SUPPORTED_EXTENSIONS)
            .pick_file();
        match &picked {
            Some(path) => tracing::debug!(path = %path.display(), "file selected"),
            None => tracing::debug!("file dialog cancelled"),
        }
        picked
    }

    fn open_in_viewer(&self, path: &Path) -> Result<()> {
        open::that_detached(path).map_err(|source| crate::Error::Viewer {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Ask the desktop file dialog for an image.
#[cfg(feature = "desktop")]
#[must_use]
pub fn select_image_file() -> Option<PathBuf> {
    DesktopHost.pick_file()
}

//! Load, mask and save: the file-level background removal pipeline.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::png::PngEncoder;
use image::{
    DynamicImage, ExtendedColorType, ImageEncoder, ImageError, ImageReader, RgbaImage,
};

use crate::error::{Error, Result};
use crate::masking::{self, Threshold};
use crate::progress::{NoProgress, ProgressSink};

/// Suffix inserted between the input stem and the `.png` extension.
pub const OUTPUT_SUFFIX: &str = "_transparencia";

/// Extensions offered by the file picker and accepted by
/// [`is_supported_image`].
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

/// Options controlling a single removal.
#[derive(Debug, Clone, Default)]
pub struct RemovalOptions {
    /// Per-channel brightness cutoff.
    pub threshold: Threshold,
    /// Explicit output path; derived with [`default_output_path`] when `None`.
    pub output: Option<PathBuf>,
}

/// Outcome of a successful removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalReport {
    /// Where the PNG was written.
    pub output: PathBuf,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Number of pixels made transparent.
    pub masked_pixels: u64,
}

/// Remove the white background of the image at `input` and save it as PNG
/// next to the input.
///
/// Returns the path of the written file.
///
/// # Errors
///
/// - [`Error::InvalidThreshold`] if `threshold` is outside `0..=255`.
/// - [`Error::Decode`] if `input` cannot be read as an image.
/// - [`Error::Write`] if the output cannot be written.
pub fn remove_background(input: impl AsRef<Path>, threshold: i64) -> Result<PathBuf> {
    let opts = RemovalOptions {
        threshold: Threshold::new(threshold)?,
        output: None,
    };
    remove_background_with(input.as_ref(), &opts, &NoProgress).map(|report| report.output)
}

/// Full-control variant of [`remove_background`].
///
/// Row progress is forwarded to `progress`. An existing file at the output
/// path is overwritten.
///
/// # Errors
///
/// Returns [`Error::Decode`] or [`Error::Write`] as described on
/// [`remove_background`].
pub fn remove_background_with(
    input: &Path,
    opts: &RemovalOptions,
    progress: &dyn ProgressSink,
) -> Result<RemovalReport> {
    let mut img = decode(input)?.to_rgba8();

    let (width, height) = img.dimensions();
    tracing::debug!(
        input = %input.display(),
        width,
        height,
        threshold = opts.threshold.get(),
        "decoded image"
    );

    let masked_pixels = masking::mask_background(&mut img, opts.threshold, progress);

    let output = opts
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(input));
    save_png(&img, &output)?;

    tracing::debug!(
        output = %output.display(),
        masked_pixels,
        "saved transparent image"
    );

    Ok(RemovalReport {
        output,
        width,
        height,
        masked_pixels,
    })
}

/// Decode `input`, picking the format from the file content and falling
/// back to the extension.
fn decode(input: &Path) -> Result<DynamicImage> {
    let decode_err = |source: ImageError| Error::Decode {
        path: input.to_path_buf(),
        source,
    };

    ImageReader::open(input)
        .and_then(ImageReader::with_guessed_format)
        .map_err(|e| decode_err(ImageError::IoError(e)))?
        .decode()
        .map_err(decode_err)
}

/// Encode `img` as RGBA PNG at `path`.
///
/// The image is written to a temporary file in the destination directory
/// and synced, then renamed over `path`, so a failed write never leaves a
/// truncated file behind.
///
/// # Errors
///
/// Returns [`Error::Write`] if the directory is missing or not writable,
/// or if encoding fails.
pub fn save_png(img: &RgbaImage, path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix(".white-bg-").suffix(".png.tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o644));
    }

    let mut tmp = builder
        .tempfile_in(dir)
        .map_err(|e| Error::write(path, e))?;

    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        PngEncoder::new(&mut writer)
            .write_image(
                img.as_raw(),
                img.width(),
                img.height(),
                ExtendedColorType::Rgba8,
            )
            .map_err(|e| Error::write(path, e))?;
        writer.flush().map_err(|e| Error::write(path, e))?;
    }
    tmp.as_file().sync_all().map_err(|e| Error::write(path, e))?;

    tmp.persist(path).map_err(|e| Error::write(path, e.error))?;
    Ok(())
}

/// Check if a file has a supported image extension.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()),
        None => false,
    }
}

/// Generate the default output path from an input path.
///
/// Example: `"/a/b/photo.jpg"` becomes `"/a/b/photo_transparencia.png"`.
#[must_use]
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let parent = input.parent().unwrap_or(Path::new(""));
    parent.join(format!("{stem}{OUTPUT_SUFFIX}.png"))
}

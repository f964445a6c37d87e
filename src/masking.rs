//! Pixel classification and alpha masking.
//!
//! A pixel is treated as background when each of its red, green and blue
//! channels is strictly greater than the threshold:
//! `R > t && G > t && B > t`
//!
//! Background pixels get `A = 0`. Colour channels are never touched, and
//! no pixel's classification depends on its neighbours, so rows can be
//! processed in any order.

use image::{Pixel, Rgba, RgbaImage};

use crate::error::{Error, Result};
use crate::progress::ProgressSink;

/// Threshold used when none is given.
pub const DEFAULT_THRESHOLD: u8 = 200;

/// Bytes per RGBA8 pixel.
const CHANNELS: usize = 4;

/// Per-channel brightness cutoff in `0..=255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Threshold(u8);

impl Threshold {
    /// Validate an integer threshold.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidThreshold`] if `value` is outside `0..=255`.
    pub fn new(value: i64) -> Result<Self> {
        u8::try_from(value)
            .map(Self)
            .map_err(|_| Error::InvalidThreshold(value))
    }

    /// The raw cutoff value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(DEFAULT_THRESHOLD)
    }
}

impl From<u8> for Threshold {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl TryFrom<i64> for Threshold {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl std::fmt::Display for Threshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Whether a pixel counts as background at the given threshold.
#[must_use]
#[inline]
pub fn is_background(pixel: &Rgba<u8>, threshold: Threshold) -> bool {
    let t = threshold.get();
    pixel[0] > t && pixel[1] > t && pixel[2] > t
}

/// Mask one row of raw RGBA8 bytes in place, returning how many pixels
/// were made transparent.
fn mask_row(row: &mut [u8], threshold: Threshold) -> u64 {
    let mut masked = 0;
    for raw in row.chunks_exact_mut(CHANNELS) {
        let px = Rgba::<u8>::from_slice_mut(raw);
        if is_background(px, threshold) {
            px[3] = 0;
            masked += 1;
        }
    }
    masked
}

/// Make every background pixel of `image` fully transparent.
///
/// Progress is reported to `progress` once per row. Returns the number of
/// pixels that matched the background predicate.
pub fn mask_background(
    image: &mut RgbaImage,
    threshold: Threshold,
    progress: &dyn ProgressSink,
) -> u64 {
    let (width, height) = image.dimensions();
    progress.start(height);

    if width == 0 || height == 0 {
        progress.finish();
        return 0;
    }

    let stride = width as usize * CHANNELS;

    #[cfg(feature = "parallel")]
    let masked: u64 = {
        use rayon::prelude::*;
        image
            .par_chunks_exact_mut(stride)
            .map(|row| {
                let n = mask_row(row, threshold);
                progress.advance(1);
                n
            })
            .sum()
    };

    #[cfg(not(feature = "parallel"))]
    let masked: u64 = image
        .chunks_exact_mut(stride)
        .map(|row| {
            let n = mask_row(row, threshold);
            progress.advance(1);
            n
        })
        .sum();

    progress.finish();
    masked
}

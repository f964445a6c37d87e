//! Turn near-white image backgrounds transparent.
//!
//! Every pixel whose red, green and blue channels are all strictly above a
//! threshold (200 by default) gets its alpha set to zero. Colour channels
//! are left untouched and the result is always written as RGBA PNG, named
//! `<stem>_transparencia.png` next to the input.
//!
//! # Quick Start
//!
//! ```no_run
//! use white_background_removal::remove_background;
//!
//! let output = remove_background("photo.jpg", 200).expect("removal failed");
//! println!("saved {}", output.display());
//! ```
//!
//! # In-memory use
//!
//! The masking pass has no I/O and can be run on any [`image::RgbaImage`]:
//!
//! ```
//! use image::{Rgba, RgbaImage};
//! use white_background_removal::{mask_background, NoProgress, Threshold};
//!
//! let mut img = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255]));
//! let masked = mask_background(&mut img, Threshold::default(), &NoProgress);
//! assert_eq!(masked, 4);
//! assert!(img.pixels().all(|px| px[3] == 0));
//! ```

#![deny(missing_docs)]

mod engine;
pub mod error;
pub mod host;
pub mod masking;
pub mod progress;

pub use engine::{
    default_output_path, is_supported_image, remove_background, remove_background_with,
    save_png, RemovalOptions, RemovalReport, OUTPUT_SUFFIX, SUPPORTED_EXTENSIONS,
};
pub use error::{Error, Result};
pub use masking::{is_background, mask_background, Threshold, DEFAULT_THRESHOLD};
pub use progress::{NoProgress, ProgressSink};

//! Height grid filters.
//!
//! - [`BoxBlurFilter`]: iterated summed-area box blur
//! - [`Resampler`]: bilinear stretch of one grid region onto another

pub mod blur;
pub mod resample;

pub use blur::{BlurScratch, BoxBlurFilter};
pub use resample::Resampler;

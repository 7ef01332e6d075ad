//! Dehaze - single-image haze removal with the dark channel prior.
//!
//! A hazy photograph is modeled as `I = J·t + A·(1 − t)`: scene radiance `J`
//! attenuated by the transmission `t` and mixed with the atmospheric light
//! `A`. The library estimates `A` and `t` from the image alone and inverts
//! the model:
//! - dark channel (windowed minimum over all channels)
//! - atmospheric light from the most haze-opaque pixels
//! - coarse transmission, refined with a fast guided filter
//! - radiance recovery with a transmission floor, rescaled to 8-bit
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use dehaze::{Config, Dehazer, io};
//!
//! let image = io::load_image("forest.jpg")?;
//! let dehazer = Dehazer::from_config(Config::default());
//! let output = dehazer.dehaze(&image)?;
//!
//! println!("{}", output.timings);
//! io::save_image(&output.image, io::dehazed_output_path("forest.jpg"))?;
//! ```

mod atmospheric_light;
mod config;
mod dark_channel;
mod error;
mod guided_filter;
mod image;
mod normalize;
mod pipeline;
mod reconstruct;
mod transmission;

pub mod io;

#[cfg(test)]
pub(crate) mod testing;

// ============================================================================
// Data model
// ============================================================================

pub use config::{AIRLIGHT_FLOOR, Config, ConfigError};
pub use error::{Error, Result, Stage};
pub use crate::image::{ByteImage, RgbImage, ScalarMap};

// ============================================================================
// Pipeline
// ============================================================================

pub use pipeline::{DehazeOutput, Dehazer, StageTimings, dehaze};

// ============================================================================
// Individual stages
// ============================================================================

pub use atmospheric_light::{AtmosphericLight, estimate_atmospheric_light, sample_count};
pub use dark_channel::dark_channel;
pub use guided_filter::{GuideMode, GuidedFilterParams, guided_filter};
pub use normalize::normalize;
pub use reconstruct::{reconstruct, recover_radiance, to_display};
pub use transmission::estimate_transmission;

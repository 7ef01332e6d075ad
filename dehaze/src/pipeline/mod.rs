//! End-to-end dehazing.
//!
//! # Pipeline Stages
//!
//! 1. **Normalize** - 8-bit samples to `[0, 1]`
//! 2. **Dark channel** - windowed minimum over all channels
//! 3. **Atmospheric light** - mean color of the brightest dark channel pixels
//! 4. **Transmission** - `1 − ω·dark(I / A)`
//! 5. **Refinement** - fast guided filter of the transmission, guided by the image
//! 6. **Reconstruction** - `J = A + (I − A) / max(t, t0)`, rescaled to 8-bit
//!
//! Every stage allocates its own output; nothing is kept between calls.

mod timings;


pub use timings::StageTimings;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use rayon::prelude::*;

use crate::atmospheric_light::{AtmosphericLight, estimate_atmospheric_light};
use crate::config::Config;
use crate::dark_channel::dark_channel;
use crate::error::{Error, Result, Stage};
use crate::guided_filter::guided_filter;
use crate::image::{ByteImage, ScalarMap};
use crate::normalize::normalize;
use crate::reconstruct::reconstruct;
use crate::transmission::estimate_transmission;

/// Result of a successful [`Dehazer::dehaze`] call.
#[derive(Debug, Clone)]
pub struct DehazeOutput {
    /// Recovered scene radiance, same dimensions as the input.
    pub image: ByteImage,
    pub airlight: AtmosphericLight,
    /// Refined transmission map.
    pub transmission: ScalarMap,
    pub timings: StageTimings,
}

/// Single-image haze remover with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Dehazer {
    config: Config,
}

impl Dehazer {
    /// Dehazer with the default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// # Panics
    /// Panics if `config` fails [`Config::validate`].
    pub fn from_config(config: Config) -> Self {
        config.validate();
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Removes haze from `image`.
    ///
    /// The input must be a non-empty 3-channel image. On error no partial
    /// output is produced.
    pub fn dehaze(&self, image: &ByteImage) -> Result<DehazeOutput> {
        let start = Instant::now();
        let config = &self.config;
        let mut timings = StageTimings::default();

        let stage_start = Instant::now();
        let normalized = normalize(image)?;
        timings.normalize = stage_start.elapsed();

        let stage_start = Instant::now();
        let dark = dark_channel(&normalized, config.patch_radius);
        timings.dark_channel = stage_start.elapsed();

        let stage_start = Instant::now();
        let airlight = estimate_atmospheric_light(&normalized, &dark, config.airlight_fraction);
        timings.atmospheric_light = stage_start.elapsed();
        drop(dark);

        let stage_start = Instant::now();
        let raw_transmission =
            estimate_transmission(&normalized, &airlight, config.omega, config.patch_radius);
        timings.transmission = stage_start.elapsed();

        let stage_start = Instant::now();
        let transmission = guided_filter(
            &normalized,
            &raw_transmission,
            &config.guided_filter_params(),
        );
        timings.refinement = stage_start.elapsed();
        drop(raw_transmission);

        if let Some(bad) = transmission.par_iter().find_first(|t| !t.is_finite()) {
            return Err(Error::NumericFailure {
                stage: Stage::Refinement,
                detail: format!("refined transmission contains {}", bad),
            });
        }

        let stage_start = Instant::now();
        let output = reconstruct(&normalized, &airlight, &transmission, config.t0)?;
        timings.reconstruction = stage_start.elapsed();

        timings.total = start.elapsed();

        for (stage, duration) in timings.stages() {
            tracing::debug!(stage, ms = duration.as_secs_f64() * 1000.0, "Stage finished");
        }
        tracing::info!(
            width = image.width(),
            height = image.height(),
            airlight = ?airlight.rgb(),
            total_ms = timings.total.as_secs_f64() * 1000.0,
            "Dehazed image"
        );

        Ok(DehazeOutput {
            image: output,
            airlight,
            transmission,
            timings,
        })
    }

    /// Dehazes `image`, falling back to an unchanged copy of it on any failure.
    ///
    /// A panic inside a stage is caught and reported as [`Error::Unknown`].
    pub fn dehaze_or_original(&self, image: &ByteImage) -> (ByteImage, Option<Error>) {
        let result = panic::catch_unwind(AssertUnwindSafe(|| self.dehaze(image)))
            .unwrap_or_else(|payload| Err(Error::Unknown(panic_message(payload.as_ref()))));

        match result {
            Ok(output) => (output.image, None),
            Err(err) => {
                tracing::error!(error = %err, "Dehazing failed, returning the original image");
                (image.clone(), Some(err))
            }
        }
    }
}

/// Dehazes `image` with [`Config::default`].
pub fn dehaze(image: &ByteImage) -> Result<DehazeOutput> {
    Dehazer::new().dehaze(image)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}

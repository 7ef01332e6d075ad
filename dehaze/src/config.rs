//! Dehazing parameters.
//!
//! [`Config`] is a flat struct with the defaults of the dark channel prior
//! paper's fast variant. It can be loaded from a YAML or JSON file; fields
//! missing from the file keep their defaults.

use std::io;
use std::path::{Path, PathBuf};

use common::file_format::{FileExtensionError, SerdeFormat, SerdeFormatError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::guided_filter::{GuideMode, GuidedFilterParams};

/// Lower bound applied to every atmospheric light component.
pub const AIRLIGHT_FLOOR: f32 = 1e-5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Half-width of the dark channel minimum window.
    pub patch_radius: usize,
    /// Haze-retention factor. 1.0 removes all haze; lower values keep some for depth perception.
    pub omega: f32,
    /// Transmission floor used when inverting the haze model.
    pub t0: f32,
    /// Guided filter window radius at full resolution.
    pub guided_radius: usize,
    /// Guided filter regularization. Larger values behave closer to a box blur.
    pub guided_epsilon: f32,
    /// Downsampling factor of the fast guided filter. 1 disables subsampling.
    pub subsample_ratio: usize,
    /// Fraction of pixels (brightest dark channel) averaged into the airlight. At least one pixel is used.
    pub airlight_fraction: f32,
    /// How the color guide drives the guided filter.
    pub guide_mode: GuideMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            patch_radius: 7,
            omega: 0.95,
            t0: 0.1,
            guided_radius: 40,
            guided_epsilon: 0.1,
            subsample_ratio: 5,
            airlight_fraction: 0.001,
            guide_mode: GuideMode::Color,
        }
    }
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Panics
    /// Panics if any parameter is outside its valid range.
    pub fn validate(&self) {
        if let Some(reason) = self.range_violation() {
            panic!("{}", reason);
        }
    }

    /// First parameter outside its valid range, if any.
    fn range_violation(&self) -> Option<String> {
        if !(self.omega > 0.0 && self.omega <= 1.0) {
            return Some(format!("omega must be in (0, 1], got {}", self.omega));
        }
        if !(self.t0 > 0.0 && self.t0 <= 1.0) {
            return Some(format!("t0 must be in (0, 1], got {}", self.t0));
        }
        if !(self.guided_epsilon > 0.0 && self.guided_epsilon.is_finite()) {
            return Some(format!(
                "guided_epsilon must be positive, got {}",
                self.guided_epsilon
            ));
        }
        if self.subsample_ratio < 1 {
            return Some(format!(
                "subsample_ratio must be >= 1, got {}",
                self.subsample_ratio
            ));
        }
        if !(self.airlight_fraction > 0.0 && self.airlight_fraction <= 1.0) {
            return Some(format!(
                "airlight_fraction must be in (0, 1], got {}",
                self.airlight_fraction
            ));
        }
        None
    }

    pub fn guided_filter_params(&self) -> GuidedFilterParams {
        GuidedFilterParams {
            radius: self.guided_radius,
            epsilon: self.guided_epsilon,
            subsample_ratio: self.subsample_ratio,
            mode: self.guide_mode,
        }
    }

    /// Loads a configuration from a `.yaml`/`.yml` or `.json` file.
    ///
    /// Out-of-range values are reported as [`ConfigError::Invalid`], so the
    /// result can be passed to `Dehazer::from_config` without panicking.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = SerdeFormat::from_path(path)?;
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = format
            .deserialize(&text)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        if let Some(reason) = config.range_violation() {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                reason,
            });
        }
        tracing::debug!(?path, ?config, "Loaded dehaze config");
        Ok(config)
    }
}

/// Errors from [`Config::from_file`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Format(#[from] FileExtensionError),

    #[error("Failed to read config '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: SerdeFormatError,
    },

    #[error("Invalid config '{}': {reason}", .path.display())]
    Invalid { path: PathBuf, reason: String },
}

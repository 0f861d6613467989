#![forbid(unsafe_code)]

//! Tunable constants of the hero confirmation dialog.
//!
//! [`HeroDialogConfig::default()`] reproduces the stock dialog: corner radii
//! 30 → 45, a 300 ms critically damped spring, a 40 ms hide-source delay and
//! an 80 ms restore delay, a 0.4 scrim, and a 10 pt blur.
//!
//! With the `config` feature the whole structure can be loaded from TOML or
//! JSON. Missing fields keep their defaults.
//!
//! ```toml
//! [radii]
//! destination = 36.0
//!
//! [timing]
//! morph_ms = 450
//! bounce = 0.15
//! ```

#[cfg(feature = "config")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use hero_core::animation::Curve;

// ============================================================================
// Sections
// ============================================================================

/// Corner radii at the two ends of the morph.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct CornerRadii {
    /// Radius of the trigger pill. Default: 30.
    pub source: f64,
    /// Radius of the expanded sheet. Default: 45.
    pub destination: f64,
}

impl Default for CornerRadii {
    fn default() -> Self {
        Self {
            source: 30.0,
            destination: 45.0,
        }
    }
}

/// Animation timing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct TimingConfig {
    /// Perceptual duration of the morph spring (ms). Default: 300.
    pub morph_ms: u64,
    /// Spring bounce in [0, 1). Default: 0 (critically damped).
    pub bounce: f64,
    /// Delay before the snapshot fades out on open (ms). Default: 40.
    pub hide_source_delay_ms: u64,
    /// Delay before the snapshot fades back in on dismiss (ms). Default: 80.
    pub restore_delay_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            morph_ms: 300,
            bounce: 0.0,
            hide_source_delay_ms: 40,
            restore_delay_ms: 80,
        }
    }
}

/// Layout metrics in logical points.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct LayoutConfig {
    /// Horizontal padding around the trigger. Default: 16.
    pub trigger_padding: f64,
    /// Trigger height. Default: 50.
    pub trigger_height: f64,
    /// Horizontal inset of the expanded sheet. Default: 8.
    pub sheet_inset: f64,
    /// Gap between the sheet's bottom edge and the container. Default: 10.
    pub bottom_offset: f64,
    /// Inner padding of the sheet. Default: 20.
    pub sheet_padding: f64,
    /// Gap between the two action buttons. Default: 8.
    pub button_spacing: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            trigger_padding: 16.0,
            trigger_height: 50.0,
            sheet_inset: 8.0,
            bottom_offset: 10.0,
            sheet_padding: 20.0,
            button_spacing: 8.0,
        }
    }
}

/// Overlay effects.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct EffectsConfig {
    /// Scrim opacity when fully expanded. Default: 0.4.
    pub scrim_opacity: f64,
    /// Blur radius at the ends of the cross-fade (pt). Default: 10.
    pub max_blur: f64,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            scrim_opacity: 0.4,
            max_blur: 10.0,
        }
    }
}

// ============================================================================
// HeroDialogConfig
// ============================================================================

/// Complete dialog configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct HeroDialogConfig {
    pub radii: CornerRadii,
    pub timing: TimingConfig,
    pub layout: LayoutConfig,
    pub effects: EffectsConfig,
}

impl HeroDialogConfig {
    /// Set both corner radii.
    #[must_use]
    pub fn radii(mut self, source: f64, destination: f64) -> Self {
        self.radii = CornerRadii {
            source,
            destination,
        };
        self
    }

    /// Set the morph duration.
    #[must_use]
    pub fn morph_duration(mut self, duration: Duration) -> Self {
        self.timing.morph_ms = duration.as_millis().min(u128::from(u64::MAX)) as u64;
        self
    }

    /// Set the spring bounce.
    #[must_use]
    pub fn bounce(mut self, bounce: f64) -> Self {
        self.timing.bounce = bounce;
        self
    }

    /// Set the hide-source and restore delays.
    #[must_use]
    pub fn cross_fade_delays(mut self, hide: Duration, restore: Duration) -> Self {
        self.timing.hide_source_delay_ms = hide.as_millis().min(u128::from(u64::MAX)) as u64;
        self.timing.restore_delay_ms = restore.as_millis().min(u128::from(u64::MAX)) as u64;
        self
    }

    /// Curve shared by the morph and the cross-fade.
    #[must_use]
    pub fn curve(&self) -> Curve {
        Curve::Spring {
            duration: Duration::from_millis(self.timing.morph_ms),
            bounce: self.timing.bounce,
        }
    }

    #[must_use]
    pub fn hide_source_delay(&self) -> Duration {
        Duration::from_millis(self.timing.hide_source_delay_ms)
    }

    #[must_use]
    pub fn restore_delay(&self) -> Duration {
        Duration::from_millis(self.timing.restore_delay_ms)
    }

    /// Check every value is usable, reporting the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a finite non-negative number, got {value}"),
                })
            }
        }

        non_negative("radii.source", self.radii.source)?;
        non_negative("radii.destination", self.radii.destination)?;
        if self.timing.morph_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "timing.morph_ms",
                reason: "must be at least 1".into(),
            });
        }
        if !(self.timing.bounce.is_finite() && (0.0..1.0).contains(&self.timing.bounce)) {
            return Err(ConfigError::Invalid {
                field: "timing.bounce",
                reason: format!("must be in [0, 1), got {}", self.timing.bounce),
            });
        }
        non_negative("layout.trigger_padding", self.layout.trigger_padding)?;
        non_negative("layout.trigger_height", self.layout.trigger_height)?;
        non_negative("layout.sheet_inset", self.layout.sheet_inset)?;
        non_negative("layout.bottom_offset", self.layout.bottom_offset)?;
        non_negative("layout.sheet_padding", self.layout.sheet_padding)?;
        non_negative("layout.button_spacing", self.layout.button_spacing)?;
        if !(0.0..=1.0).contains(&self.effects.scrim_opacity) {
            return Err(ConfigError::Invalid {
                field: "effects.scrim_opacity",
                reason: format!("must be in [0, 1], got {}", self.effects.scrim_opacity),
            });
        }
        non_negative("effects.max_blur", self.effects.max_blur)?;
        Ok(())
    }

    /// Parse and validate a TOML document.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a JSON document.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Failure to load or validate a [`HeroDialogConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "config")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[cfg(feature = "config")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

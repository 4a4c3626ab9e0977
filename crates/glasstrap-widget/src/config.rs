#![forbid(unsafe_code)]

//! Widget configuration.
//!
//! Every tunable of the widget lives in one [`WidgetConfig`] that can be
//! loaded from TOML or JSON at mount time.
//!
//! ```toml
//! [drag]
//! snap_threshold = 24.0
//!
//! [scatter]
//! min_distance = 90.0
//! max_distance = 200.0
//! max_rotation_deg = 55.0
//!
//! [timing]
//! arm_delay_ms = 400
//! solve_cooldown_ms = 250
//!
//! [messages]
//! solved = "Nice work. Click it again to actually leave."
//! ```
//!
//! # Defaults
//!
//! Omitted fields fall back to the design values, so an empty document is
//! equivalent to `WidgetConfig::default()`.

use std::path::Path;
use std::time::Duration;

use glasstrap_core::{DragConfig, ScatterConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level widget configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub drag: DragConfig,
    pub scatter: ScatterConfig,
    pub timing: TimingConfig,
    pub messages: Messages,
}

/// Delays and transition durations, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Delay between shatter and accepting drags (default: 400).
    pub arm_delay_ms: u64,
    /// Delay between solve and re-enabling the button (default: 250).
    pub solve_cooldown_ms: u64,
    /// Settle transition after a release (default: 250).
    pub settle_ms: u64,
    /// Scatter flight transition (default: 450).
    pub scatter_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            arm_delay_ms: 400,
            solve_cooldown_ms: 250,
            settle_ms: 250,
            scatter_ms: 450,
        }
    }
}

impl TimingConfig {
    #[must_use]
    pub const fn arm_delay(&self) -> Duration {
        Duration::from_millis(self.arm_delay_ms)
    }

    #[must_use]
    pub const fn solve_cooldown(&self) -> Duration {
        Duration::from_millis(self.solve_cooldown_ms)
    }

    #[must_use]
    pub const fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    #[must_use]
    pub const fn scatter(&self) -> Duration {
        Duration::from_millis(self.scatter_ms)
    }
}

/// Human-readable status and label texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// Status right after the shatter.
    pub shattered: String,
    /// Status once drags are accepted.
    pub puzzle_started: String,
    /// Status once the button is re-enabled.
    pub solved: String,
    /// Status after the final action.
    pub ended: String,
    /// Button label after the final action.
    pub ended_label: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            shattered: "Whoa! The leave button shattered. Put the glass back.".to_string(),
            puzzle_started: "Drag each shard until it snaps back in.".to_string(),
            solved: "Nice work. Click it again to actually leave.".to_string(),
            ended: "You finally left the call.".to_string(),
            ended_label: "Call ended".to_string(),
        }
    }
}

/// Errors produced while loading or validating a [`WidgetConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {field} {problem}")]
    Invalid {
        field: &'static str,
        problem: &'static str,
    },
}

impl WidgetConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the state machines cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.drag.snap_threshold;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(invalid("drag.snap_threshold", "must be finite and > 0"));
        }
        let ScatterConfig {
            min_distance,
            max_distance,
            max_rotation_deg,
        } = self.scatter;
        if !min_distance.is_finite() || !max_distance.is_finite() || min_distance < 0.0 {
            return Err(invalid("scatter.min_distance", "must be finite and >= 0"));
        }
        if max_distance < min_distance {
            return Err(invalid("scatter.max_distance", "must be >= scatter.min_distance"));
        }
        if !max_rotation_deg.is_finite() || max_rotation_deg < 0.0 {
            return Err(invalid("scatter.max_rotation_deg", "must be finite and >= 0"));
        }
        Ok(())
    }
}

const fn invalid(field: &'static str, problem: &'static str) -> ConfigError {
    ConfigError::Invalid { field, problem }
}

//! Data-driven game balance
//!
//! Every knob has a default, so a tuning file only needs the keys it changes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Game tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Level layout ===
    /// Holes placed per level
    pub hazard_count: usize,
    /// Keeps goal and holes this far from the screen edges
    pub edge_padding: f32,
    /// Give up on a layout after this many tries (None = keep trying forever)
    pub max_layout_attempts: Option<u32>,

    // === Win/lose ===
    /// Collision slack for goal and hole checks (negative = ball must be well inside)
    pub target_delta: f32,
    /// Seconds between a win/loss and the next level
    pub reset_delay_secs: f32,

    // === Controls ===
    /// Velocity set by arrow keys and touch steering
    pub key_speed: f32,
    /// Device tilt angle (degrees) is divided by this to get velocity
    pub tilt_divisor: f32,
    /// Upward z velocity given by a jump
    pub jump_speed: f32,

    // === Depth variant ===
    /// World depth; enables the pseudo-3D bounce when set
    pub depth: Option<f32>,
    /// Ball draw scale per unit of height
    pub depth_scale: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            hazard_count: 4,
            edge_padding: 25.0,
            max_layout_attempts: Some(10_000),

            target_delta: -15.0,
            reset_delay_secs: 3.0,

            key_speed: 5.0,
            tilt_divisor: 2.0,
            jump_speed: 8.0,

            depth: None,
            depth_scale: 0.01,
        }
    }
}

#[derive(Debug)]
pub enum TuningError {
    Parse(serde_json::Error),
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "malformed tuning JSON: {err}"),
            Self::Invalid { field, reason } => write!(f, "tuning field `{field}` {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation can't work with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        if !self.edge_padding.is_finite() || self.edge_padding < 0.0 {
            return invalid("edge_padding", "must be a non-negative number");
        }
        if !self.target_delta.is_finite() {
            return invalid("target_delta", "must be finite");
        }
        if !self.reset_delay_secs.is_finite() || self.reset_delay_secs < 0.0 {
            return invalid("reset_delay_secs", "must be a non-negative number");
        }
        if !self.key_speed.is_finite() || !self.jump_speed.is_finite() {
            return invalid("key_speed", "and jump_speed must be finite");
        }
        if !self.tilt_divisor.is_finite() || self.tilt_divisor == 0.0 {
            return invalid("tilt_divisor", "must be finite and non-zero");
        }
        if self.max_layout_attempts == Some(0) {
            return invalid("max_layout_attempts", "must allow at least one attempt");
        }
        if let Some(depth) = self.depth {
            if !depth.is_finite() || depth <= 0.0 {
                return invalid("depth", "must be positive when set");
            }
        }
        if !self.depth_scale.is_finite() || self.depth_scale < 0.0 {
            return invalid("depth_scale", "must be a non-negative number");
        }
        Ok(())
    }
}

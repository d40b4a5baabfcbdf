use std::fmt;

use crate::error::{Error, Result};

/// How a rendered glyph is compared against the target pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoreMode {
    /// Sum of absolute per-pixel differences; penalizes structural mismatch
    #[default]
    Shape,
    /// Absolute value of the signed difference total; only average brightness matters
    Shade,
}

impl fmt::Display for ScoreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreMode::Shape => f.write_str("shape"),
            ScoreMode::Shade => f.write_str("shade"),
        }
    }
}

/// Configuration for a conversion, built once and shared read-only
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsciizeConfig {
    /// Font
    pub size: f32, // points at 72 DPI, default 12.0

    /// Glyph selection
    pub score: ScoreMode, // default Shape

    /// Output post-processing
    pub trim: bool, // strip trailing spaces, default false
    pub nbsp: bool, // spaces become U+00A0, default false
}

impl Default for AsciizeConfig {
    fn default() -> Self {
        Self {
            size: 12.0,
            score: ScoreMode::Shape,
            trim: false,
            nbsp: false,
        }
    }
}

impl AsciizeConfig {
    /// Validates the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !self.size.is_finite() || self.size <= 0.0 || self.size > 512.0 {
            return Err(Error::Config(format!(
                "size must be between 0 and 512, got {}",
                self.size
            )));
        }
        Ok(())
    }
}

//! Clipping parameters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{ClipError, Result, DEFAULT_EPSILON};

/// Triangles with an area at or below this are degenerate.
pub const DEGENERATE_AREA: f32 = 1e-12;

/// Clipping parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClipSettings {
    /// Distance tolerance for treating a vertex as on the plane.
    pub epsilon: f32,
    /// Fail on zero-area input triangles instead of passing them through.
    pub reject_degenerate: bool,
    /// Split triangles and meshes on the rayon thread pool.
    /// Ignored unless the `parallel` feature is enabled.
    pub parallel: bool,
}

impl Default for ClipSettings {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            reject_degenerate: false,
            parallel: false,
        }
    }
}

impl ClipSettings {
    /// Sets the on-plane tolerance.
    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Enables or disables rejection of zero-area triangles.
    pub fn with_reject_degenerate(mut self, reject: bool) -> Self {
        self.reject_degenerate = reject;
        self
    }

    /// Enables or disables parallel splitting.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks that the settings can be used for clipping.
    ///
    /// # Errors
    /// Returns [`ClipError::InvalidSettings`] for a negative or non-finite
    /// epsilon.
    pub fn validate(&self) -> Result<()> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(ClipError::InvalidSettings(format!(
                "epsilon must be finite and non-negative, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }
}

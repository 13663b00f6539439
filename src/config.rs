//! Hyperparameters and normalization bounds.
//!
//! Both are plain values fixed at construction. A network never mutates its
//! `NetworkConfig`; the colour classifier and the audio predictor simply build
//! their networks from different presets.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A closed interval `[min, max]` used for the affine map onto `[0, 1]`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Build a range, rejecting `min >= max` and non-finite bounds.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    /// `[0, 1]`: normalization is the identity.
    pub const fn unit() -> Self {
        Self { min: 0.0, max: 1.0 }
    }

    /// `[-1, 1]`: the amplitude range of a floating-point waveform.
    pub const fn signed_unit() -> Self {
        Self {
            min: -1.0,
            max: 1.0,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.min.is_finite() && self.max.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "range bounds must be finite, got [{}, {}]",
                self.min, self.max
            )));
        }
        if self.min >= self.max {
            return Err(Error::InvalidConfig(format!(
                "range min must be < max, got [{}, {}]",
                self.min, self.max
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Maps `x` from `[min, max]` to `[0, 1]`.
    #[inline]
    pub fn normalize(&self, x: f64) -> f64 {
        (x - self.min) / self.width()
    }

    /// Inverse of [`ValueRange::normalize`].
    #[inline]
    pub fn denormalize(&self, x: f64) -> f64 {
        x.mul_add(self.width(), self.min)
    }
}

/// Fixed hyperparameters of a [`crate::NeuralNetwork`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkConfig {
    /// Number of hidden-layer neurons.
    pub hidden_width: usize,
    /// Step size applied to every full-batch weight update.
    pub learning_rate: f64,
    /// Exact number of full-batch cycles `train` runs.
    pub training_cycles: usize,
    /// Lower bound of the uniform initial weights.
    pub min_random_weight: f64,
    /// Upper bound of the uniform initial weights.
    pub max_random_weight: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::colour_classifier()
    }
}

impl NetworkConfig {
    /// RGB colour classifier: 30 hidden, rate 1.0, 60k cycles.
    pub const fn colour_classifier() -> Self {
        Self {
            hidden_width: 30,
            learning_rate: 1.0,
            training_cycles: 60_000,
            min_random_weight: -0.5,
            max_random_weight: 0.5,
        }
    }

    /// Next-window waveform predictor: 220 hidden, rate 0.01, 70k cycles.
    pub const fn audio_predictor() -> Self {
        Self {
            hidden_width: 220,
            learning_rate: 0.01,
            training_cycles: 70_000,
            min_random_weight: -0.5,
            max_random_weight: 0.5,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.hidden_width == 0 {
            return Err(Error::InvalidConfig("hidden_width must be > 0".to_owned()));
        }
        if self.training_cycles == 0 {
            return Err(Error::InvalidConfig(
                "training_cycles must be > 0".to_owned(),
            ));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "learning_rate must be finite and > 0, got {}",
                self.learning_rate
            )));
        }
        ValueRange::new(self.min_random_weight, self.max_random_weight).map_err(|e| {
            Error::InvalidConfig(format!("random weight bounds are invalid: {e}"))
        })?;
        Ok(())
    }

    #[inline]
    pub fn weight_range(&self) -> ValueRange {
        ValueRange {
            min: self.min_random_weight,
            max: self.max_random_weight,
        }
    }
}

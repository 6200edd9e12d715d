//! Error types for sound level computations.
//!
//! This module provides structured error handling for level and integrator
//! construction, following the Microsoft Rust Guidelines pattern.

use thiserror::Error;

/// Errors that can occur when computing time-weighted sound levels.
#[derive(Debug, Error)]
pub enum LevelError {
    /// Sample rate is invalid (must be > 0 and finite).
    #[error("invalid sample rate: {sample_rate} Hz (must be > 0 and finite)")]
    InvalidSampleRate {
        /// The invalid sample rate value
        sample_rate: f64,
    },

    /// Time constant is invalid (must be > 0 and finite).
    #[error("invalid time constant: {time_constant} s (must be > 0 and finite)")]
    InvalidTimeConstant {
        /// The invalid time constant value
        time_constant: f64,
    },

    /// The input signal is empty.
    #[error("empty signal (need at least one sample)")]
    EmptySignal,

    /// A power sample is invalid (negative or NaN).
    #[error("invalid power sample at index {index}: {value} (must be >= 0)")]
    InvalidPower {
        /// Index of the offending sample
        index: usize,
        /// The invalid value
        value: f64,
    },
}

/// A specialized `Result` type for level operations.
pub type Result<T> = std::result::Result<T, LevelError>;

impl LevelError {
    /// Returns `true` if this is a sample rate error.
    pub fn is_sample_rate_error(&self) -> bool {
        matches!(self, LevelError::InvalidSampleRate { .. })
    }

    /// Returns `true` if this is a time constant error.
    pub fn is_time_constant_error(&self) -> bool {
        matches!(self, LevelError::InvalidTimeConstant { .. })
    }

    /// Returns `true` if this is an empty-signal error.
    pub fn is_empty_signal_error(&self) -> bool {
        matches!(self, LevelError::EmptySignal)
    }

    /// Returns `true` if this is a power-sample error.
    pub fn is_power_error(&self) -> bool {
        matches!(self, LevelError::InvalidPower { .. })
    }
}

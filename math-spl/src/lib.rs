//! Time-weighted sound pressure levels per IEC 61672-1.
//!
//! This crate computes FAST (125 ms) and SLOW (1 s) exponentially
//! time-weighted level traces, in dB re 20 µPa, from a sampled sound
//! pressure signal.
//!
//! # Features
//!
//! - **Exponential integrator**: single-pole running mean of squared
//!   pressure with the exact exponential coefficient mapping
//! - **Level calculator**: `fast_level` / `slow_level` / `compute_level`
//!   returning an aligned `(times, levels)` pair
//! - **Streaming variants**: `ExponentialIntegrator` and `LevelMeter` with
//!   explicit, caller-owned state, bit-identical to the vectorized path
//!
//! # Example
//!
//! ```rust
//! use math_audio_spl::slow_level;
//! use ndarray::Array1;
//! use std::f64::consts::PI;
//!
//! let fs = 4000.0;
//! let signal = Array1::from_shape_fn(32000, |i| (2.0 * PI * 400.0 * i as f64 / fs).sin());
//!
//! let (times, levels) = slow_level(&signal, fs).unwrap();
//! assert_eq!(times.len(), signal.len());
//! ```
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

// Module declarations
mod error;
mod integrator;
mod level;

// Re-export error types
pub use error::{LevelError, Result};

// Re-export the integrator
pub use integrator::{ExponentialIntegrator, integrate};

// Re-export level computation
pub use level::{
    LevelMeter, TimeWeighting, compute_level, fast_level, mean_square_to_level, slow_level,
    weighted_level,
};

// ============================================================================
// Standard Constants
// ============================================================================

/// FAST time constant (seconds), per IEC 61672-1
pub const FAST: f64 = 0.125;

/// SLOW time constant (seconds), per IEC 61672-1
pub const SLOW: f64 = 1.0;

/// Reference sound pressure (pascals), 20 µPa
pub const REFERENCE_PRESSURE: f64 = 2.0e-5;

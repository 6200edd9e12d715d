//! Time-weighted sound pressure level computation.
//!
//! Squares the pressure signal, runs it through the exponential integrator
//! with the requested time constant and converts the resulting mean-square
//! trace to decibels re 20 µPa, per IEC 61672-1.

use ndarray::Array1;
use std::fmt;

use crate::error::{LevelError, Result};
use crate::integrator::{ExponentialIntegrator, integrate, validate_params};
use crate::{FAST, REFERENCE_PRESSURE, SLOW};

/// Squared reference pressure, the denominator of the level ratio.
const REFERENCE_POWER: f64 = REFERENCE_PRESSURE * REFERENCE_PRESSURE;

/// Standard time weightings of IEC 61672-1.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum TimeWeighting {
    /// FAST weighting, 125 ms time constant
    Fast,
    /// SLOW weighting, 1 s time constant
    Slow,
    /// Arbitrary time constant in seconds (must be > 0)
    Custom(f64),
}

impl TimeWeighting {
    /// The time constant in seconds.
    pub fn time_constant(&self) -> f64 {
        match self {
            TimeWeighting::Fast => FAST,
            TimeWeighting::Slow => SLOW,
            TimeWeighting::Custom(tau) => *tau,
        }
    }

    /// Returns the short string representation of the weighting (e.g., "F").
    pub fn short_name(&self) -> &'static str {
        match self {
            TimeWeighting::Fast => "F",
            TimeWeighting::Slow => "S",
            TimeWeighting::Custom(_) => "C",
        }
    }
}

impl fmt::Display for TimeWeighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:.3}s", self.short_name(), self.time_constant())
    }
}

/// Converts a mean-square pressure to a level in dB re 20 µPa.
///
/// A zero mean square (silence) maps to negative infinity rather than NaN;
/// this is the documented policy for the `log10(0)` boundary.
pub fn mean_square_to_level(mean_square: f64) -> f64 {
    if mean_square > 0.0 {
        10.0 * (mean_square / REFERENCE_POWER).log10()
    } else {
        f64::NEG_INFINITY
    }
}

/// Computes the time-weighted sound pressure level of a pressure signal.
///
/// Squares the signal, applies the first-order exponential average with the
/// given time constant and converts to decibels re 20 µPa. Returns the time
/// axis `t[i] = i / fs` and the level trace, both the same length as the
/// input.
///
/// The integrator starts from rest, so roughly the first five time constants
/// of output sit below the settled level; conformance checks should be made
/// on the settled tail. Silent stretches produce `f64::NEG_INFINITY` levels
/// (see [`mean_square_to_level`]), never NaN.
///
/// # Arguments
///
/// * `signal` - Pressure samples in pascals (any sign)
/// * `sample_rate` - Sample rate in Hz (> 0)
/// * `time_constant` - Averaging time constant in seconds (> 0)
///
/// # Errors
///
/// Returns `LevelError::EmptySignal`, `LevelError::InvalidSampleRate` or
/// `LevelError::InvalidTimeConstant` for contract violations, and
/// `LevelError::InvalidPower` if the signal contains NaN. The function either
/// returns a fully computed result or fails before producing output.
///
/// # Example
///
/// ```rust
/// use math_audio_spl::{compute_level, FAST};
/// use ndarray::Array1;
/// use std::f64::consts::PI;
///
/// let fs = 4000.0;
/// let signal = Array1::from_shape_fn(12000, |i| (2.0 * PI * 400.0 * i as f64 / fs).sin());
/// let (times, levels) = compute_level(&signal, fs, FAST).unwrap();
///
/// assert_eq!(times.len(), levels.len());
/// // mean square of a unit sine is 0.5 -> 10*log10(0.5/(2e-5)^2) ~ 91 dB
/// assert!((levels[levels.len() - 1] - 91.0).abs() < 0.1);
/// ```
pub fn compute_level(
    signal: &Array1<f64>,
    sample_rate: f64,
    time_constant: f64,
) -> Result<(Array1<f64>, Array1<f64>)> {
    validate_params(sample_rate, time_constant)?;
    if signal.is_empty() {
        return Err(LevelError::EmptySignal);
    }

    let power = signal.mapv(|x| x * x);
    let mean_square = integrate(&power, sample_rate, time_constant)?;

    let levels = mean_square.mapv(mean_square_to_level);
    let times = Array1::from_shape_fn(signal.len(), |i| i as f64 / sample_rate);
    Ok((times, levels))
}

/// FAST (125 ms) time-weighted level of a pressure signal.
///
/// Convenience wrapper over [`compute_level`] with the [`FAST`] constant.
pub fn fast_level(signal: &Array1<f64>, sample_rate: f64) -> Result<(Array1<f64>, Array1<f64>)> {
    compute_level(signal, sample_rate, FAST)
}

/// SLOW (1 s) time-weighted level of a pressure signal.
///
/// Convenience wrapper over [`compute_level`] with the [`SLOW`] constant.
pub fn slow_level(signal: &Array1<f64>, sample_rate: f64) -> Result<(Array1<f64>, Array1<f64>)> {
    compute_level(signal, sample_rate, SLOW)
}

/// Time-weighted level with the constant taken from a [`TimeWeighting`].
pub fn weighted_level(
    signal: &Array1<f64>,
    sample_rate: f64,
    weighting: TimeWeighting,
) -> Result<(Array1<f64>, Array1<f64>)> {
    compute_level(signal, sample_rate, weighting.time_constant())
}

/// Streaming time-weighted level meter.
///
/// Wraps one [`ExponentialIntegrator`] and produces a level in dB re 20 µPa
/// per pressure sample. Feeding the same samples through
/// [`process`](Self::process) gives bit-identical levels to
/// [`compute_level`] over the whole signal. The carried mean-square state is
/// explicit and caller-owned, so independent streams never share it.
///
/// # Example
///
/// ```rust
/// use math_audio_spl::{LevelMeter, TimeWeighting};
///
/// let mut meter = LevelMeter::new(48000.0, TimeWeighting::Fast).unwrap();
/// let level = meter.process(0.02); // one pressure sample, in pascals
/// assert!(level.is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct LevelMeter {
    integrator: ExponentialIntegrator,
    weighting: TimeWeighting,
}

impl LevelMeter {
    /// Creates a meter for the given sample rate and time weighting, starting
    /// from rest.
    ///
    /// # Errors
    ///
    /// Same validation as [`ExponentialIntegrator::new`].
    pub fn new(sample_rate: f64, weighting: TimeWeighting) -> Result<Self> {
        let integrator = ExponentialIntegrator::new(sample_rate, weighting.time_constant())?;
        Ok(LevelMeter {
            integrator,
            weighting,
        })
    }

    /// Processes one pressure sample (pascals) and returns the current
    /// time-weighted level in dB re 20 µPa.
    pub fn process(&mut self, pressure: f64) -> f64 {
        mean_square_to_level(self.integrator.process(pressure * pressure))
    }

    /// The time weighting this meter was built with.
    pub fn weighting(&self) -> TimeWeighting {
        self.weighting
    }

    /// The carried mean-square state (the `y[-1]` of the next sample).
    pub fn state(&self) -> f64 {
        self.integrator.state()
    }

    /// Restores a previously saved mean-square state.
    pub fn set_state(&mut self, state: f64) {
        self.integrator.set_state(state);
    }

    /// Resets the meter to rest.
    pub fn reset(&mut self) {
        self.integrator.reset();
    }
}

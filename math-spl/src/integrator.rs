//! First-order exponential integrator for instantaneous power signals.
//!
//! This is the numerical core of time weighting: a single-pole low-pass
//! filter applied to squared pressure, approximating the continuous-time ODE
//! `dy/dt = (p(t) - y(t)) / tau`. The discrete recurrence is
//!
//! ```text
//! y[i] = y[i-1] + alpha * (p[i] - y[i-1])
//! alpha = 1 - exp(-dt / tau)
//! ```
//!
//! The coefficient uses the exact exponential mapping rather than the Euler
//! approximation `dt/tau`, so the decay over one sample period matches the
//! continuous filter at any sample rate.
//!
//! The filter starts from rest (`y[-1] = 0`), so the first several time
//! constants of output sit below the steady-state value. Callers that need
//! standards-accurate levels must discard that transient region.

use ndarray::Array1;

use crate::error::{LevelError, Result};

/// Checks sample rate and time constant, shared by all entry points.
pub(crate) fn validate_params(sample_rate: f64, time_constant: f64) -> Result<()> {
    if !(sample_rate > 0.0) || !sample_rate.is_finite() {
        return Err(LevelError::InvalidSampleRate { sample_rate });
    }
    if !(time_constant > 0.0) || !time_constant.is_finite() {
        return Err(LevelError::InvalidTimeConstant { time_constant });
    }
    Ok(())
}

fn smoothing_coefficient(sample_rate: f64, time_constant: f64) -> f64 {
    1.0 - (-1.0 / (sample_rate * time_constant)).exp()
}

/// Streaming first-order exponential integrator.
///
/// Holds the smoothing coefficient and the carried filter state. The state is
/// caller-owned and explicit: each stream gets its own integrator, and the
/// state can be read back or restored, so concurrent streams never share it.
///
/// Processing a block sample-by-sample through [`process`](Self::process) is
/// bit-identical to the vectorized [`integrate`] over the same samples.
///
/// # Example
///
/// ```rust
/// use math_audio_spl::{ExponentialIntegrator, FAST};
///
/// let mut integrator = ExponentialIntegrator::new(48000.0, FAST).unwrap();
/// let y = integrator.process(1.0);
/// assert!(y > 0.0 && y < 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct ExponentialIntegrator {
    alpha: f64,
    state: f64,
}

impl ExponentialIntegrator {
    /// Creates an integrator for the given sample rate (Hz) and time
    /// constant (seconds), starting from rest.
    ///
    /// # Errors
    ///
    /// Returns `LevelError::InvalidSampleRate` if the sample rate is not
    /// positive and finite, and `LevelError::InvalidTimeConstant` likewise
    /// for the time constant.
    pub fn new(sample_rate: f64, time_constant: f64) -> Result<Self> {
        validate_params(sample_rate, time_constant)?;
        Ok(ExponentialIntegrator {
            alpha: smoothing_coefficient(sample_rate, time_constant),
            state: 0.0,
        })
    }

    /// The smoothing coefficient `alpha = 1 - exp(-1 / (fs * tau))`.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Processes one instantaneous power sample and returns the updated
    /// running mean.
    ///
    /// The input is expected to be non-negative (a squared pressure); this
    /// hot path does not validate. Use [`integrate`] for a checked
    /// whole-array variant.
    pub fn process(&mut self, power: f64) -> f64 {
        self.state += self.alpha * (power - self.state);
        self.state
    }

    /// Processes a block of power samples in place.
    pub fn process_block(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// The carried filter state (the last output, `y[-1]` for the next call).
    pub fn state(&self) -> f64 {
        self.state
    }

    /// Restores a previously saved filter state.
    pub fn set_state(&mut self, state: f64) {
        self.state = state;
    }

    /// Resets the filter to rest.
    pub fn reset(&mut self) {
        self.state = 0.0;
    }
}

/// Applies the exponential integrator to a whole power signal.
///
/// Returns the running exponential mean of `power`, same length as the
/// input, starting from rest. This is the vectorized counterpart of
/// [`ExponentialIntegrator`]; the recurrence is inherently sequential, so it
/// is implemented as a tight loop rather than parallelized.
///
/// # Arguments
///
/// * `power` - Instantaneous power samples (non-negative, e.g. squared pressure)
/// * `sample_rate` - Sample rate in Hz (> 0)
/// * `time_constant` - Averaging time constant in seconds (> 0)
///
/// # Errors
///
/// Returns `LevelError::EmptySignal` for an empty input,
/// `LevelError::InvalidSampleRate` / `LevelError::InvalidTimeConstant` for
/// bad parameters, and `LevelError::InvalidPower` if any sample is negative
/// or NaN. Errors are raised before any computation begins.
pub fn integrate(power: &Array1<f64>, sample_rate: f64, time_constant: f64) -> Result<Array1<f64>> {
    validate_params(sample_rate, time_constant)?;
    if power.is_empty() {
        return Err(LevelError::EmptySignal);
    }
    for (index, &value) in power.iter().enumerate() {
        // `!(value >= 0.0)` also catches NaN
        if !(value >= 0.0) {
            return Err(LevelError::InvalidPower { index, value });
        }
    }

    let alpha = smoothing_coefficient(sample_rate, time_constant);
    let mut output = Array1::zeros(power.len());
    let mut state = 0.0;
    for (y, &p) in output.iter_mut().zip(power.iter()) {
        state += alpha * (p - state);
        *y = state;
    }
    Ok(output)
}

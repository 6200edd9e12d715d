//! Conformance tests against the analytically known levels of IEC 61672-1.
//!
//! A sinusoid of amplitude A has mean square A²/2, so its settled
//! time-weighted level is 10·log10((A²/2) / (2e-5)²) independent of
//! frequency. A unit-amplitude sine is therefore ~91 dB re 20 µPa. The
//! integrator starts from rest, so each check discards the transient region
//! (several time constants) before averaging.

use math_audio_spl::{
    FAST, LevelMeter, SLOW, TimeWeighting, compute_level, fast_level, slow_level,
};
use ndarray::Array1;
use std::f64::consts::PI;

fn sine(frequency: f64, amplitude: f64, sample_rate: f64, duration: f64) -> Array1<f64> {
    let samples = (duration * sample_rate) as usize;
    Array1::from_shape_fn(samples, |i| {
        amplitude * (2.0 * PI * frequency * i as f64 / sample_rate).sin()
    })
}

/// Mean of the level trace after discarding the first `settle` seconds.
fn tail_mean(levels: &Array1<f64>, sample_rate: f64, settle: f64) -> f64 {
    let skip = (settle * sample_rate) as usize;
    let tail = levels.slice(ndarray::s![skip..]);
    tail.mean().unwrap()
}

#[test]
fn test_fast_level_unit_sine() {
    let fs = 4000.0;
    let signal = sine(400.0, 1.0, fs, 3.0);

    let (times, levels) = fast_level(&signal, fs).unwrap();
    assert_eq!(times.len(), signal.len());
    assert_eq!(levels.len(), signal.len());

    // discard 6 time constants, then the trace has settled to
    // 10*log10(0.5 / (2e-5)^2) = 90.97 dB
    let mean = tail_mean(&levels, fs, 6.0 * FAST);
    assert!((mean - 91.0).abs() < 0.05, "FAST tail mean: {}", mean);
}

#[test]
fn test_fast_level_scaled_sine() {
    let fs = 4000.0;
    let signal = sine(400.0, 4.0, fs, 3.0);

    let (_, levels) = fast_level(&signal, fs).unwrap();
    // 91 + 20*log10(4) = 103 dB
    let mean = tail_mean(&levels, fs, 6.0 * FAST);
    assert!((mean - 103.0).abs() < 0.05, "FAST tail mean: {}", mean);
}

#[test]
fn test_slow_level_unit_sine() {
    let fs = 4000.0;
    let signal = sine(400.0, 1.0, fs, 10.0);

    let (_, levels) = slow_level(&signal, fs).unwrap();
    let mean = tail_mean(&levels, fs, 6.0 * SLOW);
    assert!((mean - 91.0).abs() < 0.05, "SLOW tail mean: {}", mean);
}

#[test]
fn test_slow_level_scaled_sine() {
    let fs = 4000.0;
    let signal = sine(400.0, 4.0, fs, 10.0);

    let (_, levels) = slow_level(&signal, fs).unwrap();
    let mean = tail_mean(&levels, fs, 6.0 * SLOW);
    assert!((mean - 103.0).abs() < 0.05, "SLOW tail mean: {}", mean);
}

#[test]
fn test_settled_level_independent_of_frequency() {
    let fs = 8000.0;
    for f in [100.0, 400.0, 1000.0, 3000.0] {
        let signal = sine(f, 1.0, fs, 3.0);
        let (_, levels) = fast_level(&signal, fs).unwrap();
        let mean = tail_mean(&levels, fs, 6.0 * FAST);
        assert!((mean - 91.0).abs() < 0.05, "f={} Hz: {}", f, mean);
    }
}

#[test]
fn test_length_invariant() {
    let fs = 4000.0;
    for n in [1usize, 2, 17, 1000] {
        let signal = Array1::from_shape_fn(n, |i| (i as f64 * 0.3).sin());
        let (times, levels) = fast_level(&signal, fs).unwrap();
        assert_eq!(times.len(), n);
        assert_eq!(levels.len(), n);
    }
}

#[test]
fn test_monotonic_scaling() {
    let fs = 4000.0;
    let signal = sine(400.0, 1.0, fs, 3.0);
    let (_, base) = fast_level(&signal, fs).unwrap();
    let base_mean = tail_mean(&base, fs, 6.0 * FAST);

    for k in [0.5, 2.0, 10.0, 100.0] {
        let scaled = signal.mapv(|x| k * x);
        let (_, levels) = fast_level(&scaled, fs).unwrap();
        let mean = tail_mean(&levels, fs, 6.0 * FAST);
        let shift = 20.0 * f64::log10(k);
        assert!(
            (mean - base_mean - shift).abs() < 1e-6,
            "k={}: shift {} instead of {}",
            k,
            mean - base_mean,
            shift
        );
    }
}

#[test]
fn test_fast_settles_before_slow() {
    // one second of silence, then a steady tone
    let fs = 4000.0;
    let silence = (fs * 1.0) as usize;
    let tone = sine(400.0, 1.0, fs, 3.0);
    let mut signal = Array1::zeros(silence + tone.len());
    signal.slice_mut(ndarray::s![silence..]).assign(&tone);

    let settled = 10.0 * f64::log10(0.5 / (2.0e-5f64 * 2.0e-5));
    let first_within = |levels: &Array1<f64>| {
        levels
            .iter()
            .position(|&l| l >= settled - 1.0)
            .expect("trace never reached within 1 dB of the settled level")
    };

    let (_, fast) = fast_level(&signal, fs).unwrap();
    let (_, slow) = slow_level(&signal, fs).unwrap();

    assert!(first_within(&fast) < first_within(&slow));
}

#[test]
fn test_zero_signal_boundary() {
    let fs = 4000.0;
    let signal = Array1::zeros(1000);

    let (times, levels) = fast_level(&signal, fs).unwrap();
    assert_eq!(times.len(), 1000);
    for &level in levels.iter() {
        assert!(level.is_infinite() && level.is_sign_negative());
        assert!(!level.is_nan());
    }
}

#[test]
fn test_determinism() {
    let fs = 4000.0;
    let signal = sine(400.0, 0.7, fs, 1.0);

    let (t1, l1) = compute_level(&signal, fs, FAST).unwrap();
    let (t2, l2) = compute_level(&signal, fs, FAST).unwrap();
    assert_eq!(t1, t2);
    assert_eq!(l1, l2);
}

#[test]
fn test_streaming_meter_matches_vectorized() {
    let fs = 4000.0;
    let signal = sine(400.0, 1.0, fs, 1.0);

    let (_, levels) = fast_level(&signal, fs).unwrap();

    let mut meter = LevelMeter::new(fs, TimeWeighting::Fast).unwrap();
    for (i, &x) in signal.iter().enumerate() {
        assert_eq!(meter.process(x), levels[i], "diverged at sample {}", i);
    }
}

//! Example computing FAST and SLOW level traces of a calibration-style tone.

use math_audio_spl::{REFERENCE_PRESSURE, fast_level, slow_level};
use ndarray::Array1;
use std::f64::consts::PI;

fn main() {
    let fs = 8000.0;
    let f = 1000.0;
    let duration = 8.0;

    // 1 kHz tone at 94 dB SPL (1 Pa RMS), the usual calibrator level
    let amplitude = std::f64::consts::SQRT_2;
    let samples = (duration * fs) as usize;
    let signal =
        Array1::from_shape_fn(samples, |i| amplitude * (2.0 * PI * f * i as f64 / fs).sin());

    println!("math-audio-spl - sine level example");
    println!("===================================");
    println!("tone: {} Hz, {:.3} Pa peak, reference {} Pa", f, amplitude, REFERENCE_PRESSURE);

    let (times, fast) = fast_level(&signal, fs).unwrap();
    let (_, slow) = slow_level(&signal, fs).unwrap();

    println!("\n   time      L_F        L_S");
    for &t in &[0.05, 0.125, 0.25, 0.5, 1.0, 2.0, 4.0, 7.9] {
        let i = (t * fs) as usize;
        println!("  {:5.3} s  {:7.2} dB  {:7.2} dB", times[i], fast[i], slow[i]);
    }

    let last = samples - 1;
    println!("\nsettled: L_F = {:.2} dB, L_S = {:.2} dB (expected 94.0 dB)", fast[last], slow[last]);
}

#![allow(dead_code)]

use num_complex::Complex;
use rustfft::FftPlanner;

/// Magnitude spectrum of `samples` as (frequency, magnitude) pairs, positive
/// frequencies only
pub fn analyze_spectrum(samples: &[f32], sample_rate: u32) -> Vec<(f32, f32)> {
    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(samples.len());

    let mut buffer: Vec<Complex<f32>> = samples
        .iter()
        .map(|&s| Complex { re: s, im: 0.0 })
        .collect();

    fft.process(&mut buffer);

    let bin_width = sample_rate as f32 / samples.len() as f32;

    buffer
        .iter()
        .take(buffer.len() / 2)
        .enumerate()
        .map(|(i, c)| (i as f32 * bin_width, c.norm()))
        .collect()
}

/// Frequency of the strongest bin
pub fn peak_frequency(spectrum: &[(f32, f32)]) -> f32 {
    spectrum
        .iter()
        .fold((0.0f32, 0.0f32), |best, &(freq, mag)| {
            if mag > best.1 {
                (freq, mag)
            } else {
                best
            }
        })
        .0
}

/// Sum of squared magnitudes inside `low..high` Hz
pub fn band_energy(spectrum: &[(f32, f32)], low: f32, high: f32) -> f32 {
    spectrum
        .iter()
        .filter(|(freq, _)| *freq >= low && *freq < high)
        .map(|(_, mag)| mag * mag)
        .sum()
}

/// Apply a Hann window so the unfinished cycle at the end of a buffer does
/// not leak across the spectrum
pub fn hann(samples: &[f32]) -> Vec<f32> {
    let last = (samples.len() - 1) as f32;
    samples
        .iter()
        .enumerate()
        .map(|(i, s)| s * 0.5 * (1.0 - (std::f32::consts::TAU * i as f32 / last).cos()))
        .collect()
}

//! Test data generation utilities.
//!
//! Small, deterministic curves and samples with known shapes.

#![allow(dead_code)]

use std::f64::consts::PI;

/// `n` evenly spaced values from `start` to `end`, both included
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// A sine wave over one period with the given phase shift
pub fn sine_wave(n: usize, phase: f64) -> (Vec<f64>, Vec<f64>) {
    let x = linspace(0.0, 2.0 * PI, n);
    let y = x.iter().map(|v| (v + phase).sin()).collect();
    (x, y)
}

/// A family of `count` sine waves with evenly spread phases
pub fn sine_family(count: usize, n: usize) -> Vec<(Vec<f64>, Vec<f64>)> {
    (0..count)
        .map(|i| sine_wave(n, i as f64 * PI / count.max(1) as f64))
        .collect()
}

/// Values with a triangular distribution over `[0, 10]`
pub fn triangular_samples() -> Vec<f64> {
    let mut samples = Vec::new();
    for i in 0..10 {
        let copies = if i < 5 { i + 1 } else { 10 - i };
        samples.extend(std::iter::repeat(i as f64 + 0.5).take(copies));
    }
    samples
}

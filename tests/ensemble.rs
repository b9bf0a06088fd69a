//! Ensemble statistics: any single trajectory is classical-looking, but the
//! detection histogram over thousands of particles must reproduce two-slit
//! fringe statistics — and lose them when the observer is switched on.

mod common;

use std::f64::consts::TAU;

use common::{high_rate_config, run_until_detections};
use duality_sim::{DualitySim, Geometry, ObserverMode};

const NUM_BINS: usize = 40;
const DETECTIONS: usize = 6_000;
const MAX_TICKS: u64 = 80_000;

// ---------------------------------------------------------------------------
// Statistics helpers
// ---------------------------------------------------------------------------

/// Centered moving average with edges clamped to the available samples.
fn moving_average(values: &[f64], radius: usize) -> Vec<f64> {
    (0..values.len())
        .map(|i| {
            let lo = i.saturating_sub(radius);
            let hi = (i + radius).min(values.len() - 1);
            let window = &values[lo..=hi];
            window.iter().sum::<f64>() / window.len() as f64
        })
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn variance(values: &[f64]) -> f64 {
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let (ma, mb) = (mean(a), mean(b));
    let mut cov = 0.0;
    let mut va = 0.0;
    let mut vb = 0.0;
    for (x, y) in a.iter().zip(b) {
        cov += (x - ma) * (y - mb);
        va += (x - ma).powi(2);
        vb += (y - mb).powi(2);
    }
    if va == 0.0 || vb == 0.0 {
        return 0.0;
    }
    cov / (va.sqrt() * vb.sqrt())
}

/// Indices of histogram bins whose centers fall within `[lo, hi]`.
fn window_bins(bin_height: f64, lo: f64, hi: f64) -> Vec<usize> {
    (0..NUM_BINS)
        .filter(|&i| {
            let center = (i as f64 + 0.5) * bin_height;
            (lo..=hi).contains(&center)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Fringe convergence without an observer
// ---------------------------------------------------------------------------

/// The steering term fixes the fringe *spacing* to the configured
/// wavelength; the absolute offset of the pattern depends on the steering
/// gain and tick rate, so the template's phase is fitted by scanning rather
/// than assumed.
#[test]
fn unobserved_histogram_carries_wavelength_periodic_fringes() {
    let config = high_rate_config();
    let geometry = Geometry::from_config(&config);
    let wavelength = config.wavelength;
    let screen_x = config.screen_x;
    let bin_height = config.height / NUM_BINS as f64;

    let mut sim = DualitySim::with_seed(config, 1234).unwrap();
    run_until_detections(&mut sim, DETECTIONS, MAX_TICKS);

    let counts: Vec<f64> = sim
        .histogram(NUM_BINS)
        .counts
        .iter()
        .map(|&c| f64::from(c))
        .collect();

    // Remove the broad envelope: the averaging window spans one full fringe
    // period, so the periodic component cancels out of the baseline and
    // survives in the residual.
    let baseline = moving_average(&counts, 7);
    let bins = window_bins(bin_height, 80.0, 390.0);
    let residual: Vec<f64> = bins.iter().map(|&i| counts[i] - baseline[i]).collect();
    let phases: Vec<f64> = bins
        .iter()
        .map(|&i| {
            let y = (i as f64 + 0.5) * bin_height;
            geometry.path_difference(screen_x, y) / wavelength * TAU
        })
        .collect();

    let mut best = f64::MIN;
    for step in 0..32 {
        let shift = TAU * step as f64 / 32.0;
        let template: Vec<f64> = phases.iter().map(|p| (p + shift).cos()).collect();
        best = best.max(pearson(&residual, &template));
    }

    assert!(
        best > 0.6,
        "histogram should correlate with the two-slit intensity pattern at \
         some phase offset; best correlation {best:.3}"
    );
}

// ---------------------------------------------------------------------------
// Observer effect
// ---------------------------------------------------------------------------

#[test]
fn observation_flattens_the_detection_pattern() {
    let config = high_rate_config();
    let bin_height = config.height / NUM_BINS as f64;

    let mut unobserved = DualitySim::with_seed(config.clone(), 21).unwrap();
    let mut observed = DualitySim::with_seed(config, 22).unwrap();
    observed.set_mode(ObserverMode::Observing);

    run_until_detections(&mut unobserved, DETECTIONS, MAX_TICKS);
    run_until_detections(&mut observed, DETECTIONS, MAX_TICKS);

    // Compare over the central window both modes populate; empty edge bins
    // would otherwise dominate both variances.
    let bins = window_bins(bin_height, 150.0, 350.0);
    let central = |sim: &DualitySim| -> Vec<f64> {
        let hist = sim.histogram(NUM_BINS);
        bins.iter().map(|&i| f64::from(hist.counts[i])).collect()
    };

    let var_unobserved = variance(&central(&unobserved));
    let var_observed = variance(&central(&observed));
    let ratio = var_unobserved / var_observed;

    assert!(
        ratio > 2.0,
        "interference banding should make the unobserved histogram far less \
         flat than the observed one; variance ratio {ratio:.2} \
         (unobserved {var_unobserved:.1}, observed {var_observed:.1})"
    );
}

#[test]
fn both_modes_detect_at_comparable_rates() {
    let config = high_rate_config();
    let mut unobserved = DualitySim::with_seed(config.clone(), 31).unwrap();
    let mut observed = DualitySim::with_seed(config, 32).unwrap();
    observed.set_mode(ObserverMode::Observing);

    for _ in 0..5_000 {
        unobserved.tick();
        observed.tick();
    }

    let (u, o) = (
        unobserved.counters().detected as f64,
        observed.counters().detected as f64,
    );
    assert!(u > 500.0 && o > 500.0, "both modes should detect steadily: {u} vs {o}");
    // The observer changes the pattern's shape, not the throughput.
    let ratio = u.max(o) / u.min(o);
    assert!(
        ratio < 1.5,
        "detection throughput should be mode-independent, got {u} vs {o}"
    );
}

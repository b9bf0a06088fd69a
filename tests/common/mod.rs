use duality_sim::{DualitySim, SimulationConfig};

/// High-throughput configuration for statistics-heavy tests: emit every
/// tick, cover both apertures with the spawn band, and keep a deep
/// detection history.
pub fn high_rate_config() -> SimulationConfig {
    SimulationConfig {
        emission_probability: 1.0,
        emission_spread: 80.0,
        max_detections: 10_000,
        ..SimulationConfig::default()
    }
}

/// Tick until the retained detection history reaches `target` entries,
/// panicking if `max_ticks` is not enough.
pub fn run_until_detections(sim: &mut DualitySim, target: usize, max_ticks: u64) {
    for _ in 0..max_ticks {
        if sim.detection_count() >= target {
            return;
        }
        sim.tick();
    }
    panic!(
        "needed {target} detections within {max_ticks} ticks, got {}",
        sim.detection_count()
    );
}

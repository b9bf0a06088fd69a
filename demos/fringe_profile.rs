//! Run the duality engine headless in both observer modes and print the
//! resulting detection histograms as ASCII bars.
//!
//! ```sh
//! cargo run --example fringe_profile
//! ```

use duality_sim::{DualitySim, ObserverMode, SimulationConfig};

const NUM_BINS: usize = 40;
const TARGET_DETECTIONS: usize = 4_000;
const TICK_BUDGET: u64 = 60_000;

fn main() {
    let config = SimulationConfig {
        emission_probability: 1.0,
        emission_spread: 80.0,
        max_detections: TARGET_DETECTIONS,
        ..SimulationConfig::default()
    };

    for mode in [ObserverMode::NotObserving, ObserverMode::Observing] {
        let mut sim = DualitySim::with_seed(config.clone(), 42).expect("default-derived config");
        sim.set_mode(mode);

        for _ in 0..TICK_BUDGET {
            if sim.detection_count() >= TARGET_DETECTIONS {
                break;
            }
            sim.tick();
        }

        println!(
            "\n{mode:?} — {} detections over {} ticks",
            sim.detection_count(),
            sim.tick_count()
        );
        print_histogram(&sim, config.height);
    }
}

fn print_histogram(sim: &DualitySim, height: f64) {
    let hist = sim.histogram(NUM_BINS);
    let bin_height = height / NUM_BINS as f64;
    for (i, &count) in hist.counts.iter().enumerate() {
        let y = i as f64 * bin_height;
        let width = if hist.max_count == 0 {
            0
        } else {
            (u64::from(count) * 60 / u64::from(hist.max_count)) as usize
        };
        println!("y {y:>5.0} | {:<60} {count}", "#".repeat(width));
    }
}

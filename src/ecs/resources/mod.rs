pub mod detections;
pub mod sim_resources;

pub use detections::{Detection, DetectionLog, Histogram};
pub use sim_resources::{
    EmissionRng, ObserverMode, SimCounters, SimRng, TransitRng, distribute_rng,
};

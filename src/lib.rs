pub mod config;
pub mod ecs;
pub mod engine;
pub mod geometry;

pub use config::{ConfigError, SimulationConfig};
pub use ecs::components::Behavior;
pub use ecs::resources::{Detection, DetectionLog, Histogram, ObserverMode, SimCounters};
pub use engine::{DualitySim, ParticleView};
pub use geometry::{Geometry, SlitId};

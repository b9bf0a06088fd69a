pub mod app;
pub mod clock;
pub mod components;
pub mod resources;
pub mod schedule;
pub mod systems;
pub mod test_helpers;

pub use app::{build_base_app, build_sim_app};
pub use clock::SimClock;
pub use components::{Behavior, Particle, PassedSlit, Position, Velocity};
pub use resources::{
    Detection, DetectionLog, EmissionRng, Histogram, ObserverMode, SimCounters, SimRng, TransitRng,
};
pub use schedule::{DomainSet, SimPhase, SimTick, configure_sim_schedule};

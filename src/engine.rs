use bevy_app::App;
use bevy_ecs::query::With;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, SimulationConfig};
use crate::ecs::app::build_sim_app;
use crate::ecs::clock::SimClock;
use crate::ecs::components::{Behavior, Particle, PassedSlit, Position};
use crate::ecs::resources::{Detection, DetectionLog, Histogram, ObserverMode, SimCounters};
use crate::ecs::schedule::SimTick;
use crate::geometry::SlitId;

/// Snapshot of one live particle, handed to the rendering host after each
/// tick. `slit` is `None` until the particle has cleared the barrier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleView {
    pub x: f64,
    pub y: f64,
    pub behavior: Behavior,
    pub slit: Option<SlitId>,
}

/// The particle/wave duality simulation engine.
///
/// Owns a headless ECS world and advances it one tick per [`tick`] call;
/// the host drives ticking (typically once per display refresh) and draws
/// from the returned snapshots. Instances are fully independent — each one
/// carries its own observer mode, RNG streams, and detection history — so
/// several simulations can run side by side.
///
/// External mutations (`set_mode`, `reset_detections`) take `&mut self` and
/// therefore can never interleave with an in-progress tick.
///
/// [`tick`]: DualitySim::tick
pub struct DualitySim {
    app: App,
}

impl DualitySim {
    /// Build an engine from a validated configuration with the default seed.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        Self::with_seed(config, 0)
    }

    /// Build an engine whose random streams (emission timing, spawn jitter,
    /// slit choices) are reproducible from `seed`.
    pub fn with_seed(config: SimulationConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            app: build_sim_app(config, seed),
        })
    }

    /// Advance the simulation by one step and return the live particles for
    /// drawing. Detections are queried separately.
    pub fn tick(&mut self) -> Vec<ParticleView> {
        self.app.world_mut().run_schedule(SimTick);
        self.particles()
    }

    /// Current live particles without advancing the simulation.
    pub fn particles(&mut self) -> Vec<ParticleView> {
        let world = self.app.world_mut();
        let mut query =
            world.query_filtered::<(&Position, &Behavior, Option<&PassedSlit>), With<Particle>>();
        query
            .iter(world)
            .map(|(pos, behavior, slit)| ParticleView {
                x: pos.x,
                y: pos.y,
                behavior: *behavior,
                slit: slit.map(|s| s.0),
            })
            .collect()
    }

    /// Switch the observer mode. Takes effect for particles spawned from the
    /// next tick on; particles already in flight keep the behavior they were
    /// born with.
    pub fn set_mode(&mut self, mode: ObserverMode) {
        tracing::debug!(?mode, "observer mode changed");
        *self.app.world_mut().resource_mut::<ObserverMode>() = mode;
    }

    pub fn mode(&self) -> ObserverMode {
        *self.app.world().resource::<ObserverMode>()
    }

    /// The recorded screen crossings, oldest first.
    pub fn detections(&self) -> Vec<Detection> {
        self.app
            .world()
            .resource::<DetectionLog>()
            .iter()
            .copied()
            .collect()
    }

    pub fn detection_count(&self) -> usize {
        self.app.world().resource::<DetectionLog>().len()
    }

    /// Binned intensity over the screen's y-extent, derived from the current
    /// detection history.
    pub fn histogram(&self, num_bins: usize) -> Histogram {
        self.app.world().resource::<DetectionLog>().histogram(num_bins)
    }

    /// Clear the detection history. Mode, live particles, and counters are
    /// untouched.
    pub fn reset_detections(&mut self) {
        tracing::debug!("detection history reset");
        self.app.world_mut().resource_mut::<DetectionLog>().reset();
    }

    /// Lifecycle totals since construction.
    pub fn counters(&self) -> SimCounters {
        *self.app.world().resource::<SimCounters>()
    }

    pub fn tick_count(&self) -> u64 {
        self.app.world().resource::<SimClock>().tick_count
    }

    pub fn config(&self) -> &SimulationConfig {
        self.app.world().resource::<SimulationConfig>()
    }

    /// The seed this engine's random streams derive from.
    pub fn seed(&self) -> u64 {
        self.app.world().resource::<crate::ecs::resources::SimRng>().seed
    }
}

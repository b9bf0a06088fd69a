use std::hash::{DefaultHasher, Hash, Hasher};

use bevy_ecs::resource::Resource;
use bevy_ecs::world::World;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::ecs::components::Behavior;

/// Global observer toggle. Read exactly once per particle — at spawn —
/// so flipping it mid-flight never tears a particle's behavior.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObserverMode {
    Observing,
    #[default]
    NotObserving,
}

impl ObserverMode {
    /// The behavioral branch a particle spawned under this mode carries for
    /// its whole lifetime.
    pub fn spawn_behavior(self) -> Behavior {
        match self {
            ObserverMode::Observing => Behavior::Classical,
            ObserverMode::NotObserving => Behavior::Wave,
        }
    }
}

/// Root seed for the simulation. Every per-domain RNG stream is re-derived
/// from it each tick, so a run is reproducible from this one value.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SimRng {
    pub seed: u64,
}

// ---------------------------------------------------------------------------
// Per-domain RNG resources
// ---------------------------------------------------------------------------

macro_rules! domain_rng {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Resource)]
        pub struct $name(pub SmallRng);

        impl Default for $name {
            fn default() -> Self {
                Self(SmallRng::seed_from_u64(0))
            }
        }
    };
}

domain_rng!(EmissionRng, "Per-domain RNG for the emission system.");
domain_rng!(
    TransitRng,
    "Per-domain RNG for slit choice and classical diffraction jitter."
);

/// Derive a deterministic per-domain seed from the root seed, domain name,
/// and tick count.
fn derive_domain_seed(seed: u64, domain: &str, tick: u64) -> u64 {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    domain.hash(&mut hasher);
    tick.hash(&mut hasher);
    hasher.finish()
}

/// Exclusive system that re-seeds the per-domain RNGs each tick.
/// Runs in `SimPhase::PreUpdate` before any domain systems, keeping each
/// domain's random stream independent of how much randomness the others
/// consumed.
pub fn distribute_rng(world: &mut World) {
    let seed = world.resource::<SimRng>().seed;
    let tick = world.resource::<crate::ecs::clock::SimClock>().tick_count;

    macro_rules! reseed {
        ($res:ty, $label:expr) => {
            world.resource_mut::<$res>().0 =
                SmallRng::seed_from_u64(derive_domain_seed(seed, $label, tick));
        };
    }

    reseed!(EmissionRng, "emission");
    reseed!(TransitRng, "transit");
}

// ---------------------------------------------------------------------------
// Lifecycle counters
// ---------------------------------------------------------------------------

/// Running totals of particle lifecycle outcomes.
///
/// Absorption and leaving the canvas are normal terminal states, so they
/// are counted here rather than reported as errors. At any tick boundary
/// `emitted == absorbed + detected + out_of_bounds + live`.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimCounters {
    pub emitted: u64,
    pub absorbed: u64,
    pub detected: u64,
    pub out_of_bounds: u64,
}

impl SimCounters {
    /// Total particles that have reached a terminal state.
    pub fn terminated(&self) -> u64 {
        self.absorbed + self.detected + self.out_of_bounds
    }
}

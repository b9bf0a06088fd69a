//! Interference model.
//!
//! One system (`Interference` set): every tick, each wave-behavior particle
//! past the barrier band is steered by the phase of its path-length
//! difference to the two slit centers:
//!
//! ```text
//! phase = (d2 - d1) / wavelength * 2π
//! vy   += cos(phase) * interference_strength
//! ```
//!
//! This is trajectory steering, not amplitude propagation: any single
//! trajectory is classical-looking, and only the ensemble of many detections
//! reproduces the two-slit fringe statistics. The steering is cumulative —
//! applied every tick in flight — so `interference_strength` and
//! `base_speed` jointly set the fringe contrast.

use std::f64::consts::TAU;

use bevy_app::{App, Plugin};
use bevy_ecs::query::With;
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Query, Res};

use crate::config::SimulationConfig;
use crate::ecs::components::{Behavior, Particle, PassedSlit, Position, Velocity};
use crate::ecs::schedule::{DomainSet, SimTick};
use crate::geometry::Geometry;

pub struct InterferencePlugin;

impl Plugin for InterferencePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(SimTick, apply_interference.in_set(DomainSet::Interference));
    }
}

#[allow(clippy::type_complexity)]
fn apply_interference(
    geometry: Res<Geometry>,
    config: Res<SimulationConfig>,
    mut particles: Query<
        (&Position, &mut Velocity, &Behavior),
        (With<Particle>, With<PassedSlit>),
    >,
) {
    for (pos, mut vel, behavior) in particles.iter_mut() {
        if *behavior != Behavior::Wave || !geometry.past_barrier(pos.x) {
            continue;
        }
        let phase = geometry.path_difference(pos.x, pos.y) / config.wavelength * TAU;
        vel.y += phase.cos() * config.interference_strength;
    }
}

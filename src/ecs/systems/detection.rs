//! Detection accumulator systems.
//!
//! Two chained systems (`Detection` set):
//! 1. `record_detections` — particles at or beyond the screen are recorded
//!    as `(screen_x, y)` and removed
//! 2. `cull_out_of_bounds` — particles that drifted off the canvas without
//!    reaching the screen are removed silently
//!
//! Recording runs first: a particle that crosses the screen on the same tick
//! it leaves the canvas still counts as a detection.

use bevy_app::{App, Plugin};
use bevy_ecs::entity::Entity;
use bevy_ecs::query::With;
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Commands, Query, Res, ResMut};

use crate::config::SimulationConfig;
use crate::ecs::components::{Particle, Position};
use crate::ecs::resources::{DetectionLog, SimCounters};
use crate::ecs::schedule::{DomainSet, SimTick};

pub struct DetectionPlugin;

impl Plugin for DetectionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            SimTick,
            (record_detections, cull_out_of_bounds)
                .chain()
                .in_set(DomainSet::Detection),
        );
    }
}

fn record_detections(
    mut commands: Commands,
    config: Res<SimulationConfig>,
    mut log: ResMut<DetectionLog>,
    mut counters: ResMut<SimCounters>,
    particles: Query<(Entity, &Position), With<Particle>>,
) {
    for (entity, pos) in particles.iter() {
        if pos.x >= config.screen_x {
            log.record(pos.y);
            counters.detected += 1;
            commands.entity(entity).despawn();
        }
    }
}

fn cull_out_of_bounds(
    mut commands: Commands,
    config: Res<SimulationConfig>,
    mut counters: ResMut<SimCounters>,
    particles: Query<(Entity, &Position), With<Particle>>,
) {
    for (entity, pos) in particles.iter() {
        if pos.x < 0.0 || pos.x > config.width || pos.y < 0.0 || pos.y > config.height {
            commands.entity(entity).despawn();
            counters.out_of_bounds += 1;
        }
    }
}

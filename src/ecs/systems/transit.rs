//! Transit & collision resolver.
//!
//! Two chained systems (`Transit` set), run every tick:
//! 1. `integrate_motion` — advance every particle by its velocity
//! 2. `resolve_barrier` — slit assignment or absorption at the barrier plane
//!
//! Absorption is a normal terminal outcome, counted and never recorded as a
//! detection. A particle fast enough to clear the whole barrier band in one
//! step is resolved at its first position at or beyond the band, so nothing
//! tunnels through unchecked.

use bevy_app::{App, Plugin};
use bevy_ecs::entity::Entity;
use bevy_ecs::query::{With, Without};
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Commands, Query, Res, ResMut};
use rand::Rng;

use crate::config::SimulationConfig;
use crate::ecs::components::{Behavior, Particle, PassedSlit, Position, Velocity};
use crate::ecs::resources::{SimCounters, TransitRng};
use crate::ecs::schedule::{DomainSet, SimTick};
use crate::geometry::Geometry;

pub struct TransitPlugin;

impl Plugin for TransitPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            SimTick,
            (integrate_motion, resolve_barrier)
                .chain()
                .in_set(DomainSet::Transit),
        );
    }
}

fn integrate_motion(mut particles: Query<(&mut Position, &Velocity), With<Particle>>) {
    for (mut pos, vel) in particles.iter_mut() {
        pos.x += vel.x;
        pos.y += vel.y;
    }
}

#[allow(clippy::type_complexity)]
fn resolve_barrier(
    mut commands: Commands,
    geometry: Res<Geometry>,
    config: Res<SimulationConfig>,
    mut rng: ResMut<TransitRng>,
    mut counters: ResMut<SimCounters>,
    mut particles: Query<
        (Entity, &Position, &mut Velocity, &Behavior),
        (With<Particle>, Without<PassedSlit>),
    >,
) {
    let rng = &mut rng.0;

    for (entity, pos, mut vel, behavior) in particles.iter_mut() {
        if !(geometry.in_barrier_band(pos.x) || geometry.past_barrier(pos.x)) {
            // Still approaching.
            continue;
        }

        if geometry.slit_containing(pos.y).is_none() {
            commands.entity(entity).despawn();
            counters.absorbed += 1;
            continue;
        }

        let slit = match behavior {
            // A classical particle takes the one slit whose aperture it is
            // actually inside: the geometrically nearest center.
            Behavior::Classical => {
                let slit = geometry.nearest_slit(pos.y);
                // Diffraction spread on passage.
                vel.y += rng.random_range(-config.classical_jitter..=config.classical_jitter);
                slit
            }
            // A wave particle passes through "either" slit: the label is a
            // uniform coin flip between the two, modeling indistinguishable
            // paths rather than a position measurement.
            Behavior::Wave => {
                let nearest = geometry.nearest_slit(pos.y);
                if rng.random_bool(0.5) {
                    nearest
                } else {
                    nearest.other()
                }
            }
        };
        commands.entity(entity).insert(PassedSlit(slit));
    }
}

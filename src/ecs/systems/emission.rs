//! Emission policy.
//!
//! One system (`Emission` set): each tick, with probability
//! `emission_probability`, spawn exactly one particle at the emission
//! x-position with a y drawn uniformly from the band centered on the slit
//! midpoint. The particle's behavior is latched from the observer mode here
//! and nowhere else — later mode toggles never reach particles in flight.

use bevy_app::{App, Plugin};
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Commands, Res, ResMut};
use rand::Rng;

use crate::config::SimulationConfig;
use crate::ecs::components::{Particle, Position, Velocity};
use crate::ecs::resources::{EmissionRng, ObserverMode, SimCounters};
use crate::ecs::schedule::{DomainSet, SimTick};
use crate::geometry::Geometry;

pub struct EmissionPlugin;

impl Plugin for EmissionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(SimTick, emit_particles.in_set(DomainSet::Emission));
    }
}

fn emit_particles(
    mut commands: Commands,
    config: Res<SimulationConfig>,
    geometry: Res<Geometry>,
    mode: Res<ObserverMode>,
    mut rng: ResMut<EmissionRng>,
    mut counters: ResMut<SimCounters>,
) {
    let rng = &mut rng.0;
    if !rng.random_bool(config.emission_probability) {
        return;
    }

    let y = geometry.midpoint_y()
        + rng.random_range(-config.emission_spread..=config.emission_spread);
    commands.spawn((
        Particle,
        Position {
            x: config.emission_x,
            y,
        },
        Velocity {
            x: config.base_speed,
            y: 0.0,
        },
        mode.spawn_behavior(),
    ));
    counters.emitted += 1;
}

#[cfg(test)]
mod tests {
    use bevy_ecs::query::With;

    use super::*;
    use crate::ecs::app::build_base_app;
    use crate::ecs::components::{Behavior, PassedSlit};
    use crate::ecs::test_helpers::tick_n;

    fn setup_app(config: SimulationConfig) -> App {
        let mut app = build_base_app(config, 42);
        app.add_plugins(EmissionPlugin);
        app
    }

    fn always_emit() -> SimulationConfig {
        SimulationConfig {
            emission_probability: 1.0,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn emits_one_particle_per_tick_at_probability_one() {
        let mut app = setup_app(always_emit());
        tick_n(&mut app, 10);

        let count = app
            .world_mut()
            .query_filtered::<(), With<Particle>>()
            .iter(app.world())
            .count();
        assert_eq!(count, 10);
        assert_eq!(app.world().resource::<SimCounters>().emitted, 10);
    }

    #[test]
    fn never_emits_at_probability_zero() {
        let mut app = setup_app(SimulationConfig {
            emission_probability: 0.0,
            ..SimulationConfig::default()
        });
        tick_n(&mut app, 50);

        assert_eq!(app.world().resource::<SimCounters>().emitted, 0);
    }

    #[test]
    fn emission_rate_tracks_probability() {
        let mut app = setup_app(SimulationConfig {
            emission_probability: 0.5,
            ..SimulationConfig::default()
        });
        tick_n(&mut app, 200);

        let emitted = app.world().resource::<SimCounters>().emitted;
        assert!(
            (40..=160).contains(&emitted),
            "expected roughly half of 200 ticks to emit, got {emitted}"
        );
    }

    #[test]
    fn spawn_band_and_velocity_respected() {
        let config = always_emit();
        let mid = (config.slit1_y + config.slit2_y) / 2.0;
        let spread = config.emission_spread;
        let speed = config.base_speed;
        let mut app = setup_app(config);
        tick_n(&mut app, 20);

        let world = app.world_mut();
        let mut query = world.query_filtered::<(&Position, &Velocity), With<Particle>>();
        for (pos, vel) in query.iter(world) {
            assert!(
                (mid - spread..=mid + spread).contains(&pos.y),
                "spawn y {} outside band around {mid}",
                pos.y
            );
            assert_eq!(vel.x, speed);
            assert_eq!(vel.y, 0.0);
        }
    }

    #[test]
    fn behavior_latched_from_current_mode() {
        let mut app = setup_app(always_emit());
        tick_n(&mut app, 1);
        *app.world_mut().resource_mut::<ObserverMode>() = ObserverMode::Observing;
        tick_n(&mut app, 1);

        let world = app.world_mut();
        let mut query = world.query_filtered::<&Behavior, With<Particle>>();
        let behaviors: Vec<Behavior> = query.iter(world).copied().collect();
        assert_eq!(behaviors.len(), 2);
        assert!(behaviors.contains(&Behavior::Wave));
        assert!(behaviors.contains(&Behavior::Classical));
    }

    #[test]
    fn spawned_particles_have_no_assigned_slit() {
        let mut app = setup_app(always_emit());
        tick_n(&mut app, 5);

        let world = app.world_mut();
        let count = world
            .query_filtered::<(), (With<Particle>, With<PassedSlit>)>()
            .iter(world)
            .count();
        assert_eq!(count, 0);
    }

    #[test]
    fn same_seed_reproduces_spawn_positions() {
        let mut a = setup_app(always_emit());
        let mut b = setup_app(always_emit());
        tick_n(&mut a, 30);
        tick_n(&mut b, 30);

        let collect = |app: &mut App| -> Vec<f64> {
            let world = app.world_mut();
            let mut query = world.query_filtered::<&Position, With<Particle>>();
            let mut ys: Vec<f64> = query.iter(world).map(|p| p.y).collect();
            ys.sort_by(f64::total_cmp);
            ys
        };
        assert_eq!(collect(&mut a), collect(&mut b));
    }
}

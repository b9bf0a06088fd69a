use bevy_app::App;
use bevy_ecs::schedule::IntoScheduleConfigs;

use crate::config::SimulationConfig;
use crate::ecs::clock::SimClock;
use crate::ecs::resources::{
    DetectionLog, EmissionRng, ObserverMode, SimCounters, SimRng, TransitRng, distribute_rng,
};
use crate::ecs::schedule::{SimPhase, configure_sim_schedule};
use crate::ecs::systems::{DetectionPlugin, EmissionPlugin, InterferencePlugin, TransitPlugin};
use crate::geometry::Geometry;

/// Build a headless Bevy app with the tick schedule and core resources but
/// no domain systems. Unit tests add a single plugin to exercise one domain
/// in isolation.
///
/// Callers are expected to pass a validated config; [`crate::DualitySim`]
/// enforces that at its boundary.
pub fn build_base_app(config: SimulationConfig, seed: u64) -> App {
    let mut app = App::empty();

    app.insert_resource(SimClock::new());
    app.insert_resource(ObserverMode::default());
    app.insert_resource(SimCounters::default());
    app.insert_resource(Geometry::from_config(&config));
    app.insert_resource(DetectionLog::new(
        config.screen_x,
        config.height,
        config.max_detections,
    ));
    app.insert_resource(SimRng { seed });
    app.init_resource::<EmissionRng>();
    app.init_resource::<TransitRng>();
    app.insert_resource(config);

    let mut schedule = configure_sim_schedule();
    schedule.add_systems(distribute_rng.in_set(SimPhase::PreUpdate));
    app.add_schedule(schedule);
    app
}

/// Build the complete simulation app: base resources plus every domain
/// plugin, in data-flow order.
///
/// Manual tick control:
/// ```no_run
/// # use duality_sim::config::SimulationConfig;
/// # use duality_sim::ecs::app::build_sim_app;
/// # use duality_sim::ecs::schedule::SimTick;
/// let mut app = build_sim_app(SimulationConfig::default(), 42);
/// for _ in 0..10_000 {
///     app.world_mut().run_schedule(SimTick);
/// }
/// ```
pub fn build_sim_app(config: SimulationConfig, seed: u64) -> App {
    let mut app = build_base_app(config, seed);
    app.add_plugins((
        EmissionPlugin,
        TransitPlugin,
        InterferencePlugin,
        DetectionPlugin,
    ));
    app
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::schedule::SimTick;
    use crate::ecs::test_helpers::{live_particle_count, tick_n};

    #[test]
    fn app_builds_without_panic() {
        let _app = build_sim_app(SimulationConfig::default(), 42);
    }

    #[test]
    fn single_tick_advances_clock() {
        let mut app = build_sim_app(SimulationConfig::default(), 42);
        app.world_mut().run_schedule(SimTick);
        assert_eq!(app.world().resource::<SimClock>().tick_count, 1);
    }

    #[test]
    fn base_app_ticks_with_no_systems_registered() {
        let mut app = build_base_app(SimulationConfig::default(), 42);
        tick_n(&mut app, 100);
        assert_eq!(app.world().resource::<SimClock>().tick_count, 100);
        assert_eq!(live_particle_count(&mut app), 0);
    }

    #[test]
    fn full_app_produces_detections_eventually() {
        let mut app = build_sim_app(
            SimulationConfig {
                emission_probability: 1.0,
                ..SimulationConfig::default()
            },
            42,
        );
        tick_n(&mut app, 2_000);
        assert!(
            !app.world().resource::<DetectionLog>().is_empty(),
            "2000 ticks at emission probability 1.0 should reach the screen"
        );
    }

    #[test]
    fn counters_reconcile_with_live_population() {
        let mut app = build_sim_app(
            SimulationConfig {
                emission_probability: 1.0,
                ..SimulationConfig::default()
            },
            7,
        );
        tick_n(&mut app, 1_500);

        let live = live_particle_count(&mut app) as u64;
        let counters = *app.world().resource::<SimCounters>();
        assert_eq!(
            counters.emitted,
            counters.terminated() + live,
            "every emitted particle is live or terminated: {counters:?}, live {live}"
        );
    }
}

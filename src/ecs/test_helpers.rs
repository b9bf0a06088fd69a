use bevy_app::App;
use bevy_ecs::query::With;

use crate::ecs::components::Particle;
use crate::ecs::schedule::SimTick;

/// Run the simulation schedule `n` times.
pub fn tick_n(app: &mut App, n: u64) {
    for _ in 0..n {
        app.world_mut().run_schedule(SimTick);
    }
}

/// Number of particles currently in flight.
pub fn live_particle_count(app: &mut App) -> usize {
    let world = app.world_mut();
    world
        .query_filtered::<(), With<Particle>>()
        .iter(world)
        .count()
}

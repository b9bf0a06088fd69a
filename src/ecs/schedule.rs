use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs, Schedule, ScheduleLabel, SystemSet};

use super::clock::advance_clock;

/// Schedule label for the main simulation tick.
/// Run manually each tick via `app.world_mut().run_schedule(SimTick)`.
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimTick;

/// Ordered phases within each simulation tick.
///
/// Systems are assigned to phases via `.in_set(SimPhase::Update)` etc.
/// Phases run in declaration order: PreUpdate < Update < Last.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimPhase {
    PreUpdate,
    Update,
    Last,
}

/// Per-domain system sets within `SimPhase::Update`, chained in data-flow
/// order:
///
/// ```text
/// Emission → Transit → Interference → Detection
/// ```
///
/// A particle spawned this tick is advanced this tick; a particle that
/// clears the barrier is steered before the screen check sees it.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum DomainSet {
    Emission,
    Transit,
    Interference,
    Detection,
}

fn configure_domain_ordering(schedule: &mut Schedule) {
    schedule.configure_sets(
        (
            DomainSet::Emission,
            DomainSet::Transit,
            DomainSet::Interference,
            DomainSet::Detection,
        )
            .chain()
            .in_set(SimPhase::Update),
    );
}

/// Build a configured `SimTick` schedule with phase ordering.
///
/// Single-threaded on purpose: one tick runs to completion with a fixed
/// system order, so RNG consumption — and therefore every statistic the
/// engine produces — is identical across runs with the same seed.
pub fn configure_sim_schedule() -> Schedule {
    let mut schedule = Schedule::new(SimTick);
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.configure_sets((SimPhase::PreUpdate, SimPhase::Update, SimPhase::Last).chain());
    configure_domain_ordering(&mut schedule);
    schedule.add_systems(advance_clock.in_set(SimPhase::Last));
    schedule
}

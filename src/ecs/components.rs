use bevy_ecs::component::Component;
use serde::{Deserialize, Serialize};

use crate::geometry::SlitId;

/// Marker component present on every simulated particle.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Particle;

/// Continuous position in canvas units.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Velocity in canvas units per tick.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

/// Behavioral branch, latched from the observer mode at spawn time and
/// never changed afterwards — mode toggles do not reach particles already
/// in flight.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Behavior {
    Wave,
    Classical,
}

/// Inserted when a particle clears the barrier; absence means the slit is
/// still unassigned.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassedSlit(pub SlitId);

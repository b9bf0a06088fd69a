use bevy_ecs::resource::Resource;
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;

/// Identifies one of the two slit apertures in the barrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlitId {
    Slit1,
    Slit2,
}

impl SlitId {
    pub fn other(self) -> SlitId {
        match self {
            SlitId::Slit1 => SlitId::Slit2,
            SlitId::Slit2 => SlitId::Slit1,
        }
    }
}

/// Fixed description of the barrier, its two slits, and the detection
/// screen, derived once from a validated [`SimulationConfig`].
///
/// Pure data plus predicates; nothing here mutates after construction.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Geometry {
    pub barrier_x: f64,
    pub barrier_width: f64,
    pub screen_x: f64,
    pub slit1_y: f64,
    pub slit2_y: f64,
    pub slit_height: f64,
}

impl Geometry {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            barrier_x: config.barrier_x,
            barrier_width: config.slit_width,
            screen_x: config.screen_x,
            slit1_y: config.slit1_y,
            slit2_y: config.slit2_y,
            slit_height: config.slit_height,
        }
    }

    /// Which slit aperture (center ± half height) contains `y`, if any.
    /// Validation guarantees the apertures are disjoint, so the answer is
    /// unambiguous.
    pub fn slit_containing(&self, y: f64) -> Option<SlitId> {
        let half = self.slit_height / 2.0;
        if (y - self.slit1_y).abs() <= half {
            Some(SlitId::Slit1)
        } else if (y - self.slit2_y).abs() <= half {
            Some(SlitId::Slit2)
        } else {
            None
        }
    }

    /// True while `x` lies within the barrier's thickness band.
    pub fn in_barrier_band(&self, x: f64) -> bool {
        x >= self.barrier_x && x < self.barrier_x + self.barrier_width
    }

    /// True once `x` has cleared the far edge of the barrier band.
    pub fn past_barrier(&self, x: f64) -> bool {
        x >= self.barrier_x + self.barrier_width
    }

    /// The slit whose center is geometrically closer to `y`. Ties go to
    /// slit 1.
    pub fn nearest_slit(&self, y: f64) -> SlitId {
        if (y - self.slit1_y).abs() <= (y - self.slit2_y).abs() {
            SlitId::Slit1
        } else {
            SlitId::Slit2
        }
    }

    /// Center point of a slit aperture, at the middle of the barrier band.
    pub fn slit_center(&self, slit: SlitId) -> (f64, f64) {
        let x = self.barrier_x + self.barrier_width / 2.0;
        match slit {
            SlitId::Slit1 => (x, self.slit1_y),
            SlitId::Slit2 => (x, self.slit2_y),
        }
    }

    /// Midpoint between the two slit centers; the emission band is centered
    /// here.
    pub fn midpoint_y(&self) -> f64 {
        (self.slit1_y + self.slit2_y) / 2.0
    }

    /// Path-length difference `d2 - d1` from the two slit centers to the
    /// point `(x, y)`. Zero along the midline between the slits.
    pub fn path_difference(&self, x: f64, y: f64) -> f64 {
        let (x1, y1) = self.slit_center(SlitId::Slit1);
        let (x2, y2) = self.slit_center(SlitId::Slit2);
        let d1 = ((x - x1).powi(2) + (y - y1).powi(2)).sqrt();
        let d2 = ((x - x2).powi(2) + (y - y2).powi(2)).sqrt();
        d2 - d1
    }
}

use std::{error::Error, fmt};

use bevy_ecs::resource::Resource;
use serde::{Deserialize, Serialize};

/// Simulation configuration, immutable for the lifetime of a run.
///
/// All coordinates are in canvas units: x grows from the emitter toward the
/// detection screen, y spans `0..=height`. The barrier occupies the band
/// `barrier_x..barrier_x + slit_width`; each slit aperture is the y-range
/// `slit_y ± slit_height / 2` within that band.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Canvas width; particles drifting past it are removed.
    pub width: f64,
    /// Canvas height; the detection screen's y-extent.
    pub height: f64,
    /// x-position new particles are emitted at.
    pub emission_x: f64,
    /// Half-width of the spawn band around the slit midpoint.
    pub emission_spread: f64,
    /// Probability of emitting one particle per tick.
    pub emission_probability: f64,
    /// Initial forward (+x) speed, in canvas units per tick.
    pub base_speed: f64,
    /// Left edge of the barrier band.
    pub barrier_x: f64,
    /// Barrier thickness; also the x-extent of each slit aperture.
    pub slit_width: f64,
    /// y-extent of each slit aperture.
    pub slit_height: f64,
    /// Center of the first slit aperture.
    pub slit1_y: f64,
    /// Center of the second slit aperture.
    pub slit2_y: f64,
    /// x-position of the detection screen.
    pub screen_x: f64,
    /// Wavelength used by the interference phase term.
    pub wavelength: f64,
    /// Per-tick steering gain applied to wave-behavior particles past the
    /// barrier. Tunable: together with `base_speed` it sets fringe contrast.
    pub interference_strength: f64,
    /// Maximum |Δvy| applied to a classical particle on slit passage.
    pub classical_jitter: f64,
    /// Detection history capacity; oldest entries are evicted first.
    pub max_detections: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            emission_x: 40.0,
            emission_spread: 50.0,
            emission_probability: 0.1,
            base_speed: 2.0,
            barrier_x: 200.0,
            slit_width: 10.0,
            slit_height: 40.0,
            slit1_y: 190.0,
            slit2_y: 310.0,
            screen_x: 600.0,
            wavelength: 30.0,
            interference_strength: 0.02,
            classical_jitter: 0.5,
            max_detections: 500,
        }
    }
}

impl SimulationConfig {
    /// Check every invariant the engine relies on. Called once at
    /// construction; a valid config can never fail mid-tick.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("emission_x", self.emission_x),
            ("emission_spread", self.emission_spread),
            ("emission_probability", self.emission_probability),
            ("base_speed", self.base_speed),
            ("barrier_x", self.barrier_x),
            ("slit_width", self.slit_width),
            ("slit_height", self.slit_height),
            ("slit1_y", self.slit1_y),
            ("slit2_y", self.slit2_y),
            ("screen_x", self.screen_x),
            ("wavelength", self.wavelength),
            ("interference_strength", self.interference_strength),
            ("classical_jitter", self.classical_jitter),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }

        if self.wavelength <= 0.0 {
            return Err(ConfigError::NonPositiveWavelength {
                wavelength: self.wavelength,
            });
        }
        if self.slit_width <= 0.0 || self.slit_height <= 0.0 {
            return Err(ConfigError::NonPositiveAperture {
                slit_width: self.slit_width,
                slit_height: self.slit_height,
            });
        }
        if !(0.0..=1.0).contains(&self.emission_probability) {
            return Err(ConfigError::EmissionProbabilityOutOfRange {
                probability: self.emission_probability,
            });
        }
        if self.base_speed <= 0.0 {
            return Err(ConfigError::NonPositiveSpeed {
                speed: self.base_speed,
            });
        }
        for (name, value) in [
            ("emission_spread", self.emission_spread),
            ("classical_jitter", self.classical_jitter),
        ] {
            if value < 0.0 {
                return Err(ConfigError::NegativeParameter { name, value });
            }
        }

        let half = self.slit_height / 2.0;
        for slit_y in [self.slit1_y, self.slit2_y] {
            if slit_y - half < 0.0 || slit_y + half > self.height {
                return Err(ConfigError::SlitOutsideCanvas {
                    slit_y,
                    height: self.height,
                });
            }
        }
        if (self.slit1_y - self.slit2_y).abs() <= self.slit_height {
            return Err(ConfigError::OverlappingSlits {
                slit1_y: self.slit1_y,
                slit2_y: self.slit2_y,
                slit_height: self.slit_height,
            });
        }

        let barrier_end = self.barrier_x + self.slit_width;
        if !(0.0 <= self.emission_x
            && self.emission_x < self.barrier_x
            && barrier_end < self.screen_x
            && self.screen_x <= self.width)
        {
            return Err(ConfigError::StationsOutOfOrder {
                emission_x: self.emission_x,
                barrier_x: self.barrier_x,
                screen_x: self.screen_x,
                width: self.width,
            });
        }

        if self.max_detections == 0 {
            return Err(ConfigError::ZeroDetectionCapacity);
        }

        Ok(())
    }
}

/// Rejection reasons for an invalid [`SimulationConfig`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonFinite { name: &'static str, value: f64 },
    NonPositiveWavelength { wavelength: f64 },
    NonPositiveAperture { slit_width: f64, slit_height: f64 },
    EmissionProbabilityOutOfRange { probability: f64 },
    NonPositiveSpeed { speed: f64 },
    NegativeParameter { name: &'static str, value: f64 },
    SlitOutsideCanvas { slit_y: f64, height: f64 },
    OverlappingSlits { slit1_y: f64, slit2_y: f64, slit_height: f64 },
    StationsOutOfOrder { emission_x: f64, barrier_x: f64, screen_x: f64, width: f64 },
    ZeroDetectionCapacity,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonFinite { name, value } => {
                write!(f, "{name} must be finite, got {value}")
            }
            ConfigError::NonPositiveWavelength { wavelength } => {
                write!(f, "wavelength must be > 0, got {wavelength}")
            }
            ConfigError::NonPositiveAperture {
                slit_width,
                slit_height,
            } => write!(
                f,
                "slit aperture must be positive, got width {slit_width} x height {slit_height}"
            ),
            ConfigError::EmissionProbabilityOutOfRange { probability } => write!(
                f,
                "emission_probability must be within [0, 1], got {probability}"
            ),
            ConfigError::NonPositiveSpeed { speed } => {
                write!(f, "base_speed must be > 0, got {speed}")
            }
            ConfigError::NegativeParameter { name, value } => {
                write!(f, "{name} must be >= 0, got {value}")
            }
            ConfigError::SlitOutsideCanvas { slit_y, height } => write!(
                f,
                "slit aperture centered at y={slit_y} extends outside the canvas (height {height})"
            ),
            ConfigError::OverlappingSlits {
                slit1_y,
                slit2_y,
                slit_height,
            } => write!(
                f,
                "slit apertures at y={slit1_y} and y={slit2_y} overlap for height {slit_height}; \
                 centers must be more than one aperture height apart"
            ),
            ConfigError::StationsOutOfOrder {
                emission_x,
                barrier_x,
                screen_x,
                width,
            } => write!(
                f,
                "x stations must satisfy 0 <= emission_x ({emission_x}) < barrier_x ({barrier_x}) \
                 < screen_x ({screen_x}) <= width ({width}), with the barrier band ending before \
                 the screen"
            ),
            ConfigError::ZeroDetectionCapacity => {
                write!(f, "max_detections must be at least 1")
            }
        }
    }
}

impl Error for ConfigError {}

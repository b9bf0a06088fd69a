pub mod detection;
pub mod emission;
pub mod interference;
pub mod transit;

pub use detection::DetectionPlugin;
pub use emission::EmissionPlugin;
pub use interference::InterferencePlugin;
pub use transit::TransitPlugin;

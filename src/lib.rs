pub mod simulation;
pub mod configuration;
pub mod error;
#[cfg(feature = "viewer")]
pub mod visualization;

pub use error::SimError;

pub use simulation::states::{CelestialBody, NVec3};
pub use simulation::params::Parameters;
pub use simulation::forces::{Acceleration, ForceField, NewtonianGravity};
pub use simulation::integrator::verlet_integrator;
pub use simulation::orbit::{OrbitElements, OrbitInitializer};
pub use simulation::engine::{EngineState, SimulationEngine};
pub use simulation::scenario::Scenario;

pub use configuration::config::{BodyConfig, EngineConfig, OrbitConfig, ParametersConfig, ScenarioConfig, ViewerConfig};

#[cfg(feature = "viewer")]
pub use visualization::viewer3d::run_3d;

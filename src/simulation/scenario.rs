//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime `Scenario`
//! containing:
//! - numerical parameters (`Parameters`)
//! - validated bodies at t = 0
//! - optional orbital elements for vis-viva seeding
//! - the initial speed multiplier and viewer hints
//!
//! `Scenario::into_engine` hands the bodies to a `SimulationEngine`.

use std::fs;
use std::path::Path;

use crate::configuration::config::{BodyConfig, ScenarioConfig, ViewerConfig};
use crate::error::SimError;
use crate::simulation::engine::SimulationEngine;
use crate::simulation::orbit::OrbitElements;
use crate::simulation::params::Parameters;
use crate::simulation::states::{CelestialBody, NVec3};

#[derive(Debug, Clone)]
pub struct Scenario {
    pub parameters: Parameters,
    pub bodies: Vec<CelestialBody>,
    pub orbits: Option<OrbitElements>,
    pub speed: f64,
    pub viewer: ViewerConfig,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, SimError> {
        let parameters = Parameters {
            g: cfg.parameters.g,
            eps: cfg.parameters.eps,
            h0: cfg.parameters.h0,
            max_frame_time: cfg.engine.max_frame_time,
        };
        parameters.validate()?;

        // Bodies: map `BodyConfig` -> runtime `CelestialBody` using nalgebra vectors
        let bodies = cfg
            .bodies
            .iter()
            .enumerate()
            .map(|(i, bc)| body_from_config(i, bc))
            .collect::<Result<Vec<_>, _>>()?;

        let orbits = cfg.orbits.map(|oc| OrbitElements {
            axis: oc.axis,
            eccentricity: oc.eccentricity,
            reference: oc.reference,
        });

        Ok(Self {
            parameters,
            bodies,
            orbits,
            speed: cfg.engine.speed,
            viewer: cfg.viewer,
        })
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, SimError> {
        let cfg: ScenarioConfig = serde_yaml::from_str(yaml)?;
        Self::build_scenario(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Engine loaded with this scenario's bodies and reset to them
    ///
    /// Bodies that were not orbit-seeded get their accelerations computed
    /// before the snapshot, so the first sub-step has a valid a_n.
    pub fn into_engine(self) -> SimulationEngine {
        let mut engine = SimulationEngine::new(self.parameters);
        let seeded = engine.load_with_orbits(self.bodies, self.orbits.as_ref(), true);
        if seeded == 0 {
            engine.refresh_accelerations();
            engine.save_initial_state();
        }
        engine
    }
}

fn vec3(index: usize, field: &str, values: &[f64]) -> Result<NVec3, SimError> {
    match values {
        [x, y, z] if values.iter().all(|c| c.is_finite()) => Ok(NVec3::new(*x, *y, *z)),
        _ => Err(SimError::InvalidBody {
            index,
            reason: format!("`{}` must be three finite numbers, got {:?}", field, values),
        }),
    }
}

fn body_from_config(index: usize, bc: &BodyConfig) -> Result<CelestialBody, SimError> {
    if !(bc.m.is_finite() && bc.m > 0.0) {
        return Err(SimError::InvalidBody {
            index,
            reason: format!("mass must be > 0, got {}", bc.m),
        });
    }
    if !(bc.radius.is_finite() && bc.radius >= 0.0) {
        return Err(SimError::InvalidBody {
            index,
            reason: format!("radius must be >= 0, got {}", bc.radius),
        });
    }

    Ok(CelestialBody::new(
        bc.name.clone(),
        vec3(index, "x", &bc.x)?,
        vec3(index, "v", &bc.v)?,
        bc.m,
        bc.radius,
    )
    .with_color(vec3(index, "color", &bc.color)?)
    .with_fixed(bc.fixed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::engine::EngineState;

    const TWO_BODY: &str = r#"
engine:
  speed: 2.0
bodies:
  - name: Sun
    m: 1.0
    radius: 0.00465
  - name: Earth
    m: 3.0e-6
    radius: 4.26e-5
orbits:
  axis: [0.0, 1.0]
  eccentricity: [0.0, 0.017]
"#;

    #[test]
    fn builds_bodies_and_orbits() {
        let scenario = Scenario::from_yaml_str(TWO_BODY).unwrap();

        assert_eq!(scenario.speed, 2.0);
        assert_eq!(scenario.bodies.len(), 2);
        assert_eq!(scenario.bodies[1].name, "Earth");
        assert_eq!(scenario.orbits.as_ref().unwrap().axis, vec![0.0, 1.0]);
        assert_eq!(scenario.parameters, Parameters::default());
    }

    #[test]
    fn into_engine_seeds_orbits() {
        let engine = Scenario::from_yaml_str(TWO_BODY).unwrap().into_engine();

        assert_eq!(engine.state(), EngineState::Loaded);
        assert_eq!(engine.names(), vec!["Sun".to_string(), "Earth".to_string()]);

        // periapsis separation a (1 - e)
        let d = engine.bodies()[0].distance(&engine.bodies()[1]);
        assert!((d - 1.0 * (1.0 - 0.017)).abs() < 1e-12);
        assert_eq!(engine.bodies(), engine.initial_state());
    }

    #[test]
    fn unseeded_bodies_start_with_gravity() {
        let yaml = r#"
bodies:
  - { name: A, x: [-1.0, 0.0, 0.0], m: 1.0, radius: 0.1 }
  - { name: B, x: [1.0, 0.0, 0.0], m: 1.0, radius: 0.1 }
"#;
        let engine = Scenario::from_yaml_str(yaml).unwrap().into_engine();

        let a = engine.bodies()[0].acceleration;
        assert!(a.x > 0.0, "A should be pulled toward B, got {:?}", a);
        assert_eq!(engine.bodies(), engine.initial_state());
    }

    #[test]
    fn rejects_short_position() {
        let yaml = "bodies:\n  - m: 1.0\n    radius: 0.1\n    x: [1.0, 2.0]\n";
        let err = Scenario::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, SimError::InvalidBody { index: 0, .. }));
    }

    #[test]
    fn rejects_non_positive_mass() {
        let yaml = "bodies:\n  - m: 0.0\n    radius: 0.1\n";
        let err = Scenario::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, SimError::InvalidBody { index: 0, .. }));
    }

    #[test]
    fn rejects_zero_step() {
        let yaml = "parameters:\n  h0: 0.0\nbodies: []\n";
        let err = Scenario::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, SimError::InvalidParameters(_)));
    }

    #[test]
    fn bad_yaml_is_config_error() {
        let err = Scenario::from_yaml_str("bodies: [").unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }
}

//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – time-stepping options (speed multiplier, frame clamp)
//! - [`ParametersConfig`] – physical constants and the fixed sub-step
//! - [`BodyConfig`]       – initial state for each body
//! - [`OrbitConfig`]      – optional per-body orbital elements for vis-viva seeding
//! - [`ViewerConfig`]     – render hints for the 3D viewer
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! Every section except `bodies` may be omitted.
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   speed: 1.0              # speed multiplier applied to frame time
//!   max_frame_time: 0.25    # clamp for one frame
//!
//! parameters:
//!   G: 2.96e-4              # gravitational constant (AU^3 / (Msun day^2))
//!   eps: 1.0e-6             # softening added to d^3
//!   h0: 0.005               # fixed sub-step
//!
//! bodies:
//!   - name: Sun
//!     x: [0.0, 0.0, 0.0]
//!     v: [0.0, 0.0, 0.0]
//!     m: 1.0
//!     radius: 0.00465
//!     color: [1.0, 0.5, 0.0]
//!   - name: Earth
//!     x: [0.0, 0.0, 0.0]
//!     v: [0.0, 0.0, 0.0]
//!     m: 3.0e-6
//!     radius: 4.26e-5
//!
//! orbits:
//!   reference: 0
//!   axis: [0.0, 1.0]
//!   eccentricity: [0.0, 0.017]
//! ```
//!
//! [`crate::simulation::scenario::Scenario`] maps this into runtime types.

use serde::Deserialize;

use crate::simulation::params::{DEFAULT_EPS, DEFAULT_G, DEFAULT_H0, DEFAULT_MAX_FRAME_TIME};

/// Time-stepping options
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub speed: f64, // initial speed multiplier
    pub max_frame_time: f64, // frame-time clamp
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            max_frame_time: DEFAULT_MAX_FRAME_TIME,
        }
    }
}

/// Physical constants and integration step
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ParametersConfig {
    #[serde(rename = "G")]
    pub g: f64,   // gravitational constant
    pub eps: f64, // softening - keeps forces finite at near-zero separation
    pub h0: f64,  // fixed sub-step
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            g: DEFAULT_G,
            eps: DEFAULT_EPS,
            h0: DEFAULT_H0,
        }
    }
}

fn default_color() -> Vec<f64> {
    vec![1.0, 1.0, 1.0]
}

fn default_name() -> String {
    "Unnamed".to_string()
}

fn zero3() -> Vec<f64> {
    vec![0.0, 0.0, 0.0]
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BodyConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "zero3")]
    pub x: Vec<f64>, // initial position
    #[serde(default = "zero3")]
    pub v: Vec<f64>, // initial velocity
    pub m: f64,      // mass, > 0
    pub radius: f64, // visual / collision radius
    #[serde(default = "default_color")]
    pub color: Vec<f64>, // rgb render hint
    #[serde(default)]
    pub fixed: bool, // pinned in place
}

/// Per-body orbital elements, one entry per body
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct OrbitConfig {
    #[serde(default)]
    pub reference: usize, // body every other one orbits
    pub axis: Vec<f64>, // semi-major axes
    pub eccentricity: Vec<f64>,
}

/// Render hints for the 3D viewer
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    pub scale: f32, // world units -> screen units
    pub min_radius: f32, // smallest drawn radius, in world units
    pub camera_distance: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            scale: 50.0,
            min_radius: 0.02,
            camera_distance: 1500.0,
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub parameters: ParametersConfig,
    pub bodies: Vec<BodyConfig>,
    #[serde(default)]
    pub orbits: Option<OrbitConfig>,
    #[serde(default)]
    pub viewer: ViewerConfig,
}

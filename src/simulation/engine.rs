//! Live simulation state and time management
//!
//! `SimulationEngine` owns the evolving body collection, the saved initial
//! snapshot used by `reset`, and the time accumulator that turns variable
//! frame times into constant-size Verlet sub-steps.
//!
//! State machine: `Uninitialized -> Loaded` on `set_initial_state`,
//! `Loaded <-> Running` once `advance` has accumulated time, back to
//! `Loaded` on `reset`. There is no closed state.

use tracing::{debug, info, trace, warn};

use crate::error::SimError;
use crate::simulation::forces::ForceField;
use crate::simulation::integrator::verlet_integrator;
use crate::simulation::orbit::{OrbitElements, OrbitInitializer};
use crate::simulation::params::Parameters;
use crate::simulation::states::{CelestialBody, NVec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    Loaded,
    Running,
}

pub struct SimulationEngine {
    parameters: Parameters,
    forces: ForceField,
    orbits: OrbitInitializer,
    bodies: Vec<CelestialBody>, // live state, index = selection order
    initial_state: Vec<CelestialBody>, // snapshot restored by reset()
    accumulator: f64, // unconsumed simulation time, >= 0
    elapsed: f64, // simulated time since last reset, whole sub-steps only
    state: EngineState,
    ignored_edits: usize,
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new(Parameters::default())
    }
}

impl SimulationEngine {
    /// Engine with Newtonian gravity built from `parameters`
    pub fn new(parameters: Parameters) -> Self {
        let forces = ForceField::gravity(&parameters);
        Self::with_forces(parameters, forces)
    }

    /// Engine with a caller-supplied force field
    pub fn with_forces(parameters: Parameters, forces: ForceField) -> Self {
        Self {
            orbits: OrbitInitializer::from_params(&parameters),
            parameters,
            forces,
            bodies: Vec::new(),
            initial_state: Vec::new(),
            accumulator: 0.0,
            elapsed: 0.0,
            state: EngineState::Uninitialized,
            ignored_edits: 0,
        }
    }

    // =========================================================================================
    // Lifecycle
    // =========================================================================================

    /// Replace the saved initial snapshot; optionally reset to it right away
    pub fn set_initial_state(&mut self, bodies: Vec<CelestialBody>, reset_now: bool) {
        self.initial_state = bodies;
        if self.state == EngineState::Uninitialized {
            self.state = EngineState::Loaded;
        }
        if reset_now {
            self.reset();
        }
    }

    /// Load bodies from an orbital-parameter source
    ///
    /// When `orbits` is present and both arrays are one entry per body, each
    /// non-reference body is seeded on its ellipse before the snapshot is
    /// taken. On a length mismatch orbit derivation is skipped with a
    /// warning and the bodies keep their given state. Returns the number of
    /// orbits seeded.
    pub fn load_with_orbits(&mut self, mut bodies: Vec<CelestialBody>, orbits: Option<&OrbitElements>, reset_now: bool) -> usize {
        let mut seeded = 0;
        if let Some(elements) = orbits {
            if elements.matches(bodies.len()) {
                seeded = self.orbits.seed_orbits(&mut bodies, elements);
                // Pairwise seeding only knows two-body accelerations
                if bodies.len() > 2 && seeded > 0 {
                    self.forces.apply(&mut bodies);
                }
            } else {
                warn!(
                    axis = elements.axis.len(),
                    eccentricity = elements.eccentricity.len(),
                    bodies = bodies.len(),
                    "eccentricity or axis size does not match body count, skipping orbit derivation"
                );
            }
        }

        for b in &bodies {
            info!(
                "loaded body: {} at ({:.6}, {:.6}, {:.6})",
                b.name, b.position.x, b.position.y, b.position.z
            );
        }

        self.set_initial_state(bodies, reset_now);
        seeded
    }

    /// Snapshot the current live bodies as the new initial state
    pub fn save_initial_state(&mut self) {
        self.initial_state = self.bodies.clone();
        if self.state == EngineState::Uninitialized {
            self.state = EngineState::Loaded;
        }
    }

    /// Restore the saved snapshot and drop any leftover accumulated time
    pub fn reset(&mut self) {
        self.bodies = self.initial_state.clone();
        self.accumulator = 0.0;
        self.elapsed = 0.0;
        if self.state != EngineState::Uninitialized {
            self.state = EngineState::Loaded;
        }
        info!(bodies = self.bodies.len(), "simulation reset");
    }

    // =========================================================================================
    // Time stepping
    // =========================================================================================

    /// Feed one rendered frame's worth of time into the simulation
    ///
    /// `frame_time` is clamped to `[0, max_frame_time]`, scaled by
    /// `speed_multiplier` (negatives count as zero) and added to the
    /// accumulator, which is then drained in whole `h0` sub-steps.
    /// Returns the number of sub-steps taken.
    pub fn advance(&mut self, frame_time: f64, speed_multiplier: f64) -> usize {
        if self.state == EngineState::Uninitialized {
            return 0;
        }

        // Unvalidated parameters degrade to a no-op instead of a stuck loop
        let h = self.parameters.h0;
        let max_frame_time = self.parameters.max_frame_time;
        if !(h.is_finite() && h > 0.0 && max_frame_time.is_finite() && max_frame_time > 0.0) {
            debug!(h, max_frame_time, "invalid step or frame clamp, not advancing");
            return 0;
        }

        // NaN -> 0; min/max never panic, unlike clamp
        let frame_time = if frame_time.is_nan() { 0.0 } else { frame_time.min(max_frame_time).max(0.0) };
        let speed = if speed_multiplier.is_finite() { speed_multiplier.max(0.0) } else { 0.0 };

        self.accumulator += frame_time * speed;
        if self.accumulator > 0.0 {
            self.state = EngineState::Running;
        }

        let mut steps = 0;
        while self.accumulator >= h {
            verlet_integrator(&mut self.bodies, &self.forces, h);
            self.accumulator -= h;
            self.elapsed += h;
            steps += 1;
        }

        trace!(steps, accumulator = self.accumulator, "advance");
        steps
    }

    /// Recompute accelerations of the live bodies for their current positions
    pub fn refresh_accelerations(&mut self) {
        self.forces.apply(&mut self.bodies);
    }

    // =========================================================================================
    // Per-body edits (control surface)
    // =========================================================================================

    pub fn set_mass(&mut self, index: usize, mass: f64) {
        if !(mass.is_finite() && mass > 0.0) {
            self.reject_edit("set_mass", index, "mass must be finite and > 0");
            return;
        }
        if let Some(b) = self.editable(index, "set_mass") {
            b.mass = mass;
        }
    }

    pub fn set_radius(&mut self, index: usize, radius: f64) {
        if !(radius.is_finite() && radius >= 0.0) {
            self.reject_edit("set_radius", index, "radius must be finite and >= 0");
            return;
        }
        if let Some(b) = self.editable(index, "set_radius") {
            b.radius = radius;
        }
    }

    pub fn set_velocity(&mut self, index: usize, velocity: NVec3) {
        if !velocity.iter().all(|c| c.is_finite()) {
            self.reject_edit("set_velocity", index, "velocity must be finite");
            return;
        }
        if let Some(b) = self.editable(index, "set_velocity") {
            b.velocity = velocity;
        }
    }

    pub fn set_fixed(&mut self, index: usize, fixed: bool) {
        if let Some(b) = self.editable(index, "set_fixed") {
            b.fixed = fixed;
        }
    }

    /// Setter lookup: out-of-range is a counted no-op, never an error
    fn editable(&mut self, index: usize, op: &'static str) -> Option<&mut CelestialBody> {
        if index >= self.bodies.len() {
            self.ignored_edits += 1;
            debug!(op, index, count = self.bodies.len(), "ignoring edit for out-of-range body");
            return None;
        }
        self.bodies.get_mut(index)
    }

    fn reject_edit(&mut self, op: &'static str, index: usize, reason: &str) {
        self.ignored_edits += 1;
        warn!(op, index, "rejected edit: {}", reason);
    }

    // =========================================================================================
    // Accessors
    // =========================================================================================

    /// Mutable access for interactive editing; callers validate `index` first
    pub fn body_at(&mut self, index: usize) -> Result<&mut CelestialBody, SimError> {
        let len = self.bodies.len();
        self.bodies.get_mut(index).ok_or(SimError::IndexOutOfRange { index, len })
    }

    pub fn body(&self, index: usize) -> Result<&CelestialBody, SimError> {
        self.bodies.get(index).ok_or(SimError::IndexOutOfRange {
            index,
            len: self.bodies.len(),
        })
    }

    /// Body names in selection order, rebuilt on every call
    pub fn names(&self) -> Vec<String> {
        self.bodies.iter().map(|b| b.name.clone()).collect()
    }

    pub fn count(&self) -> usize {
        self.bodies.len()
    }

    /// Live bodies for rendering; valid until the next mutating call
    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn initial_state(&self) -> &[CelestialBody] {
        &self.initial_state
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn time_accumulator(&self) -> f64 {
        self.accumulator
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Setter requests dropped because of a bad index or value
    pub fn ignored_edits(&self) -> usize {
        self.ignored_edits
    }
}

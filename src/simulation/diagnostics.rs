//! Conserved-quantity helpers for checking a run

use super::forces::NewtonianGravity;
use super::states::{CelestialBody, NVec3};

pub fn total_momentum(bodies: &[CelestialBody]) -> NVec3 {
    bodies.iter().map(CelestialBody::momentum).sum()
}

pub fn total_kinetic_energy(bodies: &[CelestialBody]) -> f64 {
    bodies.iter().map(CelestialBody::kinetic_energy).sum()
}

/// Kinetic plus unsoftened Newtonian potential energy
pub fn total_energy(bodies: &[CelestialBody], g: f64) -> f64 {
    let gravity = NewtonianGravity { g, eps: 0.0 };
    total_kinetic_energy(bodies) + gravity.potential_energy(bodies)
}

/// Mass-weighted mean position, `None` for an empty or massless set
pub fn center_of_mass(bodies: &[CelestialBody]) -> Option<NVec3> {
    let mass: f64 = bodies.iter().map(|b| b.mass).sum();
    if mass <= 0.0 {
        return None;
    }
    let weighted: NVec3 = bodies.iter().map(|b| b.mass * b.position).sum();
    Some(weighted / mass)
}

//! Two-body orbit seeding from orbital elements via vis-viva
//!
//! Places a primary/secondary pair on a Keplerian ellipse about their
//! barycenter in the xy-plane, with the separation along the x-axis:
//!
//! ```text
//! r   = a (1 - e^2) / (1 + e cos nu)
//! v   = sqrt(G (m1 + m2) (2/r - 1/a))
//! x1  = -m2/M r x̂       x2  = m1/M r x̂
//! v1  = -m2/M v t̂       v2  = m1/M v t̂
//! ```

use tracing::warn;

use crate::error::SimError;
use crate::simulation::forces::NewtonianGravity;
use crate::simulation::params::Parameters;
use crate::simulation::states::{CelestialBody, NVec3};

/// Parallel per-body orbit arrays from a body source
///
/// Entry `reference` is ignored; every other index seeds that body's orbit
/// around the reference body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrbitElements {
    pub axis: Vec<f64>,
    pub eccentricity: Vec<f64>,
    pub reference: usize,
}

impl OrbitElements {
    pub fn new(axis: Vec<f64>, eccentricity: Vec<f64>) -> Self {
        Self {
            axis,
            eccentricity,
            reference: 0,
        }
    }

    /// Both arrays must be exactly one entry per body
    pub fn matches(&self, body_count: usize) -> bool {
        self.axis.len() == body_count && self.eccentricity.len() == body_count
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OrbitInitializer {
    pub g: f64,
    pub eps: f64,
}

impl OrbitInitializer {
    pub fn from_params(params: &Parameters) -> Self {
        Self {
            g: params.g,
            eps: params.eps,
        }
    }

    /// Seed `primary` and `secondary` on an ellipse with semi-major axis `a`,
    /// eccentricity `e` and true anomaly `true_anomaly` (0 = periapsis)
    ///
    /// Overwrites position, velocity and acceleration of both bodies. The
    /// accelerations come from the same softened law the integrator uses, so
    /// the first sub-step starts consistent with the analytic orbit.
    pub fn init_elliptical_orbit(
        &self,
        primary: &mut CelestialBody,
        secondary: &mut CelestialBody,
        a: f64,
        e: f64,
        true_anomaly: f64,
    ) -> Result<(), SimError> {
        if !(a.is_finite() && a > 0.0 && (0.0..1.0).contains(&e) && true_anomaly.is_finite()) {
            return Err(SimError::InvalidOrbit { a, e });
        }

        let m1 = primary.mass;
        let m2 = secondary.mass;
        let total = m1 + m2;

        let r_mag = a * (1.0 - e * e) / (1.0 + e * true_anomaly.cos());

        primary.position = NVec3::new(-m2 / total * r_mag, 0.0, 0.0);
        secondary.position = NVec3::new(m1 / total * r_mag, 0.0, 0.0);

        let v_mag = (self.g * total * (2.0 / r_mag - 1.0 / a)).sqrt();

        // Perpendicular to the separation, in the xy-plane
        let r_hat = (secondary.position - primary.position) / r_mag;
        let t_hat = NVec3::new(-r_hat.y, r_hat.x, 0.0);
        let v_vec = v_mag * t_hat;

        primary.velocity = -m2 / total * v_vec;
        secondary.velocity = m1 / total * v_vec;

        let gravity = NewtonianGravity {
            g: self.g,
            eps: self.eps,
        };
        let r12 = secondary.position - primary.position;
        primary.acceleration = gravity.pair_acceleration(r12, m2);
        secondary.acceleration = gravity.pair_acceleration(-r12, m1);

        Ok(())
    }

    /// Seed every non-reference body's orbit pairwise against `elements.reference`
    ///
    /// The reference body is re-placed by each pairing, so it ends up with
    /// the barycentric offset of the last one. An out-of-range reference
    /// falls back to body 0. Bodies with bad elements are
    /// skipped with a warning. Returns the number of orbits seeded.
    pub fn seed_orbits(&self, bodies: &mut [CelestialBody], elements: &OrbitElements) -> usize {
        if !elements.matches(bodies.len()) {
            warn!(
                axis = elements.axis.len(),
                eccentricity = elements.eccentricity.len(),
                count = bodies.len(),
                "orbit arrays do not match body count, no orbits seeded"
            );
            return 0;
        }

        let mut reference = elements.reference;
        if reference >= bodies.len() {
            warn!(reference, count = bodies.len(), "orbit reference body out of range, defaulting to 0");
            reference = 0;
        }

        let mut seeded = 0;
        for i in 0..bodies.len() {
            if i == reference {
                continue;
            }
            let (primary, secondary) = pair_mut(bodies, reference, i);
            match self.init_elliptical_orbit(primary, secondary, elements.axis[i], elements.eccentricity[i], 0.0) {
                Ok(()) => seeded += 1,
                Err(err) => warn!(body = %secondary.name, "skipping orbit: {}", err),
            }
        }
        seeded
    }
}

/// Two distinct mutable borrows out of one slice
fn pair_mut(bodies: &mut [CelestialBody], i: usize, j: usize) -> (&mut CelestialBody, &mut CelestialBody) {
    debug_assert_ne!(i, j);
    if i < j {
        let (left, right) = bodies.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = bodies.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}

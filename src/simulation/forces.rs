//! Force / acceleration contributors for the n-body engine
//!
//! A [`ForceField`] is a set of [`Acceleration`] terms summed into one
//! acceleration per body. The standard field holds a single direct-sum
//! [`NewtonianGravity`] term.

use crate::simulation::params::Parameters;
use crate::simulation::states::{CelestialBody, NVec3};

/// Trait for acceleration sources operating on a body slice
/// Implementations add their contribution into `out[i]` for each body
pub trait Acceleration {
    fn acceleration(&self, bodies: &[CelestialBody], out: &mut [NVec3]);
}

/// Collection of acceleration terms (gravity, drag, etc.)
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct ForceField {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl Default for ForceField {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceField {
    /// Create an empty field
    pub fn new() -> Self {
        Self {
            terms: Vec::new(),
        }
    }

    /// Field with pairwise Newtonian gravity only
    pub fn gravity(params: &Parameters) -> Self {
        Self::new().with(NewtonianGravity::from_params(params))
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total accelerations for all bodies
    /// - `out[i]` is zeroed, then set to the sum of contributions from all terms
    pub fn accumulate_accels(&self, bodies: &[CelestialBody], out: &mut [NVec3]) {
        // Zero buffer
        for a in out.iter_mut() {
            *a = NVec3::zeros();
        }
        for term in &self.terms {
            term.acceleration(bodies, out);
        }
    }

    /// Recompute and store `acceleration` on every body, fixed ones included
    pub fn apply(&self, bodies: &mut [CelestialBody]) {
        let mut out = vec![NVec3::zeros(); bodies.len()];
        self.accumulate_accels(bodies, &mut out);
        for (b, a) in bodies.iter_mut().zip(out) {
            b.acceleration = a;
        }
    }
}

/// Newtonian gravity with additive softening on the cubed distance
/// `a_i += G m_j r / (|r|^3 + eps)`, exact O(N^2) pairwise sum
#[derive(Debug, Clone, Copy)]
pub struct NewtonianGravity {
    pub g: f64, // gravitational constant
    pub eps: f64, // softening
}

impl NewtonianGravity {
    pub fn from_params(params: &Parameters) -> Self {
        Self {
            g: params.g,
            eps: params.eps,
        }
    }

    /// Acceleration per unit source mass along displacement `r` (from sink to source)
    #[inline]
    pub fn unit_acceleration(&self, r: NVec3) -> NVec3 {
        let d = r.norm();
        // eps > 0 keeps d3 > 0 at d = 0, where r = 0 gives a zero pull
        let d3 = d * d * d + self.eps;
        self.g * r / d3
    }

    /// Two-body law: acceleration of a body pulled by mass `m` displaced by `r`
    pub fn pair_acceleration(&self, r: NVec3, m: f64) -> NVec3 {
        m * self.unit_acceleration(r)
    }

    /// Unsoftened potential energy `-G m_i m_j / d` summed over pairs
    pub fn potential_energy(&self, bodies: &[CelestialBody]) -> f64 {
        let mut u = 0.0;
        for (i, bi) in bodies.iter().enumerate() {
            for bj in &bodies[i + 1..] {
                let d = bi.distance(bj);
                if d > 0.0 {
                    u -= self.g * bi.mass * bj.mass / d;
                }
            }
        }
        u
    }
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, bodies: &[CelestialBody], out: &mut [NVec3]) {
        let n = bodies.len();

        // Loop over each unordered pair (i, j) with i < j
        for i in 0..n {
            let bi = &bodies[i];

            for j in (i + 1)..n {
                let bj = &bodies[j];

                // r points from i to j: i is pulled along +r, j along -r
                // a_unit = G r / (|r|^3 + eps), i.e. G r_hat / |r|^2 away from eps
                let a_unit = self.unit_acceleration(bj.position - bi.position);

                // a_i += G m_j r / (|r|^3 + eps)
                // a_j -= G m_i r / (|r|^3 + eps)
                // so m_i a_i + m_j a_j = 0 and momentum is conserved pair by pair
                out[i] += bj.mass * a_unit;
                out[j] -= bi.mass * a_unit;
            }
        }
    }
}

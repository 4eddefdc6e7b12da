//! Fixed-step velocity-Verlet integrator
//!
//! One call advances every free body by exactly one sub-step `h`, starting
//! from the accelerations already stored on the bodies (a_n) and leaving the
//! freshly computed a_{n+1} behind for the next call.

use super::forces::ForceField;
use super::states::{CelestialBody, NVec3};

/// Advance `bodies` by one sub-step `h` using velocity Verlet
///
/// 1. save a_n
/// 2. x_{n+1} = x_n + v_n h + 1/2 a_n h^2
/// 3. a_{n+1} from x_{n+1}
/// 4. v_{n+1} = v_n + 1/2 (a_n + a_{n+1}) h
///
/// Fixed bodies keep their position and velocity but still get a_{n+1}
/// written, and still pull on everything else. `h <= 0` is a no-op.
pub fn verlet_integrator(bodies: &mut [CelestialBody], forces: &ForceField, h: f64) {
    if bodies.is_empty() || !(h > 0.0) {
        return;
    }

    let half_h2 = 0.5 * h * h;
    let half_h = 0.5 * h;

    let a_old: Vec<NVec3> = bodies.iter().map(|b| b.acceleration).collect();

    // Drift with the old acceleration
    // x_{n+1} = x_n + v_n h + 1/2 a_n h^2 (second-order Taylor step in x)
    for (b, a) in bodies.iter_mut().zip(a_old.iter()) {
        if b.fixed {
            continue;
        }
        b.position += h * b.velocity + half_h2 * *a;
    }

    // a_{n+1} at the new positions
    // fixed bodies get theirs too; they still act as sources
    forces.apply(bodies);

    // Kick with the average of old and new
    // v_{n+1} = v_n + 1/2 h a_n + 1/2 h a_{n+1}
    // (two half kicks around the drift, trapezoidal in a, time-reversible)
    for (b, a) in bodies.iter_mut().zip(a_old.iter()) {
        if b.fixed {
            continue;
        }
        b.velocity += half_h * (*a + b.acceleration);
    }
}

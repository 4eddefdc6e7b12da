//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - gravitational constant and softening (`g`, `eps`),
//! - fixed integration sub-step (`h0`),
//! - the frame-time clamp applied by `SimulationEngine::advance`
//!
//! Units: AU, solar masses and days, which is what makes the default `g`
//! give orbital periods that are watchable at interactive speeds.

use crate::error::SimError;

pub const DEFAULT_G: f64 = 2.96e-4;
pub const DEFAULT_EPS: f64 = 1e-6;
pub const DEFAULT_H0: f64 = 0.005;
pub const DEFAULT_MAX_FRAME_TIME: f64 = 0.25;

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub g: f64, // gravitational constant
    pub eps: f64, // softening added to d^3
    pub h0: f64, // fixed sub-step
    pub max_frame_time: f64, // clamp for a single advance() call
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            g: DEFAULT_G,
            eps: DEFAULT_EPS,
            h0: DEFAULT_H0,
            max_frame_time: DEFAULT_MAX_FRAME_TIME,
        }
    }
}

impl Parameters {
    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.g.is_finite() && self.g > 0.0) {
            return Err(SimError::InvalidParameters(format!("G must be finite and > 0, got {}", self.g)));
        }
        if !(self.eps.is_finite() && self.eps >= 0.0) {
            return Err(SimError::InvalidParameters(format!("eps must be finite and >= 0, got {}", self.eps)));
        }
        if !(self.h0.is_finite() && self.h0 > 0.0) {
            return Err(SimError::InvalidParameters(format!("h0 must be finite and > 0, got {}", self.h0)));
        }
        if !(self.max_frame_time.is_finite() && self.max_frame_time > 0.0) {
            return Err(SimError::InvalidParameters(format!(
                "max_frame_time must be finite and > 0, got {}",
                self.max_frame_time
            )));
        }
        Ok(())
    }
}

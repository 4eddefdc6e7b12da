//! Error types for orbsim.
//!
//! Only direct-indexed access, orbit seeding with bad elements, and scenario
//! loading fail loudly. Bulk and UI-facing engine operations degrade to a
//! logged no-op instead of returning one of these.

use std::fmt;

#[derive(Debug)]
pub enum SimError {
    /// `body_at`/`body` called with an index outside `[0, len)`.
    IndexOutOfRange { index: usize, len: usize },
    /// Orbit elements that do not describe a bound ellipse.
    InvalidOrbit { a: f64, e: f64 },
    /// Physical or numerical parameters that would break the integrator.
    InvalidParameters(String),
    /// A body in a scenario that violates the data model.
    InvalidBody { index: usize, reason: String },
    /// Scenario file could not be parsed.
    Config(serde_yaml::Error),
    /// Scenario file could not be read.
    Io(std::io::Error),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::IndexOutOfRange { index, len } => {
                write!(f, "Body index {} out of range (body count is {})", index, len)
            }
            SimError::InvalidOrbit { a, e } => write!(
                f,
                "Invalid orbit elements: semi-major axis {} must be > 0 and eccentricity {} must be in [0, 1)",
                a, e
            ),
            SimError::InvalidParameters(msg) => write!(f, "Invalid simulation parameters: {}", msg),
            SimError::InvalidBody { index, reason } => write!(f, "Invalid body #{}: {}", index, reason),
            SimError::Config(e) => write!(f, "Failed to parse scenario: {}", e),
            SimError::Io(e) => write!(f, "Failed to read scenario file: {}", e),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Config(e) => Some(e),
            SimError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_yaml::Error> for SimError {
    fn from(e: serde_yaml::Error) -> Self {
        SimError::Config(e)
    }
}

impl From<std::io::Error> for SimError {
    fn from(e: std::io::Error) -> Self {
        SimError::Io(e)
    }
}

//! Core state type for the N-body simulation.
//!
//! A single flat [`CelestialBody`] record carries everything the physics core
//! and the render layer need for one body. Vectors are `NVec3` (nalgebra, f64).

use std::fmt;

use nalgebra::Vector3;
pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct CelestialBody {
    pub name: String, // label, not required unique
    pub position: NVec3,
    pub velocity: NVec3,
    pub acceleration: NVec3, // last computed acceleration (a_n for the next sub-step)
    pub mass: f64, // always > 0
    pub radius: f64, // visual / collision radius, >= 0
    pub color: NVec3, // render hint only
    pub fixed: bool, // integrator leaves position and velocity untouched
}

impl Default for CelestialBody {
    fn default() -> Self {
        Self {
            name: "Unnamed".to_string(),
            position: NVec3::zeros(),
            velocity: NVec3::zeros(),
            acceleration: NVec3::zeros(),
            mass: 1.0,
            radius: 1.0,
            color: NVec3::new(1.0, 1.0, 1.0),
            fixed: false,
        }
    }
}

impl CelestialBody {
    /// Build a free, white body with zero acceleration
    pub fn new(name: impl Into<String>, position: NVec3, velocity: NVec3, mass: f64, radius: f64) -> Self {
        Self {
            name: name.into(),
            position,
            velocity,
            mass,
            radius,
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: NVec3) -> Self {
        self.color = color;
        self
    }

    pub fn with_fixed(mut self, fixed: bool) -> Self {
        self.fixed = fixed;
        self
    }

    pub fn with_acceleration(mut self, acceleration: NVec3) -> Self {
        self.acceleration = acceleration;
        self
    }

    /// Centre-to-centre distance
    pub fn distance(&self, other: &CelestialBody) -> f64 {
        (other.position - self.position).norm()
    }

    pub fn momentum(&self) -> NVec3 {
        self.mass * self.velocity
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.norm_squared()
    }

    /// True when the two spheres touch or overlap
    pub fn collides_with(&self, other: &CelestialBody) -> bool {
        self.distance(other) <= self.radius + other.radius
    }

    /// Stub elastic-collision response: swaps the normal component of the
    /// relative velocity between the two bodies. Masses are ignored and the
    /// integrator never calls this; hosts opt in explicitly.
    pub fn elastic_collision(&mut self, other: &mut CelestialBody) {
        let offset = other.position - self.position;
        let Some(normal) = offset.try_normalize(f64::EPSILON) else {
            return; // coincident centres, no usable normal
        };

        let relative = self.velocity - other.velocity;
        let v_normal = relative.dot(&normal) * normal;

        other.velocity += v_normal;
        self.velocity -= v_normal;
    }
}

impl fmt::Display for CelestialBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (p, v, a, c) = (self.position, self.velocity, self.acceleration, self.color);
        writeln!(f, "name:                {}", self.name)?;
        writeln!(f, "mass:                {}", self.mass)?;
        writeln!(f, "radius:              {}", self.radius)?;
        writeln!(f, "fixed:               {}", self.fixed)?;
        writeln!(f, "color:               {}, {}, {}", c.x, c.y, c.z)?;
        writeln!(f, "position(x,y,z):     {}, {}, {}", p.x, p.y, p.z)?;
        writeln!(f, "velocity(x,y,z):     {}, {}, {}", v.x, v.y, v.z)?;
        write!(f, "acceleration(x,y,z): {}, {}, {}", a.x, a.y, a.z)
    }
}

//! Physical forces acting on the ball in flight.
//!
//! Two forces matter for a serve without spin:
//!
//! - **Gravity**: constant downward acceleration
//! - **Drag**: air resistance opposing motion, proportional to v²
//!
//! Spin aerodynamics (Magnus lift) are outside the model; a serve here flies
//! on the vertical plane through the aim direction.
//!
//! The drag constant is lumped: `a_drag = -k * |v| * v` with
//! `k = Cd·ρ·A / 2m`. For a tennis ball (Cd ≈ 0.55, r = 33.5mm, m = 57g)
//! that works out to roughly 0.02 per meter, which is the default.

use crate::integrator::ForceModel;
use crate::types::{constants, FlightState, Vec3};

/// Force model for serve flight: gravity plus quadratic drag.
pub struct ServeForces {
    /// Gravity vector (default: -9.81 in Y)
    pub gravity: Vec3,

    /// Lumped quadratic drag factor (1/m)
    pub drag_factor: f64,

    /// Enable/disable individual forces (useful for testing)
    pub enable_gravity: bool,
    pub enable_drag: bool,
}

impl Default for ServeForces {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -constants::GRAVITY, 0.0),
            drag_factor: constants::DRAG_FACTOR,
            enable_gravity: true,
            enable_drag: true,
        }
    }
}

impl ServeForces {
    /// Create a new force model with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a force model with only gravity (for testing).
    pub fn gravity_only() -> Self {
        Self {
            enable_drag: false,
            ..Self::default()
        }
    }

    /// Drag deceleration: `-k * |v| * v`, applied per axis.
    fn drag_acceleration(&self, state: &FlightState) -> Vec3 {
        let speed_sq = state.vel.magnitude_squared();
        if speed_sq < constants::EPSILON {
            return Vec3::ZERO;
        }

        let speed = speed_sq.sqrt();
        state.vel * (-self.drag_factor * speed)
    }
}

impl ForceModel for ServeForces {
    fn acceleration(&self, state: &FlightState) -> Vec3 {
        let mut acc = Vec3::ZERO;

        if self.enable_gravity {
            acc += self.gravity;
        }

        if self.enable_drag {
            acc += self.drag_acceleration(state);
        }

        acc
    }
}

// =============================================================================
// Tests
// =============================================================================

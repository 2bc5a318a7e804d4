//! Core types for the serve simulation.
//!
//! All units are SI unless a field says otherwise:
//! - Position: meters (m)
//! - Velocity: meters per second (m/s)
//! - Time: seconds (s)
//! - Serve speed in `ServeConfig` is km/h, as shown to the user; it is
//!   converted once when the launch velocity is built.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

// =============================================================================
// Vec3 - 3D Vector
// =============================================================================

/// A 3D vector used for positions and velocities.
///
/// Coordinate system:
/// - X: lateral, 0 at the center line
/// - Y: vertical (positive upward, ground at 0)
/// - Z: depth, 0 at the net plane (server baseline negative, receiver positive)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Squared magnitude (avoids sqrt for comparisons)
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Magnitude (length) of the vector
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Returns a unit vector in the same direction, or zero if magnitude is zero
    pub fn normalized(&self) -> Self {
        let mag = self.magnitude();
        if mag < constants::EPSILON {
            Self::ZERO
        } else {
            *self / mag
        }
    }

    /// Dot product
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Linear interpolation between two vectors
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        *self + (*other - *self) * t
    }

    /// Copy of this vector with the Y component zeroed (ground-plane projection)
    pub fn horizontal(&self) -> Self {
        Self {
            x: self.x,
            y: 0.0,
            z: self.z,
        }
    }

    /// Distance to `other` measured on the ground plane (X/Z only)
    pub fn horizontal_distance(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        (dx * dx + dz * dz).sqrt()
    }
}

// Operator overloads for Vec3
impl Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
        self.z -= other.z;
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;
    fn div(self, scalar: f64) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
            z: self.z / scalar,
        }
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl Default for Vec3 {
    fn default() -> Self {
        Self::ZERO
    }
}

// =============================================================================
// Flight State
// =============================================================================

/// State of the ball point-mass at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightState {
    pub pos: Vec3,
    pub vel: Vec3,
}

impl FlightState {
    pub fn new(pos: Vec3, vel: Vec3) -> Self {
        Self { pos, vel }
    }
}

// =============================================================================
// Serve Configuration
// =============================================================================

/// Complete serve scenario as set up by the host application.
///
/// Plain data, passed by value into the core on every recomputation; the core
/// never mutates it. Invariants expected from the host: `serve_speed > 0`,
/// `server_height > 0`, `receiver_speed > 0`, `reaction_delay >= 0`,
/// `bounce_velocity_retention` in [0, 1].
///
/// The horizontal aim is fixed by `target_x`/`target_z`; the vertical launch
/// angle is the free parameter the optimizer writes back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ServeConfig {
    /// Serve speed in km/h
    pub serve_speed: f64,
    /// Vertical launch angle in degrees (positive = upward)
    pub vertical_angle: f64,
    /// Aimed landing point, lateral component (m)
    pub target_x: f64,
    /// Aimed landing point, depth component (m)
    pub target_z: f64,
    /// Server stance along the baseline (m from center)
    pub server_position_x: f64,
    /// Contact height of the serve (m)
    pub server_height: f64,
    /// Fraction of horizontal speed preserved through the ground bounce
    pub bounce_velocity_retention: f64,
    /// Receiver stance, lateral component (m)
    pub receiver_position_x: f64,
    /// Receiver stance, depth component (m)
    pub receiver_position_z: f64,
    /// Receiver top running speed (m/s)
    pub receiver_speed: f64,
    /// Time before the receiver starts moving (s)
    pub reaction_delay: f64,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            serve_speed: 150.0,
            vertical_angle: -5.0,
            target_x: 0.0,
            target_z: 4.0,
            server_position_x: 1.5,
            server_height: 1.0,
            bounce_velocity_retention: 0.7,
            receiver_position_x: 4.115,
            receiver_position_z: 23.77 / 2.0,
            receiver_speed: 5.0,
            reaction_delay: 0.3,
        }
    }
}

// =============================================================================
// Trajectory Data
// =============================================================================

/// Result of a full serve simulation: the sampled flight path plus the bounce
/// bookkeeping the analysis and display layers need.
///
/// The point sequence is chronological at a fixed time step; the point at
/// index `i` was sampled at `i * constants::TIME_STEP` seconds. The first
/// segment runs from launch to the first ground contact (or the net), the
/// second from the bounce to the second ground contact.
///
/// A net impact is a valid terminal state, not an error: `net_impact` carries
/// the snapped impact point and every bounce-related field is zeroed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryData {
    /// Sampled ball positions, both flight segments
    pub points: Vec<Vec3>,
    /// First ground contact (zero when the serve hit the net)
    pub bounce_point: Vec3,
    /// Second ground contact (zero when the serve hit the net)
    pub second_bounce: Vec3,
    /// Displacement from first to second ground contact
    pub post_bounce_travel: Vec3,
    /// Ball velocity immediately after the bounce response
    pub post_bounce_velocity: Vec3,
    /// Elapsed time from launch to first ground contact (or to the net impact)
    pub time_to_first_bounce: f64,
    /// Lateral coordinate of the actual landing, which drag shifts away from
    /// the aimed target
    pub landing_x: f64,
    /// Net impact point when the serve failed to clear the net
    pub net_impact: Option<Vec3>,
}

impl TrajectoryData {
    /// Simulation time of the point at `index`.
    pub fn time_of(&self, index: usize) -> f64 {
        index as f64 * constants::TIME_STEP
    }

    /// Index of the first ground contact in the point sequence.
    ///
    /// The launch point sits above the ground, so the scan skips the first
    /// couple of samples to avoid a false hit on a near-zero launch height.
    /// Returns `None` for net-terminated flights.
    pub fn first_bounce_index(&self) -> Option<usize> {
        if self.net_impact.is_some() {
            return None;
        }
        self.points
            .iter()
            .enumerate()
            .skip(2)
            .find(|(_, p)| p.y <= constants::EPSILON)
            .map(|(i, _)| i)
    }
}

// =============================================================================
// Receiver Analysis
// =============================================================================

/// Difficulty classification for the receiver, by required running speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    RelativelyEasy,
    SomewhatDifficult,
    Difficult,
    VeryDifficult,
}

impl Difficulty {
    /// Classify a required running speed in m/s.
    pub fn from_required_speed(speed: f64) -> Self {
        if speed < 4.0 {
            Difficulty::RelativelyEasy
        } else if speed < 6.0 {
            Difficulty::SomewhatDifficult
        } else if speed < 8.0 {
            Difficulty::Difficult
        } else {
            Difficulty::VeryDifficult
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::RelativelyEasy => "relatively easy",
            Difficulty::SomewhatDifficult => "somewhat difficult",
            Difficulty::Difficult => "difficult",
            Difficulty::VeryDifficult => "very difficult",
        };
        f.write_str(label)
    }
}

/// Planned receiver run from stance to interception, sampled for animation.
///
/// The path is a finite, fixed-length frame sequence: hold at the start for
/// the reaction delay, ease toward the target, then hold at the target until
/// the ball arrives. Played once, never restarted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiverMovement {
    pub start: Vec3,
    pub target: Vec3,
    /// Interpolated positions from start to target
    pub path: Vec<Vec3>,
    /// Time at which the receiver reaches the target (s from serve contact)
    pub arrival_time: f64,
    /// Whether the receiver can be at the target before the ball
    pub can_reach: bool,
}

/// Full receiver analysis for one simulated serve.
///
/// `required_speed` is `f64::INFINITY` when the ball arrives before the
/// receiver can even start moving; the host renders that as a lost point
/// rather than treating it as an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub receiver_start: Vec3,
    pub receiver_target: Vec3,
    /// Lateral component of the run (m)
    pub lateral_travel: f64,
    /// Depth component of the run (m)
    pub depth_travel: f64,
    /// Ground distance from stance to target (m)
    pub total_distance: f64,
    /// Ball arrival time at the interception point (s)
    pub receive_time: f64,
    /// Receive time minus reaction delay, floored at zero (s)
    pub effective_time: f64,
    /// Speed the receiver needs to make the interception (m/s)
    pub required_speed: f64,
    /// Spare time at the target; negative means the ball arrives first (s)
    pub timing_buffer: f64,
    pub difficulty: Difficulty,
    /// Post-bounce displacement, duplicated from the trajectory for display
    pub post_bounce_travel: Vec3,
    /// Post-bounce velocity, duplicated from the trajectory for display
    pub post_bounce_velocity: Vec3,
    pub movement: ReceiverMovement,
}

// =============================================================================
// Physical Constants
// =============================================================================

/// Physical constants used in the simulation.
pub mod constants {
    /// Gravitational acceleration (m/s²)
    pub const GRAVITY: f64 = 9.81;

    /// Lumped quadratic drag factor Cd·ρ·A / 2m for a tennis ball (1/m)
    pub const DRAG_FACTOR: f64 = 0.02;

    /// Integration time step (s)
    pub const TIME_STEP: f64 = 0.01;

    /// km/h to m/s
    pub const KMH_TO_MS: f64 = 1.0 / 3.6;

    /// Small value for floating-point comparisons
    pub const EPSILON: f64 = 1e-10;
}

// =============================================================================
// Tests
// =============================================================================

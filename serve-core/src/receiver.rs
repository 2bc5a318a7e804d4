//! Receiver interception analysis.
//!
//! Given a simulated serve, finds the best point for the receiver to meet the
//! ball and derives the movement, timing and difficulty numbers the host
//! displays.
//!
//! ## Interception search
//!
//! Every sampled point after the first bounce is a candidate. Each candidate
//! gets a weighted score from three factors:
//!
//! - **Height**: contact near waist height is playable, ankle or shoulder
//!   height is not
//! - **Distance**: the shorter the run, the better the receiver's balance
//! - **Timing**: spare time on arrival is rewarded (saturating, being very
//!   early buys nothing), arriving late is heavily penalized
//!
//! The weights put reachability first, economy of movement second and contact
//! height last.

use crate::types::{
    constants, AnalysisResult, Difficulty, ReceiverMovement, ServeConfig, TrajectoryData, Vec3,
};

/// Contact height the receiver prefers (m)
const IDEAL_CONTACT_HEIGHT: f64 = 1.0;

/// Spare time beyond which an earlier arrival stops improving the score (s)
const BUFFER_SATURATION: f64 = 0.25;

/// Score assigned to a candidate the receiver cannot reach in time
const UNREACHABLE_PENALTY: f64 = -20.0;

/// How far from the ball the receiver stops, on the side they approach from (m)
const LATERAL_OFFSET: f64 = 1.0;

/// Frames in the precomputed movement path
const PATH_FRAMES: usize = 30;

/// Slack for the reachability comparison (m)
const REACH_EPSILON: f64 = 1e-6;

/// Scoring weights for the interception search.
///
/// Defaults prioritize reachability and minimal movement over contact height.
#[derive(Debug, Clone)]
pub struct InterceptionWeights {
    pub height: f64,
    pub distance: f64,
    pub buffer: f64,
}

impl Default for InterceptionWeights {
    fn default() -> Self {
        Self {
            height: 1.5,
            distance: 8.0,
            buffer: 10.0,
        }
    }
}

/// Receiver movement and timing analyzer.
pub struct ReceiverAnalyzer {
    weights: InterceptionWeights,
}

impl ReceiverAnalyzer {
    pub fn new() -> Self {
        Self {
            weights: InterceptionWeights::default(),
        }
    }

    pub fn with_weights(weights: InterceptionWeights) -> Self {
        Self { weights }
    }

    /// Analyze a simulated serve from the receiver's point of view.
    pub fn analyze(&self, trajectory: &TrajectoryData, config: &ServeConfig) -> AnalysisResult {
        let start = Vec3::new(config.receiver_position_x, 0.0, config.receiver_position_z);

        // A netted serve never reaches the receiver: no movement to plan.
        let bounce_index = match trajectory.first_bounce_index() {
            Some(index) => index,
            None => return Self::stationary(start, trajectory, config),
        };

        // Score every post-bounce sample. The depth coordinate is clamped to
        // the receiver's stance; backing up past the baseline is not a play.
        let mut best_index = bounce_index + 1;
        let mut best_score = f64::NEG_INFINITY;
        for index in (bounce_index + 1)..trajectory.points.len() {
            let point = &trajectory.points[index];
            let candidate = Vec3::new(point.x, 0.0, point.z.min(start.z));

            let distance = start.horizontal_distance(&candidate);
            let travel_time = if distance < constants::EPSILON {
                0.0
            } else {
                distance / config.receiver_speed
            };
            let arrival_time = config.reaction_delay + travel_time;
            let buffer = trajectory.time_of(index) - arrival_time;

            let height_score = 1.0 - (point.y - IDEAL_CONTACT_HEIGHT).abs();
            let distance_score = -distance;
            let buffer_score = if buffer >= 0.0 {
                buffer.min(BUFFER_SATURATION)
            } else {
                UNREACHABLE_PENALTY
            };

            let score = self.weights.height * height_score
                + self.weights.distance * distance_score
                + self.weights.buffer * buffer_score;
            if score > best_score {
                best_score = score;
                best_index = index;
            }
        }

        let ball_point = &trajectory.points[best_index];
        let intercept_z = ball_point.z.min(start.z);

        // Stop beside the ball, not on top of it.
        let side = if start.x >= ball_point.x { 1.0 } else { -1.0 };
        let target = Vec3::new(ball_point.x + side * LATERAL_OFFSET, 0.0, intercept_z);

        let lateral_travel = (target.x - start.x).abs();
        let depth_travel = (target.z - start.z).abs();
        let total_distance = start.horizontal_distance(&target);

        let receive_time = trajectory.time_of(best_index);
        let effective_time = (receive_time - config.reaction_delay).max(0.0);
        let required_speed = if total_distance < constants::EPSILON {
            0.0
        } else if effective_time <= 0.0 {
            f64::INFINITY
        } else {
            total_distance / effective_time
        };

        let travel_time = if total_distance < constants::EPSILON {
            0.0
        } else {
            total_distance / config.receiver_speed
        };
        let arrival_time = config.reaction_delay + travel_time;
        let timing_buffer = receive_time - arrival_time;
        let can_reach =
            total_distance <= config.receiver_speed * effective_time + REACH_EPSILON;

        AnalysisResult {
            receiver_start: start,
            receiver_target: target,
            lateral_travel,
            depth_travel,
            total_distance,
            receive_time,
            effective_time,
            required_speed,
            timing_buffer,
            difficulty: Difficulty::from_required_speed(required_speed),
            post_bounce_travel: trajectory.post_bounce_travel,
            post_bounce_velocity: trajectory.post_bounce_velocity,
            movement: Self::build_movement(
                start,
                target,
                config.reaction_delay,
                arrival_time,
                receive_time,
                can_reach,
            ),
        }
    }

    /// Result for a serve the receiver never has to play (net impact): the
    /// receiver holds their stance, with all movement numbers at zero.
    fn stationary(start: Vec3, trajectory: &TrajectoryData, config: &ServeConfig) -> AnalysisResult {
        let receive_time = trajectory.time_to_first_bounce;
        let effective_time = (receive_time - config.reaction_delay).max(0.0);

        AnalysisResult {
            receiver_start: start,
            receiver_target: start,
            lateral_travel: 0.0,
            depth_travel: 0.0,
            total_distance: 0.0,
            receive_time,
            effective_time,
            required_speed: 0.0,
            timing_buffer: receive_time - config.reaction_delay,
            difficulty: Difficulty::RelativelyEasy,
            post_bounce_travel: trajectory.post_bounce_travel,
            post_bounce_velocity: trajectory.post_bounce_velocity,
            movement: Self::build_movement(
                start,
                start,
                config.reaction_delay,
                config.reaction_delay,
                receive_time,
                true,
            ),
        }
    }

    /// Precompute the animation path: hold for the reaction delay, ease from
    /// the stance to the target, hold at the target until the ball arrives.
    fn build_movement(
        start: Vec3,
        target: Vec3,
        reaction_delay: f64,
        arrival_time: f64,
        ball_arrival: f64,
        can_reach: bool,
    ) -> ReceiverMovement {
        let duration = arrival_time.max(ball_arrival);
        let span = arrival_time - reaction_delay;

        let mut path = Vec::with_capacity(PATH_FRAMES);
        for frame in 0..PATH_FRAMES {
            let t = duration * frame as f64 / (PATH_FRAMES - 1) as f64;
            let position = if t <= reaction_delay {
                start
            } else if t < arrival_time && span > constants::EPSILON {
                start.lerp(&target, ease_in_out((t - reaction_delay) / span))
            } else {
                target
            };
            path.push(position);
        }

        ReceiverMovement {
            start,
            target,
            path,
            arrival_time,
            can_reach,
        }
    }
}

impl Default for ReceiverAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Smoothstep ease-in-out on [0, 1].
fn ease_in_out(u: f64) -> f64 {
    let u = u.clamp(0.0, 1.0);
    u * u * (3.0 - 2.0 * u)
}

// =============================================================================
// Tests
// =============================================================================

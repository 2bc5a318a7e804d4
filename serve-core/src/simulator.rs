//! Serve flight simulation.
//!
//! Steps the ball point-mass from the serve contact through gravity and drag,
//! watching for the net and the ground, then follows the rebound through a
//! second flight segment until the second touch.
//!
//! The simulation is a pure function of (start, velocity, configuration): no
//! internal state survives a call, so the optimizer can re-run it thousands
//! of times per query without shared-state hazards.

use crate::collision::{bounce_response, ground_contact, net_impact};
use crate::court::CourtModel;
use crate::forces::ServeForces;
use crate::integrator::SemiImplicitEuler;
use crate::types::{constants, FlightState, ServeConfig, TrajectoryData, Vec3};

/// Step cap per flight segment. A segment of a legal serve lasts well under
/// two seconds; the cap only bounds runaway inputs.
const MAX_SEGMENT_STEPS: usize = 5_000;

/// Time-stepping trajectory simulator.
pub struct TrajectorySimulator {
    court: CourtModel,
    forces: ServeForces,
}

impl TrajectorySimulator {
    pub fn new(court: CourtModel) -> Self {
        Self {
            court,
            forces: ServeForces::new(),
        }
    }

    pub fn court(&self) -> &CourtModel {
        &self.court
    }

    /// Serve contact point for a configuration: the server's stance on the
    /// baseline at the configured contact height.
    pub fn serve_origin(&self, config: &ServeConfig) -> Vec3 {
        Vec3::new(
            config.server_position_x,
            config.server_height,
            self.court.server_baseline_z(),
        )
    }

    /// Launch velocity for a configuration.
    ///
    /// The horizontal direction points from the contact point to the aimed
    /// target; the configured vertical angle splits the speed between the
    /// horizontal plane and the Y axis. A target directly under the server
    /// degenerates to a straight vertical launch.
    pub fn launch_velocity(&self, config: &ServeConfig) -> Vec3 {
        let start = self.serve_origin(config);
        let aim = Vec3::new(config.target_x, 0.0, config.target_z);
        let direction = (aim - start).horizontal().normalized();
        let speed = config.serve_speed * constants::KMH_TO_MS;
        Self::compose_velocity(direction, speed, config.vertical_angle.to_radians())
    }

    /// Split `speed_ms` into horizontal and vertical components along a unit
    /// ground-plane direction.
    pub fn compose_velocity(direction: Vec3, speed_ms: f64, vertical_angle_rad: f64) -> Vec3 {
        let mut velocity = direction * (speed_ms * vertical_angle_rad.cos());
        velocity.y = speed_ms * vertical_angle_rad.sin();
        velocity
    }

    /// Simulate the configured serve from contact to second touch.
    pub fn calculate(&self, config: &ServeConfig) -> TrajectoryData {
        let start = self.serve_origin(config);
        let velocity = self.launch_velocity(config);
        self.simulate(start, velocity, config)
    }

    /// Simulate a serve from an explicit start state.
    ///
    /// First segment: integrate until the ball crosses the net plane below
    /// the cord (terminal net impact) or touches the ground (bounce). Second
    /// segment: apply the bounce response and integrate until the ground
    /// again. Points from both segments land in one chronological sequence
    /// at the fixed time step.
    pub fn simulate(&self, start: Vec3, velocity: Vec3, config: &ServeConfig) -> TrajectoryData {
        let dt = constants::TIME_STEP;
        let mut state = FlightState::new(start, velocity);
        let mut points = vec![start];
        let mut time = 0.0;
        let mut net_hit: Option<Vec3> = None;
        let mut first_contact: Option<(Vec3, Vec3)> = None;

        for _ in 0..MAX_SEGMENT_STEPS {
            let prev = state.pos;
            state = SemiImplicitEuler::step(&state, &self.forces, dt);
            time += dt;

            if let Some(impact) = net_impact(&prev, &state.pos, self.court.net_height) {
                points.push(impact);
                net_hit = Some(impact);
                break;
            }

            if ground_contact(&state.pos) {
                let contact = Vec3::new(state.pos.x, 0.0, state.pos.z);
                points.push(contact);
                first_contact = Some((contact, state.vel));
                break;
            }

            points.push(state.pos);
        }

        // A net impact truncates the flight: no bounce segment, bounce
        // fields collapse to zero.
        let mut bounce_point = Vec3::ZERO;
        let mut second_bounce = Vec3::ZERO;
        let mut post_bounce_velocity = Vec3::ZERO;

        if net_hit.is_none() {
            if let Some((contact, impact_velocity)) = first_contact {
                bounce_point = contact;
                post_bounce_velocity =
                    bounce_response(&impact_velocity, config.bounce_velocity_retention);

                let mut state = FlightState::new(contact, post_bounce_velocity);
                second_bounce = contact;
                for _ in 0..MAX_SEGMENT_STEPS {
                    state = SemiImplicitEuler::step(&state, &self.forces, dt);
                    if ground_contact(&state.pos) {
                        second_bounce = Vec3::new(state.pos.x, 0.0, state.pos.z);
                        points.push(second_bounce);
                        break;
                    }
                    points.push(state.pos);
                }
            }
        }

        TrajectoryData {
            points,
            bounce_point,
            second_bounce,
            post_bounce_travel: second_bounce - bounce_point,
            post_bounce_velocity,
            time_to_first_bounce: time,
            landing_x: bounce_point.x,
            net_impact: net_hit,
        }
    }
}

impl Default for TrajectorySimulator {
    fn default() -> Self {
        Self::new(CourtModel::itf_regulation())
    }
}

// =============================================================================
// Tests
// =============================================================================

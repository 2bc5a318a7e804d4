//! Serve parameter search.
//!
//! Given a desired landing point, finds a launch speed and vertical angle
//! that put the ball there while clearing the net with margin. The horizontal
//! aim is fixed by the target, so the search is two-dimensional.
//!
//! Drag makes the flight non-parabolic, so closed-form projectile equations
//! land short of reality; every candidate is instead re-simulated through the
//! real integrator and judged on where it actually comes down.
//!
//! The speed loop runs from the maximum downward and returns the first
//! (speed, angle) pair that satisfies both the landing tolerance and the net
//! clearance: the serve strategy is "as hard as possible while still in".

use crate::collision::net_crossing_height;
use crate::court::CourtModel;
use crate::simulator::TrajectorySimulator;
use crate::types::{constants, ServeConfig, TrajectoryData, Vec3};

/// Search bounds and acceptance tolerances for the serve search.
#[derive(Debug, Clone)]
pub struct OptimizerParams {
    pub max_speed_kmh: f64,
    pub min_speed_kmh: f64,
    pub speed_step_kmh: f64,
    pub min_angle_deg: f64,
    pub max_angle_deg: f64,
    pub angle_step_deg: f64,
    /// Accepted distance between the simulated landing and the target (m)
    pub landing_tolerance: f64,
    /// Required excess height over the net cord (m)
    pub min_net_clearance: f64,
    /// Fallback lob when the search comes up empty
    pub fallback_speed_kmh: f64,
    pub fallback_angle_deg: f64,
}

impl Default for OptimizerParams {
    fn default() -> Self {
        Self {
            max_speed_kmh: 220.0,
            min_speed_kmh: 50.0,
            speed_step_kmh: 1.0,
            min_angle_deg: -20.0,
            max_angle_deg: 45.0,
            angle_step_deg: 0.5,
            landing_tolerance: 0.25,
            min_net_clearance: 0.15,
            fallback_speed_kmh: 80.0,
            fallback_angle_deg: 20.0,
        }
    }
}

/// Launch parameters produced by the search.
///
/// `fallback` marks the conservative safe lob returned when no candidate in
/// the search bounds both lands on target and clears the net; a fallback is
/// aimed correctly but makes no landing-accuracy promise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServeSolution {
    pub speed_kmh: f64,
    pub vertical_angle_deg: f64,
    pub horizontal_angle_rad: f64,
    pub fallback: bool,
}

/// Inverse-kinematics search over launch speed and vertical angle.
pub struct ServeOptimizer {
    params: OptimizerParams,
    simulator: TrajectorySimulator,
}

impl ServeOptimizer {
    pub fn new(court: CourtModel) -> Self {
        Self::with_params(court, OptimizerParams::default())
    }

    pub fn with_params(court: CourtModel, params: OptimizerParams) -> Self {
        Self {
            params,
            simulator: TrajectorySimulator::new(court),
        }
    }

    /// Find launch parameters that land at `(target_x, target_z)` from a serve
    /// struck at `(server_x, server_height)` on the baseline.
    pub fn optimize(
        &self,
        target_x: f64,
        target_z: f64,
        server_x: f64,
        server_height: f64,
    ) -> ServeSolution {
        let court = self.simulator.court();
        let start = Vec3::new(server_x, server_height, court.server_baseline_z());
        let aim = Vec3::new(target_x, 0.0, target_z);

        let dx = target_x - server_x;
        let dz = target_z - start.z;
        let horizontal_angle_rad = dx.atan2(dz);
        let direction = (aim - start).horizontal().normalized();
        let target_range = start.horizontal_distance(&aim);
        let net_height = court.net_height;
        let net_plane_z = court.net_plane_z();

        // Retention only shapes the post-bounce segment, which the search
        // never looks at.
        let probe = ServeConfig {
            target_x,
            target_z,
            server_position_x: server_x,
            server_height,
            ..ServeConfig::default()
        };

        let mut speed_kmh = self.params.max_speed_kmh;
        while speed_kmh >= self.params.min_speed_kmh - 1e-9 {
            let speed_ms = speed_kmh * constants::KMH_TO_MS;

            let mut angle_deg = self.params.min_angle_deg;
            while angle_deg <= self.params.max_angle_deg + 1e-9 {
                let velocity = TrajectorySimulator::compose_velocity(
                    direction,
                    speed_ms,
                    angle_deg.to_radians(),
                );
                let trajectory = self.simulator.simulate(start, velocity, &probe);

                // A candidate counts only when the first touch is past the
                // net; a netted or short serve never matches the target.
                if trajectory.net_impact.is_none() && trajectory.bounce_point.z > net_plane_z {
                    let landing_error = (start.horizontal_distance(&trajectory.bounce_point)
                        - target_range)
                        .abs();
                    if landing_error <= self.params.landing_tolerance {
                        if let Some(height) = net_crossing_height(&trajectory.points) {
                            if height > net_height + self.params.min_net_clearance {
                                return ServeSolution {
                                    speed_kmh,
                                    vertical_angle_deg: angle_deg,
                                    horizontal_angle_rad,
                                    fallback: false,
                                };
                            }
                        }
                    }
                }

                angle_deg += self.params.angle_step_deg;
            }

            speed_kmh -= self.params.speed_step_kmh;
        }

        // Nothing in the search window works: a slow high lob at the same aim
        // keeps the display sensible without pretending to hit the target.
        ServeSolution {
            speed_kmh: self.params.fallback_speed_kmh,
            vertical_angle_deg: self.params.fallback_angle_deg,
            horizontal_angle_rad,
            fallback: true,
        }
    }

    /// Simulate a solution the way the search judged it (same start, aim and
    /// integrator), for callers that want the resulting trajectory.
    pub fn resimulate(
        &self,
        solution: &ServeSolution,
        target_x: f64,
        target_z: f64,
        server_x: f64,
        server_height: f64,
    ) -> TrajectoryData {
        let court = self.simulator.court();
        let start = Vec3::new(server_x, server_height, court.server_baseline_z());
        let aim = Vec3::new(target_x, 0.0, target_z);
        let direction = (aim - start).horizontal().normalized();
        let velocity = TrajectorySimulator::compose_velocity(
            direction,
            solution.speed_kmh * constants::KMH_TO_MS,
            solution.vertical_angle_deg.to_radians(),
        );
        let probe = ServeConfig {
            target_x,
            target_z,
            server_position_x: server_x,
            server_height,
            ..ServeConfig::default()
        };
        self.simulator.simulate(start, velocity, &probe)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimized_serve_lands_near_target() {
        let optimizer = ServeOptimizer::new(CourtModel::itf_regulation());
        let (target_x, target_z, server_x, server_height) = (0.0, 4.0, 1.5, 1.0);

        let solution = optimizer.optimize(target_x, target_z, server_x, server_height);
        assert!(
            !solution.fallback,
            "A center target from a 1m contact should be servable"
        );

        let trajectory =
            optimizer.resimulate(&solution, target_x, target_z, server_x, server_height);
        assert!(trajectory.net_impact.is_none());
        assert!(
            (trajectory.bounce_point.z - target_z).abs() < 0.5,
            "Landing depth {} should be near {}",
            trajectory.bounce_point.z,
            target_z
        );
        assert!(
            (trajectory.bounce_point.x - target_x).abs() < 0.5,
            "Landing {} should be near {}",
            trajectory.bounce_point.x,
            target_x
        );
    }

    #[test]
    fn test_non_fallback_solutions_clear_the_net_with_margin() {
        let optimizer = ServeOptimizer::new(CourtModel::itf_regulation());
        let court = CourtModel::itf_regulation();

        for (target_x, target_z, server_x, server_height) in
            [(0.0, 4.0, 1.5, 1.0), (2.0, 5.0, 0.0, 2.8), (-3.0, 3.5, -1.0, 2.0)]
        {
            let solution = optimizer.optimize(target_x, target_z, server_x, server_height);
            if solution.fallback {
                continue;
            }

            let trajectory =
                optimizer.resimulate(&solution, target_x, target_z, server_x, server_height);
            let clearance = net_crossing_height(&trajectory.points)
                .expect("accepted serve must cross the net plane")
                - court.net_height;
            assert!(
                clearance > 0.15 - 1e-9,
                "Clearance {} below the required margin",
                clearance
            );

            let start = Vec3::new(server_x, server_height, court.server_baseline_z());
            let aim = Vec3::new(target_x, 0.0, target_z);
            let landing_error = (start.horizontal_distance(&trajectory.bounce_point)
                - start.horizontal_distance(&aim))
            .abs();
            assert!(
                landing_error <= 0.5,
                "Re-simulated landing error {} too large",
                landing_error
            );
        }
    }

    #[test]
    fn test_search_prefers_the_fastest_feasible_speed() {
        let optimizer = ServeOptimizer::new(CourtModel::itf_regulation());

        // A high contact point admits fast, flat serves; the chosen speed
        // should sit well above the floor of the search window.
        let solution = optimizer.optimize(0.0, 5.0, 0.0, 2.8);
        assert!(!solution.fallback);
        assert!(
            solution.speed_kmh > 100.0,
            "Expected an aggressive serve, got {} km/h",
            solution.speed_kmh
        );
    }

    #[test]
    fn test_horizontal_angle_points_at_the_target() {
        let optimizer = ServeOptimizer::new(CourtModel::itf_regulation());
        let solution = optimizer.optimize(4.0, 4.0, 0.0, 2.8);

        // dx = 4.0, dz = 4.0 + 11.885
        let expected = 4.0_f64.atan2(4.0 + 23.77 / 2.0);
        assert!((solution.horizontal_angle_rad - expected).abs() < 1e-12);
    }

    #[test]
    fn test_impossible_window_falls_back_to_lob() {
        // Only steep downward angles allowed: from a 1m contact nothing in
        // this window can clear the net, let alone land on target.
        let params = OptimizerParams {
            max_speed_kmh: 60.0,
            min_speed_kmh: 50.0,
            min_angle_deg: -20.0,
            max_angle_deg: -10.0,
            ..OptimizerParams::default()
        };
        let optimizer = ServeOptimizer::with_params(CourtModel::itf_regulation(), params);

        let solution = optimizer.optimize(0.0, 4.0, 1.5, 1.0);
        assert!(solution.fallback);
        assert_eq!(solution.speed_kmh, 80.0);
        assert_eq!(solution.vertical_angle_deg, 20.0);
        // The lob is still aimed at the target
        let expected = (-1.5_f64).atan2(4.0 + 23.77 / 2.0);
        assert!((solution.horizontal_angle_rad - expected).abs() < 1e-12);
    }

    #[test]
    fn test_search_is_deterministic() {
        let optimizer = ServeOptimizer::new(CourtModel::itf_regulation());
        let a = optimizer.optimize(1.0, 4.5, 0.5, 2.5);
        let b = optimizer.optimize(1.0, 4.5, 0.5, 2.5);
        assert_eq!(a, b);
    }
}

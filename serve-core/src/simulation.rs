//! Session orchestrator.
//!
//! Owns the latest configuration and keeps the derived trajectory and
//! receiver analysis in sync with it. Every change arrives as a tagged
//! [`ConfigUpdate`]; moving the target runs the serve search and writes the
//! found launch parameters back, everything else is a direct field update.
//! Recomputation is synchronous and whole — the latest update always wins and
//! there is never a partially updated result.

use crate::court::CourtModel;
use crate::optimizer::{OptimizerParams, ServeOptimizer};
use crate::receiver::ReceiverAnalyzer;
use crate::simulator::TrajectorySimulator;
use crate::surfaces::SurfaceProperties;
use crate::types::{AnalysisResult, ServeConfig, TrajectoryData};

/// A single configuration change from the host.
///
/// The tag decides the recomputation route: `TargetMoved` goes through the
/// optimizer, the rest replace one field and re-derive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigUpdate {
    /// The aimed landing point was dragged; find new launch parameters
    TargetMoved { x: f64, z: f64 },
    /// Serve speed in km/h
    ServeSpeed(f64),
    /// Vertical launch angle in degrees
    VerticalAngle(f64),
    /// Server stance along the baseline (m)
    ServerPosition(f64),
    /// Serve contact height (m)
    ServerHeight(f64),
    /// Horizontal bounce retention ratio
    BounceRetention(f64),
    /// Receiver stance was dragged
    ReceiverMoved { x: f64, z: f64 },
    /// Receiver top speed (m/s)
    ReceiverSpeed(f64),
    /// Receiver reaction delay (s)
    ReactionDelay(f64),
}

/// Interactive serve session: configuration plus its derived results.
pub struct ServeSimulation {
    config: ServeConfig,
    simulator: TrajectorySimulator,
    optimizer: ServeOptimizer,
    analyzer: ReceiverAnalyzer,
    trajectory: TrajectoryData,
    analysis: AnalysisResult,
}

impl ServeSimulation {
    pub fn new(config: ServeConfig) -> Self {
        Self::with_optimizer_params(config, OptimizerParams::default())
    }

    /// Session with custom search bounds (narrower windows make the target
    /// drag cheaper on weak hosts).
    pub fn with_optimizer_params(config: ServeConfig, params: OptimizerParams) -> Self {
        let court = CourtModel::itf_regulation();
        let simulator = TrajectorySimulator::new(court.clone());
        let optimizer = ServeOptimizer::with_params(court, params);
        let analyzer = ReceiverAnalyzer::new();

        let trajectory = simulator.calculate(&config);
        let analysis = analyzer.analyze(&trajectory, &config);

        Self {
            config,
            simulator,
            optimizer,
            analyzer,
            trajectory,
            analysis,
        }
    }

    pub fn config(&self) -> &ServeConfig {
        &self.config
    }

    pub fn trajectory(&self) -> &TrajectoryData {
        &self.trajectory
    }

    pub fn analysis(&self) -> &AnalysisResult {
        &self.analysis
    }

    /// Apply one configuration change and re-derive both results.
    pub fn apply(&mut self, update: ConfigUpdate) {
        let court = self.simulator.court().clone();
        match update {
            ConfigUpdate::TargetMoved { x, z } => {
                // Keep the target inside the serviceable window, then let the
                // search pick speed and angle for it.
                let x = x.clamp(-court.center_to_singles_line, court.center_to_singles_line);
                let z = z.clamp(0.5, court.service_line_distance);
                let solution = self.optimizer.optimize(
                    x,
                    z,
                    self.config.server_position_x,
                    self.config.server_height,
                );
                self.config.target_x = x;
                self.config.target_z = z;
                self.config.serve_speed = solution.speed_kmh;
                self.config.vertical_angle = solution.vertical_angle_deg;
            }
            ConfigUpdate::ServeSpeed(speed) => self.config.serve_speed = speed,
            ConfigUpdate::VerticalAngle(angle) => self.config.vertical_angle = angle,
            ConfigUpdate::ServerPosition(x) => {
                self.config.server_position_x =
                    x.clamp(-court.center_to_doubles_line, court.center_to_doubles_line);
            }
            ConfigUpdate::ServerHeight(height) => self.config.server_height = height,
            ConfigUpdate::BounceRetention(retention) => {
                self.config.bounce_velocity_retention = retention.clamp(0.0, 1.0);
            }
            ConfigUpdate::ReceiverMoved { x, z } => {
                // The receiver may roam a little outside the lines but stays
                // behind their baseline.
                let margin = 2.0;
                self.config.receiver_position_x = x.clamp(
                    -court.width / 2.0 - margin,
                    court.width / 2.0 + margin,
                );
                self.config.receiver_position_z = z.clamp(
                    court.receiver_baseline_z(),
                    court.receiver_baseline_z() + 5.0,
                );
            }
            ConfigUpdate::ReceiverSpeed(speed) => self.config.receiver_speed = speed,
            ConfigUpdate::ReactionDelay(delay) => {
                self.config.reaction_delay = delay.max(0.0);
            }
        }

        self.recompute();
    }

    /// Apply a court surface preset (retention only; the vertical response is
    /// the fixed restitution).
    pub fn set_surface(&mut self, surface: &SurfaceProperties) {
        self.apply(ConfigUpdate::BounceRetention(
            surface.bounce_velocity_retention,
        ));
    }

    fn recompute(&mut self) {
        self.trajectory = self.simulator.calculate(&self.config);
        self.analysis = self.analyzer.analyze(&self.trajectory, &self.config);
    }
}

impl Default for ServeSimulation {
    fn default() -> Self {
        Self::new(ServeConfig::default())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surfaces::SurfaceProperties;

    /// Narrow, infeasible search window: `TargetMoved` resolves immediately
    /// to the fallback lob, which keeps these tests fast and deterministic.
    fn lob_only_params() -> OptimizerParams {
        OptimizerParams {
            max_speed_kmh: 60.0,
            min_speed_kmh: 50.0,
            min_angle_deg: -20.0,
            max_angle_deg: -10.0,
            ..OptimizerParams::default()
        }
    }

    #[test]
    fn test_session_derives_results_on_construction() {
        let session = ServeSimulation::default();
        assert!(session.trajectory().points.len() > 2);
        assert_eq!(
            session.analysis().receiver_start.x,
            session.config().receiver_position_x
        );
    }

    #[test]
    fn test_identical_sessions_agree() {
        let a = ServeSimulation::default();
        let b = ServeSimulation::default();
        assert_eq!(a.trajectory(), b.trajectory());
        assert_eq!(a.analysis(), b.analysis());
    }

    #[test]
    fn test_parameter_update_recomputes_downstream() {
        let mut session = ServeSimulation::default();
        let before = session.trajectory().clone();

        session.apply(ConfigUpdate::ServeSpeed(100.0));

        assert_eq!(session.config().serve_speed, 100.0);
        assert_ne!(
            session.trajectory(),
            &before,
            "Speed change must reshape the trajectory"
        );
    }

    #[test]
    fn test_reaction_delay_touches_analysis_only() {
        let mut session = ServeSimulation::default();
        let trajectory_before = session.trajectory().clone();
        let analysis_before = session.analysis().clone();

        session.apply(ConfigUpdate::ReactionDelay(0.6));

        assert_eq!(
            session.trajectory(),
            &trajectory_before,
            "Receiver timing must not reshape the ball flight"
        );
        assert_ne!(session.analysis(), &analysis_before);
    }

    #[test]
    fn test_target_drag_runs_the_search_and_writes_back() {
        let mut session =
            ServeSimulation::with_optimizer_params(ServeConfig::default(), lob_only_params());

        session.apply(ConfigUpdate::TargetMoved { x: 2.0, z: 5.0 });

        let config = session.config();
        assert_eq!(config.target_x, 2.0);
        assert_eq!(config.target_z, 5.0);
        // The infeasible window resolves to the fallback lob parameters
        assert_eq!(config.serve_speed, 80.0);
        assert_eq!(config.vertical_angle, 20.0);
    }

    #[test]
    fn test_target_drag_is_clamped_to_the_service_window() {
        let mut session =
            ServeSimulation::with_optimizer_params(ServeConfig::default(), lob_only_params());

        session.apply(ConfigUpdate::TargetMoved { x: 10.0, z: 20.0 });

        assert_eq!(session.config().target_x, 4.115);
        assert_eq!(session.config().target_z, 6.4);
    }

    #[test]
    fn test_receiver_drag_is_clamped_behind_the_baseline() {
        let mut session = ServeSimulation::default();

        session.apply(ConfigUpdate::ReceiverMoved { x: 0.0, z: 0.0 });

        let config = session.config();
        assert_eq!(config.receiver_position_z, 23.77 / 2.0);
        assert_eq!(config.receiver_position_x, 0.0);
    }

    #[test]
    fn test_surface_preset_changes_the_bounce() {
        let mut session = ServeSimulation::new(ServeConfig {
            serve_speed: 80.0,
            vertical_angle: 25.0,
            ..ServeConfig::default()
        });
        let lively = session.trajectory().post_bounce_travel.z;

        session.set_surface(&SurfaceProperties::clay());

        assert_eq!(
            session.config().bounce_velocity_retention,
            SurfaceProperties::clay().bounce_velocity_retention
        );
        assert!(
            session.trajectory().post_bounce_travel.z < lively,
            "Clay must deaden the bounce relative to the default hard court"
        );
    }
}

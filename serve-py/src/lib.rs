//! Python bindings for the serve-core physics engine.
//!
//! Provides a simple Python API for hosts that render the scene and own the
//! animation loop:
//!
//! ```python
//! from serve_physics import ServeSimulator
//!
//! sim = ServeSimulator()
//! sim.move_target(0.0, 4.0)          # runs the serve search
//! print(sim.serve_speed(), sim.vertical_angle())
//!
//! for point in sim.trajectory_points():
//!     draw_ball(point.x, point.y, point.z)
//!
//! print(sim.difficulty(), sim.can_reach())
//! ```

use pyo3::exceptions::{PyFileNotFoundError, PyIOError, PyValueError};
use pyo3::prelude::*;

use serve_core::simulation::{ConfigUpdate, ServeSimulation};
use serve_core::surfaces::{SurfaceCatalog, SurfaceError};
use serve_core::types::{ServeConfig, Vec3 as CoreVec3};

/// 3D vector for positions and velocities.
#[pyclass]
#[derive(Clone, Copy)]
pub struct Vec3 {
    #[pyo3(get, set)]
    pub x: f64,
    #[pyo3(get, set)]
    pub y: f64,
    #[pyo3(get, set)]
    pub z: f64,
}

#[pymethods]
impl Vec3 {
    #[new]
    fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    fn __repr__(&self) -> String {
        format!("Vec3({:.4}, {:.4}, {:.4})", self.x, self.y, self.z)
    }

    fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    fn to_tuple(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }
}

impl From<CoreVec3> for Vec3 {
    fn from(v: CoreVec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<Vec3> for CoreVec3 {
    fn from(v: Vec3) -> Self {
        CoreVec3::new(v.x, v.y, v.z)
    }
}

fn surface_err(err: SurfaceError) -> PyErr {
    match err {
        SurfaceError::NotFound(name) => PyFileNotFoundError::new_err(name),
        SurfaceError::IoError(e) => PyIOError::new_err(e.to_string()),
        SurfaceError::ParseError(e) => PyValueError::new_err(e.to_string()),
    }
}

/// Main simulator class.
///
/// Owns the configuration and the derived trajectory/analysis; every setter
/// recomputes both synchronously.
#[pyclass]
pub struct ServeSimulator {
    session: ServeSimulation,
}

#[pymethods]
impl ServeSimulator {
    #[new]
    fn new() -> Self {
        Self {
            session: ServeSimulation::new(ServeConfig::default()),
        }
    }

    // --- configuration updates -------------------------------------------

    /// Drag the aimed landing point: runs the serve search and adopts the
    /// found speed and vertical angle.
    fn move_target(&mut self, x: f64, z: f64) {
        self.session.apply(ConfigUpdate::TargetMoved { x, z });
    }

    /// Serve speed in km/h.
    fn set_serve_speed(&mut self, speed_kmh: f64) {
        self.session.apply(ConfigUpdate::ServeSpeed(speed_kmh));
    }

    /// Vertical launch angle in degrees.
    fn set_vertical_angle(&mut self, degrees: f64) {
        self.session.apply(ConfigUpdate::VerticalAngle(degrees));
    }

    /// Server stance along the baseline, meters from center.
    fn set_server_position(&mut self, x: f64) {
        self.session.apply(ConfigUpdate::ServerPosition(x));
    }

    /// Serve contact height in meters.
    fn set_server_height(&mut self, height: f64) {
        self.session.apply(ConfigUpdate::ServerHeight(height));
    }

    /// Horizontal bounce retention ratio (0..1).
    fn set_bounce_retention(&mut self, retention: f64) {
        self.session.apply(ConfigUpdate::BounceRetention(retention));
    }

    /// Receiver stance on the far side.
    fn set_receiver_position(&mut self, x: f64, z: f64) {
        self.session.apply(ConfigUpdate::ReceiverMoved { x, z });
    }

    /// Receiver top speed in m/s.
    fn set_receiver_speed(&mut self, speed: f64) {
        self.session.apply(ConfigUpdate::ReceiverSpeed(speed));
    }

    /// Receiver reaction delay in seconds.
    fn set_reaction_delay(&mut self, delay: f64) {
        self.session.apply(ConfigUpdate::ReactionDelay(delay));
    }

    /// Load a surface preset from a catalog directory and apply it.
    fn apply_surface(&mut self, surfaces_dir: &str, name: &str) -> PyResult<()> {
        let catalog = SurfaceCatalog::new(surfaces_dir);
        let surface = catalog.load(name).map_err(surface_err)?;
        self.session.set_surface(&surface);
        Ok(())
    }

    // --- configuration readbacks -----------------------------------------

    fn serve_speed(&self) -> f64 {
        self.session.config().serve_speed
    }

    fn vertical_angle(&self) -> f64 {
        self.session.config().vertical_angle
    }

    fn target(&self) -> (f64, f64) {
        let config = self.session.config();
        (config.target_x, config.target_z)
    }

    // --- trajectory ------------------------------------------------------

    /// All sampled ball positions, both flight segments, in order.
    fn trajectory_points(&self) -> Vec<Vec3> {
        self.session
            .trajectory()
            .points
            .iter()
            .map(|p| Vec3::from(*p))
            .collect()
    }

    fn bounce_point(&self) -> Vec3 {
        self.session.trajectory().bounce_point.into()
    }

    fn second_bounce(&self) -> Vec3 {
        self.session.trajectory().second_bounce.into()
    }

    fn time_to_first_bounce(&self) -> f64 {
        self.session.trajectory().time_to_first_bounce
    }

    /// Net impact point, or None when the serve cleared.
    fn net_impact(&self) -> Option<Vec3> {
        self.session.trajectory().net_impact.map(Vec3::from)
    }

    // --- receiver analysis -----------------------------------------------

    fn receiver_start(&self) -> Vec3 {
        self.session.analysis().receiver_start.into()
    }

    fn receiver_target(&self) -> Vec3 {
        self.session.analysis().receiver_target.into()
    }

    fn total_distance(&self) -> f64 {
        self.session.analysis().total_distance
    }

    fn receive_time(&self) -> f64 {
        self.session.analysis().receive_time
    }

    fn effective_time(&self) -> f64 {
        self.session.analysis().effective_time
    }

    /// Required receiver speed in m/s; `inf` when the ball cannot be reached
    /// in time at any speed.
    fn required_speed(&self) -> f64 {
        self.session.analysis().required_speed
    }

    fn timing_buffer(&self) -> f64 {
        self.session.analysis().timing_buffer
    }

    fn difficulty(&self) -> String {
        self.session.analysis().difficulty.to_string()
    }

    fn can_reach(&self) -> bool {
        self.session.analysis().movement.can_reach
    }

    /// Precomputed receiver animation frames from stance to interception.
    fn receiver_path(&self) -> Vec<Vec3> {
        self.session
            .analysis()
            .movement
            .path
            .iter()
            .map(|p| Vec3::from(*p))
            .collect()
    }

    fn receiver_arrival_time(&self) -> f64 {
        self.session.analysis().movement.arrival_time
    }
}

#[pymodule]
fn serve_physics(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Vec3>()?;
    m.add_class::<ServeSimulator>()?;
    Ok(())
}

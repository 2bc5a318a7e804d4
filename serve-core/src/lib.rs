//! # Serve Core
//!
//! A physics engine for an interactive tennis serve and return simulator.
//!
//! ## Architecture
//!
//! - `types`: Core data structures (Vec3, configuration, derived results)
//! - `court`: ITF court geometry
//! - `integrator`: Numerical integration (semi-implicit Euler)
//! - `forces`: Physical forces (gravity, quadratic drag)
//! - `collision`: Net crossing detection and ground bounce response
//! - `simulator`: Two-segment flight simulation
//! - `optimizer`: Launch speed/angle search for a target landing point
//! - `receiver`: Interception scoring and movement planning
//! - `simulation`: Session orchestrator driven by tagged updates
//! - `surfaces`: YAML-based court surface loader

pub mod collision;
pub mod court;
pub mod forces;
pub mod integrator;
pub mod optimizer;
pub mod receiver;
pub mod simulation;
pub mod simulator;
pub mod surfaces;
pub mod types;

//! Collision handling for serve flight.
//!
//! Two surfaces matter to a serve:
//! - **Net**: a vertical plane at Z = 0; hitting it ends the flight
//! - **Ground**: the Y = 0 plane; hitting it produces the bounce
//!
//! ## Crossing detection
//!
//! The flight is sampled at a fixed step, so at serve speed the ball moves
//! ~0.3m of depth per sample and can jump straight over a thin test band
//! around the net plane. Detection therefore works on consecutive sample
//! pairs: a sign change of Z marks the crossing, and the impact height is
//! interpolated at the plane.
//!
//! ```text
//! sample k          sample k+1
//!    ●────────────────●
//!         \     ↑
//!          \    net plane (Z = 0)
//! ══════════╳═══════════
//!           └─ interpolated crossing
//! ```

pub mod detection;
pub mod resolution;

pub use detection::*;
pub use resolution::*;

//! Court geometry.
//!
//! Static dimensions of a tennis court plus the coordinate helpers the rest
//! of the engine uses. Pure data, no behavior beyond lookup.

use serde::{Deserialize, Serialize};

/// The tennis court.
///
/// ITF regulation dimensions:
/// - Length: 23.77m (baseline to baseline)
/// - Width: 10.97m (doubles), 8.23m (singles)
/// - Net height: 0.914m at the center
///
/// The court is centered at the origin: the net plane is Z = 0, the server's
/// baseline is Z = -length/2 and the receiver's is Z = +length/2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourtModel {
    pub length: f64,
    pub width: f64,
    pub singles_width: f64,
    /// Depth of the service line measured from the net
    pub service_line_distance: f64,
    /// Distance from a baseline to the same-side service line
    pub baseline_to_service_line: f64,
    pub center_to_singles_line: f64,
    pub center_to_doubles_line: f64,
    pub net_height: f64,
}

impl CourtModel {
    /// Creates an ITF regulation court centered at the origin
    pub fn itf_regulation() -> Self {
        Self {
            length: 23.77,
            width: 10.97,
            singles_width: 8.23,
            service_line_distance: 6.4,
            baseline_to_service_line: 5.5,
            center_to_singles_line: 4.115,
            center_to_doubles_line: 5.485,
            net_height: 0.914,
        }
    }

    /// Z coordinate of the server's baseline
    pub fn server_baseline_z(&self) -> f64 {
        -self.length / 2.0
    }

    /// Z coordinate of the receiver's baseline
    pub fn receiver_baseline_z(&self) -> f64 {
        self.length / 2.0
    }

    /// Z coordinate of the net plane
    pub fn net_plane_z(&self) -> f64 {
        0.0
    }

    /// Check if a ground point (x, z) is inside the singles court
    pub fn is_inside_singles(&self, x: f64, z: f64) -> bool {
        x.abs() <= self.center_to_singles_line && z.abs() <= self.length / 2.0
    }

    /// Check if a ground point (x, z) is inside the receiver-side service
    /// boxes (between the net and the service line)
    pub fn is_inside_service_area(&self, x: f64, z: f64) -> bool {
        x.abs() <= self.center_to_singles_line
            && z > self.net_plane_z()
            && z <= self.service_line_distance
    }
}

impl Default for CourtModel {
    fn default() -> Self {
        Self::itf_regulation()
    }
}

// =============================================================================
// Tests
// =============================================================================

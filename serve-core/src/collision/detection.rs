//! Net and ground contact detection.

use crate::types::{constants, Vec3};

/// Interpolated point where the segment `prev → cur` crosses the net plane
/// (Z = 0), or `None` when the segment stays on one side.
///
/// Only server-to-receiver crossings count; the post-bounce flight never
/// travels back toward the net in this model.
pub fn net_plane_crossing(prev: &Vec3, cur: &Vec3) -> Option<Vec3> {
    if prev.z >= 0.0 || cur.z < 0.0 {
        return None;
    }
    let dz = cur.z - prev.z;
    if dz.abs() < constants::EPSILON {
        return None;
    }
    let t = -prev.z / dz;
    Some(prev.lerp(cur, t))
}

/// Net impact for the segment `prev → cur`, if the ball crosses the net plane
/// below the cord.
///
/// The impact point is snapped onto the plane with the height floored at the
/// ground, which is where the display drops the ball.
pub fn net_impact(prev: &Vec3, cur: &Vec3, net_height: f64) -> Option<Vec3> {
    let crossing = net_plane_crossing(prev, cur)?;
    if crossing.y < net_height {
        Some(Vec3::new(crossing.x, crossing.y.max(0.0), 0.0))
    } else {
        None
    }
}

/// Whether a sampled position has reached the ground.
pub fn ground_contact(pos: &Vec3) -> bool {
    pos.y <= 0.0
}

/// Interpolated ball height where a sampled flight path crosses the net
/// plane, or `None` when the path never crosses it.
///
/// Used by the optimizer to measure net clearance on a candidate trajectory.
pub fn net_crossing_height(points: &[Vec3]) -> Option<f64> {
    points
        .windows(2)
        .find_map(|pair| net_plane_crossing(&pair[0], &pair[1]))
        .map(|crossing| crossing.y)
}

// =============================================================================
// Tests
// =============================================================================

// Pivot-arm kinematics for the surgitouch handle
// Converts raw encoder counts to a normalized, clamped 2D position.

use std::f32::consts::TAU;

use crate::config::{CENTRE_DISTANCE, COUNTS_PER_REV, HEIGHT};

/// Convert raw encoder counts to normalized positions
///
/// Each encoder measures the angle of a pivoting arm; the tangent of that
/// angle projects onto a linear displacement at HEIGHT above the sensed
/// plane, which is then normalized by CENTRE_DISTANCE and hard-clamped.
///
/// # Returns
/// (x, y), each guaranteed within [-1, 1]
pub fn positions_from_encoders(enc1: i32, enc2: i32) -> (f32, f32) {
    positions_from_encoders_with_geometry(enc1, enc2, HEIGHT, COUNTS_PER_REV, CENTRE_DISTANCE)
}

/// Convert raw encoder counts to normalized positions with custom geometry
pub fn positions_from_encoders_with_geometry(
    enc1: i32,
    enc2: i32,
    height: f32,
    counts_per_rev: f32,
    centre_distance: f32,
) -> (f32, f32) {
    let x = normalize_axis(enc1, height, counts_per_rev, centre_distance);
    let y = normalize_axis(enc2, height, counts_per_rev, centre_distance);
    (x, y)
}

fn normalize_axis(count: i32, height: f32, counts_per_rev: f32, centre_distance: f32) -> f32 {
    let angle = count as f32 * TAU / counts_per_rev;
    let length = height * angle.tan();

    // Hard saturation, not rescaling: travel beyond the physical range is
    // simply capped. This also absorbs the tangent blowing up near odd
    // multiples of a quarter turn.
    (length / centre_distance).clamp(-1.0, 1.0)
}

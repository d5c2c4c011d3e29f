//! Direct (straight-line) navigation and head turning.

use zbg_world::Vec3;

use super::behavior::LookRequest;

/// Move toward a target position on the XZ plane.
///
/// Returns `(vx, vz)`, the velocity to apply this tick to move toward `(goal_x, goal_z)`
/// at the given `speed` (blocks/tick).
pub fn move_toward_flat(
    current_x: f32,
    current_z: f32,
    goal_x: f32,
    goal_z: f32,
    speed: f32,
) -> (f32, f32) {
    let dx = goal_x - current_x;
    let dz = goal_z - current_z;
    let dist = (dx * dx + dz * dz).sqrt();

    if dist < 0.1 {
        return (0.0, 0.0);
    }

    // Don't overshoot the goal on the last step
    let step = speed.min(dist);
    (dx / dist * step, dz / dist * step)
}

/// Compute the yaw angle (0..360 degrees) from one position facing another.
///
/// Convention: 0 = south (+Z), 90 = west (-X), 180 = north (-Z), 270 = east (+X).
pub fn yaw_toward(from_x: f32, from_z: f32, to_x: f32, to_z: f32) -> f32 {
    let dx = to_x - from_x;
    let dz = to_z - from_z;
    let yaw = (-dx).atan2(dz).to_degrees();
    ((yaw % 360.0) + 360.0) % 360.0
}

/// Pitch angle (degrees) from `from` facing `to`. Negative looks up.
pub fn pitch_toward(from: Vec3, to: Vec3) -> f32 {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let dz = to.z - from.z;
    let horizontal = (dx * dx + dz * dz).sqrt();
    -(dy.atan2(horizontal).to_degrees())
}

/// Rotate `current` toward `target` by at most `max_step` degrees, taking the short way round.
pub fn approach_degrees(current: f32, target: f32, max_step: f32) -> f32 {
    let mut delta = (target - current) % 360.0;
    if delta > 180.0 {
        delta -= 360.0;
    } else if delta < -180.0 {
        delta += 360.0;
    }
    let step = delta.clamp(-max_step, max_step);
    ((current + step) % 360.0 + 360.0) % 360.0
}

/// New `(head_yaw, pitch)` after one step of turning from `eye` toward the request.
pub fn turn_head(head_yaw: f32, pitch: f32, eye: Vec3, look: &LookRequest) -> (f32, f32) {
    let target_yaw = yaw_toward(eye.x, eye.z, look.point.x, look.point.z);
    let target_pitch = pitch_toward(eye, look.point);
    let new_yaw = approach_degrees(head_yaw, target_yaw, look.max_yaw_step);
    let pitch_step = (target_pitch - pitch).clamp(-look.max_pitch_step, look.max_pitch_step);
    (new_yaw, (pitch + pitch_step).clamp(-90.0, 90.0))
}

/// Distance between two positions in the XZ plane.
pub fn distance_xz(x1: f32, z1: f32, x2: f32, z2: f32) -> f32 {
    let dx = x2 - x1;
    let dz = z2 - z1;
    (dx * dx + dz * dz).sqrt()
}

use crate::foundation::core::{DQuat, DVec3, Pose};

/// Rotates a rigid pose about a pivot point.
///
/// `axis` must be unit length; `angle` is in radians, positive by the right-hand rule.
/// The position is rotated around `pivot` and the orientation is pre-multiplied by the
/// same rotation, so a pose sitting on the axis only changes orientation.
pub fn rotate_around_pivot(
    position: DVec3,
    orientation: DQuat,
    pivot: DVec3,
    axis: DVec3,
    angle: f64,
) -> (DVec3, DQuat) {
    debug_assert!(axis.is_normalized(), "pivot axis must be unit length");
    let rotation = DQuat::from_axis_angle(axis, angle);
    let position = pivot + rotation * (position - pivot);
    let orientation = (rotation * orientation).normalize();
    (position, orientation)
}

impl Pose {
    pub fn rotated_around(&self, pivot: DVec3, axis: DVec3, angle: f64) -> Pose {
        let (position, orientation) =
            rotate_around_pivot(self.position, self.orientation, pivot, axis, angle);
        Pose {
            position,
            orientation,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use super::*;
    use crate::foundation::core::{EPSILON, quat_eq};

    #[test]
    fn zero_angle_is_identity() {
        let q = DQuat::from_rotation_x(0.4);
        let (p, o) = rotate_around_pivot(DVec3::new(1.0, 2.0, 3.0), q, DVec3::ONE, DVec3::Z, 0.0);
        assert!(p.abs_diff_eq(DVec3::new(1.0, 2.0, 3.0), EPSILON));
        assert!(quat_eq(o, q, EPSILON));
    }

    #[test]
    fn quarter_turn_about_offset_pivot() {
        let (p, o) = rotate_around_pivot(
            DVec3::new(2.0, 0.0, 0.0),
            DQuat::IDENTITY,
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::Z,
            FRAC_PI_2,
        );
        assert!(p.abs_diff_eq(DVec3::new(1.0, 1.0, 0.0), EPSILON));
        assert!((o * DVec3::X).abs_diff_eq(DVec3::Y, EPSILON));
    }

    #[test]
    fn point_on_axis_only_reorients() {
        let pivot = DVec3::new(-3.0, 1.0, 0.0);
        let axis = DVec3::new(1.0, 1.0, 0.0).normalize();
        let on_axis = pivot + axis * 2.5;
        let (p, o) = rotate_around_pivot(on_axis, DQuat::IDENTITY, pivot, axis, 1.234);
        assert!(p.abs_diff_eq(on_axis, EPSILON));
        assert!(!quat_eq(o, DQuat::IDENTITY, 1e-6));
    }

    #[test]
    fn positive_angle_follows_right_hand_rule() {
        let (_, o) = rotate_around_pivot(DVec3::ZERO, DQuat::IDENTITY, DVec3::ZERO, DVec3::X, FRAC_PI_2);
        assert!((o * DVec3::Y).abs_diff_eq(DVec3::Z, EPSILON));
    }

    #[test]
    fn opposite_rotations_cancel() {
        let start = Pose::new(DVec3::new(4.0, -1.0, 2.0), DQuat::from_rotation_y(0.3));
        let pivot = DVec3::new(0.5, 0.5, 0.5);
        let axis = DVec3::new(0.0, 0.6, 0.8);
        let back = start
            .rotated_around(pivot, axis, PI / 3.0)
            .rotated_around(pivot, axis, -PI / 3.0);
        assert!(back.abs_diff_eq(&start, EPSILON));
    }
}

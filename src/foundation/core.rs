pub use glam::{DQuat, DVec3};
pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Tolerance used when comparing derived geometry.
pub const EPSILON: f64 = 1e-9;

/// Rigid-body transform: orientation applied first, then translation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Pose {
    pub position: DVec3,
    pub orientation: DQuat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    pub const IDENTITY: Self = Self {
        position: DVec3::ZERO,
        orientation: DQuat::IDENTITY,
    };

    /// Pose from a translation and a unit rotation.
    pub fn new(position: DVec3, orientation: DQuat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Maps a point from this pose's frame into the enclosing frame.
    pub fn transform_point(&self, p: DVec3) -> DVec3 {
        self.position + self.orientation * p
    }

    /// Rotates a direction; translation does not apply.
    pub fn transform_vector(&self, v: DVec3) -> DVec3 {
        self.orientation * v
    }

    /// `self ∘ local`: maps a child-local pose into the frame `self` lives in.
    pub fn compose(&self, local: &Pose) -> Pose {
        Pose {
            position: self.transform_point(local.position),
            orientation: (self.orientation * local.orientation).normalize(),
        }
    }

    /// Local +Z, the panel's face normal.
    pub fn normal(&self) -> DVec3 {
        self.orientation * DVec3::Z
    }

    /// Component-wise comparison within `eps`, treating `q` and `-q` as equal.
    pub fn abs_diff_eq(&self, other: &Pose, eps: f64) -> bool {
        self.position.abs_diff_eq(other.position, eps)
            && quat_eq(self.orientation, other.orientation, eps)
    }
}

/// Compares rotations, treating `q` and `-q` as the same rotation.
pub fn quat_eq(a: DQuat, b: DQuat, eps: f64) -> bool {
    a.abs_diff_eq(b, eps) || a.abs_diff_eq(-b, eps)
}

/// Straight edge between two points in some panel frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Segment {
    pub a: DVec3,
    pub b: DVec3,
}

impl Segment {
    /// Segment from `a` to `b`; direction matters for hinge matching.
    pub fn new(a: DVec3, b: DVec3) -> Self {
        Self { a, b }
    }

    /// Segment in the panel plane (z = 0).
    pub fn planar(a: Point, b: Point) -> Self {
        Self::new(lift(a), lift(b))
    }

    /// Euclidean length.
    pub fn length(&self) -> f64 {
        self.a.distance(self.b)
    }

    /// Midpoint, where panel origins sit on their hinge.
    pub fn midpoint(&self) -> DVec3 {
        (self.a + self.b) * 0.5
    }

    /// Unit direction from `a` to `b`.
    pub fn direction(&self) -> DVec3 {
        (self.b - self.a).normalize()
    }

    /// Both endpoints mapped through `pose`.
    pub fn transformed(&self, pose: &Pose) -> Segment {
        Segment::new(pose.transform_point(self.a), pose.transform_point(self.b))
    }

    /// Endpoint-wise comparison within `eps`.
    pub fn abs_diff_eq(&self, other: &Segment, eps: f64) -> bool {
        self.a.abs_diff_eq(other.a, eps) && self.b.abs_diff_eq(other.b, eps)
    }
}

/// Lifts a panel-plane point into 3D.
pub fn lift(p: Point) -> DVec3 {
    DVec3::new(p.x, p.y, 0.0)
}

/// Degrees to radians.
pub fn deg(v: f64) -> f64 {
    v.to_radians()
}

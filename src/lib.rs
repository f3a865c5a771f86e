#![forbid(unsafe_code)]
//! Parametric trapezoidal box: rest-pose hierarchy, fold transforms and flat layout.

mod foundation;

pub mod config;
pub mod ease;
pub mod engine;
pub mod fingerprint;
pub mod flat;
pub mod hierarchy;
pub mod panel;
pub mod params;
pub mod pivot;
pub mod session;
pub mod timeline;
pub mod world;

pub use config::FoldConfig;
pub use ease::{Ease, FoldState};
pub use engine::{FoldEngine, PanelPose, PoseTable};
pub use fingerprint::{PoseFingerprint, fingerprint_poses};
pub use flat::{FlatLayout, FlatPanel};
pub use foundation::core::{
    Affine, BezPath, DQuat, DVec3, EPSILON, Point, Pose, Rect, Segment, Vec2, deg, lift, quat_eq,
};
pub use foundation::error::{FoldError, FoldResult};
pub use hierarchy::{Hierarchy, place_by_corner};
pub use panel::{AngleLaw, FoldAxis, FoldLaw, Hinge, Panel, PanelId, Pivot, Shape, Sign};
pub use params::{BoxMetrics, BoxParameters, Dimensions};
pub use pivot::rotate_around_pivot;
pub use session::FoldBox;
pub use timeline::{FoldAnimation, Fps, FrameIndex, LoopMode};
pub use world::{WorldHinge, compose_world, world_hinges, world_outline};

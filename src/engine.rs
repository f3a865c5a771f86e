//! Fold-transform engine: rest poses + fold state → local panel poses.

use crate::{
    ease::FoldState,
    foundation::core::{DQuat, DVec3, Pose},
    hierarchy::Hierarchy,
    panel::{FoldLaw, PanelId},
};

/// One pose per panel, indexed by [`PanelId`].
///
/// Whether the poses are parent-relative or world-space depends on who produced the table:
/// [`FoldEngine::solve`] returns local poses, [`crate::world::compose_world`] world poses.
#[derive(Clone, Debug, PartialEq)]
pub struct PoseTable {
    poses: [Pose; PanelId::COUNT],
}

/// Serialized form of one [`PoseTable`] entry.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PanelPose {
    pub id: PanelId,
    pub position: DVec3,
    pub orientation: DQuat,
}

impl PoseTable {
    pub(crate) fn from_fn(f: impl FnMut(PanelId) -> Pose) -> Self {
        Self {
            poses: PanelId::ALL.map(f),
        }
    }

    pub fn get(&self, id: PanelId) -> Pose {
        self.poses[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (PanelId, Pose)> + '_ {
        PanelId::ALL.into_iter().zip(self.poses.iter().copied())
    }

    pub fn to_records(&self) -> Vec<PanelPose> {
        self.iter()
            .map(|(id, pose)| PanelPose {
                id,
                position: pose.position,
                orientation: pose.orientation,
            })
            .collect()
    }

    pub fn abs_diff_eq(&self, other: &PoseTable, eps: f64) -> bool {
        self.poses
            .iter()
            .zip(other.poses.iter())
            .all(|(a, b)| a.abs_diff_eq(b, eps))
    }
}

impl serde::Serialize for PoseTable {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_records().serialize(serializer)
    }
}

pub struct FoldEngine;

impl FoldEngine {
    /// Local poses for every panel at `state`.
    ///
    /// Each pose is derived from the stored rest pose, never from a previous result, so the
    /// output depends on `(hierarchy, state)` alone.
    pub fn solve(hierarchy: &Hierarchy, state: FoldState) -> PoseTable {
        PoseTable::from_fn(|id| Self::solve_panel(hierarchy, id, state))
    }

    pub fn solve_panel(hierarchy: &Hierarchy, id: PanelId, state: FoldState) -> Pose {
        let panel = hierarchy.panel(id);
        let rest = panel.rest;
        match panel.fold {
            FoldLaw::Fixed => rest,
            FoldLaw::Hinge { pivot, axis, angle } => {
                let metrics = &hierarchy.metrics;
                rest.rotated_around(
                    pivot.resolve(metrics, &rest),
                    axis.resolve(metrics),
                    angle.radians(state),
                )
            }
        }
    }

    /// Signed hinge angle in degrees, as applied by [`FoldEngine::solve`].
    pub fn fold_angle(id: PanelId, state: FoldState) -> f64 {
        id.fold_law().degrees(state)
    }
}

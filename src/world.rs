//! Explicit top-down composition of local poses into world space.

use crate::{
    engine::PoseTable,
    foundation::core::{DVec3, Pose, Segment, lift},
    hierarchy::Hierarchy,
    panel::PanelId,
};

/// Composes `local` (parent-relative) poses into world poses, parents first.
pub fn compose_world(local: &PoseTable) -> PoseTable {
    let mut world = [Pose::IDENTITY; PanelId::COUNT];
    for id in PanelId::ALL {
        let pose = local.get(id);
        world[id.index()] = match id.parent() {
            // `ALL` is topological, so the parent slot is already filled.
            Some(parent) => world[parent.index()].compose(&pose),
            None => pose,
        };
    }
    PoseTable::from_fn(|id| world[id.index()])
}

/// A panel's hinge seen from both sides, in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldHinge {
    pub id: PanelId,
    pub child_side: Segment,
    pub parent_side: Segment,
}

impl WorldHinge {
    /// Largest endpoint distance between the two sides.
    pub fn gap(&self) -> f64 {
        self.child_side
            .a
            .distance(self.parent_side.a)
            .max(self.child_side.b.distance(self.parent_side.b))
    }
}

pub fn world_hinges(hierarchy: &Hierarchy, world: &PoseTable) -> Vec<WorldHinge> {
    hierarchy
        .panels()
        .filter_map(|panel| {
            let hinge = panel.hinge?;
            let parent = panel.parent?;
            Some(WorldHinge {
                id: panel.id,
                child_side: hinge.local.transformed(&world.get(panel.id)),
                parent_side: hinge.on_parent.transformed(&world.get(parent)),
            })
        })
        .collect()
}

/// World-space corners of a panel's outline.
pub fn world_outline(hierarchy: &Hierarchy, world: &PoseTable, id: PanelId) -> [DVec3; 4] {
    let pose = world.get(id);
    hierarchy
        .panel(id)
        .outline
        .map(|p| pose.transform_point(lift(p)))
}

//! Rest-pose panel tree built from the box dimensions.
//!
//! Every panel frame has its origin on the hinge shared with its parent, so folding is a
//! single rotation about a point on that hinge. At progress 0 each panel frame is parallel
//! to the Back panel (side panels are mirrored about their hinge, normal along -Z).

use kurbo::{Point, Vec2};

use crate::{
    foundation::{
        core::{DQuat, DVec3, Pose, Segment, deg, lift},
        error::FoldResult,
    },
    panel::{Hinge, Panel, PanelId, Shape, hinged_rect},
    params::{BoxMetrics, BoxParameters},
};

/// The immutable rest-pose snapshot for one set of parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Hierarchy {
    pub metrics: BoxMetrics,
    panels: [Panel; PanelId::COUNT],
}

impl Hierarchy {
    #[tracing::instrument(level = "debug", skip_all, fields(
        top_width = params.top_width,
        bottom_width = params.bottom_width,
        height = params.height,
        depth = params.depth,
        flap_width = params.flap_width,
    ))]
    pub fn build(params: &BoxParameters) -> FoldResult<Self> {
        let metrics = BoxMetrics::new(*params)?;
        let hierarchy = Self::from_metrics(metrics);
        tracing::debug!(slant_height = metrics.slant_height, "rebuilt rest poses");
        Ok(hierarchy)
    }

    pub(crate) fn from_metrics(metrics: BoxMetrics) -> Self {
        let panels = PanelId::ALL.map(|id| build_panel(id, &metrics));
        Self { metrics, panels }
    }

    pub fn params(&self) -> &BoxParameters {
        &self.metrics.params
    }

    pub fn panel(&self, id: PanelId) -> &Panel {
        &self.panels[id.index()]
    }

    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.panels.iter()
    }

    pub fn rest(&self, id: PanelId) -> Pose {
        self.panel(id).rest
    }
}

/// Solves `position = target − orientation · local_corner`, so that `local_corner` of a
/// panel with the given orientation lands exactly on `target`.
pub fn place_by_corner(target: DVec3, local_corner: DVec3, orientation: DQuat) -> DVec3 {
    target - orientation * local_corner
}

fn build_panel(id: PanelId, m: &BoxMetrics) -> Panel {
    let p = &m.params;
    let (tw, bw, h, d, fw) = (
        p.top_width,
        p.bottom_width,
        p.height,
        p.depth,
        p.flap_width,
    );
    let s = m.slant_height;
    let up = Vec2::new(0.0, 1.0);
    let down = Vec2::new(0.0, -1.0);
    let left = Vec2::new(-1.0, 0.0);
    let right = Vec2::new(1.0, 0.0);

    // Parent-frame edges that children hang from.
    let lid_outer = Segment::planar(Point::new(-tw / 2.0, d), Point::new(tw / 2.0, d));
    let lid_left = Segment::planar(Point::new(-tw / 2.0, 0.0), Point::new(-tw / 2.0, d));
    let lid_right = Segment::planar(Point::new(tw / 2.0, 0.0), Point::new(tw / 2.0, d));
    let bottom_outer = Segment::planar(Point::new(-bw / 2.0, -d), Point::new(bw / 2.0, -d));
    let left_outer = Segment::planar(Point::new(d, -s / 2.0), Point::new(d, s / 2.0));
    let left_lower = Segment::planar(Point::new(0.0, -s / 2.0), Point::new(d, -s / 2.0));
    let right_outer = Segment::planar(Point::new(-d, -s / 2.0), Point::new(-d, s / 2.0));
    let right_lower = Segment::planar(Point::new(-d, -s / 2.0), Point::new(0.0, -s / 2.0));

    match id {
        PanelId::Back => Panel {
            id,
            shape: Shape::Trapezoid {
                top_width: tw,
                bottom_width: bw,
                height: h,
            },
            parent: None,
            outline: [
                Point::new(-bw / 2.0, -h / 2.0),
                Point::new(bw / 2.0, -h / 2.0),
                Point::new(tw / 2.0, h / 2.0),
                Point::new(-tw / 2.0, h / 2.0),
            ],
            hinge: None,
            rest: Pose::IDENTITY,
            fold: id.fold_law(),
        },
        PanelId::Lid => main_panel(
            id,
            Shape::Rectangle {
                width: tw,
                height: d,
            },
            hinged_rect(tw, d, down),
            Segment::new(m.back_top_left(), m.back_top_right()),
            // Rest is the assembled lid: its depth runs along +Z.
            DQuat::from_rotation_x(deg(90.0)),
        ),
        PanelId::Bottom => main_panel(
            id,
            Shape::Rectangle {
                width: bw,
                height: d,
            },
            hinged_rect(bw, d, up),
            Segment::new(m.back_bottom_left(), m.back_bottom_right()),
            DQuat::from_rotation_x(deg(-90.0)),
        ),
        PanelId::Left => side_panel(
            id,
            d,
            s,
            left,
            Segment::new(m.back_bottom_left(), m.back_top_left()),
            DQuat::from_rotation_z(m.slant_angle) * DQuat::from_rotation_y(deg(90.0)),
        ),
        PanelId::Right => side_panel(
            id,
            d,
            s,
            right,
            Segment::new(m.back_bottom_right(), m.back_top_right()),
            DQuat::from_rotation_z(-m.slant_angle) * DQuat::from_rotation_y(deg(-90.0)),
        ),
        PanelId::Front => {
            let outline = [
                Point::new(-tw / 2.0, -h),
                Point::new(tw / 2.0, -h),
                Point::new(bw / 2.0, 0.0),
                Point::new(-bw / 2.0, 0.0),
            ];
            let shape = Shape::Trapezoid {
                top_width: tw,
                bottom_width: bw,
                height: h,
            };
            attached(id, shape, outline, bottom_outer)
        }
        PanelId::LidFlap => flap(id, tw, fw, down, lid_outer),
        PanelId::LidLeftFlap => flap(id, fw, d, right, lid_left),
        PanelId::LidRightFlap => flap(id, fw, d, left, lid_right),
        PanelId::LeftFlap => flap(id, fw, s, left, left_outer),
        PanelId::LeftBottomFlap => flap(id, d, fw, up, left_lower),
        PanelId::RightFlap => flap(id, fw, s, right, right_outer),
        PanelId::RightBottomFlap => flap(id, d, fw, up, right_lower),
    }
}

/// Lid or Bottom: hinge centred on the origin along local X.
fn main_panel(
    id: PanelId,
    shape: Shape,
    outline: [Point; 4],
    on_parent: Segment,
    orientation: DQuat,
) -> Panel {
    let half = on_parent.length() / 2.0;
    Panel {
        id,
        shape,
        parent: id.parent(),
        outline,
        hinge: Some(Hinge {
            local: Segment::planar(Point::new(-half, 0.0), Point::new(half, 0.0)),
            on_parent,
        }),
        rest: Pose::new(on_parent.midpoint(), orientation),
        fold: id.fold_law(),
    }
}

/// Left or Right: hinge along local Y, placed by matching its lower hinge corner.
fn side_panel(
    id: PanelId,
    depth: f64,
    slant_height: f64,
    hinge_side: Vec2,
    on_parent: Segment,
    orientation: DQuat,
) -> Panel {
    let lower = Point::new(0.0, -slant_height / 2.0);
    let upper = Point::new(0.0, slant_height / 2.0);
    let position = place_by_corner(on_parent.a, lift(lower), orientation);
    Panel {
        id,
        shape: Shape::Rectangle {
            width: depth,
            height: slant_height,
        },
        parent: id.parent(),
        outline: hinged_rect(depth, slant_height, hinge_side),
        hinge: Some(Hinge {
            local: Segment::planar(lower, upper),
            on_parent,
        }),
        rest: Pose::new(position, orientation),
        fold: id.fold_law(),
    }
}

/// Rectangular flap whose hinge edge (`edge` side) was baked onto the origin.
fn flap(id: PanelId, width: f64, height: f64, edge: Vec2, on_parent: Segment) -> Panel {
    attached(
        id,
        Shape::Rectangle { width, height },
        hinged_rect(width, height, edge),
        on_parent,
    )
}

/// Panel sharing its parent's orientation, positioned at the midpoint of `on_parent`.
fn attached(id: PanelId, shape: Shape, outline: [Point; 4], on_parent: Segment) -> Panel {
    let origin = on_parent.midpoint();
    Panel {
        id,
        shape,
        parent: id.parent(),
        outline,
        hinge: Some(Hinge {
            local: Segment::new(on_parent.a - origin, on_parent.b - origin),
            on_parent,
        }),
        rest: Pose::new(origin, DQuat::IDENTITY),
        fold: id.fold_law(),
    }
}

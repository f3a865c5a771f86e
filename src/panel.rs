//! Panel identities, shapes and the closed table of fold laws.

use kurbo::{Point, Rect, Vec2};

use crate::{
    ease::FoldState,
    foundation::core::{DVec3, Pose, Segment, deg},
    params::BoxMetrics,
};

/// The thirteen panels of the box, in parent-before-child order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum PanelId {
    Back,
    Lid,
    Bottom,
    Left,
    Right,
    LidFlap,
    LidLeftFlap,
    LidRightFlap,
    Front,
    LeftFlap,
    LeftBottomFlap,
    RightFlap,
    RightBottomFlap,
}

impl PanelId {
    pub const COUNT: usize = 13;

    /// Topological order: every parent precedes its children.
    pub const ALL: [PanelId; Self::COUNT] = [
        PanelId::Back,
        PanelId::Lid,
        PanelId::Bottom,
        PanelId::Left,
        PanelId::Right,
        PanelId::LidFlap,
        PanelId::LidLeftFlap,
        PanelId::LidRightFlap,
        PanelId::Front,
        PanelId::LeftFlap,
        PanelId::LeftBottomFlap,
        PanelId::RightFlap,
        PanelId::RightBottomFlap,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn parent(self) -> Option<PanelId> {
        match self {
            Self::Back => None,
            Self::Lid | Self::Bottom | Self::Left | Self::Right => Some(Self::Back),
            Self::LidFlap | Self::LidLeftFlap | Self::LidRightFlap => Some(Self::Lid),
            Self::Front => Some(Self::Bottom),
            Self::LeftFlap | Self::LeftBottomFlap => Some(Self::Left),
            Self::RightFlap | Self::RightBottomFlap => Some(Self::Right),
        }
    }

    pub fn children(self) -> impl Iterator<Item = PanelId> {
        Self::ALL
            .into_iter()
            .filter(move |id| id.parent() == Some(self))
    }

    pub fn is_flap(self) -> bool {
        matches!(
            self,
            Self::LidFlap
                | Self::LidLeftFlap
                | Self::LidRightFlap
                | Self::LeftFlap
                | Self::LeftBottomFlap
                | Self::RightFlap
                | Self::RightBottomFlap
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Back => "Back",
            Self::Lid => "Lid",
            Self::Bottom => "Bottom",
            Self::Left => "Left",
            Self::Right => "Right",
            Self::LidFlap => "LidFlap",
            Self::LidLeftFlap => "LidLeftFlap",
            Self::LidRightFlap => "LidRightFlap",
            Self::Front => "Front",
            Self::LeftFlap => "LeftFlap",
            Self::LeftBottomFlap => "LeftBottomFlap",
            Self::RightFlap => "RightFlap",
            Self::RightBottomFlap => "RightBottomFlap",
        }
    }

    /// Fold behavior of this panel. Exhaustive by construction.
    pub fn fold_law(self) -> FoldLaw {
        use AngleLaw::*;
        use FoldAxis::*;
        use Pivot::*;
        use Sign::*;

        let hinge = |pivot, axis, angle| FoldLaw::Hinge { pivot, axis, angle };
        match self {
            Self::Back => FoldLaw::Fixed,
            Self::Lid => hinge(BackTopEdge, ParentX, Opening(Neg)),
            Self::Bottom => hinge(BackBottomEdge, ParentX, Opening(Pos)),
            Self::Left => hinge(BackBottomLeft, LeftEdge, SideWall(Pos)),
            Self::Right => hinge(BackBottomRight, RightEdge, SideWall(Neg)),
            Self::LidFlap => hinge(OwnOrigin, ParentX, Tuck(Pos)),
            Self::LidLeftFlap => hinge(OwnOrigin, ParentY, Tuck(Pos)),
            Self::LidRightFlap => hinge(OwnOrigin, ParentY, Tuck(Neg)),
            Self::Front => hinge(OwnOrigin, ParentX, Tuck(Neg)),
            Self::LeftFlap => hinge(OwnOrigin, ParentY, Crease(Pos)),
            Self::RightFlap => hinge(OwnOrigin, ParentY, Crease(Neg)),
            Self::LeftBottomFlap => hinge(OwnOrigin, ParentX, Tuck(Pos)),
            Self::RightBottomFlap => hinge(OwnOrigin, ParentX, Tuck(Pos)),
        }
    }
}

impl std::fmt::Display for PanelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Shape {
    Rectangle {
        width: f64,
        height: f64,
    },
    /// `bottom_width` runs along the hinge for Front and along the lower edge for Back.
    Trapezoid {
        top_width: f64,
        bottom_width: f64,
        height: f64,
    },
}

impl Shape {
    pub fn area(&self) -> f64 {
        match *self {
            Self::Rectangle { width, height } => width * height,
            Self::Trapezoid {
                top_width,
                bottom_width,
                height,
            } => height * (top_width + bottom_width) / 2.0,
        }
    }
}

/// Rectangle outline offset so that the midpoint of one of its edges lands on the origin.
///
/// `edge` points from the rectangle's centre toward the hinge edge.
pub(crate) fn hinged_rect(width: f64, height: f64, edge: Vec2) -> [Point; 4] {
    let centred = Rect::from_center_size(Point::ORIGIN, (width, height));
    let offset = -Vec2::new(edge.x * width / 2.0, edge.y * height / 2.0);
    corners(centred + offset)
}

/// Counter-clockwise corners starting at the minimum corner.
pub(crate) fn corners(r: Rect) -> [Point; 4] {
    [
        Point::new(r.x0, r.y0),
        Point::new(r.x1, r.y0),
        Point::new(r.x1, r.y1),
        Point::new(r.x0, r.y1),
    ]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Sign {
    Pos,
    Neg,
}

impl Sign {
    pub fn apply(self, v: f64) -> f64 {
        match self {
            Self::Pos => v,
            Self::Neg => -v,
        }
    }
}

/// How a panel's hinge angle depends on the fold state. Degrees in the formulas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AngleLaw {
    /// `±open·90`: swings from the flat pattern to zero when closed.
    Opening(Sign),
    /// `±(90 + close·90)`: quarter turn at rest-to-flat, half turn when closed.
    SideWall(Sign),
    /// `±close·90`: flat when open, tucked when closed.
    Tuck(Sign),
    /// `±(45 + close·45)`: pre-creased halfway when open.
    Crease(Sign),
}

impl AngleLaw {
    pub fn degrees(self, state: FoldState) -> f64 {
        let close = state.close_progress();
        let open = state.open_amount();
        match self {
            Self::Opening(s) => s.apply(open * 90.0),
            Self::SideWall(s) => s.apply(90.0 + close * 90.0),
            Self::Tuck(s) => s.apply(close * 90.0),
            Self::Crease(s) => s.apply(45.0 + close * 45.0),
        }
    }

    pub fn radians(self, state: FoldState) -> f64 {
        deg(self.degrees(state))
    }

    /// Direction the angle moves as progress increases: +1, -1.
    pub fn trend(self) -> f64 {
        match self {
            Self::Opening(Sign::Pos) => -1.0,
            Self::Opening(Sign::Neg) => 1.0,
            Self::SideWall(s) | Self::Tuck(s) | Self::Crease(s) => s.apply(1.0),
        }
    }
}

/// Rotation centre, expressed in the parent's frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Pivot {
    OwnOrigin,
    BackTopEdge,
    BackBottomEdge,
    BackBottomLeft,
    BackBottomRight,
}

impl Pivot {
    pub fn resolve(self, metrics: &BoxMetrics, rest: &Pose) -> DVec3 {
        match self {
            Self::OwnOrigin => rest.position,
            Self::BackTopEdge => metrics.back_top_mid(),
            Self::BackBottomEdge => metrics.back_bottom_mid(),
            Self::BackBottomLeft => metrics.back_bottom_left(),
            Self::BackBottomRight => metrics.back_bottom_right(),
        }
    }
}

/// Rotation axis, expressed in the parent's frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FoldAxis {
    /// Along the parent's width.
    ParentX,
    /// Along the parent's depth (or slant, for side panels).
    ParentY,
    LeftEdge,
    RightEdge,
}

impl FoldAxis {
    pub fn resolve(self, metrics: &BoxMetrics) -> DVec3 {
        match self {
            Self::ParentX => DVec3::X,
            Self::ParentY => DVec3::Y,
            Self::LeftEdge => metrics.left_edge_dir(),
            Self::RightEdge => metrics.right_edge_dir(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FoldLaw {
    /// The root never moves.
    Fixed,
    Hinge {
        pivot: Pivot,
        axis: FoldAxis,
        angle: AngleLaw,
    },
}

impl FoldLaw {
    /// Signed hinge angle in degrees; 0 for the root.
    pub fn degrees(self, state: FoldState) -> f64 {
        match self {
            Self::Fixed => 0.0,
            Self::Hinge { angle, .. } => angle.degrees(state),
        }
    }
}

/// A panel of the box in its rest pose.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Panel {
    pub id: PanelId,
    pub shape: Shape,
    pub parent: Option<PanelId>,
    /// Outline in the panel's own plane, hinge edge through the origin.
    pub outline: [Point; 4],
    /// Shared edge: `local` in this panel's frame, `on_parent` in the parent's frame.
    pub hinge: Option<Hinge>,
    pub rest: Pose,
    pub fold: FoldLaw,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Hinge {
    pub local: Segment,
    pub on_parent: Segment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_is_topological_and_indices_match() {
        for (i, id) in PanelId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
            if let Some(parent) = id.parent() {
                assert!(parent.index() < id.index(), "{id} listed before {parent}");
            }
        }
    }

    #[test]
    fn exactly_one_root() {
        let roots: Vec<_> = PanelId::ALL
            .into_iter()
            .filter(|id| id.parent().is_none())
            .collect();
        assert_eq!(roots, vec![PanelId::Back]);
        assert_eq!(PanelId::Back.fold_law(), FoldLaw::Fixed);
    }

    #[test]
    fn children_of_side_panels() {
        let left: Vec<_> = PanelId::Left.children().collect();
        assert_eq!(left, vec![PanelId::LeftFlap, PanelId::LeftBottomFlap]);
        let bottom: Vec<_> = PanelId::Bottom.children().collect();
        assert_eq!(bottom, vec![PanelId::Front]);
        assert_eq!(PanelId::Back.children().count(), 4);
    }

    #[test]
    fn flap_count() {
        assert_eq!(PanelId::ALL.iter().filter(|id| id.is_flap()).count(), 7);
    }

    #[test]
    fn angle_laws_hit_their_endpoints() {
        let flat = FoldState::FLAT;
        let closed = FoldState::CLOSED;
        assert_eq!(PanelId::Lid.fold_law().degrees(flat), -90.0);
        assert_eq!(PanelId::Lid.fold_law().degrees(closed), 0.0);
        assert_eq!(PanelId::Bottom.fold_law().degrees(flat), 90.0);
        assert_eq!(PanelId::Left.fold_law().degrees(flat), 90.0);
        assert_eq!(PanelId::Left.fold_law().degrees(closed), 180.0);
        assert_eq!(PanelId::Right.fold_law().degrees(closed), -180.0);
        assert_eq!(PanelId::LeftFlap.fold_law().degrees(flat), 45.0);
        assert_eq!(PanelId::LeftFlap.fold_law().degrees(closed), 90.0);
        assert_eq!(PanelId::RightFlap.fold_law().degrees(closed), -90.0);
        assert_eq!(PanelId::LidFlap.fold_law().degrees(flat), 0.0);
        assert_eq!(PanelId::LidFlap.fold_law().degrees(closed), 90.0);
        assert_eq!(PanelId::Front.fold_law().degrees(closed), -90.0);
    }

    #[test]
    fn hinged_rect_puts_edge_midpoint_on_origin() {
        let up = hinged_rect(4.0, 2.0, Vec2::new(0.0, -1.0));
        assert_eq!(up[0], Point::new(-2.0, 0.0));
        assert_eq!(up[2], Point::new(2.0, 2.0));

        let left = hinged_rect(4.0, 2.0, Vec2::new(1.0, 0.0));
        assert_eq!(left[0], Point::new(-4.0, -1.0));
        assert_eq!(left[2], Point::new(0.0, 1.0));
    }

    #[test]
    fn shape_areas() {
        let r = Shape::Rectangle {
            width: 3.0,
            height: 4.0,
        };
        assert_eq!(r.area(), 12.0);
        let t = Shape::Trapezoid {
            top_width: 30.0,
            bottom_width: 20.0,
            height: 25.0,
        };
        assert_eq!(t.area(), 625.0);
    }
}

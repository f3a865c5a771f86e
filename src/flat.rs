//! 2D die-cut net of the box, for diagram overlays and print output.
//!
//! Independent of the 3D engine: every hinge is laid open in the plane with the Back panel
//! centred on the origin (y up).

use kurbo::{Affine, BezPath, Point, Rect, Vec2};

use crate::{hierarchy::Hierarchy, panel::PanelId, params::BoxMetrics};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FlatPanel {
    pub id: PanelId,
    /// Panel-local plane to layout plane.
    pub transform: Affine,
    pub outline: [Point; 4],
}

impl FlatPanel {
    pub fn path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.outline[0]);
        for p in &self.outline[1..] {
            path.line_to(*p);
        }
        path.close_path();
        path
    }

    pub fn bounds(&self) -> Rect {
        let first = Rect::from_points(self.outline[0], self.outline[0]);
        self.outline[1..]
            .iter()
            .fold(first, |r, p| r.union_pt(*p))
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FlatLayout {
    pub panels: Vec<FlatPanel>,
}

impl FlatLayout {
    pub fn project(hierarchy: &Hierarchy) -> Self {
        let transforms = panel_affines(&hierarchy.metrics);
        let panels = PanelId::ALL
            .into_iter()
            .map(|id| {
                let transform = transforms[id.index()];
                FlatPanel {
                    id,
                    transform,
                    outline: hierarchy.panel(id).outline.map(|p| transform * p),
                }
            })
            .collect();
        Self { panels }
    }

    pub fn panel(&self, id: PanelId) -> &FlatPanel {
        &self.panels[id.index()]
    }

    pub fn bounds(&self) -> Rect {
        self.panels
            .iter()
            .map(FlatPanel::bounds)
            .reduce(|a, b| a.union(b))
            .unwrap_or(Rect::ZERO)
    }

    /// Standalone SVG document of the net; y is flipped so the lid sits on top.
    pub fn to_svg(&self, margin: f64) -> String {
        let b = self.bounds().inflate(margin, margin);
        let mut out = String::new();
        out.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{:.3} {:.3} {:.3} {:.3}\">\n",
            b.x0,
            -b.y1,
            b.width(),
            b.height()
        ));
        out.push_str(
            "  <g transform=\"scale(1,-1)\" fill=\"none\" stroke=\"black\" stroke-width=\"0.2\">\n",
        );
        for panel in &self.panels {
            out.push_str(&format!(
                "    <path id=\"{}\" d=\"{}\"/>\n",
                panel.id,
                panel.path().to_svg()
            ));
        }
        out.push_str("  </g>\n</svg>\n");
        out
    }
}

fn panel_affines(m: &BoxMetrics) -> [Affine; PanelId::COUNT] {
    let p = &m.params;
    let (tw, h, d) = (p.top_width, p.height, p.depth);
    let s = m.slant_height;
    let mirror = Affine::scale_non_uniform(-1.0, 1.0);
    let at = |v: Vec2| Affine::translate(v);
    let mid = |a: glam::DVec3, b: glam::DVec3| Vec2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);

    let lid = at(Vec2::new(0.0, h / 2.0));
    let bottom = at(Vec2::new(0.0, -h / 2.0));
    // Side panels are mirrored about their hinge, like their 3D flat pose.
    let left = at(mid(m.back_bottom_left(), m.back_top_left()))
        * Affine::rotate(m.slant_angle)
        * mirror;
    let right = at(mid(m.back_bottom_right(), m.back_top_right()))
        * Affine::rotate(-m.slant_angle)
        * mirror;

    PanelId::ALL.map(|id| match id {
        PanelId::Back => Affine::IDENTITY,
        PanelId::Lid => lid,
        PanelId::Bottom => bottom,
        PanelId::Left => left,
        PanelId::Right => right,
        PanelId::LidFlap => lid * at(Vec2::new(0.0, d)),
        PanelId::LidLeftFlap => lid * at(Vec2::new(-tw / 2.0, d / 2.0)),
        PanelId::LidRightFlap => lid * at(Vec2::new(tw / 2.0, d / 2.0)),
        PanelId::Front => bottom * at(Vec2::new(0.0, -d)),
        PanelId::LeftFlap => left * at(Vec2::new(d, 0.0)),
        PanelId::LeftBottomFlap => left * at(Vec2::new(d / 2.0, -s / 2.0)),
        PanelId::RightFlap => right * at(Vec2::new(-d, 0.0)),
        PanelId::RightBottomFlap => right * at(Vec2::new(-d / 2.0, -s / 2.0)),
    })
}

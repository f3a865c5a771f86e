use foldbox::{
    BoxParameters, DVec3, Ease, FoldBox, FoldEngine, FoldLaw, FoldState, Hierarchy, PanelId,
    compose_world, fingerprint_poses, world_hinges, world_outline,
};

const TOL: f64 = 1e-9;

fn parameter_grid() -> Vec<BoxParameters> {
    let mut out = Vec::new();
    for top_width in [30.0, 20.0, 8.0] {
        for bottom_width in [20.0, 30.0, 5.0] {
            for (height, depth) in [(25.0, 15.0), (7.0, 3.0), (40.0, 0.5)] {
                for flap_width in [2.0, 0.0] {
                    out.push(BoxParameters {
                        top_width,
                        bottom_width,
                        height,
                        depth,
                        flap_width,
                    });
                }
            }
        }
    }
    out
}

fn world_at(h: &Hierarchy, progress: f64) -> foldbox::PoseTable {
    compose_world(&FoldEngine::solve(h, FoldState::new(progress)))
}

fn assert_meet(a: DVec3, b: DVec3, what: &str) {
    assert!(a.distance(b) < TOL, "{what}: {a} vs {b}");
}

#[test]
fn hinges_never_separate() {
    for params in parameter_grid() {
        let h = Hierarchy::build(&params).unwrap();
        for i in 0..=20 {
            let p = f64::from(i) / 20.0;
            let world = world_at(&h, p);
            let hinges = world_hinges(&h, &world);
            assert_eq!(hinges.len(), PanelId::COUNT - 1);
            for hinge in hinges {
                assert!(
                    hinge.gap() < TOL,
                    "{} opened by {} at progress {p} for {params:?}",
                    hinge.id,
                    hinge.gap()
                );
            }
        }
    }
}

#[test]
fn flat_pattern_lies_in_the_back_plane() {
    for params in parameter_grid() {
        let h = Hierarchy::build(&params).unwrap();
        let world = world_at(&h, 0.0);
        for id in PanelId::ALL {
            if matches!(id, PanelId::LeftFlap | PanelId::RightFlap) {
                continue;
            }
            let n = world.get(id).normal();
            assert!((n.z.abs() - 1.0).abs() < TOL, "{id} tilted: normal {n}");
            for corner in world_outline(&h, &world, id) {
                assert!(corner.z.abs() < TOL, "{id} corner off-plane: {corner}");
            }
        }
    }
}

#[test]
fn pre_creased_flaps_stand_at_45_degrees_when_flat() {
    let h = Hierarchy::build(&BoxParameters::default()).unwrap();
    let world = world_at(&h, 0.0);
    let half_sqrt2 = std::f64::consts::FRAC_1_SQRT_2;
    for id in [PanelId::LeftFlap, PanelId::RightFlap] {
        let n = world.get(id).normal();
        assert!((n.z.abs() - half_sqrt2).abs() < TOL, "{id}: {n}");
    }
    assert_eq!(FoldEngine::fold_angle(PanelId::LeftFlap, FoldState::FLAT), 45.0);
    assert_eq!(FoldEngine::fold_angle(PanelId::LidFlap, FoldState::FLAT), 0.0);
    assert_eq!(FoldEngine::fold_angle(PanelId::Left, FoldState::FLAT), 90.0);
    assert_eq!(FoldEngine::fold_angle(PanelId::Right, FoldState::FLAT), -90.0);
}

#[test]
fn closed_box_edges_meet() {
    for params in parameter_grid() {
        let h = Hierarchy::build(&params).unwrap();
        let world = world_at(&h, 1.0);
        let o = |id| world_outline(&h, &world, id);
        let (lid, bottom, left, right, front) = (
            o(PanelId::Lid),
            o(PanelId::Bottom),
            o(PanelId::Left),
            o(PanelId::Right),
            o(PanelId::Front),
        );

        assert_meet(lid[2], front[1], "lid/front right");
        assert_meet(lid[3], front[0], "lid/front left");
        assert_meet(bottom[0], front[3], "bottom/front left");
        assert_meet(bottom[1], front[2], "bottom/front right");
        assert_meet(left[1], front[3], "left/front lower");
        assert_meet(left[2], front[0], "left/front upper");
        assert_meet(right[0], front[2], "right/front lower");
        assert_meet(right[3], front[1], "right/front upper");
        assert_meet(lid[3], left[2], "lid/left");
        assert_meet(lid[2], right[3], "lid/right");
    }
}

#[test]
fn closed_shell_stays_inside_its_bounding_box() {
    for params in parameter_grid() {
        let h = Hierarchy::build(&params).unwrap();
        let world = world_at(&h, 1.0);
        let half_w = params.top_width.max(params.bottom_width) / 2.0;
        for id in [
            PanelId::Back,
            PanelId::Lid,
            PanelId::Bottom,
            PanelId::Left,
            PanelId::Right,
            PanelId::Front,
        ] {
            for c in world_outline(&h, &world, id) {
                assert!(c.x.abs() <= half_w + TOL, "{id} x {c}");
                assert!(c.y.abs() <= params.height / 2.0 + TOL, "{id} y {c}");
                assert!(c.z >= -TOL && c.z <= params.depth + TOL, "{id} z {c}");
            }
        }
        // Lid and Bottom stand perpendicular to Back.
        for id in [PanelId::Lid, PanelId::Bottom] {
            assert!(world.get(id).normal().z.abs() < TOL, "{id} not perpendicular");
        }
    }
}

#[test]
fn closed_angles_match_the_law_table() {
    let s = FoldState::CLOSED;
    assert_eq!(FoldEngine::fold_angle(PanelId::Lid, s), 0.0);
    assert_eq!(FoldEngine::fold_angle(PanelId::Bottom, s), 0.0);
    assert_eq!(FoldEngine::fold_angle(PanelId::Left, s), 180.0);
    assert_eq!(FoldEngine::fold_angle(PanelId::Right, s), -180.0);
    assert_eq!(FoldEngine::fold_angle(PanelId::LeftFlap, s), 90.0);
    assert_eq!(FoldEngine::fold_angle(PanelId::LidFlap, s), 90.0);
    assert_eq!(FoldEngine::fold_angle(PanelId::Front, s), -90.0);
}

#[test]
fn every_fold_angle_is_monotonic_in_progress() {
    for ease in Ease::ALL {
        for id in PanelId::ALL {
            let FoldLaw::Hinge { angle, .. } = id.fold_law() else {
                continue;
            };
            let trend = angle.trend();
            let mut prev = angle.degrees(FoldState::with_ease(0.0, ease));
            for i in 1..=100 {
                let state = FoldState::with_ease(f64::from(i) / 100.0, ease);
                let next = angle.degrees(state);
                assert!(
                    (next - prev) * trend >= -1e-12,
                    "{id} reversed under {ease:?} at sample {i}"
                );
                prev = next;
            }
        }
    }
}

#[test]
fn reference_box_dimensions() {
    let b = FoldBox::new(BoxParameters::new(30.0, 20.0, 25.0, 15.0, 2.0).unwrap()).unwrap();
    let m = b.hierarchy().metrics;
    assert_eq!(m.dx, 5.0);
    assert!((m.slant_height - 650f64.sqrt()).abs() < 1e-12);

    let d = b.dimensions();
    assert!((d.total_width - 84.99).abs() < 0.01);
    assert_eq!(d.total_height, 59.0);
    assert_eq!(d.area_back, 625.0);
}

#[test]
fn boundary_inputs() {
    let mut b = FoldBox::default();
    let err = b
        .set_parameters(BoxParameters {
            height: 0.0,
            ..BoxParameters::default()
        })
        .unwrap_err();
    assert!(err.is_invalid_parameter());

    let below = b.set_progress(-0.5).clone();
    assert_eq!(below, *b.set_progress(0.0));
    let above = b.set_progress(1.5).clone();
    assert_eq!(above, *b.set_progress(1.0));
}

#[test]
fn rebuilding_with_the_same_parameters_is_bit_identical() {
    for params in parameter_grid().into_iter().step_by(7) {
        let mut b = FoldBox::new(params).unwrap();
        b.set_progress(0.35);
        let before = fingerprint_poses(b.poses());
        b.set_parameters(params).unwrap();
        assert_eq!(before, fingerprint_poses(b.poses()));
    }
}

#[test]
fn flat_layout_matches_the_unfolded_box() {
    for params in parameter_grid() {
        let b = FoldBox::new(params).unwrap();
        let flat = b.flat_layout();
        let world = b.world_poses();
        for id in PanelId::ALL {
            // The 3D pattern keeps these pre-creased.
            if matches!(id, PanelId::LeftFlap | PanelId::RightFlap) {
                continue;
            }
            let in_3d = world_outline(b.hierarchy(), &world, id);
            for (p2, p3) in flat.panel(id).outline.iter().zip(in_3d) {
                assert!(
                    (p2.x - p3.x).abs() < TOL && (p2.y - p3.y).abs() < TOL,
                    "{id}: flat {p2:?} vs 3d {p3}"
                );
            }
        }
    }
}

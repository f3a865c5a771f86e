use crate::{
    config::FoldConfig,
    ease::{Ease, FoldState},
    engine::{FoldEngine, PoseTable},
    flat::FlatLayout,
    foundation::error::FoldResult,
    hierarchy::Hierarchy,
    params::{BoxMetrics, BoxParameters, Dimensions},
    world::compose_world,
};

/// Stateful front end: current parameters, rest snapshot and pose snapshot.
///
/// The rest hierarchy and the pose table are replaced wholesale on every update; neither
/// is ever patched in place.
#[derive(Clone, Debug)]
pub struct FoldBox {
    hierarchy: Hierarchy,
    state: FoldState,
    poses: PoseTable,
}

impl Default for FoldBox {
    fn default() -> Self {
        let metrics = BoxMetrics::derive(BoxParameters::default());
        Self::from_parts(Hierarchy::from_metrics(metrics), FoldState::FLAT)
    }
}

impl FoldBox {
    pub fn new(params: BoxParameters) -> FoldResult<Self> {
        Ok(Self::from_parts(Hierarchy::build(&params)?, FoldState::FLAT))
    }

    pub fn from_config(cfg: &FoldConfig) -> FoldResult<Self> {
        Ok(Self::from_parts(
            Hierarchy::build(&cfg.parameters)?,
            cfg.state(),
        ))
    }

    fn from_parts(hierarchy: Hierarchy, state: FoldState) -> Self {
        let poses = FoldEngine::solve(&hierarchy, state);
        Self {
            hierarchy,
            state,
            poses,
        }
    }

    /// Validates and rebuilds, then re-applies the current progress.
    ///
    /// On error nothing changes and the previous poses stay valid.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn set_parameters(&mut self, params: BoxParameters) -> FoldResult<&PoseTable> {
        let hierarchy = Hierarchy::build(&params).inspect_err(|err| {
            tracing::debug!(%err, "rejected parameter update");
        })?;
        *self = Self::from_parts(hierarchy, self.state);
        Ok(&self.poses)
    }

    /// Clamps `value` to `[0, 1]` and recomputes every panel pose.
    pub fn set_progress(&mut self, value: f64) -> &PoseTable {
        let state = FoldState::with_ease(value, self.state.ease());
        if state.progress() != value {
            tracing::debug!(requested = value, applied = state.progress(), "clamped progress");
        }
        self.state = state;
        self.poses = FoldEngine::solve(&self.hierarchy, state);
        &self.poses
    }

    pub fn set_ease(&mut self, ease: Ease) -> &PoseTable {
        self.state = FoldState::with_ease(self.state.progress(), ease);
        self.poses = FoldEngine::solve(&self.hierarchy, self.state);
        &self.poses
    }

    pub fn parameters(&self) -> &BoxParameters {
        self.hierarchy.params()
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    pub fn state(&self) -> FoldState {
        self.state
    }

    pub fn progress(&self) -> f64 {
        self.state.progress()
    }

    /// Parent-relative poses.
    pub fn poses(&self) -> &PoseTable {
        &self.poses
    }

    pub fn world_poses(&self) -> PoseTable {
        compose_world(&self.poses)
    }

    pub fn dimensions(&self) -> Dimensions {
        self.hierarchy.metrics.dimensions()
    }

    pub fn flat_layout(&self) -> FlatLayout {
        FlatLayout::project(&self.hierarchy)
    }
}

//! Easing curves and the eased fold state.

/// Monotonic easing curves mapping `[0, 1]` onto `[0, 1]`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize,
    clap::ValueEnum,
)]
pub enum Ease {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    #[default]
    InOutCubic,
}

impl Ease {
    pub const ALL: [Ease; 7] = [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
    ];

    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }
}

/// Fold progress together with the curve that shapes it.
///
/// `progress` is always inside `[0, 1]`; construction clamps. NaN collapses to 0 (flat).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "RawFoldState")]
pub struct FoldState {
    progress: f64,
    ease: Ease,
}

#[derive(serde::Deserialize)]
struct RawFoldState {
    progress: f64,
    #[serde(default)]
    ease: Ease,
}

impl From<RawFoldState> for FoldState {
    fn from(raw: RawFoldState) -> Self {
        Self::with_ease(raw.progress, raw.ease)
    }
}

impl Default for FoldState {
    fn default() -> Self {
        Self::FLAT
    }
}

impl FoldState {
    pub const FLAT: Self = Self {
        progress: 0.0,
        ease: Ease::InOutCubic,
    };

    pub const CLOSED: Self = Self {
        progress: 1.0,
        ease: Ease::InOutCubic,
    };

    pub fn new(progress: f64) -> Self {
        Self::with_ease(progress, Ease::default())
    }

    pub fn with_ease(progress: f64, ease: Ease) -> Self {
        let progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        Self { progress, ease }
    }

    pub fn progress(self) -> f64 {
        self.progress
    }

    pub fn ease(self) -> Ease {
        self.ease
    }

    /// Eased progress: 0 when flat, 1 when assembled.
    pub fn close_progress(self) -> f64 {
        self.ease.apply(self.progress)
    }

    pub fn open_amount(self) -> f64 {
        1.0 - self.close_progress()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_stable() {
        for ease in Ease::ALL {
            assert_eq!(ease.apply(0.0), 0.0);
            assert_eq!(ease.apply(1.0), 1.0);
        }
    }

    #[test]
    fn monotonic_over_samples() {
        for ease in Ease::ALL {
            let mut prev = ease.apply(0.0);
            for i in 1..=100 {
                let v = ease.apply(f64::from(i) / 100.0);
                assert!(v >= prev, "{ease:?} decreased at sample {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn in_out_cubic_is_symmetric_around_half() {
        let e = Ease::InOutCubic;
        assert!((e.apply(0.5) - 0.5).abs() < 1e-12);
        assert!((e.apply(0.25) + e.apply(0.75) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn state_clamps_progress() {
        assert_eq!(FoldState::new(-0.5), FoldState::FLAT);
        assert_eq!(FoldState::new(1.5), FoldState::CLOSED);
        assert_eq!(FoldState::new(f64::NAN), FoldState::FLAT);
    }

    #[test]
    fn deserialized_state_is_clamped() {
        let s: FoldState = serde_json::from_str(r#"{"progress":5.0,"ease":"Linear"}"#).unwrap();
        assert_eq!(s.progress(), 1.0);
        assert_eq!(s.ease(), Ease::Linear);
        let s: FoldState = serde_json::from_str(r#"{"progress":-2.0}"#).unwrap();
        assert_eq!(s, FoldState::FLAT);
    }

    #[test]
    fn open_amount_complements_close_progress() {
        let s = FoldState::new(0.3);
        assert!((s.close_progress() + s.open_amount() - 1.0).abs() < 1e-12);
        assert_eq!(FoldState::FLAT.open_amount(), 1.0);
        assert_eq!(FoldState::CLOSED.open_amount(), 0.0);
    }
}

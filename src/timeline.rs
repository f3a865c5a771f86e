//! Frame-based fold/unfold playback producing the raw progress scalar.
//!
//! Easing is not applied here; [`crate::FoldState`] shapes the progress once.

use crate::foundation::error::{FoldError, FoldResult};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Fps {
    pub fn new(num: u32, den: u32) -> FoldResult<Self> {
        if den == 0 {
            return Err(FoldError::animation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(FoldError::animation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    pub fn secs_to_frames_ceil(self, secs: f64) -> u64 {
        (secs * self.as_f64()).ceil().max(0.0) as u64
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LoopMode {
    /// Hold the final progress past the end.
    #[default]
    Once,
    Repeat,
    /// Fold, then unfold, then fold again.
    PingPong,
}

/// Progress ramp between two fold states over a whole number of frames.
///
/// Deserialization goes through [`FoldAnimation::validate`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawFoldAnimation")]
pub struct FoldAnimation {
    pub from: f64,
    pub to: f64,
    pub duration_frames: u64,
    pub loop_mode: LoopMode,
}

#[derive(serde::Deserialize)]
struct RawFoldAnimation {
    from: f64,
    to: f64,
    duration_frames: u64,
    #[serde(default)]
    loop_mode: LoopMode,
}

impl TryFrom<RawFoldAnimation> for FoldAnimation {
    type Error = FoldError;

    fn try_from(raw: RawFoldAnimation) -> FoldResult<Self> {
        Ok(Self::new(raw.from, raw.to, raw.duration_frames)?.with_loop(raw.loop_mode))
    }
}

impl FoldAnimation {
    pub fn new(from: f64, to: f64, duration_frames: u64) -> FoldResult<Self> {
        let anim = Self {
            from,
            to,
            duration_frames,
            loop_mode: LoopMode::Once,
        };
        anim.validate()?;
        Ok(anim)
    }

    /// Flat pattern to assembled box.
    pub fn fold(duration_frames: u64) -> FoldResult<Self> {
        Self::new(0.0, 1.0, duration_frames)
    }

    pub fn unfold(duration_frames: u64) -> FoldResult<Self> {
        Self::new(1.0, 0.0, duration_frames)
    }

    pub fn over_secs(from: f64, to: f64, secs: f64, fps: Fps) -> FoldResult<Self> {
        if !secs.is_finite() || secs <= 0.0 {
            return Err(FoldError::animation("duration must be > 0 seconds"));
        }
        Self::new(from, to, fps.secs_to_frames_ceil(secs))
    }

    pub fn with_loop(mut self, loop_mode: LoopMode) -> Self {
        self.loop_mode = loop_mode;
        self
    }

    pub fn validate(&self) -> FoldResult<()> {
        if self.duration_frames == 0 {
            return Err(FoldError::animation("duration_frames must be > 0"));
        }
        for (name, v) in [("from", self.from), ("to", self.to)] {
            if !(0.0..=1.0).contains(&v) {
                return Err(FoldError::animation(format!(
                    "{name} progress must be in [0, 1] (got {v})"
                )));
            }
        }
        Ok(())
    }

    /// Raw progress at `frame`; the last frame of a pass lands exactly on `to`.
    pub fn progress_at(&self, frame: FrameIndex) -> f64 {
        let n = self.duration_frames;
        let f = frame.0;
        let t = match self.loop_mode {
            LoopMode::Once => f.min(n) as f64 / n as f64,
            LoopMode::Repeat => {
                if f > 0 && f % n == 0 {
                    1.0
                } else {
                    (f % n) as f64 / n as f64
                }
            }
            LoopMode::PingPong => {
                let period = 2 * n;
                let local = f % period;
                if local <= n {
                    local as f64 / n as f64
                } else {
                    (period - local) as f64 / n as f64
                }
            }
        };
        self.from + (self.to - self.from) * t
    }

    /// Every frame of one pass, both endpoints included.
    pub fn frames(&self) -> impl Iterator<Item = (FrameIndex, f64)> + '_ {
        (0..=self.duration_frames).map(|f| (FrameIndex(f), self.progress_at(FrameIndex(f))))
    }
}

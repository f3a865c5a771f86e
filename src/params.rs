use crate::foundation::{
    core::DVec3,
    error::{FoldError, FoldResult},
};

/// The five user-facing box dimensions.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoxParameters {
    /// Width of the Back panel's top edge (and of the Lid).
    pub top_width: f64,
    /// Width of the Back panel's bottom edge (and of the Bottom).
    pub bottom_width: f64,
    /// Vertical height of the Back panel.
    pub height: f64,
    /// Distance from Back to Front when assembled.
    pub depth: f64,
    pub flap_width: f64, // may be 0
}

impl Default for BoxParameters {
    fn default() -> Self {
        Self {
            top_width: 30.0,
            bottom_width: 20.0,
            height: 25.0,
            depth: 15.0,
            flap_width: 2.0,
        }
    }
}

impl BoxParameters {
    /// Builds and validates a parameter set.
    pub fn new(
        top_width: f64,
        bottom_width: f64,
        height: f64,
        depth: f64,
        flap_width: f64,
    ) -> FoldResult<Self> {
        let params = Self {
            top_width,
            bottom_width,
            height,
            depth,
            flap_width,
        };
        params.validate()?;
        Ok(params)
    }

    /// Checks that every dimension is finite and positive (`flap_width` may be 0).
    ///
    /// The error names the first offending field.
    pub fn validate(&self) -> FoldResult<()> {
        for (name, v) in [
            ("top_width", self.top_width),
            ("bottom_width", self.bottom_width),
            ("height", self.height),
            ("depth", self.depth),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(FoldError::invalid_parameter(format!(
                    "{name} must be a finite value > 0 (got {v})"
                )));
            }
        }
        if !self.flap_width.is_finite() || self.flap_width < 0.0 {
            return Err(FoldError::invalid_parameter(format!(
                "flap_width must be a finite value >= 0 (got {})",
                self.flap_width
            )));
        }
        Ok(())
    }

    /// Validates, then derives [`BoxMetrics`].
    pub fn metrics(&self) -> FoldResult<BoxMetrics> {
        BoxMetrics::new(*self)
    }
}

/// Quantities derived from validated [`BoxParameters`].
///
/// The Back panel sits centred on the origin in the XY plane with its normal along +Z;
/// the assembled box extends toward +Z.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct BoxMetrics {
    /// The validated input.
    pub params: BoxParameters,
    /// Horizontal overhang of the top edge past the bottom edge, per side.
    pub dx: f64,
    /// Length of the Back panel's slanted side edges.
    pub slant_height: f64,
    /// Tilt of the side edges from vertical, radians.
    pub slant_angle: f64,
}

impl BoxMetrics {
    /// Validates `params` and derives the slant quantities.
    pub fn new(params: BoxParameters) -> FoldResult<Self> {
        params.validate()?;
        Ok(Self::derive(params))
    }

    /// Callers must have validated `params`.
    pub(crate) fn derive(params: BoxParameters) -> Self {
        let dx = (params.top_width - params.bottom_width) / 2.0;
        Self {
            params,
            dx,
            slant_height: dx.hypot(params.height),
            slant_angle: dx.atan2(params.height),
        }
    }

    /// Back panel corners, world space.
    pub fn back_bottom_left(&self) -> DVec3 {
        DVec3::new(-self.params.bottom_width / 2.0, -self.params.height / 2.0, 0.0)
    }

    pub fn back_bottom_right(&self) -> DVec3 {
        DVec3::new(self.params.bottom_width / 2.0, -self.params.height / 2.0, 0.0)
    }

    pub fn back_top_left(&self) -> DVec3 {
        DVec3::new(-self.params.top_width / 2.0, self.params.height / 2.0, 0.0)
    }

    pub fn back_top_right(&self) -> DVec3 {
        DVec3::new(self.params.top_width / 2.0, self.params.height / 2.0, 0.0)
    }

    /// Midpoint of the Back top edge, the Lid hinge.
    pub fn back_top_mid(&self) -> DVec3 {
        DVec3::new(0.0, self.params.height / 2.0, 0.0)
    }

    /// Midpoint of the Back bottom edge, the Bottom hinge.
    pub fn back_bottom_mid(&self) -> DVec3 {
        DVec3::new(0.0, -self.params.height / 2.0, 0.0)
    }

    /// Unit direction of the Back panel's left edge, bottom to top.
    pub fn left_edge_dir(&self) -> DVec3 {
        DVec3::new(-self.dx, self.params.height, 0.0) / self.slant_height
    }

    /// Unit direction of the Back panel's right edge, bottom to top.
    pub fn right_edge_dir(&self) -> DVec3 {
        DVec3::new(self.dx, self.params.height, 0.0) / self.slant_height
    }

    /// Overall net extent and per-panel areas.
    pub fn dimensions(&self) -> Dimensions {
        let p = &self.params;
        let s = self.slant_height;
        let fw = p.flap_width;

        let area_back = p.height * (p.top_width + p.bottom_width) / 2.0;
        let area_lid = p.top_width * p.depth;
        let area_bottom = p.bottom_width * p.depth;
        let area_sides = 2.0 * p.depth * s;
        // LidFlap, the two lid side flaps, the two side flaps and the two bottom tabs.
        let area_flaps =
            p.top_width * fw + 2.0 * p.depth * fw + 2.0 * s * fw + 2.0 * p.depth * fw;

        Dimensions {
            total_width: p.top_width + 2.0 * (s + fw),
            total_height: 2.0 * fw + 2.0 * p.depth + p.height,
            area_back,
            area_lid,
            area_bottom,
            area_sides,
            area_flaps,
            total_area: area_back + area_bottom + area_lid + area_sides + area_flaps,
        }
    }
}

/// Display quantities for the dimension readout.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Dimensions {
    /// Width of the flat net across the side panels and their flaps.
    pub total_width: f64,
    /// Height of the flat net from lid flap to bottom edge.
    pub total_height: f64,
    pub area_back: f64,
    pub area_lid: f64,
    pub area_bottom: f64,
    pub area_sides: f64,
    pub area_flaps: f64,
    /// Sum of the areas above; Front is not counted.
    pub total_area: f64,
}

use tracing::debug;

use crate::error::ParameterError;
use crate::geometry::SplineKind;
use crate::tessellation::TubeParams;

use super::{conform, Color, ParamClass, ParamId, ParamSpec, ParamValue, SPECS};

/// Outcome of a successful write.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Applied {
    pub id: ParamId,
    pub class: ParamClass,
    /// The value actually stored, after snapping and clamping.
    pub value: ParamValue,
    /// Whether the stored value differs from the previous one.
    pub changed: bool,
}

/// Current value of every parameter.
///
/// All writes go through [`ParameterSurface::set`], whether they come from
/// the panel or from a MIDI control.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSurface {
    values: Vec<ParamValue>,
    revision: u64,
}

impl ParameterSurface {
    /// Creates a surface holding every default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: SPECS.iter().map(|spec| spec.default).collect(),
            revision: 0,
        }
    }

    /// Declared specs of all parameters, in panel order.
    #[must_use]
    pub fn specs() -> &'static [ParamSpec] {
        &SPECS
    }

    /// Writes `value`, snapped to the step grid and clamped into range.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::KindMismatch`] if the value has the wrong
    /// kind and [`ParameterError::NonFinite`] for NaN or infinite numbers.
    pub fn set(&mut self, id: ParamId, value: ParamValue) -> Result<Applied, ParameterError> {
        let value = conform(id.spec(), value)?;
        let slot = &mut self.values[id as usize];
        let changed = *slot != value;
        *slot = value;
        self.revision += 1;

        debug!(param = %id, ?value, changed, revision = self.revision, "parameter written");
        Ok(Applied {
            id,
            class: id.class(),
            value,
            changed,
        })
    }

    #[must_use]
    pub fn get(&self, id: ParamId) -> ParamValue {
        self.values[id as usize]
    }

    /// Number of successful writes so far.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Numeric value of `id`, or 0 for a non-numeric parameter.
    #[must_use]
    pub fn number(&self, id: ParamId) -> f64 {
        match self.get(id) {
            ParamValue::Number(v) => v,
            _ => 0.0,
        }
    }

    /// Toggle value of `id`, or `false` for a non-toggle parameter.
    #[must_use]
    pub fn toggle(&self, id: ParamId) -> bool {
        matches!(self.get(id), ParamValue::Toggle(true))
    }

    /// Color value of `id`, or black for a non-color parameter.
    #[must_use]
    pub fn color(&self, id: ParamId) -> Color {
        match self.get(id) {
            ParamValue::Color(c) => c,
            _ => Color::BLACK,
        }
    }

    #[must_use]
    pub fn spline(&self) -> SplineKind {
        match self.get(ParamId::Spline) {
            ParamValue::Spline(kind) => kind,
            _ => SplineKind::default(),
        }
    }

    /// Tube discretization currently selected.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn tube_params(&self) -> TubeParams {
        TubeParams {
            extrusion_segments: self.number(ParamId::ExtrusionSegments).round() as usize,
            radius_segments: self.number(ParamId::RadiusSegments).round() as usize,
            radius: self.number(ParamId::Radius),
            closed: self.toggle(ParamId::Closed),
        }
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.number(ParamId::Scale)
    }

    #[must_use]
    pub fn speed_factor(&self) -> f64 {
        self.number(ParamId::SpeedFactor)
    }
}

impl Default for ParameterSurface {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn defaults() {
        let surface = ParameterSurface::new();
        assert_eq!(surface.spline(), SplineKind::TorusKnot);
        assert_eq!(surface.tube_params(), TubeParams::default());
        assert_relative_eq!(surface.scale(), 4.0);
        assert_relative_eq!(surface.speed_factor(), 1.0);
        assert!(surface.toggle(ParamId::AnimationView));
        assert!(!surface.toggle(ParamId::LookAhead));
        assert_eq!(surface.color(ParamId::BackgroundColor), Color::rgb(200, 10, 30));
        assert_eq!(surface.revision(), 0);
        assert_eq!(ParameterSurface::specs().len(), ParamId::ALL.len());
    }

    #[test]
    fn set_reports_class_and_change() {
        let mut surface = ParameterSurface::new();
        let applied = surface.set(ParamId::Scale, ParamValue::Number(7.0)).unwrap();
        assert_eq!(applied.class, ParamClass::Transform);
        assert!(applied.changed);
        assert_relative_eq!(surface.scale(), 8.0);

        let again = surface.set(ParamId::Scale, ParamValue::Number(8.0)).unwrap();
        assert!(!again.changed);
        assert_eq!(surface.revision(), 2);
    }

    #[test]
    fn radius_snaps_to_step() {
        let mut surface = ParameterSurface::new();
        surface.set(ParamId::Radius, ParamValue::Number(3.12)).unwrap();
        assert_relative_eq!(surface.number(ParamId::Radius), 3.1, epsilon = 1e-9);
        surface.set(ParamId::Radius, ParamValue::Number(100.0)).unwrap();
        assert_relative_eq!(surface.number(ParamId::Radius), 13.0);
    }

    #[test]
    fn failed_write_leaves_surface_untouched() {
        let mut surface = ParameterSurface::new();
        let before = surface.clone();
        assert!(surface
            .set(ParamId::Spline, ParamValue::Toggle(true))
            .is_err());
        assert!(surface
            .set(ParamId::Radius, ParamValue::Number(f64::NAN))
            .is_err());
        assert_eq!(surface, before);
    }

    #[test]
    fn spline_choice() {
        let mut surface = ParameterSurface::new();
        let applied = surface
            .set(ParamId::Spline, ParamValue::Spline(SplineKind::PipeSpline))
            .unwrap();
        assert_eq!(applied.class, ParamClass::Geometry);
        assert_eq!(surface.spline(), SplineKind::PipeSpline);
    }
}

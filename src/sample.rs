use crate::{color::Rgba8, math::Vec2d};

/// Where a [`Sample`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Captured directly from a pointer event.
    Original,
    /// Synthesized by the resampler between two captured samples.
    Interpolated,
}

/// A single point of a stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Position in canvas pixels.
    pub position: Vec2d,
    /// Brush radius in pixels, always inside the configured [`RadiusRange`].
    pub radius: f64,
    pub color: Rgba8,
    pub source: SourceKind,
}

impl Sample {
    pub fn original(position: Vec2d, radius: f64, color: Rgba8) -> Self {
        Self {
            position,
            radius,
            color,
            source: SourceKind::Original,
        }
    }
}

/// Maps pen pressure onto a brush radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusRange {
    pub min: f64,
    pub max: f64,
}

impl Default for RadiusRange {
    fn default() -> Self {
        Self {
            min: 5.0,
            max: 50.0,
        }
    }
}

impl RadiusRange {
    /// `pressure` is expected in range 0-1.
    ///
    /// Devices that don't report pressure (or report garbage) are treated as pressing fully.
    pub fn radius_for(&self, pressure: f64) -> f64 {
        // (this would be a good place to apply a pressure curve)
        let pressure = if pressure.is_finite() {
            pressure.clamp(0.0, 1.0)
        } else {
            1.0
        };
        f64::min(self.max, self.min + pressure * (self.max - self.min))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pressure_maps_onto_default_range() {
        let range = RadiusRange::default();
        assert_eq!(range.radius_for(0.0), 5.0);
        assert_eq!(range.radius_for(1.0), 50.0);
        assert_eq!(range.radius_for(0.5), 27.5);
    }

    #[test]
    fn out_of_range_pressure_is_clamped() {
        let range = RadiusRange::default();
        assert_eq!(range.radius_for(-3.0), 5.0);
        assert_eq!(range.radius_for(7.0), 50.0);
        assert_eq!(range.radius_for(f64::NAN), 50.0);
    }
}

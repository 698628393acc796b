//! Catmull-Rom smoothing of a stroke's sample polyline.

use crate::{
    math::{lerp, Vec2d},
    sample::Sample,
    stroke::Stroke,
};

/// A point on a fitted stroke curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    pub position: Vec2d,
    pub radius: f64,
}

impl From<&Sample> for CurvePoint {
    fn from(sample: &Sample) -> Self {
        Self {
            position: sample.position,
            radius: sample.radius,
        }
    }
}

/// Fits a Catmull-Rom spline through the samples of `stroke`.
///
/// Every span between two consecutive samples is evaluated at `segments_per_span` uniform
/// steps (starting at the span's first sample), and the stroke's final sample is appended
/// once at the end, so the curve ends exactly on it. Radius is interpolated linearly along
/// each span rather than through the spline.
///
/// Strokes with fewer than 2 samples produce no curve.
pub fn fit(stroke: &Stroke, segments_per_span: u32) -> Vec<CurvePoint> {
    fit_samples(stroke.samples(), segments_per_span)
}

pub fn fit_samples(samples: &[Sample], segments_per_span: u32) -> Vec<CurvePoint> {
    if samples.len() < 2 {
        return Vec::new();
    }
    let segments = segments_per_span.max(1);

    let spans = samples.len() - 1;
    let last = &samples[spans];
    let mut points = Vec::with_capacity(spans * segments as usize + 1);
    for i in 0..spans {
        // Clamp the control window at both ends of the stroke.
        let p0 = samples[i.saturating_sub(1)].position;
        let p1 = samples[i].position;
        let p2 = samples[i + 1].position;
        let p3 = samples[(i + 2).min(spans)].position;

        let (r1, r2) = (samples[i].radius, samples[i + 1].radius);
        for k in 0..segments {
            let t = f64::from(k) / f64::from(segments);
            points.push(CurvePoint {
                position: catmull_rom(p0, p1, p2, p3, t),
                radius: lerp(r1..=r2, t),
            });
        }
    }
    points.push(CurvePoint::from(last));
    points
}

fn catmull_rom(p0: Vec2d, p1: Vec2d, p2: Vec2d, p3: Vec2d, t: f64) -> Vec2d {
    let t2 = t * t;
    let t3 = t2 * t;
    let a = p1 * 2.0;
    let b = p2 - p0;
    let c = p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3;
    let d = p1 * 3.0 - p0 - p2 * 3.0 + p3;
    (a + b * t + c * t2 + d * t3) * 0.5
}

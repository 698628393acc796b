//! Variable-width triangle strips following fitted stroke curves.

use crate::{
    color::Rgba8,
    curve::{self, CurvePoint},
    math::Vec2d,
    stroke::Stroke,
};

/// Triangle-strip vertices for one or more strokes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ribbon {
    pub positions: Vec<Vec2d>,
    /// Normalized RGBA, one per position.
    pub colors: Vec<[f32; 4]>,
    /// Number of transparent degenerate pairs between strokes.
    pub separators: usize,
}

impl Ribbon {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    fn push(&mut self, position: Vec2d, color: [f32; 4]) {
        self.positions.push(position);
        self.colors.push(color);
    }

    /// Repeats the last vertex twice with a transparent color, producing zero-area triangles
    /// so the strip doesn't visibly connect what comes before and after.
    ///
    /// The triangle formed with the next stroke's first two vertices still has area; it fades
    /// from transparent into that stroke, so the renderer must draw with alpha blending.
    fn push_separator(&mut self) {
        if let Some(&last) = self.positions.last() {
            let transparent = Rgba8::TRANSPARENT.to_f32();
            self.push(last, transparent);
            self.push(last, transparent);
            self.separators += 1;
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RibbonBuilder {
    pub segments_per_span: u32,
    /// Distance below which the outer edge of a segment is considered collapsed.
    pub epsilon: f64,
    pub color: Rgba8,
}

impl Default for RibbonBuilder {
    fn default() -> Self {
        Self {
            segments_per_span: 20,
            epsilon: 0.01,
            color: Rgba8::RED,
        }
    }
}

impl RibbonBuilder {
    /// Builds a single strip covering every stroke, in the order given.
    ///
    /// Each curve segment contributes a quad `(v1, v3, v2, v4)`, where `v1`/`v2` are offset
    /// from the segment start by its radius on either side and `v3`/`v4` likewise from the
    /// segment end. Zero-length segments are skipped. Consecutive strokes are joined by a
    /// transparent degenerate pair.
    pub fn build<'a>(&self, strokes: impl IntoIterator<Item = &'a Stroke>) -> Ribbon {
        let mut ribbon = Ribbon::default();
        for stroke in strokes {
            let curve = curve::fit(stroke, self.segments_per_span);
            self.append_curve(&mut ribbon, &curve);
        }
        ribbon
    }

    fn append_curve(&self, ribbon: &mut Ribbon, curve: &[CurvePoint]) {
        let color = self.color.to_f32();
        let mut started = false;
        for pair in curve.windows(2) {
            let (cur, next) = (pair[0], pair[1]);
            let d = next.position - cur.position;
            if d.length() == 0.0 {
                continue;
            }
            let perp = d.normalize().perp();

            let mut v1 = cur.position + perp * cur.radius;
            let v2 = cur.position - perp * cur.radius;
            let mut v3 = next.position + perp * next.radius;
            let v4 = next.position - perp * next.radius;

            // At sharp turns the outer edge can fold onto itself; pull it apart.
            let gap = v1 - v3;
            if gap.x().abs() < self.epsilon && gap.y().abs() < self.epsilon {
                v1 = v1 + perp * self.epsilon;
                v3 = v3 - perp * self.epsilon;
            }

            if !started {
                ribbon.push_separator();
                started = true;
            }
            for v in [v1, v3, v2, v4] {
                ribbon.push(v, color);
            }
        }
    }
}

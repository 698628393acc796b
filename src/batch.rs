//! Flattening the stroke store into vertex arrays for the renderer.

use std::mem;

use serde::Deserialize;
use wgpu::{
    PrimitiveTopology, VertexAttribute, VertexBufferLayout, VertexFormat, VertexStepMode,
};

use crate::{
    color::Rgba8,
    ribbon::{Ribbon, RibbonBuilder},
    sample::Sample,
    store::StrokeStore,
    stroke::Stroke,
};

/// How strokes are turned into geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderMode {
    /// One point per sample.
    Points,
    /// The raw sample polyline as a triangle strip, without smoothing.
    TriangleStrip,
    /// A Catmull-Rom ribbon with a dot on every sample drawn on top.
    #[default]
    SmoothCurve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Points,
    TriangleStrip,
    /// A triangle strip containing transparent degenerate triangles between strokes. Needs
    /// alpha blending to hide the separators.
    TriangleStripSeparated,
}

impl Primitive {
    pub fn topology(self) -> PrimitiveTopology {
        match self {
            Primitive::Points => PrimitiveTopology::PointList,
            Primitive::TriangleStrip | Primitive::TriangleStripSeparated => {
                PrimitiveTopology::TriangleStrip
            }
        }
    }

    fn strip(separated: bool) -> Self {
        if separated {
            Primitive::TriangleStripSeparated
        } else {
            Primitive::TriangleStrip
        }
    }
}

const POSITION_ATTRS: [VertexAttribute; 1] = [VertexAttribute {
    format: VertexFormat::Float32x2,
    offset: 0,
    shader_location: 0,
}];
const RADIUS_ATTRS: [VertexAttribute; 1] = [VertexAttribute {
    format: VertexFormat::Float32,
    offset: 0,
    shader_location: 1,
}];
const COLOR_ATTRS: [VertexAttribute; 1] = [VertexAttribute {
    format: VertexFormat::Float32x4,
    offset: 0,
    shader_location: 2,
}];

/// One draw call worth of flat vertex data.
///
/// Every attribute lives in its own tightly packed buffer: `positions` holds `x, y` pairs,
/// `radii` one scalar per vertex (points only), `colors` normalized `r, g, b, a` quads.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub primitive: Primitive,
    pub positions: Vec<f32>,
    pub radii: Option<Vec<f32>>,
    pub colors: Vec<f32>,
}

impl Batch {
    fn new(primitive: Primitive) -> Self {
        Self {
            primitive,
            positions: Vec::new(),
            radii: matches!(primitive, Primitive::Points).then(Vec::new),
            colors: Vec::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn radius_bytes(&self) -> Option<&[u8]> {
        self.radii.as_deref().map(bytemuck::cast_slice::<f32, u8>)
    }

    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Vertex buffer layouts matching [`Batch::position_bytes`], [`Batch::radius_bytes`] (if
    /// present) and [`Batch::color_bytes`], in that order.
    ///
    /// Shader locations are fixed: position at 0, radius at 1, color at 2.
    pub fn vertex_buffer_layouts(&self) -> Vec<VertexBufferLayout<'static>> {
        let mut layouts = vec![VertexBufferLayout {
            array_stride: mem::size_of::<[f32; 2]>() as u64,
            step_mode: VertexStepMode::Vertex,
            attributes: &POSITION_ATTRS,
        }];
        if self.radii.is_some() {
            layouts.push(VertexBufferLayout {
                array_stride: mem::size_of::<f32>() as u64,
                step_mode: VertexStepMode::Vertex,
                attributes: &RADIUS_ATTRS,
            });
        }
        layouts.push(VertexBufferLayout {
            array_stride: mem::size_of::<[f32; 4]>() as u64,
            step_mode: VertexStepMode::Vertex,
            attributes: &COLOR_ATTRS,
        });
        layouts
    }

    fn push_point(&mut self, sample: &Sample, color: Rgba8) {
        self.push_vertex(sample.position.to_f32(), color.to_f32());
        if let Some(radii) = &mut self.radii {
            radii.push(sample.radius as f32);
        }
    }

    fn push_vertex(&mut self, position: [f32; 2], color: [f32; 4]) {
        self.positions.extend_from_slice(&position);
        self.colors.extend_from_slice(&color);
    }

    fn from_ribbon(ribbon: &Ribbon) -> Self {
        let mut batch = Self::new(Primitive::strip(ribbon.separators > 0));
        for (position, color) in ribbon.positions.iter().zip(&ribbon.colors) {
            batch.push_vertex(position.to_f32(), *color);
        }
        batch
    }
}

/// Consumer of batches. Owns buffer upload and draw calls.
pub trait Renderer {
    fn draw(&mut self, batch: &Batch);
}

/// Turns the contents of a [`StrokeStore`] into [`Batch`]es.
#[derive(Debug, Clone, Copy)]
pub struct Batcher {
    pub ribbon: RibbonBuilder,
    /// Color of the per-sample dots drawn over smooth curves.
    pub dot_color: Rgba8,
}

impl Default for Batcher {
    fn default() -> Self {
        Self {
            ribbon: RibbonBuilder::default(),
            dot_color: Rgba8::BLUE,
        }
    }
}

impl Batcher {
    /// Produces the batches for `mode`, in the order they should be drawn.
    ///
    /// Strokes are walked in store order; `z_index` is left to the renderer. The output only
    /// depends on the store's contents and `mode`.
    pub fn batch(&self, store: &StrokeStore, mode: RenderMode) -> Vec<Batch> {
        let strokes = store.strokes();
        match mode {
            RenderMode::Points => vec![points(strokes, None)],
            RenderMode::TriangleStrip => vec![triangle_strip(strokes)],
            RenderMode::SmoothCurve => vec![
                Batch::from_ribbon(&self.ribbon.build(strokes)),
                points(strokes, Some(self.dot_color)),
            ],
        }
    }

    /// Batches the store and hands every batch to `renderer`.
    pub fn render(&self, store: &StrokeStore, mode: RenderMode, renderer: &mut dyn Renderer) {
        for batch in self.batch(store, mode) {
            renderer.draw(&batch);
        }
    }
}

/// Every sample as a point, colored with `color` or the sample's own color.
fn points(strokes: &[Stroke], color: Option<Rgba8>) -> Batch {
    let mut batch = Batch::new(Primitive::Points);
    for sample in strokes.iter().flat_map(|stroke| stroke.samples()) {
        batch.push_point(sample, color.unwrap_or(sample.color));
    }
    batch
}

/// Every pair of consecutive samples as two strip vertices, strokes separated by transparent
/// degenerate triangles.
fn triangle_strip(strokes: &[Stroke]) -> Batch {
    let transparent = Rgba8::TRANSPARENT.to_f32();
    let mut positions: Vec<[f32; 2]> = Vec::new();
    let mut colors: Vec<[f32; 4]> = Vec::new();
    let mut separated = false;
    for stroke in strokes {
        let samples = stroke.samples();
        if samples.len() < 2 {
            continue;
        }
        if let Some(&last) = positions.last() {
            positions.extend([last, last]);
            colors.extend([transparent, transparent]);
            separated = true;
        }
        for pair in samples.windows(2) {
            for sample in pair {
                positions.push(sample.position.to_f32());
                colors.push(sample.color.to_f32());
            }
        }
    }

    let mut batch = Batch::new(Primitive::strip(separated));
    for (position, color) in positions.into_iter().zip(colors) {
        batch.push_vertex(position, color);
    }
    batch
}

use crate::{color::Rgba8, sample::Sample};

/// Display attributes stamped onto a stroke when it is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Rgba8,
    /// Draw order; higher values are drawn later (on top).
    pub z_index: i32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Rgba8::RED,
            z_index: 0,
        }
    }
}

/// An append-only run of samples produced by one drag gesture.
///
/// A stroke always holds at least one sample; insertion order is temporal order.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    samples: Vec<Sample>,
    pub color: Rgba8,
    pub z_index: i32,
}

impl Stroke {
    pub fn new(first: Sample, style: StrokeStyle) -> Self {
        Self {
            samples: vec![first],
            color: style.color,
            z_index: style.z_index,
        }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn last(&self) -> &Sample {
        &self.samples[self.samples.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub(crate) fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub(crate) fn extend(&mut self, samples: impl IntoIterator<Item = Sample>) {
        self.samples.extend(samples);
    }
}

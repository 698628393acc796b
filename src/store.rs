use anyhow::bail;

use crate::{
    sample::Sample,
    stroke::{Stroke, StrokeStyle},
};

/// Which stroke, if any, is receiving new samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveStroke {
    /// No stroke is receiving samples; the next pointer-down starts a new one.
    #[default]
    Idle,
    /// A freshly created stroke is being drawn. Ends on pointer-up/cancel.
    Drawing(usize),
    /// An existing stroke was reopened for editing. Every drag appends to it until editing
    /// ends.
    Editing(usize),
}

impl ActiveStroke {
    pub fn index(self) -> Option<usize> {
        match self {
            ActiveStroke::Idle => None,
            ActiveStroke::Drawing(i) | ActiveStroke::Editing(i) => Some(i),
        }
    }
}

/// Owns every stroke of the drawing session.
#[derive(Debug, Default)]
pub struct StrokeStore {
    strokes: Vec<Stroke>,
    active: ActiveStroke,
}

impl StrokeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn active(&self) -> ActiveStroke {
        self.active
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.active, ActiveStroke::Editing(_))
    }

    pub fn active_stroke(&self) -> Option<&Stroke> {
        self.active.index().map(|i| &self.strokes[i])
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn sample_count(&self) -> usize {
        self.strokes.iter().map(Stroke::len).sum()
    }

    /// Starts a new stroke and makes it the active one.
    pub(crate) fn begin_stroke(&mut self, first: Sample, style: StrokeStyle) -> usize {
        let index = self.strokes.len();
        self.strokes.push(Stroke::new(first, style));
        self.active = ActiveStroke::Drawing(index);
        index
    }

    pub(crate) fn active_stroke_mut(&mut self) -> Option<&mut Stroke> {
        self.active.index().map(|i| &mut self.strokes[i])
    }

    /// Stops drawing into the active stroke, unless it is being edited.
    pub(crate) fn finish_stroke(&mut self) {
        if let ActiveStroke::Drawing(_) = self.active {
            self.active = ActiveStroke::Idle;
        }
    }

    pub fn begin_editing(&mut self, index: usize) -> anyhow::Result<()> {
        if index >= self.strokes.len() {
            bail!(
                "cannot edit stroke {index}: only {} strokes exist",
                self.strokes.len()
            );
        }
        self.active = ActiveStroke::Editing(index);
        Ok(())
    }

    pub fn end_editing(&mut self) {
        if let ActiveStroke::Editing(_) = self.active {
            self.active = ActiveStroke::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{color::Rgba8, math::vec2};

    fn sample(x: f64) -> Sample {
        Sample::original(vec2(x, 0.0), 5.0, Rgba8::RED)
    }

    #[test]
    fn drawing_lifecycle() {
        let mut store = StrokeStore::new();
        assert_eq!(store.active(), ActiveStroke::Idle);

        let i = store.begin_stroke(sample(0.0), StrokeStyle::default());
        assert_eq!(i, 0);
        assert_eq!(store.active(), ActiveStroke::Drawing(0));
        store.active_stroke_mut().unwrap().push(sample(1.0));
        assert_eq!(store.active_stroke().unwrap().len(), 2);

        store.finish_stroke();
        assert_eq!(store.active(), ActiveStroke::Idle);
        assert!(store.active_stroke().is_none());
        assert_eq!(store.sample_count(), 2);
    }

    #[test]
    fn editing_survives_finish() {
        let mut store = StrokeStore::new();
        store.begin_stroke(sample(0.0), StrokeStyle::default());
        store.finish_stroke();

        assert!(store.begin_editing(3).is_err());
        assert_eq!(store.active(), ActiveStroke::Idle);

        store.begin_editing(0).unwrap();
        assert!(store.is_editing());
        store.finish_stroke();
        assert_eq!(store.active(), ActiveStroke::Editing(0));

        store.end_editing();
        assert_eq!(store.active(), ActiveStroke::Idle);
    }
}

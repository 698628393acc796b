use crate::{
    cmd::PointerEvent,
    color::Rgba8,
    config::Config,
    math::Vec2d,
    resample::Resampler,
    sample::{RadiusRange, Sample},
    store::{ActiveStroke, StrokeStore},
    stroke::StrokeStyle,
};

/// Turns pointer events into stroke samples. The only writer of its [`StrokeStore`].
#[derive(Debug)]
pub struct InputController {
    store: StrokeStore,
    resampler: Resampler,
    radius: RadiusRange,
    style: StrokeStyle,
    /// Whether the pointer is currently pressed.
    pressed: bool,
}

impl InputController {
    pub fn new(config: &Config) -> Self {
        Self {
            store: StrokeStore::new(),
            resampler: config.resampler(),
            radius: config.radius_range(),
            style: config.stroke_style(),
            pressed: false,
        }
    }

    pub fn store(&self) -> &StrokeStore {
        &self.store
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    /// Sets the style of strokes started from now on.
    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }

    /// Reopens stroke `index`: following drags append to it instead of starting new strokes.
    pub fn begin_editing(&mut self, index: usize) -> anyhow::Result<()> {
        self.store.begin_editing(index)?;
        log::debug!("editing stroke {index}");
        Ok(())
    }

    pub fn end_editing(&mut self) {
        if self.store.is_editing() {
            log::debug!("done editing");
        }
        self.store.end_editing();
    }

    /// Applies `event` to the store.
    ///
    /// Returns whether any sample was added, i.e. whether the geometry has to be rebuilt.
    pub fn handle(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down { position, pressure } => self.on_pointer_down(position, pressure),
            PointerEvent::Move { position, pressure } => self.on_pointer_move(position, pressure),
            PointerEvent::Up => {
                self.on_pointer_up();
                false
            }
            PointerEvent::Cancel => {
                self.on_pointer_cancel();
                false
            }
        }
    }

    pub fn on_pointer_down(&mut self, position: Vec2d, pressure: f64) -> bool {
        match self.store.active() {
            ActiveStroke::Editing(index) => {
                let Some(stroke) = self.store.active_stroke_mut() else {
                    return false;
                };
                let Some(sample) = sample_at(self.radius, position, pressure, stroke.color) else {
                    return false;
                };
                // Reattached strokes continue from wherever the pen lands.
                stroke.push(sample);
                log::debug!("resumed stroke {index} at {position:?}");
            }
            ActiveStroke::Idle | ActiveStroke::Drawing(_) => {
                let Some(sample) = sample_at(self.radius, position, pressure, self.style.color)
                else {
                    return false;
                };
                let index = self.store.begin_stroke(sample, self.style);
                log::debug!(
                    "started stroke {index} at {position:?} (color {}, z {})",
                    self.style.color,
                    self.style.z_index
                );
            }
        }
        self.pressed = true;
        true
    }

    pub fn on_pointer_move(&mut self, position: Vec2d, pressure: f64) -> bool {
        if !self.pressed {
            return false;
        }
        let resampler = self.resampler;
        let radius = self.radius;
        let Some(stroke) = self.store.active_stroke_mut() else {
            return false;
        };
        let Some(sample) = sample_at(radius, position, pressure, stroke.color) else {
            return false;
        };

        let samples = resampler.resample(Some(stroke.last()), sample);
        if samples.is_empty() {
            return false;
        }
        stroke.extend(samples);
        true
    }

    pub fn on_pointer_up(&mut self) {
        self.release("ended");
    }

    pub fn on_pointer_cancel(&mut self) {
        self.release("cancelled");
    }

    fn release(&mut self, how: &str) {
        if !self.pressed {
            return;
        }
        self.pressed = false;
        if let Some(stroke) = self.store.active_stroke() {
            log::debug!("stroke {how} with {} samples", stroke.len());
        }
        self.store.finish_stroke();
    }
}

fn sample_at(
    radius: RadiusRange,
    position: Vec2d,
    pressure: f64,
    color: Rgba8,
) -> Option<Sample> {
    if !position.is_finite() {
        log::debug!("ignoring pointer event at non-finite position {position:?}");
        return None;
    }
    Some(Sample::original(position, radius.radius_for(pressure), color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{math::vec2, sample::SourceKind};

    fn controller() -> InputController {
        InputController::new(&Config::default())
    }

    fn drag(c: &mut InputController, points: &[(f64, f64)]) {
        let (first, rest) = points.split_first().unwrap();
        c.on_pointer_down(vec2(first.0, first.1), 1.0);
        for &(x, y) in rest {
            c.on_pointer_move(vec2(x, y), 1.0);
        }
        c.on_pointer_up();
    }

    #[test]
    fn each_drag_creates_a_stroke() {
        let mut c = controller();
        drag(&mut c, &[(0.0, 0.0), (250.0, 0.0)]);
        drag(&mut c, &[(0.0, 300.0)]);

        let strokes = c.store().strokes();
        assert_eq!(strokes.len(), 2);
        assert_eq!(strokes[0].len(), 4);
        assert_eq!(strokes[1].len(), 1);
        assert_eq!(c.store().active(), ActiveStroke::Idle);
    }

    #[test]
    fn moves_within_threshold_add_nothing() {
        let mut c = controller();
        assert!(c.on_pointer_down(vec2(0.0, 0.0), 0.5));
        assert!(!c.on_pointer_move(vec2(50.0, 50.0), 0.5));
        assert!(!c.on_pointer_move(vec2(100.0, 0.0), 0.5));
        assert!(c.on_pointer_move(vec2(100.5, 0.0), 0.5));

        let stroke = c.store().active_stroke().unwrap();
        assert_eq!(stroke.len(), 3);
        assert_eq!(stroke.samples()[1].source, SourceKind::Interpolated);
        assert_eq!(stroke.last().position, vec2(100.5, 0.0));
        assert_eq!(stroke.last().radius, 27.5);
    }

    #[test]
    fn moves_without_press_are_ignored() {
        let mut c = controller();
        assert!(!c.on_pointer_move(vec2(500.0, 500.0), 1.0));
        assert!(c.store().is_empty());
    }

    #[test]
    fn cancel_keeps_samples() {
        let mut c = controller();
        c.handle(PointerEvent::Down {
            position: vec2(0.0, 0.0),
            pressure: 1.0,
        });
        c.handle(PointerEvent::Move {
            position: vec2(0.0, 150.0),
            pressure: 1.0,
        });
        assert!(!c.handle(PointerEvent::Cancel));
        assert!(!c.handle(PointerEvent::Move {
            position: vec2(0.0, 400.0),
            pressure: 1.0,
        }));

        assert_eq!(c.store().active(), ActiveStroke::Idle);
        assert_eq!(c.store().strokes()[0].len(), 3);
    }

    #[test]
    fn non_finite_positions_are_dropped() {
        let mut c = controller();
        assert!(!c.on_pointer_down(vec2(f64::NAN, 0.0), 1.0));
        assert!(c.store().is_empty());
        assert!(c.on_pointer_down(vec2(0.0, 0.0), 1.0));
        assert!(!c.on_pointer_move(vec2(f64::INFINITY, 0.0), 1.0));
        assert_eq!(c.store().sample_count(), 1);
    }

    #[test]
    fn editing_appends_to_existing_stroke() {
        let mut c = controller();
        drag(&mut c, &[(0.0, 0.0)]);
        drag(&mut c, &[(500.0, 0.0)]);

        assert!(c.begin_editing(7).is_err());
        c.begin_editing(0).unwrap();
        drag(&mut c, &[(0.0, 50.0), (0.0, 200.0)]);
        assert_eq!(c.store().len(), 2);
        assert_eq!(c.store().strokes()[0].len(), 4);
        assert_eq!(c.store().active(), ActiveStroke::Editing(0));

        c.end_editing();
        drag(&mut c, &[(900.0, 0.0)]);
        assert_eq!(c.store().len(), 3);
    }

    #[test]
    fn new_strokes_use_current_style() {
        let mut c = controller();
        let style = StrokeStyle {
            color: Rgba8::BLUE,
            z_index: 3,
        };
        c.set_style(style);
        drag(&mut c, &[(0.0, 0.0), (300.0, 0.0)]);

        let stroke = &c.store().strokes()[0];
        assert_eq!(stroke.color, Rgba8::BLUE);
        assert_eq!(stroke.z_index, 3);
        assert!(stroke.samples().iter().all(|s| s.color == Rgba8::BLUE));
    }
}

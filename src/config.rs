use std::{fs, path::Path};

use anyhow::{bail, Context};
use serde::Deserialize;

use crate::{
    batch::{Batcher, RenderMode},
    color::Rgba8,
    resample::Resampler,
    ribbon::RibbonBuilder,
    sample::RadiusRange,
    stroke::StrokeStyle,
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Minimum pen travel, in pixels, before new samples are added to a stroke.
    pub resample_threshold_px: f64,
    pub curve_segments_per_span: u32,
    pub ribbon_epsilon: f64,
    pub render_mode: RenderMode,
    /// Radius at zero pressure.
    pub min_radius: f64,
    /// Radius at full pressure.
    pub max_radius: f64,
    pub stroke_color: Rgba8,
    pub ribbon_color: Rgba8,
    pub dot_color: Rgba8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resample_threshold_px: 100.0,
            curve_segments_per_span: 20,
            ribbon_epsilon: 0.01,
            render_mode: RenderMode::SmoothCurve,
            min_radius: 5.0,
            max_radius: 50.0,
            stroke_color: Rgba8::RED,
            ribbon_color: Rgba8::RED,
            dot_color: Rgba8::BLUE,
        }
    }
}

impl Config {
    pub fn load<A: AsRef<Path>>(path: A) -> anyhow::Result<Self> {
        Self::load_impl(path.as_ref())
    }

    fn load_impl(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file `{}`", path.display()))?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if !(self.resample_threshold_px.is_finite() && self.resample_threshold_px > 0.0) {
            bail!(
                "`resample_threshold_px` must be a positive number (got {})",
                self.resample_threshold_px
            );
        }
        if self.curve_segments_per_span == 0 {
            bail!("`curve_segments_per_span` must be at least 1");
        }
        if !(self.ribbon_epsilon.is_finite() && self.ribbon_epsilon >= 0.0) {
            bail!(
                "`ribbon_epsilon` must not be negative (got {})",
                self.ribbon_epsilon
            );
        }
        let (min, max) = (self.min_radius, self.max_radius);
        if !(min.is_finite() && max.is_finite() && 0.0 < min && min <= max) {
            bail!("radius range must satisfy 0 < min_radius <= max_radius (got {min}..{max})");
        }
        Ok(())
    }

    pub fn resampler(&self) -> Resampler {
        Resampler::new(self.resample_threshold_px)
    }

    pub fn radius_range(&self) -> RadiusRange {
        RadiusRange {
            min: self.min_radius,
            max: self.max_radius,
        }
    }

    pub fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle {
            color: self.stroke_color,
            z_index: 0,
        }
    }

    pub fn batcher(&self) -> Batcher {
        Batcher {
            ribbon: RibbonBuilder {
                segments_per_span: self.curve_segments_per_span,
                epsilon: self.ribbon_epsilon,
                color: self.ribbon_color,
            },
            dot_color: self.dot_color,
        }
    }
}

use crate::{
    math::lerp,
    sample::{Sample, SourceKind},
};

/// Returns whether `candidate` is far enough from `last` to be added to the stroke.
///
/// The gate is exclusive: a candidate exactly `threshold_px` away is still rejected.
pub fn should_emit(last: &Sample, candidate: &Sample, threshold_px: f64) -> bool {
    last.position.dist(candidate.position) > threshold_px
}

/// Produces `count` samples evenly spaced from `last` (exclusive) to `candidate` (inclusive).
///
/// Position and radius are interpolated linearly. Every sample but the last is tagged
/// [`SourceKind::Interpolated`]; the last one is `candidate` itself.
pub fn interpolate(last: &Sample, candidate: &Sample, count: u32) -> Vec<Sample> {
    (1..=count)
        .map(|i| {
            if i == count {
                return *candidate;
            }
            let t = f64::from(i) / f64::from(count);
            Sample {
                position: lerp(last.position..=candidate.position, t),
                radius: lerp(last.radius..=candidate.radius, t),
                color: candidate.color,
                source: SourceKind::Interpolated,
            }
        })
        .collect()
}

/// Upper bound on the samples synthesized for a single pen movement.
///
/// Past this, spacing grows beyond the threshold instead of the stroke growing without bound.
pub const MAX_SAMPLES_PER_MOVE: u32 = 1024;

const DEFAULT_THRESHOLD_PX: f64 = 100.0;

/// Distance-gated resampling of pen input.
#[derive(Debug, Clone, Copy)]
pub struct Resampler {
    /// Minimum distance between consecutive stroke samples, in pixels. Finite and positive.
    threshold_px: f64,
}

impl Default for Resampler {
    fn default() -> Self {
        Self {
            threshold_px: DEFAULT_THRESHOLD_PX,
        }
    }
}

impl Resampler {
    /// A threshold that isn't a positive number falls back to the default of 100px.
    pub fn new(threshold_px: f64) -> Self {
        if !(threshold_px.is_finite() && threshold_px > 0.0) {
            log::warn!(
                "invalid resample threshold {threshold_px}, using {DEFAULT_THRESHOLD_PX}px"
            );
            return Self::default();
        }
        Self { threshold_px }
    }

    pub fn threshold_px(&self) -> f64 {
        self.threshold_px
    }

    /// Returns the samples to append for a new pen position, ending with `candidate`.
    ///
    /// Without a previous sample the candidate is inserted as-is. Otherwise, nothing is
    /// emitted until the pen has moved more than `threshold_px`; then enough intermediate
    /// samples are synthesized that no two consecutive samples are more than `threshold_px`
    /// apart.
    pub fn resample(&self, last: Option<&Sample>, candidate: Sample) -> Vec<Sample> {
        let Some(last) = last else {
            return vec![candidate];
        };

        if !should_emit(last, &candidate, self.threshold_px) {
            log::trace!(
                "dropping sample {:?}: within {}px of the last one",
                candidate.position,
                self.threshold_px
            );
            return Vec::new();
        }

        let dist = last.position.dist(candidate.position);
        let count = (dist / self.threshold_px)
            .ceil()
            .clamp(1.0, f64::from(MAX_SAMPLES_PER_MOVE)) as u32;
        log::trace!("moved {dist:.1}px, emitting {count} samples");
        interpolate(last, &candidate, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{color::Rgba8, math::vec2};

    fn sample(x: f64, y: f64, radius: f64) -> Sample {
        Sample::original(vec2(x, y), radius, Rgba8::RED)
    }

    #[test]
    fn gate_is_exclusive_at_threshold() {
        let last = sample(100.0, 0.0, 10.0);
        assert!(!should_emit(&last, &sample(200.0, 0.0, 10.0), 100.0));
        assert!(should_emit(&last, &sample(200.0001, 0.0, 10.0), 100.0));
        assert!(!should_emit(&last, &sample(150.0, 30.0, 10.0), 100.0));
    }

    #[test]
    fn interpolation_ends_on_candidate() {
        let last = sample(0.0, 0.0, 10.0);
        let candidate = sample(40.0, -20.0, 30.0);
        let out = interpolate(&last, &candidate, 4);

        assert_eq!(out.len(), 4);
        assert_eq!(out[3], candidate);
        assert_eq!(out[0].position, vec2(10.0, -5.0));
        assert_eq!(out[0].radius, 15.0);
        assert_eq!(out[1].position, vec2(20.0, -10.0));
        assert_eq!(out[1].radius, 20.0);
        assert!(out[..3]
            .iter()
            .all(|s| s.source == SourceKind::Interpolated));
        assert_eq!(out[3].source, SourceKind::Original);
    }

    #[test]
    fn interpolate_nothing() {
        assert!(interpolate(&sample(0.0, 0.0, 5.0), &sample(1.0, 0.0, 5.0), 0).is_empty());
    }

    #[test]
    fn first_sample_is_inserted_directly() {
        let resampler = Resampler::default();
        let s = sample(3.0, 4.0, 5.0);
        assert_eq!(resampler.resample(None, s), [s]);
    }

    #[test]
    fn close_samples_are_dropped() {
        let resampler = Resampler::default();
        let last = sample(0.0, 0.0, 5.0);
        assert!(resampler
            .resample(Some(&last), sample(60.0, 80.0, 5.0))
            .is_empty());
    }

    #[test]
    fn invalid_threshold_falls_back_to_default() {
        for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert_eq!(Resampler::new(bad).threshold_px(), 100.0);
        }
        assert_eq!(Resampler::new(12.5).threshold_px(), 12.5);
    }

    #[test]
    fn huge_jump_is_capped() {
        let resampler = Resampler::default();
        let last = sample(0.0, 0.0, 5.0);
        let candidate = sample(1e12, 0.0, 50.0);
        let out = resampler.resample(Some(&last), candidate);

        assert_eq!(out.len(), MAX_SAMPLES_PER_MOVE as usize);
        assert_eq!(out.last(), Some(&candidate));

        let out = Resampler::new(0.0).resample(Some(&last), sample(1e300, 1e300, 5.0));
        assert_eq!(out.len(), MAX_SAMPLES_PER_MOVE as usize);
    }

    #[test]
    fn spacing_never_exceeds_threshold() {
        let resampler = Resampler::new(100.0);
        let last = sample(0.0, 0.0, 5.0);
        let candidate = sample(250.0, 0.0, 20.0);
        let out = resampler.resample(Some(&last), candidate);

        assert_eq!(out.len(), 3);
        assert_eq!(out.last(), Some(&candidate));
        let mut prev = last.position;
        for s in &out {
            assert!(prev.dist(s.position) <= 100.0);
            prev = s.position;
        }
    }
}

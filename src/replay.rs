//! Recorded pointer gestures, for driving the pipeline without a pointing device.

use std::{fs, path::Path};

use anyhow::{bail, Context};
use serde::Deserialize;

use crate::{cmd::PointerEvent, math::vec2};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Replay {
    #[serde(rename = "gesture", default)]
    pub gestures: Vec<Gesture>,
}

/// One pointer-down, drag, pointer-up sequence.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Gesture {
    /// `[x, y, pressure]` triples. The first one is the pointer-down position.
    pub points: Vec<[f64; 3]>,
    /// End with a pointer-cancel instead of a pointer-up.
    #[serde(default)]
    pub cancel: bool,
    /// Reopen this stroke before the gesture starts, and stop editing afterwards.
    pub edit: Option<usize>,
}

impl Replay {
    pub fn load<A: AsRef<Path>>(path: A) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read gesture file `{}`", path.display()))?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        let replay: Self = toml::from_str(contents)?;
        for (i, gesture) in replay.gestures.iter().enumerate() {
            if gesture.points.is_empty() {
                bail!("gesture {i} has no points");
            }
        }
        Ok(replay)
    }
}

impl Gesture {
    pub fn events(&self) -> impl Iterator<Item = PointerEvent> + '_ {
        let end = if self.cancel {
            PointerEvent::Cancel
        } else {
            PointerEvent::Up
        };
        self.points
            .iter()
            .enumerate()
            .map(|(i, &[x, y, pressure])| {
                let position = vec2(x, y);
                if i == 0 {
                    PointerEvent::Down { position, pressure }
                } else {
                    PointerEvent::Move { position, pressure }
                }
            })
            .chain([end])
    }
}

//! Freehand stroke capture and geometry.
//!
//! Pointer events go through an [`InputController`](controller::InputController), which
//! resamples them into the [`StrokeStore`](store::StrokeStore). A
//! [`Batcher`](batch::Batcher) then turns the store into vertex arrays for a renderer, either
//! as raw points, as a triangle strip, or as a smoothed variable-width ribbon.

pub mod batch;
pub mod cmd;
pub mod color;
pub mod config;
pub mod controller;
pub mod curve;
pub mod math;
pub mod replay;
pub mod resample;
pub mod ribbon;
pub mod sample;
pub mod store;
pub mod stroke;

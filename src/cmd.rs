use crate::math::Vec2d;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down {
        /// Pointer position in canvas pixels.
        position: Vec2d,
        /// Pressure from 0-1.
        pressure: f64,
    },

    Move {
        /// Pointer position in canvas pixels.
        position: Vec2d,
        /// Pressure from 0-1.
        pressure: f64,
    },

    Up,

    /// The platform took the pointer away mid-gesture. The stroke keeps what it has.
    Cancel,
}

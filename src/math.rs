use std::{
    array,
    ops::{Add, Div, Mul, RangeInclusive, Sub},
};

#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(transparent)]
pub struct Vec<T, const N: usize>([T; N]);

impl<const N: usize> Vec<f64, N> {
    pub fn dist(self, other: Self) -> f64 {
        let mut sum = 0.0;
        for (&a, &b) in self.0.iter().zip(&other.0) {
            let diff = b - a;
            sum += diff * diff;
        }
        sum.sqrt()
    }

    pub fn length(self) -> f64 {
        self.dist(Vec([0.0; N]))
    }

    /// Returns the unit vector pointing in the same direction.
    ///
    /// The zero vector has no direction; callers must check the length first.
    pub fn normalize(self) -> Self {
        self / self.length()
    }

    pub fn is_finite(self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }

    /// Narrows every component for upload.
    pub fn to_f32(self) -> [f32; N] {
        self.0.map(|c| c as f32)
    }
}

impl<T: Copy> Vec<T, 2> {
    pub fn x(self) -> T {
        self.0[0]
    }

    pub fn y(self) -> T {
        self.0[1]
    }
}

impl Vec2d {
    /// Rotates the vector by 90° counter-clockwise: `(x, y) -> (-y, x)`.
    pub fn perp(self) -> Self {
        vec2(-self.y(), self.x())
    }
}

pub type Vec2<T> = Vec<T, 2>;
pub type Vec2d = Vec2<f64>;

impl<T, const N: usize> From<[T; N]> for Vec<T, N> {
    fn from(value: [T; N]) -> Self {
        Self(value)
    }
}

impl<T, const N: usize> From<Vec<T, N>> for [T; N] {
    fn from(value: Vec<T, N>) -> Self {
        value.0
    }
}

impl<T, const N: usize> Add<Vec<T, N>> for Vec<T, N>
where
    T: Add<Output = T> + Copy,
{
    type Output = Vec<T, N>;

    fn add(self, rhs: Vec<T, N>) -> Self::Output {
        Vec(array::from_fn(|i| self.0[i] + rhs.0[i]))
    }
}

impl<T, const N: usize> Sub<Vec<T, N>> for Vec<T, N>
where
    T: Sub<Output = T> + Copy,
{
    type Output = Vec<T, N>;

    fn sub(self, rhs: Vec<T, N>) -> Self::Output {
        Vec(array::from_fn(|i| self.0[i] - rhs.0[i]))
    }
}

impl<T, const N: usize> Mul<T> for Vec<T, N>
where
    T: Mul<Output = T> + Copy,
{
    type Output = Vec<T, N>;

    fn mul(self, rhs: T) -> Self::Output {
        Vec(array::from_fn(|i| self.0[i] * rhs))
    }
}

impl<T, const N: usize> Div<T> for Vec<T, N>
where
    T: Div<Output = T> + Copy,
{
    type Output = Vec<T, N>;

    fn div(self, rhs: T) -> Self::Output {
        Vec(array::from_fn(|i| self.0[i] / rhs))
    }
}

pub fn vec2<T>(x: T, y: T) -> Vec2<T> {
    Vec([x, y])
}

pub fn lerp<R>(range: RangeInclusive<R>, t: f64) -> R
where
    R: Copy + Add<R, Output = R> + Mul<f64, Output = R>,
{
    *range.start() * (1.0 - t) + *range.end() * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perp_rotates_counter_clockwise() {
        assert_eq!(vec2(1.0, 0.0).perp(), vec2(-0.0, 1.0));
        assert_eq!(vec2(0.0, 2.0).perp(), vec2(-2.0, 0.0));
    }

    #[test]
    fn lerp_hits_both_ends() {
        let a = vec2(3.0, -7.5);
        let b = vec2(10.25, 4.0);
        assert_eq!(lerp(a..=b, 0.0), a);
        assert_eq!(lerp(a..=b, 1.0), b);
        assert_eq!(lerp(10.0..=20.0, 0.5), 15.0);
    }

    #[test]
    fn normalize_has_unit_length() {
        let v = vec2(3.0, 4.0);
        assert_eq!(v.length(), 5.0);
        assert!((v.normalize().length() - 1.0).abs() < 1e-12);
    }
}

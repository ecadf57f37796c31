//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Clamp a value into the range `[min, max]`.
pub fn clamp<T>(value: &T, min: &T, max: &T) -> T 
where
    T: Float
{
    let mut ret = *value;

    if ret > *max {
        ret = *max
    }
    if ret < *min {
        ret = *min
    }

    ret
}

/// Calculates the least nonnegative remainder of `lhs (mod rhs)`.
/// 
/// This function is taken from the std library as num is missing it.
///
/// In particular, the return value `r` satisfies `0.0 <= r < rhs.abs()` in
/// most cases. However, due to a floating point round-off error it can
/// result in `r == rhs.abs()` if `lhs` is much smaller than `rhs.abs()` in
/// magnitude and `lhs < 0.0`.
pub fn rem_euclid<T>(lhs: T, rhs: T) -> T
where
    T: Float
{
    let r = lhs % rhs;
    if r < T::zero() { r + rhs.abs() } else { r }
}

/// Wrap an angle in degrees into the range `[-180, 180)`.
pub fn wrap_180_deg<T>(angle_deg: T) -> T
where
    T: Float
{
    let half_turn = T::from(180.0).unwrap_or_else(T::zero);
    let full_turn = half_turn + half_turn;

    rem_euclid(angle_deg + half_turn, full_turn) - half_turn
}

/// The hypotenuse of `x` and `y`, the distance of the point `(x, y)` from the
/// origin.
pub fn hypot<T>(x: T, y: T) -> T
where
    T: Float
{
    x.hypot(y)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(&1.5f64, &-1.0, &1.0), 1.0);
        assert_eq!(clamp(&-1.5f64, &-1.0, &1.0), -1.0);
        assert_eq!(clamp(&0.25f64, &-1.0, &1.0), 0.25);
    }

    #[test]
    fn test_rem_euclid() {
        assert_eq!(rem_euclid(7f64, 4f64), 3f64);
        assert_eq!(rem_euclid(-1f64, 4f64), 3f64);
    }

    #[test]
    fn test_wrap_180_deg() {
        assert_eq!(wrap_180_deg(0f64), 0f64);
        assert_eq!(wrap_180_deg(190f64), -170f64);
        assert_eq!(wrap_180_deg(-190f64), 170f64);
        assert_eq!(wrap_180_deg(180f64), -180f64);
        assert_eq!(wrap_180_deg(-73.5f64), -73.5f64);
        assert_eq!(wrap_180_deg(720f64 + 45f64), 45f64);
    }

    #[test]
    fn test_hypot() {
        assert!((hypot(500f64, 1000f64) - 1118.033988749895).abs() < 1e-9);
        assert_eq!(hypot(0f64, 0f64), 0f64);
    }
}

//! L4 Atomic Layer: Easing curve for scroll animations
//!
//! Maps normalized elapsed time in [0, 1] to normalized progress in [0, 1].

/// Cubic ease-in-out: 4t³ below the midpoint, 1 + 4(t-1)³ above it
#[inline]
pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let inv = t - 1.0;
        1.0 + 4.0 * inv * inv * inv
    }
}

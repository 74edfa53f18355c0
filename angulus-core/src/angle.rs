//! Angle mapping
//!
//! Converts a wrapped quadrature count into degrees. The result lies in the
//! half-open interval `[-180, 180)`, mirroring the count range
//! `[-P/2, P/2)`: `-P/2` maps to exactly -180 and `+P/2` is never produced.

use crate::config::EncoderResolution;
use crate::quadrature::wrap_position;

/// Shaft angle in degrees, within `[-180, 180)`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Angle(f32);

impl Angle {
    /// Lower bound (inclusive)
    pub const MIN_DEGREES: f32 = -180.0;

    /// Upper bound (exclusive)
    pub const MAX_DEGREES: f32 = 180.0;

    /// Angle for a quadrature count
    ///
    /// Counts outside one revolution are folded back first, so any value the
    /// tracker produces (and its out-of-range neighbours) maps cleanly.
    pub fn from_position(position: i32, resolution: EncoderResolution) -> Self {
        let counts = resolution.counts_per_rev();
        let position = wrap_position(position, counts);
        // Multiply first: exact for power-of-two resolutions
        let degrees = position as f32 * 360.0 / counts as f32;
        Self::from_degrees(degrees)
    }

    /// Angle from arbitrary degrees, normalized into `[-180, 180)`
    pub fn from_degrees(degrees: f32) -> Self {
        let mut degrees = degrees;
        if degrees >= Self::MAX_DEGREES {
            degrees -= 360.0;
        }
        if degrees < Self::MIN_DEGREES {
            degrees += 360.0;
        }
        Self(degrees)
    }

    /// Value in degrees
    pub const fn degrees(self) -> f32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RESOLUTION;
    use proptest::prelude::*;

    fn deg(position: i32) -> f32 {
        Angle::from_position(position, RESOLUTION).degrees()
    }

    #[test]
    fn test_zero() {
        assert_eq!(deg(0), 0.0);
    }

    #[test]
    fn test_quarter_turn() {
        assert_eq!(deg(1024), 90.0);
        assert_eq!(deg(-1024), -90.0);
    }

    #[test]
    fn test_lower_boundary_is_included() {
        assert_eq!(deg(-2048), -180.0);
    }

    #[test]
    fn test_upper_boundary_is_excluded() {
        // +P/2 is not a tracker value, but if passed it lands on the lower bound
        assert_eq!(deg(2048), -180.0);
        assert!(deg(2047) < 180.0);
    }

    #[test]
    fn test_wrapped_past_half_turn() {
        // 2200 forward edges from rest wrap to -1896
        assert_eq!(deg(-1896), -166.640625);
        assert_eq!(deg(2200), -166.640625);
    }

    #[test]
    fn test_from_degrees_normalizes() {
        assert_eq!(Angle::from_degrees(180.0).degrees(), -180.0);
        assert_eq!(Angle::from_degrees(270.0).degrees(), -90.0);
        assert_eq!(Angle::from_degrees(-190.0).degrees(), 170.0);
        assert_eq!(Angle::from_degrees(45.5).degrees(), 45.5);
    }

    proptest! {
        #[test]
        fn prop_angle_in_range(position in -2048i32..2048) {
            let d = deg(position);
            prop_assert!((-180.0..180.0).contains(&d), "{} -> {}", position, d);
        }

        #[test]
        fn prop_angle_monotonic(position in -2048i32..2047) {
            prop_assert!(deg(position) < deg(position + 1));
        }
    }
}

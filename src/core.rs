use crate::error::{KinetypeError, KinetypeResult};

/// Absolute 0-based frame index in animation time.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
///
/// The engine itself is clockless; `Fps` only matters at the boundaries, where
/// millisecond intervals are converted into whole frames and where a wall clock
/// paces playback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> KinetypeResult<Self> {
        if den == 0 {
            return Err(KinetypeError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(KinetypeError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Convert frame count to seconds.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    /// Convert seconds to frame count using floor semantics.
    pub fn secs_to_frames_floor(self, secs: f64) -> u64 {
        (secs * self.as_f64()).floor().max(0.0) as u64
    }

    /// Convert a millisecond duration to frame count using floor semantics.
    pub fn millis_to_frames_floor(self, millis: u64) -> u64 {
        self.secs_to_frames_floor(millis as f64 / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_rejects_zero_parts() {
        assert!(Fps::new(60, 0).is_err());
        assert!(Fps::new(0, 1).is_err());
    }

    #[test]
    fn fps_conversions_round_trip() {
        let fps = Fps::new(60, 1).unwrap();
        assert_eq!(fps.as_f64(), 60.0);
        assert_eq!(fps.secs_to_frames_floor(1.0), 60);
        assert_eq!(fps.frames_to_secs(30), 0.5);
    }

    #[test]
    fn millis_to_frames_floors() {
        let fps = Fps::new(60, 1).unwrap();
        assert_eq!(fps.millis_to_frames_floor(3000), 180);
        assert_eq!(fps.millis_to_frames_floor(2500), 150);
        // Sub-frame intervals floor to zero frames of delay.
        assert_eq!(fps.millis_to_frames_floor(10), 0);
    }
}

use std::path::PathBuf;

/// Microsecond clock used by container-level seeks.
pub const MICROS_PER_SECOND: i64 = 1_000_000;

/// Rational unit in which a stream's timestamps are expressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeBase {
    pub numerator: i32,
    pub denominator: i32,
}

impl TimeBase {
    pub fn new(numerator: i32, denominator: i32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.numerator > 0 && self.denominator > 0
    }

    pub fn to_seconds(&self, pts: i64) -> f64 {
        if !self.is_valid() {
            return 0.0;
        }
        pts as f64 * self.numerator as f64 / self.denominator as f64
    }

    /// Rescales `pts` to microseconds, rounding toward negative infinity so a
    /// seek never lands after the requested picture.
    pub fn to_micros(&self, pts: i64) -> i64 {
        if !self.is_valid() {
            return 0;
        }
        let scaled = pts as i128 * self.numerator as i128 * MICROS_PER_SECOND as i128;
        scaled.div_euclid(self.denominator as i128) as i64
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    pub stream_index: usize,
    pub time_base: TimeBase,
    pub fps: f64,
    pub total_frames: usize,
    pub codec: String,
    pub source_path: Option<PathBuf>,
}

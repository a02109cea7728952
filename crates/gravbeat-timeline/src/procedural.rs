use rand::Rng;

/// Length of one generated window of pattern-mode timing (5 minutes).
pub const PROCEDURAL_WINDOW_US: i64 = 300_000_000;
pub const DEFAULT_MIN_GAP_US: i64 = 500_000;
pub const DEFAULT_MAX_GAP_US: i64 = 1_500_000;

/// Random-walk timestamp generator for pattern mode.
///
/// Timestamps start at 0 and advance by a gap drawn uniformly from
/// `[min_gap_us, max_gap_us]`. Only timing is generated here; the lanes for
/// each timestamp are drawn when it is spawned.
#[derive(Debug, Clone)]
pub struct ProceduralClock {
    next_us: i64,
    horizon_us: i64,
    min_gap_us: i64,
    max_gap_us: i64,
}

impl ProceduralClock {
    pub fn new(min_gap_us: i64, max_gap_us: i64) -> Self {
        let min_gap_us = min_gap_us.max(1);
        Self {
            next_us: 0,
            horizon_us: 0,
            min_gap_us,
            max_gap_us: max_gap_us.max(min_gap_us),
        }
    }

    /// Generate timestamps for the next `duration_us` of play, continuing
    /// where the previous window stopped.
    pub fn extend<R: Rng + ?Sized>(&mut self, rng: &mut R, duration_us: i64) -> Vec<i64> {
        let end = self.horizon_us + duration_us;
        let mut out = Vec::new();
        while self.next_us < end {
            out.push(self.next_us);
            self.next_us += rng.gen_range(self.min_gap_us..=self.max_gap_us);
        }
        self.horizon_us = end;
        out
    }

    /// End of the generated range so far.
    pub fn horizon_us(&self) -> i64 {
        self.horizon_us
    }
}

impl Default for ProceduralClock {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_GAP_US, DEFAULT_MAX_GAP_US)
    }
}

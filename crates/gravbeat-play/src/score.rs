use crate::judge::Judgment;

/// Score multiplier for the combo held before a hit lands.
pub fn combo_multiplier(combo: u32) -> u32 {
    match combo {
        0..=99 => 1,
        100..=199 => 2,
        200..=299 => 3,
        _ => 4,
    }
}

/// Combo and score state. Changes only through [`ScoreManager::add_judgment`].
#[derive(Debug, Clone, Default)]
pub struct ScoreManager {
    score: u64,
    combo: u32,
    max_combo: u32,
    miss_count: u32,
    perfect_count: u32,
    good_count: u32,
    late_count: u32,
    early_count: u32,
    /// Sum of base scores before multipliers, for accuracy.
    base_points: u64,
    /// Best possible base score for every judgment so far.
    max_base_points: u64,
}

impl ScoreManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one judgment. `base` is its unmultiplied score and `perfect`
    /// the Perfect base score used as the accuracy ceiling. Returns the
    /// points awarded.
    pub fn add_judgment(&mut self, judgment: Judgment, base: u32, perfect: u32) -> u64 {
        self.max_base_points += u64::from(perfect);
        match judgment {
            Judgment::Miss => {
                self.combo = 0;
                self.miss_count += 1;
                return 0;
            }
            Judgment::Perfect => self.perfect_count += 1,
            Judgment::Good => self.good_count += 1,
            Judgment::Late => self.late_count += 1,
            Judgment::Early => self.early_count += 1,
        }

        let points = u64::from(base) * u64::from(combo_multiplier(self.combo));
        self.score += points;
        self.base_points += u64::from(base);
        self.combo += 1;
        self.max_combo = self.max_combo.max(self.combo);
        points
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn max_combo(&self) -> u32 {
        self.max_combo
    }

    pub fn miss_count(&self) -> u32 {
        self.miss_count
    }

    pub fn perfect_count(&self) -> u32 {
        self.perfect_count
    }

    pub fn good_count(&self) -> u32 {
        self.good_count
    }

    pub fn late_count(&self) -> u32 {
        self.late_count
    }

    pub fn early_count(&self) -> u32 {
        self.early_count
    }

    pub fn hit_count(&self) -> u32 {
        self.perfect_count + self.good_count + self.late_count + self.early_count
    }

    pub fn total_judgments(&self) -> u32 {
        self.hit_count() + self.miss_count
    }

    /// Base points earned over the best possible, as a percentage.
    pub fn accuracy(&self) -> f64 {
        if self.max_base_points == 0 {
            return 100.0;
        }
        self.base_points as f64 / self.max_base_points as f64 * 100.0
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

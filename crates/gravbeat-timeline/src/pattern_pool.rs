//! Difficulty-weighted lane patterns for pattern (procedural) mode.
//!
//! Single lanes carry most of the weight; chords get rarer as they grow.

use anyhow::{Context, Result, bail};
use gravbeat_types::{Difficulty, LaneSet};
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};

const EASY_TABLE: &[(&str, f64)] = &[
    ("d", 0.20),
    ("f", 0.20),
    ("j", 0.20),
    ("k", 0.20),
    ("fj", 0.08),
    ("dk", 0.08),
    ("dfj", 0.01),
    ("dfjk", 0.01),
];

const MEDIUM_TABLE: &[(&str, f64)] = &[
    ("d", 0.18),
    ("f", 0.18),
    ("j", 0.18),
    ("k", 0.18),
    ("df", 0.09),
    ("jk", 0.09),
    ("dfj", 0.04),
    ("fjk", 0.04),
    ("dfjk", 0.02),
];

// "ddff" and "jjkk" are doubled-up chords in the hard table; as lane
// sets they collapse to "df" and "jk" and only shift weight toward those.
const HARD_TABLE: &[(&str, f64)] = &[
    ("d", 0.12),
    ("f", 0.12),
    ("j", 0.12),
    ("k", 0.12),
    ("df", 0.10),
    ("jk", 0.10),
    ("dfj", 0.08),
    ("fjk", 0.08),
    ("dfjk", 0.06),
    ("ddff", 0.05),
    ("jjkk", 0.05),
];

/// A weighted pool of lane sets.
#[derive(Debug, Clone)]
pub struct PatternPool {
    patterns: Vec<LaneSet>,
    weights: Vec<f64>,
    index: WeightedIndex<f64>,
}

impl PatternPool {
    /// Build a pool from `(keys, weight)` entries such as `("dk", 0.08)`.
    /// Weights are normalized to sum to 1.
    pub fn new(entries: &[(&str, f64)]) -> Result<Self> {
        let mut patterns = Vec::with_capacity(entries.len());
        let mut weights = Vec::with_capacity(entries.len());
        for &(keys, weight) in entries {
            let lanes = LaneSet::from_keys(keys);
            if lanes.is_empty() {
                bail!("pattern '{keys}' has no valid lanes");
            }
            patterns.push(lanes);
            weights.push(weight);
        }
        let index = WeightedIndex::new(&weights).context("invalid pattern weights")?;
        let total: f64 = weights.iter().sum();
        for weight in &mut weights {
            *weight /= total;
        }
        Ok(Self {
            patterns,
            weights,
            index,
        })
    }

    pub fn for_difficulty(difficulty: Difficulty) -> Result<Self> {
        let table = match difficulty {
            Difficulty::Easy => EASY_TABLE,
            Difficulty::Medium => MEDIUM_TABLE,
            Difficulty::Hard => HARD_TABLE,
        };
        Self::new(table).with_context(|| format!("{difficulty} pattern table"))
    }

    /// Draw one lane set.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> LaneSet {
        self.patterns[self.index.sample(rng)]
    }

    pub fn patterns(&self) -> &[LaneSet] {
        &self.patterns
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }
}

/// The built-in pools for every difficulty, built once per session so the
/// difficulty can change without regenerating timing.
#[derive(Debug, Clone)]
pub struct PatternPools {
    easy: PatternPool,
    medium: PatternPool,
    hard: PatternPool,
}

impl PatternPools {
    pub fn builtin() -> Result<Self> {
        Ok(Self {
            easy: PatternPool::for_difficulty(Difficulty::Easy)?,
            medium: PatternPool::for_difficulty(Difficulty::Medium)?,
            hard: PatternPool::for_difficulty(Difficulty::Hard)?,
        })
    }

    pub fn get(&self, difficulty: Difficulty) -> &PatternPool {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }
}

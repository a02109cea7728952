use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of playable lanes.
pub const LANE_COUNT: usize = 4;

/// A playable column. Each lane is bound to one keyboard key and one
/// horizontal position on the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lane {
    Left,
    Down,
    Up,
    Right,
}

impl Lane {
    /// Returns all lanes in field order (left to right).
    pub fn all() -> &'static [Lane; LANE_COUNT] {
        &[Lane::Left, Lane::Down, Lane::Up, Lane::Right]
    }

    /// 0-based index in field order.
    pub fn index(self) -> usize {
        match self {
            Lane::Left => 0,
            Lane::Down => 1,
            Lane::Up => 2,
            Lane::Right => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Lane> {
        Lane::all().get(index).copied()
    }

    /// The key identifier used by key logs and the keyboard binding.
    pub fn key(self) -> char {
        match self {
            Lane::Left => 'd',
            Lane::Down => 'f',
            Lane::Up => 'j',
            Lane::Right => 'k',
        }
    }

    /// Parse a key-log identifier. Surrounding whitespace is ignored,
    /// anything other than a single bound key yields `None`.
    pub fn from_key(key: &str) -> Option<Lane> {
        let mut chars = key.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Lane::from_char(c),
            _ => None,
        }
    }

    pub fn from_char(c: char) -> Option<Lane> {
        match c {
            'd' => Some(Lane::Left),
            'f' => Some(Lane::Down),
            'j' => Some(Lane::Up),
            'k' => Some(Lane::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Ordered set of lanes hit together by one timeline event.
///
/// Stored as a bitmask so iteration is always in field order and duplicate
/// lanes collapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LaneSet(u8);

impl LaneSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn single(lane: Lane) -> Self {
        let mut set = Self::empty();
        set.insert(lane);
        set
    }

    pub fn insert(&mut self, lane: Lane) {
        self.0 |= 1 << lane.index();
    }

    pub fn contains(self, lane: Lane) -> bool {
        self.0 & (1 << lane.index()) != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Lane> {
        Lane::all().iter().copied().filter(move |&l| self.contains(l))
    }

    /// Builds a set from key identifiers such as `"dfj"`; characters that are
    /// not bound keys are ignored.
    pub fn from_keys(keys: &str) -> Self {
        keys.chars().filter_map(Lane::from_char).collect()
    }
}

impl FromIterator<Lane> for LaneSet {
    fn from_iter<I: IntoIterator<Item = Lane>>(iter: I) -> Self {
        let mut set = Self::empty();
        for lane in iter {
            set.insert(lane);
        }
        set
    }
}

impl fmt::Display for LaneSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<String> = self.iter().map(|l| l.key().to_string()).collect();
        write!(f, "{}", keys.join(","))
    }
}

impl Serialize for LaneSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for LaneSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let lanes = Vec::<Lane>::deserialize(deserializer)?;
        Ok(lanes.into_iter().collect())
    }
}

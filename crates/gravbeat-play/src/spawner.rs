use std::collections::VecDeque;

use gravbeat_config::FieldConfig;
use gravbeat_timeline::{PatternPool, Timeline, TimelineEvent};
use gravbeat_types::{Lane, LaneSet, Rect, TravelDirection};
use log::{debug, warn};
use rand::Rng;

use crate::note::NoteField;

/// Sprite dimensions per lane, supplied by the presentation layer.
pub trait SpriteCatalog {
    /// `(width, height)` of the note sprite, or `None` when the lane has no
    /// sprite loaded.
    fn sprite_size(&self, lane: Lane) -> Option<(f32, f32)>;
}

/// Same sprite size for every lane.
#[derive(Debug, Clone, Copy)]
pub struct UniformSprites {
    pub width: f32,
    pub height: f32,
}

impl UniformSprites {
    pub fn from_field(field: &FieldConfig) -> Self {
        Self {
            width: field.sprite_width,
            height: field.sprite_height,
        }
    }
}

impl SpriteCatalog for UniformSprites {
    fn sprite_size(&self, _lane: Lane) -> Option<(f32, f32)> {
        Some((self.width, self.height))
    }
}

/// One pending spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnEntry {
    /// Lanes come from the track.
    Fixed(TimelineEvent),
    /// Lanes are drawn from the pattern pool when the entry is consumed.
    Procedural(i64),
}

impl SpawnEntry {
    pub fn time_us(&self) -> i64 {
        match self {
            SpawnEntry::Fixed(event) => event.time_us,
            SpawnEntry::Procedural(time_us) => *time_us,
        }
    }
}

/// Everything a spawn pass reads besides the queue itself.
pub struct SpawnContext<'a, R: Rng + ?Sized> {
    pub now_us: i64,
    pub direction: TravelDirection,
    pub field: &'a FieldConfig,
    pub pool: &'a PatternPool,
    pub sprites: &'a dyn SpriteCatalog,
    pub rng: &'a mut R,
}

/// Time-ordered spawn queue.
///
/// Only the head is ever examined, so the cost per tick is proportional to
/// the number of entries that actually come due.
#[derive(Debug)]
pub struct Spawner {
    queue: VecDeque<SpawnEntry>,
    window_us: i64,
    enabled: bool,
    stale_dropped: u64,
}

impl Spawner {
    pub fn new(window_us: i64) -> Self {
        Self {
            queue: VecDeque::new(),
            window_us,
            enabled: true,
            stale_dropped: 0,
        }
    }

    pub fn from_timeline(timeline: Timeline, window_us: i64) -> Self {
        let mut spawner = Self::new(window_us);
        spawner
            .queue
            .extend(timeline.into_events().into_iter().map(SpawnEntry::Fixed));
        spawner
    }

    pub fn from_procedural(times: Vec<i64>, window_us: i64) -> Self {
        let mut spawner = Self::new(window_us);
        spawner.extend_procedural(times);
        spawner
    }

    /// Append generated timestamps. They must not precede the queue tail.
    pub fn extend_procedural(&mut self, times: Vec<i64>) {
        let tail = self.last_time_us().unwrap_or(i64::MIN);
        for time_us in times {
            if time_us < tail {
                warn!("Dropping out-of-order spawn time {time_us} (tail {tail})");
                continue;
            }
            self.queue.push_back(SpawnEntry::Procedural(time_us));
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn peek(&self) -> Option<&SpawnEntry> {
        self.queue.front()
    }

    pub fn last_time_us(&self) -> Option<i64> {
        self.queue.back().map(SpawnEntry::time_us)
    }

    /// Entries discarded because their time had already passed.
    pub fn stale_dropped(&self) -> u64 {
        self.stale_dropped
    }

    /// Spawn every entry whose time is within the window. Returns the number
    /// of notes created.
    pub fn spawn_due<R: Rng + ?Sized>(
        &mut self,
        ctx: &mut SpawnContext<'_, R>,
        notes: &mut NoteField,
    ) -> usize {
        if !self.enabled {
            return 0;
        }

        let mut spawned = 0;
        while let Some(head) = self.queue.front() {
            let lead_us = head.time_us() - ctx.now_us;
            if lead_us > self.window_us {
                break;
            }
            let Some(entry) = self.queue.pop_front() else {
                break;
            };
            if lead_us < 0 {
                self.stale_dropped += 1;
                warn!(
                    "Dropping stale spawn at {}us ({}us late)",
                    entry.time_us(),
                    -lead_us
                );
                continue;
            }

            let lanes = match entry {
                SpawnEntry::Fixed(event) => event.lanes,
                SpawnEntry::Procedural(_) => ctx.pool.draw(&mut *ctx.rng),
            };
            spawned += spawn_lanes(lanes, ctx, notes);
        }
        spawned
    }
}

fn spawn_lanes<R: Rng + ?Sized>(
    lanes: LaneSet,
    ctx: &SpawnContext<'_, R>,
    notes: &mut NoteField,
) -> usize {
    let mut spawned = 0;
    for lane in lanes.iter() {
        let Some((width, height)) = ctx.sprites.sprite_size(lane) else {
            warn!("No sprite for lane '{lane}', skipping spawn");
            continue;
        };
        let mut rect = Rect::new(ctx.field.lane_x(lane), 0.0, width, height);
        match ctx.direction {
            TravelDirection::Forward => rect.set_top(-ctx.field.offscreen_margin),
            TravelDirection::Reversed => {
                rect.set_bottom(ctx.field.height + ctx.field.offscreen_margin)
            }
        }
        let id = notes.spawn(lane, ctx.now_us, rect);
        debug!("Spawned note {id} in lane {lane} at {}us", ctx.now_us);
        spawned += 1;
    }
    spawned
}

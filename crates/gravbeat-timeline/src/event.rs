use gravbeat_types::LaneSet;
use serde::{Deserialize, Serialize};

/// One row of a song's timing track: the lanes to hit at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Time in microseconds from session start.
    pub time_us: i64,
    pub lanes: LaneSet,
}

impl TimelineEvent {
    pub fn new(time_us: i64, lanes: LaneSet) -> Self {
        Self { time_us, lanes }
    }
}

/// Time-ordered events for a whole song.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    /// Sorted by time_us; events sharing a timestamp keep insertion order.
    events: Vec<TimelineEvent>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_events(mut events: Vec<TimelineEvent>) -> Self {
        events.sort_by_key(|e| e.time_us);
        Self { events }
    }

    /// Add an event. Maintains sorted order by time_us.
    pub fn push(&mut self, event: TimelineEvent) {
        let pos = self.events.partition_point(|e| e.time_us <= event.time_us);
        self.events.insert(pos, event);
    }

    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    pub(crate) fn events_mut(&mut self) -> &mut [TimelineEvent] {
        &mut self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Total notes across all events.
    pub fn note_count(&self) -> usize {
        self.events.iter().map(|e| e.lanes.len()).sum()
    }

    pub fn last_time_us(&self) -> Option<i64> {
        self.events.last().map(|e| e.time_us)
    }

    pub fn into_events(self) -> Vec<TimelineEvent> {
        self.events
    }
}

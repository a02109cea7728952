use gravbeat_types::LaneSet;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::event::Timeline;

/// Permute lane sets across every event of a fixed track.
///
/// Timestamps stay where they are, so rhythmic density is unchanged while
/// the lane layout no longer matches the memorised chart.
pub fn shuffle_lanes<R: Rng + ?Sized>(timeline: &mut Timeline, rng: &mut R) {
    let mut lanes: Vec<LaneSet> = timeline.events().iter().map(|e| e.lanes).collect();
    lanes.shuffle(rng);
    for (event, lanes) in timeline.events_mut().iter_mut().zip(lanes) {
        event.lanes = lanes;
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::event::TimelineEvent;

    #[test]
    fn empty_timeline_is_untouched() {
        let mut timeline = Timeline::new();
        shuffle_lanes(&mut timeline, &mut StdRng::seed_from_u64(1));
        assert!(timeline.is_empty());
    }

    #[test]
    fn shuffle_moves_lanes_not_times() {
        let events: Vec<TimelineEvent> = ["d", "f", "j", "k", "dk", "fj", "dfjk", "d"]
            .iter()
            .enumerate()
            .map(|(i, keys)| TimelineEvent::new(i as i64 * 500_000, LaneSet::from_keys(keys)))
            .collect();
        let mut timeline = Timeline::from_events(events.clone());
        shuffle_lanes(&mut timeline, &mut StdRng::seed_from_u64(11));

        let times: Vec<i64> = timeline.events().iter().map(|e| e.time_us).collect();
        let original: Vec<i64> = events.iter().map(|e| e.time_us).collect();
        assert_eq!(times, original);
    }
}

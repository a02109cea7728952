use std::collections::VecDeque;

use anyhow::{Result, bail};
use gravbeat_audio::{CuePlayer, SoundCue};
use gravbeat_play::{PlayResult, PlaySession, SessionEvent};
use gravbeat_timeline::{Timeline, TimelineEvent};
use gravbeat_types::{ManualClock, SessionClock, secs_to_micros};
use log::{debug, info};

/// Stands in for an audio device: writes each cue to the log.
pub struct LogCuePlayer;

impl CuePlayer for LogCuePlayer {
    fn play(&mut self, cue: SoundCue) -> Result<()> {
        debug!("cue: {cue}");
        Ok(())
    }
}

pub enum InputSource {
    /// Press every lane whose note would judge Perfect right now.
    Autoplay,
    /// Replay recorded presses at their timestamps.
    Scripted(Timeline),
}

/// Drive `session` tick by tick until it finishes or `max_seconds` of play
/// time pass, then return the frozen result.
pub fn run_headless(
    session: &mut PlaySession<ManualClock>,
    input: InputSource,
    max_seconds: f64,
) -> Result<PlayResult> {
    let tick_us = session.game_config().timing.tick_us();
    let limit_us = secs_to_micros(max_seconds.max(0.0));
    let perfect_px = session.game_config().judge.perfect_px;
    let (autoplay, mut script): (bool, VecDeque<TimelineEvent>) = match input {
        InputSource::Scripted(timeline) => (false, timeline.into_events().into()),
        InputSource::Autoplay => (true, VecDeque::new()),
    };

    while !session.is_finished() {
        session.tick();
        let now = session.clock().elapsed_us();

        if autoplay {
            for lane in session.lanes_within(perfect_px).iter() {
                session.press(lane);
            }
        } else {
            while script.front().is_some_and(|event| event.time_us <= now) {
                if let Some(event) = script.pop_front() {
                    for lane in event.lanes.iter() {
                        session.press(lane);
                    }
                }
            }
        }

        for event in session.drain_events() {
            log_event(event, now);
        }

        if now >= limit_us {
            session.quit();
        } else {
            session.clock_mut().advance(tick_us);
        }
    }

    for event in session.drain_events() {
        log_event(event, session.clock().elapsed_us());
    }
    match session.result() {
        Some(result) => Ok(result.clone()),
        None => bail!("session ended without a result"),
    }
}

fn log_event(event: SessionEvent, now_us: i64) {
    match event {
        SessionEvent::Finished(reason) => info!("[{now_us}us] finished: {reason:?}"),
        other => debug!("[{now_us}us] {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use gravbeat_audio::NullCueSink;
    use gravbeat_config::{GameConfig, SessionConfig};
    use gravbeat_play::{FinishReason, Track};
    use gravbeat_types::{Difficulty, LaneSet, PlayMode};

    use super::*;

    fn session(track: Track, mode: PlayMode) -> PlaySession<ManualClock> {
        let config = SessionConfig::new("test", Difficulty::Easy, mode).with_seed(11);
        PlaySession::new(
            GameConfig::default(),
            config,
            track,
            ManualClock::new(),
            Box::new(NullCueSink),
        )
        .unwrap()
    }

    fn track(entries: &[(i64, &str)]) -> Track {
        Track::Fixed(Timeline::from_events(
            entries
                .iter()
                .map(|&(t, keys)| TimelineEvent::new(t, LaneSet::from_keys(keys)))
                .collect(),
        ))
    }

    #[test]
    fn autoplay_clears_fixed_track() {
        let mut s = session(track(&[(1_000_000, "d"), (2_000_000, "jk")]), PlayMode::Normal);
        let result = run_headless(&mut s, InputSource::Autoplay, 60.0).unwrap();
        assert_eq!(result.reason, FinishReason::TrackCleared);
        assert_eq!(result.perfect_count, 3);
        assert_eq!(result.miss_count, 0);
    }

    #[test]
    fn endless_stops_at_time_limit() {
        let mut s = session(Track::Procedural, PlayMode::Endless);
        let result = run_headless(&mut s, InputSource::Autoplay, 3.0).unwrap();
        assert_eq!(result.reason, FinishReason::Quit);
        assert!(result.final_time_us >= 3_000_000);
        assert!(result.final_time_us < 3_000_000 + 20_000);
    }

    #[test]
    fn scripted_presses_are_replayed() {
        let mut s = session(track(&[(60_000_000, "d")]), PlayMode::Normal);
        let script = Timeline::from_events(vec![
            TimelineEvent::new(500_000, LaneSet::from_keys("d")),
            TimelineEvent::new(900_000, LaneSet::from_keys("fk")),
        ]);
        let result = run_headless(&mut s, InputSource::Scripted(script), 2.0).unwrap();
        assert_eq!(result.reason, FinishReason::Quit);
        // Nothing to hit yet, so every press is an empty-lane miss.
        assert_eq!(result.miss_count, 3);
    }
}

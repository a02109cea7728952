use anyhow::Result;
use gravbeat_audio::CueSink;
use gravbeat_config::{GameConfig, SessionConfig};
use gravbeat_timeline::{PatternPools, ProceduralClock, shuffle_lanes};
use gravbeat_types::{Difficulty, Lane, LaneSet, PlayMode, SessionClock, TravelDirection};
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::feedback::{FeedbackState, Rgb};
use crate::gravity::{ModeController, ModeEvent};
use crate::hit_zone::HitZones;
use crate::judge::{JudgeConfig, JudgeSystem, Judgment};
use crate::note::NoteField;
use crate::score::ScoreManager;
use crate::spawner::{SpawnContext, Spawner, SpriteCatalog, UniformSprites};
use crate::track::Track;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    MusicFinished,
    VideoFinished,
    /// Every note was spawned and resolved.
    TrackCleared,
    Quit,
}

/// Notifications for collaborators outside the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    StartMusic,
    StartVideo,
    CountdownStarted,
    DirectionFlipped(TravelDirection),
    Paused,
    Resumed,
    Finished(FinishReason),
}

/// Where every spawned note ended up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteStats {
    pub spawned: u64,
    /// Consumed by a non-Miss press.
    pub judged: u64,
    /// Passed the zone unjudged.
    pub missed: u64,
    /// Left the field without a judgment.
    pub exited: u64,
    /// Still active when the session finished.
    pub abandoned: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackSnapshot {
    pub label: String,
    pub color: Rgb,
    pub expires_at_us: i64,
}

/// What the presentation layer draws each frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub score: u64,
    pub combo: u32,
    pub miss_count: u32,
    pub feedback: Option<FeedbackSnapshot>,
    pub countdown_secs: Option<u32>,
    pub direction: TravelDirection,
    pub elapsed_us: i64,
}

/// Frozen summary of a finished session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayResult {
    pub song_id: String,
    pub difficulty: Difficulty,
    pub mode: PlayMode,
    pub reason: FinishReason,
    pub score: u64,
    pub max_combo: u32,
    pub miss_count: u32,
    pub perfect_count: u32,
    pub good_count: u32,
    pub late_count: u32,
    pub early_count: u32,
    pub accuracy: f64,
    pub final_time_us: i64,
    pub notes: NoteStats,
    pub stale_spawns: u64,
}

/// One play-through. The only owner of play state: everything that changes
/// during play is mutated through `tick`, `press` and the notify calls.
pub struct PlaySession<C: SessionClock> {
    game: GameConfig,
    session: SessionConfig,
    clock: C,
    rng: StdRng,
    notes: NoteField,
    zones: HitZones,
    spawner: Spawner,
    pools: PatternPools,
    procedural: Option<ProceduralClock>,
    judge: JudgeSystem,
    score: ScoreManager,
    mode: ModeController,
    feedback: FeedbackState,
    cues: Box<dyn CueSink>,
    sprites: Box<dyn SpriteCatalog>,
    events: Vec<SessionEvent>,
    music_started: bool,
    video_started: bool,
    stats: NoteStats,
    result: Option<PlayResult>,
}

impl<C: SessionClock> PlaySession<C> {
    pub fn new(
        mut game: GameConfig,
        session: SessionConfig,
        track: Track,
        clock: C,
        cues: Box<dyn CueSink>,
    ) -> Result<Self> {
        game.validate();
        let mut rng = match session.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let pools = PatternPools::builtin()?;

        let window_us = game.timing.spawn_window_us;
        let (spawner, procedural) = match track {
            Track::Fixed(mut timeline) => {
                if session.shuffles_track() {
                    shuffle_lanes(&mut timeline, &mut rng);
                }
                (Spawner::from_timeline(timeline, window_us), None)
            }
            Track::Procedural => {
                let mut generator =
                    ProceduralClock::new(game.pattern.min_gap_us, game.pattern.max_gap_us);
                let times = generator.extend(&mut rng, game.pattern.window_us);
                (Spawner::from_procedural(times, window_us), Some(generator))
            }
        };

        let mut mode = ModeController::new(game.gravity.clone(), session.gravity_enabled());
        mode.start(clock.elapsed_us(), &mut rng);

        info!(
            "Session '{}' ({}, {:?}): {} pending spawns, gravity {}",
            session.song_id,
            session.difficulty,
            session.mode,
            spawner.pending(),
            if mode.is_enabled() { "on" } else { "off" }
        );

        Ok(Self {
            zones: HitZones::new(&game.field, mode.direction()),
            judge: JudgeSystem::new(JudgeConfig::from_game_config(&game)),
            feedback: FeedbackState::new(game.timing.feedback_us),
            sprites: Box::new(UniformSprites::from_field(&game.field)),
            game,
            session,
            clock,
            rng,
            notes: NoteField::new(),
            spawner,
            pools,
            procedural,
            score: ScoreManager::new(),
            mode,
            cues,
            events: Vec::new(),
            music_started: false,
            video_started: false,
            stats: NoteStats::default(),
            result: None,
        })
    }

    pub fn with_sprites(mut self, sprites: Box<dyn SpriteCatalog>) -> Self {
        self.sprites = sprites;
        self
    }

    /// Advance one tick: gravity, then motion and pass misses, then spawns.
    /// Ignored while paused or after the session finished.
    pub fn tick(&mut self) {
        if self.result.is_some() || self.clock.is_paused() {
            return;
        }
        let now = self.clock.elapsed_us();

        self.update_media(now);

        if self.session.mode == PlayMode::Normal && self.notes.is_empty() && self.spawner.is_empty()
        {
            self.finish(FinishReason::TrackCleared, now);
            return;
        }

        match self.mode.tick(now, &mut self.rng) {
            Some(ModeEvent::CountdownStarted) => self.events.push(SessionEvent::CountdownStarted),
            Some(ModeEvent::Flipped(direction)) => {
                self.zones.reposition(direction);
                self.events.push(SessionEvent::DirectionFlipped(direction));
            }
            None => {}
        }

        let outcome = self.notes.step(
            self.mode.direction(),
            self.game.timing.note_speed,
            &self.zones,
            &self.game.field,
        );
        for note in outcome.missed {
            debug!("Note {} in lane {} passed its zone", note.id, note.lane);
            self.stats.missed += 1;
            self.apply_judgment(Judgment::Miss, now);
        }
        self.stats.exited += outcome.exited as u64;

        self.refill_procedural(now);

        let mut ctx = SpawnContext {
            now_us: now,
            direction: self.mode.direction(),
            field: &self.game.field,
            pool: self.pools.get(self.session.difficulty),
            sprites: self.sprites.as_ref(),
            rng: &mut self.rng,
        };
        self.stats.spawned += self.spawner.spawn_due(&mut ctx, &mut self.notes) as u64;
    }

    /// Judge a key press in `lane`. `None` when the press was ignored
    /// (paused, finished, or inside the lane's cooldown).
    pub fn press(&mut self, lane: Lane) -> Option<Judgment> {
        if self.result.is_some() || self.clock.is_paused() {
            return None;
        }
        let now = self.clock.elapsed_us();
        let zone = *self.zones.get(lane);
        let outcome =
            self.judge
                .judge_press(lane, now, &mut self.notes, &zone, self.mode.direction())?;
        if outcome.note.is_some() {
            self.stats.judged += 1;
        }
        self.apply_judgment(outcome.judgment, now);
        Some(outcome.judgment)
    }

    pub fn pause(&mut self) {
        if self.result.is_none() && !self.clock.is_paused() {
            self.clock.pause();
            self.events.push(SessionEvent::Paused);
        }
    }

    pub fn resume(&mut self) {
        if self.result.is_none() && self.clock.is_paused() {
            self.clock.resume();
            self.events.push(SessionEvent::Resumed);
        }
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    /// The music track ended. Finishes a normal-mode session.
    pub fn notify_music_finished(&mut self) {
        self.finish_normal(FinishReason::MusicFinished);
    }

    /// The background video ended. Finishes a normal-mode session.
    pub fn notify_video_finished(&mut self) {
        self.finish_normal(FinishReason::VideoFinished);
    }

    /// End the session in any mode.
    pub fn quit(&mut self) -> Option<&PlayResult> {
        if self.result.is_none() {
            let now = self.clock.elapsed_us();
            self.finish(FinishReason::Quit, now);
        }
        self.result.as_ref()
    }

    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn hud(&self) -> HudSnapshot {
        let now = self.clock.elapsed_us();
        HudSnapshot {
            score: self.score.score(),
            combo: self.score.combo(),
            miss_count: self.score.miss_count(),
            feedback: self.feedback.active(now).map(|f| FeedbackSnapshot {
                label: f.label().to_string(),
                color: f.color(),
                expires_at_us: f.expires_at_us,
            }),
            countdown_secs: self.mode.countdown_display_secs(now),
            direction: self.mode.direction(),
            elapsed_us: now,
        }
    }

    /// Lanes whose closest note would currently judge within `max_distance`
    /// px of its zone center. Used by autoplay.
    pub fn lanes_within(&self, max_distance: f32) -> LaneSet {
        let scale = self.judge.config().hitbox_scale;
        Lane::all()
            .iter()
            .copied()
            .filter(|&lane| {
                let zone = self.zones.get(lane);
                self.judge.select_candidate(&self.notes, zone).is_some_and(|note| {
                    let hitbox = note.hitbox(scale);
                    (hitbox.center_y() - zone.rect.center_y()).abs() <= max_distance
                        && !self
                            .judge
                            .classify(&hitbox, &zone.rect, self.mode.direction())
                            .is_miss()
                })
            })
            .collect()
    }

    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }

    pub fn result(&self) -> Option<&PlayResult> {
        self.result.as_ref()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn notes(&self) -> &NoteField {
        &self.notes
    }

    pub fn zones(&self) -> &HitZones {
        &self.zones
    }

    pub fn direction(&self) -> TravelDirection {
        self.mode.direction()
    }

    pub fn mode_controller(&self) -> &ModeController {
        &self.mode
    }

    pub fn score(&self) -> &ScoreManager {
        &self.score
    }

    pub fn stats(&self) -> NoteStats {
        self.stats
    }

    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    pub fn game_config(&self) -> &GameConfig {
        &self.game
    }

    pub fn session_config(&self) -> &SessionConfig {
        &self.session
    }

    fn update_media(&mut self, now: i64) {
        if !self.music_started && now >= self.game.timing.music_start_us {
            self.music_started = true;
            self.events.push(SessionEvent::StartMusic);
        }
        if !self.video_started && now >= self.game.timing.video_start_us {
            self.video_started = true;
            self.events.push(SessionEvent::StartVideo);
        }
    }

    fn refill_procedural(&mut self, now: i64) {
        if self.session.mode != PlayMode::Endless {
            return;
        }
        let Some(generator) = self.procedural.as_mut() else {
            return;
        };
        if generator.horizon_us() - now >= self.game.pattern.refill_threshold_us {
            return;
        }
        let times = generator.extend(&mut self.rng, self.game.pattern.window_us);
        info!(
            "Extended endless track by {} spawns (horizon {}us)",
            times.len(),
            generator.horizon_us()
        );
        self.spawner.extend_procedural(times);
    }

    fn apply_judgment(&mut self, judgment: Judgment, now: i64) {
        let config = self.judge.config();
        let base = config.base_score(judgment);
        let perfect = config.perfect_score;
        self.score.add_judgment(judgment, base, perfect);
        self.feedback.show(judgment, now);
        self.cues.fire(judgment.cue());
    }

    fn finish_normal(&mut self, reason: FinishReason) {
        if self.session.mode != PlayMode::Normal || self.result.is_some() {
            return;
        }
        let now = self.clock.elapsed_us();
        self.finish(reason, now);
    }

    fn finish(&mut self, reason: FinishReason, now: i64) {
        self.spawner.set_enabled(false);
        let abandoned = self.notes.clear() as u64;
        self.stats.abandoned += abandoned;

        let score = &self.score;
        let result = PlayResult {
            song_id: self.session.song_id.clone(),
            difficulty: self.session.difficulty,
            mode: self.session.mode,
            reason,
            score: score.score(),
            max_combo: score.max_combo(),
            miss_count: score.miss_count(),
            perfect_count: score.perfect_count(),
            good_count: score.good_count(),
            late_count: score.late_count(),
            early_count: score.early_count(),
            accuracy: score.accuracy(),
            final_time_us: now,
            notes: self.stats,
            stale_spawns: self.spawner.stale_dropped(),
        };
        info!(
            "Session finished ({reason:?}) at {}us: score {}, max combo {}, misses {}, {} notes abandoned",
            now, result.score, result.max_combo, result.miss_count, abandoned
        );
        self.events.push(SessionEvent::Finished(reason));
        self.result = Some(result);
    }
}

#[cfg(test)]
mod tests {
    use gravbeat_audio::RecordingCueSink;
    use gravbeat_timeline::{Timeline, TimelineEvent};
    use gravbeat_types::ManualClock;

    use super::*;

    fn fixed(entries: &[(i64, &str)]) -> Track {
        Track::Fixed(Timeline::from_events(
            entries
                .iter()
                .map(|&(t, keys)| TimelineEvent::new(t, LaneSet::from_keys(keys)))
                .collect(),
        ))
    }

    fn session(track: Track, difficulty: Difficulty) -> PlaySession<ManualClock> {
        let config = SessionConfig::new("test", difficulty, PlayMode::Normal).with_seed(1);
        PlaySession::new(
            GameConfig::default(),
            config,
            track,
            ManualClock::new(),
            Box::new(RecordingCueSink::new()),
        )
        .unwrap()
    }

    #[test]
    fn empty_track_finishes_on_first_tick() {
        let mut s = session(fixed(&[]), Difficulty::Easy);
        s.tick();
        assert!(s.is_finished());
        assert_eq!(s.result().unwrap().reason, FinishReason::TrackCleared);
        assert_eq!(s.drain_events(), vec![SessionEvent::Finished(FinishReason::TrackCleared)]);
    }

    #[test]
    fn media_events_fire_once_at_their_delays() {
        let mut s = session(fixed(&[(60_000_000, "d")]), Difficulty::Easy);
        s.clock_mut().set_time(4_399_999);
        s.tick();
        assert!(s.drain_events().is_empty());

        s.clock_mut().set_time(4_400_000);
        s.tick();
        assert_eq!(s.drain_events(), vec![SessionEvent::StartVideo]);

        s.clock_mut().set_time(5_000_000);
        s.tick();
        s.tick();
        assert_eq!(s.drain_events(), vec![SessionEvent::StartMusic]);
    }

    #[test]
    fn press_with_no_notes_is_a_miss() {
        let mut s = session(fixed(&[(60_000_000, "d")]), Difficulty::Easy);
        assert_eq!(s.press(Lane::Left), Some(Judgment::Miss));
        assert_eq!(s.score().miss_count(), 1);
        let hud = s.hud();
        assert_eq!(hud.feedback.unwrap().label, "Miss");
    }

    #[test]
    fn endless_ignores_media_end() {
        let config = SessionConfig::new("pattern", Difficulty::Easy, PlayMode::Endless).with_seed(3);
        let mut s = PlaySession::new(
            GameConfig::default(),
            config,
            Track::Procedural,
            ManualClock::new(),
            Box::new(RecordingCueSink::new()),
        )
        .unwrap();
        s.notify_music_finished();
        s.notify_video_finished();
        assert!(!s.is_finished());
        assert_eq!(s.quit().unwrap().reason, FinishReason::Quit);
    }
}

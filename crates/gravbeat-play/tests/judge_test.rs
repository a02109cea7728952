use gravbeat_config::FieldConfig;
use gravbeat_play::{HitZones, JudgeConfig, JudgeSystem, Judgment, NoteField};
use gravbeat_types::{Lane, Rect, TravelDirection};

/// Zone for `lane` in the forward layout: 750..900, center 825.
fn zones() -> HitZones {
    HitZones::new(&FieldConfig::default(), TravelDirection::Forward)
}

/// Spawn a note whose center sits `offset` px below the forward zone center.
fn note_at(notes: &mut NoteField, lane: Lane, offset: f32) {
    let field = FieldConfig::default();
    let top = 825.0 + offset - field.sprite_height / 2.0;
    notes.spawn(
        lane,
        0,
        Rect::new(field.lane_x(lane), top, field.sprite_width, field.sprite_height),
    );
}

fn judge_once(offset: f32) -> (Judgment, usize) {
    let mut judge = JudgeSystem::new(JudgeConfig::normal());
    let mut notes = NoteField::new();
    let zones = zones();
    note_at(&mut notes, Lane::Left, offset);
    let outcome = judge
        .judge_press(Lane::Left, 0, &mut notes, zones.get(Lane::Left), TravelDirection::Forward)
        .unwrap();
    (outcome.judgment, notes.len())
}

#[test]
fn test_perfect_boundary() {
    assert_eq!(judge_once(0.0).0, Judgment::Perfect);
    assert_eq!(judge_once(20.0).0, Judgment::Perfect);
    assert_eq!(judge_once(-20.0).0, Judgment::Perfect);
}

#[test]
fn test_good_boundary() {
    assert_eq!(judge_once(21.0).0, Judgment::Good);
    assert_eq!(judge_once(65.0).0, Judgment::Good);
    assert_eq!(judge_once(-65.0).0, Judgment::Good);
}

#[test]
fn test_late_early_boundary() {
    assert_eq!(judge_once(66.0).0, Judgment::Late);
    assert_eq!(judge_once(100.0).0, Judgment::Late);
    assert_eq!(judge_once(-100.0).0, Judgment::Early);
}

#[test]
fn test_outside_late_window_is_miss() {
    assert_eq!(judge_once(101.0).0, Judgment::Miss);
    assert_eq!(judge_once(-101.0).0, Judgment::Miss);
    // No vertical overlap at all.
    assert_eq!(judge_once(300.0).0, Judgment::Miss);
}

#[test]
fn test_hit_consumes_note_and_miss_does_not() {
    assert_eq!(judge_once(10.0), (Judgment::Perfect, 0));
    assert_eq!(judge_once(101.0), (Judgment::Miss, 1));
}

#[test]
fn test_candidate_is_closest_to_zone_center() {
    let mut judge = JudgeSystem::new(JudgeConfig::normal());
    let mut notes = NoteField::new();
    let zones = zones();
    note_at(&mut notes, Lane::Up, -90.0);
    note_at(&mut notes, Lane::Up, 15.0);
    note_at(&mut notes, Lane::Down, 0.0);

    let outcome = judge
        .judge_press(Lane::Up, 0, &mut notes, zones.get(Lane::Up), TravelDirection::Forward)
        .unwrap();
    assert_eq!(outcome.judgment, Judgment::Perfect);
    assert_eq!(notes.in_lane(Lane::Up).count(), 1);
    assert_eq!(notes.in_lane(Lane::Down).count(), 1);
}

#[test]
fn test_debounce_within_cooldown() {
    let mut judge = JudgeSystem::new(JudgeConfig::normal());
    let mut notes = NoteField::new();
    let zones = zones();
    note_at(&mut notes, Lane::Right, 0.0);
    note_at(&mut notes, Lane::Right, 5.0);
    let zone = zones.get(Lane::Right);

    let first = judge.judge_press(Lane::Right, 1_000_000, &mut notes, zone, TravelDirection::Forward);
    let second = judge.judge_press(Lane::Right, 1_049_999, &mut notes, zone, TravelDirection::Forward);
    assert!(first.is_some());
    assert!(second.is_none());
    assert_eq!(notes.len(), 1);
}

#[test]
fn test_debounce_after_cooldown() {
    let mut judge = JudgeSystem::new(JudgeConfig::normal());
    let mut notes = NoteField::new();
    let zones = zones();
    note_at(&mut notes, Lane::Right, 0.0);
    note_at(&mut notes, Lane::Right, 5.0);
    let zone = zones.get(Lane::Right);

    let first = judge.judge_press(Lane::Right, 1_000_000, &mut notes, zone, TravelDirection::Forward);
    let second = judge.judge_press(Lane::Right, 1_050_000, &mut notes, zone, TravelDirection::Forward);
    assert!(first.is_some());
    assert!(second.is_some());
    assert!(notes.is_empty());
}

#[test]
fn test_reversed_zone_judging() {
    let field = FieldConfig::default();
    let zones = HitZones::new(&field, TravelDirection::Reversed);
    let mut judge = JudgeSystem::new(JudgeConfig::normal());
    let mut notes = NoteField::new();
    // Reversed zone 0..150, center 75. Note center at 5 is short of it
    // moving down the screen, but past it while travelling up.
    notes.spawn(
        Lane::Left,
        0,
        Rect::new(270.0, 5.0 - 75.0, 250.0, 150.0),
    );
    let outcome = judge
        .judge_press(Lane::Left, 0, &mut notes, zones.get(Lane::Left), TravelDirection::Reversed)
        .unwrap();
    assert_eq!(outcome.judgment, Judgment::Late);
}

use gravbeat_config::FieldConfig;
use gravbeat_types::{Lane, Rect, TravelDirection, scaled_rect};

use crate::hit_zone::HitZones;

pub type NoteId = u64;

/// A moving target in one lane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub id: NoteId,
    pub lane: Lane,
    /// Session time the note was created, in microseconds.
    pub spawn_time_us: i64,
    /// Full sprite rect. The judged area is [`Note::hitbox`].
    pub rect: Rect,
}

impl Note {
    pub fn hitbox(&self, scale: f32) -> Rect {
        scaled_rect(&self.rect, scale)
    }

    /// True once the note has moved past its zone in the travel direction.
    pub fn has_passed(&self, zone: &Rect, direction: TravelDirection) -> bool {
        match direction {
            TravelDirection::Forward => self.rect.top() > zone.bottom(),
            TravelDirection::Reversed => self.rect.bottom() < zone.top(),
        }
    }

    /// True once the note is past the far field edge plus margin.
    pub fn has_exited(&self, field: &FieldConfig, direction: TravelDirection) -> bool {
        match direction {
            TravelDirection::Forward => self.rect.top() > field.height + field.offscreen_margin,
            TravelDirection::Reversed => self.rect.bottom() < -field.offscreen_margin,
        }
    }
}

/// Notes removed by one motion step.
#[derive(Debug, Default)]
pub struct StepOutcome {
    /// Passed their zone unjudged. Each one is reported as a Miss.
    pub missed: Vec<Note>,
    /// Left the field without a miss; removed silently.
    pub exited: usize,
}

/// The active-note collection. Sole owner of every live note.
#[derive(Debug, Default)]
pub struct NoteField {
    notes: Vec<Note>,
    next_id: NoteId,
}

impl NoteField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, lane: Lane, spawn_time_us: i64, rect: Rect) -> NoteId {
        let id = self.next_id;
        self.next_id += 1;
        self.notes.push(Note {
            id,
            lane,
            spawn_time_us,
            rect,
        });
        id
    }

    /// Remove a note by id. `None` if it is no longer active.
    pub fn remove(&mut self, id: NoteId) -> Option<Note> {
        let pos = self.notes.iter().position(|n| n.id == id)?;
        Some(self.notes.remove(pos))
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter()
    }

    pub fn in_lane(&self, lane: Lane) -> impl Iterator<Item = &Note> {
        self.notes.iter().filter(move |n| n.lane == lane)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Remove every note, returning how many there were.
    pub fn clear(&mut self) -> usize {
        let count = self.notes.len();
        self.notes.clear();
        count
    }

    /// Move every note one tick and cull the ones that passed their zone or
    /// left the field.
    pub fn step(
        &mut self,
        direction: TravelDirection,
        speed: f32,
        zones: &HitZones,
        field: &FieldConfig,
    ) -> StepOutcome {
        let dy = speed * direction.sign();
        let mut outcome = StepOutcome::default();
        self.notes.retain_mut(|note| {
            note.rect.translate_y(dy);
            if note.has_passed(&zones.get(note.lane).rect, direction) {
                outcome.missed.push(*note);
                false
            } else if note.has_exited(field, direction) {
                outcome.exited += 1;
                false
            } else {
                true
            }
        });
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> FieldConfig {
        FieldConfig::default()
    }

    fn rect_at_top(lane: Lane, top: f32) -> Rect {
        let f = field();
        Rect::new(f.lane_x(lane), top, f.sprite_width, f.sprite_height)
    }

    #[test]
    fn remove_is_idempotent() {
        let mut notes = NoteField::new();
        let id = notes.spawn(Lane::Left, 0, rect_at_top(Lane::Left, -100.0));
        assert!(notes.remove(id).is_some());
        assert!(notes.remove(id).is_none());
        assert!(notes.is_empty());
    }

    #[test]
    fn ids_are_unique() {
        let mut notes = NoteField::new();
        let a = notes.spawn(Lane::Left, 0, rect_at_top(Lane::Left, 0.0));
        let b = notes.spawn(Lane::Left, 0, rect_at_top(Lane::Left, 0.0));
        assert_ne!(a, b);
        assert_eq!(notes.in_lane(Lane::Left).count(), 2);
        assert_eq!(notes.in_lane(Lane::Down).count(), 0);
    }

    #[test]
    fn forward_step_moves_down_and_misses_after_zone() {
        let field = field();
        let zones = HitZones::new(&field, TravelDirection::Forward);
        let mut notes = NoteField::new();
        // Zone bottom is 900; one step of 10 puts the top at 901.
        notes.spawn(Lane::Up, 0, rect_at_top(Lane::Up, 891.0));
        notes.spawn(Lane::Down, 0, rect_at_top(Lane::Down, 100.0));

        let outcome = notes.step(TravelDirection::Forward, 10.0, &zones, &field);
        assert_eq!(outcome.missed.len(), 1);
        assert_eq!(outcome.missed[0].lane, Lane::Up);
        assert_eq!(outcome.exited, 0);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes.iter().next().unwrap().rect.top(), 110.0);
    }

    #[test]
    fn reversed_step_moves_up_and_misses_above_zone() {
        let field = field();
        let zones = HitZones::new(&field, TravelDirection::Reversed);
        let mut notes = NoteField::new();
        // Reversed zone top is 0; bottom goes 5 -> -5.
        notes.spawn(Lane::Left, 0, rect_at_top(Lane::Left, 5.0 - 150.0));

        let outcome = notes.step(TravelDirection::Reversed, 10.0, &zones, &field);
        assert_eq!(outcome.missed.len(), 1);
        assert!(notes.is_empty());
    }

    #[test]
    fn exit_check_uses_margin() {
        let field = field();
        let note = Note {
            id: 0,
            lane: Lane::Left,
            spawn_time_us: 0,
            rect: rect_at_top(Lane::Left, 1000.5),
        };
        assert!(note.has_exited(&field, TravelDirection::Forward));
        assert!(!note.has_exited(&field, TravelDirection::Reversed));
    }
}

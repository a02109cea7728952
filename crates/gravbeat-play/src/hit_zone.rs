use gravbeat_config::FieldConfig;
use gravbeat_types::{LANE_COUNT, Lane, Rect, TravelDirection};

/// Stationary target outline for one lane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitZone {
    pub lane: Lane,
    pub rect: Rect,
}

/// One hit zone per lane, anchored to the edge notes travel toward.
#[derive(Debug, Clone)]
pub struct HitZones {
    zones: [HitZone; LANE_COUNT],
    forward_y: f32,
    reversed_y: f32,
}

impl HitZones {
    pub fn new(field: &FieldConfig, direction: TravelDirection) -> Self {
        let zones = Lane::all().map(|lane| HitZone {
            lane,
            rect: Rect::new(
                field.lane_x(lane),
                0.0,
                field.sprite_width,
                field.sprite_height,
            ),
        });
        let mut zones = Self {
            zones,
            forward_y: field.forward_zone_y(),
            reversed_y: field.reversed_zone_y(),
        };
        zones.reposition(direction);
        zones
    }

    /// Move every zone to the anchor for `direction`.
    pub fn reposition(&mut self, direction: TravelDirection) {
        let y = match direction {
            TravelDirection::Forward => self.forward_y,
            TravelDirection::Reversed => self.reversed_y,
        };
        for zone in &mut self.zones {
            zone.rect.set_top(y);
        }
    }

    pub fn get(&self, lane: Lane) -> &HitZone {
        &self.zones[lane.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &HitZone> {
        self.zones.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zones_follow_direction() {
        let field = FieldConfig::default();
        let mut zones = HitZones::new(&field, TravelDirection::Forward);
        assert_eq!(zones.get(Lane::Left).rect.top(), 750.0);
        assert_eq!(zones.get(Lane::Left).rect.bottom(), 900.0);
        assert_eq!(zones.get(Lane::Right).rect.left(), 1080.0);

        zones.reposition(TravelDirection::Reversed);
        assert!(zones.iter().all(|z| z.rect.top() == 0.0 && z.rect.bottom() == 150.0));

        zones.reposition(TravelDirection::Forward);
        assert!(zones.iter().all(|z| z.rect.top() == 750.0));
    }
}

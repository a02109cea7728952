use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in field pixels. `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn set_top(&mut self, top: f32) {
        self.y = top;
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.y = bottom - self.height;
    }

    pub fn set_center_y(&mut self, center_y: f32) {
        self.y = center_y - self.height / 2.0;
    }

    pub fn translate_y(&mut self, dy: f32) {
        self.y += dy;
    }

    /// Edge-inclusive horizontal overlap.
    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        self.right() >= other.left() && self.left() <= other.right()
    }

    /// Signed vertical overlap; positive when the rectangles share rows.
    pub fn vertical_overlap(&self, other: &Rect) -> f32 {
        self.bottom().min(other.bottom()) - self.top().max(other.top())
    }

    /// Edge-inclusive vertical containment check used by the late window.
    pub fn within_vertical_bounds(&self, other: &Rect) -> bool {
        self.bottom() >= other.top() && self.top() <= other.bottom()
    }
}

/// Shrinks (or grows) `rect` by `scale` around its center.
pub fn scaled_rect(rect: &Rect, scale: f32) -> Rect {
    let width = rect.width * scale;
    let height = rect.height * scale;
    Rect::new(
        rect.center_x() - width / 2.0,
        rect.center_y() - height / 2.0,
        width,
        height,
    )
}

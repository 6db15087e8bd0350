use glam::Vec2;
use crate::api::traits::Target;
use crate::api::types::TargetId;
use crate::color::Rgba;

/// In-memory on-screen widget.
///
/// Setters stage values and count writes; `commit` copies the staged state
/// into `shown`, which is what the client would currently see.
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    /// Identifier within the owning entity.
    pub id: TargetId,
    /// Staged properties, written by the scheduler.
    pub state: WidgetState,
    /// Properties as of the last commit.
    pub shown: WidgetState,
    /// Number of setter calls since creation.
    pub writes: u32,
    /// Number of commits since creation.
    pub commits: u32,
}

/// The six animatable properties of a widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidgetState {
    pub position: Vec2,
    pub letter_size: Vec2,
    pub text_size: Vec2,
    pub color: Rgba,
    pub box_color: Rgba,
    pub background_color: Rgba,
}

impl Default for WidgetState {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            letter_size: Vec2::new(0.48, 1.12),
            text_size: Vec2::new(1280.0, 1280.0),
            color: Rgba::WHITE,
            box_color: Rgba::new(128, 128, 128, 128),
            background_color: Rgba::new(0, 0, 0, 255),
        }
    }
}

impl Widget {
    /// Create a widget with default properties at the origin.
    pub fn new(id: TargetId) -> Self {
        Self {
            id,
            state: WidgetState::default(),
            shown: WidgetState::default(),
            writes: 0,
            commits: 0,
        }
    }

    // -- Builder pattern --

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.state.position = position;
        self.shown.position = position;
        self
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.state.color = color;
        self.shown.color = color;
        self
    }
}

impl Target for Widget {
    fn set_position(&mut self, pos: Vec2) {
        self.state.position = pos;
        self.writes += 1;
    }

    fn set_letter_size(&mut self, size: Vec2) {
        self.state.letter_size = size;
        self.writes += 1;
    }

    fn set_text_size(&mut self, size: Vec2) {
        self.state.text_size = size;
        self.writes += 1;
    }

    fn set_color(&mut self, color: Rgba) {
        self.state.color = color;
        self.writes += 1;
    }

    fn set_box_color(&mut self, color: Rgba) {
        self.state.box_color = color;
        self.writes += 1;
    }

    fn set_background_color(&mut self, color: Rgba) {
        self.state.background_color = color;
        self.writes += 1;
    }

    fn commit(&mut self) {
        self.shown = self.state;
        self.commits += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_publishes_staged_state() {
        let mut w = Widget::new(TargetId(1));
        w.set_position(Vec2::new(5.0, 6.0));
        assert_eq!(w.shown.position, Vec2::ZERO);
        w.commit();
        assert_eq!(w.shown.position, Vec2::new(5.0, 6.0));
        assert_eq!((w.writes, w.commits), (1, 1));
    }

    #[test]
    fn builders_set_staged_and_shown_state() {
        let w = Widget::new(TargetId(2))
            .with_position(Vec2::new(-200.0, 100.0))
            .with_color(Rgba::TRANSPARENT);
        assert_eq!(w.state, w.shown);
        assert_eq!(w.shown.position, Vec2::new(-200.0, 100.0));
        assert_eq!(w.shown.color, Rgba::TRANSPARENT);
        assert_eq!((w.writes, w.commits), (0, 0));
    }
}

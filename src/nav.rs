use raylib::prelude::*;

use crate::input::FrameInput;
use crate::state::SectionName;
use crate::widgets::*;

const DOT_SPACING: f32 = 36.0;
const DOT_HIT: f32 = 24.0;

/// Dot navigation along the right edge. Hidden on the home section.
pub struct SideNav {
    hovered: Option<SectionName>,
}

impl SideNav {
    pub fn new() -> Self {
        Self { hovered: None }
    }

    pub fn is_shown(active: SectionName) -> bool {
        active != SectionName::Home
    }

    pub(crate) fn dot_rects(screen: Rectangle) -> impl Iterator<Item = (SectionName, Rectangle)> {
        let count = SectionName::ALL.len() as f32;
        let top = screen.y + (screen.height - (count - 1.0) * DOT_SPACING) * 0.5;
        let x = screen.x + screen.width - 40.0;
        SectionName::ALL.into_iter().enumerate().map(move |(i, name)| {
            let center = Vector2::new(x, top + i as f32 * DOT_SPACING);
            (name, Rectangle::new(center.x - DOT_HIT * 0.5, center.y - DOT_HIT * 0.5, DOT_HIT, DOT_HIT))
        })
    }

    /// Returns the section whose dot was clicked.
    pub fn update(&mut self, input: &FrameInput, active: SectionName) -> Option<SectionName> {
        if !Self::is_shown(active) {
            self.hovered = None;
            return None;
        }
        self.hovered = Self::dot_rects(input.screen).find(|(_, rec)| input.hovering(rec)).map(|(name, _)| name);
        self.hovered.filter(|_| input.clicked)
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle, screen: Rectangle, active: SectionName) {
        if !Self::is_shown(active) {
            return;
        }
        for (name, rec) in Self::dot_rects(screen) {
            let center = Vector2::new(rec.x + rec.width * 0.5, rec.y + rec.height * 0.5);
            if name == active {
                d.draw_circle_v(center, 7.0, TEAL);
            } else {
                d.draw_circle_v(center, 5.0, with_alpha(MUTED, 0.6));
            }
            if self.hovered == Some(name) {
                let label = name.label();
                let size = 16;
                let x = rec.x - text_width(label, size) - 16.0;
                let pill = Rectangle::new(x - 8.0, center.y - 13.0, text_width(label, size) + 16.0, 26.0);
                d.draw_rectangle_rounded(pill, 0.5, 8, PANEL);
                d.draw_text(label, x as i32, (center.y - size as f32 * 0.5) as i32, size, WHITE);
            }
        }
    }
}

/// Round "back to top" button, shown once the page is scrolled past half a
/// screen.
pub struct ScrollTopButton {
    hovered: bool,
}

impl ScrollTopButton {
    pub fn new() -> Self {
        Self { hovered: false }
    }

    pub fn is_shown(offset: f32, viewport_height: f32) -> bool {
        offset > viewport_height * 0.5
    }

    pub(crate) fn rect(screen: Rectangle) -> Rectangle {
        Rectangle::new(screen.x + screen.width - 72.0, screen.y + screen.height - 72.0, 48.0, 48.0)
    }

    /// True when clicked this frame.
    pub fn update(&mut self, input: &FrameInput, offset: f32) -> bool {
        if !Self::is_shown(offset, input.screen.height) {
            self.hovered = false;
            return false;
        }
        let rec = Self::rect(input.screen);
        self.hovered = input.hovering(&rec);
        input.clicked_in(&rec)
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle, screen: Rectangle, offset: f32) {
        if !Self::is_shown(offset, screen.height) {
            return;
        }
        let rec = Self::rect(screen);
        let hovered = self.hovered;
        let center = Vector2::new(rec.x + rec.width * 0.5, rec.y + rec.height * 0.5);
        d.draw_circle_v(center, rec.width * 0.5, if hovered { CYAN } else { TEAL });
        let s = rec.width * 0.16;
        d.draw_line_ex(Vector2::new(center.x - s * 1.5, center.y + s * 0.6), Vector2::new(center.x, center.y - s), 3.0, WHITE);
        d.draw_line_ex(Vector2::new(center.x, center.y - s), Vector2::new(center.x + s * 1.5, center.y + s * 0.6), 3.0, WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Rectangle {
        Rectangle::new(0.0, 0.0, 1280.0, 800.0)
    }

    fn click_at(rec: Rectangle) -> FrameInput {
        FrameInput {
            screen: screen(),
            mouse: Vector2::new(rec.x + rec.width * 0.5, rec.y + rec.height * 0.5),
            clicked: true,
            ..Default::default()
        }
    }

    #[test]
    fn side_nav_hidden_on_home() {
        let mut nav = SideNav::new();
        let (_, about) = SideNav::dot_rects(screen()).nth(1).unwrap();
        assert_eq!(nav.update(&click_at(about), SectionName::Home), None);
        assert_eq!(nav.update(&click_at(about), SectionName::Skills), Some(SectionName::About));
    }

    #[test]
    fn side_nav_hover_without_click_does_not_navigate() {
        let mut nav = SideNav::new();
        let (_, contact) = SideNav::dot_rects(screen()).last().unwrap();
        let input = FrameInput { clicked: false, ..click_at(contact) };
        assert_eq!(nav.update(&input, SectionName::About), None);
        assert_eq!(nav.hovered, Some(SectionName::Contact));
    }

    #[test]
    fn scroll_top_appears_past_half_a_screen() {
        assert!(!ScrollTopButton::is_shown(400.0, 800.0));
        assert!(ScrollTopButton::is_shown(401.0, 800.0));

        let mut button = ScrollTopButton::new();
        let input = click_at(ScrollTopButton::rect(screen()));
        assert!(!button.update(&input, 100.0));
        assert!(button.update(&input, 900.0));
    }
}

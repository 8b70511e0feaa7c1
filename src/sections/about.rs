use raylib::prelude::*;

use crate::constants::*;
use crate::content::Entry;
use crate::input::FrameInput;
use crate::rotation::RotationController;
use crate::section::{Action, Section};
use crate::state::SectionName;
use crate::widgets::*;

const TABS: [&str; 2] = ["Education", "Experience"];

pub struct AboutSection {
    summary: String,
    education: Vec<Entry>,
    experience: Vec<Entry>,
    rotation: RotationController,
    hovered_tab: Option<usize>,
}

impl AboutSection {
    pub fn new(summary: String, education: Vec<Entry>, experience: Vec<Entry>) -> Self {
        Self {
            summary,
            education,
            experience,
            rotation: RotationController::slideshow(TABS.len(), ABOUT_INTERVAL),
            hovered_tab: None,
        }
    }

    fn tab_rects(bounds: Rectangle) -> [Rectangle; 2] {
        let width = 180.0;
        let x = bounds.x + bounds.width * 0.5 + 20.0;
        let y = bounds.y + 150.0;
        [
            Rectangle::new(x, y, width, 44.0),
            Rectangle::new(x + width + 12.0, y, width, 44.0),
        ]
    }

    fn active_entries(&self) -> &[Entry] {
        match self.rotation.current_index() {
            0 => &self.education,
            _ => &self.experience,
        }
    }
}

impl Section for AboutSection {
    fn name(&self) -> SectionName {
        SectionName::About
    }

    fn set_visible(&mut self, visible: bool) {
        self.rotation.set_visible(visible);
    }

    fn update(&mut self, input: &FrameInput, bounds: Rectangle, dt: f32) -> Vec<Action> {
        self.rotation.update(dt);

        let tabs = Self::tab_rects(bounds);
        self.hovered_tab = tabs.iter().position(|rec| input.hovering(rec));
        if let Some(tab) = self.hovered_tab {
            if input.clicked && tab != self.rotation.current_index() {
                // Two panels, so stepping once lands on the clicked one
                self.rotation.next();
            }
        }
        Vec::new()
    }

    fn draw(&self, d: &mut RaylibDrawHandle, bounds: Rectangle, reveal: f32) {
        let lift = (1.0 - reveal) * 30.0;
        let margin = bounds.width * 0.08;
        let column = bounds.width * 0.5 - margin - 20.0;

        d.draw_text("About Me", (bounds.x + margin) as i32, (bounds.y + 80.0 + lift) as i32, 44, with_alpha(WHITE, reveal));
        d.draw_rectangle((bounds.x + margin) as i32, (bounds.y + 134.0 + lift) as i32, 80, 4, with_alpha(TEAL, reveal));
        draw_wrapped(d, &self.summary, bounds.x + margin, bounds.y + 160.0 + lift, column, 22, with_alpha(TEXT, reveal));

        let tabs = Self::tab_rects(bounds);
        for (i, (label, rec)) in TABS.iter().zip(tabs).enumerate() {
            let active = i == self.rotation.current_index();
            let hovered = self.hovered_tab == Some(i);
            draw_button(d, Rectangle::new(rec.x, rec.y + lift, rec.width, rec.height), label, hovered, active, reveal);
        }

        let mut y = tabs[0].y + 70.0 + lift;
        let x = tabs[0].x;
        let width = bounds.x + bounds.width - margin - x;
        for entry in self.active_entries() {
            d.draw_circle((x + 6.0) as i32, (y + 10.0) as i32, 6.0, with_alpha(TEAL, reveal));
            d.draw_text(&entry.title, (x + 24.0) as i32, y as i32, 20, with_alpha(WHITE, reveal));
            d.draw_text(&entry.period, (x + 24.0) as i32, (y + 26.0) as i32, 18, with_alpha(TEAL, reveal));
            d.draw_text(&entry.institution, (x + 24.0) as i32, (y + 50.0) as i32, 18, with_alpha(MUTED, reveal));
            y += 78.0;
            if let Some(description) = &entry.description {
                y += draw_wrapped(d, description, x + 24.0, y, width - 24.0, 16, with_alpha(TEXT, reveal));
            }
            y += 20.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Portfolio;

    fn about() -> AboutSection {
        let portfolio = Portfolio::embedded().unwrap();
        AboutSection::new(portfolio.profile.summary, portfolio.education, portfolio.experience)
    }

    fn bounds() -> Rectangle {
        Rectangle::new(0.0, 0.0, 1280.0, 800.0)
    }

    #[test]
    fn switches_panels_only_while_visible() {
        let mut about = about();
        about.update(&FrameInput::default(), bounds(), ABOUT_INTERVAL * 2.0);
        assert_eq!(about.active_entries().len(), about.education.len());

        about.set_visible(true);
        about.update(&FrameInput::default(), bounds(), ABOUT_INTERVAL);
        assert_eq!(about.active_entries().len(), about.experience.len());
        assert_eq!(about.rotation.current_index(), 1);
    }

    #[test]
    fn clicking_tab_selects_panel() {
        let mut about = about();
        let tab = AboutSection::tab_rects(bounds())[1];
        let click = FrameInput {
            mouse: Vector2::new(tab.x + 5.0, tab.y + 5.0),
            clicked: true,
            ..Default::default()
        };
        about.update(&click, bounds(), 0.016);
        assert_eq!(about.rotation.current_index(), 1);
        // Clicking the active tab again keeps it
        about.update(&click, bounds(), 0.016);
        assert_eq!(about.rotation.current_index(), 1);
    }
}

use raylib::prelude::*;

use crate::content::Profile;
use crate::input::FrameInput;
use crate::section::{Action, Section};
use crate::state::SectionName;
use crate::typewriter::Typewriter;
use crate::widgets::*;

pub struct HeroSection {
    profile: Profile,
    typewriter: Typewriter,
    visible: bool,
    cursor_timer: f32,
    hovered: Option<HeroControl>,
}

#[derive(Debug, PartialEq, Clone, Copy)]
enum HeroControl {
    Resume,
    Social(usize),
    ScrollHint,
}

struct HeroLayout {
    name_y: f32,
    role_y: f32,
    resume: Rectangle,
    socials: Vec<Rectangle>,
    scroll_hint: Rectangle,
}

impl HeroSection {
    pub fn new(profile: Profile) -> Self {
        let typewriter = Typewriter::new(profile.roles.clone());
        Self { profile, typewriter, visible: false, cursor_timer: 0.0, hovered: None }
    }

    fn layout(&self, bounds: Rectangle) -> HeroLayout {
        let center_x = bounds.x + bounds.width * 0.5;
        let name_y = bounds.y + bounds.height * 0.32;
        let role_y = name_y + 80.0;
        let resume = Rectangle::new(center_x - 120.0, role_y + 70.0, 240.0, 52.0);

        let social_width = 120.0;
        let gap = 16.0;
        let count = self.profile.socials.len() as f32;
        let row_width = count * social_width + (count - 1.0).max(0.0) * gap;
        let socials = (0..self.profile.socials.len())
            .map(|i| {
                Rectangle::new(
                    center_x - row_width * 0.5 + i as f32 * (social_width + gap),
                    resume.y + resume.height + 32.0,
                    social_width,
                    36.0,
                )
            })
            .collect();

        let scroll_hint = Rectangle::new(center_x - 20.0, bounds.y + bounds.height - 90.0, 40.0, 60.0);
        HeroLayout { name_y, role_y, resume, socials, scroll_hint }
    }

    fn control_at(&self, layout: &HeroLayout, input: &FrameInput) -> Option<HeroControl> {
        if self.profile.resume.is_some() && input.hovering(&layout.resume) {
            return Some(HeroControl::Resume);
        }
        if let Some(i) = layout.socials.iter().position(|rec| input.hovering(rec)) {
            return Some(HeroControl::Social(i));
        }
        if input.hovering(&layout.scroll_hint) {
            return Some(HeroControl::ScrollHint);
        }
        None
    }
}

impl Section for HeroSection {
    fn name(&self) -> SectionName {
        SectionName::Home
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn update(&mut self, input: &FrameInput, bounds: Rectangle, dt: f32) -> Vec<Action> {
        if self.visible {
            self.typewriter.update(dt);
        }
        self.cursor_timer = (self.cursor_timer + dt) % 1.0;

        let layout = self.layout(bounds);
        self.hovered = self.control_at(&layout, input);
        if !input.clicked {
            return Vec::new();
        }
        match self.hovered {
            Some(HeroControl::Resume) => self.profile.resume.iter().map(|r| Action::OpenUrl(r.clone())).collect(),
            Some(HeroControl::Social(i)) => vec![Action::OpenUrl(self.profile.socials[i].url.clone())],
            Some(HeroControl::ScrollHint) => vec![Action::ScrollTo(SectionName::About)],
            None => Vec::new(),
        }
    }

    fn draw(&self, d: &mut RaylibDrawHandle, bounds: Rectangle, reveal: f32) {
        let layout = self.layout(bounds);
        let center_x = bounds.x + bounds.width * 0.5;
        let lift = (1.0 - reveal) * 30.0;

        draw_centered(d, "Hi, I'm", center_x, layout.name_y - 44.0 + lift, 24, with_alpha(MUTED, reveal));
        draw_centered(d, &self.profile.name, center_x, layout.name_y + lift, 56, with_alpha(WHITE, reveal));

        let role = self.typewriter.text();
        let role_size = 30;
        draw_centered(d, role, center_x, layout.role_y + lift, role_size, with_alpha(TEAL, reveal));
        if self.cursor_timer < 0.5 {
            let cursor_x = center_x + text_width(role, role_size) * 0.5 + 4.0;
            d.draw_rectangle(cursor_x as i32, (layout.role_y + lift) as i32, 3, role_size, with_alpha(TEAL, reveal));
        }

        if self.profile.resume.is_some() {
            let hovered = self.hovered == Some(HeroControl::Resume);
            draw_button(d, layout.resume, "Download Resume", hovered, true, reveal);
        }

        for (i, (link, rec)) in self.profile.socials.iter().zip(&layout.socials).enumerate() {
            let color = if self.hovered == Some(HeroControl::Social(i)) { TEAL } else { MUTED };
            d.draw_rectangle_lines_ex(*rec, 1.0, with_alpha(color, reveal));
            draw_centered(d, &link.label, rec.x + rec.width * 0.5, rec.y + 9.0, 18, with_alpha(color, reveal));
        }

        // Mouse-shaped scroll indicator with a pulsing dot
        let hint = layout.scroll_hint;
        let pulse = 0.5 + 0.5 * (self.cursor_timer * std::f32::consts::TAU).sin();
        d.draw_rectangle_lines_ex(hint, 2.0, with_alpha(MUTED, reveal));
        d.draw_circle_v(
            Vector2::new(hint.x + hint.width * 0.5, hint.y + 14.0 + pulse * 10.0),
            4.0,
            with_alpha(TEAL, reveal * (0.5 + 0.5 * pulse)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Portfolio;

    fn hero() -> HeroSection {
        HeroSection::new(Portfolio::embedded().unwrap().profile)
    }

    fn bounds() -> Rectangle {
        Rectangle::new(0.0, 0.0, 1280.0, 800.0)
    }

    fn click(point: Vector2) -> FrameInput {
        FrameInput { mouse: point, clicked: true, ..Default::default() }
    }

    fn center(rec: Rectangle) -> Vector2 {
        Vector2::new(rec.x + rec.width * 0.5, rec.y + rec.height * 0.5)
    }

    #[test]
    fn typing_waits_for_visibility() {
        let mut hero = hero();
        hero.update(&FrameInput::default(), bounds(), 1.0);
        assert_eq!(hero.typewriter.text(), "");
        hero.set_visible(true);
        hero.update(&FrameInput::default(), bounds(), 0.1);
        assert_eq!(hero.typewriter.text(), "F");
    }

    #[test]
    fn scroll_hint_scrolls_to_about() {
        let mut hero = hero();
        let hint = hero.layout(bounds()).scroll_hint;
        let actions = hero.update(&click(center(hint)), bounds(), 0.016);
        assert_eq!(actions, vec![Action::ScrollTo(SectionName::About)]);
    }

    #[test]
    fn resume_button_opens_document() {
        let mut hero = hero();
        let resume = hero.layout(bounds()).resume;
        let actions = hero.update(&click(center(resume)), bounds(), 0.016);
        assert_eq!(actions, vec![Action::OpenUrl("resume.pdf".to_string())]);
    }

    #[test]
    fn hovering_alone_does_nothing() {
        let mut hero = hero();
        let social = hero.layout(bounds()).socials[0];
        let input = FrameInput { mouse: center(social), ..Default::default() };
        assert!(hero.update(&input, bounds(), 0.016).is_empty());
        assert_eq!(hero.hovered, Some(HeroControl::Social(0)));
    }
}

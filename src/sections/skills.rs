use raylib::prelude::*;

use crate::constants::*;
use crate::content::SoftSkill;
use crate::input::FrameInput;
use crate::rotation::RotationController;
use crate::section::{Action, Section};
use crate::state::SectionName;
use crate::widgets::*;

/// Fades the shown view out, swaps it for the rotation's current one, then
/// fades back in.
#[derive(Debug)]
struct CrossFade {
    shown: usize,
    timer: f32,
}

impl CrossFade {
    fn update(&mut self, target: usize, dt: f32) {
        if target != self.shown {
            self.timer += dt;
            if self.timer >= SKILLS_FADE {
                self.shown = target;
                self.timer = SKILLS_FADE;
            }
        } else if self.timer > 0.0 {
            self.timer = (self.timer - dt).max(0.0);
        }
    }

    fn alpha(&self) -> f32 {
        1.0 - self.timer / SKILLS_FADE
    }
}

pub struct SkillsSection {
    tech: Vec<String>,
    soft: Vec<SoftSkill>,
    rotation: RotationController,
    fade: CrossFade,
}

impl SkillsSection {
    pub fn new(tech: Vec<String>, soft: Vec<SoftSkill>) -> Self {
        Self {
            tech,
            soft,
            rotation: RotationController::slideshow(2, SKILLS_INTERVAL),
            fade: CrossFade { shown: 0, timer: 0.0 },
        }
    }

    fn draw_tech(&self, d: &mut RaylibDrawHandle, area: Rectangle, alpha: f32) {
        draw_centered(d, "Tech Stack", area.x + area.width * 0.5, area.y, 40, with_alpha(WHITE, alpha));
        let intro = "Modern technologies I use to build robust, scalable and good-looking applications.";
        draw_centered(d, intro, area.x + area.width * 0.5, area.y + 56.0, 20, with_alpha(MUTED, alpha));

        let columns = 3;
        let cell = Vector2::new(200.0, 110.0);
        let gap = 24.0;
        let grid_width = columns as f32 * cell.x + (columns - 1) as f32 * gap;
        let origin = Vector2::new(area.x + (area.width - grid_width) * 0.5, area.y + 120.0);
        for (i, skill) in self.tech.iter().enumerate() {
            let rec = Rectangle::new(
                origin.x + (i % columns) as f32 * (cell.x + gap),
                origin.y + (i / columns) as f32 * (cell.y + gap),
                cell.x,
                cell.y,
            );
            draw_panel(d, rec, alpha);
            let initial = skill.chars().next().map(String::from).unwrap_or_default();
            d.draw_circle_v(Vector2::new(rec.x + rec.width * 0.5, rec.y + 38.0), 22.0, with_alpha(TEAL, 0.3 * alpha));
            draw_centered(d, &initial, rec.x + rec.width * 0.5, rec.y + 26.0, 26, with_alpha(TEAL, alpha));
            draw_centered(d, skill, rec.x + rec.width * 0.5, rec.y + 74.0, 20, with_alpha(TEXT, alpha));
        }
    }

    fn draw_soft(&self, d: &mut RaylibDrawHandle, area: Rectangle, alpha: f32) {
        draw_centered(d, "Soft Skills", area.x + area.width * 0.5, area.y, 40, with_alpha(WHITE, alpha));
        let intro = "Skills beyond the code that keep projects moving.";
        draw_centered(d, intro, area.x + area.width * 0.5, area.y + 56.0, 20, with_alpha(MUTED, alpha));

        let columns = 2;
        let cell = Vector2::new(340.0, 100.0);
        let gap = 24.0;
        let grid_width = columns as f32 * cell.x + (columns - 1) as f32 * gap;
        let origin = Vector2::new(area.x + (area.width - grid_width) * 0.5, area.y + 120.0);
        for (i, skill) in self.soft.iter().enumerate() {
            let rec = Rectangle::new(
                origin.x + (i % columns) as f32 * (cell.x + gap),
                origin.y + (i / columns) as f32 * (cell.y + gap),
                cell.x,
                cell.y,
            );
            draw_panel(d, rec, alpha);
            d.draw_text(&skill.name, (rec.x + 20.0) as i32, (rec.y + 24.0) as i32, 22, with_alpha(WHITE, alpha));
            d.draw_text(&skill.description, (rec.x + 20.0) as i32, (rec.y + 58.0) as i32, 18, with_alpha(MUTED, alpha));
        }
    }
}

impl Section for SkillsSection {
    fn name(&self) -> SectionName {
        SectionName::Skills
    }

    fn set_visible(&mut self, visible: bool) {
        self.rotation.set_visible(visible);
    }

    fn update(&mut self, _input: &FrameInput, _bounds: Rectangle, dt: f32) -> Vec<Action> {
        // A switch picked up this frame starts fading on the next one
        self.fade.update(self.rotation.current_index(), dt);
        self.rotation.update(dt);
        Vec::new()
    }

    fn draw(&self, d: &mut RaylibDrawHandle, bounds: Rectangle, reveal: f32) {
        let lift = (1.0 - reveal) * 30.0;
        let area = Rectangle::new(bounds.x, bounds.y + bounds.height * 0.15 + lift, bounds.width, bounds.height * 0.7);
        let alpha = reveal * self.fade.alpha();
        match self.fade.shown {
            0 => self.draw_tech(d, area, alpha),
            _ => self.draw_soft(d, area, alpha),
        }

        // View indicator dots
        for i in 0..2 {
            let color = if i == self.fade.shown { TEAL } else { MUTED };
            let x = bounds.x + bounds.width * 0.5 + (i as f32 - 0.5) * 24.0;
            d.draw_circle_v(Vector2::new(x, bounds.y + bounds.height - 60.0), 5.0, with_alpha(color, reveal));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Portfolio;

    fn skills() -> SkillsSection {
        let portfolio = Portfolio::embedded().unwrap();
        SkillsSection::new(portfolio.tech_skills, portfolio.soft_skills)
    }

    fn tick(skills: &mut SkillsSection, dt: f32) {
        skills.update(&FrameInput::default(), Rectangle::new(0.0, 0.0, 1280.0, 800.0), dt);
    }

    #[test]
    fn fades_out_before_switching_view() {
        let mut skills = skills();
        skills.set_visible(true);
        tick(&mut skills, SKILLS_INTERVAL);
        assert_eq!(skills.rotation.current_index(), 1);
        assert_eq!(skills.fade.shown, 0);

        tick(&mut skills, SKILLS_FADE * 0.5);
        assert!(skills.fade.alpha() < 1.0);
        assert_eq!(skills.fade.shown, 0);

        tick(&mut skills, SKILLS_FADE);
        assert_eq!(skills.fade.shown, 1);
        tick(&mut skills, SKILLS_FADE);
        assert_eq!(skills.fade.alpha(), 1.0);
    }

    #[test]
    fn hidden_section_keeps_its_view() {
        let mut skills = skills();
        tick(&mut skills, SKILLS_INTERVAL * 3.0);
        assert_eq!(skills.fade.shown, 0);
        assert_eq!(skills.fade.alpha(), 1.0);
    }
}

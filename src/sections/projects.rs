use anyhow::Result;
use raylib::prelude::*;
use tracing::{debug, warn};

use crate::carousel::{BoundaryPolicy, CarouselNavigator, Selection};
use crate::constants::*;
use crate::content::Project;
use crate::input::FrameInput;
use crate::rotation::RotationController;
use crate::scroll::ScrollLock;
use crate::section::{Action, Section};
use crate::state::SectionName;
use crate::texture_loader::load_textures;
use crate::widgets::*;

const CTA_TITLE: &str = "Have a Project in Mind?";
const CTA_TEXT: &str = "Let's turn your idea into reality. I'm available for freelance work and collaborations.";

/// Hit targets of the section body.
struct DeckLayout {
    card: Rectangle,
    prev: Rectangle,
    next: Rectangle,
    cta_button: Rectangle,
    vision_button: Rectangle,
}

/// Hit targets of the detail modal.
struct ModalLayout {
    panel: Rectangle,
    close: Rectangle,
    prev: Rectangle,
    next: Rectangle,
    image: Rectangle,
    image_prev: Rectangle,
    image_next: Rectangle,
    contact_button: Rectangle,
}

pub struct ProjectsSection {
    projects: Vec<Project>,
    textures: Vec<Vec<Texture2D>>,
    // Projects plus the trailing call-to-action card
    slideshow: RotationController,
    previews: Vec<RotationController>,
    navigator: CarouselNavigator,
    lock: ScrollLock,
    visible: bool,
    card_hovered: bool,
    mouse: Vector2,
}

impl ProjectsSection {
    /// `policy` decides how the detail modal pages past the first and last
    /// project.
    pub fn new(projects: Vec<Project>, lock: ScrollLock, policy: BoundaryPolicy) -> Self {
        let counts = projects
            .iter()
            .map(|p| p.image_paths().map(|paths| paths.len()).unwrap_or(0))
            .collect();
        let mut section = Self {
            slideshow: RotationController::slideshow(projects.len() + 1, PROJECTS_INTERVAL),
            textures: projects.iter().map(|_| Vec::new()).collect(),
            previews: Vec::new(),
            navigator: CarouselNavigator::new(policy, Vec::new(), lock.clone()),
            projects,
            lock,
            visible: false,
            card_hovered: false,
            mouse: Vector2::new(-1.0, -1.0),
        };
        section.rebuild(counts);
        section
    }

    fn rebuild(&mut self, image_counts: Vec<usize>) {
        self.previews = image_counts
            .iter()
            .map(|&count| {
                let mut preview = RotationController::hover_preview(count, HOVER_PREVIEW_INTERVAL);
                preview.set_visible(self.visible);
                preview
            })
            .collect();
        self.navigator = CarouselNavigator::new(self.navigator.policy(), image_counts, self.lock.clone());
    }

    fn current_project(&self) -> Option<usize> {
        let current = self.slideshow.current_index();
        (current < self.projects.len()).then_some(current)
    }

    fn deck_layout(bounds: Rectangle) -> DeckLayout {
        let width = (bounds.width * 0.55).min(640.0);
        let card = Rectangle::new(bounds.x + (bounds.width - width) * 0.5, bounds.y + 200.0, width, 320.0);
        let arrow = 44.0;
        let arrow_y = card.y + (card.height - arrow) * 0.5;
        DeckLayout {
            card,
            prev: Rectangle::new(card.x - arrow - 16.0, arrow_y, arrow, arrow),
            next: Rectangle::new(card.x + card.width + 16.0, arrow_y, arrow, arrow),
            cta_button: Rectangle::new(card.x + (card.width - 160.0) * 0.5, card.y + 200.0, 160.0, 44.0),
            vision_button: Rectangle::new(bounds.x + (bounds.width - 320.0) * 0.5, card.y + card.height + 60.0, 320.0, 56.0),
        }
    }

    fn modal_layout(screen: Rectangle) -> ModalLayout {
        let width = (screen.width - 160.0).min(900.0).max(200.0);
        let height = (screen.height - 80.0).min(660.0).max(200.0);
        let panel = Rectangle::new(screen.x + (screen.width - width) * 0.5, screen.y + (screen.height - height) * 0.5, width, height);
        let image = Rectangle::new(panel.x, panel.y, panel.width, panel.height * 0.55);
        let arrow = 44.0;
        let small = 34.0;
        ModalLayout {
            panel,
            close: Rectangle::new(panel.x + panel.width - 44.0, panel.y + 10.0, 34.0, 34.0),
            prev: Rectangle::new(screen.x + 16.0, screen.y + (screen.height - arrow) * 0.5, arrow, arrow),
            next: Rectangle::new(screen.x + screen.width - arrow - 16.0, screen.y + (screen.height - arrow) * 0.5, arrow, arrow),
            image,
            image_prev: Rectangle::new(image.x + 10.0, image.y + (image.height - small) * 0.5, small, small),
            image_next: Rectangle::new(image.x + image.width - small - 10.0, image.y + (image.height - small) * 0.5, small, small),
            contact_button: Rectangle::new(panel.x + (panel.width - 200.0) * 0.5, panel.y + panel.height * 0.6, 200.0, 52.0),
        }
    }

    /// Which of the modal's prev/next arrows are shown. Clamped paging hides
    /// the arrow at either end.
    fn modal_arrows(&self) -> (bool, bool) {
        match self.navigator.policy() {
            BoundaryPolicy::WrapWithCallToAction => (true, true),
            BoundaryPolicy::Clamped => (!self.navigator.is_first(), !self.navigator.is_last()),
        }
    }

    fn update_modal(&mut self, input: &FrameInput) -> Vec<Action> {
        for &key in &input.keys {
            self.navigator.handle_key(key);
        }
        if !input.clicked || !self.navigator.is_open() {
            return Vec::new();
        }

        let layout = Self::modal_layout(input.screen);
        let (show_prev, show_next) = self.modal_arrows();
        if input.hovering(&layout.close) {
            self.navigator.close();
        } else if show_prev && input.hovering(&layout.prev) {
            self.navigator.prev();
        } else if show_next && input.hovering(&layout.next) {
            self.navigator.next();
        } else if !input.hovering(&layout.panel) {
            // Backdrop
            self.navigator.close();
        } else {
            match self.navigator.selection() {
                Some(Selection::Item(i)) if self.image_count(i) > 1 => {
                    if input.hovering(&layout.image_prev) {
                        self.navigator.prev_image();
                    } else if input.hovering(&layout.image_next) {
                        self.navigator.next_image();
                    }
                }
                Some(Selection::CallToAction) if input.hovering(&layout.contact_button) => {
                    self.navigator.close();
                    return vec![Action::ScrollTo(SectionName::Contact)];
                }
                _ => {}
            }
        }
        Vec::new()
    }

    fn image_count(&self, project: usize) -> usize {
        self.previews.get(project).map_or(0, |p| p.len())
    }

    fn draw_image(&self, d: &mut RaylibDrawHandle, project: usize, image: usize, dest: Rectangle, alpha: f32) {
        match self.textures.get(project).and_then(|t| t.get(image)) {
            Some(texture) => draw_texture_cover(d, texture, dest, alpha),
            None => {
                d.draw_rectangle_rec(dest, with_alpha(Color::new(15, 35, 40, 255), alpha));
                draw_centered(d, "No preview", dest.x + dest.width * 0.5, dest.y + dest.height * 0.5 - 10.0, 20, with_alpha(MUTED, alpha));
            }
        }
    }

    fn draw_card(&self, d: &mut RaylibDrawHandle, layout: &DeckLayout, alpha: f32) {
        let card = layout.card;
        draw_panel(d, card, alpha);
        match self.current_project() {
            Some(i) => {
                let project = &self.projects[i];
                let image = Rectangle::new(card.x, card.y, card.width, 190.0);
                self.draw_image(d, i, self.previews[i].current_index(), image, alpha);
                if self.card_hovered {
                    d.draw_rectangle_rec(image, with_alpha(Color::new(0, 0, 0, 255), 0.4 * alpha));
                    draw_centered(d, "View Details", image.x + image.width * 0.5, image.y + image.height * 0.5 - 10.0, 20, with_alpha(WHITE, alpha));
                }
                d.draw_text(&project.title, (card.x + 16.0) as i32, (card.y + 204.0) as i32, 20, with_alpha(WHITE, alpha));
                let lines = wrap_text(&project.description, card.width - 32.0, 16);
                for (n, line) in lines.iter().take(3).enumerate() {
                    d.draw_text(line, (card.x + 16.0) as i32, (card.y + 236.0 + n as f32 * line_height(16)) as i32, 16, with_alpha(MUTED, alpha));
                }
            }
            None => {
                let center_x = card.x + card.width * 0.5;
                draw_centered(d, CTA_TITLE, center_x, card.y + 70.0, 28, with_alpha(WHITE, alpha));
                let lines = wrap_text(CTA_TEXT, card.width - 80.0, 18);
                for (n, line) in lines.iter().enumerate() {
                    draw_centered(d, line, center_x, card.y + 120.0 + n as f32 * line_height(18), 18, with_alpha(TEXT, alpha));
                }
                let hovered = crate::input::contains(&layout.cta_button, self.mouse);
                draw_button(d, layout.cta_button, "Let's Talk", hovered, true, alpha);
            }
        }
    }
}

/// Scales `texture` to fill `dest`, cropping the overflowing side.
fn draw_texture_cover(d: &mut RaylibDrawHandle, texture: &Texture2D, dest: Rectangle, alpha: f32) {
    let tex_width = texture.width() as f32;
    let tex_height = texture.height() as f32;
    let scale = (dest.width / tex_width).max(dest.height / tex_height);
    let source_width = dest.width / scale;
    let source_height = dest.height / scale;
    let source = Rectangle::new(
        (tex_width - source_width) * 0.5,
        (tex_height - source_height) * 0.5,
        source_width,
        source_height,
    );
    d.draw_texture_pro(texture, source, dest, Vector2::new(0.0, 0.0), 0.0, with_alpha(WHITE, alpha));
}

impl Section for ProjectsSection {
    fn name(&self) -> SectionName {
        SectionName::Projects
    }

    fn initialize(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) -> Result<()> {
        let mut counts = Vec::with_capacity(self.projects.len());
        for (i, project) in self.projects.iter().enumerate() {
            let paths = project.image_paths().unwrap_or_else(|e| {
                warn!("No images for project '{}': {:#}", project.title, e);
                Vec::new()
            });
            self.textures[i] = load_textures(rl, thread, &paths);
            debug!(project = %project.title, images = self.textures[i].len(), "project images loaded");
            counts.push(self.textures[i].len());
        }
        self.rebuild(counts);
        Ok(())
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.slideshow.set_visible(visible);
        for preview in &mut self.previews {
            preview.set_visible(visible);
        }
    }

    fn update(&mut self, input: &FrameInput, bounds: Rectangle, dt: f32) -> Vec<Action> {
        self.mouse = input.mouse;
        if self.navigator.is_open() {
            self.card_hovered = false;
            self.slideshow.update(dt);
            return self.update_modal(input);
        }

        let layout = Self::deck_layout(bounds);
        let current = self.current_project();
        self.card_hovered = current.is_some() && input.hovering(&layout.card);
        self.slideshow.track_pointer(self.card_hovered);
        for (i, preview) in self.previews.iter_mut().enumerate() {
            preview.track_pointer(self.card_hovered && current == Some(i));
            preview.update(dt);
        }
        self.slideshow.update(dt);

        if !input.clicked {
            return Vec::new();
        }
        if input.hovering(&layout.prev) {
            self.slideshow.prev();
        } else if input.hovering(&layout.next) {
            self.slideshow.next();
        } else if input.hovering(&layout.vision_button) {
            return vec![Action::ScrollTo(SectionName::Contact)];
        } else if let Some(i) = current.filter(|_| self.card_hovered) {
            self.navigator.select(i);
        } else if current.is_none() && input.hovering(&layout.cta_button) {
            return vec![Action::ScrollTo(SectionName::Contact)];
        }
        Vec::new()
    }

    fn draw(&self, d: &mut RaylibDrawHandle, bounds: Rectangle, reveal: f32) {
        let lift = (1.0 - reveal) * 30.0;
        let center_x = bounds.x + bounds.width * 0.5;
        draw_centered(d, "My Work", center_x, bounds.y + 70.0 + lift, 44, with_alpha(WHITE, reveal));
        draw_centered(
            d,
            "Projects I've built, from desktop point-of-sale to web kiosks.",
            center_x,
            bounds.y + 130.0 + lift,
            20,
            with_alpha(MUTED, reveal),
        );

        let layout = Self::deck_layout(bounds);
        self.draw_card(d, &layout, reveal);
        draw_arrow(d, layout.prev, true, crate::input::contains(&layout.prev, self.mouse), reveal);
        draw_arrow(d, layout.next, false, crate::input::contains(&layout.next, self.mouse), reveal);

        // Position dots
        let count = self.slideshow.len();
        for i in 0..count {
            let color = if i == self.slideshow.current_index() { TEAL } else { MUTED };
            let x = center_x + (i as f32 - (count as f32 - 1.0) * 0.5) * 20.0;
            d.draw_circle_v(Vector2::new(x, layout.card.y + layout.card.height + 24.0), 4.0, with_alpha(color, reveal));
        }

        let hovered = crate::input::contains(&layout.vision_button, self.mouse);
        draw_button(d, layout.vision_button, "Bring Your Vision to Life", hovered, true, reveal);
    }

    fn draw_overlay(&self, d: &mut RaylibDrawHandle, screen: Rectangle) {
        let Some(selection) = self.navigator.selection() else {
            return;
        };
        let layout = Self::modal_layout(screen);
        d.draw_rectangle_rec(screen, Color::new(0, 0, 0, 204));
        draw_panel(d, layout.panel, 1.0);

        match selection {
            Selection::Item(i) => {
                let project = &self.projects[i];
                let image_index = self.navigator.image_index();
                self.draw_image(d, i, image_index, layout.image, 1.0);

                let images = self.image_count(i);
                if images > 1 {
                    draw_arrow(d, layout.image_prev, true, crate::input::contains(&layout.image_prev, self.mouse), 1.0);
                    draw_arrow(d, layout.image_next, false, crate::input::contains(&layout.image_next, self.mouse), 1.0);
                    for n in 0..images {
                        let color = if n == image_index { WHITE } else { with_alpha(WHITE, 0.5) };
                        let x = layout.image.x + layout.image.width * 0.5 + (n as f32 - (images as f32 - 1.0) * 0.5) * 14.0;
                        d.draw_circle_v(Vector2::new(x, layout.image.y + layout.image.height - 12.0), 4.0, color);
                    }
                }

                let x = layout.panel.x + 28.0;
                let mut y = layout.image.y + layout.image.height + 20.0;
                d.draw_text(&project.title, x as i32, y as i32, 28, WHITE);
                y += 44.0;

                let mut chip_x = x;
                for tech in &project.technologies {
                    let width = text_width(tech, 16) + 24.0;
                    let chip = Rectangle::new(chip_x, y, width, 28.0);
                    d.draw_rectangle_rounded(chip, 0.5, 8, with_alpha(TEAL, 0.2));
                    d.draw_text(tech, (chip_x + 12.0) as i32, (y + 6.0) as i32, 16, TEAL);
                    chip_x += width + 8.0;
                }
                y += 44.0;
                draw_wrapped(d, &project.full_description, x, y, layout.panel.width - 56.0, 18, TEXT);
            }
            Selection::CallToAction => {
                let center_x = layout.panel.x + layout.panel.width * 0.5;
                draw_centered(d, CTA_TITLE, center_x, layout.panel.y + layout.panel.height * 0.3, 34, WHITE);
                let text = "Let's turn your idea into reality. Reach out and let's build something great together!";
                let lines = wrap_text(text, layout.panel.width - 120.0, 20);
                for (n, line) in lines.iter().enumerate() {
                    draw_centered(d, line, center_x, layout.panel.y + layout.panel.height * 0.3 + 60.0 + n as f32 * line_height(20), 20, TEXT);
                }
                let hovered = crate::input::contains(&layout.contact_button, self.mouse);
                draw_button(d, layout.contact_button, "Contact Me", hovered, true, 1.0);
            }
        }

        let (show_prev, show_next) = self.modal_arrows();
        if show_prev {
            draw_arrow(d, layout.prev, true, crate::input::contains(&layout.prev, self.mouse), 1.0);
        }
        if show_next {
            draw_arrow(d, layout.next, false, crate::input::contains(&layout.next, self.mouse), 1.0);
        }
        let close_hovered = crate::input::contains(&layout.close, self.mouse);
        let center = Vector2::new(layout.close.x + 17.0, layout.close.y + 17.0);
        d.draw_circle_v(center, 17.0, with_alpha(DANGER, if close_hovered { 1.0 } else { 0.8 }));
        d.draw_line_ex(Vector2::new(center.x - 6.0, center.y - 6.0), Vector2::new(center.x + 6.0, center.y + 6.0), 2.5, WHITE);
        d.draw_line_ex(Vector2::new(center.x + 6.0, center.y - 6.0), Vector2::new(center.x - 6.0, center.y + 6.0), 2.5, WHITE);
    }

    fn captures_input(&self) -> bool {
        self.navigator.is_open()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Portfolio;
    use crate::input::Key;
    use std::path::PathBuf;

    fn bounds() -> Rectangle {
        Rectangle::new(0.0, 0.0, 1280.0, 800.0)
    }

    fn section() -> (ProjectsSection, ScrollLock) {
        let mut projects = Portfolio::embedded().unwrap().projects;
        projects[0].images = ["a.png", "b.png", "c.png"].iter().map(PathBuf::from).collect();
        let lock = ScrollLock::new();
        let mut section = ProjectsSection::new(projects, lock.clone(), BoundaryPolicy::WrapWithCallToAction);
        section.set_visible(true);
        (section, lock)
    }

    fn at(rec: Rectangle) -> FrameInput {
        FrameInput {
            screen: bounds(),
            mouse: Vector2::new(rec.x + rec.width * 0.5, rec.y + rec.height * 0.5),
            ..Default::default()
        }
    }

    fn click(rec: Rectangle) -> FrameInput {
        FrameInput { clicked: true, ..at(rec) }
    }

    fn idle() -> FrameInput {
        FrameInput { screen: bounds(), ..Default::default() }
    }

    #[test]
    fn slideshow_cycles_through_call_to_action() {
        let (mut section, _lock) = section();
        assert_eq!(section.slideshow.len(), 3);
        section.update(&idle(), bounds(), PROJECTS_INTERVAL * 2.0);
        assert_eq!(section.current_project(), None);
        section.update(&idle(), bounds(), PROJECTS_INTERVAL);
        assert_eq!(section.current_project(), Some(0));
    }

    #[test]
    fn hovering_card_pauses_and_previews_images() {
        let (mut section, _lock) = section();
        let card = ProjectsSection::deck_layout(bounds()).card;
        section.update(&at(card), bounds(), 0.0);
        assert!(section.slideshow.is_paused());

        section.update(&at(card), bounds(), HOVER_PREVIEW_INTERVAL * 2.0);
        assert_eq!(section.current_project(), Some(0));
        assert_eq!(section.previews[0].current_index(), 2);

        section.update(&idle(), bounds(), 0.0);
        assert!(!section.slideshow.is_paused());
        assert_eq!(section.previews[0].current_index(), 0);
    }

    #[test]
    fn arrows_page_the_deck() {
        let (mut section, _lock) = section();
        let layout = ProjectsSection::deck_layout(bounds());
        section.update(&click(layout.prev), bounds(), 0.0);
        assert_eq!(section.current_project(), None);
        section.update(&click(layout.next), bounds(), 0.0);
        assert_eq!(section.current_project(), Some(0));
    }

    #[test]
    fn clicking_card_opens_modal_and_locks_scroll() {
        let (mut section, lock) = section();
        let card = ProjectsSection::deck_layout(bounds()).card;
        section.update(&click(card), bounds(), 0.0);
        assert!(section.captures_input());
        assert_eq!(section.navigator.selection(), Some(Selection::Item(0)));
        assert!(lock.is_locked());

        let modal = ProjectsSection::modal_layout(bounds());
        section.update(&click(modal.image_next), bounds(), 0.0);
        assert_eq!(section.navigator.image_index(), 1);

        let escape = FrameInput { keys: vec![Key::Escape], ..idle() };
        section.update(&escape, bounds(), 0.0);
        assert!(!section.captures_input());
        assert!(!lock.is_locked());
    }

    #[test]
    fn modal_wraps_to_call_to_action_and_contact() {
        let (mut section, lock) = section();
        let card = ProjectsSection::deck_layout(bounds()).card;
        section.update(&click(card), bounds(), 0.0);

        let right = FrameInput { keys: vec![Key::Right, Key::Right], ..idle() };
        section.update(&right, bounds(), 0.0);
        assert_eq!(section.navigator.selection(), Some(Selection::CallToAction));

        let modal = ProjectsSection::modal_layout(bounds());
        let actions = section.update(&click(modal.contact_button), bounds(), 0.0);
        assert_eq!(actions, vec![Action::ScrollTo(SectionName::Contact)]);
        assert!(!lock.is_locked());
    }

    #[test]
    fn backdrop_click_closes_modal() {
        let (mut section, lock) = section();
        let card = ProjectsSection::deck_layout(bounds()).card;
        section.update(&click(card), bounds(), 0.0);
        section.update(&click(Rectangle::new(2.0, 2.0, 4.0, 4.0)), bounds(), 0.0);
        assert!(!section.captures_input());
        assert!(!lock.is_locked());
    }

    #[test]
    fn vision_button_heads_to_contact() {
        let (mut section, _lock) = section();
        let layout = ProjectsSection::deck_layout(bounds());
        let actions = section.update(&click(layout.vision_button), bounds(), 0.0);
        assert_eq!(actions, vec![Action::ScrollTo(SectionName::Contact)]);
    }

    #[test]
    fn clamped_modal_hides_arrows_at_the_ends() {
        let projects = Portfolio::embedded().unwrap().projects;
        let mut section = ProjectsSection::new(projects, ScrollLock::new(), BoundaryPolicy::Clamped);
        section.set_visible(true);
        let card = ProjectsSection::deck_layout(bounds()).card;
        section.update(&click(card), bounds(), 0.0);
        assert_eq!(section.modal_arrows(), (false, true));

        // A click where the hidden arrow would be lands on the backdrop
        let modal = ProjectsSection::modal_layout(bounds());
        let right = FrameInput { keys: vec![Key::Right, Key::Right], ..idle() };
        section.update(&right, bounds(), 0.0);
        assert_eq!(section.navigator.selection(), Some(Selection::Item(1)));
        assert_eq!(section.modal_arrows(), (true, false));
        section.update(&click(modal.next), bounds(), 0.0);
        assert!(!section.captures_input());
    }

    #[test]
    fn wrapping_modal_always_shows_both_arrows() {
        let (mut section, _lock) = section();
        let card = ProjectsSection::deck_layout(bounds()).card;
        section.update(&click(card), bounds(), 0.0);
        assert_eq!(section.modal_arrows(), (true, true));
    }
}

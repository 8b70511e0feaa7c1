use std::sync::Arc;

use anyhow::Result;
use crossbeam_channel::Receiver;
use raylib::prelude::*;
use tracing::debug;

use crate::background::Background;
use crate::carousel::BoundaryPolicy;
use crate::constants::*;
use crate::contact::Relay;
use crate::content::Portfolio;
use crate::input::FrameInput;
use crate::nav::{ScrollTopButton, SideNav};
use crate::scroll::{ScrollLock, ScrollView};
use crate::section::{Action, Entrance, Section};
use crate::sections::*;
use crate::state::SectionName;
use crate::visibility::{intersection_ratio, VisibilityTracker};

/// A section placed on the page with its observers.
struct Mounted {
    section: Box<dyn Section>,
    // Starts the section's timers and entrance animation
    tracker: VisibilityTracker,
    events: Receiver<bool>,
    // Drives the side navigation highlight
    active: VisibilityTracker,
    entrance: Entrance,
}

impl Mounted {
    fn new(section: Box<dyn Section>) -> Self {
        let mut tracker = VisibilityTracker::new(SECTION_THRESHOLD);
        let events = tracker.subscribe();
        Self {
            section,
            tracker,
            events,
            active: VisibilityTracker::new(ACTIVE_SECTION_THRESHOLD),
            entrance: Entrance::new(),
        }
    }
}

/// The whole single-page portfolio: every section stacked one screen high
/// inside a scroll view, plus the navigation chrome drawn above it.
pub struct Page {
    sections: Vec<Mounted>,
    view: ScrollView,
    active: SectionName,
    side_nav: SideNav,
    scroll_top: ScrollTopButton,
    background: Background,
}

impl Page {
    pub fn new(
        content: Portfolio,
        relay: Option<Arc<dyn Relay>>,
        modal_paging: BoundaryPolicy,
        screen: Rectangle,
    ) -> Self {
        let lock = ScrollLock::new();
        let contact = ContactSection::new(&content.profile, relay);
        let sections: Vec<Box<dyn Section>> = vec![
            Box::new(HeroSection::new(content.profile.clone())),
            Box::new(AboutSection::new(content.profile.summary.clone(), content.education, content.experience)),
            Box::new(ProjectsSection::new(content.projects, lock.clone(), modal_paging)),
            Box::new(SkillsSection::new(content.tech_skills, content.soft_skills)),
            Box::new(contact),
        ];
        Self::mount(sections, lock, screen)
    }

    /// Stacks `sections` top to bottom in the given order.
    fn mount(sections: Vec<Box<dyn Section>>, lock: ScrollLock, screen: Rectangle) -> Self {
        let mut page = Self {
            sections: sections.into_iter().map(Mounted::new).collect(),
            view: ScrollView::new(screen, lock),
            active: SectionName::Home,
            side_nav: SideNav::new(),
            scroll_top: ScrollTopButton::new(),
            background: Background::new(),
        };
        page.resize(screen);
        page
    }

    pub fn initialize(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) -> Result<()> {
        for mounted in &mut self.sections {
            mounted.section.initialize(rl, thread)?;
        }
        Ok(())
    }

    pub fn active_section(&self) -> SectionName {
        self.active
    }

    fn section_height(&self) -> f32 {
        self.view.viewport().height
    }

    fn resize(&mut self, screen: Rectangle) {
        self.view.set_viewport(screen);
        self.view.set_content_height(screen.height * self.sections.len() as f32);
    }

    fn section_bounds(&self, index: usize) -> Rectangle {
        let height = self.section_height();
        self.view.to_screen(index as f32 * height, height)
    }

    fn scroll_to(&mut self, name: SectionName) {
        debug!(section = name.label(), "scrolling to section");
        self.view.scroll_to(name.position() as f32 * self.section_height());
    }

    /// Runs one frame of page logic. Returns the URLs to hand to the system.
    pub fn update(&mut self, input: &FrameInput, dt: f32) -> Vec<String> {
        let viewport = self.view.viewport();
        if input.screen.width > 0.0 && (input.screen.width, input.screen.height) != (viewport.width, viewport.height) {
            self.resize(input.screen);
        }
        self.background.update(input.screen, dt);

        let captured = self.sections.iter().any(|m| m.section.captures_input());
        if !captured {
            self.view.scroll_by(-input.wheel * WHEEL_STEP);
        }
        self.view.update(dt);
        self.observe();

        let mut actions = Vec::new();
        let idle = FrameInput { screen: input.screen, ..Default::default() };
        let chrome_input = if captured { &idle } else { input };
        if let Some(name) = self.side_nav.update(chrome_input, self.active) {
            actions.push(Action::ScrollTo(name));
        }
        if self.scroll_top.update(chrome_input, self.view.offset()) {
            actions.push(Action::ScrollTo(SectionName::Home));
        }
        // A click taken by the navigation chrome does not fall through
        let consumed = FrameInput { clicked: false, ..input.clone() };
        let section_input = if actions.is_empty() { input } else { &consumed };

        for i in 0..self.sections.len() {
            let bounds = self.section_bounds(i);
            let mounted = &mut self.sections[i];
            let own_input = if captured && !mounted.section.captures_input() { &idle } else { section_input };
            mounted.entrance.update(dt);
            actions.extend(mounted.section.update(own_input, bounds, dt));
        }

        let mut urls = Vec::new();
        for action in actions {
            match action {
                Action::ScrollTo(name) => self.scroll_to(name),
                Action::OpenUrl(url) => urls.push(url),
            }
        }
        urls
    }

    /// Feeds section geometry to the trackers and delivers their transitions.
    fn observe(&mut self) {
        let root = self.view.viewport();
        for i in 0..self.sections.len() {
            let bounds = self.section_bounds(i);
            let mounted = &mut self.sections[i];
            mounted.tracker.observe(bounds, root);
            while let Ok(visible) = mounted.events.try_recv() {
                debug!(section = mounted.section.name().label(), visible, "section visibility changed");
                mounted.section.set_visible(visible);
                if visible {
                    mounted.entrance.show();
                } else {
                    mounted.entrance.hide();
                }
            }
            if mounted.active.observe(bounds, root) == Some(true) {
                self.active = mounted.section.name();
                debug!(section = self.active.label(), "active section");
            }
        }
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle) {
        let screen = self.view.viewport();
        self.background.draw(d, screen);
        for (i, mounted) in self.sections.iter().enumerate() {
            let bounds = self.section_bounds(i);
            if intersection_ratio(&bounds, &screen) > 0.0 {
                mounted.section.draw(d, bounds, mounted.entrance.progress());
            }
        }
        self.side_nav.draw(d, screen, self.active);
        self.scroll_top.draw(d, screen, self.view.offset());
        for mounted in &self.sections {
            mounted.section.draw_overlay(d, screen);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotation::RotationController;
    use std::cell::Cell;
    use std::rc::Rc;

    /// A section that only runs a slideshow rotation and reports its index.
    struct RotatingSection {
        name: SectionName,
        rotation: RotationController,
        index: Rc<Cell<usize>>,
    }

    impl Section for RotatingSection {
        fn name(&self) -> SectionName {
            self.name
        }

        fn set_visible(&mut self, visible: bool) {
            self.rotation.set_visible(visible);
        }

        fn update(&mut self, _input: &FrameInput, _bounds: Rectangle, dt: f32) -> Vec<Action> {
            self.rotation.update(dt);
            self.index.set(self.rotation.current_index());
            Vec::new()
        }

        fn draw(&self, _d: &mut RaylibDrawHandle, _bounds: Rectangle, _reveal: f32) {}
    }

    /// Page of rotating sections; returns the index cell of each.
    fn rotating_page() -> (Page, Vec<Rc<Cell<usize>>>) {
        let cells: Vec<Rc<Cell<usize>>> = SectionName::ALL.iter().map(|_| Rc::new(Cell::new(0))).collect();
        let sections = SectionName::ALL
            .iter()
            .zip(&cells)
            .map(|(&name, cell)| {
                Box::new(RotatingSection {
                    name,
                    rotation: RotationController::slideshow(2, ABOUT_INTERVAL),
                    index: Rc::clone(cell),
                }) as Box<dyn Section>
            })
            .collect();
        (Page::mount(sections, ScrollLock::new(), screen()), cells)
    }

    fn screen() -> Rectangle {
        Rectangle::new(0.0, 0.0, 1280.0, 800.0)
    }

    fn page() -> Page {
        Page::new(Portfolio::embedded().unwrap(), None, BoundaryPolicy::WrapWithCallToAction, screen())
    }

    fn idle() -> FrameInput {
        FrameInput { screen: screen(), ..Default::default() }
    }

    fn wheel(notches: f32) -> FrameInput {
        FrameInput { wheel: notches, ..idle() }
    }

    fn visible(page: &Page) -> Vec<SectionName> {
        page.sections
            .iter()
            .filter(|m| m.tracker.is_visible())
            .map(|m| m.section.name())
            .collect()
    }

    #[test]
    fn home_is_active_and_visible_at_start() {
        let mut page = page();
        page.update(&idle(), 0.016);
        assert_eq!(page.active_section(), SectionName::Home);
        assert_eq!(visible(&page), vec![SectionName::Home]);
    }

    #[test]
    fn wheel_scroll_moves_active_section() {
        let mut page = page();
        page.update(&idle(), 0.016);
        // One full screen down
        page.update(&wheel(-800.0 / WHEEL_STEP), 0.016);
        assert_eq!(page.view.offset(), 800.0);
        assert_eq!(page.active_section(), SectionName::About);
        assert_eq!(visible(&page), vec![SectionName::About]);
    }

    #[test]
    fn partially_scrolled_page_shows_both_sections() {
        let mut page = page();
        page.update(&wheel(-400.0 / WHEEL_STEP), 0.016);
        assert_eq!(visible(&page), vec![SectionName::Home, SectionName::About]);
    }

    #[test]
    fn side_nav_scrolls_to_section() {
        let mut page = page();
        page.update(&wheel(-800.0 / WHEEL_STEP), 0.016);
        let (_, skills) = SideNav::dot_rects(screen()).nth(SectionName::Skills.position()).unwrap();
        let click = FrameInput {
            mouse: Vector2::new(skills.x + skills.width * 0.5, skills.y + skills.height * 0.5),
            clicked: true,
            ..idle()
        };
        page.update(&click, 0.016);
        assert!(page.view.is_animating());
        page.update(&idle(), SCROLL_DURATION);
        assert_eq!(page.view.offset(), 3.0 * 800.0);
        page.update(&idle(), 0.016);
        assert_eq!(page.active_section(), SectionName::Skills);
    }

    #[test]
    fn scroll_top_returns_home() {
        let mut page = page();
        page.update(&wheel(-2000.0 / WHEEL_STEP), 0.016);
        let button = ScrollTopButton::rect(screen());
        let click = FrameInput {
            mouse: Vector2::new(button.x + 10.0, button.y + 10.0),
            clicked: true,
            ..idle()
        };
        page.update(&click, 0.016);
        page.update(&idle(), SCROLL_DURATION);
        assert_eq!(page.view.offset(), 0.0);
    }

    #[test]
    fn locked_page_ignores_wheel() {
        let mut page = page();
        let guard = page.view.lock().acquire();
        page.update(&wheel(-5.0), 0.016);
        assert_eq!(page.view.offset(), 0.0);
        drop(guard);
        page.update(&wheel(-5.0), 0.016);
        assert_eq!(page.view.offset(), 5.0 * WHEEL_STEP);
    }

    #[test]
    fn resize_keeps_one_screen_per_section() {
        let mut page = page();
        let small = Rectangle::new(0.0, 0.0, 800.0, 600.0);
        page.update(&FrameInput { screen: small, ..Default::default() }, 0.016);
        assert_eq!(page.view.max_offset(), 4.0 * 600.0);
        assert_eq!(page.section_bounds(2).y, 1200.0);
    }

    #[test]
    fn rotation_follows_section_visibility() {
        let (mut page, cells) = rotating_page();
        let about = &cells[SectionName::About.position()];

        // Off screen: nothing ticks
        page.update(&idle(), ABOUT_INTERVAL * 2.0);
        assert_eq!(about.get(), 0);

        page.update(&wheel(-800.0 / WHEEL_STEP), 0.0);
        page.update(&idle(), ABOUT_INTERVAL);
        assert_eq!(about.get(), 1);

        // Half an interval in flight, then scrolled away
        page.update(&idle(), ABOUT_INTERVAL * 0.5);
        page.update(&wheel(-1600.0 / WHEEL_STEP), 0.0);
        page.update(&idle(), ABOUT_INTERVAL * 3.0);
        assert_eq!(about.get(), 1);

        // Back on screen the discarded half interval does not count
        page.update(&wheel(1600.0 / WHEEL_STEP), 0.0);
        page.update(&idle(), ABOUT_INTERVAL * 0.5);
        assert_eq!(about.get(), 1);
        page.update(&idle(), ABOUT_INTERVAL * 0.5);
        assert_eq!(about.get(), 0);
    }

    #[test]
    fn home_rotation_stops_once_scrolled_past() {
        let (mut page, cells) = rotating_page();
        let home = &cells[SectionName::Home.position()];
        page.update(&idle(), 0.0);
        page.update(&idle(), ABOUT_INTERVAL);
        assert_eq!(home.get(), 1);
        page.update(&wheel(-800.0 / WHEEL_STEP), 0.0);
        page.update(&idle(), ABOUT_INTERVAL * 4.0);
        assert_eq!(home.get(), 1);
    }
}

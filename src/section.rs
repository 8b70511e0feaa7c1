use anyhow::Result;
use raylib::prelude::*;

use crate::constants::*;
use crate::input::FrameInput;
use crate::state::SectionName;

/// Something a section asks the page to do.
#[derive(Debug, PartialEq, Clone)]
pub enum Action {
    ScrollTo(SectionName),
    OpenUrl(String),
}

pub trait Section {
    fn name(&self) -> SectionName;

    /// Loads GPU resources once the window exists.
    fn initialize(&mut self, _rl: &mut RaylibHandle, _thread: &RaylibThread) -> Result<()> {
        Ok(())
    }

    /// Entered or left the viewport (at the section visibility threshold).
    fn set_visible(&mut self, visible: bool);

    /// `bounds` is the section's current screen rectangle.
    fn update(&mut self, input: &FrameInput, bounds: Rectangle, dt: f32) -> Vec<Action>;

    /// `reveal` runs from 0 to 1 as the section animates in.
    fn draw(&self, d: &mut RaylibDrawHandle, bounds: Rectangle, reveal: f32);

    /// Drawn above everything else, e.g. a modal.
    fn draw_overlay(&self, _d: &mut RaylibDrawHandle, _screen: Rectangle) {}

    /// True while the section owns all input (a modal is open).
    fn captures_input(&self) -> bool {
        false
    }
}

/// Fade/slide-in progress, restarted every time a section becomes visible.
pub struct Entrance {
    tween: Option<ease::Tween>,
    elapsed: f32,
    progress: f32,
}

impl Entrance {
    pub fn new() -> Self {
        Self { tween: None, elapsed: 0.0, progress: 0.0 }
    }

    pub fn show(&mut self) {
        self.tween = Some(ease::Tween::new(ease::cubic_out, 0.0, 1.0, ENTRANCE_DURATION));
        self.elapsed = 0.0;
        self.progress = 0.0;
    }

    pub fn hide(&mut self) {
        self.tween = None;
        self.progress = 0.0;
    }

    pub fn update(&mut self, dt: f32) {
        let Some(tween) = self.tween.as_mut() else {
            return;
        };
        self.elapsed += dt;
        if self.elapsed >= ENTRANCE_DURATION {
            self.progress = 1.0;
            self.tween = None;
        } else {
            self.progress = tween.apply(dt).clamp(0.0, 1.0);
        }
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entrance_completes_and_resets() {
        let mut entrance = Entrance::new();
        entrance.update(1.0);
        assert_eq!(entrance.progress(), 0.0);
        entrance.show();
        entrance.update(ENTRANCE_DURATION * 0.5);
        assert!(entrance.progress() > 0.0 && entrance.progress() < 1.0);
        entrance.update(ENTRANCE_DURATION);
        assert_eq!(entrance.progress(), 1.0);
        entrance.hide();
        assert_eq!(entrance.progress(), 0.0);
    }
}

/// How pointer hover drives a rotation.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RotationVariant {
    /// Section-level autoplay: hovering pauses, leaving resumes from the
    /// current slide.
    Slideshow,
    /// Image cycling inside a single card: runs only while hovered, leaving
    /// halts and rewinds to the first image.
    HoverPreview,
}

/// Advances an index over `len` slides every `interval` seconds while the
/// owning region is visible and the rotation is not paused.
///
/// Time is fed through [`RotationController::update`]; partially elapsed
/// intervals are discarded whenever the timer stops, so a restart always
/// waits a full interval.
#[derive(Debug, Clone)]
pub struct RotationController {
    variant: RotationVariant,
    len: usize,
    interval: f32,
    index: usize,
    visible: bool,
    paused: bool,
    hovered: bool,
    // Elapsed time of the single running timer, if any
    timer: Option<f32>,
}

impl RotationController {
    pub fn new(variant: RotationVariant, len: usize, interval: f32) -> Self {
        Self {
            variant,
            len: len.max(1),
            interval: interval.max(f32::EPSILON),
            index: 0,
            visible: false,
            paused: false,
            hovered: false,
            timer: None,
        }
    }

    pub fn slideshow(len: usize, interval: f32) -> Self {
        Self::new(RotationVariant::Slideshow, len, interval)
    }

    pub fn hover_preview(len: usize, interval: f32) -> Self {
        Self::new(RotationVariant::HoverPreview, len, interval)
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.reconcile();
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        self.reconcile();
    }

    pub fn pointer_enter(&mut self) {
        if self.hovered {
            return;
        }
        self.hovered = true;
        match self.variant {
            RotationVariant::Slideshow => self.set_paused(true),
            RotationVariant::HoverPreview => self.reconcile(),
        }
    }

    pub fn pointer_leave(&mut self) {
        if !self.hovered {
            return;
        }
        self.hovered = false;
        match self.variant {
            RotationVariant::Slideshow => self.set_paused(false),
            RotationVariant::HoverPreview => {
                self.index = 0;
                self.reconcile();
            }
        }
    }

    /// Feeds `hovering` every frame; only edges reach the controller.
    pub fn track_pointer(&mut self, hovering: bool) {
        if hovering {
            self.pointer_enter();
        } else {
            self.pointer_leave();
        }
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1) % self.len;
        self.restart();
    }

    pub fn prev(&mut self) {
        self.index = (self.index + self.len - 1) % self.len;
        self.restart();
    }

    /// Advances time by `dt` seconds and returns how many ticks fired.
    pub fn update(&mut self, dt: f32) -> u32 {
        let Some(elapsed) = self.timer.as_mut() else {
            return 0;
        };
        *elapsed += dt;
        let mut ticks = 0;
        while *elapsed >= self.interval {
            *elapsed -= self.interval;
            self.index = (self.index + 1) % self.len;
            ticks += 1;
        }
        ticks
    }

    fn should_run(&self) -> bool {
        match self.variant {
            RotationVariant::Slideshow => self.visible && !self.paused,
            RotationVariant::HoverPreview => self.visible && self.hovered && !self.paused,
        }
    }

    fn reconcile(&mut self) {
        if !self.should_run() {
            self.timer = None;
        } else if self.timer.is_none() {
            self.timer = Some(0.0);
        }
    }

    fn restart(&mut self) {
        // Replaces any running timer so ticks never stack up
        self.timer = if self.should_run() { Some(0.0) } else { None };
    }
}

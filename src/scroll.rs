use std::cell::Cell;
use std::rc::Rc;

use raylib::prelude::*;

use crate::constants::*;

/// Shared "page may not scroll" flag. Every holder owns a [`ScrollGuard`];
/// the page is locked while at least one guard is alive.
#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    holders: Rc<Cell<usize>>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self) -> ScrollGuard {
        self.holders.set(self.holders.get() + 1);
        ScrollGuard { holders: Rc::clone(&self.holders) }
    }

    pub fn is_locked(&self) -> bool {
        self.holders.get() > 0
    }

    pub fn holders(&self) -> usize {
        self.holders.get()
    }
}

/// Releases its hold on the [`ScrollLock`] when dropped, exactly once.
#[derive(Debug)]
pub struct ScrollGuard {
    holders: Rc<Cell<usize>>,
}

impl Drop for ScrollGuard {
    fn drop(&mut self) {
        self.holders.set(self.holders.get().saturating_sub(1));
    }
}

struct ScrollAnimation {
    tween: ease::Tween,
    elapsed: f32,
    target: f32,
}

/// The internal scrolling container every section lives in. Its viewport is
/// the observation root for visibility tracking.
pub struct ScrollView {
    viewport: Rectangle,
    content_height: f32,
    offset: f32,
    lock: ScrollLock,
    animation: Option<ScrollAnimation>,
}

impl ScrollView {
    pub fn new(viewport: Rectangle, lock: ScrollLock) -> Self {
        Self {
            viewport,
            content_height: viewport.height,
            offset: 0.0,
            lock,
            animation: None,
        }
    }

    pub fn viewport(&self) -> Rectangle {
        self.viewport
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn lock(&self) -> &ScrollLock {
        &self.lock
    }

    pub fn set_viewport(&mut self, viewport: Rectangle) {
        self.viewport = viewport;
        self.offset = self.offset.clamp(0.0, self.max_offset());
    }

    pub fn set_content_height(&mut self, height: f32) {
        self.content_height = height;
        self.offset = self.offset.clamp(0.0, self.max_offset());
    }

    pub fn max_offset(&self) -> f32 {
        (self.content_height - self.viewport.height).max(0.0)
    }

    /// Wheel scrolling. Ignored while the page is locked.
    pub fn scroll_by(&mut self, delta: f32) {
        if self.lock.is_locked() || delta == 0.0 {
            return;
        }
        self.animation = None;
        self.offset = (self.offset + delta).clamp(0.0, self.max_offset());
    }

    /// Eased scroll towards `target` (content coordinates).
    pub fn scroll_to(&mut self, target: f32) {
        if self.lock.is_locked() {
            return;
        }
        let target = target.clamp(0.0, self.max_offset());
        self.animation = Some(ScrollAnimation {
            tween: ease::Tween::new(ease::cubic_in_out, self.offset, target, SCROLL_DURATION),
            elapsed: 0.0,
            target,
        });
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Advances an animated scroll. A lock taken mid-animation cancels it
    /// where it stands.
    pub fn update(&mut self, dt: f32) {
        if self.lock.is_locked() {
            self.animation = None;
            return;
        }
        let Some(animation) = self.animation.as_mut() else {
            return;
        };
        animation.elapsed += dt;
        if animation.elapsed >= SCROLL_DURATION {
            self.offset = animation.target;
            self.animation = None;
        } else {
            self.offset = animation.tween.apply(dt);
        }
    }

    /// Screen rectangle of a content band starting at `top`.
    pub fn to_screen(&self, top: f32, height: f32) -> Rectangle {
        Rectangle::new(
            self.viewport.x,
            self.viewport.y + top - self.offset,
            self.viewport.width,
            height,
        )
    }
}

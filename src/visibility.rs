use crossbeam_channel::{unbounded, Receiver, Sender};
use raylib::prelude::*;

/// Fraction of `target` covered by `root`, in [0, 1]. Zero-area targets are
/// never considered on screen.
pub fn intersection_ratio(target: &Rectangle, root: &Rectangle) -> f32 {
    let area = target.width * target.height;
    if area <= 0.0 {
        return 0.0;
    }
    let left = target.x.max(root.x);
    let top = target.y.max(root.y);
    let right = (target.x + target.width).min(root.x + root.width);
    let bottom = (target.y + target.height).min(root.y + root.height);
    if right <= left || bottom <= top {
        return 0.0;
    }
    ((right - left) * (bottom - top) / area).min(1.0)
}

/// Watches one region against an observation root (the scroll view viewport)
/// and reports enter/exit transitions to its subscribers.
pub struct VisibilityTracker {
    threshold: f32,
    visible: bool,
    subscribers: Vec<Sender<bool>>,
    disposed: bool,
}

impl VisibilityTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            visible: false,
            subscribers: Vec::new(),
            disposed: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Each subscriber receives every later transition, in order.
    pub fn subscribe(&mut self) -> Receiver<bool> {
        let (tx, rx) = unbounded();
        if !self.disposed {
            self.subscribers.push(tx);
        }
        rx
    }

    /// Feeds the current geometry. Returns the new state when it changed.
    pub fn observe(&mut self, target: Rectangle, root: Rectangle) -> Option<bool> {
        if self.disposed {
            return None;
        }
        let ratio = intersection_ratio(&target, &root);
        let visible = ratio > 0.0 && ratio >= self.threshold;
        if visible == self.visible {
            return None;
        }
        self.visible = visible;
        // Drop subscribers whose receiver is gone
        self.subscribers.retain(|tx| tx.send(visible).is_ok());
        Some(visible)
    }

    /// Detaches every subscriber; later observations are ignored.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.subscribers.clear();
    }
}

impl Drop for VisibilityTracker {
    fn drop(&mut self) {
        self.dispose();
    }
}

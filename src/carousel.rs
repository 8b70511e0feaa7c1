use tracing::debug;

use crate::input::Key;
use crate::scroll::{ScrollGuard, ScrollLock};

/// What `next`/`prev` do at the ends of the list.
#[derive(Debug, PartialEq, Eq, Clone, Copy, clap::ValueEnum)]
pub enum BoundaryPolicy {
    /// Stop at the ends; callers hide the arrow using `is_first`/`is_last`.
    Clamped,
    /// Wrap around, with one call-to-action slide appended after the last
    /// item (the cycle is `len + 1` long).
    #[value(name = "wrap")]
    WrapWithCallToAction,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Selection {
    Item(usize),
    CallToAction,
}

/// Selection/paging state of a modal over a fixed list of items.
///
/// While something is selected the navigator holds a [`ScrollGuard`], so the
/// page behind the modal cannot scroll. The guard goes away on `close` or
/// when the navigator itself is dropped.
#[derive(Debug)]
pub struct CarouselNavigator {
    policy: BoundaryPolicy,
    image_counts: Vec<usize>,
    selected: Option<usize>,
    image_index: usize,
    lock: ScrollLock,
    guard: Option<ScrollGuard>,
}

impl CarouselNavigator {
    /// `image_counts[i]` is the number of preview images of item `i`.
    pub fn new(policy: BoundaryPolicy, image_counts: Vec<usize>, lock: ScrollLock) -> Self {
        Self {
            policy,
            image_counts,
            selected: None,
            image_index: 0,
            lock,
            guard: None,
        }
    }

    pub fn len(&self) -> usize {
        self.image_counts.len()
    }

    pub fn policy(&self) -> BoundaryPolicy {
        self.policy
    }

    fn cycle_len(&self) -> usize {
        match self.policy {
            BoundaryPolicy::Clamped => self.len(),
            BoundaryPolicy::WrapWithCallToAction => self.len() + 1,
        }
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selected.map(|i| {
            if i < self.len() {
                Selection::Item(i)
            } else {
                Selection::CallToAction
            }
        })
    }

    pub fn is_first(&self) -> bool {
        self.selected == Some(0)
    }

    pub fn is_last(&self) -> bool {
        self.selected.is_some() && self.selected == self.cycle_len().checked_sub(1)
    }

    /// Opens item `index`. Out-of-range indices leave the state untouched.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.len() {
            return false;
        }
        self.move_to(index);
        true
    }

    pub fn next(&mut self) {
        let Some(current) = self.selected else {
            return;
        };
        let cycle = self.cycle_len();
        let target = match self.policy {
            BoundaryPolicy::Clamped if current + 1 >= cycle => return,
            BoundaryPolicy::Clamped => current + 1,
            BoundaryPolicy::WrapWithCallToAction => (current + 1) % cycle,
        };
        self.move_to(target);
    }

    pub fn prev(&mut self) {
        let Some(current) = self.selected else {
            return;
        };
        let cycle = self.cycle_len();
        let target = match self.policy {
            BoundaryPolicy::Clamped if current == 0 => return,
            BoundaryPolicy::Clamped => current - 1,
            BoundaryPolicy::WrapWithCallToAction => (current + cycle - 1) % cycle,
        };
        self.move_to(target);
    }

    pub fn close(&mut self) {
        if self.selected.take().is_some() {
            debug!("project modal closed");
        }
        self.image_index = 0;
        self.guard = None;
    }

    /// Left/Right/Escape while open. Returns true when the key was consumed.
    pub fn handle_key(&mut self, key: Key) -> bool {
        if !self.is_open() {
            return false;
        }
        match key {
            Key::Left => self.prev(),
            Key::Right => self.next(),
            Key::Escape => self.close(),
            _ => return false,
        }
        true
    }

    pub fn image_index(&self) -> usize {
        self.image_index
    }

    fn image_count(&self) -> usize {
        match self.selection() {
            Some(Selection::Item(i)) => self.image_counts[i],
            _ => 0,
        }
    }

    pub fn next_image(&mut self) {
        let count = self.image_count();
        if count > 0 {
            self.image_index = (self.image_index + 1) % count;
        }
    }

    pub fn prev_image(&mut self) {
        let count = self.image_count();
        if count > 0 {
            self.image_index = (self.image_index + count - 1) % count;
        }
    }

    fn move_to(&mut self, index: usize) {
        if self.selected != Some(index) {
            self.image_index = 0;
        }
        self.selected = Some(index);
        if self.guard.is_none() {
            self.guard = Some(self.lock.acquire());
        }
        debug!(index, "project modal showing");
    }
}

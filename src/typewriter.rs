use crate::constants::*;

#[derive(Debug, PartialEq, Clone, Copy)]
enum Phase {
    Typing,
    Holding,
    Deleting,
}

/// Types a role title one character at a time, holds it, deletes it, then
/// moves on to the next role.
pub struct Typewriter {
    roles: Vec<String>,
    role_index: usize,
    shown: usize,
    phase: Phase,
    timer: f32,
}

impl Typewriter {
    pub fn new(roles: Vec<String>) -> Self {
        Self {
            roles,
            role_index: 0,
            shown: 0,
            phase: Phase::Typing,
            timer: 0.0,
        }
    }

    /// The currently visible prefix of the role.
    pub fn text(&self) -> &str {
        let Some(role) = self.roles.get(self.role_index) else {
            return "";
        };
        match role.char_indices().nth(self.shown) {
            Some((end, _)) => &role[..end],
            None => role,
        }
    }

    fn role_len(&self) -> usize {
        self.roles.get(self.role_index).map_or(0, |r| r.chars().count())
    }

    pub fn update(&mut self, dt: f32) {
        if self.roles.is_empty() {
            return;
        }
        self.timer += dt;
        loop {
            let step = match self.phase {
                Phase::Typing => TYPE_INTERVAL,
                Phase::Holding => HOLD_BEFORE_DELETE,
                Phase::Deleting => DELETE_INTERVAL,
            };
            if self.timer < step {
                break;
            }
            self.timer -= step;
            match self.phase {
                Phase::Typing => {
                    self.shown += 1;
                    if self.shown >= self.role_len() {
                        self.shown = self.role_len();
                        self.phase = Phase::Holding;
                    }
                }
                Phase::Holding => self.phase = Phase::Deleting,
                Phase::Deleting => {
                    self.shown = self.shown.saturating_sub(1);
                    if self.shown == 0 {
                        self.phase = Phase::Typing;
                        self.role_index = (self.role_index + 1) % self.roles.len();
                    }
                }
            }
        }
    }
}

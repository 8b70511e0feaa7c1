use raylib::prelude::*;

/// Keys the portfolio reacts to.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Key {
    Left,
    Right,
    Escape,
    Tab,
    Enter,
    Backspace,
}

/// Input gathered once per frame so sections never touch the raylib handle
/// while updating.
#[derive(Debug, Clone)]
pub struct FrameInput {
    pub screen: Rectangle,
    pub mouse: Vector2,
    pub clicked: bool,
    pub wheel: f32,
    pub keys: Vec<Key>,
    pub chars: Vec<char>,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            screen: Rectangle::new(0.0, 0.0, 0.0, 0.0),
            mouse: Vector2::new(-1.0, -1.0),
            clicked: false,
            wheel: 0.0,
            keys: Vec::new(),
            chars: Vec::new(),
        }
    }
}

impl FrameInput {
    pub fn poll(rl: &mut RaylibHandle) -> Self {
        let mut keys = Vec::new();
        for (raylib_key, key) in [
            (KeyboardKey::KEY_LEFT, Key::Left),
            (KeyboardKey::KEY_RIGHT, Key::Right),
            (KeyboardKey::KEY_ESCAPE, Key::Escape),
            (KeyboardKey::KEY_TAB, Key::Tab),
            (KeyboardKey::KEY_ENTER, Key::Enter),
            (KeyboardKey::KEY_BACKSPACE, Key::Backspace),
        ] {
            if rl.is_key_pressed(raylib_key) {
                keys.push(key);
            }
        }
        let mut chars = Vec::new();
        while let Some(c) = rl.get_char_pressed() {
            chars.push(c);
        }

        Self {
            screen: Rectangle::new(0.0, 0.0, rl.get_screen_width() as f32, rl.get_screen_height() as f32),
            mouse: rl.get_mouse_position(),
            clicked: rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT),
            wheel: rl.get_mouse_wheel_move(),
            keys,
            chars,
        }
    }

    pub fn clicked_in(&self, rec: &Rectangle) -> bool {
        self.clicked && contains(rec, self.mouse)
    }

    pub fn hovering(&self, rec: &Rectangle) -> bool {
        contains(rec, self.mouse)
    }
}

pub fn contains(rec: &Rectangle, point: Vector2) -> bool {
    point.x >= rec.x && point.x < rec.x + rec.width && point.y >= rec.y && point.y < rec.y + rec.height
}

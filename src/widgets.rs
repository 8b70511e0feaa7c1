use raylib::prelude::*;

pub const BACKGROUND: Color = Color::new(8, 12, 20, 255);
pub const PANEL: Color = Color::new(17, 24, 39, 220);
pub const TEAL: Color = Color::new(20, 184, 166, 255);
pub const CYAN: Color = Color::new(6, 182, 212, 255);
pub const TEXT: Color = Color::new(209, 213, 219, 255);
pub const MUTED: Color = Color::new(156, 163, 175, 255);
pub const WHITE: Color = Color::new(255, 255, 255, 255);
pub const DANGER: Color = Color::new(239, 68, 68, 255);

// raylib's default font is roughly this wide per glyph, relative to its size
const GLYPH_WIDTH: f32 = 0.58;
const LINE_SPACING: f32 = 1.35;

pub fn with_alpha(color: Color, alpha: f32) -> Color {
    Color::new(color.r, color.g, color.b, (color.a as f32 * alpha.clamp(0.0, 1.0)) as u8)
}

pub fn text_width(text: &str, size: i32) -> f32 {
    text.chars().count() as f32 * size as f32 * GLYPH_WIDTH
}

pub fn line_height(size: i32) -> f32 {
    size as f32 * LINE_SPACING
}

/// Greedy word wrap to `max_width` pixels. Words longer than a line are
/// kept whole on their own line.
pub fn wrap_text(text: &str, max_width: f32, size: i32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if line.is_empty() { word.to_string() } else { format!("{} {}", line, word) };
            if text_width(&candidate, size) > max_width && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                line = word.to_string();
            } else {
                line = candidate;
            }
        }
        lines.push(line);
    }
    lines
}

/// Draws wrapped text and returns the height it used.
pub fn draw_wrapped(d: &mut RaylibDrawHandle, text: &str, x: f32, y: f32, width: f32, size: i32, color: Color) -> f32 {
    let lines = wrap_text(text, width, size);
    for (i, line) in lines.iter().enumerate() {
        d.draw_text(line, x as i32, (y + i as f32 * line_height(size)) as i32, size, color);
    }
    lines.len() as f32 * line_height(size)
}

pub fn draw_centered(d: &mut RaylibDrawHandle, text: &str, center_x: f32, y: f32, size: i32, color: Color) {
    let x = center_x - text_width(text, size) * 0.5;
    d.draw_text(text, x as i32, y as i32, size, color);
}

pub fn draw_button(d: &mut RaylibDrawHandle, rec: Rectangle, label: &str, hovered: bool, enabled: bool, alpha: f32) {
    let fill = match (enabled, hovered) {
        (false, _) => with_alpha(TEAL, 0.4 * alpha),
        (true, true) => with_alpha(CYAN, alpha),
        (true, false) => with_alpha(TEAL, alpha),
    };
    d.draw_rectangle_rounded(rec, 0.3, 8, fill);
    let size = 20;
    draw_centered(d, label, rec.x + rec.width * 0.5, rec.y + (rec.height - size as f32) * 0.5, size, with_alpha(WHITE, alpha));
}

/// Round arrow button; `left` picks the chevron direction.
pub fn draw_arrow(d: &mut RaylibDrawHandle, rec: Rectangle, left: bool, hovered: bool, alpha: f32) {
    let center = Vector2::new(rec.x + rec.width * 0.5, rec.y + rec.height * 0.5);
    let fill = if hovered { with_alpha(TEAL, 0.9 * alpha) } else { with_alpha(PANEL, alpha) };
    d.draw_circle_v(center, rec.width * 0.5, fill);
    let s = rec.width * 0.18;
    let (tip, back) = if left { (-s, s) } else { (s, -s) };
    let color = with_alpha(WHITE, alpha);
    d.draw_line_ex(Vector2::new(center.x + back, center.y - s * 1.5), Vector2::new(center.x + tip, center.y), 3.0, color);
    d.draw_line_ex(Vector2::new(center.x + tip, center.y), Vector2::new(center.x + back, center.y + s * 1.5), 3.0, color);
}

pub fn draw_panel(d: &mut RaylibDrawHandle, rec: Rectangle, alpha: f32) {
    d.draw_rectangle_rounded(rec, 0.05, 8, with_alpha(PANEL, alpha));
    d.draw_rectangle_lines_ex(rec, 1.0, with_alpha(TEAL, 0.3 * alpha));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_on_word_boundaries() {
        let width = text_width("hello world", 10);
        let lines = wrap_text("hello world hello world", width, 10);
        assert_eq!(lines, vec!["hello world", "hello world"]);
    }

    #[test]
    fn keeps_paragraph_breaks_and_long_words() {
        let lines = wrap_text("a\nsupercalifragilistic b", text_width("abc", 10), 10);
        assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
    }

    #[test]
    fn alpha_scales_channel() {
        assert_eq!(with_alpha(TEAL, 0.5).a, 127);
        assert_eq!(with_alpha(TEAL, 2.0).a, 255);
    }
}

use std::sync::Arc;

use raylib::prelude::*;

use crate::contact::{ContactForm, Dispatch, Field, Relay, SubmitStatus};
use crate::content::Profile;
use crate::input::{FrameInput, Key};
use crate::section::{Action, Section};
use crate::state::SectionName;
use crate::widgets::*;

const FIELDS: [(Field, &str, &str); 3] = [
    (Field::Name, "Name", "Your name"),
    (Field::Email, "Email", "you@example.com"),
    (Field::Message, "Message", "Tell me about your project..."),
];

struct FormLayout {
    fields: [Rectangle; 3],
    submit: Rectangle,
    email_link: Rectangle,
}

pub struct ContactSection {
    email: String,
    form: ContactForm,
    show_hint: bool,
    caret_timer: f32,
    mouse: Vector2,
}

impl ContactSection {
    pub fn new(profile: &Profile, relay: Option<Arc<dyn Relay>>) -> Self {
        Self {
            email: profile.email.clone(),
            form: ContactForm::new(profile.email.clone(), relay),
            show_hint: false,
            caret_timer: 0.0,
            mouse: Vector2::new(-1.0, -1.0),
        }
    }

    fn layout(bounds: Rectangle) -> FormLayout {
        let x = bounds.x + bounds.width * 0.52;
        let width = (bounds.width * 0.4).min(520.0);
        let top = bounds.y + 170.0;
        let input = |y: f32, height: f32| Rectangle::new(x, y, width, height);
        let fields = [input(top + 26.0, 44.0), input(top + 118.0, 44.0), input(top + 210.0, 140.0)];
        FormLayout {
            fields,
            submit: Rectangle::new(x, top + 370.0, width, 52.0),
            email_link: Rectangle::new(bounds.x + bounds.width * 0.08, top + 120.0, 360.0, 28.0),
        }
    }

    fn submit(&mut self) -> Vec<Action> {
        if !self.form.is_complete() {
            self.show_hint = true;
            return Vec::new();
        }
        self.show_hint = false;
        match self.form.submit() {
            Dispatch::OpenMailClient(uri) => vec![Action::OpenUrl(uri)],
            Dispatch::Sending | Dispatch::Ignored => Vec::new(),
        }
    }

    fn edit(&mut self, input: &FrameInput) -> Vec<Action> {
        for &key in &input.keys {
            match key {
                Key::Tab => self.form.focus_next(),
                Key::Backspace => self.form.backspace(),
                // Single-line fields move on; the message field has no newlines
                Key::Enter if matches!(self.form.focus(), Some(Field::Name | Field::Email)) => self.form.focus_next(),
                _ => {}
            }
        }
        self.form.type_chars(&input.chars);
        Vec::new()
    }

    fn draw_field(&self, d: &mut RaylibDrawHandle, field: Field, label: &str, placeholder: &str, rec: Rectangle, alpha: f32) {
        d.draw_text(label, rec.x as i32, (rec.y - 26.0) as i32, 18, with_alpha(TEXT, alpha));
        let focused = self.form.focus() == Some(field);
        d.draw_rectangle_rounded(rec, 0.1, 8, with_alpha(Color::new(31, 41, 55, 255), alpha));
        let border = if focused { TEAL } else { MUTED };
        d.draw_rectangle_lines_ex(rec, if focused { 2.0 } else { 1.0 }, with_alpha(border, 0.8 * alpha));

        let value = self.form.value(field);
        let (text, color) = if value.is_empty() { (placeholder, MUTED) } else { (value, WHITE) };
        let height = draw_wrapped(d, text, rec.x + 12.0, rec.y + 12.0, rec.width - 24.0, 18, with_alpha(color, alpha));

        if focused && self.caret_timer < 0.5 {
            let last_line = wrap_text(value, rec.width - 24.0, 18).pop().unwrap_or_default();
            let lines = if value.is_empty() { 0.0 } else { height / line_height(18) - 1.0 };
            let x = rec.x + 12.0 + text_width(&last_line, 18) + 2.0;
            let y = rec.y + 12.0 + lines * line_height(18);
            d.draw_rectangle(x as i32, y as i32, 2, 18, with_alpha(TEAL, alpha));
        }
    }
}

impl Section for ContactSection {
    fn name(&self) -> SectionName {
        SectionName::Contact
    }

    fn set_visible(&mut self, _visible: bool) {}

    fn update(&mut self, input: &FrameInput, bounds: Rectangle, dt: f32) -> Vec<Action> {
        self.caret_timer = (self.caret_timer + dt) % 1.0;
        self.mouse = input.mouse;
        self.form.poll();

        let layout = Self::layout(bounds);
        if input.clicked {
            if input.hovering(&layout.submit) {
                if !self.form.is_sending() {
                    return self.submit();
                }
            } else if input.hovering(&layout.email_link) {
                return vec![Action::OpenUrl(format!("mailto:{}", self.email))];
            } else {
                let clicked = FIELDS.iter().zip(&layout.fields).find(|(_, rec)| input.hovering(rec));
                self.form.set_focus(clicked.map(|((field, _, _), _)| *field));
            }
        }

        if self.form.is_sending() {
            return Vec::new();
        }
        self.edit(input)
    }

    fn draw(&self, d: &mut RaylibDrawHandle, bounds: Rectangle, reveal: f32) {
        let lift = (1.0 - reveal) * 30.0;
        let left = bounds.x + bounds.width * 0.08;
        let layout = Self::layout(bounds);

        d.draw_text("Get In Touch", left as i32, (bounds.y + 90.0 + lift) as i32, 44, with_alpha(WHITE, reveal));
        d.draw_rectangle(left as i32, (bounds.y + 144.0 + lift) as i32, 80, 4, with_alpha(TEAL, reveal));
        draw_wrapped(
            d,
            "Have a project in mind or just want to say hi? My inbox is always open.",
            left,
            bounds.y + 170.0 + lift,
            bounds.width * 0.38,
            20,
            with_alpha(TEXT, reveal),
        );
        let link = layout.email_link;
        let link_color = if crate::input::contains(&link, self.mouse) { CYAN } else { TEAL };
        d.draw_text(&self.email, link.x as i32, (link.y + 4.0 + lift) as i32, 20, with_alpha(link_color, reveal));

        for ((field, label, placeholder), rec) in FIELDS.iter().zip(layout.fields) {
            let rec = Rectangle::new(rec.x, rec.y + lift, rec.width, rec.height);
            self.draw_field(d, *field, label, placeholder, rec, reveal);
        }

        let sending = self.form.is_sending();
        let label = if sending { "Sending..." } else { "Send Message" };
        let hovered = !sending && crate::input::contains(&layout.submit, self.mouse);
        let submit = Rectangle::new(layout.submit.x, layout.submit.y + lift, layout.submit.width, layout.submit.height);
        draw_button(d, submit, label, hovered, !sending, reveal);

        let status_y = (submit.y + submit.height + 18.0) as i32;
        if let Some(message) = self.form.status().message() {
            let color = if self.form.status() == SubmitStatus::Success { TEAL } else { DANGER };
            d.draw_text(message, submit.x as i32, status_y, 18, with_alpha(color, reveal));
        } else if self.show_hint {
            d.draw_text("Please fill in every field.", submit.x as i32, status_y, 18, with_alpha(DANGER, reveal));
        }
    }
}

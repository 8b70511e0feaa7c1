use rand::Rng;
use raylib::prelude::*;

use crate::constants::PARTICLE_COUNT;
use crate::widgets::{with_alpha, BACKGROUND, TEAL};

const LINK_DISTANCE: f32 = 140.0;
const MAX_SPEED: f32 = 18.0; // pixels per second

#[derive(Debug, Clone)]
struct Particle {
    // Normalized to the screen so a resize keeps the spread
    position: Vector2,
    velocity: Vector2,
    radius: f32,
}

/// Slowly drifting dots joined by faint lines, drawn behind the page.
pub struct Background {
    particles: Vec<Particle>,
}

impl Background {
    pub fn new() -> Self {
        Self::with_count(PARTICLE_COUNT)
    }

    pub fn with_count(count: usize) -> Self {
        let mut rng = rand::rng();
        let particles = (0..count)
            .map(|_| Particle {
                position: Vector2::new(rng.random_range(0.0..1.0), rng.random_range(0.0..1.0)),
                velocity: Vector2::new(rng.random_range(-MAX_SPEED..MAX_SPEED), rng.random_range(-MAX_SPEED..MAX_SPEED)),
                radius: rng.random_range(1.0..2.5),
            })
            .collect();
        Self { particles }
    }

    pub fn update(&mut self, screen: Rectangle, dt: f32) {
        if screen.width <= 0.0 || screen.height <= 0.0 {
            return;
        }
        for p in &mut self.particles {
            p.position.x += p.velocity.x * dt / screen.width;
            p.position.y += p.velocity.y * dt / screen.height;
            p.position.x = wrap_unit(p.position.x);
            p.position.y = wrap_unit(p.position.y);
        }
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle, screen: Rectangle) {
        d.clear_background(BACKGROUND);
        let points: Vec<Vector2> = self
            .particles
            .iter()
            .map(|p| Vector2::new(screen.x + p.position.x * screen.width, screen.y + p.position.y * screen.height))
            .collect();

        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                let distance = a.distance_to(*b);
                if distance < LINK_DISTANCE {
                    let alpha = 0.15 * (1.0 - distance / LINK_DISTANCE);
                    d.draw_line_ex(*a, *b, 1.0, with_alpha(TEAL, alpha));
                }
            }
        }
        for (p, point) in self.particles.iter().zip(&points) {
            d.draw_circle_v(*point, p.radius, with_alpha(TEAL, 0.5));
        }
    }
}

/// Wraps into `[0, 1)`; `rem_euclid` can round tiny negatives up to 1.0.
fn wrap_unit(value: f32) -> f32 {
    let wrapped = value.rem_euclid(1.0);
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particles_stay_on_screen() {
        let mut background = Background::with_count(16);
        let screen = Rectangle::new(0.0, 0.0, 200.0, 100.0);
        for _ in 0..600 {
            background.update(screen, 0.5);
        }
        for p in &background.particles {
            assert!((0.0..1.0).contains(&p.position.x), "{:?}", p);
            assert!((0.0..1.0).contains(&p.position.y), "{:?}", p);
        }
    }

    #[test]
    fn empty_screen_is_ignored() {
        let mut background = Background::with_count(4);
        let before: Vec<_> = background.particles.iter().map(|p| (p.position.x, p.position.y)).collect();
        background.update(Rectangle::new(0.0, 0.0, 0.0, 0.0), 1.0);
        let after: Vec<_> = background.particles.iter().map(|p| (p.position.x, p.position.y)).collect();
        assert_eq!(before, after);
    }
}

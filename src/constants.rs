pub const DEFAULT_WIDTH: i32 = 1280;          // Initial window width
pub const DEFAULT_HEIGHT: i32 = 800;          // Initial window height
pub const FPS: u32 = 60;                      // Default frames per second

pub const SECTION_THRESHOLD: f32 = 0.3;       // Fraction of a section on screen to start its animations
pub const ACTIVE_SECTION_THRESHOLD: f32 = 0.5; // Fraction of a section on screen to mark it active

pub const ENTRANCE_DURATION: f32 = 0.7;       // Section fade/slide-in (seconds)
pub const SCROLL_DURATION: f32 = 0.6;         // Animated scroll to a section (seconds)
pub const WHEEL_STEP: f32 = 80.0;             // Pixels scrolled per mouse wheel notch

pub const TYPE_INTERVAL: f32 = 0.06;          // Hero typewriter: delay per typed character
pub const DELETE_INTERVAL: f32 = 0.03;        // Hero typewriter: delay per deleted character
pub const HOLD_BEFORE_DELETE: f32 = 1.0;      // Hero typewriter: pause on a fully typed role

pub const ABOUT_INTERVAL: f32 = 10.0;         // Education/experience switch
pub const SKILLS_INTERVAL: f32 = 4.0;         // Tech stack/soft skills switch
pub const SKILLS_FADE: f32 = 0.3;             // Cross-fade between skill views
pub const PROJECTS_INTERVAL: f32 = 5.0;       // Project slideshow autoplay
pub const HOVER_PREVIEW_INTERVAL: f32 = 1.5;  // Image cycling inside a hovered project card

pub const PARTICLE_COUNT: usize = 48;         // Animated background particles

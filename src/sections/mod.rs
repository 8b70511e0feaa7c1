pub mod about;
pub mod contact;
pub mod hero;
pub mod projects;
pub mod skills;

pub use about::AboutSection;
pub use contact::ContactSection;
pub use hero::HeroSection;
pub use projects::ProjectsSection;
pub use skills::SkillsSection;

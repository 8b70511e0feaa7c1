#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
pub enum SectionName {
    Home,     // Hero with name, roles and resume link
    About,    // Summary plus rotating education/experience panel
    Projects, // Project slideshow and detail modal
    Skills,   // Rotating tech stack / soft skills
    Contact,  // Contact form
}

impl SectionName {
    /// Page order, top to bottom.
    pub const ALL: [SectionName; 5] = [
        SectionName::Home,
        SectionName::About,
        SectionName::Projects,
        SectionName::Skills,
        SectionName::Contact,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SectionName::Home => "Home",
            SectionName::About => "About",
            SectionName::Projects => "Projects",
            SectionName::Skills => "Skills",
            SectionName::Contact => "Contact",
        }
    }

    pub fn position(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_order_matches_positions() {
        for (i, name) in SectionName::ALL.iter().enumerate() {
            assert_eq!(name.position(), i);
        }
        assert!(SectionName::Home < SectionName::Contact);
    }
}

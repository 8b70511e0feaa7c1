use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::texture_loader::load_sorted_image_paths;

const DEFAULT_CONTENT: &str = include_str!("../content/portfolio.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct Portfolio {
    pub profile: Profile,
    #[serde(default)]
    pub education: Vec<Entry>,
    #[serde(default)]
    pub experience: Vec<Entry>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub tech_skills: Vec<String>,
    #[serde(default)]
    pub soft_skills: Vec<SoftSkill>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub name: String,
    pub roles: Vec<String>,
    pub summary: String,
    pub email: String,
    #[serde(default)]
    pub resume: Option<String>,
    #[serde(default)]
    pub socials: Vec<Link>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

/// One education or experience item.
#[derive(Debug, Clone, Deserialize)]
pub struct Entry {
    pub title: String,
    pub period: String,
    pub institution: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub full_description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub images: Vec<PathBuf>,
    /// Directory scanned for images when `images` is empty.
    #[serde(default)]
    pub image_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SoftSkill {
    pub name: String,
    pub description: String,
}

impl Portfolio {
    pub fn parse(text: &str) -> Result<Self> {
        let portfolio: Portfolio = toml::from_str(text).context("Invalid portfolio content")?;
        Ok(portfolio)
    }

    pub fn embedded() -> Result<Self> {
        Self::parse(DEFAULT_CONTENT)
    }

    /// Reads a content file; relative image and resume paths resolve against
    /// its folder.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read content file {}", path.display()))?;
        let mut portfolio = Self::parse(&text)?;
        if let Some(base) = path.parent() {
            portfolio.rebase(base);
        }
        info!(path = %path.display(), projects = portfolio.projects.len(), "loaded portfolio content");
        Ok(portfolio)
    }

    fn rebase(&mut self, base: &Path) {
        if let Some(resume) = self.profile.resume.as_mut() {
            if !is_url(resume) && Path::new(resume.as_str()).is_relative() {
                *resume = base.join(resume.as_str()).to_string_lossy().into_owned();
            }
        }
        for project in &mut self.projects {
            for image in &mut project.images {
                if image.is_relative() {
                    *image = base.join(&*image);
                }
            }
            if let Some(dir) = project.image_dir.as_mut() {
                if dir.is_relative() {
                    *dir = base.join(&*dir);
                }
            }
        }
    }
}

/// Web links and `mailto:` URIs are left alone by rebasing.
fn is_url(value: &str) -> bool {
    value.contains("://") || value.starts_with("mailto:")
}

impl Project {
    /// Image files to show for this project, in display order.
    pub fn image_paths(&self) -> Result<Vec<PathBuf>> {
        if !self.images.is_empty() {
            return Ok(self.images.clone());
        }
        match &self.image_dir {
            Some(dir) => load_sorted_image_paths(dir),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_content_parses() {
        let portfolio = Portfolio::embedded().unwrap();
        assert!(!portfolio.profile.roles.is_empty());
        assert_eq!(portfolio.projects.len(), 2);
        assert!(!portfolio.tech_skills.is_empty());
        assert!(!portfolio.soft_skills.is_empty());
    }

    #[test]
    fn optional_sections_default_to_empty() {
        let portfolio = Portfolio::parse(
            r#"
            [profile]
            name = "Sam"
            roles = ["Engineer"]
            summary = "Builds things"
            email = "sam@example.com"
            "#,
        )
        .unwrap();
        assert!(portfolio.projects.is_empty());
        assert!(portfolio.profile.resume.is_none());
    }

    #[test]
    fn relative_images_follow_content_file() {
        let mut portfolio = Portfolio::embedded().unwrap();
        portfolio.projects[0].images = vec![PathBuf::from("shots/a.png")];
        portfolio.projects[1].image_dir = Some(PathBuf::from("shots"));
        portfolio.profile.resume = Some("resume.pdf".to_string());
        portfolio.rebase(Path::new("/srv/site"));
        assert_eq!(portfolio.projects[0].images[0], PathBuf::from("/srv/site/shots/a.png"));
        assert_eq!(portfolio.projects[1].image_dir.as_deref(), Some(Path::new("/srv/site/shots")));
        assert_eq!(portfolio.profile.resume.as_deref(), Some("/srv/site/resume.pdf"));
    }

    #[test]
    fn resume_links_and_absolute_paths_are_not_rebased() {
        for resume in ["https://cdn.example.com/cv.pdf", "/home/me/cv.pdf"] {
            let mut portfolio = Portfolio::embedded().unwrap();
            portfolio.profile.resume = Some(resume.to_string());
            portfolio.rebase(Path::new("/srv/site"));
            assert_eq!(portfolio.profile.resume.as_deref(), Some(resume));
        }
    }

    #[test]
    fn explicit_images_win_over_directory() {
        let mut project = Portfolio::embedded().unwrap().projects.remove(0);
        project.images = vec![PathBuf::from("one.png")];
        project.image_dir = Some(PathBuf::from("/nonexistent"));
        assert_eq!(project.image_paths().unwrap(), vec![PathBuf::from("one.png")]);
    }
}

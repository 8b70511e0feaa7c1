use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

use crate::carousel::BoundaryPolicy;
use crate::constants::*;

/// Personal portfolio showcase.
#[derive(Debug, Parser)]
#[command(name = "folio", version, about)]
pub struct Cli {
    /// TOML file describing the portfolio (profile, projects, skills)
    #[arg(long, env = "PORTFOLIO_CONTENT")]
    pub content: Option<PathBuf>,

    /// Form relay endpoint receiving contact messages as JSON; without it the
    /// contact form opens the mail client instead
    #[arg(long, env = "PORTFOLIO_RELAY_ENDPOINT")]
    pub relay_endpoint: Option<String>,

    /// Initial window width
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: i32,

    /// Initial window height
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: i32,

    /// Target frames per second
    #[arg(long, default_value_t = FPS)]
    pub fps: u32,

    /// How the project detail view pages past the first and last project
    #[arg(long, value_enum, default_value = "wrap")]
    pub modal_paging: BoundaryPolicy,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, env = "PORTFOLIO_LOG", default_value = "info")]
    pub log_level: Level,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["folio"]).unwrap();
        assert_eq!(cli.width, DEFAULT_WIDTH);
        assert_eq!(cli.fps, FPS);
        assert_eq!(cli.log_level, Level::INFO);
        assert_eq!(cli.modal_paging, BoundaryPolicy::WrapWithCallToAction);
    }

    #[test]
    fn clamped_modal_paging() {
        let cli = Cli::try_parse_from(["folio", "--modal-paging", "clamped"]).unwrap();
        assert_eq!(cli.modal_paging, BoundaryPolicy::Clamped);
        assert!(Cli::try_parse_from(["folio", "--modal-paging", "loop"]).is_err());
    }

    #[test]
    fn explicit_flags() {
        let cli = Cli::try_parse_from([
            "folio",
            "--content",
            "site.toml",
            "--relay-endpoint",
            "https://relay.example/f/abc",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.content, Some(PathBuf::from("site.toml")));
        assert_eq!(cli.relay_endpoint.as_deref(), Some("https://relay.example/f/abc"));
        assert_eq!(cli.log_level, Level::DEBUG);
    }

    #[test]
    fn rejects_unknown_level() {
        assert!(Cli::try_parse_from(["folio", "--log-level", "loud"]).is_err());
    }
}

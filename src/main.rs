use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use raylib::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

mod background;
mod carousel;
mod config;
mod constants;
mod contact;
mod content;
mod input;
mod launcher;
mod nav;
mod page;
mod rotation;
mod scroll;
mod section;
mod sections;
mod state;
mod texture_loader;
mod typewriter;
mod visibility;
mod widgets;

use crate::config::Cli;
use crate::contact::{HttpRelay, Relay, SubmitError};
use crate::content::Portfolio;
use crate::input::FrameInput;
use crate::launcher::open_url;
use crate::page::Page;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let content = match &cli.content {
        Some(path) => Portfolio::load(path)?,
        None => Portfolio::embedded()?,
    };
    info!(name = %content.profile.name, projects = content.projects.len(), "portfolio content ready");

    let relay: Option<Arc<dyn Relay>> = match HttpRelay::from_endpoint(cli.relay_endpoint.as_deref()) {
        Ok(relay) => Some(Arc::new(relay)),
        Err(SubmitError::ConfigurationMissing) => {
            info!("no form relay configured, contact messages open the mail client");
            None
        }
        Err(e) => {
            warn!("form relay unavailable, falling back to the mail client: {}", e);
            None
        }
    };

    let (mut rl, thread) = raylib::init()
        .size(cli.width, cli.height)
        .title(&format!("{} | Portfolio", content.profile.name))
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(cli.fps);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);
    // Escape closes the project modal, not the window
    rl.set_exit_key(None);

    let screen = Rectangle::new(0.0, 0.0, rl.get_screen_width() as f32, rl.get_screen_height() as f32);
    let mut page = Page::new(content, relay, cli.modal_paging, screen);
    page.initialize(&mut rl, &thread)?;

    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        let input = FrameInput::poll(&mut rl);

        for url in page.update(&input, dt) {
            info!(%url, "opening");
            if let Err(e) = open_url(&url) {
                warn!("Could not open {}: {:#}", url, e);
            }
        }

        let mut d = rl.begin_drawing(&thread);
        page.draw(&mut d);
    }

    Ok(())
}

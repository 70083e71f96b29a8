//! shelter-tui - A terminal UI for browsing shelter dogs
//!
//! This is the main entry point for the shelter-tui application.
//! It uses the Component Architecture pattern from ratatui.

mod action;
mod app;
mod component;
mod components;
mod config;
mod error;
mod logging;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::services::HttpShelterApi;
use crate::tui::Tui;
use anyhow::{Context, Result};
use crossterm::event::Event;
use std::sync::Arc;

fn main() -> Result<()> {
    // Load configuration; a broken file should not keep the app from starting
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    let config = config.with_env_overrides();

    // Logging is best effort: the UI works without a log file
    let _log_guard = match logging::init(&config) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {}", e);
            None
        }
    };
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "using default configuration");
    }
    tracing::info!(api = config.base_url(), "starting shelter-tui");

    let api = HttpShelterApi::new(&config).context("Failed to build HTTP client")?;

    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(config.tick_rate());
    tui.enter()?;

    // Create app state
    let mut app = App::new(&config, Arc::new(api));
    app.init()?;

    // Main event loop
    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;

    // Handle any errors
    if let Err(err) = result {
        tracing::error!(error = ?err, "application error");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    tracing::info!("exiting");
    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        // Draw the UI
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                tracing::error!(error = %e, "draw failed");
            }
        })?;

        // Poll for events
        if let Some(event) = tui.next_event()? {
            // Convert event to action
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // Process the action
            if let Some(action) = action {
                // Action might produce a follow-up action
                let mut current_action = Some(action);
                while let Some(a) = current_action {
                    current_action = app.update(a)?;
                }
            }
        }

        // Deliver finished requests even while keys keep arriving
        app.update(Action::Tick)?;
    }

    Ok(())
}

//! Application entry point for the N-body sandbox.
//!
//! This binary parses the command line, loads the optional settings file,
//! sets up eframe/egui and delegates all interactive logic and rendering
//! to [`Viewer`] from the `viewer` module.

mod settings;
mod viewer;

use anyhow::Result;
use clap::Parser;
use log::info;
use settings::{Args, Settings};
use viewer::Viewer;

/// Starts the native eframe application.
///
/// The window is sized to fit the simulation bounds plus the side and
/// top panels.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if the settings are invalid or eframe fails to create the
///   native window or event loop.
fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let settings = Settings::load(&args)?;
    let bounds = settings.physics.bounds;
    info!(
        "bounds {}x{}, G = {}",
        bounds.width, bounds.height, settings.physics.gravity
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([bounds.width + 240.0, bounds.height + 80.0]),
        ..Default::default()
    };

    let viewer = Viewer::new(settings)?;
    eframe::run_native("nbody", options, Box::new(|_cc| Ok(Box::new(viewer))))
    .map_err(|e| anyhow::anyhow!("failed to run viewer: {e}"))?;

    Ok(())
}

//! camdeck entry point.
//!
//! Parses the command line, loads configuration, opens the camera and
//! starts the preview window.

// Application modules
mod app;
mod components;
mod config;
mod events;
mod logic;

use app::App;
use clap::Parser;
use config::{AppConfig, Catalog};
use logging::Logger;
use logic::{SessionController, SessionError, SessionOutputs};
use media::{Camera, CaptureConfig, ImageFileWriter, OpenCvSinkFactory};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc::channel;

#[derive(Parser, Debug)]
#[command(name = "camdeck", version, about = "Webcam preview, recording and snapshots")]
struct Cli {
    /// Run in a window instead of fullscreen
    #[arg(short, long)]
    windowed: bool,

    /// Configuration file (default: $CAMDECK_CONFIG, ./config/camdeck.conf, ./camdeck.conf)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Camera index, overrides `camera_device`
    #[arg(short, long, value_name = "INDEX")]
    device: Option<i32>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(device) = cli.device {
        config.camera_device = device;
    }

    let logger = match Logger::with_component(config.log_path.clone(), config.log_level, "App", false)
    {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Failed to initialize logger: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut session = match open_session(&config, &logger) {
        Ok(session) => session,
        Err(e) => {
            logger.error(&format!("[APP] Cannot start camera: {}", e));
            eprintln!("Cannot start camera {}: {}", config.camera_device, e);
            return ExitCode::FAILURE;
        }
    };

    let (capture_evt_tx, capture_evt_rx) = channel();
    if let Err(e) = session.start_capture(capture_evt_tx) {
        logger.error(&format!("[APP] Cannot start capture thread: {}", e));
        eprintln!("Cannot start capture: {}", e);
        return ExitCode::FAILURE;
    }

    let viewport = if cli.windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_resizable(false)
    } else {
        egui::ViewportBuilder::default().with_fullscreen(true)
    };
    let native_options = eframe::NativeOptions {
        viewport: viewport.with_title("camdeck"),
        ..Default::default()
    };

    let app_logger = logger.clone();
    let result = eframe::run_native(
        "camdeck",
        native_options,
        Box::new(move |cc| {
            cc.egui_ctx.set_theme(egui::Theme::Dark);
            Ok(Box::new(App::new(&config, app_logger, session, capture_evt_rx)))
        }),
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger.error(&format!("[APP] Window error: {}", e));
            eprintln!("Window error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Opens the configured camera and wraps it in a session
fn open_session(
    config: &AppConfig,
    logger: &Logger,
) -> Result<SessionController<Camera>, SessionError> {
    let (width, height) = config.initial_resolution.dimensions();
    let capture_config = CaptureConfig::new(width, height, config.initial_fps.fps())?;
    let camera = Camera::open(
        config.camera_device,
        &capture_config,
        logger.for_component("Camera"),
    )?;

    let outputs = SessionOutputs {
        sinks: Box::new(OpenCvSinkFactory::new(logger.for_component("Recorder"))),
        images: Box::new(ImageFileWriter),
        video_folder: config.video_folder.clone(),
        photo_folder: config.photo_folder.clone(),
    };

    SessionController::new(
        camera,
        Catalog::default(),
        (config.initial_resolution, config.initial_fps),
        outputs,
        logger.for_component("Session"),
    )
}

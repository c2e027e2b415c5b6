//! # Delve Main Entry Point
//!
//! Parses the command line, loads configuration, initializes logging and
//! runs the macroquad frame loop.

use clap::Parser;
use delve::config::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};
use delve::scenes::SceneManager;
use delve::{
    DelveResult, EngineConfig, GameState, InputHandler, LightSettings, MacroquadDisplay,
    Notifiers, ProjectionRenderer,
};
use log::{error, info};
use macroquad::window::Conf;
use std::path::PathBuf;

/// Command line arguments for Delve.
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(about = "A first-person dungeon crawler with ray-cast corridors and tactical encounters")]
#[command(version)]
struct Args {
    /// JSON configuration file; missing keys keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Dungeon width in cells
    #[arg(long)]
    width: Option<usize>,

    /// Dungeon height in cells
    #[arg(long)]
    height: Option<usize>,

    /// Initial ambient light, 0 to 1
    #[arg(long)]
    ambient: Option<f32>,

    /// Initial torch light, 0 to 1
    #[arg(long)]
    torch: Option<f32>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> DelveResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level);
    info!("Starting Delve v{}", delve::VERSION);

    let config = load_config(&args)?;
    if args.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let conf = Conf {
        window_title: "Delve".to_string(),
        window_width: DEFAULT_WINDOW_WIDTH as i32,
        window_height: DEFAULT_WINDOW_HEIGHT as i32,
        high_dpi: true,
        window_resizable: true,
        ..Default::default()
    };
    macroquad::Window::from_config(conf, async move {
        if let Err(err) = run_game(config).await {
            error!("Game loop failed: {err}");
            std::process::exit(1);
        }
    });
    Ok(())
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    #[cfg(feature = "dev-tools")]
    {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new(log_level))
            .with_target(false)
            .init();
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::new()
            .parse_filters(log_level)
            .format_timestamp(None)
            .init();
    }
}

/// Loads the config file, if any, then applies command line overrides.
fn load_config(args: &Args) -> DelveResult<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    if let Some(width) = args.width {
        config.generation.width = width;
    }
    if let Some(height) = args.height {
        config.generation.height = height;
    }
    if args.ambient.is_some() || args.torch.is_some() {
        config.lights = LightSettings::new(
            args.ambient.unwrap_or(config.lights.ambient),
            args.torch.unwrap_or(config.lights.torch),
        );
    }

    config.validate()?;
    Ok(config)
}

/// Runs the main game loop with macroquad graphics.
async fn run_game(config: EngineConfig) -> DelveResult<()> {
    let game_state = GameState::new(&config, Notifiers::logging());
    let renderer = ProjectionRenderer::new(config.render.clone(), config.lighting.clone());
    let display = MacroquadDisplay::new(renderer)?;

    let mut scenes = SceneManager::new(game_state, display, InputHandler::new());
    scenes.run().await?;

    info!("Game loop ended");
    Ok(())
}

mod audio;
mod controls;
mod render;
mod session;

use chaser::config::{self, MATCH_LONG, MATCH_MEDIUM, MATCH_SHORT, WINDOW_HEIGHT, WINDOW_WIDTH};
use chaser::grid::Grid;
use chaser::logging::{self, TOPICS};
use chaser::MatchConfig;
use clap::{Parser, ValueEnum};
use log::{error, info, warn};
use macroquad::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Player 1 against the bot
    Pve,
    /// Two players on one keyboard
    Pvp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Length {
    One,
    Two,
    Three,
}

impl Length {
    fn seconds(self) -> f64 {
        match self {
            Length::One => MATCH_SHORT,
            Length::Two => MATCH_MEDIUM,
            Length::Three => MATCH_LONG,
        }
    }
}

// --- Command Line Arguments ---
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Opponent for Player 1.
    #[arg(long, value_enum, default_value_t = Mode::Pve)]
    mode: Mode,

    /// Match length in minutes.
    #[arg(long, value_enum, default_value_t = Length::One)]
    length: Length,

    /// Match length in seconds, overriding --length.
    #[arg(long)]
    duration: Option<f64>,

    /// Grid width in cells.
    #[arg(long, default_value_t = config::GRID_WIDTH_CELLS)]
    width: u32,

    /// Grid height in cells.
    #[arg(long, default_value_t = config::GRID_HEIGHT_CELLS)]
    height: u32,

    /// Cell edge in pixels.
    #[arg(long, default_value_t = config::CELL_SIZE)]
    cell_size: u32,

    /// Seed for food, power-up and bot randomness.
    #[arg(long)]
    seed: Option<u64>,

    /// Start the match without the preparation countdown.
    #[arg(long)]
    no_countdown: bool,

    /// Debug filter to specify log topics (e.g., "bot,powerup")
    /// Available topics: match, agent, bot, powerup, food
    #[arg(long)]
    debug_filter: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn match_config(&self) -> MatchConfig {
        let mut config = MatchConfig {
            cell_size: self.cell_size,
            ..MatchConfig::default()
        }
        .with_grid(self.width, self.height)
        .with_duration(self.duration.unwrap_or(self.length.seconds()))
        .with_bot(self.mode == Mode::Pve);
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Chaser".to_owned(),
        window_width: WINDOW_WIDTH,
        window_height: WINDOW_HEIGHT,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let args = Args::parse();

    if let Err(e) = logging::init_logger(logging::parse_level(&args.log_level), args.debug_filter.clone()) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }
    if let Some(filter) = &args.debug_filter {
        for topic in filter.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            if !TOPICS.contains(&topic) {
                warn!("Unknown debug topic '{}', expected one of {:?}", topic, TOPICS);
            }
        }
    }

    let config = args.match_config();
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        std::process::exit(2);
    }

    info!("Initializing Chaser...");
    let grid = Grid::new(config.grid_width, config.grid_height, config.cell_size);
    request_new_screen_size(grid.pixel_width() as f32, grid.pixel_height() as f32);

    let mut renderer = render::Renderer::new(grid);
    renderer.load_ui_font().await;
    let mut audio = audio::AudioManager::new();
    audio.load_assets().await;

    let mut session = session::Session::new(config, !args.no_countdown, renderer, audio);
    if let Err(e) = session.run().await {
        error!("Match failed to start: {}", e);
        std::process::exit(1);
    }
}

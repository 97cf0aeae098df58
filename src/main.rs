use circle_vs_square::audio::AudioManager;
use circle_vs_square::config::{self, Settings, WINDOW_HEIGHT, WINDOW_WIDTH};
use circle_vs_square::game::Game;
use circle_vs_square::logging::{self, DEBUG_TOPICS};
use circle_vs_square::render::Renderer;

use clap::Parser;
use log::{error, info, warn};
use macroquad::prelude::*;
use std::path::PathBuf;

// --- Command Line Arguments ---
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Start in fullscreen mode.
    #[arg(long)]
    fullscreen: bool,

    /// Endless mode: no levels, enemies speed up a little every frame.
    #[arg(long)]
    endless: bool,

    /// Start with sound effects off.
    #[arg(long)]
    mute: bool,

    /// Seed for enemy, coin and pickup spawns.
    #[arg(long)]
    seed: Option<u64>,

    /// High score file.
    #[arg(long, default_value = config::DEFAULT_SCORES_FILE)]
    scores_file: PathBuf,

    /// Directory holding sprites, sounds and fonts.
    #[arg(long, default_value = config::DEFAULT_ASSETS_DIR)]
    assets_dir: PathBuf,

    /// Debug filter to specify log topics (e.g., "motion,collision")
    /// Available topics: motion, collision, score, state, shop
    #[arg(long)]
    debug_filter: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn settings(&self) -> Settings {
        Settings {
            endless: self.endless,
            muted: self.mute,
            seed: self.seed,
            scores_file: self.scores_file.clone(),
            assets_dir: self.assets_dir.clone(),
        }
    }
}

fn window_conf() -> Conf {
    let args = Args::parse();
    Conf {
        window_title: "Circle vs Square".to_owned(),
        window_width: WINDOW_WIDTH,
        window_height: WINDOW_HEIGHT,
        fullscreen: args.fullscreen,
        window_resizable: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let args = Args::parse();

    let level = logging::parse_level(&args.log_level);
    if let Err(e) = logging::init_logger(level, args.debug_filter.clone()) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }
    if let Some(filter) = &args.debug_filter {
        let topics = filter.split(',').map(str::trim);
        for topic in topics.filter(|t| !t.is_empty()) {
            if !DEBUG_TOPICS.contains(&topic) {
                warn!("Unknown debug topic '{}', expected {:?}", topic, DEBUG_TOPICS);
            }
        }
    }

    info!("Initializing Circle vs Square...");
    let settings = args.settings();

    let mut audio = AudioManager::new(!settings.muted);
    audio.load_assets(&settings.assets_dir).await;

    info!("Initializing macroquad rendering system");
    let mut renderer = Renderer::new();
    renderer.load_assets(&settings.assets_dir).await;
    info!("Renderer initialized.");

    let mut game = Game::new(settings);
    if let Err(e) = game.run(&mut renderer, &mut audio).await {
        error!("Game loop failed: {}", e);
        std::process::exit(1);
    }
}

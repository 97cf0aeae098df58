//! Configuration constants for the circle vs square game.

use std::path::PathBuf;

// Playfield (logical pixels; the renderer scales this to the window)
pub const PLAYFIELD_WIDTH: f32 = 800.0;
pub const PLAYFIELD_HEIGHT: f32 = 600.0;

// Rendering configuration
pub const SIDE_PANEL_WIDTH: f32 = 200.0; // Minimum width of each side panel
pub const WINDOW_WIDTH: i32 = (PLAYFIELD_WIDTH + 2.0 * SIDE_PANEL_WIDTH) as i32;
pub const WINDOW_HEIGHT: i32 = PLAYFIELD_HEIGHT as i32;
pub const FRAME_RATE: u32 = 60; // Simulation steps per second

// Player
pub const PLAYER_RADIUS: f32 = 20.0;
pub const PLAYER_SPEED: f32 = 5.0; // Pixels per frame per axis
pub const START_LIVES: u32 = 3;
pub const MAX_LIVES: u32 = 5;
pub const INVULNERABLE_FRAMES: u32 = 90;

// Enemies
pub const ENEMY_SIZE: f32 = 30.0;
pub const ENEMY_SPEED: f32 = 3.0;
pub const HITBOX_SCALE: f32 = 0.8; // Sprite hitboxes are smaller than the drawn square
pub const START_ENEMIES: usize = 2;
pub const MAX_ENEMIES: usize = 8;
pub const ENEMY_ANIM_FRAMES: u8 = 4;
pub const ANIM_TICKS_PER_FRAME: u32 = 8;

// Coins
pub const COIN_SIZE: f32 = 20.0;
pub const COIN_SPEED: f32 = 2.0;
pub const COIN_COUNT: usize = 2;
pub const COIN_RESPAWN_FRAMES: u32 = 120;

// Shooting
pub const PROJECTILE_SIZE: f32 = 8.0;
pub const PROJECTILE_SPEED: f32 = 10.0;
pub const SHOT_COOLDOWN_FRAMES: u32 = 12;
pub const START_AMMO: u32 = 10;
pub const MAX_AMMO: u32 = 30;
pub const AMMO_PER_PICKUP: u32 = 5;
pub const AMMO_PICKUP_SIZE: f32 = 18.0;
pub const AMMO_SPAWN_CHANCE: f64 = 0.004; // Per frame, while no pickup is on screen

// Scoring
pub const COIN_SCORE: u32 = 1;
pub const KILL_SCORE: u32 = 2;
pub const EXTRA_LIFE_EVERY: u32 = 25; // Points earned per bonus life

// Difficulty
pub const SPEED_INCREMENT: f32 = 0.01; // Endless mode ramp, px/frame added to the enemy speed
pub const LEVEL_SPEEDUP: f32 = 1.15;
pub const LEVEL_FRAMES: u32 = 30 * FRAME_RATE;
pub const LEVEL_BANNER_FRAMES: u32 = 2 * FRAME_RATE;
pub const DEATH_FRAMES: u32 = FRAME_RATE;

// High scores
pub const MAX_HIGH_SCORES: usize = 5;
pub const DEFAULT_SCORES_FILE: &str = "highscores.txt";
pub const DEFAULT_ASSETS_DIR: &str = "assets";

/// Runtime settings assembled from the command line.
#[derive(Debug, Clone)]
pub struct Settings {
    pub endless: bool,
    pub muted: bool,
    pub seed: Option<u64>,
    pub scores_file: PathBuf,
    pub assets_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            endless: false,
            muted: false,
            seed: None,
            scores_file: PathBuf::from(DEFAULT_SCORES_FILE),
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
        }
    }
}

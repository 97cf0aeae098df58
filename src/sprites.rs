//! Textures for the player, enemies, coins and ammo. Files are read from the assets
//! directory; anything missing is replaced by a generated placeholder.

use crate::config::{AMMO_PICKUP_SIZE, COIN_SIZE, ENEMY_ANIM_FRAMES, ENEMY_SIZE, PLAYER_RADIUS};
use log::{debug, info};
use macroquad::prelude::{Color, FilterMode, Image, Texture2D, load_texture};
use std::path::Path;

const ENEMY_RED: Color = Color::new(0.9, 0.15, 0.15, 1.0);
const ENEMY_DARK: Color = Color::new(0.45, 0.05, 0.05, 1.0);
const PLAYER_BLUE: Color = Color::new(0.15, 0.35, 1.0, 1.0);
const COIN_GOLD: Color = Color::new(1.0, 0.8, 0.1, 1.0);
const COIN_SHINE: Color = Color::new(1.0, 0.95, 0.6, 1.0);
const AMMO_GREEN: Color = Color::new(0.2, 0.75, 0.3, 1.0);
const CLEAR: Color = Color::new(0.0, 0.0, 0.0, 0.0);

pub struct Sprites {
    pub player: Texture2D,
    pub enemy_frames: Vec<Texture2D>,
    pub coin: Texture2D,
    pub ammo: Texture2D,
}

impl Sprites {
    pub async fn load(dir: &Path) -> Self {
        let mut enemy_frames = Vec::with_capacity(ENEMY_ANIM_FRAMES as usize);
        for frame in 0..ENEMY_ANIM_FRAMES {
            let file = format!("enemy_{}.png", frame);
            let texture = texture_or(dir, &file, || enemy_placeholder(frame)).await;
            enemy_frames.push(texture);
        }
        let sprites = Sprites {
            player: texture_or(dir, "player.png", player_placeholder).await,
            enemy_frames,
            coin: texture_or(dir, "coin.png", coin_placeholder).await,
            ammo: texture_or(dir, "ammo.png", ammo_placeholder).await,
        };
        info!("Sprites ready.");
        sprites
    }

    pub fn enemy_frame(&self, frame: u8) -> &Texture2D {
        &self.enemy_frames[frame as usize % self.enemy_frames.len()]
    }
}

/// Load `file` from `dir`, or build a placeholder texture when it is missing.
async fn texture_or(dir: &Path, file: &str, generate: impl FnOnce() -> Image) -> Texture2D {
    let path = dir.join(file);
    let texture = match load_texture(&path.to_string_lossy()).await {
        Ok(texture) => texture,
        Err(e) => {
            debug!("Using placeholder for {}: {}", path.display(), e);
            Texture2D::from_image(&generate())
        }
    };
    texture.set_filter(FilterMode::Nearest);
    texture
}

/// Solid disc on a transparent square.
pub fn player_placeholder() -> Image {
    let size = (PLAYER_RADIUS * 2.0) as u16;
    disc(size, PLAYER_BLUE, None)
}

/// Square enemy with a dark core that pulses with the animation frame.
pub fn enemy_placeholder(frame: u8) -> Image {
    let size = ENEMY_SIZE as u16;
    let mut image = Image::gen_image_color(size, size, ENEMY_RED);
    // Core grows for two frames then shrinks back
    let step = [1u32, 2, 3, 2][frame as usize % 4];
    let inset = size as u32 / 2 - step * 3;
    for y in inset..size as u32 - inset {
        for x in inset..size as u32 - inset {
            image.set_pixel(x, y, ENEMY_DARK);
        }
    }
    image
}

pub fn coin_placeholder() -> Image {
    disc(COIN_SIZE as u16, COIN_GOLD, Some(COIN_SHINE))
}

pub fn ammo_placeholder() -> Image {
    let size = AMMO_PICKUP_SIZE as u16;
    let mut image = Image::gen_image_color(size, size, CLEAR);
    // Three upright rounds
    let width = size as u32 / 5;
    for i in 0..3u32 {
        let x0 = width / 2 + i * (width + width / 2);
        for y in 2..size as u32 - 1 {
            for x in x0..(x0 + width).min(size as u32) {
                image.set_pixel(x, y, AMMO_GREEN);
            }
        }
    }
    image
}

fn disc(size: u16, color: Color, highlight: Option<Color>) -> Image {
    let mut image = Image::gen_image_color(size, size, CLEAR);
    let r = size as f32 / 2.0;
    for y in 0..size as u32 {
        for x in 0..size as u32 {
            let dx = x as f32 + 0.5 - r;
            let dy = y as f32 + 0.5 - r;
            if dx * dx + dy * dy <= r * r {
                image.set_pixel(x, y, color);
            }
        }
    }
    if let Some(shine) = highlight {
        let s = size as u32 / 4;
        for y in s..s * 2 {
            for x in s..s * 2 {
                image.set_pixel(x, y, shine);
            }
        }
    }
    image
}

//! Circle vs Square: steer a circle around an arena, collect coins and dodge the
//! squares that sweep across it.

pub mod arena;
pub mod audio;
pub mod collision;
pub mod config;
pub mod entities;
pub mod game;
pub mod highscores;
pub mod layout;
pub mod logging;
pub mod menu;
pub mod motion;
pub mod particles;
pub mod render;
pub mod score;
pub mod shop;
pub mod sprites;
pub mod types;
pub mod utils;

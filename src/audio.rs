use crate::types::GameEvent;
use log::{info, warn};
use macroquad::audio::{Sound, load_sound, play_sound_once};
use std::path::Path;

/// Sound effects. Any sound that fails to load stays silent.
#[derive(Default)]
pub struct AudioManager {
    shoot_sound: Option<Sound>,
    coin_sound: Option<Sound>,
    hit_sound: Option<Sound>,
    explosion_sound: Option<Sound>,
    death_sound: Option<Sound>,
    level_sound: Option<Sound>,
    enabled: bool,
}

async fn load_optional(assets_dir: &Path, file: &str, what: &str) -> Option<Sound> {
    let path = assets_dir.join(file);
    let path = path.to_string_lossy();
    load_sound(&path)
        .await
        .map_err(|e| {
            warn!("Failed to load {} sound '{}': {}", what, path, e);
            e
        })
        .ok()
}

impl AudioManager {
    pub fn new(enabled: bool) -> Self {
        AudioManager {
            enabled,
            ..Default::default()
        }
    }

    // Load all sound assets
    pub async fn load_assets(&mut self, dir: &Path) {
        self.shoot_sound = load_optional(dir, "shoot.wav", "shoot").await;
        self.coin_sound = load_optional(dir, "coin.wav", "coin").await;
        self.hit_sound = load_optional(dir, "hit.wav", "hit").await;
        self.explosion_sound = load_optional(dir, "explosion.wav", "explosion").await;
        self.death_sound = load_optional(dir, "death.wav", "death").await;
        self.level_sound = load_optional(dir, "level.wav", "level").await;

        if self.loaded_count() == 0 {
            info!("No sounds available, running silent");
        }
    }

    pub fn loaded_count(&self) -> usize {
        [
            &self.shoot_sound,
            &self.coin_sound,
            &self.hit_sound,
            &self.explosion_sound,
            &self.death_sound,
            &self.level_sound,
        ]
        .iter()
        .filter(|s| s.is_some())
        .count()
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Which loaded sound, if any, goes with an event.
    fn sound_for(&self, event: &GameEvent) -> Option<&Sound> {
        match event {
            GameEvent::ShotFired => self.shoot_sound.as_ref(),
            GameEvent::CoinCollected { .. }
            | GameEvent::AmmoCollected { .. }
            | GameEvent::ExtraLife { .. }
            | GameEvent::Purchased { .. } => self.coin_sound.as_ref(),
            GameEvent::EnemyKilled { .. } => self.explosion_sound.as_ref(),
            GameEvent::PlayerHit { .. } => self.hit_sound.as_ref(),
            GameEvent::PlayerDied { .. } => self.death_sound.as_ref(),
            GameEvent::LevelComplete { .. } => self.level_sound.as_ref(),
            GameEvent::GameOver { .. } => None,
        }
    }

    pub fn play_events(&self, events: &[GameEvent]) {
        if !self.enabled {
            return;
        }
        for event in events {
            if let Some(sound) = self.sound_for(event) {
                play_sound_once(sound);
            }
        }
    }
}

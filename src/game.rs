use crate::arena::{Arena, Steering};
use crate::audio::AudioManager;
use crate::config::{self, Settings};
use crate::{debug_shop, debug_state};
use crate::highscores::HighScores;
use crate::menu::{Cursor, MenuItem, PauseMenu};
use crate::particles::ParticleSystem;
use crate::render::Renderer;
use crate::score::ScoreBoard;
use crate::shop::{Background, Purchase, Shop};
use crate::types::{GameEvent, Point};
use log::{error, info};
use macroquad::prelude::{
    Color, GOLD, KeyCode, ORANGE, SKYBLUE, Vec2, get_frame_time, is_key_down, is_key_pressed,
    is_quit_requested, next_frame,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

// Longest frame time fed into the accumulator, so a stall does not trigger a burst of steps
const MAX_FRAME_TIME: f32 = 0.25;

/// Exclusive modes of the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Paused,
    Shop,
    LevelComplete { frames_left: u32 },
    Dead { frames_left: u32 },
    GameOver { rank: Option<usize> },
    Terminated,
}

/// Keyboard state for one simulation step. Movement and fire are held keys,
/// the rest are presses latched until a step consumes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
    pub pause: bool,
    pub confirm: bool,
    pub back: bool,
    pub menu_up: bool,
    pub menu_down: bool,
    pub replay: bool,
    pub quit: bool,
}

impl Controls {
    /// Sample macroquad's keyboard state.
    pub fn read() -> Self {
        Controls {
            left: is_key_down(KeyCode::Left) || is_key_down(KeyCode::A),
            right: is_key_down(KeyCode::Right) || is_key_down(KeyCode::D),
            up: is_key_down(KeyCode::Up) || is_key_down(KeyCode::W),
            down: is_key_down(KeyCode::Down) || is_key_down(KeyCode::S),
            fire: is_key_down(KeyCode::Space),
            pause: is_key_pressed(KeyCode::P) || is_key_pressed(KeyCode::Escape),
            confirm: is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::KpEnter),
            back: is_key_pressed(KeyCode::Escape),
            menu_up: is_key_pressed(KeyCode::Up) || is_key_pressed(KeyCode::W),
            menu_down: is_key_pressed(KeyCode::Down) || is_key_pressed(KeyCode::S),
            replay: is_key_pressed(KeyCode::R),
            quit: is_key_pressed(KeyCode::Q) || is_key_pressed(KeyCode::Escape),
        }
    }

    /// Take the latest held keys and add newly pressed ones to those not yet consumed.
    pub fn latch(&mut self, newer: Controls) {
        *self = Controls {
            pause: self.pause || newer.pause,
            confirm: self.confirm || newer.confirm,
            back: self.back || newer.back,
            menu_up: self.menu_up || newer.menu_up,
            menu_down: self.menu_down || newer.menu_down,
            replay: self.replay || newer.replay,
            quit: self.quit || newer.quit,
            ..newer
        };
    }

    /// Held keys only; presses are consumed once a step has seen them.
    pub fn held_only(self) -> Self {
        Controls {
            left: self.left,
            right: self.right,
            up: self.up,
            down: self.down,
            fire: self.fire,
            ..Default::default()
        }
    }

    pub fn steering(&self) -> Steering {
        Steering {
            dx: self.right as i8 - self.left as i8,
            dy: self.down as i8 - self.up as i8,
            fire: self.fire,
        }
    }
}

/// The Game struct owns the whole session: the current run, the shop, the menu and the score table.
pub struct Game {
    pub arena: Arena,
    pub scores: ScoreBoard,
    pub shop: Shop,
    pub shop_cursor: Cursor,
    pub menu: PauseMenu,
    pub state: GameState,
    pub level: u32,
    pub level_frames_left: u32,
    pub high_scores: HighScores,
    pub particle_system: ParticleSystem,
    pub sound_enabled: bool,
    settings: Settings,
    rng: StdRng,
    pending: Controls,
    time_accumulator: f32,
    step_duration: f32,
}

impl Game {
    pub fn new(settings: Settings) -> Self {
        let mut rng = match settings.seed {
            Some(seed) => {
                info!("Seeding spawns with {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };

        let high_scores = match HighScores::load(&settings.scores_file) {
            Ok(table) => table,
            Err(e) => {
                error!("{}", e);
                HighScores::new()
            }
        };

        let arena = Arena::new(&mut rng, config::START_ENEMIES);
        info!(
            "Arena created {}x{} with {} enemies ({} mode).",
            arena.bounds.w,
            arena.bounds.h,
            arena.enemies.len(),
            if settings.endless { "endless" } else { "leveled" }
        );

        Game {
            arena,
            scores: ScoreBoard::new(),
            shop: Shop::new(),
            shop_cursor: Cursor::new(Background::ALL.len()),
            menu: PauseMenu::new(),
            state: GameState::Playing,
            level: 1,
            level_frames_left: config::LEVEL_FRAMES,
            high_scores,
            particle_system: ParticleSystem::new(),
            sound_enabled: !settings.muted,
            settings,
            rng,
            pending: Controls::default(),
            time_accumulator: 0.0,
            step_duration: 1.0 / config::FRAME_RATE as f32,
        }
    }

    pub fn is_endless(&self) -> bool {
        self.settings.endless
    }

    pub fn is_terminated(&self) -> bool {
        self.state == GameState::Terminated
    }

    /// Fraction of the next step already elapsed, for render interpolation.
    /// Only a running simulation is interpolated; frozen states draw the last step as is.
    pub fn interpolation_alpha(&self) -> f32 {
        if self.state != GameState::Playing {
            return 1.0;
        }
        (self.time_accumulator / self.step_duration).clamp(0.0, 1.0)
    }

    /// Run the main game loop until the player quits or the window closes.
    pub async fn run(
        &mut self,
        renderer: &mut Renderer,
        audio: &mut AudioManager,
    ) -> Result<(), Box<dyn std::error::Error>> {
        info!("Starting main loop...");

        while !self.is_terminated() {
            if is_quit_requested() {
                self.set_state(GameState::Terminated);
                break;
            }

            self.pending.latch(Controls::read());
            self.time_accumulator += get_frame_time().min(MAX_FRAME_TIME);

            // Fixed simulation update loop
            while self.time_accumulator >= self.step_duration {
                self.time_accumulator -= self.step_duration;

                let controls = self.pending;
                self.pending = controls.held_only();
                let events = self.tick(&controls);

                audio.set_enabled(self.sound_enabled);
                audio.play_events(&events);

                if self.is_terminated() {
                    break;
                }
            }

            renderer.draw_frame(self);
            next_frame().await;
        }

        info!("Exiting Circle vs Square.");
        Ok(())
    }

    /// Advance the session by one fixed step.
    pub fn tick(&mut self, controls: &Controls) -> Vec<GameEvent> {
        let mut events = Vec::new();
        // Bursts play out during the run and the death pause, and hold still behind menus
        let animate = matches!(self.state, GameState::Playing | GameState::Dead { .. });

        match self.state {
            GameState::Playing => {
                if controls.pause {
                    self.menu.cursor.reset();
                    self.set_state(GameState::Paused);
                } else {
                    self.update_simulation(controls.steering(), &mut events);
                }
            }
            GameState::Paused => self.update_pause_menu(controls, &mut events),
            GameState::Shop => self.update_shop(controls, &mut events),
            GameState::LevelComplete { frames_left } => {
                if frames_left <= 1 {
                    self.start_next_level();
                } else {
                    self.state = GameState::LevelComplete {
                        frames_left: frames_left - 1,
                    };
                }
            }
            GameState::Dead { frames_left } => {
                if frames_left <= 1 {
                    self.finish_run(&mut events);
                } else {
                    self.state = GameState::Dead {
                        frames_left: frames_left - 1,
                    };
                }
            }
            GameState::GameOver { .. } => {
                if controls.replay {
                    self.start_new_run();
                } else if controls.quit {
                    self.set_state(GameState::Terminated);
                }
            }
            GameState::Terminated => {}
        }

        self.spawn_effects(&events);
        if animate {
            self.particle_system.update(self.step_duration);
        }
        events
    }

    /// Update the simulation state for one fixed step of play.
    fn update_simulation(&mut self, steering: Steering, events: &mut Vec<GameEvent>) {
        self.arena
            .step(steering, &mut self.rng, &mut self.scores, events);

        if self.scores.is_out_of_lives() {
            let at = self.arena.player_center();
            info!("Out of lives with score {}", self.scores.score());
            events.push(GameEvent::PlayerDied { at });
            self.set_state(GameState::Dead {
                frames_left: config::DEATH_FRAMES,
            });
            return;
        }

        if self.settings.endless {
            self.arena.difficulty += config::SPEED_INCREMENT / config::ENEMY_SPEED;
            return;
        }

        self.level_frames_left = self.level_frames_left.saturating_sub(1);
        if self.level_frames_left == 0 {
            info!("Level {} complete", self.level);
            events.push(GameEvent::LevelComplete { level: self.level });
            self.set_state(GameState::LevelComplete {
                frames_left: config::LEVEL_BANNER_FRAMES,
            });
        }
    }

    fn start_next_level(&mut self) {
        self.level += 1;
        self.arena.difficulty *= config::LEVEL_SPEEDUP;
        let grown = config::START_ENEMIES + self.level as usize - 1;
        let enemy_count = grown.min(config::MAX_ENEMIES);
        self.arena.reset_for_level(&mut self.rng, enemy_count);
        self.level_frames_left = config::LEVEL_FRAMES;
        info!(
            "Level {}: {} enemies, speed x{:.2}",
            self.level,
            self.arena.enemies.len(),
            self.arena.difficulty
        );
        self.set_state(GameState::Playing);
    }

    /// Record the score and show the game over prompt.
    fn finish_run(&mut self, events: &mut Vec<GameEvent>) {
        let score = self.scores.score();
        let rank = self.high_scores.insert(score);
        if let Err(e) = self.high_scores.save(&self.settings.scores_file) {
            error!("{}", e);
        }
        info!("Game over: score {} rank {:?}", score, rank);
        events.push(GameEvent::GameOver { score, rank });
        self.set_state(GameState::GameOver { rank });
    }

    /// Fresh run. The shop and the score table persist.
    fn start_new_run(&mut self) {
        self.arena = Arena::new(&mut self.rng, config::START_ENEMIES);
        self.scores = ScoreBoard::new();
        self.level = 1;
        self.level_frames_left = config::LEVEL_FRAMES;
        self.particle_system.clear();
        info!("New run started");
        self.set_state(GameState::Playing);
    }

    fn update_pause_menu(&mut self, controls: &Controls, events: &mut Vec<GameEvent>) {
        if controls.pause {
            self.set_state(GameState::Playing);
            return;
        }
        if controls.menu_up {
            self.menu.cursor.up();
        }
        if controls.menu_down {
            self.menu.cursor.down();
        }
        if !controls.confirm {
            return;
        }
        match self.menu.current() {
            MenuItem::Resume => self.set_state(GameState::Playing),
            MenuItem::Shop => {
                self.shop_cursor.reset();
                self.set_state(GameState::Shop);
            }
            MenuItem::Sound => {
                self.sound_enabled = !self.sound_enabled;
                info!("Sound {}", if self.sound_enabled { "on" } else { "off" });
            }
            MenuItem::Quit => {
                // Quitting mid-run still records the score
                self.finish_run(events);
                self.set_state(GameState::Terminated);
            }
        }
    }

    fn update_shop(&mut self, controls: &Controls, events: &mut Vec<GameEvent>) {
        if controls.back {
            self.set_state(GameState::Paused);
            return;
        }
        if controls.menu_up {
            self.shop_cursor.up();
        }
        if controls.menu_down {
            self.shop_cursor.down();
        }
        if controls.confirm {
            let index = self.shop_cursor.index();
            match self.shop.purchase(index, &mut self.scores) {
                Ok(Purchase::Bought { item, price }) => {
                    info!("Bought {} for {}", item.name(), price);
                    events.push(GameEvent::Purchased { price });
                }
                Ok(Purchase::Selected(item)) => info!("Background set to {}", item.name()),
                // Not enough score: the purchase is silently refused
                Err(e) => debug_shop!("{}", e),
            }
        }
    }

    fn set_state(&mut self, next: GameState) {
        if self.state != next {
            debug_state!(self.arena.frame => "{:?} -> {:?}", self.state, next);
        }
        self.state = next;
    }

    fn spawn_effects(&mut self, events: &[GameEvent]) {
        for event in events {
            match *event {
                GameEvent::EnemyKilled { at } => self.burst(at, ORANGE, 40, 180.0, 0.6),
                GameEvent::CoinCollected { at } => self.burst(at, GOLD, 16, 90.0, 0.4),
                GameEvent::AmmoCollected { at } => self.burst(at, SKYBLUE, 12, 80.0, 0.3),
                GameEvent::PlayerHit { .. } => {
                    let at = self.arena.player_center();
                    self.burst(at, Color::new(1.0, 0.2, 0.2, 1.0), 24, 150.0, 0.5);
                }
                GameEvent::PlayerDied { at } => {
                    self.burst(at, Color::new(0.3, 0.5, 1.0, 1.0), 90, 260.0, 1.0)
                }
                _ => {}
            }
        }
    }

    fn burst(&mut self, at: Point, color: Color, count: usize, speed: f32, lifetime: f32) {
        self.particle_system
            .spawn_burst(Vec2::new(at.x, at.y), color, count, speed, lifetime);
    }
}

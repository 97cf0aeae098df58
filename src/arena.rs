use crate::collision::Aabb;
use crate::config::*;
use crate::entities::{AmmoPickup, Coin, Enemy, Player, Projectile};
use crate::score::ScoreBoard;
use crate::types::{GameEvent, Point};
use crate::{debug_collision, debug_motion, debug_score};
use rand::Rng;

/// Player input for one simulation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Steering {
    pub dx: i8, // -1 left, 1 right
    pub dy: i8, // -1 up, 1 down
    pub fire: bool,
}

/// The playfield and everything moving on it.
#[derive(Debug, Clone)]
pub struct Arena {
    pub bounds: Aabb,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    pub projectiles: Vec<Projectile>,
    pub ammo_pickup: AmmoPickup,
    pub difficulty: f32, // Global enemy speed multiplier
    pub frame: u64,
}

impl Arena {
    pub fn new<R: Rng + ?Sized>(rng: &mut R, enemy_count: usize) -> Self {
        let bounds = Aabb::new(0.0, 0.0, PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT);
        let enemies = (0..enemy_count)
            .map(|_| Enemy::spawn(rng, &bounds))
            .collect();
        let coins = (0..COIN_COUNT)
            .map(|_| Coin::spawn(rng, &bounds))
            .collect();
        Arena {
            bounds,
            player: Player::new(bounds.center()),
            enemies,
            coins,
            projectiles: Vec::new(),
            ammo_pickup: AmmoPickup::default(),
            difficulty: 1.0,
            frame: 0,
        }
    }

    /// Start a new level: player back in the middle, every enemy re-rolled at an edge,
    /// and the pack grown to `enemy_count`. Ammo and score carry over.
    pub fn reset_for_level<R: Rng + ?Sized>(&mut self, rng: &mut R, enemy_count: usize) {
        let center = self.bounds.center();
        self.player.position = center;
        self.player.prev_position = center;
        self.player.invulnerable_frames = 0;
        self.projectiles.clear();
        for enemy in self.enemies.iter_mut() {
            enemy.respawn(rng, &self.bounds);
        }
        while self.enemies.len() < enemy_count {
            self.enemies.push(Enemy::spawn(rng, &self.bounds));
        }
    }

    /// Advance the playfield one frame.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        steering: Steering,
        rng: &mut R,
        scores: &mut ScoreBoard,
        events: &mut Vec<GameEvent>,
    ) {
        self.frame += 1;

        // Phase 1: player
        self.player.tick_timers();
        self.player.steer(steering.dx, steering.dy, &self.bounds);
        if steering.fire {
            if let Some(shot) = self.player.fire() {
                self.projectiles.push(shot);
                events.push(GameEvent::ShotFired);
            }
        }

        // Phase 2: motion
        self.move_enemies(rng);
        self.move_coins(rng);
        self.move_projectiles();

        // Phase 3: collisions
        self.resolve_projectile_hits(rng, scores, events);
        self.collect_coins(scores, events);
        self.update_ammo_pickup(rng, events);
        self.resolve_player_hits(rng, scores, events);
    }

    fn move_enemies<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for (i, enemy) in self.enemies.iter_mut().enumerate() {
            enemy.motion.advance(self.difficulty);
            enemy.animation.tick();
            if enemy.motion.has_exited(&self.bounds) {
                enemy.respawn(rng, &self.bounds);
                let heading = enemy.motion.heading;
                debug_motion!(self.frame => "Enemy {} respawned heading {:?}", i, heading);
            }
        }
    }

    fn move_coins<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for coin in self.coins.iter_mut() {
            if !coin.active {
                coin.respawn_in = coin.respawn_in.saturating_sub(1);
                if coin.respawn_in == 0 {
                    coin.respawn(rng, &self.bounds);
                }
                continue;
            }
            coin.motion.advance(1.0);
            if coin.motion.has_exited(&self.bounds) {
                coin.respawn(rng, &self.bounds);
            }
        }
    }

    fn move_projectiles(&mut self) {
        let bounds = self.bounds;
        self.projectiles.retain_mut(|p| {
            p.advance();
            p.bounds().overlaps(&bounds)
        });
    }

    fn resolve_projectile_hits<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        scores: &mut ScoreBoard,
        events: &mut Vec<GameEvent>,
    ) {
        let mut i = 0;
        while i < self.projectiles.len() {
            let shot = self.projectiles[i].bounds();
            let hit = self
                .enemies
                .iter()
                .position(|enemy| shot.overlaps(&enemy.hitbox()));

            match hit {
                Some(idx) => {
                    let at = self.enemies[idx].motion.bounds().center();
                    debug_collision!(self.frame => "Shot hit enemy {} at {:?}", idx, at);
                    self.enemies[idx].respawn(rng, &self.bounds);
                    self.projectiles.swap_remove(i);
                    events.push(GameEvent::EnemyKilled { at });
                    self.award(KILL_SCORE, scores, events);
                    // swap_remove moved the next projectile into slot i
                }
                None => i += 1,
            }
        }
    }

    fn collect_coins(&mut self, scores: &mut ScoreBoard, events: &mut Vec<GameEvent>) {
        let player_box = self.player.bounds();
        let mut collected = Vec::new();
        for coin in self.coins.iter_mut() {
            if coin.active && player_box.overlaps(&coin.motion.bounds()) {
                collected.push(coin.motion.bounds().center());
                coin.collect();
            }
        }
        for at in collected {
            debug_collision!(self.frame => "Coin collected at ({:.1}, {:.1})", at.x, at.y);
            events.push(GameEvent::CoinCollected { at });
            self.award(COIN_SCORE, scores, events);
        }
    }

    fn update_ammo_pickup<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) {
        match self.ammo_pickup.bounds() {
            Some(b) if self.player.bounds().overlaps(&b) => {
                if let Some(corner) = self.ammo_pickup.take() {
                    let half = AMMO_PICKUP_SIZE / 2.0;
                    let at = corner + Point::new(half, half);
                    self.player.add_ammo(AMMO_PER_PICKUP);
                    debug_collision!(self.frame => "Ammo picked up, now {}", self.player.ammo);
                    events.push(GameEvent::AmmoCollected { at });
                }
            }
            Some(_) => {}
            None => {
                if rng.gen_bool(AMMO_SPAWN_CHANCE) {
                    self.ammo_pickup.place(rng, &self.bounds);
                }
            }
        }
    }

    fn resolve_player_hits<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        scores: &mut ScoreBoard,
        events: &mut Vec<GameEvent>,
    ) {
        if self.player.is_invulnerable() || scores.is_out_of_lives() {
            return;
        }
        let player = &self.player;
        let hit = self.enemies.iter().position(|enemy| enemy.touches(player));

        if let Some(idx) = hit {
            let lives_left = scores.lose_life();
            debug_collision!(self.frame => "Enemy {} hit the player, {} left", idx, lives_left);
            self.enemies[idx].respawn(rng, &self.bounds);
            self.player.invulnerable_frames = INVULNERABLE_FRAMES;
            events.push(GameEvent::PlayerHit { lives_left });
        }
    }

    fn award(&self, points: u32, scores: &mut ScoreBoard, events: &mut Vec<GameEvent>) {
        if let Some(lives) = scores.add_points(points) {
            debug_score!(self.frame => "Extra life, now {}", lives);
            events.push(GameEvent::ExtraLife { lives });
        }
        debug_score!(self.frame => "+{} -> {}", points, scores.score());
    }

    pub fn player_center(&self) -> Point {
        self.player.position
    }
}

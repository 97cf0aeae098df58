use crate::collision::{Aabb, circle_hits_square};
use crate::config::*;
use crate::motion::EdgeMotion;
use crate::types::Point;
use crate::utils;
use rand::Rng;

/// The circle the player steers.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub position: Point, // Center
    pub prev_position: Point,
    pub radius: f32,
    pub facing: Point, // Unit vector, last direction moved
    pub ammo: u32,
    pub shot_cooldown: u32,      // Frames until the next shot is allowed
    pub invulnerable_frames: u32, // Frames of grace after losing a life
}

impl Player {
    pub fn new(center: Point) -> Self {
        Player {
            position: center,
            prev_position: center,
            radius: PLAYER_RADIUS,
            facing: Point::new(0.0, -1.0),
            ammo: START_AMMO,
            shot_cooldown: 0,
            invulnerable_frames: 0,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_circle(self.position, self.radius)
    }

    /// Move by `PLAYER_SPEED` along each requested axis and keep the circle on screen.
    pub fn steer(&mut self, dx: i8, dy: i8, screen: &Aabb) {
        self.prev_position = self.position;
        if dx != 0 || dy != 0 {
            let dir = Point::new(dx as f32, dy as f32);
            self.facing = dir * (1.0 / dir.length());
        }
        let moved = self.position + Point::new(dx as f32, dy as f32) * PLAYER_SPEED;
        let r = self.radius;
        self.position = Point::new(
            utils::clamp(moved.x, screen.x + r, screen.right() - r),
            utils::clamp(moved.y, screen.y + r, screen.bottom() - r),
        );
    }

    /// Count down per-frame timers.
    pub fn tick_timers(&mut self) {
        self.shot_cooldown = self.shot_cooldown.saturating_sub(1);
        self.invulnerable_frames = self.invulnerable_frames.saturating_sub(1);
    }

    pub fn can_fire(&self) -> bool {
        self.ammo > 0 && self.shot_cooldown == 0
    }

    /// Spend one round and return the projectile, or `None` if out of ammo or cooling down.
    pub fn fire(&mut self) -> Option<Projectile> {
        if !self.can_fire() {
            return None;
        }
        self.ammo -= 1;
        self.shot_cooldown = SHOT_COOLDOWN_FRAMES;
        Some(Projectile::new(self.position, self.facing * PROJECTILE_SPEED))
    }

    pub fn add_ammo(&mut self, amount: u32) {
        self.ammo = (self.ammo + amount).min(MAX_AMMO);
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_frames > 0
    }
}

/// Sprite animation cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Animation {
    pub frame: u8,
    ticks: u32,
}

impl Animation {
    pub fn tick(&mut self) {
        self.ticks += 1;
        if self.ticks >= ANIM_TICKS_PER_FRAME {
            self.ticks = 0;
            self.frame = (self.frame + 1) % ENEMY_ANIM_FRAMES;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub motion: EdgeMotion,
    pub animation: Animation,
}

impl Enemy {
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, screen: &Aabb) -> Self {
        Enemy {
            motion: EdgeMotion::spawn(rng, ENEMY_SIZE, ENEMY_SPEED, screen),
            animation: Animation::default(),
        }
    }

    pub fn respawn<R: Rng + ?Sized>(&mut self, rng: &mut R, screen: &Aabb) {
        self.motion.respawn(rng, ENEMY_SPEED, screen);
    }

    /// Collision box, smaller than the drawn sprite.
    pub fn hitbox(&self) -> Aabb {
        self.motion.bounds().shrunk(HITBOX_SCALE)
    }

    /// Contact with the player's circle.
    pub fn touches(&self, player: &Player) -> bool {
        circle_hits_square(
            player.position,
            player.radius,
            &self.motion.bounds(),
            HITBOX_SCALE,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Coin {
    pub motion: EdgeMotion,
    pub active: bool,
    pub respawn_in: u32, // Frames left while inactive
}

impl Coin {
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, screen: &Aabb) -> Self {
        Coin {
            motion: EdgeMotion::spawn(rng, COIN_SIZE, COIN_SPEED, screen),
            active: true,
            respawn_in: 0,
        }
    }

    pub fn respawn<R: Rng + ?Sized>(&mut self, rng: &mut R, screen: &Aabb) {
        self.motion.respawn(rng, COIN_SPEED, screen);
        self.active = true;
        self.respawn_in = 0;
    }

    /// Take the coin off the field until its respawn delay runs out.
    pub fn collect(&mut self) {
        self.active = false;
        self.respawn_in = COIN_RESPAWN_FRAMES;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub position: Point, // Center
    pub prev_position: Point,
    pub velocity: Point,
    pub angle: f32, // Degrees, for drawing the rotated shot
}

impl Projectile {
    pub fn new(position: Point, velocity: Point) -> Self {
        Projectile {
            position,
            prev_position: position,
            velocity,
            angle: velocity.angle_degrees(),
        }
    }

    pub fn advance(&mut self) {
        self.prev_position = self.position;
        self.position = self.position + self.velocity;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::centered(self.position, PROJECTILE_SIZE)
    }
}

/// Ammo crate. At most one is on the field at a time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AmmoPickup {
    pub position: Option<Point>, // Top-left corner
}

impl AmmoPickup {
    pub fn bounds(&self) -> Option<Aabb> {
        self.position.map(|p| Aabb::square(p, AMMO_PICKUP_SIZE))
    }

    /// Drop the pickup at a random spot fully inside the screen.
    pub fn place<R: Rng + ?Sized>(&mut self, rng: &mut R, screen: &Aabb) {
        let max_x = (screen.w - AMMO_PICKUP_SIZE).max(0.0);
        let max_y = (screen.h - AMMO_PICKUP_SIZE).max(0.0);
        self.position = Some(Point::new(
            screen.x + rng.gen_range(0.0..=max_x),
            screen.y + rng.gen_range(0.0..=max_y),
        ));
    }

    pub fn take(&mut self) -> Option<Point> {
        self.position.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn screen() -> Aabb {
        Aabb::new(0.0, 0.0, PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT)
    }

    #[test]
    fn test_player_steer_and_clamp() {
        let mut player = Player::new(Point::new(400.0, 300.0));
        player.steer(1, 0, &screen());
        assert_approx_eq!(player.position.x, 405.0);
        assert_approx_eq!(player.prev_position.x, 400.0);
        assert_eq!(player.facing, Point::new(1.0, 0.0));

        player.position = Point::new(PLAYER_RADIUS + 2.0, PLAYER_RADIUS + 2.0);
        player.steer(-1, -1, &screen());
        assert_approx_eq!(player.position.x, PLAYER_RADIUS);
        assert_approx_eq!(player.position.y, PLAYER_RADIUS);
        assert_approx_eq!(player.facing.length(), 1.0, 1e-5);
    }

    #[test]
    fn test_player_standing_still_keeps_facing() {
        let mut player = Player::new(Point::new(400.0, 300.0));
        player.steer(0, 1, &screen());
        player.steer(0, 0, &screen());
        assert_eq!(player.facing, Point::new(0.0, 1.0));
    }

    #[test]
    fn test_player_fire_uses_ammo_and_cooldown() {
        let mut player = Player::new(Point::new(400.0, 300.0));
        player.ammo = 2;
        let shot = player.fire().expect("should fire");
        assert_eq!(player.ammo, 1);
        assert_approx_eq!(shot.velocity.y, -PROJECTILE_SPEED);
        assert_approx_eq!(shot.angle, 270.0, 1e-3);
        assert!(player.fire().is_none(), "cooldown must block");

        for _ in 0..SHOT_COOLDOWN_FRAMES {
            player.tick_timers();
        }
        assert!(player.fire().is_some());
        assert_eq!(player.ammo, 0);
        for _ in 0..SHOT_COOLDOWN_FRAMES {
            player.tick_timers();
        }
        assert!(player.fire().is_none(), "no ammo left");
    }

    #[test]
    fn test_add_ammo_caps() {
        let mut player = Player::new(Point::new(0.0, 0.0));
        player.ammo = MAX_AMMO - 1;
        player.add_ammo(AMMO_PER_PICKUP);
        assert_eq!(player.ammo, MAX_AMMO);
    }

    #[test]
    fn test_animation_cycles() {
        let mut anim = Animation::default();
        for _ in 0..ANIM_TICKS_PER_FRAME {
            anim.tick();
        }
        assert_eq!(anim.frame, 1);
        for _ in 0..ANIM_TICKS_PER_FRAME * (ENEMY_ANIM_FRAMES as u32 - 1) {
            anim.tick();
        }
        assert_eq!(anim.frame, 0);
    }

    #[test]
    fn test_enemy_hitbox_is_shrunk() {
        let mut rng = StdRng::seed_from_u64(1);
        let enemy = Enemy::spawn(&mut rng, &screen());
        let hb = enemy.hitbox();
        assert_approx_eq!(hb.w, ENEMY_SIZE * HITBOX_SCALE);
        assert_approx_eq!(hb.center().x, enemy.motion.bounds().center().x);
    }

    #[test]
    fn test_enemy_touches_player_through_hitbox() {
        let player = Player::new(Point::new(100.0, 100.0));
        let mut rng = StdRng::seed_from_u64(3);
        let mut enemy = Enemy::spawn(&mut rng, &screen());
        enemy.motion.position = Point::new(85.0, 85.0);
        assert!(enemy.touches(&player));
        // Drawn box overlaps the circle's bbox by 2px, the hitbox is inset by 3px
        enemy.motion.position = Point::new(100.0 + PLAYER_RADIUS - 2.0, 85.0);
        assert!(!enemy.touches(&player));
    }

    #[test]
    fn test_coin_collect_and_respawn() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut coin = Coin::spawn(&mut rng, &screen());
        coin.collect();
        assert!(!coin.active);
        assert_eq!(coin.respawn_in, COIN_RESPAWN_FRAMES);
        coin.respawn(&mut rng, &screen());
        assert!(coin.active);
        assert_eq!(coin.respawn_in, 0);
    }

    #[test]
    fn test_ammo_pickup_placed_inside() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut pickup = AmmoPickup::default();
        assert!(pickup.bounds().is_none());
        for _ in 0..100 {
            pickup.place(&mut rng, &screen());
            let b = pickup.bounds().unwrap();
            assert!(screen().contains(&b));
        }
        assert!(pickup.take().is_some());
        assert!(pickup.position.is_none());
    }

    #[test]
    fn test_projectile_advance() {
        let mut p = Projectile::new(Point::new(10.0, 10.0), Point::new(10.0, 0.0));
        p.advance();
        assert_approx_eq!(p.position.x, 20.0);
        assert_approx_eq!(p.prev_position.x, 10.0);
        assert_approx_eq!(p.bounds().w, PROJECTILE_SIZE);
    }
}

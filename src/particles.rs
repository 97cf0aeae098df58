use macroquad::prelude::{Color, Vec2};
use rand::Rng;

// A single spark, positions in playfield pixels
#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec2,
    pub prev_position: Vec2,
    velocity: Vec2, // Pixels per second
    pub color: Color,
    lifetime: f32, // Time remaining in seconds
    initial_lifetime: f32,
}

impl Particle {
    fn new(position: Vec2, velocity: Vec2, color: Color, lifetime: f32) -> Self {
        Particle {
            position,
            prev_position: position,
            velocity,
            color,
            lifetime,
            initial_lifetime: lifetime,
        }
    }

    fn update(&mut self, dt: f32) {
        self.prev_position = self.position;
        self.position += self.velocity * dt;
        self.lifetime -= dt;

        // Fade out
        self.color.a = (self.lifetime / self.initial_lifetime).max(0.0);
    }

    fn is_alive(&self) -> bool {
        self.lifetime > 0.0
    }
}

/// Cosmetic bursts for kills, pickups and deaths.
#[derive(Debug, Default)]
pub struct ParticleSystem {
    pub particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        ParticleSystem {
            particles: Vec::new(),
        }
    }

    /// Spawn `count` particles flying out of `position` in random directions.
    pub fn spawn_burst(
        &mut self,
        position: Vec2,
        base_color: Color,
        count: usize,
        max_speed: f32,
        lifetime: f32,
    ) {
        let mut rng = rand::thread_rng();
        for _ in 0..count {
            let angle = rng.r#gen::<f32>() * std::f32::consts::TAU;
            let speed = rng.r#gen::<f32>() * max_speed;
            let velocity = Vec2::new(angle.cos() * speed, angle.sin() * speed);
            let particle_lifetime = lifetime * (0.5 + rng.r#gen::<f32>() * 0.5);
            let particle = Particle::new(position, velocity, base_color, particle_lifetime);
            self.particles.push(particle);
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.particles.retain_mut(|p| {
            p.update(dt);
            p.is_alive()
        });
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

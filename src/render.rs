use crate::collision::Aabb;
use crate::config::{FRAME_RATE, PROJECTILE_SIZE};
use crate::game::{Game, GameState};
use crate::layout::Layout;
use crate::menu::MenuItem;
use crate::shop::Background;
use crate::sprites::Sprites;
use crate::types::Point;
use crate::utils;
use macroquad::prelude::*;
use std::path::Path;

const PANEL_COLOR: Color = Color::new(0.06, 0.06, 0.09, 1.0);
const PANEL_EDGE: Color = Color::new(0.3, 0.3, 0.4, 1.0);
const STAR_COUNT: u32 = 120;

fn faded_color(mut color: Color, alpha: f32) -> Color {
    color.a *= alpha;
    color
}

// Cheap deterministic hash so stars stay put between frames
fn star_hash(i: u32, salt: u32) -> f32 {
    let mut x = i.wrapping_mul(0x9E37_79B9) ^ salt.wrapping_mul(0x85EB_CA6B);
    x ^= x >> 15;
    x = x.wrapping_mul(0x2C1B_3C6D);
    x ^= x >> 12;
    (x % 10_000) as f32 / 10_000.0
}

// Handles rendering the game state using macroquad
pub struct Renderer {
    sprites: Option<Sprites>,
    title_font: Option<Font>,
    ui_font: Option<Font>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            sprites: None,
            title_font: None,
            ui_font: None,
        }
    }

    /// Load sprites and fonts. Missing fonts fall back to macroquad's built-in one.
    pub async fn load_assets(&mut self, assets_dir: &Path) {
        self.sprites = Some(Sprites::load(assets_dir).await);

        let title = assets_dir.join("title.ttf");
        match load_ttf_font(&title.to_string_lossy()).await {
            Ok(font) => self.title_font = Some(font),
            Err(e) => log::warn!("Failed to load font {}: {}", title.display(), e),
        }
        let ui = assets_dir.join("default.ttf");
        match load_ttf_font(&ui.to_string_lossy()).await {
            Ok(font) => self.ui_font = Some(font),
            Err(e) => log::warn!("Failed to load UI font {}: {}", ui.display(), e),
        }
    }

    pub fn draw_frame(&mut self, game: &Game) {
        let layout = Layout::compute(screen_width(), screen_height());
        let alpha = game.interpolation_alpha();
        clear_background(BLACK);

        Self::draw_background(&layout, game.shop.selected());
        self.draw_coins(game, &layout, alpha);
        self.draw_ammo_pickup(game, &layout);
        self.draw_enemies(game, &layout, alpha);
        Self::draw_projectiles(game, &layout, alpha);
        match game.state {
            GameState::Dead { .. } | GameState::GameOver { .. } => {}
            _ => self.draw_player(game, &layout, alpha),
        }
        Self::draw_particles(game, &layout);

        self.draw_left_panel(game, &layout);
        self.draw_right_panel(game, &layout);

        match game.state {
            GameState::Paused => self.draw_pause_menu(game),
            GameState::Shop => self.draw_shop(game),
            GameState::LevelComplete { .. } => {
                self.draw_announcement(&format!("Level {} complete!", game.level), "Get ready...")
            }
            GameState::GameOver { rank } => {
                let headline = match rank {
                    Some(r) => format!("Game Over - #{} with {}", r, game.scores.score()),
                    None => format!("Game Over - score {}", game.scores.score()),
                };
                self.draw_announcement(&headline, "R to play again, Q to quit");
            }
            GameState::Playing | GameState::Dead { .. } | GameState::Terminated => {}
        }
    }

    fn draw_background(layout: &Layout, background: Background) {
        let pf = layout.playfield;
        match background {
            Background::Starfield => {
                draw_rectangle(pf.x, pf.y, pf.w, pf.h, BLACK);
                for i in 0..STAR_COUNT {
                    let x = pf.x + star_hash(i, 1) * pf.w;
                    let y = pf.y + star_hash(i, 2) * pf.h;
                    let r = 0.5 + star_hash(i, 3) * 1.5;
                    let color = faded_color(WHITE, 0.4 + star_hash(i, 4) * 0.6);
                    draw_circle(x, y, layout.scaled(r), color);
                }
            }
            Background::Nebula => {
                draw_rectangle(pf.x, pf.y, pf.w, pf.h, Color::new(0.05, 0.02, 0.1, 1.0));
                for i in 0..6 {
                    let x = pf.x + star_hash(i, 11) * pf.w;
                    let y = pf.y + star_hash(i, 12) * pf.h;
                    let r = layout.scaled(80.0 + star_hash(i, 13) * 120.0);
                    draw_circle(x, y, r, Color::new(0.5, 0.1, 0.6, 0.12));
                    draw_circle(x, y, r * 0.5, Color::new(0.2, 0.3, 0.8, 0.12));
                }
            }
            Background::Sunset => {
                let bands = 12;
                let band_h = pf.h / bands as f32;
                for i in 0..bands {
                    let t = i as f32 / (bands - 1) as f32;
                    let color = Color::new(0.9 - 0.6 * t, 0.45 - 0.35 * t, 0.2 + 0.25 * t, 1.0);
                    draw_rectangle(pf.x, pf.y + i as f32 * band_h, pf.w, band_h + 1.0, color);
                }
            }
            Background::Grid => {
                draw_rectangle(pf.x, pf.y, pf.w, pf.h, Color::new(0.02, 0.04, 0.06, 1.0));
                let grid_color = Color::new(0.1, 0.6, 0.5, 0.35);
                let step = layout.scaled(40.0);
                let mut x = pf.x;
                while x <= pf.right() {
                    draw_line(x, pf.y, x, pf.bottom(), 1.0, grid_color);
                    x += step;
                }
                let mut y = pf.y;
                while y <= pf.bottom() {
                    draw_line(pf.x, y, pf.right(), y, 1.0, grid_color);
                    y += step;
                }
            }
        }
        draw_rectangle_lines(pf.x, pf.y, pf.w, pf.h, 2.0, GRAY);
    }

    // Draws `texture` scaled to `size`, or a flat square when sprites are not loaded
    fn draw_sprite(
        texture: Option<&Texture2D>,
        layout: &Layout,
        top_left: Point,
        size: f32,
        fallback: Color,
    ) {
        let p = layout.to_screen(top_left);
        let s = layout.scaled(size);
        match texture {
            Some(t) => draw_texture_ex(
                t,
                p.x,
                p.y,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(s, s)),
                    ..Default::default()
                },
            ),
            None => draw_rectangle(p.x, p.y, s, s, fallback),
        }
    }

    fn draw_enemies(&self, game: &Game, layout: &Layout, alpha: f32) {
        for enemy in &game.arena.enemies {
            let m = &enemy.motion;
            let pos = utils::lerp_point(m.prev_position, m.position, alpha);
            let texture = self
                .sprites
                .as_ref()
                .map(|s| s.enemy_frame(enemy.animation.frame));
            Self::draw_sprite(texture, layout, pos, m.size, RED);
        }
    }

    fn draw_coins(&self, game: &Game, layout: &Layout, alpha: f32) {
        for coin in game.arena.coins.iter().filter(|c| c.active) {
            let m = &coin.motion;
            let pos = utils::lerp_point(m.prev_position, m.position, alpha);
            let texture = self.sprites.as_ref().map(|s| &s.coin);
            Self::draw_sprite(texture, layout, pos, m.size, GOLD);
        }
    }

    fn draw_ammo_pickup(&self, game: &Game, layout: &Layout) {
        if let Some(b) = game.arena.ammo_pickup.bounds() {
            let texture = self.sprites.as_ref().map(|s| &s.ammo);
            Self::draw_sprite(texture, layout, Point::new(b.x, b.y), b.w, GREEN);
        }
    }

    fn draw_player(&self, game: &Game, layout: &Layout, alpha: f32) {
        let player = &game.arena.player;
        // Blink while invulnerable
        if player.is_invulnerable() && (player.invulnerable_frames / 6) % 2 == 0 {
            return;
        }
        let center = utils::lerp_point(player.prev_position, player.position, alpha);
        let top_left = center - Point::new(player.radius, player.radius);
        let texture = self.sprites.as_ref().map(|s| &s.player);
        Self::draw_sprite(texture, layout, top_left, player.radius * 2.0, BLUE);

        // Facing marker
        let c = layout.to_screen(center);
        let tip = layout.to_screen(center + player.facing * (player.radius + 6.0));
        draw_line(c.x, c.y, tip.x, tip.y, 2.0, LIGHTGRAY);
    }

    fn draw_projectiles(game: &Game, layout: &Layout, alpha: f32) {
        let len = layout.scaled(PROJECTILE_SIZE * 2.0);
        let thickness = layout.scaled(PROJECTILE_SIZE / 2.0);
        for projectile in &game.arena.projectiles {
            let pos = utils::lerp_point(projectile.prev_position, projectile.position, alpha);
            let p = layout.to_screen(pos);
            draw_rectangle_ex(
                p.x,
                p.y,
                len,
                thickness,
                DrawRectangleParams {
                    offset: vec2(0.5, 0.5),
                    rotation: projectile.angle.to_radians(),
                    color: YELLOW,
                },
            );
        }
    }

    fn draw_particles(game: &Game, layout: &Layout) {
        for particle in &game.particle_system.particles {
            let p = layout.to_screen(Point::new(particle.position.x, particle.position.y));
            draw_circle(p.x, p.y, layout.scaled(2.0), particle.color);
        }
    }

    fn text_params(&self, size: f32, color: Color) -> TextParams<'_> {
        TextParams {
            font: self.ui_font.as_ref(),
            font_size: size as u16,
            color,
            ..Default::default()
        }
    }

    fn draw_panel_frame(panel: &Aabb) {
        draw_rectangle(panel.x, panel.y, panel.w, panel.h, PANEL_COLOR);
        draw_line(panel.x, panel.y, panel.x, panel.bottom(), 1.0, PANEL_EDGE);
        let right = panel.right();
        draw_line(right, panel.y, right, panel.bottom(), 1.0, PANEL_EDGE);
    }

    fn draw_left_panel(&self, game: &Game, layout: &Layout) {
        let panel = layout.left_panel;
        Self::draw_panel_frame(&panel);
        if panel.w < 40.0 {
            return;
        }
        let x = panel.x + 16.0;
        let mut y = 40.0;

        let title_params = TextParams {
            font: self.title_font.as_ref(),
            font_size: 26,
            color: WHITE,
            ..Default::default()
        };
        draw_text_ex("Circle vs", x, y, title_params.clone());
        y += 28.0;
        draw_text_ex("Square", x, y, title_params);
        y += 40.0;

        let label = self.text_params(18.0, LIGHTGRAY);
        let value = self.text_params(24.0, WHITE);
        let stat = |name: &str, text: String, y: &mut f32| {
            draw_text_ex(name, x, *y, label.clone());
            *y += 26.0;
            draw_text_ex(&text, x, *y, value.clone());
            *y += 34.0;
        };

        stat("SCORE", game.scores.score().to_string(), &mut y);
        stat("LIVES", "o ".repeat(game.scores.lives() as usize), &mut y);
        stat("AMMO", game.arena.player.ammo.to_string(), &mut y);
        if game.is_endless() {
            stat("SPEED", format!("x{:.2}", game.arena.difficulty), &mut y);
        } else {
            let seconds = game.level_frames_left / FRAME_RATE;
            stat("LEVEL", format!("{}  ({}s)", game.level, seconds), &mut y);
        }
    }

    fn draw_right_panel(&self, game: &Game, layout: &Layout) {
        let panel = layout.right_panel;
        Self::draw_panel_frame(&panel);
        if panel.w < 40.0 {
            return;
        }
        let x = panel.x + 16.0;
        let mut y = 40.0;

        draw_text_ex("HIGH SCORES", x, y, self.text_params(20.0, GOLD));
        y += 32.0;
        if game.high_scores.is_empty() {
            draw_text_ex("none yet", x, y, self.text_params(18.0, GRAY));
            y += 26.0;
        }
        for (i, score) in game.high_scores.scores().iter().enumerate() {
            let text = format!("{}. {}", i + 1, score);
            draw_text_ex(&text, x, y, self.text_params(20.0, WHITE));
            y += 26.0;
        }

        y += 30.0;
        let help = self.text_params(16.0, GRAY);
        for line in [
            "Arrows/WASD  move",
            "Space        shoot",
            "P / Esc      pause",
        ] {
            draw_text_ex(line, x, y, help.clone());
            y += 20.0;
        }

        let fps_text = format!("FPS: {}", get_fps());
        let fps_y = panel.bottom() - 16.0;
        draw_text_ex(&fps_text, x, fps_y, self.text_params(16.0, DARKGRAY));
    }

    fn draw_list(&self, title: &str, items: &[(String, Color)], selected: usize, hint: &str) {
        let rect_width = 420.0;
        let rect_height = 90.0 + items.len() as f32 * 34.0;
        let x = screen_width() / 2.0 - rect_width / 2.0;
        let y = screen_height() / 2.0 - rect_height / 2.0;
        let backdrop = Color::from_rgba(0, 0, 0, 200);
        draw_rectangle(x, y, rect_width, rect_height, backdrop);
        draw_rectangle_lines(x, y, rect_width, rect_height, 2.0, PANEL_EDGE);

        draw_text_ex(title, x + 24.0, y + 40.0, self.text_params(30.0, WHITE));
        for (i, (label, color)) in items.iter().enumerate() {
            let line_y = y + 80.0 + i as f32 * 34.0;
            let marker = if i == selected { "> " } else { "  " };
            let text = format!("{}{}", marker, label);
            draw_text_ex(&text, x + 30.0, line_y, self.text_params(24.0, *color));
        }
        let hint_y = y + rect_height - 12.0;
        draw_text_ex(hint, x + 24.0, hint_y, self.text_params(16.0, GRAY));
    }

    fn draw_pause_menu(&self, game: &Game) {
        let items: Vec<(String, Color)> = MenuItem::ALL
            .iter()
            .map(|item| (item.label(game.sound_enabled).to_string(), WHITE))
            .collect();
        let selected = game.menu.cursor.index();
        self.draw_list("Paused", &items, selected, "Enter select, P resume");
    }

    fn draw_shop(&self, game: &Game) {
        let items: Vec<(String, Color)> = Background::ALL
            .iter()
            .map(|bg| {
                let (status, color) = if game.shop.selected() == *bg {
                    ("in use".to_string(), GREEN)
                } else if game.shop.owns(*bg) {
                    ("owned".to_string(), WHITE)
                } else if bg.price() <= game.scores.score() {
                    (format!("{} pts", bg.price()), WHITE)
                } else {
                    (format!("{} pts", bg.price()), GRAY)
                };
                (format!("{:<10} {}", bg.name(), status), color)
            })
            .collect();
        let title = format!("Shop  ({} pts)", game.scores.score());
        let selected = game.shop_cursor.index();
        self.draw_list(&title, &items, selected, "Enter buy/select, Esc back");
    }

    fn draw_announcement(&self, msg: &str, hint: &str) {
        let rect_width = 560.0;
        let rect_height = 120.0;
        let x = (screen_width() / 2.0) - (rect_width / 2.0);
        let y = (screen_height() / 2.0) - (rect_height / 2.0);
        let backdrop = Color::from_rgba(0, 0, 0, 180);
        draw_rectangle(x, y, rect_width, rect_height, backdrop);
        let font = self.ui_font.as_ref();

        let msg_size = 32.0;
        let msg_params = self.text_params(msg_size, WHITE);
        let msg_dims = measure_text(msg, font, msg_params.font_size, 1.0);
        let msg_x = x + (rect_width - msg_dims.width) / 2.0;
        let msg_y = y + (rect_height - msg_size) / 2.0 + msg_size * 0.7;
        draw_text_ex(msg, msg_x, msg_y, msg_params);

        let hint_size = 18.0;
        let hint_params = self.text_params(hint_size, LIGHTGRAY);
        let hint_dims = measure_text(hint, font, hint_params.font_size, 1.0);
        let hint_x = x + (rect_width - hint_dims.width) / 2.0;
        let hint_y = y + rect_height - hint_size - 10.0;
        draw_text_ex(hint, hint_x, hint_y, hint_params);
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_hash_in_unit_range_and_stable() {
        for i in 0..STAR_COUNT {
            let h = star_hash(i, 7);
            assert!((0.0..1.0).contains(&h));
            assert_eq!(h, star_hash(i, 7));
        }
        assert_ne!(star_hash(1, 1), star_hash(1, 2));
    }

    #[test]
    fn test_faded_color() {
        let c = faded_color(Color::new(1.0, 1.0, 1.0, 0.8), 0.5);
        assert!((c.a - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_stars_land_inside_playfield() {
        let layout = Layout::compute(1920.0, 1080.0);
        let pf = layout.playfield;
        for i in 0..STAR_COUNT {
            let x = pf.x + star_hash(i, 1) * pf.w;
            let y = pf.y + star_hash(i, 2) * pf.h;
            assert!(pf.contains(&Aabb::new(x, y, 0.0, 0.0)));
        }
    }
}

use circle_vs_square::config::{self, Settings};
use circle_vs_square::entities::Enemy;
use circle_vs_square::game::{Controls, Game, GameState};
use circle_vs_square::highscores::HighScores;
use circle_vs_square::motion::EdgeMotion;
use circle_vs_square::types::{Direction, GameEvent, Point};
use std::path::PathBuf;

fn scores_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "circle_vs_square_session_{}_{}.txt",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    path
}

fn settings(name: &str, seed: u64) -> Settings {
    Settings {
        muted: true,
        seed: Some(seed),
        scores_file: scores_path(name),
        ..Default::default()
    }
}

fn enemy_at(center: Point) -> Enemy {
    let half = config::ENEMY_SIZE / 2.0;
    let pos = Point::new(center.x - half, center.y - half);
    Enemy {
        motion: EdgeMotion {
            position: pos,
            prev_position: pos,
            velocity: Point::default(),
            heading: Direction::Left,
            size: config::ENEMY_SIZE,
        },
        animation: Default::default(),
    }
}

fn run_until_game_over(game: &mut Game) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..10_000 {
        if matches!(game.state, GameState::GameOver { .. }) {
            return events;
        }
        if game.state == GameState::Playing {
            game.arena.player.invulnerable_frames = 0;
            game.arena.enemies = vec![enemy_at(game.arena.player.position)];
            game.arena.coins.clear();
        }
        events.extend(game.tick(&Controls::default()));
    }
    panic!("run never ended");
}

#[test]
fn same_seed_replays_the_same_run() {
    let controls = Controls {
        right: true,
        fire: true,
        ..Default::default()
    };
    let mut a = Game::new(settings("seed_a", 99));
    let mut b = Game::new(settings("seed_b", 99));
    for _ in 0..300 {
        a.tick(&controls);
        b.tick(&controls);
    }
    assert_eq!(a.state, b.state);
    assert_eq!(a.scores.score(), b.scores.score());
    assert_eq!(a.arena.enemies.len(), b.arena.enemies.len());
    for (ea, eb) in a.arena.enemies.iter().zip(&b.arena.enemies) {
        assert_eq!(ea.motion.position, eb.motion.position);
    }
    assert_eq!(a.arena.player.ammo, b.arena.player.ammo);
}

#[test]
fn first_shot_spends_ammo() {
    let mut game = Game::new(settings("shot", 5));
    game.arena.enemies.clear();
    let events = game.tick(&Controls {
        fire: true,
        ..Default::default()
    });
    assert!(events.contains(&GameEvent::ShotFired));
    assert_eq!(game.arena.player.ammo, config::START_AMMO - 1);
    assert_eq!(game.arena.projectiles.len(), 1);
}

#[test]
fn finished_runs_are_recorded_across_sessions() {
    let mut first = Game::new(settings("persist", 7));
    let path = scores_path("persist");
    first.scores.add_points(12);
    let events = run_until_game_over(&mut first);
    assert!(events.contains(&GameEvent::GameOver {
        score: 12,
        rank: Some(1)
    }));

    // Replay, lose again with a lower score
    first.tick(&Controls {
        replay: true,
        ..Default::default()
    });
    assert_eq!(first.state, GameState::Playing);
    first.scores.add_points(3);
    run_until_game_over(&mut first);
    assert_eq!(first.state, GameState::GameOver { rank: Some(2) });

    let on_disk = HighScores::load(&path).expect("scores file readable");
    assert_eq!(on_disk.scores(), &[12, 3]);

    let second = Game::new(Settings {
        scores_file: path.clone(),
        ..settings("persist_reload", 8)
    });
    assert_eq!(second.high_scores.best(), Some(12));
    let _ = std::fs::remove_file(&path);
}

/// Session lifecycle: construction, lives, game over, victory and restart.
///
/// ```text
///   Playing ──(lives reach 0)──────▶ GameOver ──(restart)──▶ Playing
///      │ ▲
///      │ └── non-fatal hit
///      └──(last enemy killed)──▶ Won ──(restart)──▶ Playing
/// ```
///
/// Enemies only come back to life through a restart.

use log::{debug, info};

use crate::config::Config;
use crate::entities::{
    Barrier, DamageLevel, Enemy, EnemyKind, GameEvent, GameStatus, Player, Rect, Session,
};
use crate::error::ConfigError;
use crate::pool::BulletPool;

// ── Initial layout ───────────────────────────────────────────────────────────

/// Row-major formation grid, every enemy alive, anchored at the left padding.
pub fn layout_enemies(cfg: &Config) -> Vec<Enemy> {
    (0..cfg.enemy_count())
        .map(|i| {
            let row = i / cfg.enemy_columns;
            let col = i % cfg.enemy_columns;
            Enemy {
                rect: Rect::new(
                    cfg.screen_padding + col as f32 * (cfg.enemy_width + cfg.enemy_spacing),
                    cfg.formation_top + row as f32 * (cfg.enemy_height + cfg.enemy_spacing),
                    cfg.enemy_width,
                    cfg.enemy_height,
                ),
                alive: true,
                kind: EnemyKind::for_row(row),
            }
        })
        .collect()
}

/// Barriers evenly spread across the screen width, all undamaged.
pub fn layout_barriers(cfg: &Config) -> Vec<Barrier> {
    let count = cfg.barrier_count as f32;
    let gap = ((cfg.screen_width - count * cfg.barrier_width) / (count + 1.0)).max(0.0);
    (0..cfg.barrier_count)
        .map(|i| Barrier {
            rect: Rect::new(
                (i + 1) as f32 * gap + i as f32 * cfg.barrier_width,
                cfg.barrier_top,
                cfg.barrier_width,
                cfg.barrier_height,
            ),
            damage: DamageLevel::New,
        })
        .collect()
}

/// Player centred at the bottom of the screen, ready to shoot.
pub fn spawn_player(cfg: &Config) -> Player {
    Player {
        rect: Rect::new(
            (cfg.screen_width - cfg.player_width) / 2.0,
            cfg.screen_height - cfg.player_height - cfg.player_bottom_margin,
            cfg.player_width,
            cfg.player_height,
        ),
        shooting_cooldown: 0.0,
        velocity: 0.0,
    }
}

impl Session {
    /// Validate `config` and lay out a fresh session in the `Playing` state.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let bullets =
            BulletPool::new(config.bullet_capacity, config.bullet_width, config.bullet_height)?;
        let session = Self {
            player: spawn_player(&config),
            enemies: layout_enemies(&config),
            barriers: layout_barriers(&config),
            bullets,
            score: 0,
            lives: config.starting_lives,
            moving_row: 0,
            shift_direction: 1,
            frame_counter: 0,
            animation_frame: 0,
            status: GameStatus::Playing,
            config,
        };
        info!(
            "session started: {} enemies, {} barriers, {} lives",
            session.enemies.len(),
            session.barriers.len(),
            session.lives
        );
        Ok(session)
    }

    /// Full reinitialization back to the state `Session::new` produced.
    pub fn restart(&mut self) {
        self.player = spawn_player(&self.config);
        self.enemies = layout_enemies(&self.config);
        self.barriers = layout_barriers(&self.config);
        self.bullets.clear();
        self.score = 0;
        self.lives = self.config.starting_lives;
        self.moving_row = 0;
        self.shift_direction = 1;
        self.frame_counter = 0;
        self.animation_frame = 0;
        self.status = GameStatus::Playing;
        info!("session restarted");
    }
}

// ── Transitions ──────────────────────────────────────────────────────────────

/// Take one life. Entering zero lives ends the game.
pub fn player_hit(session: &mut Session, events: &mut Vec<GameEvent>) {
    session.lives = session.lives.saturating_sub(1);
    events.push(GameEvent::PlayerHit {
        lives_left: session.lives,
    });

    if session.lives == 0 {
        session.status = GameStatus::GameOver;
        info!("game over, final score {}", session.score);
        events.push(GameEvent::GameOver {
            score: session.score,
        });
    } else {
        debug!("player hit, {} lives left", session.lives);
    }
}

/// End the session as a win once no enemy is left alive.
pub fn check_formation_cleared(session: &mut Session, events: &mut Vec<GameEvent>) -> bool {
    if session.is_finished() || session.enemies.iter().any(|e| e.alive) {
        return false;
    }
    session.status = GameStatus::Won;
    info!("formation cleared, final score {}", session.score);
    events.push(GameEvent::FormationCleared {
        score: session.score,
    });
    true
}

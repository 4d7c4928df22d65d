/// Read-only view of a session for renderers and status text.

use serde::Serialize;

use crate::entities::{Barrier, Bullet, Enemy, GameStatus, Player, Session};

#[derive(Clone, Copy, Debug, Serialize)]
pub struct WorldSnapshot<'a> {
    pub screen_width: f32,
    pub screen_height: f32,
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub bullets: &'a [Bullet],
    pub barriers: &'a [Barrier],
    pub score: u32,
    pub lives: u32,
    pub status: GameStatus,
    pub game_over: bool,
    pub won: bool,
    pub animation_frame: usize,
}

impl<'a> WorldSnapshot<'a> {
    pub fn alive_enemies(&self) -> impl Iterator<Item = &'a Enemy> {
        self.enemies.iter().filter(|e| e.alive)
    }

    pub fn active_bullets(&self) -> impl Iterator<Item = &'a Bullet> {
        self.bullets.iter().filter(|b| b.active)
    }

    /// Barriers still standing; destroyed ones are not drawn.
    pub fn standing_barriers(&self) -> impl Iterator<Item = &'a Barrier> {
        self.barriers.iter().filter(|b| !b.damage.is_destroyed())
    }
}

impl Session {
    pub fn snapshot(&self) -> WorldSnapshot<'_> {
        WorldSnapshot {
            screen_width: self.config.screen_width,
            screen_height: self.config.screen_height,
            player: &self.player,
            enemies: &self.enemies,
            bullets: self.bullets.slots(),
            barriers: &self.barriers,
            score: self.score,
            lives: self.lives,
            status: self.status,
            game_over: self.game_over(),
            won: self.status == GameStatus::Won,
            animation_frame: self.animation_frame,
        }
    }
}

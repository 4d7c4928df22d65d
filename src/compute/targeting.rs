/// Enemy targeting: on its cadence, one random live enemy fires downward.

use log::debug;
use rand::seq::IteratorRandom;
use rand::Rng;

use crate::entities::{BulletOwner, Enemy, GameEvent, Session};

/// Pick a live enemy uniformly at random.
///
/// Samples only among live enemies in a single pass, so it always terminates
/// and returns `None` when the whole formation is dead.
pub fn pick_shooter(enemies: &[Enemy], rng: &mut impl Rng) -> Option<usize> {
    enemies
        .iter()
        .enumerate()
        .filter(|(_, e)| e.alive)
        .map(|(i, _)| i)
        .choose(rng)
}

/// Fire from a random live enemy if this tick falls on the firing cadence.
/// Returns the slot of the spawned bullet.
pub fn enemy_fire(
    session: &mut Session,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) -> Option<usize> {
    if session.frame_counter % session.config.enemy_fire_every != 0 {
        return None;
    }
    let Some(shooter) = pick_shooter(&session.enemies, rng) else {
        debug!("no live enemy to fire from, skipping");
        return None;
    };

    let rect = session.enemies[shooter].rect;
    let cfg = &session.config;
    let x = rect.center_x() - cfg.bullet_width / 2.0;
    let y = rect.bottom() + cfg.bullet_height;
    let velocity = cfg.enemy_bullet_speed;

    let slot = session.bullets.spawn(x, y, velocity);
    debug!("enemy {shooter} fired into slot {slot}");
    events.push(GameEvent::ShotFired {
        owner: BulletOwner::Enemy,
    });
    Some(slot)
}

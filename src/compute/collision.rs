/// Per-frame collision pass.
///
/// Each active bullet is checked in a fixed priority order:
///   1. barriers, left to right; the first hit damages that barrier only
///   2. live enemies, for upward (player) bullets
///   3. the player, for downward (enemy) bullets
/// A bullet is deactivated by the first thing it hits and is not checked
/// any further.

use log::debug;

use crate::entities::{BulletOwner, GameEvent, Session};

use super::{barrier, lifecycle};

pub fn resolve(session: &mut Session, events: &mut Vec<GameEvent>) {
    for slot in 0..session.bullets.capacity() {
        if session.is_finished() {
            break;
        }
        resolve_bullet(session, slot, events);
    }
}

/// Run the priority chain for the bullet in `slot`. Inactive slots are a no-op.
pub fn resolve_bullet(session: &mut Session, slot: usize, events: &mut Vec<GameEvent>) {
    let Some(bullet) = session.bullets.get(slot).filter(|b| b.active).cloned() else {
        return;
    };

    // ── 1. Barriers ──────────────────────────────────────────────────────────
    let full_height = session.config.barrier_height;
    let struck = session
        .barriers
        .iter()
        .position(|b| !b.damage.is_destroyed() && b.rect.overlaps(&bullet.rect));
    if let Some(index) = struck {
        let target = &mut session.barriers[index];
        barrier::hit(target, full_height);
        let level = target.damage;
        session.bullets.slots_mut()[slot].active = false;
        events.push(GameEvent::BarrierDamaged { index, level });
        return;
    }

    match bullet.owner() {
        // ── 2. Player shot vs enemies ────────────────────────────────────────
        BulletOwner::Player => {
            let struck = session
                .enemies
                .iter()
                .position(|e| e.alive && e.rect.overlaps(&bullet.rect));
            if let Some(index) = struck {
                session.enemies[index].alive = false;
                session.bullets.slots_mut()[slot].active = false;
                session.score += session.config.score_per_kill;
                debug!("enemy {index} killed, score {}", session.score);
                events.push(GameEvent::EnemyKilled { index });
            }
        }
        // ── 3. Enemy shot vs player ──────────────────────────────────────────
        BulletOwner::Enemy => {
            if session.player.rect.overlaps(&bullet.rect) {
                session.bullets.slots_mut()[slot].active = false;
                lifecycle::player_hit(session, events);
            }
        }
    }
}

/// Game rules.
///
/// `update` advances a `Session` by one frame. All randomness comes through
/// the injected `rng`, so callers control determinism (tests use a seeded
/// `StdRng`). The order of the steps below is part of the contract: a bullet
/// fired this frame is moved and collided this frame, and the win/loss
/// checks only see the result of the full collision pass.

pub mod barrier;
pub mod collision;
pub mod formation;
pub mod lifecycle;
pub mod targeting;

use log::{debug, warn};
use rand::Rng;

use crate::entities::{BulletOwner, GameEvent, Session};

/// Player intents for one frame, already decoded from raw device input.
///
/// Movement is level-based (held keys); `fire` and `restart` are
/// edge-triggered and should only be set on the frame the key went down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Intents {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
    pub restart: bool,
}

/// Advance the session by one frame of `delta` seconds and return the events
/// it produced, in order.
///
/// Once the session is lost or won nothing moves and nothing ticks; only
/// `intents.restart` is looked at.
pub fn update(
    session: &mut Session,
    intents: &Intents,
    delta: f32,
    rng: &mut impl Rng,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if session.is_finished() {
        if intents.restart {
            session.restart();
        }
        return events;
    }

    let delta = sanitize_delta(delta);

    // ── 1. Input ─────────────────────────────────────────────────────────────
    steer_player(session, intents);
    session.player.shooting_cooldown = (session.player.shooting_cooldown - delta).max(0.0);
    if intents.fire {
        player_fire(session, &mut events);
    }

    // ── 2. Integration ───────────────────────────────────────────────────────
    move_player(session, delta);
    let play_height = session.config.screen_height;
    session.bullets.integrate(delta, play_height);

    // ── 3. Cadenced enemy behaviour ──────────────────────────────────────────
    session.frame_counter += 1;
    formation::advance(session);
    animate(session);
    targeting::enemy_fire(session, rng, &mut events);

    // ── 4. Collisions and lifecycle ──────────────────────────────────────────
    collision::resolve(session, &mut events);
    lifecycle::check_formation_cleared(session, &mut events);

    events
}

fn sanitize_delta(delta: f32) -> f32 {
    if delta.is_finite() && delta >= 0.0 {
        delta
    } else {
        warn!("ignoring invalid frame delta {delta}");
        0.0
    }
}

/// Held keys set the velocity; holding both cancels out.
fn steer_player(session: &mut Session, intents: &Intents) {
    let speed = session.config.player_speed;
    session.player.velocity = match (intents.move_left, intents.move_right) {
        (true, false) => -speed,
        (false, true) => speed,
        _ => 0.0,
    };
}

fn move_player(session: &mut Session, delta: f32) {
    let max_x = session.config.screen_width - session.player.rect.width;
    let rect = &mut session.player.rect;
    rect.x = (rect.x + session.player.velocity * delta).clamp(0.0, max_x.max(0.0));
}

/// Fire one upward bullet from the centre of the player, if the cooldown allows.
pub fn player_fire(session: &mut Session, events: &mut Vec<GameEvent>) {
    if session.player.shooting_cooldown > 0.0 {
        return;
    }
    let cfg = &session.config;
    let rect = session.player.rect;
    let x = rect.center_x() - cfg.bullet_width / 2.0;
    let y = rect.y - cfg.bullet_height;
    let velocity = -cfg.player_bullet_speed;
    session.player.shooting_cooldown = cfg.shoot_delay;

    let slot = session.bullets.spawn(x, y, velocity);
    debug!("player fired into slot {slot}");
    events.push(GameEvent::ShotFired {
        owner: BulletOwner::Player,
    });
}

fn animate(session: &mut Session) {
    if session.frame_counter % session.config.animation_every == 0 {
        session.animation_frame = (session.animation_frame + 1) % 2;
    }
}

use invaders::compute::lifecycle::{check_formation_cleared, player_hit};
use invaders::compute::targeting::{enemy_fire, pick_shooter};
use invaders::compute::{update, Intents};
use invaders::entities::*;
use invaders::Config;

use rand::rngs::StdRng;
use rand::SeedableRng;

const DT: f32 = 1.0 / 60.0;

fn make_session() -> Session {
    Session::new(Config::default()).unwrap()
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn idle() -> Intents {
    Intents::default()
}

/// A downward bullet sitting on the player (384..416 × 760..792).
fn shoot_player(s: &mut Session) {
    s.bullets.spawn(390.0, 770.0, 400.0);
}

fn kill_all_but(s: &mut Session, keep: usize) {
    for (i, e) in s.enemies.iter_mut().enumerate() {
        e.alive = i == keep;
    }
}

// ── Scenario C: losing the last life ─────────────────────────────────────────

#[test]
fn three_hits_end_the_game() {
    let mut s = make_session();
    let mut rng = seeded_rng();

    shoot_player(&mut s);
    let events = update(&mut s, &idle(), DT, &mut rng);
    assert_eq!(events, vec![GameEvent::PlayerHit { lives_left: 2 }]);
    assert!(!s.game_over());

    shoot_player(&mut s);
    update(&mut s, &idle(), DT, &mut rng);
    assert_eq!(s.lives, 1);
    assert!(!s.game_over());

    shoot_player(&mut s);
    let events = update(&mut s, &idle(), DT, &mut rng);
    assert_eq!(s.lives, 0);
    assert!(s.game_over());
    assert_eq!(s.status, GameStatus::GameOver);
    assert_eq!(
        events,
        vec![
            GameEvent::PlayerHit { lives_left: 0 },
            GameEvent::GameOver { score: 0 },
        ]
    );
}

#[test]
fn game_over_freezes_the_session() {
    let mut s = make_session();
    let mut rng = seeded_rng();
    s.lives = 1;
    s.bullets.spawn(100.0, 400.0, -800.0);
    shoot_player(&mut s);
    update(&mut s, &idle(), DT, &mut rng);
    assert!(s.game_over());

    let frozen = s.clone();
    let busy = Intents { move_left: true, fire: true, ..idle() };
    for _ in 0..120 {
        let events = update(&mut s, &busy, DT, &mut rng);
        assert!(events.is_empty());
    }
    assert_eq!(s, frozen);
}

#[test]
fn restart_after_game_over_restores_initial_state() {
    let mut s = make_session();
    let mut rng = seeded_rng();
    s.lives = 1;
    s.score = 700;
    s.enemies[4].alive = false;
    s.barriers[2].damage = DamageLevel::HardDamage;
    shoot_player(&mut s);
    update(&mut s, &idle(), DT, &mut rng);
    assert!(s.game_over());

    let events = update(&mut s, &Intents { restart: true, ..idle() }, DT, &mut rng);
    assert!(events.is_empty());
    assert_eq!(s, make_session());
}

#[test]
fn restart_is_ignored_while_playing() {
    let mut s = make_session();
    let mut rng = seeded_rng();
    s.score = 300;
    s.enemies[0].alive = false;
    update(&mut s, &Intents { restart: true, ..idle() }, DT, &mut rng);
    assert_eq!(s.score, 300);
    assert!(!s.enemies[0].alive);
    assert_eq!(s.frame_counter, 1);
}

#[test]
fn player_hit_never_underflows() {
    let mut s = make_session();
    let mut events = Vec::new();
    s.lives = 0;
    player_hit(&mut s, &mut events);
    assert_eq!(s.lives, 0);
    assert!(s.game_over());
}

// ── Clearing the formation ───────────────────────────────────────────────────

#[test]
fn killing_the_last_enemy_wins() {
    let mut s = make_session();
    let mut rng = seeded_rng();
    kill_all_but(&mut s, 0);
    s.bullets.spawn(40.0, 100.0, -800.0);

    let events = update(&mut s, &idle(), DT, &mut rng);

    assert_eq!(
        events,
        vec![
            GameEvent::EnemyKilled { index: 0 },
            GameEvent::FormationCleared { score: 100 },
        ]
    );
    assert_eq!(s.status, GameStatus::Won);
    assert!(s.is_finished());
    assert!(!s.game_over());
    assert_eq!(s.alive_enemies(), 0);
}

#[test]
fn dead_enemies_stay_dead_until_restart() {
    let mut s = make_session();
    let mut rng = seeded_rng();
    kill_all_but(&mut s, 0);
    s.bullets.spawn(40.0, 100.0, -800.0);
    update(&mut s, &idle(), DT, &mut rng);

    let frozen = s.clone();
    let busy = Intents { move_right: true, fire: true, ..idle() };
    for _ in 0..120 {
        assert!(update(&mut s, &busy, DT, &mut rng).is_empty());
    }
    assert_eq!(s, frozen);
    assert!(s.enemies.iter().all(|e| !e.alive));

    update(&mut s, &Intents { restart: true, ..idle() }, DT, &mut rng);
    assert_eq!(s, make_session());
}

#[test]
fn not_cleared_while_an_enemy_lives() {
    let mut s = make_session();
    let mut events = Vec::new();
    kill_all_but(&mut s, 49);
    assert!(!check_formation_cleared(&mut s, &mut events));
    assert_eq!(s.status, GameStatus::Playing);
    assert!(events.is_empty());
}

#[test]
fn losing_the_last_life_beats_clearing_the_formation() {
    let mut s = make_session();
    let mut events = Vec::new();
    kill_all_but(&mut s, usize::MAX);
    s.status = GameStatus::GameOver;
    assert!(!check_formation_cleared(&mut s, &mut events));
    assert_eq!(s.status, GameStatus::GameOver);
    assert!(events.is_empty());
}

#[test]
fn last_kill_and_fatal_hit_in_one_tick_is_a_loss() {
    let mut s = make_session();
    let mut rng = seeded_rng();
    kill_all_but(&mut s, 0);
    s.lives = 1;
    s.bullets.spawn(40.0, 100.0, -800.0);
    shoot_player(&mut s);

    let events = update(&mut s, &idle(), DT, &mut rng);

    assert!(!s.enemies[0].alive);
    assert_eq!(s.status, GameStatus::GameOver);
    assert!(!events.iter().any(|e| matches!(e, GameEvent::FormationCleared { .. })));
}

// ── Targeting ─────────────────────────────────────────────────────────────────

#[test]
fn no_shooter_when_formation_is_dead() {
    let mut s = make_session();
    kill_all_but(&mut s, usize::MAX);
    assert_eq!(pick_shooter(&s.enemies, &mut seeded_rng()), None);
}

#[test]
fn only_live_enemies_are_picked() {
    let mut s = make_session();
    kill_all_but(&mut s, 17);
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        assert_eq!(pick_shooter(&s.enemies, &mut rng), Some(17));
    }
}

#[test]
fn picks_spread_across_the_formation() {
    let s = make_session();
    let mut rng = seeded_rng();
    let mut seen = std::collections::HashSet::new();
    for _ in 0..500 {
        seen.insert(pick_shooter(&s.enemies, &mut rng).unwrap());
    }
    assert!(seen.len() > 25);
}

#[test]
fn enemy_fire_skips_when_nobody_is_alive() {
    let mut s = make_session();
    let mut events = Vec::new();
    kill_all_but(&mut s, usize::MAX);
    s.frame_counter = 60;
    assert_eq!(enemy_fire(&mut s, &mut seeded_rng(), &mut events), None);
    assert_eq!(s.bullets.active_count(), 0);
    assert!(events.is_empty());
}

#[test]
fn enemy_fire_waits_for_cadence() {
    let mut s = make_session();
    let mut events = Vec::new();
    s.frame_counter = 61;
    assert_eq!(enemy_fire(&mut s, &mut seeded_rng(), &mut events), None);
    assert_eq!(s.bullets.active_count(), 0);
}

#[test]
fn enemy_bullet_spawns_below_the_shooter() {
    let mut s = make_session();
    let mut events = Vec::new();
    kill_all_but(&mut s, 17); // row 1, col 7 → 396..428 × 132..164
    s.frame_counter = 120;

    let slot = enemy_fire(&mut s, &mut seeded_rng(), &mut events).unwrap();
    let b = s.bullets.get(slot).unwrap();
    assert_eq!(b.rect.x, 409.5);
    assert_eq!(b.rect.y, 174.0);
    assert_eq!(b.velocity, 400.0);
    assert_eq!(b.owner(), BulletOwner::Enemy);
    assert_eq!(events, vec![GameEvent::ShotFired { owner: BulletOwner::Enemy }]);
}

use invaders::compute::formation::{advance, horizontal_extent, step_row};
use invaders::entities::*;
use invaders::Config;

fn make_session() -> Session {
    Session::new(Config::default()).unwrap()
}

/// Slide every slot of the grid sideways by `dx`.
fn shift_all(s: &mut Session, dx: f32) {
    for e in &mut s.enemies {
        e.rect.x += dx;
    }
}

fn one_full_wrap(s: &mut Session) {
    for _ in 0..s.config().enemy_rows {
        step_row(s);
    }
}

// ── Cadence ───────────────────────────────────────────────────────────────────

#[test]
fn advance_only_on_cadence() {
    let mut s = make_session();
    s.frame_counter = 14;
    assert!(!advance(&mut s));
    assert_eq!(s.moving_row, 0);

    s.frame_counter = 15;
    assert!(advance(&mut s));
    assert_eq!(s.moving_row, 1);

    s.frame_counter = 30;
    assert!(advance(&mut s));
    assert_eq!(s.moving_row, 2);
}

// ── Row stepping ──────────────────────────────────────────────────────────────

#[test]
fn step_moves_only_the_current_row() {
    let mut s = make_session();
    s.moving_row = 2;
    step_row(&mut s);
    for (i, e) in s.enemies.iter().enumerate() {
        let col = (i % 10) as f32;
        let home = 32.0 + col * 52.0;
        if i / 10 == 2 {
            assert_eq!(e.rect.x, home + 16.0);
        } else {
            assert_eq!(e.rect.x, home);
        }
    }
    assert_eq!(s.moving_row, 3);
}

#[test]
fn step_moves_left_when_direction_is_negative() {
    let mut s = make_session();
    shift_all(&mut s, 100.0);
    s.shift_direction = -1;
    step_row(&mut s);
    assert_eq!(s.enemies[0].rect.x, 116.0);
}

#[test]
fn dead_slots_move_with_their_row() {
    let mut s = make_session();
    s.enemies[3].alive = false;
    step_row(&mut s);
    assert_eq!(s.enemies[3].rect.x, 32.0 + 3.0 * 52.0 + 16.0);
    assert!(!s.enemies[3].alive);
}

#[test]
fn moving_row_wraps_after_last_row() {
    let mut s = make_session();
    s.moving_row = 4;
    step_row(&mut s);
    assert_eq!(s.moving_row, 0);
}

// ── Reversal ──────────────────────────────────────────────────────────────────

#[test]
fn no_reversal_far_from_the_edge() {
    let mut s = make_session();
    one_full_wrap(&mut s);
    assert_eq!(s.shift_direction, 1);
    // Every row has stepped once, so the grid is aligned again
    assert_eq!(s.enemies[0].rect.x, 48.0);
    assert_eq!(s.enemies[40].rect.x, 48.0);
}

#[test]
fn reverses_when_right_edge_reaches_bound() {
    let mut s = make_session();
    // Rightmost edge 532 + 220 = 752; one wrap adds 16 → 768 = 800 - 32
    shift_all(&mut s, 220.0);
    one_full_wrap(&mut s);
    assert_eq!(horizontal_extent(&s).unwrap().1, 768.0);
    assert_eq!(s.shift_direction, -1);
}

#[test]
fn just_short_of_the_bound_keeps_direction() {
    let mut s = make_session();
    shift_all(&mut s, 219.0); // ends at 767
    one_full_wrap(&mut s);
    assert_eq!(s.shift_direction, 1);
}

#[test]
fn bound_only_tested_on_wrap() {
    let mut s = make_session();
    shift_all(&mut s, 300.0); // already past the bound
    for _ in 0..4 {
        step_row(&mut s);
        assert_eq!(s.shift_direction, 1);
    }
    step_row(&mut s);
    assert_eq!(s.shift_direction, -1);
}

#[test]
fn reverses_back_at_left_padding() {
    let mut s = make_session();
    s.shift_direction = -1;
    shift_all(&mut s, 16.0); // leftmost at 48, one wrap brings it to 32
    one_full_wrap(&mut s);
    assert_eq!(horizontal_extent(&s).unwrap().0, 32.0);
    assert_eq!(s.shift_direction, 1);
}

#[test]
fn left_edge_does_not_flip_a_rightward_formation() {
    // The initial layout touches the left padding; moving right must not flip.
    let mut s = make_session();
    assert_eq!(horizontal_extent(&s).unwrap().0, 32.0);
    one_full_wrap(&mut s);
    assert_eq!(s.shift_direction, 1);
}

#[test]
fn formation_bounces_between_edges_over_time() {
    let mut s = make_session();
    let mut flips = 0;
    let mut last = s.shift_direction;
    for _ in 0..400 {
        step_row(&mut s);
        if s.shift_direction != last {
            flips += 1;
            last = s.shift_direction;
        }
        let (left, right) = horizontal_extent(&s).unwrap();
        // Never further out than one wrap beyond the padded bounds
        assert!(left >= 32.0 - 16.0);
        assert!(right <= 768.0 + 16.0);
    }
    assert!(flips >= 2);
}

/// Formation movement: one row steps sideways per cadence tick, and the whole
/// formation only reverses once every row has stepped.

use log::debug;

use crate::entities::Session;

/// Step the formation if this tick falls on the movement cadence.
/// Returns `true` when a row actually moved.
pub fn advance(session: &mut Session) -> bool {
    if session.frame_counter % session.config.enemy_move_every != 0 {
        return false;
    }
    step_row(session);
    true
}

/// Shift `moving_row` by half an enemy width in the current direction, move
/// the cursor to the next row and, on wrap-around, test the bounds.
///
/// Dead slots move with their row so the grid keeps its shape.
pub fn step_row(session: &mut Session) {
    let columns = session.config.enemy_columns;
    let rows = session.config.enemy_rows;
    let shift = session.config.enemy_width / 2.0 * session.shift_direction as f32;

    let start = session.moving_row * columns;
    for enemy in &mut session.enemies[start..start + columns] {
        enemy.rect.x += shift;
    }

    session.moving_row = (session.moving_row + 1) % rows;
    if session.moving_row == 0 {
        check_bounds(session);
    }
}

/// Reverse `shift_direction` when the leading edge of the formation has
/// reached the padded screen bound.
fn check_bounds(session: &mut Session) {
    let Some((left, right)) = horizontal_extent(session) else {
        return;
    };
    let padding = session.config.screen_padding;
    let limit = session.config.screen_width - padding;

    let reverse = if session.shift_direction > 0 {
        right >= limit
    } else {
        left <= padding
    };
    if reverse {
        session.shift_direction = -session.shift_direction;
        debug!(
            "formation reversed at [{left}, {right}], now moving {}",
            if session.shift_direction > 0 { "right" } else { "left" }
        );
    }
}

/// Leftmost and rightmost edge over every slot of the grid.
pub fn horizontal_extent(session: &Session) -> Option<(f32, f32)> {
    session.enemies.iter().fold(None, |acc, enemy| {
        let (left, right) = (enemy.rect.x, enemy.rect.right());
        Some(match acc {
            None => (left, right),
            Some((l, r)) => (l.min(left), r.max(right)),
        })
    })
}

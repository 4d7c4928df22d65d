/// Barrier damage ladder.

use log::debug;

use crate::entities::{Barrier, DAMAGE_STEPS};

/// Apply one hit to `barrier`, whose undamaged height is `full_height`.
///
/// The level moves one step up the ladder and the block erodes from the top:
/// height shrinks by one step and `y` moves down by the same amount, keeping
/// the bottom edge in place. Returns `false` (and changes nothing) when the
/// barrier was already destroyed.
pub fn hit(barrier: &mut Barrier, full_height: f32) -> bool {
    if barrier.damage.is_destroyed() {
        return false;
    }
    let step = full_height / f32::from(DAMAGE_STEPS);
    barrier.damage = barrier.damage.next();
    barrier.rect.height = (barrier.rect.height - step).max(0.0);
    barrier.rect.y += step;
    debug!("barrier hit, now {:?}", barrier.damage);
    true
}

/// Fixed-capacity bullet pool.
///
/// Slots are written round-robin: `spawn` always takes slot `next_id` and
/// moves the cursor on, even when that slot still holds a live bullet. With
/// a saturated pool the oldest bullet silently disappears.

use log::debug;
use serde::Serialize;

use crate::entities::{Bullet, Rect};
use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BulletPool {
    slots: Vec<Bullet>,
    next_id: usize,
    bullet_width: f32,
    bullet_height: f32,
}

impl BulletPool {
    pub fn new(capacity: usize, bullet_width: f32, bullet_height: f32) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroBulletCapacity);
        }
        Ok(Self {
            slots: vec![Bullet::default(); capacity],
            next_id: 0,
            bullet_width,
            bullet_height,
        })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slot the next `spawn` will write.
    pub fn next_id(&self) -> usize {
        self.next_id
    }

    pub fn slots(&self) -> &[Bullet] {
        &self.slots
    }

    pub fn slots_mut(&mut self) -> &mut [Bullet] {
        &mut self.slots
    }

    pub fn get(&self, index: usize) -> Option<&Bullet> {
        self.slots.get(index)
    }

    /// Write a bullet with its top-left corner at `(x, y)` and return the slot used.
    pub fn spawn(&mut self, x: f32, y: f32, velocity: f32) -> usize {
        let id = self.next_id;
        if self.slots[id].active {
            debug!("bullet pool saturated, recycling live slot {id}");
        }
        self.slots[id] = Bullet {
            rect: Rect::new(x, y, self.bullet_width, self.bullet_height),
            velocity,
            active: true,
        };
        self.next_id = (id + 1) % self.slots.len();
        id
    }

    /// Move every active bullet by `velocity * delta`; bullets whose top edge
    /// leaves `0..=play_height` are deactivated.
    pub fn integrate(&mut self, delta: f32, play_height: f32) {
        for bullet in self.slots.iter_mut().filter(|b| b.active) {
            bullet.rect.y += bullet.velocity * delta;
            if bullet.rect.y < 0.0 || bullet.rect.y > play_height {
                bullet.active = false;
            }
        }
    }

    pub fn active(&self) -> impl Iterator<Item = (usize, &Bullet)> {
        self.slots.iter().enumerate().filter(|(_, b)| b.active)
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|b| b.active).count()
    }

    /// Deactivate every slot and rewind the write cursor.
    pub fn clear(&mut self) {
        self.slots.fill(Bullet::default());
        self.next_id = 0;
    }
}

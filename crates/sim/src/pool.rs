use tracing::debug;

use crate::entity::{Body, Entity};
use crate::math::Vec2;

pub const PLAYER_BULLET_POOL_CAPACITY: usize = 256;
pub const ENEMY_BULLET_POOL_CAPACITY: usize = 256;
pub const BOSS_BULLET_POOL_CAPACITY: usize = 20;
pub const ENEMY_POOL_CAPACITY: usize = 64;
pub const PICKUP_POOL_CAPACITY: usize = 8;

/// Every pooled actor carries an 8px-radius base body, scaled with the
/// sprite. Singleton actors (player, boss) configure their own bodies.
const POOLED_BODY_RADIUS_BASE_PX: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolId {
    PlayerBullets,
    EnemyBullets,
    BossBullets,
    Enemies,
    Pickups,
}

/// Generation-stamped reference to a pooled slot. A handle from an earlier
/// occupant resolves to nothing once the slot has been recycled, so deferred
/// work can never touch whoever lives there now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolHandle {
    pub pool: PoolId,
    pub slot: usize,
    pub generation: u32,
}

/// Fixed slab of entities warmed up at construction. Slots toggle between
/// active and inactive; nothing is allocated or freed after warm-up.
#[derive(Debug)]
pub struct Pool {
    id: PoolId,
    slots: Vec<Entity>,
    generations: Vec<u32>,
    enabled_total: u64,
    dropped_requests: u64,
}

impl Pool {
    pub fn new(id: PoolId, capacity: usize, texture: &str) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        for _ in 0..capacity {
            let mut entity = Entity::default();
            entity.texture = texture.to_string();
            slots.push(entity);
        }
        Self {
            id,
            slots,
            generations: vec![0; capacity],
            enabled_total: 0,
            dropped_requests: 0,
        }
    }

    pub fn id(&self) -> PoolId {
        self.id
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// First inactive slot, or a drop signal when every slot is live. The
    /// slot is not claimed here; `enable` does that. Callers treat a miss
    /// as "spawn skipped", never as an error.
    pub fn get(&mut self) -> Option<usize> {
        match self.slots.iter().position(|slot| !slot.active) {
            Some(index) => Some(index),
            None => {
                self.dropped_requests += 1;
                debug!(
                    pool = ?self.id,
                    dropped = self.dropped_requests,
                    "pool_exhausted"
                );
                None
            }
        }
    }

    /// Claims `slot`: resets transform, size, scale, alpha, velocity, and
    /// body, marks it active, and mints a handle for the new occupant.
    #[allow(clippy::too_many_arguments)]
    pub fn enable(
        &mut self,
        slot: usize,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        scale: f32,
        vx: f32,
        vy: f32,
    ) -> PoolHandle {
        let entity = &mut self.slots[slot];
        entity.position = Vec2 { x, y };
        entity.velocity = Vec2 { x: vx, y: vy };
        entity.size = Vec2 {
            x: width,
            y: height,
        };
        entity.scale = scale;
        entity.alpha = 1.0;
        entity.body = Body {
            radius: POOLED_BODY_RADIUS_BASE_PX * scale,
            offset: Vec2::default(),
        };
        entity.active = true;
        self.enabled_total += 1;
        PoolHandle {
            pool: self.id,
            slot,
            generation: self.generations[slot],
        }
    }

    /// Parks the slot: zero velocity, inactive, and a generation bump that
    /// invalidates every outstanding handle to the previous occupant. An
    /// inactive slot participates in neither movement nor collision.
    pub fn disable(&mut self, slot: usize) {
        let entity = &mut self.slots[slot];
        if !entity.active {
            return;
        }
        entity.active = false;
        entity.velocity = Vec2::default();
        self.generations[slot] = self.generations[slot].wrapping_add(1);
    }

    /// The current occupant, but only while the handle's generation matches
    /// and the slot is still active.
    pub fn resolve(&mut self, handle: PoolHandle) -> Option<&mut Entity> {
        if self.generations.get(handle.slot).copied() != Some(handle.generation) {
            return None;
        }
        let entity = &mut self.slots[handle.slot];
        if entity.active {
            Some(entity)
        } else {
            None
        }
    }

    pub fn entity(&self, slot: usize) -> &Entity {
        &self.slots[slot]
    }

    pub fn entity_mut(&mut self, slot: usize) -> &mut Entity {
        &mut self.slots[slot]
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.active).count()
    }

    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &Entity)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, entity)| entity.active)
    }

    /// Successful `enable` calls since warm-up.
    pub fn enabled_total(&self) -> u64 {
        self.enabled_total
    }

    /// `get` calls that found no free slot since warm-up.
    pub fn dropped_requests(&self) -> u64 {
        self.dropped_requests
    }
}

/// All five pools the simulation owns.
#[derive(Debug)]
pub struct Pools {
    pub player_bullets: Pool,
    pub enemy_bullets: Pool,
    pub boss_bullets: Pool,
    pub enemies: Pool,
    pub pickups: Pool,
}

impl Pools {
    pub fn new() -> Self {
        Self {
            player_bullets: Pool::new(PoolId::PlayerBullets, PLAYER_BULLET_POOL_CAPACITY, "bullet"),
            enemy_bullets: Pool::new(
                PoolId::EnemyBullets,
                ENEMY_BULLET_POOL_CAPACITY,
                "enemy_projectile",
            ),
            boss_bullets: Pool::new(
                PoolId::BossBullets,
                BOSS_BULLET_POOL_CAPACITY,
                "boss_projectile",
            ),
            // Enemy and pickup textures are per-occupant, set at spawn time.
            enemies: Pool::new(PoolId::Enemies, ENEMY_POOL_CAPACITY, ""),
            pickups: Pool::new(PoolId::Pickups, PICKUP_POOL_CAPACITY, ""),
        }
    }

    pub fn pool(&self, id: PoolId) -> &Pool {
        match id {
            PoolId::PlayerBullets => &self.player_bullets,
            PoolId::EnemyBullets => &self.enemy_bullets,
            PoolId::BossBullets => &self.boss_bullets,
            PoolId::Enemies => &self.enemies,
            PoolId::Pickups => &self.pickups,
        }
    }

    pub fn pool_mut(&mut self, id: PoolId) -> &mut Pool {
        match id {
            PoolId::PlayerBullets => &mut self.player_bullets,
            PoolId::EnemyBullets => &mut self.enemy_bullets,
            PoolId::BossBullets => &mut self.boss_bullets,
            PoolId::Enemies => &mut self.enemies,
            PoolId::Pickups => &mut self.pickups,
        }
    }

    pub fn resolve(&mut self, handle: PoolHandle) -> Option<&mut Entity> {
        self.pool_mut(handle.pool).resolve(handle)
    }
}

impl Default for Pools {
    fn default() -> Self {
        Self::new()
    }
}

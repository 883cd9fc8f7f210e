use crate::math::{unit_from_angle, Vec2};
use crate::pool::{PoolId, Pools};

pub(crate) const BULLET_SPEED_PX_PER_MS: f32 = 1.024;
pub(crate) const BULLET_WIDTH_PX: f32 = 4.0;
pub(crate) const BULLET_HEIGHT_PX: f32 = 12.0;
pub(crate) const BOSS_BULLET_WIDTH_PX: f32 = 6.0;
pub(crate) const BOSS_BULLET_HEIGHT_PX: f32 = 15.0;
pub(crate) const DEFAULT_BULLET_SCALE: f32 = 4.0;

/// Fire configuration for one actor. Bullets come from the owning pool, so
/// a weapon is cheap data and the pool decides whether a shot is possible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weapon {
    pub pool: PoolId,
    /// Minimum gap between player-initiated shots. Timer-driven shooters
    /// (enemies, boss) leave this at zero and gate themselves.
    pub fire_interval_ms: f32,
    pub bullet_w: f32,
    pub bullet_h: f32,
    pub bullet_scale: f32,
    /// Pixels per millisecond.
    pub bullet_speed: f32,
}

impl Weapon {
    /// Spawns one bullet at `origin` travelling along `angle` (radians,
    /// +y down). An exhausted pool skips the shot and reports `false`;
    /// the pool counts the drop.
    pub fn shoot(&self, pools: &mut Pools, origin: Vec2, angle: f32) -> bool {
        let pool = pools.pool_mut(self.pool);
        let Some(slot) = pool.get() else {
            return false;
        };
        let direction = unit_from_angle(angle);
        pool.enable(
            slot,
            origin.x,
            origin.y,
            self.bullet_w,
            self.bullet_h,
            self.bullet_scale,
            direction.x * self.bullet_speed,
            direction.y * self.bullet_speed,
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::{Weapon, BULLET_HEIGHT_PX, BULLET_SPEED_PX_PER_MS, BULLET_WIDTH_PX};
    use crate::math::Vec2;
    use crate::pool::{PoolId, Pools, PLAYER_BULLET_POOL_CAPACITY};

    fn player_weapon() -> Weapon {
        Weapon {
            pool: PoolId::PlayerBullets,
            fire_interval_ms: 1000.0,
            bullet_w: BULLET_WIDTH_PX,
            bullet_h: BULLET_HEIGHT_PX,
            bullet_scale: 4.0,
            bullet_speed: BULLET_SPEED_PX_PER_MS,
        }
    }

    #[test]
    fn shoot_enables_a_bullet_with_angle_velocity() {
        let mut pools = Pools::new();
        let weapon = player_weapon();
        let origin = Vec2 { x: 540.0, y: 1700.0 };

        assert!(weapon.shoot(&mut pools, origin, -FRAC_PI_2));

        let (_, bullet) = pools.player_bullets.iter_active().next().unwrap();
        assert_eq!(bullet.position.x, 540.0);
        assert_eq!(bullet.position.y, 1700.0);
        assert!(bullet.velocity.x.abs() < 1e-6);
        assert!((bullet.velocity.y + BULLET_SPEED_PX_PER_MS).abs() < 1e-6);
        assert_eq!(bullet.size.x, BULLET_WIDTH_PX);
        assert_eq!(bullet.size.y, BULLET_HEIGHT_PX);
    }

    #[test]
    fn shots_beyond_capacity_are_dropped_and_counted() {
        let mut pools = Pools::new();
        let weapon = player_weapon();
        let origin = Vec2 { x: 0.0, y: 0.0 };

        let mut spawned = 0usize;
        for _ in 0..300 {
            if weapon.shoot(&mut pools, origin, -FRAC_PI_2) {
                spawned += 1;
            }
        }

        assert_eq!(spawned, PLAYER_BULLET_POOL_CAPACITY);
        assert_eq!(
            pools.player_bullets.active_count(),
            PLAYER_BULLET_POOL_CAPACITY
        );
        assert_eq!(
            pools.player_bullets.dropped_requests(),
            300 - PLAYER_BULLET_POOL_CAPACITY as u64
        );
    }
}

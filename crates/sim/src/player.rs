use crate::catalog::ShipDef;
use crate::entity::{Body, Entity};
use crate::health::Health;
use crate::math::Vec2;
use crate::movement::Movement;
use crate::pool::PoolId;
use crate::weapon::{
    Weapon, BULLET_HEIGHT_PX, BULLET_SPEED_PX_PER_MS, BULLET_WIDTH_PX, DEFAULT_BULLET_SCALE,
};

pub(crate) const PLAYER_SPRITE_SIZE_PX: f32 = 16.0;
pub(crate) const PLAYER_SCALE: f32 = 6.0;

/// The player craft. Lives outside the pools: there is exactly one, it is
/// never recycled, and death ends the run rather than freeing a slot.
#[derive(Debug, Clone)]
pub struct Player {
    pub entity: Entity,
    pub ship_key: String,
    /// From the ship catalog; permanent for the run.
    pub ship_invincible: bool,
    /// From the invincibility buff; cleared when the buff reverts.
    pub buff_invincible: bool,
    /// Clock reading of the last accepted trigger pull. `None` until the
    /// first shot, so a fresh ship can always fire immediately.
    pub last_fired_at_ms: Option<f64>,
}

impl Player {
    pub fn from_ship(key: &str, ship: &ShipDef) -> Self {
        let mut entity = Entity::default();
        entity.size = Vec2 {
            x: PLAYER_SPRITE_SIZE_PX,
            y: PLAYER_SPRITE_SIZE_PX,
        };
        entity.scale = PLAYER_SCALE;
        entity.active = true;
        entity.health = Some(Health::new(ship.health));
        entity.movement = Some(Movement::new(ship.movement_speed));
        entity.weapon = Some(Weapon {
            pool: PoolId::PlayerBullets,
            fire_interval_ms: ship.rate_of_fire * 1000.0,
            bullet_w: BULLET_WIDTH_PX,
            bullet_h: BULLET_HEIGHT_PX,
            bullet_scale: DEFAULT_BULLET_SCALE,
            bullet_speed: BULLET_SPEED_PX_PER_MS,
        });

        let mut player = Self {
            entity,
            ship_key: String::new(),
            ship_invincible: false,
            buff_invincible: false,
            last_fired_at_ms: None,
        };
        player.apply_ship(key, ship);
        player
    }

    /// Swaps in another catalog ship: texture, body, baseline speed and
    /// fire rate, and the catalog invincibility flag. Current health and
    /// position are kept so a mid-run reselect is not a free heal.
    pub fn apply_ship(&mut self, key: &str, ship: &ShipDef) {
        self.ship_key.clear();
        self.ship_key.push_str(key);
        self.entity.texture.clone_from(&ship.texture);
        self.entity.body = Body {
            radius: ship.body.radius,
            offset: Vec2 {
                x: ship.body.offset_x,
                y: ship.body.offset_y,
            },
        };
        self.ship_invincible = ship.invincible;
        if let Some(movement) = self.entity.movement.as_mut() {
            movement.speed = ship.movement_speed;
        }
        if let Some(weapon) = self.entity.weapon.as_mut() {
            weapon.fire_interval_ms = ship.rate_of_fire * 1000.0;
        }
    }

    pub fn is_invincible(&self) -> bool {
        self.ship_invincible || self.buff_invincible
    }

    pub fn is_dead(&self) -> bool {
        self.entity
            .health
            .as_ref()
            .map(Health::is_dead)
            .unwrap_or(false)
    }
}

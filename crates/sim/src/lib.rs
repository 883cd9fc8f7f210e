pub mod boss;
pub mod catalog;
pub mod clock;
pub mod entity;
pub mod events;
pub mod health;
pub mod level;
pub mod math;
pub mod movement;
pub mod player;
pub mod pool;
pub mod weapon;
pub mod world;

mod collision;
mod powerup;
mod rng;
mod texture_keys;

pub use boss::{AttackPattern, Boss, BossPhase, PatrolDir};
pub use catalog::{
    CatalogError, Catalogs, EnemyArchetype, PowerUpDef, ShipBody, ShipDef, ENEMY_CATALOG_FILE,
    POWER_UP_CATALOG_FILE, SHIP_CATALOG_FILE,
};
pub use clock::{Scheduler, TimerHandle, VirtualClock};
pub use entity::{Body, Capability, Component, Entity};
pub use events::{EventBus, SimEvent};
pub use health::{Health, HealthChange};
pub use level::{LevelState, LevelUp};
pub use math::Vec2;
pub use movement::Movement;
pub use player::Player;
pub use pool::{Pool, PoolHandle, PoolId, Pools};
pub use powerup::PowerUpEffect;
pub use weapon::Weapon;
pub use world::{SimConfig, TickPhase, World, TICK_PHASE_ORDER};

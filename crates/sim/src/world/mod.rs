use std::f32::consts::FRAC_PI_2;

use tracing::{debug, info};

use crate::boss::{
    spread_offset, wave_offset, AttackPattern, Boss, SPREAD_SHOT_COUNT, WAVE_SHOT_COUNT,
    WAVE_SHOT_GAP_MS,
};
use crate::catalog::{CatalogError, Catalogs, PowerUpDef};
use crate::clock::{Scheduler, TimerHandle, VirtualClock};
use crate::collision::{resolve, ResolveContext};
use crate::entity::Entity;
use crate::events::{EventBus, SimEvent};
use crate::health::Health;
use crate::level::LevelState;
use crate::math::{bearing, Vec2};
use crate::player::Player;
use crate::pool::{PoolHandle, PoolId, Pools, PICKUP_POOL_CAPACITY};
use crate::powerup::{
    apply_effect, execute_revert, PowerUpEffect, PowerUpRevert, INVINCIBILITY_BLINK_INTERVAL_MS,
};
use crate::rng::GameRng;
use crate::weapon::{
    Weapon, BULLET_HEIGHT_PX, BULLET_SPEED_PX_PER_MS, BULLET_WIDTH_PX, DEFAULT_BULLET_SCALE,
};

const DEFAULT_PLAY_WIDTH_PX: f32 = 1080.0;
const DEFAULT_PLAY_HEIGHT_PX: f32 = 1920.0;
const DEFAULT_SHIP_KEY: &str = "1";
const SPAWN_INTERVAL_MS: f64 = 1500.0;
const WAVE_SPAWN_GAP_MS: f64 = 300.0;
const TELEGRAPH_DELAY_MIN_MS: i32 = 1000;
const TELEGRAPH_DELAY_MAX_MS: i32 = 2999;
const TELEGRAPH_BLINK_INTERVAL_MS: f64 = 200.0;
const TELEGRAPH_BLINK_EDGES: u32 = 8;
const DIM_BLINK_ALPHA: f32 = 0.5;
const ENEMY_SPAWN_MARGIN_PX: i32 = 32;
const ENEMY_SPAWN_Y_PX: f32 = -16.0;
const ENEMY_SPRITE_SIZE_PX: f32 = 16.0;
const ENEMY_SCALE: f32 = 4.0;
const ENEMY_STARTING_HEALTH: i32 = 1;
const ENEMY_SPEED_PER_LEVEL: f32 = 0.1;
const ENEMY_SHOT_ANGLE_RAD: f32 = FRAC_PI_2;
const PLAYER_SHOT_ANGLE_RAD: f32 = -FRAC_PI_2;
const PLAYER_SPAWN_BOTTOM_OFFSET_PX: f32 = 128.0;
const PICKUP_FALL_SPEED_PX_PER_MS: f32 = 0.1;
const PICKUP_SPRITE_SIZE_PX: f32 = 16.0;
const PICKUP_SCALE: f32 = 4.0;
const POWER_UP_ROLL_MAX: i32 = 10;
const POWER_UP_ROLL_THRESHOLD: i32 = 7;
const BOSS_WINDUP_MS: f64 = 2000.0;
const BOSS_ATTACK_INTERVAL_MS: f64 = 2000.0;
const BOSS_SPAWN_Y_PX: f32 = -300.0;
const BOSS_HOLD_OFFSET_PX: f32 = 400.0;
const KILL_SCORE: u32 = 1;
const BOSS_KILL_SCORE: u32 = 50;

include!("state.rs");
include!("spawn.rs");
include!("update.rs");
include!("tasks.rs");

#[cfg(test)]
mod tests {
    include!("tests.rs");
}

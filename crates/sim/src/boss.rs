use tracing::debug;

use crate::clock::TimerHandle;
use crate::entity::{Body, Entity};
use crate::health::Health;
use crate::math::Vec2;
use crate::pool::PoolId;
use crate::weapon::{
    Weapon, BOSS_BULLET_HEIGHT_PX, BOSS_BULLET_WIDTH_PX, BULLET_SPEED_PX_PER_MS,
    DEFAULT_BULLET_SCALE,
};

pub(crate) const BOSS_STARTING_HEALTH: i32 = 100;
pub(crate) const BOSS_SPRITE_SIZE_PX: f32 = 32.0;
pub(crate) const BOSS_SCALE: f32 = 6.0;
pub(crate) const BOSS_BODY_RADIUS_PX: f32 = 96.0;
pub(crate) const BOSS_TEXTURE: &str = "boss";
pub(crate) const WAVE_SHOT_GAP_MS: f64 = 100.0;

const DESCENT_SPEED_PX_PER_MS: f32 = 0.43;
const PATROL_SPEED_PX_PER_MS: f32 = 0.25;
const PATROL_MARGIN_PX: f32 = 100.0;
pub(crate) const SPREAD_SHOT_COUNT: u32 = 5;
const SPREAD_ANGLE_STEP_RAD: f32 = 0.26;
pub(crate) const WAVE_SHOT_COUNT: u32 = 10;
const WAVE_ANGLE_STEP_RAD: f32 = 0.17;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossPhase {
    Descending,
    Patrolling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatrolDir {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackPattern {
    /// One bullet straight along the bearing to the player.
    Aimed,
    /// Five bullets fanned around the bearing.
    Spread,
    /// Ten bullets walked across the bearing, one per stagger step.
    Wave,
}

const ATTACK_PATTERN_CYCLE: [AttackPattern; 3] = [
    AttackPattern::Aimed,
    AttackPattern::Spread,
    AttackPattern::Wave,
];

/// The boss singleton. Exists only between windup completion and defeat;
/// moves by phase logic rather than by pooled velocity integration.
#[derive(Debug, Clone)]
pub struct Boss {
    pub entity: Entity,
    pub phase: BossPhase,
    pub patrol_dir: PatrolDir,
    target_y: f32,
    pattern_index: usize,
    /// Repeating attack schedule, cancelled exactly once on defeat.
    pub attack_timer: TimerHandle,
}

impl Boss {
    pub fn spawn(position: Vec2, target_y: f32, attack_timer: TimerHandle) -> Self {
        let mut entity = Entity::default();
        entity.position = position;
        entity.size = Vec2 {
            x: BOSS_SPRITE_SIZE_PX,
            y: BOSS_SPRITE_SIZE_PX,
        };
        entity.scale = BOSS_SCALE;
        entity.texture = BOSS_TEXTURE.to_string();
        entity.body = Body {
            radius: BOSS_BODY_RADIUS_PX,
            offset: Vec2::default(),
        };
        entity.active = true;
        entity.health = Some(Health::new(BOSS_STARTING_HEALTH));
        entity.weapon = Some(Weapon {
            pool: PoolId::BossBullets,
            fire_interval_ms: 0.0,
            bullet_w: BOSS_BULLET_WIDTH_PX,
            bullet_h: BOSS_BULLET_HEIGHT_PX,
            bullet_scale: DEFAULT_BULLET_SCALE,
            bullet_speed: BULLET_SPEED_PX_PER_MS,
        });
        Self {
            entity,
            phase: BossPhase::Descending,
            patrol_dir: PatrolDir::Right,
            target_y,
            pattern_index: 0,
            attack_timer,
        }
    }

    /// Advances the entrance descent or the patrol sweep. Descent clamps
    /// onto the hold line; patrol reverses at the side margins.
    pub fn update_movement(&mut self, dt_ms: f32, play_width: f32) {
        match self.phase {
            BossPhase::Descending => {
                self.entity.position.y += DESCENT_SPEED_PX_PER_MS * dt_ms;
                if self.entity.position.y >= self.target_y {
                    self.entity.position.y = self.target_y;
                    self.phase = BossPhase::Patrolling;
                    debug!(y = self.target_y, "boss_patrolling");
                }
            }
            BossPhase::Patrolling => {
                let step = PATROL_SPEED_PX_PER_MS * dt_ms;
                match self.patrol_dir {
                    PatrolDir::Right => self.entity.position.x += step,
                    PatrolDir::Left => self.entity.position.x -= step,
                }
                let right_limit = play_width - PATROL_MARGIN_PX;
                if self.entity.position.x >= right_limit {
                    self.entity.position.x = right_limit;
                    self.patrol_dir = PatrolDir::Left;
                } else if self.entity.position.x <= PATROL_MARGIN_PX {
                    self.entity.position.x = PATROL_MARGIN_PX;
                    self.patrol_dir = PatrolDir::Right;
                }
            }
        }
    }

    /// The pattern to execute now; the cursor then advances around the
    /// three-entry cycle.
    pub fn next_pattern(&mut self) -> AttackPattern {
        let pattern = ATTACK_PATTERN_CYCLE[self.pattern_index];
        self.pattern_index = (self.pattern_index + 1) % ATTACK_PATTERN_CYCLE.len();
        pattern
    }

    pub fn is_defeated(&self) -> bool {
        self.entity
            .health
            .as_ref()
            .map(Health::is_dead)
            .unwrap_or(true)
    }
}

/// Angular offset of spread bullet `index`, centered on the bearing.
pub(crate) fn spread_offset(index: u32) -> f32 {
    (index as f32 - (SPREAD_SHOT_COUNT - 1) as f32 / 2.0) * SPREAD_ANGLE_STEP_RAD
}

/// Angular offset of wave bullet `index`, centered on the bearing.
pub(crate) fn wave_offset(index: u32) -> f32 {
    (index as f32 - (WAVE_SHOT_COUNT - 1) as f32 / 2.0) * WAVE_ANGLE_STEP_RAD
}

#[cfg(test)]
mod tests {
    use super::{spread_offset, wave_offset, AttackPattern, Boss, BossPhase, PatrolDir};
    use crate::clock::Scheduler;
    use crate::math::Vec2;

    fn test_boss() -> Boss {
        let mut scheduler: Scheduler<u8> = Scheduler::default();
        let attack_timer = scheduler.schedule(0.0, 1.0, 0);
        Boss::spawn(Vec2 { x: 540.0, y: -300.0 }, 560.0, attack_timer)
    }

    #[test]
    fn descent_clamps_onto_the_hold_line_and_starts_patrolling() {
        let mut boss = test_boss();
        assert_eq!(boss.phase, BossPhase::Descending);

        for _ in 0..2000 {
            boss.update_movement(16.0, 1080.0);
            if boss.phase == BossPhase::Patrolling {
                break;
            }
        }
        assert_eq!(boss.phase, BossPhase::Patrolling);
        assert_eq!(boss.entity.position.y, 560.0);
    }

    #[test]
    fn patrol_reverses_at_both_margins() {
        let mut boss = test_boss();
        boss.phase = BossPhase::Patrolling;
        boss.entity.position.x = 975.0;

        boss.update_movement(100.0, 1080.0);
        assert_eq!(boss.entity.position.x, 980.0);
        assert_eq!(boss.patrol_dir, PatrolDir::Left);

        boss.entity.position.x = 105.0;
        boss.update_movement(100.0, 1080.0);
        assert_eq!(boss.entity.position.x, 100.0);
        assert_eq!(boss.patrol_dir, PatrolDir::Right);
    }

    #[test]
    fn patterns_cycle_aimed_spread_wave() {
        let mut boss = test_boss();
        assert_eq!(boss.next_pattern(), AttackPattern::Aimed);
        assert_eq!(boss.next_pattern(), AttackPattern::Spread);
        assert_eq!(boss.next_pattern(), AttackPattern::Wave);
        assert_eq!(boss.next_pattern(), AttackPattern::Aimed);
    }

    #[test]
    fn volley_offsets_are_centered_on_the_bearing() {
        let spread: Vec<f32> = (0..5).map(spread_offset).collect();
        assert!((spread[2]).abs() < 1e-6);
        assert!((spread[0] + spread[4]).abs() < 1e-6);
        assert!((spread[4] - 0.52).abs() < 1e-4);

        let wave_sum: f32 = (0..10).map(wave_offset).sum();
        assert!(wave_sum.abs() < 1e-4);
        assert!((wave_offset(9) - 0.765).abs() < 1e-4);
    }
}

use tracing::info;

const STARTING_KILLS_REQUIRED: u32 = 10;
const KILLS_REQUIRED_STEP: u32 = 5;
const STARTING_MAX_CONCURRENT: u32 = 5;
const MAX_CONCURRENT_STEP: u32 = 2;
const WAVE_BASE_SIZE: u32 = 10;
const WAVE_SIZE_PER_LEVEL: u32 = 2;
const WAVE_LEVEL_INTERVAL: u32 = 5;
const BOSS_LEVEL_INTERVAL: u32 = 10;

/// What a kill tipped over, when it tipped anything at all. Boss levels
/// swallow the wave that would otherwise land on the same multiple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub level: u32,
    pub wave_due: bool,
    pub boss_due: bool,
}

/// Difficulty ramp. Kills advance the level; levels widen the spawn cap
/// and push the next threshold further out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelState {
    level: u32,
    kills_this_level: u32,
    kills_required: u32,
    max_concurrent: u32,
}

impl LevelState {
    pub fn new() -> Self {
        Self {
            level: 1,
            kills_this_level: 0,
            kills_required: STARTING_KILLS_REQUIRED,
            max_concurrent: STARTING_MAX_CONCURRENT,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Cap on simultaneously live enemies the ambient spawner honors.
    pub fn max_concurrent(&self) -> u32 {
        self.max_concurrent
    }

    pub fn kills_required(&self) -> u32 {
        self.kills_required
    }

    pub fn kills_this_level(&self) -> u32 {
        self.kills_this_level
    }

    /// Enemies in one scripted wave at the current level.
    pub fn wave_size(&self) -> u32 {
        WAVE_BASE_SIZE + WAVE_SIZE_PER_LEVEL * self.level
    }

    /// Counts one kill toward the threshold. Crossing it advances the
    /// level, hardens the ramp, and reports which set piece is now due.
    pub fn register_kill(&mut self) -> Option<LevelUp> {
        self.kills_this_level += 1;
        if self.kills_this_level < self.kills_required {
            return None;
        }
        self.kills_this_level = 0;
        self.kills_required += KILLS_REQUIRED_STEP;
        self.max_concurrent += MAX_CONCURRENT_STEP;
        self.level += 1;
        let boss_due = self.level % BOSS_LEVEL_INTERVAL == 0;
        let wave_due = !boss_due && self.level % WAVE_LEVEL_INTERVAL == 0;
        info!(
            level = self.level,
            kills_required = self.kills_required,
            max_concurrent = self.max_concurrent,
            wave_due,
            boss_due,
            "level_up"
        );
        Some(LevelUp {
            level: self.level,
            wave_due,
            boss_due,
        })
    }
}

impl Default for LevelState {
    fn default() -> Self {
        Self::new()
    }
}

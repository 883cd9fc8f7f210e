/// Host-tunable knobs for building a world. Everything else is catalog
/// data or a fixed rule of the simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub play_width: f32,
    pub play_height: f32,
    pub rng_seed: u64,
    pub ship_key: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            play_width: DEFAULT_PLAY_WIDTH_PX,
            play_height: DEFAULT_PLAY_HEIGHT_PX,
            rng_seed: 0,
            ship_key: DEFAULT_SHIP_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickPhase {
    Integrate,
    Sweep,
    Timers,
    Collide,
}

/// The order never varies: movement first so sweeps and collisions see
/// settled positions, timers before collisions so spawned actors collide
/// on the tick they appear.
pub const TICK_PHASE_ORDER: [TickPhase; 4] = [
    TickPhase::Integrate,
    TickPhase::Sweep,
    TickPhase::Timers,
    TickPhase::Collide,
];

/// The whole simulation: pools, player, boss, progression, and the
/// schedule that drives everything between host calls.
#[derive(Debug)]
pub struct World {
    config: SimConfig,
    catalogs: Catalogs,
    clock: VirtualClock,
    scheduler: Scheduler<TimerTask>,
    rng: GameRng,
    pools: Pools,
    player: Player,
    boss: Option<Boss>,
    boss_active: bool,
    level: LevelState,
    score: u32,
    events: EventBus,
    /// Effect definitions parallel to the pickup pool, slot for slot.
    pickup_defs: Vec<Option<PowerUpDef>>,
    /// Ambient spawn cadence; kept so a host can suspend it.
    spawn_timer: TimerHandle,
    last_tick_phases: Vec<TickPhase>,
}

impl World {
    pub fn new(config: SimConfig, catalogs: Catalogs) -> Result<Self, CatalogError> {
        let player = {
            let ship = catalogs.ship(&config.ship_key)?;
            let mut player = Player::from_ship(&config.ship_key, ship);
            player.entity.position = Vec2 {
                x: config.play_width / 2.0,
                y: config.play_height - PLAYER_SPAWN_BOTTOM_OFFSET_PX,
            };
            player
        };
        let rng = GameRng::from_seed(config.rng_seed);
        let mut scheduler = Scheduler::new();
        let spawn_timer = scheduler.schedule_repeating(
            0.0,
            SPAWN_INTERVAL_MS,
            SPAWN_INTERVAL_MS,
            TimerTask::SpawnTick,
        );
        info!(
            ship = %config.ship_key,
            seed = config.rng_seed,
            width = config.play_width,
            height = config.play_height,
            "world_ready"
        );
        Ok(Self {
            config,
            catalogs,
            clock: VirtualClock::default(),
            scheduler,
            rng,
            pools: Pools::new(),
            player,
            boss: None,
            boss_active: false,
            level: LevelState::new(),
            score: 0,
            events: EventBus::default(),
            pickup_defs: vec![None; PICKUP_POOL_CAPACITY],
            spawn_timer,
            last_tick_phases: Vec::with_capacity(TICK_PHASE_ORDER.len()),
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level.level()
    }

    pub fn max_concurrent(&self) -> u32 {
        self.level.max_concurrent()
    }

    pub fn boss_active(&self) -> bool {
        self.boss_active
    }

    pub fn boss(&self) -> Option<&Boss> {
        self.boss.as_ref()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn pools(&self) -> &Pools {
        &self.pools
    }

    pub fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }

    /// Phases executed by the most recent `tick`, in order.
    pub fn last_tick_phases(&self) -> &[TickPhase] {
        &self.last_tick_phases
    }

    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        self.events.drain()
    }

    /// Counts one kill toward progression and runs whatever the new
    /// level demands: announcement, wave, or the boss sequence.
    pub fn register_kill(&mut self) {
        let Some(level_up) = self.level.register_kill() else {
            return;
        };
        self.events.emit(SimEvent::LevelChanged {
            level: level_up.level,
        });
        if level_up.boss_due {
            self.spawn_boss();
        } else if level_up.wave_due {
            let size = self.level.wave_size();
            self.spawn_wave(size);
        }
    }

    fn award_score(&mut self, points: u32) {
        self.score += points;
        self.events.emit(SimEvent::ScoreChanged { score: self.score });
    }

    /// Moves the player by its catalog speed along the signed axis
    /// directions, then clamps the sprite fully inside the play area.
    pub fn move_player(&mut self, dx: f32, dy: f32, dt_ms: f32) {
        if !self.player.entity.active {
            return;
        }
        let Some(movement) = self.player.entity.movement else {
            return;
        };
        let entity = &mut self.player.entity;
        movement.move_horizontally(entity, dx * dt_ms);
        movement.move_vertically(entity, dy * dt_ms);
        let half_w = entity.display_width() / 2.0;
        let half_h = entity.display_height() / 2.0;
        entity.position.x = entity.position.x.clamp(half_w, self.config.play_width - half_w);
        entity.position.y = entity.position.y.clamp(half_h, self.config.play_height - half_h);
    }

    /// Fires the player weapon if the cooldown allows it. The trigger
    /// pull spends the cooldown even when the bullet pool is dry.
    pub fn fire_player_weapon(&mut self) -> bool {
        if !self.player.entity.active {
            return false;
        }
        let Some(weapon) = self.player.entity.weapon else {
            return false;
        };
        let now = self.clock.now_ms();
        if let Some(last) = self.player.last_fired_at_ms {
            if now - last <= f64::from(weapon.fire_interval_ms) {
                return false;
            }
        }
        self.player.last_fired_at_ms = Some(now);
        let origin = self.player.entity.position;
        weapon.shoot(&mut self.pools, origin, PLAYER_SHOT_ANGLE_RAD)
    }

    /// Swaps the player onto another catalog ship mid-run. Health is
    /// deliberately preserved; only stats and the body change.
    pub fn select_ship(&mut self, key: &str) -> Result<(), CatalogError> {
        let ship = self.catalogs.ship(key)?;
        self.player.apply_ship(key, ship);
        info!(ship = %key, "ship_selected");
        Ok(())
    }

    /// Applies a power-up to the player and schedules its single revert.
    /// A buff whose slot is missing is consumed without effect.
    pub fn apply_power_up(&mut self, effect: PowerUpEffect, value: f32, duration_ms: f32) {
        if !self.player.entity.active {
            return;
        }
        let Some(revert) = apply_effect(&mut self.player, effect, value, &mut self.events) else {
            return;
        };
        let now = self.clock.now_ms();
        self.scheduler
            .schedule(now, f64::from(duration_ms), TimerTask::PowerUpRevert { revert });
        if effect == PowerUpEffect::Invincibility {
            self.scheduler.schedule(
                now,
                INVINCIBILITY_BLINK_INTERVAL_MS,
                TimerTask::InvincibilityBlink,
            );
        }
        info!(effect = ?effect, value, duration_ms, "power_up_applied");
    }
}

/// Deferred work drained from the scheduler each tick. Tasks that touch
/// a pooled actor carry a handle and quietly no-op once it is stale.
#[derive(Debug, Clone, Copy, PartialEq)]
enum TimerTask {
    SpawnTick,
    WaveSpawn { remaining: u32 },
    Telegraph { target: PoolHandle, edges_left: u32 },
    PickupExpire { target: PoolHandle },
    PowerUpRevert { revert: PowerUpRevert },
    InvincibilityBlink,
    BossWindup,
    BossAttack,
    BossWaveShot { angle: f32 },
}

impl World {
    fn execute_task(&mut self, task: TimerTask) {
        match task {
            TimerTask::SpawnTick => self.spawn_enemy(),
            TimerTask::WaveSpawn { remaining } => {
                self.spawn_enemy();
                if remaining > 1 {
                    self.scheduler.schedule(
                        self.clock.now_ms(),
                        WAVE_SPAWN_GAP_MS,
                        TimerTask::WaveSpawn {
                            remaining: remaining - 1,
                        },
                    );
                }
            }
            TimerTask::Telegraph { target, edges_left } => self.step_telegraph(target, edges_left),
            TimerTask::PickupExpire { target } => self.expire_pickup(target),
            TimerTask::PowerUpRevert { revert } => {
                execute_revert(&mut self.player, revert, &mut self.events);
            }
            TimerTask::InvincibilityBlink => self.step_invincibility_blink(),
            TimerTask::BossWindup => self.finish_boss_windup(),
            TimerTask::BossAttack => self.execute_boss_attack(),
            TimerTask::BossWaveShot { angle } => self.fire_boss_shot(angle),
        }
    }

    /// One edge of the enemy's warning blink. Once the blink budget is
    /// spent the enemy steadies and fires straight down.
    fn step_telegraph(&mut self, target: PoolHandle, edges_left: u32) {
        let Some(entity) = self.pools.enemies.resolve(target) else {
            return;
        };
        if edges_left > 0 {
            entity.alpha = if entity.alpha < 1.0 { 1.0 } else { DIM_BLINK_ALPHA };
            self.scheduler.schedule(
                self.clock.now_ms(),
                TELEGRAPH_BLINK_INTERVAL_MS,
                TimerTask::Telegraph {
                    target,
                    edges_left: edges_left - 1,
                },
            );
            return;
        }
        entity.alpha = 1.0;
        let origin = entity.position;
        let Some(weapon) = entity.weapon else {
            return;
        };
        weapon.shoot(&mut self.pools, origin, ENEMY_SHOT_ANGLE_RAD);
    }

    fn expire_pickup(&mut self, target: PoolHandle) {
        if self.pools.pickups.resolve(target).is_none() {
            return;
        }
        self.pools.pickups.disable(target.slot);
        self.pickup_defs[target.slot] = None;
        debug!(slot = target.slot, "pickup_expired");
    }

    fn step_invincibility_blink(&mut self) {
        if !self.player.buff_invincible || !self.player.entity.active {
            return;
        }
        let entity = &mut self.player.entity;
        entity.alpha = if entity.alpha < 1.0 { 1.0 } else { DIM_BLINK_ALPHA };
        self.scheduler.schedule(
            self.clock.now_ms(),
            INVINCIBILITY_BLINK_INTERVAL_MS,
            TimerTask::InvincibilityBlink,
        );
    }

    fn finish_boss_windup(&mut self) {
        let now = self.clock.now_ms();
        let attack_timer = self.scheduler.schedule_repeating(
            now,
            BOSS_ATTACK_INTERVAL_MS,
            BOSS_ATTACK_INTERVAL_MS,
            TimerTask::BossAttack,
        );
        let position = Vec2 {
            x: self.config.play_width / 2.0,
            y: BOSS_SPAWN_Y_PX,
        };
        let target_y = self.config.play_height / 2.0 - BOSS_HOLD_OFFSET_PX;
        self.boss = Some(Boss::spawn(position, target_y, attack_timer));
        self.events.emit(SimEvent::BossSpawned);
        info!(target_y, "boss_spawned");
    }

    /// Fires the boss's next pattern in the cycle, aimed at the player's
    /// position at the moment the pattern starts.
    fn execute_boss_attack(&mut self) {
        let Some(boss) = self.boss.as_mut() else {
            return;
        };
        let pattern = boss.next_pattern();
        let origin = boss.entity.position;
        let Some(weapon) = boss.entity.weapon else {
            return;
        };
        let aim = bearing(origin, self.player.entity.position);
        debug!(pattern = ?pattern, aim, "boss_attack");
        match pattern {
            AttackPattern::Aimed => {
                weapon.shoot(&mut self.pools, origin, aim);
            }
            AttackPattern::Spread => {
                for i in 0..SPREAD_SHOT_COUNT {
                    weapon.shoot(&mut self.pools, origin, aim + spread_offset(i));
                }
            }
            AttackPattern::Wave => {
                weapon.shoot(&mut self.pools, origin, aim + wave_offset(0));
                for i in 1..WAVE_SHOT_COUNT {
                    self.scheduler.schedule(
                        self.clock.now_ms(),
                        f64::from(i) * WAVE_SHOT_GAP_MS,
                        TimerTask::BossWaveShot {
                            angle: aim + wave_offset(i),
                        },
                    );
                }
            }
        }
    }

    fn fire_boss_shot(&mut self, angle: f32) {
        let Some(boss) = self.boss.as_ref() else {
            return;
        };
        let origin = boss.entity.position;
        let Some(weapon) = boss.entity.weapon else {
            return;
        };
        weapon.shoot(&mut self.pools, origin, angle);
    }

    /// Retires the boss exactly once: cancels its attack timer, reopens
    /// normal spawning, and pays out the bounty.
    fn finish_boss_defeat(&mut self) {
        let Some(boss) = self.boss.take() else {
            return;
        };
        self.scheduler.cancel(boss.attack_timer);
        self.boss_active = false;
        self.award_score(BOSS_KILL_SCORE);
        self.events.emit(SimEvent::BossDefeated);
        info!(score = self.score, "boss_defeated");
    }
}

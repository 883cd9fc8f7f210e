impl World {
    /// Spawns one enemy from a random catalog archetype just above the
    /// top edge. Silently skipped while a boss owns the screen, when the
    /// concurrency cap is reached, or when the pool is exhausted.
    pub fn spawn_enemy(&mut self) {
        if self.boss_active {
            return;
        }
        if self.pools.enemies.active_count() >= self.level.max_concurrent() as usize {
            return;
        }
        let Some((_, archetype)) = self.rng.pick(self.catalogs.enemy_archetypes()) else {
            return;
        };
        let texture = archetype.texture.clone();
        let speed = archetype.movement_speed + self.level.level() as f32 * ENEMY_SPEED_PER_LEVEL;
        let Some(slot) = self.pools.enemies.get() else {
            return;
        };
        let max_x = self.config.play_width as i32 - ENEMY_SPAWN_MARGIN_PX;
        let x = self.rng.between(ENEMY_SPAWN_MARGIN_PX, max_x) as f32;
        let handle = self.pools.enemies.enable(
            slot,
            x,
            ENEMY_SPAWN_Y_PX,
            ENEMY_SPRITE_SIZE_PX,
            ENEMY_SPRITE_SIZE_PX,
            ENEMY_SCALE,
            0.0,
            speed,
        );
        let entity = self.pools.enemies.entity_mut(slot);
        entity.texture.clone_from(&texture);
        entity.health = Some(Health::new(ENEMY_STARTING_HEALTH));
        entity.weapon = Some(Weapon {
            pool: PoolId::EnemyBullets,
            fire_interval_ms: 0.0,
            bullet_w: BULLET_WIDTH_PX,
            bullet_h: BULLET_HEIGHT_PX,
            bullet_scale: DEFAULT_BULLET_SCALE,
            bullet_speed: BULLET_SPEED_PX_PER_MS,
        });
        let delay = f64::from(self.rng.between(TELEGRAPH_DELAY_MIN_MS, TELEGRAPH_DELAY_MAX_MS));
        self.scheduler.schedule(
            self.clock.now_ms(),
            delay,
            TimerTask::Telegraph {
                target: handle,
                edges_left: TELEGRAPH_BLINK_EDGES,
            },
        );
        debug!(x, speed, texture = %texture, "enemy_spawned");
    }

    /// Announces and spawns a wave: the first enemy immediately, the
    /// rest staggered on the scheduler.
    pub fn spawn_wave(&mut self, size: u32) {
        self.events.emit(SimEvent::WaveIncoming { size });
        info!(size, level = self.level.level(), "wave_incoming");
        if size == 0 {
            return;
        }
        self.spawn_enemy();
        if size > 1 {
            self.scheduler.schedule(
                self.clock.now_ms(),
                WAVE_SPAWN_GAP_MS,
                TimerTask::WaveSpawn { remaining: size - 1 },
            );
        }
    }

    /// Clears the field and starts the boss windup. While the boss flag
    /// is set every normal spawn request is dropped.
    pub fn spawn_boss(&mut self) {
        if self.boss_active {
            return;
        }
        self.boss_active = true;
        for slot in 0..self.pools.enemies.capacity() {
            if self.pools.enemies.entity(slot).active {
                self.pools.enemies.disable(slot);
            }
        }
        self.events.emit(SimEvent::BossIncoming);
        info!(level = self.level.level(), "boss_incoming");
        self.scheduler
            .schedule(self.clock.now_ms(), BOSS_WINDUP_MS, TimerTask::BossWindup);
    }

    /// Rolls the drop chance for a defeated enemy and, on success,
    /// drops a random catalog power-up at its last position.
    fn spawn_power_up(&mut self, position: Vec2) {
        if self.rng.between(0, POWER_UP_ROLL_MAX) <= POWER_UP_ROLL_THRESHOLD {
            return;
        }
        let Some(def) = self.rng.pick(self.catalogs.power_ups()) else {
            return;
        };
        let def = def.clone();
        self.spawn_pickup(position, def);
    }

    fn spawn_pickup(&mut self, position: Vec2, def: PowerUpDef) {
        let Some(slot) = self.pools.pickups.get() else {
            return;
        };
        let handle = self.pools.pickups.enable(
            slot,
            position.x,
            position.y,
            PICKUP_SPRITE_SIZE_PX,
            PICKUP_SPRITE_SIZE_PX,
            PICKUP_SCALE,
            0.0,
            PICKUP_FALL_SPEED_PX_PER_MS,
        );
        self.pools
            .pickups
            .entity_mut(slot)
            .texture
            .clone_from(&def.texture);
        self.scheduler.schedule(
            self.clock.now_ms(),
            f64::from(def.duration_ms),
            TimerTask::PickupExpire { target: handle },
        );
        debug!(effect = ?def.effect, x = position.x, y = position.y, "pickup_spawned");
        self.pickup_defs[slot] = Some(def);
    }
}

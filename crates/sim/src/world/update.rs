impl World {
    /// One fixed simulation step. Phases always run in
    /// `TICK_PHASE_ORDER`; a zero-length step moves nothing and fires no
    /// new timers but still resolves collisions.
    pub fn tick(&mut self, dt_ms: f32) {
        self.last_tick_phases.clear();
        for phase in TICK_PHASE_ORDER {
            match phase {
                TickPhase::Integrate => self.integrate(dt_ms),
                TickPhase::Sweep => self.sweep_out_of_bounds(),
                TickPhase::Timers => self.run_timers(dt_ms),
                TickPhase::Collide => self.resolve_collisions(),
            }
            self.last_tick_phases.push(phase);
        }
    }

    /// Applies velocity to every active pooled actor. The player moves
    /// only through `move_player`; the boss by its own phase logic.
    fn integrate(&mut self, dt_ms: f32) {
        for pool in [
            &mut self.pools.player_bullets,
            &mut self.pools.enemy_bullets,
            &mut self.pools.boss_bullets,
            &mut self.pools.enemies,
            &mut self.pools.pickups,
        ] {
            for slot in 0..pool.capacity() {
                let entity = pool.entity_mut(slot);
                if !entity.active {
                    continue;
                }
                entity.position.x += entity.velocity.x * dt_ms;
                entity.position.y += entity.velocity.y * dt_ms;
            }
        }
        if let Some(boss) = self.boss.as_mut() {
            boss.update_movement(dt_ms, self.config.play_width);
        }
    }

    /// Disables pooled actors that drifted a full display extent past any
    /// edge, returning their slots to circulation.
    fn sweep_out_of_bounds(&mut self) {
        let width = self.config.play_width;
        let height = self.config.play_height;
        for pool in [
            &mut self.pools.player_bullets,
            &mut self.pools.enemy_bullets,
            &mut self.pools.boss_bullets,
            &mut self.pools.enemies,
        ] {
            for slot in 0..pool.capacity() {
                let entity = pool.entity(slot);
                if entity.active && out_of_bounds(entity, width, height) {
                    pool.disable(slot);
                }
            }
        }
        for slot in 0..self.pools.pickups.capacity() {
            let entity = self.pools.pickups.entity(slot);
            if entity.active && out_of_bounds(entity, width, height) {
                self.pools.pickups.disable(slot);
                self.pickup_defs[slot] = None;
            }
        }
    }

    fn run_timers(&mut self, dt_ms: f32) {
        self.clock.advance(dt_ms);
        for task in self.scheduler.drain_due(self.clock.now_ms()) {
            self.execute_task(task);
        }
    }

    fn resolve_collisions(&mut self) {
        let outcome = resolve(ResolveContext {
            player: &mut self.player,
            boss: self.boss.as_mut(),
            pools: &mut self.pools,
            events: &mut self.events,
        });
        for kill in outcome.kills {
            if kill.from_bullet {
                self.award_score(KILL_SCORE);
                self.register_kill();
                self.spawn_power_up(kill.position);
            } else {
                self.register_kill();
            }
        }
        for slot in outcome.pickups_collected {
            if let Some(def) = self.pickup_defs[slot].take() {
                self.apply_power_up(def.effect, def.effect_value, def.duration_ms);
            }
        }
        if outcome.boss_defeated {
            self.finish_boss_defeat();
        }
    }
}

fn out_of_bounds(entity: &Entity, width: f32, height: f32) -> bool {
    let extent_w = entity.display_width();
    let extent_h = entity.display_height();
    entity.position.y < -extent_h
        || entity.position.y > height + extent_h
        || entity.position.x < -extent_w
        || entity.position.x > width + extent_w
}

use crate::boss::Boss;
use crate::entity::Entity;
use crate::events::{EventBus, SimEvent};
use crate::math::{distance_sq, Vec2};
use crate::player::Player;
use crate::pool::Pools;

/// Circle-against-circle test on the entities' collision bodies.
pub(crate) fn overlaps(a: &Entity, b: &Entity) -> bool {
    let reach = a.body.radius + b.body.radius;
    distance_sq(a.body_center(), b.body_center()) <= reach * reach
}

/// An enemy that died during resolution. Bullet kills score and roll for
/// a power-up at `position`; melee kills only count toward the level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct KillRecord {
    pub position: Vec2,
    pub from_bullet: bool,
}

/// Everything the resolver decided but could not apply on its own.
/// The world turns these into score, spawns, and the boss teardown.
#[derive(Debug, Default)]
pub(crate) struct ResolveOutcome {
    pub kills: Vec<KillRecord>,
    /// Pickup pool slots collected by the player this pass.
    pub pickups_collected: Vec<usize>,
    pub boss_defeated: bool,
}

pub(crate) struct ResolveContext<'a> {
    pub player: &'a mut Player,
    pub boss: Option<&'a mut Boss>,
    pub pools: &'a mut Pools,
    pub events: &'a mut EventBus,
}

/// One synchronous resolution pass over the fixed pair table. Rules run
/// in table order; a participant disabled by an earlier rule no longer
/// matches later ones in the same pass.
pub(crate) fn resolve(ctx: ResolveContext<'_>) -> ResolveOutcome {
    let ResolveContext {
        player,
        boss,
        pools,
        events,
    } = ctx;
    let mut outcome = ResolveOutcome::default();

    // Player bullets against enemies. Position is captured before the
    // enemy slot is recycled so the power-up roll lands where it died.
    {
        let bullets = &mut pools.player_bullets;
        let enemies = &mut pools.enemies;
        for bullet_slot in 0..bullets.capacity() {
            if !bullets.entity(bullet_slot).active {
                continue;
            }
            for enemy_slot in 0..enemies.capacity() {
                if !enemies.entity(enemy_slot).active {
                    continue;
                }
                if !overlaps(bullets.entity(bullet_slot), enemies.entity(enemy_slot)) {
                    continue;
                }
                let position = enemies.entity(enemy_slot).position;
                bullets.disable(bullet_slot);
                enemies.disable(enemy_slot);
                outcome.kills.push(KillRecord {
                    position,
                    from_bullet: true,
                });
                break;
            }
        }
    }

    // Player bullets against enemy bullets: mutual cancellation.
    {
        let bullets = &mut pools.player_bullets;
        let enemy_bullets = &mut pools.enemy_bullets;
        for bullet_slot in 0..bullets.capacity() {
            if !bullets.entity(bullet_slot).active {
                continue;
            }
            for other_slot in 0..enemy_bullets.capacity() {
                if !enemy_bullets.entity(other_slot).active {
                    continue;
                }
                if !overlaps(bullets.entity(bullet_slot), enemy_bullets.entity(other_slot)) {
                    continue;
                }
                bullets.disable(bullet_slot);
                enemy_bullets.disable(other_slot);
                break;
            }
        }
    }

    // Enemy bullets against the player. The bullet dies either way;
    // invincibility only spares the health and the stop.
    {
        let enemy_bullets = &mut pools.enemy_bullets;
        for slot in 0..enemy_bullets.capacity() {
            if !player.entity.active {
                break;
            }
            if !enemy_bullets.entity(slot).active {
                continue;
            }
            if !overlaps(&player.entity, enemy_bullets.entity(slot)) {
                continue;
            }
            enemy_bullets.disable(slot);
            if !player.is_invincible() {
                damage_player(player, -1, events);
                player.entity.velocity = Vec2::default();
            }
        }
    }

    // Melee contact. The enemy always dies by losing its own max health;
    // the stop applies even to an invincible player.
    {
        let enemies = &mut pools.enemies;
        for slot in 0..enemies.capacity() {
            if !player.entity.active {
                break;
            }
            if !enemies.entity(slot).active {
                continue;
            }
            if !overlaps(&player.entity, enemies.entity(slot)) {
                continue;
            }
            if !player.is_invincible() {
                damage_player(player, -1, events);
            }
            let enemy = enemies.entity_mut(slot);
            let position = enemy.position;
            if let Some(health) = enemy.health.as_mut() {
                let max = health.max();
                health.inc(-max);
            }
            enemies.disable(slot);
            outcome.kills.push(KillRecord {
                position,
                from_bullet: false,
            });
            player.entity.velocity = Vec2::default();
        }
    }

    if let Some(boss) = boss {
        // Ramming the boss hurts both sides every pass, invincible or not.
        if player.entity.active
            && boss.entity.active
            && overlaps(&player.entity, &boss.entity)
        {
            damage_player(player, -2, events);
            damage_boss(boss, -1, events, &mut outcome);
        }

        // Player bullets against the boss.
        {
            let bullets = &mut pools.player_bullets;
            for slot in 0..bullets.capacity() {
                if !boss.entity.active {
                    break;
                }
                if !bullets.entity(slot).active {
                    continue;
                }
                if !overlaps(bullets.entity(slot), &boss.entity) {
                    continue;
                }
                bullets.disable(slot);
                damage_boss(boss, -1, events, &mut outcome);
            }
        }

        // Boss bullets against the player: heavy hit, no exception.
        {
            let boss_bullets = &mut pools.boss_bullets;
            for slot in 0..boss_bullets.capacity() {
                if !player.entity.active {
                    break;
                }
                if !boss_bullets.entity(slot).active {
                    continue;
                }
                if !overlaps(&player.entity, boss_bullets.entity(slot)) {
                    continue;
                }
                boss_bullets.disable(slot);
                damage_player(player, -3, events);
            }
        }

        // Player bullets against boss bullets: mutual cancellation.
        {
            let bullets = &mut pools.player_bullets;
            let boss_bullets = &mut pools.boss_bullets;
            for bullet_slot in 0..bullets.capacity() {
                if !bullets.entity(bullet_slot).active {
                    continue;
                }
                for other_slot in 0..boss_bullets.capacity() {
                    if !boss_bullets.entity(other_slot).active {
                        continue;
                    }
                    if !overlaps(bullets.entity(bullet_slot), boss_bullets.entity(other_slot)) {
                        continue;
                    }
                    bullets.disable(bullet_slot);
                    boss_bullets.disable(other_slot);
                    break;
                }
            }
        }
    }

    // Pickups. The effect itself is applied by the world, which owns the
    // definition side table and the revert schedule.
    {
        let pickups = &mut pools.pickups;
        for slot in 0..pickups.capacity() {
            if !player.entity.active {
                break;
            }
            if !pickups.entity(slot).active {
                continue;
            }
            if !overlaps(&player.entity, pickups.entity(slot)) {
                continue;
            }
            pickups.disable(slot);
            outcome.pickups_collected.push(slot);
            player.entity.velocity = Vec2::default();
        }
    }

    outcome
}

fn damage_player(player: &mut Player, delta: i32, events: &mut EventBus) {
    let Some(health) = player.entity.health.as_mut() else {
        return;
    };
    let change = health.inc(delta);
    events.emit(SimEvent::PlayerHealthChanged {
        current: change.current,
    });
    if change.died_now {
        player.entity.active = false;
        events.emit(SimEvent::PlayerDied);
    }
}

fn damage_boss(boss: &mut Boss, delta: i32, events: &mut EventBus, outcome: &mut ResolveOutcome) {
    let Some(health) = boss.entity.health.as_mut() else {
        return;
    };
    let change = health.inc(delta);
    events.emit(SimEvent::BossHealthChanged {
        current: change.current,
    });
    if change.died_now {
        outcome.boss_defeated = true;
    }
}

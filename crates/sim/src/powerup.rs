use serde::Deserialize;

use crate::events::{EventBus, SimEvent};
use crate::player::Player;

pub(crate) const INVINCIBILITY_BLINK_INTERVAL_MS: f64 = 200.0;

const MS_PER_SECOND: f32 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerUpEffect {
    RapidFire,
    BigBullets,
    Speed,
    Invincibility,
}

/// Undo record minted when a buff is applied. Each carries the value the
/// player had at that moment, so reverts restore exactly what they saw,
/// even when buffs of the same kind overlap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum PowerUpRevert {
    FireInterval { ms: f32 },
    BulletScale { scale: f32 },
    MoveSpeed { speed: f32 },
    Invincibility,
}

impl PowerUpRevert {
    pub(crate) fn effect(&self) -> PowerUpEffect {
        match self {
            PowerUpRevert::FireInterval { .. } => PowerUpEffect::RapidFire,
            PowerUpRevert::BulletScale { .. } => PowerUpEffect::BigBullets,
            PowerUpRevert::MoveSpeed { .. } => PowerUpEffect::Speed,
            PowerUpRevert::Invincibility => PowerUpEffect::Invincibility,
        }
    }
}

/// Applies a buff to the player and returns the revert to schedule.
/// Returns `None` when the player is missing the slot the buff needs,
/// in which case the pickup is consumed with no further consequence.
pub(crate) fn apply_effect(
    player: &mut Player,
    effect: PowerUpEffect,
    value: f32,
    events: &mut EventBus,
) -> Option<PowerUpRevert> {
    let revert = match effect {
        PowerUpEffect::RapidFire => {
            let weapon = player.entity.weapon.as_mut()?;
            let prior_ms = weapon.fire_interval_ms;
            weapon.fire_interval_ms = value * MS_PER_SECOND;
            PowerUpRevert::FireInterval { ms: prior_ms }
        }
        PowerUpEffect::BigBullets => {
            let weapon = player.entity.weapon.as_mut()?;
            let prior_scale = weapon.bullet_scale;
            weapon.bullet_scale = value;
            PowerUpRevert::BulletScale { scale: prior_scale }
        }
        PowerUpEffect::Speed => {
            let movement = player.entity.movement.as_mut()?;
            let prior_speed = movement.speed;
            movement.speed += value;
            PowerUpRevert::MoveSpeed { speed: prior_speed }
        }
        PowerUpEffect::Invincibility => {
            player.buff_invincible = true;
            PowerUpRevert::Invincibility
        }
    };
    events.emit(SimEvent::PowerUpApplied { effect });
    Some(revert)
}

/// Runs a scheduled revert. Slots that disappeared in the meantime are
/// skipped; the expiry event still fires so observers stay consistent.
pub(crate) fn execute_revert(player: &mut Player, revert: PowerUpRevert, events: &mut EventBus) {
    match revert {
        PowerUpRevert::FireInterval { ms } => {
            if let Some(weapon) = player.entity.weapon.as_mut() {
                weapon.fire_interval_ms = ms;
            }
        }
        PowerUpRevert::BulletScale { scale } => {
            if let Some(weapon) = player.entity.weapon.as_mut() {
                weapon.bullet_scale = scale;
            }
        }
        PowerUpRevert::MoveSpeed { speed } => {
            if let Some(movement) = player.entity.movement.as_mut() {
                movement.speed = speed;
            }
        }
        PowerUpRevert::Invincibility => {
            player.buff_invincible = false;
            player.entity.alpha = 1.0;
        }
    }
    events.emit(SimEvent::PowerUpExpired {
        effect: revert.effect(),
    });
}

#[cfg(test)]
mod tests {
    use super::{apply_effect, execute_revert, PowerUpEffect, PowerUpRevert};
    use crate::catalog::Catalogs;
    use crate::events::{EventBus, SimEvent};
    use crate::player::Player;
    use crate::weapon::DEFAULT_BULLET_SCALE;

    fn test_player() -> Player {
        let catalogs = Catalogs::builtin();
        Player::from_ship("1", catalogs.ship("1").unwrap())
    }

    #[test]
    fn rapidfire_swaps_the_fire_interval_and_reverts_it() {
        let mut player = test_player();
        let mut events = EventBus::default();
        assert_eq!(player.entity.weapon.unwrap().fire_interval_ms, 1000.0);

        let revert = apply_effect(&mut player, PowerUpEffect::RapidFire, 0.2, &mut events)
            .unwrap();
        assert_eq!(player.entity.weapon.unwrap().fire_interval_ms, 200.0);
        assert_eq!(revert, PowerUpRevert::FireInterval { ms: 1000.0 });

        execute_revert(&mut player, revert, &mut events);
        assert_eq!(player.entity.weapon.unwrap().fire_interval_ms, 1000.0);
        assert_eq!(
            events.drain(),
            vec![
                SimEvent::PowerUpApplied {
                    effect: PowerUpEffect::RapidFire
                },
                SimEvent::PowerUpExpired {
                    effect: PowerUpEffect::RapidFire
                },
            ]
        );
    }

    #[test]
    fn speed_buff_is_additive() {
        let mut player = test_player();
        let mut events = EventBus::default();
        let base = player.entity.movement.unwrap().speed;

        let revert =
            apply_effect(&mut player, PowerUpEffect::Speed, 0.4, &mut events).unwrap();
        assert_eq!(player.entity.movement.unwrap().speed, base + 0.4);

        execute_revert(&mut player, revert, &mut events);
        assert_eq!(player.entity.movement.unwrap().speed, base);
    }

    #[test]
    fn overlapping_buffs_revert_to_values_captured_at_each_application() {
        let mut player = test_player();
        let mut events = EventBus::default();

        let first =
            apply_effect(&mut player, PowerUpEffect::BigBullets, 8.0, &mut events).unwrap();
        let second =
            apply_effect(&mut player, PowerUpEffect::BigBullets, 8.0, &mut events).unwrap();
        assert_eq!(
            first,
            PowerUpRevert::BulletScale {
                scale: DEFAULT_BULLET_SCALE
            }
        );
        assert_eq!(second, PowerUpRevert::BulletScale { scale: 8.0 });

        execute_revert(&mut player, first, &mut events);
        execute_revert(&mut player, second, &mut events);
        assert_eq!(player.entity.weapon.unwrap().bullet_scale, 8.0);
    }

    #[test]
    fn invincibility_sets_the_flag_and_clears_it_on_revert() {
        let mut player = test_player();
        let mut events = EventBus::default();

        let revert =
            apply_effect(&mut player, PowerUpEffect::Invincibility, 0.0, &mut events).unwrap();
        assert!(player.buff_invincible);
        assert!(player.is_invincible());

        player.entity.alpha = 0.5;
        execute_revert(&mut player, revert, &mut events);
        assert!(!player.buff_invincible);
        assert!(!player.is_invincible());
        assert_eq!(player.entity.alpha, 1.0);
    }

    #[test]
    fn a_buff_without_its_slot_applies_nothing() {
        let mut player = test_player();
        let mut events = EventBus::default();
        player.entity.weapon = None;

        let revert = apply_effect(&mut player, PowerUpEffect::RapidFire, 0.2, &mut events);
        assert_eq!(revert, None);
        assert!(events.is_empty());
    }
}

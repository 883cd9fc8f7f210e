use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::powerup::PowerUpEffect;
use crate::texture_keys::{validate_texture_key, TextureKeyError};

pub const ENEMY_CATALOG_FILE: &str = "enemies.json";
pub const SHIP_CATALOG_FILE: &str = "ships.json";
pub const POWER_UP_CATALOG_FILE: &str = "powerups.json";

/// One spawnable enemy kind. Speed is the base descent rate in px/ms;
/// level scaling is added on top at spawn time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyArchetype {
    pub movement_speed: f32,
    pub texture: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipBody {
    pub radius: f32,
    #[serde(default)]
    pub offset_x: f32,
    #[serde(default)]
    pub offset_y: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipDef {
    pub movement_speed: f32,
    /// Seconds between player shots.
    pub rate_of_fire: f32,
    pub health: i32,
    #[serde(default)]
    pub invincible: bool,
    pub texture: String,
    pub body: ShipBody,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerUpDef {
    pub texture: String,
    pub effect: PowerUpEffect,
    /// Doubles as pickup shelf life and buff duration once collected.
    pub duration_ms: f32,
    pub effect_value: f32,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog file {path} at {at}")]
    Parse {
        path: PathBuf,
        at: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("catalog file {path} is invalid: {reason}")]
    Invalid { path: PathBuf, reason: String },
    #[error("texture key '{key}' in {path} is invalid")]
    Texture {
        path: PathBuf,
        key: String,
        #[source]
        source: TextureKeyError,
    },
    #[error("unknown ship key '{key}'")]
    UnknownShip { key: String },
}

/// Read-only game data, fully resolved and validated before the world is
/// built. Nothing here changes mid-run.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalogs {
    /// Sorted by name so uniform picks are deterministic under one seed.
    enemies: Vec<(String, EnemyArchetype)>,
    ships: BTreeMap<String, ShipDef>,
    power_ups: Vec<PowerUpDef>,
}

impl Catalogs {
    /// Loads `enemies.json`, `ships.json`, and `powerups.json` from `dir`.
    /// Any missing file, malformed document, or invalid entry is fatal.
    pub fn load_from_dir(dir: &Path) -> Result<Self, CatalogError> {
        let enemies: BTreeMap<String, EnemyArchetype> =
            parse_file(dir.join(ENEMY_CATALOG_FILE))?;
        let ships: BTreeMap<String, ShipDef> = parse_file(dir.join(SHIP_CATALOG_FILE))?;
        let power_ups: Vec<PowerUpDef> = parse_file(dir.join(POWER_UP_CATALOG_FILE))?;

        let catalogs = Self {
            enemies: enemies.into_iter().collect(),
            ships,
            power_ups,
        };
        catalogs.validate(dir)?;
        info!(
            enemies = catalogs.enemies.len(),
            ships = catalogs.ships.len(),
            power_ups = catalogs.power_ups.len(),
            dir = %dir.display(),
            "catalogs_loaded"
        );
        Ok(catalogs)
    }

    /// Default data for tests and hosts that run without a catalog
    /// directory.
    pub fn builtin() -> Self {
        let enemies = vec![
            (
                "alan".to_string(),
                EnemyArchetype {
                    movement_speed: 0.2,
                    texture: "alan".to_string(),
                },
            ),
            (
                "bonbon".to_string(),
                EnemyArchetype {
                    movement_speed: 0.25,
                    texture: "bonbon".to_string(),
                },
            ),
            (
                "lips".to_string(),
                EnemyArchetype {
                    movement_speed: 0.3,
                    texture: "lips".to_string(),
                },
            ),
        ];
        let ships = BTreeMap::from([
            (
                "1".to_string(),
                ShipDef {
                    movement_speed: 0.9,
                    rate_of_fire: 1.0,
                    health: 3,
                    invincible: false,
                    texture: "ships/ship_1".to_string(),
                    body: ShipBody {
                        radius: 54.0,
                        offset_x: 0.0,
                        offset_y: 12.0,
                    },
                },
            ),
            (
                "2".to_string(),
                ShipDef {
                    movement_speed: 1.2,
                    rate_of_fire: 0.5,
                    health: 2,
                    invincible: false,
                    texture: "ships/ship_2".to_string(),
                    body: ShipBody {
                        radius: 48.0,
                        offset_x: 0.0,
                        offset_y: 8.0,
                    },
                },
            ),
            (
                "3".to_string(),
                ShipDef {
                    movement_speed: 0.6,
                    rate_of_fire: 0.8,
                    health: 5,
                    invincible: false,
                    texture: "ships/ship_3".to_string(),
                    body: ShipBody {
                        radius: 60.0,
                        offset_x: 0.0,
                        offset_y: 16.0,
                    },
                },
            ),
        ]);
        let power_ups = vec![
            PowerUpDef {
                texture: "powerups/rapidfire".to_string(),
                effect: PowerUpEffect::RapidFire,
                duration_ms: 5000.0,
                effect_value: 0.2,
            },
            PowerUpDef {
                texture: "powerups/bigbullets".to_string(),
                effect: PowerUpEffect::BigBullets,
                duration_ms: 5000.0,
                effect_value: 8.0,
            },
            PowerUpDef {
                texture: "powerups/speed".to_string(),
                effect: PowerUpEffect::Speed,
                duration_ms: 5000.0,
                effect_value: 0.4,
            },
            PowerUpDef {
                texture: "powerups/invincibility".to_string(),
                effect: PowerUpEffect::Invincibility,
                duration_ms: 3000.0,
                effect_value: 0.0,
            },
        ];
        Self {
            enemies,
            ships,
            power_ups,
        }
    }

    pub fn enemy_archetypes(&self) -> &[(String, EnemyArchetype)] {
        &self.enemies
    }

    pub fn power_ups(&self) -> &[PowerUpDef] {
        &self.power_ups
    }

    /// Resolves a ship key, failing loudly: a key nobody shipped is a
    /// configuration mistake, not something to paper over mid-run.
    pub fn ship(&self, key: &str) -> Result<&ShipDef, CatalogError> {
        self.ships.get(key).ok_or_else(|| CatalogError::UnknownShip {
            key: key.to_string(),
        })
    }

    pub fn validate(&self, dir: &Path) -> Result<(), CatalogError> {
        let enemies_path = dir.join(ENEMY_CATALOG_FILE);
        if self.enemies.is_empty() {
            return Err(CatalogError::Invalid {
                path: enemies_path,
                reason: "no enemy archetypes defined".to_string(),
            });
        }
        for (name, archetype) in &self.enemies {
            require_positive(
                &enemies_path,
                archetype.movement_speed,
                &format!("archetype '{name}' movementSpeed"),
            )?;
            require_texture(&enemies_path, &archetype.texture)?;
        }

        let ships_path = dir.join(SHIP_CATALOG_FILE);
        if self.ships.is_empty() {
            return Err(CatalogError::Invalid {
                path: ships_path,
                reason: "no ships defined".to_string(),
            });
        }
        for (key, ship) in &self.ships {
            require_positive(
                &ships_path,
                ship.movement_speed,
                &format!("ship '{key}' movementSpeed"),
            )?;
            require_positive(
                &ships_path,
                ship.rate_of_fire,
                &format!("ship '{key}' rateOfFire"),
            )?;
            if ship.health <= 0 {
                return Err(CatalogError::Invalid {
                    path: ships_path,
                    reason: format!("ship '{key}' health must be positive"),
                });
            }
            require_positive(
                &ships_path,
                ship.body.radius,
                &format!("ship '{key}' body radius"),
            )?;
            require_texture(&ships_path, &ship.texture)?;
        }

        let power_ups_path = dir.join(POWER_UP_CATALOG_FILE);
        if self.power_ups.is_empty() {
            return Err(CatalogError::Invalid {
                path: power_ups_path,
                reason: "no power-ups defined".to_string(),
            });
        }
        for (index, def) in self.power_ups.iter().enumerate() {
            require_positive(
                &power_ups_path,
                def.duration_ms,
                &format!("power-up {index} durationMs"),
            )?;
            if !def.effect_value.is_finite() {
                return Err(CatalogError::Invalid {
                    path: power_ups_path,
                    reason: format!("power-up {index} effectValue must be finite"),
                });
            }
            if def.effect == PowerUpEffect::RapidFire && def.effect_value <= 0.0 {
                return Err(CatalogError::Invalid {
                    path: power_ups_path,
                    reason: format!(
                        "power-up {index} rapidfire effectValue must be a positive fire rate"
                    ),
                });
            }
            require_texture(&power_ups_path, &def.texture)?;
        }
        Ok(())
    }
}

fn require_positive(path: &Path, value: f32, what: &str) -> Result<(), CatalogError> {
    if value.is_finite() && value > 0.0 {
        return Ok(());
    }
    Err(CatalogError::Invalid {
        path: path.to_path_buf(),
        reason: format!("{what} must be positive, got {value}"),
    })
}

fn require_texture(path: &Path, key: &str) -> Result<(), CatalogError> {
    validate_texture_key(key).map_err(|source| CatalogError::Texture {
        path: path.to_path_buf(),
        key: key.to_string(),
        source,
    })
}

fn parse_file<T: serde::de::DeserializeOwned>(path: PathBuf) -> Result<T, CatalogError> {
    let raw = fs::read_to_string(&path).map_err(|source| CatalogError::Read {
        path: path.clone(),
        source,
    })?;
    let mut deserializer = serde_json::Deserializer::from_str(&raw);
    match serde_path_to_error::deserialize(&mut deserializer) {
        Ok(value) => Ok(value),
        Err(error) => {
            let at = error.path().to_string();
            Err(CatalogError::Parse {
                path,
                at,
                source: error.into_inner(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::{CatalogError, Catalogs};
    use crate::powerup::PowerUpEffect;

    const VALID_ENEMIES: &str = r#"{
        "alan": { "movementSpeed": 0.2, "texture": "alan" },
        "lips": { "movementSpeed": 0.3, "texture": "lips" }
    }"#;
    const VALID_SHIPS: &str = r#"{
        "1": {
            "movementSpeed": 0.9,
            "rateOfFire": 1.0,
            "health": 3,
            "texture": "ships/ship_1",
            "body": { "radius": 54.0, "offsetY": 12.0 }
        }
    }"#;
    const VALID_POWER_UPS: &str = r#"[
        { "texture": "powerups/rapidfire", "effect": "rapidfire", "durationMs": 5000, "effectValue": 0.2 },
        { "texture": "powerups/bigbullets", "effect": "bigbullets", "durationMs": 5000, "effectValue": 8.0 },
        { "texture": "powerups/speed", "effect": "speed", "durationMs": 5000, "effectValue": 0.4 },
        { "texture": "powerups/invincibility", "effect": "invincibility", "durationMs": 3000, "effectValue": 0 }
    ]"#;

    fn write_valid_dir(dir: &Path) {
        fs::write(dir.join("enemies.json"), VALID_ENEMIES).unwrap();
        fs::write(dir.join("ships.json"), VALID_SHIPS).unwrap();
        fs::write(dir.join("powerups.json"), VALID_POWER_UPS).unwrap();
    }

    #[test]
    fn builtin_passes_validation() {
        let catalogs = Catalogs::builtin();
        catalogs.validate(Path::new("builtin")).unwrap();
        assert!(catalogs.ship("1").is_ok());
        assert_eq!(catalogs.power_ups().len(), 4);
    }

    #[test]
    fn loads_a_valid_catalog_directory() {
        let dir = tempfile::tempdir().unwrap();
        write_valid_dir(dir.path());

        let catalogs = Catalogs::load_from_dir(dir.path()).unwrap();
        assert_eq!(catalogs.enemy_archetypes().len(), 2);
        assert_eq!(catalogs.enemy_archetypes()[0].0, "alan");
        let ship = catalogs.ship("1").unwrap();
        assert_eq!(ship.health, 3);
        assert!(!ship.invincible);
        assert_eq!(ship.body.offset_y, 12.0);
        assert_eq!(catalogs.power_ups()[0].effect, PowerUpEffect::RapidFire);
    }

    #[test]
    fn missing_file_fails_with_the_path() {
        let dir = tempfile::tempdir().unwrap();
        write_valid_dir(dir.path());
        fs::remove_file(dir.path().join("ships.json")).unwrap();

        let error = Catalogs::load_from_dir(dir.path()).unwrap_err();
        match error {
            CatalogError::Read { path, .. } => {
                assert!(path.ends_with("ships.json"));
            }
            other => panic!("expected Read error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_field_reports_the_json_path() {
        let dir = tempfile::tempdir().unwrap();
        write_valid_dir(dir.path());
        fs::write(
            dir.path().join("enemies.json"),
            r#"{ "alan": { "movementSpeed": "fast", "texture": "alan" } }"#,
        )
        .unwrap();

        let error = Catalogs::load_from_dir(dir.path()).unwrap_err();
        match error {
            CatalogError::Parse { at, .. } => {
                assert!(at.contains("alan"), "path was {at}");
            }
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_effect_name_fails_to_parse() {
        let dir = tempfile::tempdir().unwrap();
        write_valid_dir(dir.path());
        fs::write(
            dir.path().join("powerups.json"),
            r#"[{ "texture": "powerups/zap", "effect": "megazap", "durationMs": 1000, "effectValue": 1 }]"#,
        )
        .unwrap();

        assert!(matches!(
            Catalogs::load_from_dir(dir.path()),
            Err(CatalogError::Parse { .. })
        ));
    }

    #[test]
    fn invalid_texture_key_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        write_valid_dir(dir.path());
        fs::write(
            dir.path().join("enemies.json"),
            r#"{ "alan": { "movementSpeed": 0.2, "texture": "Alan.png" } }"#,
        )
        .unwrap();

        assert!(matches!(
            Catalogs::load_from_dir(dir.path()),
            Err(CatalogError::Texture { .. })
        ));
    }

    #[test]
    fn empty_enemy_catalog_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        write_valid_dir(dir.path());
        fs::write(dir.path().join("enemies.json"), "{}").unwrap();

        assert!(matches!(
            Catalogs::load_from_dir(dir.path()),
            Err(CatalogError::Invalid { .. })
        ));
    }

    #[test]
    fn nonpositive_speed_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        write_valid_dir(dir.path());
        fs::write(
            dir.path().join("enemies.json"),
            r#"{ "alan": { "movementSpeed": 0.0, "texture": "alan" } }"#,
        )
        .unwrap();

        assert!(matches!(
            Catalogs::load_from_dir(dir.path()),
            Err(CatalogError::Invalid { .. })
        ));
    }

    #[test]
    fn unknown_ship_key_is_a_config_error() {
        let catalogs = Catalogs::builtin();
        let error = catalogs.ship("99").unwrap_err();
        assert!(matches!(error, CatalogError::UnknownShip { key } if key == "99"));
    }
}

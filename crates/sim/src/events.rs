use crate::powerup::PowerUpEffect;

/// Everything the presentation layer needs to hear about, in emission
/// order. The core only pushes; the host drains once per frame and maps
/// entries onto HUD, camera, and audio work.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    ScoreChanged { score: u32 },
    LevelChanged { level: u32 },
    WaveIncoming { size: u32 },
    BossIncoming,
    BossSpawned,
    BossHealthChanged { current: i32 },
    BossDefeated,
    PlayerHealthChanged { current: i32 },
    PlayerDied,
    PowerUpApplied { effect: PowerUpEffect },
    PowerUpExpired { effect: PowerUpEffect },
}

/// Outbound queue between the core and its host.
#[derive(Debug, Default)]
pub struct EventBus {
    events: Vec<SimEvent>,
}

impl EventBus {
    pub fn emit(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    pub fn drain(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

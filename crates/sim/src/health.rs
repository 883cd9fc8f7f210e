/// Hit points with a one-shot death latch. `current` may sit below zero;
/// the latch exists so the first lethal hit is the only one reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    current: i32,
    max: i32,
    death_reported: bool,
}

/// Outcome of a single `inc` call. Callers turn this into outbound events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthChange {
    pub current: i32,
    pub died_now: bool,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self {
            current: max,
            max,
            death_reported: false,
        }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }

    /// Applies a signed delta. `died_now` is true exactly once per life, at
    /// the first transition to zero or below; pushing the value further
    /// negative later, or healing and dropping again, never re-arms it.
    pub fn inc(&mut self, delta: i32) -> HealthChange {
        self.current = self.current.saturating_add(delta);
        let died_now = self.current <= 0 && !self.death_reported;
        if died_now {
            self.death_reported = true;
        }
        HealthChange {
            current: self.current,
            died_now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Health;

    #[test]
    fn reports_changes_and_allows_negative_values() {
        let mut health = Health::new(3);
        assert_eq!(health.inc(-1).current, 2);
        assert_eq!(health.inc(-4).current, -2);
        assert!(health.is_dead());
    }

    #[test]
    fn death_fires_exactly_once_at_the_crossing() {
        let mut health = Health::new(2);
        assert!(!health.inc(-1).died_now);
        assert!(health.inc(-1).died_now);
        assert!(!health.inc(-1).died_now);
        assert!(!health.inc(-5).died_now);
    }

    #[test]
    fn healing_after_death_never_rearms_the_latch() {
        let mut health = Health::new(1);
        assert!(health.inc(-1).died_now);
        assert_eq!(health.inc(3).current, 2);
        assert!(!health.inc(-5).died_now);
    }
}

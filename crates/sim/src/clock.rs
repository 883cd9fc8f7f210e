/// Virtual milliseconds. Advances only when the host ticks the world, so a
/// paused host means a paused simulation with no special casing.
#[derive(Debug, Default)]
pub struct VirtualClock {
    now_ms: f64,
}

impl VirtualClock {
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn advance(&mut self, dt_ms: f32) {
        self.now_ms += f64::from(dt_ms);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct TimerEntry<T> {
    handle: TimerHandle,
    due_at_ms: f64,
    every_ms: Option<f64>,
    task: T,
}

/// Deferred work over the virtual clock. Entries are plain data, not
/// closures; whoever drains them decides what they mean, and anything
/// pointing at a pooled slot re-validates its handle at that moment.
#[derive(Debug)]
pub struct Scheduler<T> {
    entries: Vec<TimerEntry<T>>,
    next_handle: u64,
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_handle: 0,
        }
    }

    /// Fires once, `delay_ms` after `now_ms`.
    pub fn schedule(&mut self, now_ms: f64, delay_ms: f64, task: T) -> TimerHandle {
        self.push(now_ms + delay_ms, None, task)
    }

    /// First firing after `delay_ms`, then every `every_ms` until cancelled.
    pub fn schedule_repeating(
        &mut self,
        now_ms: f64,
        delay_ms: f64,
        every_ms: f64,
        task: T,
    ) -> TimerHandle {
        debug_assert!(every_ms > 0.0);
        self.push(now_ms + delay_ms, Some(every_ms), task)
    }

    fn push(&mut self, due_at_ms: f64, every_ms: Option<f64>, task: T) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.push(TimerEntry {
            handle,
            due_at_ms,
            every_ms,
            task,
        });
        handle
    }

    /// Removes the entry; reports whether anything was still pending.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.handle != handle);
        self.entries.len() != before
    }

    pub fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|entry| entry.handle == handle)
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Releases every task due by `now_ms`, ordered by due time then by
    /// creation order. Repeating entries advance period by period, so a
    /// large step releases one task per elapsed period.
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<T> {
        let mut due: Vec<(f64, u64, T)> = Vec::new();
        for entry in &mut self.entries {
            if entry.due_at_ms > now_ms {
                continue;
            }
            match entry.every_ms {
                None => due.push((entry.due_at_ms, entry.handle.0, entry.task.clone())),
                Some(every_ms) => {
                    while entry.due_at_ms <= now_ms {
                        due.push((entry.due_at_ms, entry.handle.0, entry.task.clone()));
                        entry.due_at_ms += every_ms;
                    }
                }
            }
        }
        self.entries
            .retain(|entry| entry.every_ms.is_some() || entry.due_at_ms > now_ms);
        due.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        due.into_iter().map(|(_, _, task)| task).collect()
    }
}

impl<T: Clone> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{Scheduler, VirtualClock};

    #[test]
    fn one_shot_fires_once_at_its_due_time() {
        let mut scheduler: Scheduler<&str> = Scheduler::new();
        scheduler.schedule(0.0, 100.0, "a");

        assert!(scheduler.drain_due(99.0).is_empty());
        assert_eq!(scheduler.drain_due(100.0), vec!["a"]);
        assert!(scheduler.drain_due(1000.0).is_empty());
    }

    #[test]
    fn repeating_fires_every_period_and_catches_up() {
        let mut scheduler: Scheduler<&str> = Scheduler::new();
        scheduler.schedule_repeating(0.0, 50.0, 50.0, "tick");

        assert_eq!(scheduler.drain_due(50.0).len(), 1);
        assert_eq!(scheduler.drain_due(60.0).len(), 0);
        // Jump over four periods at once.
        assert_eq!(scheduler.drain_due(260.0).len(), 4);
    }

    #[test]
    fn cancel_removes_pending_work() {
        let mut scheduler: Scheduler<&str> = Scheduler::new();
        let keep = scheduler.schedule(0.0, 10.0, "keep");
        let cancelled = scheduler.schedule(0.0, 10.0, "drop");

        assert!(scheduler.cancel(cancelled));
        assert!(!scheduler.cancel(cancelled));
        assert!(scheduler.is_scheduled(keep));
        assert_eq!(scheduler.drain_due(10.0), vec!["keep"]);
    }

    #[test]
    fn drain_order_is_due_time_then_creation_order() {
        let mut scheduler: Scheduler<&str> = Scheduler::new();
        scheduler.schedule(0.0, 30.0, "late");
        scheduler.schedule(0.0, 10.0, "early_first");
        scheduler.schedule(0.0, 10.0, "early_second");

        assert_eq!(
            scheduler.drain_due(30.0),
            vec!["early_first", "early_second", "late"]
        );
    }

    #[test]
    fn clock_accumulates_float_deltas() {
        let mut clock = VirtualClock::default();
        for _ in 0..60 {
            clock.advance(16.0);
        }
        assert!((clock.now_ms() - 960.0).abs() < 1e-6);
    }
}

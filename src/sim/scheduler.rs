//! Named recurring tasks on a single logical timeline
//!
//! Replaces wall-clock interval timers with an explicit scheduler: the caller
//! feeds in elapsed milliseconds and receives the tasks due to fire, in
//! registration order. This keeps "what runs when" separate from "what
//! happens on each tick" and makes the loop unit-testable without timers.

use crate::consts::MAX_CATCHUP_FIRES;

/// The recurring tasks a session can run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskId {
    /// Obstacle creation (cadence may shrink as difficulty rises)
    Spawn,
    /// Player step + obstacle advance/collision/prune pass
    Movement,
    /// Passive score accrual (only some variants)
    Score,
}

#[derive(Debug, Clone)]
struct Task {
    id: TaskId,
    period_ms: u64,
    elapsed_ms: u64,
}

/// Cooperative single-threaded scheduler.
///
/// No two tasks ever execute concurrently; a tick runs to completion before
/// the next fires. Suspension clears accumulated time so no stale tick can
/// fire against a frozen or reset session.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    tasks: Vec<Task>,
    running: bool,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task (or replace it, resetting its accumulator)
    pub fn schedule(&mut self, id: TaskId, period_ms: u64) {
        debug_assert!(period_ms > 0);
        self.cancel(id);
        self.tasks.push(Task {
            id,
            period_ms,
            elapsed_ms: 0,
        });
    }

    /// Swap one task's period in place without disturbing the others.
    ///
    /// The task's own accumulator restarts so the new cadence takes effect
    /// from now; no-op if the task was never scheduled.
    pub fn reschedule(&mut self, id: TaskId, period_ms: u64) {
        debug_assert!(period_ms > 0);
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.period_ms = period_ms;
            task.elapsed_ms = 0;
        }
    }

    pub fn cancel(&mut self, id: TaskId) {
        self.tasks.retain(|t| t.id != id);
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
        self.running = false;
    }

    /// Stop all firings and drop accumulated time
    pub fn suspend(&mut self) {
        self.running = false;
        for task in &mut self.tasks {
            task.elapsed_ms = 0;
        }
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn period_of(&self, id: TaskId) -> Option<u64> {
        self.tasks.iter().find(|t| t.id == id).map(|t| t.period_ms)
    }

    /// Accumulate `elapsed_ms` and push every due task onto `fired`.
    ///
    /// Tasks report in registration order; each task's catch-up within one
    /// advance is capped so a long stall cannot snowball.
    pub fn advance(&mut self, elapsed_ms: u64, fired: &mut Vec<TaskId>) {
        if !self.running {
            return;
        }
        for task in &mut self.tasks {
            task.elapsed_ms += elapsed_ms;
            let mut fires = 0;
            while task.elapsed_ms >= task.period_ms {
                task.elapsed_ms -= task.period_ms;
                if fires < MAX_CATCHUP_FIRES {
                    fired.push(task.id);
                    fires += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fires_after(s: &mut Scheduler, ms: u64) -> Vec<TaskId> {
        let mut fired = Vec::new();
        s.advance(ms, &mut fired);
        fired
    }

    #[test]
    fn fires_at_period_boundaries() {
        let mut s = Scheduler::new();
        s.schedule(TaskId::Movement, 20);
        s.resume();
        assert!(fires_after(&mut s, 19).is_empty());
        assert_eq!(fires_after(&mut s, 1), vec![TaskId::Movement]);
        assert_eq!(fires_after(&mut s, 40), vec![TaskId::Movement; 2]);
    }

    #[test]
    fn suspended_scheduler_never_fires() {
        let mut s = Scheduler::new();
        s.schedule(TaskId::Spawn, 10);
        assert!(fires_after(&mut s, 100).is_empty());
        s.resume();
        s.suspend();
        assert!(fires_after(&mut s, 100).is_empty());
    }

    #[test]
    fn suspend_drops_accumulated_time() {
        let mut s = Scheduler::new();
        s.schedule(TaskId::Spawn, 100);
        s.resume();
        assert!(fires_after(&mut s, 99).is_empty());
        s.suspend();
        s.resume();
        // The 99 ms from before the suspension must not count
        assert!(fires_after(&mut s, 99).is_empty());
        assert_eq!(fires_after(&mut s, 1), vec![TaskId::Spawn]);
    }

    #[test]
    fn reschedule_keeps_other_tasks_intact() {
        let mut s = Scheduler::new();
        s.schedule(TaskId::Spawn, 1200);
        s.schedule(TaskId::Movement, 20);
        s.resume();
        // Movement mid-period, then spawn cadence shrinks
        assert_eq!(fires_after(&mut s, 30).len(), 1);
        s.reschedule(TaskId::Spawn, 50);
        assert_eq!(s.period_of(TaskId::Spawn), Some(50));
        // Movement accumulator (10 ms in) is untouched: fires at +10
        let fired = fires_after(&mut s, 10);
        assert_eq!(fired, vec![TaskId::Movement]);
        // Spawn fires on its new period measured from the reschedule
        let fired = fires_after(&mut s, 40);
        assert!(fired.contains(&TaskId::Spawn));
    }

    #[test]
    fn registration_order_is_fire_order() {
        let mut s = Scheduler::new();
        s.schedule(TaskId::Spawn, 10);
        s.schedule(TaskId::Movement, 10);
        s.resume();
        assert_eq!(fires_after(&mut s, 10), vec![TaskId::Spawn, TaskId::Movement]);
    }

    #[test]
    fn catchup_is_capped() {
        let mut s = Scheduler::new();
        s.schedule(TaskId::Movement, 1);
        s.resume();
        let fired = fires_after(&mut s, 1_000_000);
        assert_eq!(fired.len(), crate::consts::MAX_CATCHUP_FIRES as usize);
    }
}

//! Cancellable delayed tasks driven by the tick clock.

use hecs::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

/// Deferred orchestrator work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// A timed goal's window elapsed without a press.
    AdvanceTimed,
    /// The latch finished its settle delay.
    SettleLatch { latch: Entity },
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    id: TaskId,
    due: f64,
    task: Task,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now: f64,
    next_id: u64,
    pending: Vec<Scheduled>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn schedule(&mut self, delay_secs: f32, task: Task) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.pending.push(Scheduled {
            id,
            due: self.now + delay_secs as f64,
            task,
        });
        id
    }

    /// Returns whether the task was still pending.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|s| s.id != id);
        self.pending.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.pending.iter().any(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Move the clock forward and take every task now due, earliest first.
    pub fn advance(&mut self, dt: f32) -> Vec<(TaskId, Task)> {
        self.now += dt as f64;
        let now = self.now;
        let mut due: Vec<Scheduled> = Vec::new();
        self.pending.retain(|s| {
            if s.due <= now {
                due.push(*s);
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.id.cmp(&b.id)));
        due.into_iter().map(|s| (s.id, s.task)).collect()
    }
}

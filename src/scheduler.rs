// Deferred work that must run after the current render pass
//
// Components schedule tasks here instead of acting immediately. The event loop
// drains due tasks only after `terminal.draw` has returned, so anything queued
// while building a frame observes that frame as already rendered, and every
// observer wired up during assembly exists before the task fires.

use std::time::{Duration, Instant};

/// Work items that can be deferred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Programmatically click the list row at this index
    ClickRow(usize),
}

#[derive(Debug)]
struct Pending {
    due: Instant,
    seq: u64,
    task: Task,
}

/// Queue of deferred tasks ordered by due time, then by scheduling order
#[derive(Debug, Default)]
pub struct Scheduler {
    pending: Vec<Pending>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to run no earlier than `delay` from now
    ///
    /// A zero delay still waits for the next drain after a render.
    pub fn defer(&mut self, delay: Duration, task: Task) {
        self.defer_at(Instant::now() + delay, task);
    }

    /// Schedule `task` to run no earlier than `due`
    pub fn defer_at(&mut self, due: Instant, task: Task) {
        let seq = self.next_seq;
        self.next_seq += 1;
        tracing::debug!(?task, "task deferred");
        self.pending.push(Pending { due, seq, task });
    }

    /// Remove and return every task due at `now`, oldest first
    pub fn take_due(&mut self, now: Instant) -> Vec<Task> {
        let (mut due, later): (Vec<Pending>, Vec<Pending>) =
            self.pending.drain(..).partition(|p| p.due <= now);
        self.pending = later;
        due.sort_by_key(|p| (p.due, p.seq));
        due.into_iter().map(|p| p.task).collect()
    }

    /// Earliest due time among pending tasks
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|p| p.due).min()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

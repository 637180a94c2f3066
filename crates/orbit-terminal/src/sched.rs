//! Deferred task scheduling.
//!
//! "Delay" in this system never blocks: it schedules a future reaction that
//! the host drives by calling `Terminal::tick`. Tasks fire in (due-time,
//! insertion) order, so a continuation scheduled at T always lands after
//! output from reactions scheduled before T.

/// A deferred reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Reveal boot milestone `index`.
    BootMilestone(usize),
    /// Append the welcome block and unhalt the session.
    BootComplete,
    /// Append the `software` update report.
    SoftwareReport,
    /// Clear the transcript and restart the boot sequence.
    Reboot,
}

#[derive(Debug)]
struct Entry {
    due_ms: u64,
    seq: u64,
    epoch: u64,
    task: Task,
}

/// Pending deferred tasks, stamped with the boot epoch they were scheduled
/// under so a reboot can invalidate them wholesale.
pub struct Scheduler {
    entries: Vec<Entry>,
    seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            seq: 0,
        }
    }

    /// Schedule `task` to fire at `due_ms` under `epoch`.
    pub fn schedule(&mut self, due_ms: u64, epoch: u64, task: Task) {
        self.entries.push(Entry {
            due_ms,
            seq: self.seq,
            epoch,
            task,
        });
        self.seq += 1;
    }

    /// Remove and return the next due task, earliest (due, insertion)
    /// first. `None` when nothing is due at `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(u64, Task)> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= now_ms)
            .min_by_key(|(_, e)| (e.due_ms, e.seq))
            .map(|(i, _)| i)?;
        let entry = self.entries.swap_remove(idx);
        Some((entry.epoch, entry.task))
    }

    /// The earliest pending due time, if any task is pending.
    pub fn next_due(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.due_ms).min()
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no tasks are pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

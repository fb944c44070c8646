//! Completion counters for the active plan

/// Completed/total task counts for one plan.
///
/// Only `reset`, `increment` and `decrement` change the counts, and both
/// steps saturate so `0 <= completed <= total` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    total: usize,
    completed: usize,
}

impl Progress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            completed: 0,
        }
    }

    pub fn reset(&mut self, total: usize) {
        *self = Self::new(total);
    }

    pub fn increment(&mut self) {
        if self.completed < self.total {
            self.completed += 1;
        }
    }

    pub fn decrement(&mut self) {
        self.completed = self.completed.saturating_sub(1);
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    /// round(100 * completed / total), halves rounding up; 0 for an empty plan
    pub fn percentage(&self) -> u16 {
        if self.total == 0 {
            return 0;
        }
        let scaled = (200 * self.completed + self.total) / (2 * self.total);
        scaled as u16
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.percentage() == 100
    }

    /// Progress bar caption
    pub fn label(&self) -> String {
        format!("{}% completed", self.percentage())
    }
}

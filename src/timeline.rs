use std::{collections::VecDeque, time::Duration};

/// Single-threaded deferred-task queue driven by an external clock.
///
/// Whoever owns the frame loop calls [`Timeline::advance`] with the elapsed
/// time and then drains due tasks with [`Timeline::pop_due`]. Tasks due at the
/// same instant come out in the order they were scheduled. A task scheduled
/// while draining with a zero delay is due immediately.
#[derive(Debug, Clone)]
pub struct Timeline<T> {
    now: Duration,
    pending: VecDeque<(Duration, T)>,
}

impl<T> Timeline<T> {
    pub fn new() -> Self {
        Timeline {
            now: Duration::ZERO,
            pending: VecDeque::new(),
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule(&mut self, delay: Duration, task: T) {
        let due = self.now + delay;
        let index = self.pending.partition_point(|(at, _)| *at <= due);
        self.pending.insert(index, (due, task));
    }

    pub fn advance(&mut self, elapsed: Duration) {
        self.now += elapsed;
    }

    pub fn pop_due(&mut self) -> Option<T> {
        match self.pending.front() {
            Some((due, _)) if *due <= self.now => self.pending.pop_front().map(|(_, task)| task),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drops every pending task. The clock keeps running.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Timeline::new()
    }
}

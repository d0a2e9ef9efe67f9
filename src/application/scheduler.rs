//! Deferred effects on a host-driven virtual clock.
//!
//! The chart runs on a single cooperative thread: the host advances time and
//! drains frame effects once layout has settled. Nothing here blocks, and a
//! scheduled effect can not be cancelled.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;

use itertools::Itertools;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Timer {
    deadline: Duration,
    seq: u64,
    node_id: String,
}

/// A highlight-clear timer that came due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueTimer {
    pub node_id: String,
    pub deadline: Duration,
}

#[derive(Debug, Default)]
pub struct EffectScheduler {
    now: Duration,
    seq: u64,
    timers: BinaryHeap<Reverse<Timer>>,
    frame: Vec<String>,
}

impl EffectScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule a highlight clear for `node_id` after `delay`; returns the deadline.
    pub fn schedule_clear(&mut self, node_id: &str, delay: Duration) -> Duration {
        let deadline = self.now + delay;
        self.seq += 1;
        trace!("timer #{} for {} due at {:?}", self.seq, node_id, deadline);
        self.timers.push(Reverse(Timer {
            deadline,
            seq: self.seq,
            node_id: node_id.to_string(),
        }));
        deadline
    }

    /// Ask for centering on `node_id` in the next frame.
    pub fn request_frame(&mut self, node_id: &str) {
        self.frame.push(node_id.to_string());
    }

    /// Move the clock forward and pop every timer that is now due, in
    /// deadline order (ties in scheduling order).
    pub fn advance(&mut self, elapsed: Duration) -> Vec<DueTimer> {
        self.now += elapsed;
        let mut due = Vec::new();
        while let Some(Reverse(next)) = self.timers.peek() {
            if next.deadline > self.now {
                break;
            }
            if let Some(Reverse(timer)) = self.timers.pop() {
                due.push(DueTimer {
                    node_id: timer.node_id,
                    deadline: timer.deadline,
                });
            }
        }
        due
    }

    /// Drain the frame queue; one entry per node, first request order.
    pub fn take_frame(&mut self) -> Vec<String> {
        std::mem::take(&mut self.frame).into_iter().unique().collect()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.peek().map(|Reverse(timer)| timer.deadline)
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn pending_frames(&self) -> usize {
        self.frame.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_timers_when_advancing_then_pops_only_due_in_deadline_order() {
        let mut scheduler = EffectScheduler::new();
        scheduler.schedule_clear("b", Duration::from_millis(500));
        scheduler.schedule_clear("a", Duration::from_millis(200));
        scheduler.schedule_clear("c", Duration::from_millis(900));

        let due = scheduler.advance(Duration::from_millis(600));

        let ids: Vec<_> = due.iter().map(|t| t.node_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(scheduler.pending_timers(), 1);
        assert_eq!(scheduler.next_deadline(), Some(Duration::from_millis(900)));
    }

    #[test]
    fn given_repeated_frame_requests_when_taking_frame_then_deduplicates() {
        let mut scheduler = EffectScheduler::new();
        scheduler.request_frame("x");
        scheduler.request_frame("y");
        scheduler.request_frame("x");

        assert_eq!(scheduler.take_frame(), vec!["x".to_string(), "y".to_string()]);
        assert_eq!(scheduler.pending_frames(), 0);
    }
}

//! 时间片轮转（Round Robin）
//!
//! FIFO 就绪队列；到达时不抢占，由时间片到期驱动切换。

use std::collections::VecDeque;

use crate::process::{Pid, Process};
use crate::sim::SimTime;

use super::{Scheduler, TimeSlice, assert_ready};

#[derive(Debug)]
pub struct RoundRobinScheduler {
    quantum: u64,
    q: VecDeque<Pid>,
}

impl RoundRobinScheduler {
    /// # Panics
    ///
    /// `quantum` 为 0 时 panic。
    pub fn new(quantum: u64) -> Self {
        assert!(quantum > 0, "round robin quantum must be positive");
        Self {
            quantum,
            q: VecDeque::new(),
        }
    }

    pub fn quantum(&self) -> u64 {
        self.quantum
    }
}

impl Scheduler for RoundRobinScheduler {
    fn add_process(&mut self, pid: Pid, p: &Process) {
        assert_ready(p);
        debug_assert!(!self.q.contains(&pid));
        self.q.push_back(pid);
    }

    fn next_process(&mut self) -> Option<Pid> {
        self.q.pop_front()
    }

    fn has_processes(&self) -> bool {
        !self.q.is_empty()
    }

    fn should_preempt(&self, _running: &Process, _arriving: &Process, _now: SimTime) -> bool {
        false
    }

    fn time_slice(&self) -> TimeSlice {
        TimeSlice::Quantum(self.quantum)
    }

    fn len(&self) -> usize {
        self.q.len()
    }
}

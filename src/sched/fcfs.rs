//! 先来先服务（FCFS）
//!
//! FIFO 就绪队列，从不抢占。

use std::collections::VecDeque;

use crate::process::{Pid, Process};
use crate::sim::SimTime;

use super::{Scheduler, TimeSlice, assert_ready};

#[derive(Debug, Default)]
pub struct FcfsScheduler {
    q: VecDeque<Pid>,
}

impl FcfsScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for FcfsScheduler {
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
        TimeSlice::Unbounded
    }

    fn len(&self) -> usize {
        self.q.len()
    }
}

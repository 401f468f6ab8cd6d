//! 短作业优先（SJF）
//!
//! 按当前 CPU 突发的总长度排序；只在派发时做决定，从不抢占。

use crate::process::{Pid, Process};
use crate::sim::SimTime;

use super::{Scheduler, ShortestFirstQueue, TimeSlice, assert_ready};

#[derive(Debug, Default)]
pub struct SjfScheduler {
    q: ShortestFirstQueue,
}

impl SjfScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for SjfScheduler {
    fn add_process(&mut self, pid: Pid, p: &Process) {
        assert_ready(p);
        debug_assert!(!self.q.contains(pid));
        self.q.push(p.current_cpu_burst(), pid);
    }

    fn next_process(&mut self) -> Option<Pid> {
        self.q.pop()
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

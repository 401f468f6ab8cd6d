//! 最短剩余时间优先（SRTN）
//!
//! 按当前突发剩余时间排序；新就绪进程的剩余时间严格小于运行进程时抢占。

use crate::process::{Pid, Process};
use crate::sim::SimTime;

use super::{Scheduler, ShortestFirstQueue, TimeSlice, assert_ready};

#[derive(Debug, Default)]
pub struct SrtnScheduler {
    q: ShortestFirstQueue,
}

impl SrtnScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for SrtnScheduler {
    fn add_process(&mut self, pid: Pid, p: &Process) {
        assert_ready(p);
        debug_assert!(!self.q.contains(pid));
        self.q.push(p.remaining_in_burst(), pid);
    }

    fn next_process(&mut self) -> Option<Pid> {
        self.q.pop()
    }

    fn has_processes(&self) -> bool {
        !self.q.is_empty()
    }

    fn should_preempt(&self, running: &Process, arriving: &Process, now: SimTime) -> bool {
        arriving.remaining_at(now) < running.remaining_at(now)
    }

    fn time_slice(&self) -> TimeSlice {
        TimeSlice::Unbounded
    }

    fn len(&self) -> usize {
        self.q.len()
    }
}

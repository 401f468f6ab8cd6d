//! 调度策略（Scheduling disciplines）
//!
//! 每种策略持有处于 READY 状态的进程，并决定派发顺序与抢占策略。
//! 仿真器只通过 [`Scheduler`] trait 与策略交互。

use crate::process::{Pid, Process};
use crate::sim::SimTime;

mod fcfs;
mod policy;
mod round_robin;
mod shortest_first;
mod sjf;
mod srtn;

pub use fcfs::FcfsScheduler;
pub use policy::{DEFAULT_POLICIES, Policy};
pub use round_robin::RoundRobinScheduler;
pub use shortest_first::ShortestFirstQueue;
pub use sjf::SjfScheduler;
pub use srtn::SrtnScheduler;

/// 一次派发最多能连续运行多久
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSlice {
    /// 运行到当前 CPU 突发结束
    Unbounded,
    /// 时间片长度（> 0）
    Quantum(u64),
}

/// 调度器抽象
pub trait Scheduler: std::fmt::Debug {
    /// 加入就绪结构。前置条件：`p` 处于 READY 状态且不在结构中。
    fn add_process(&mut self, pid: Pid, p: &Process);
    /// 按策略取出下一个要运行的进程
    fn next_process(&mut self) -> Option<Pid>;
    fn has_processes(&self) -> bool;
    /// 有进程变为 READY 而另一个进程正在运行时调用；无副作用。
    fn should_preempt(&self, running: &Process, arriving: &Process, now: SimTime) -> bool;
    fn time_slice(&self) -> TimeSlice;
    fn len(&self) -> usize;
}

pub(crate) fn assert_ready(p: &Process) {
    assert_eq!(
        p.state(),
        crate::process::ProcessState::Ready,
        "process {} added to ready structure while {}",
        p.id(),
        p.state()
    );
}

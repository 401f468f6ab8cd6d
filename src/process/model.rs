//! 进程状态机
//!
//! 一个仿真作业：交替的 CPU / I/O 突发序列，加上累积的统计量。

use crate::sim::SimTime;
use serde::{Deserialize, Serialize};

/// 进程状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    New,
    Ready,
    Running,
    Blocked,
    Terminated,
}

impl ProcessState {
    /// 状态机中是否存在 `self -> next` 这条边
    pub fn can_transition_to(self, next: ProcessState) -> bool {
        use ProcessState::*;
        matches!(
            (self, next),
            (New, Ready)
                | (Ready, Running)
                | (Running, Ready)
                | (Running, Blocked)
                | (Running, Terminated)
                | (Blocked, Ready)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProcessState::New => "new",
            ProcessState::Ready => "ready",
            ProcessState::Running => "running",
            ProcessState::Blocked => "blocked",
            ProcessState::Terminated => "terminated",
        }
    }
}

impl std::fmt::Display for ProcessState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一次 CPU 分配：从 `start` 开始，最多运行 `len` 个时间单位。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuGrant {
    pub seq: u64,
    pub start: SimTime,
    pub len: u64,
}

impl CpuGrant {
    pub fn end(&self) -> SimTime {
        self.start.after(self.len)
    }

    /// 到 `now` 为止已经用掉的时间
    pub fn consumed_at(&self, now: SimTime) -> u64 {
        now.since(self.start).min(self.len)
    }
}

#[derive(Debug, Clone)]
pub struct Process {
    id: u32,
    arrival: SimTime,
    cpu_bursts: Vec<u64>,
    io_bursts: Vec<u64>,
    /// 偶数为 CPU 突发，奇数为 I/O 突发
    burst_index: usize,
    remaining: u64,
    state: ProcessState,

    start_time: Option<SimTime>,
    finish_time: Option<SimTime>,
    service_time: u64,
    io_time: u64,
    wait_time: u64,
    ready_since: Option<SimTime>,

    grant: Option<CpuGrant>,
    grants_issued: u64,
}

impl Process {
    /// 创建一个 NEW 状态的进程。
    ///
    /// 约定 `io_bursts.len() + 1 == cpu_bursts.len()`（由 workload 校验保证）。
    pub fn new(id: u32, arrival: SimTime, cpu_bursts: Vec<u64>, io_bursts: Vec<u64>) -> Self {
        let remaining = cpu_bursts.first().copied().unwrap_or(0);
        Self {
            id,
            arrival,
            cpu_bursts,
            io_bursts,
            burst_index: 0,
            remaining,
            state: ProcessState::New,
            start_time: None,
            finish_time: None,
            service_time: 0,
            io_time: 0,
            wait_time: 0,
            ready_since: None,
            grant: None,
            grants_issued: 0,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn arrival_time(&self) -> SimTime {
        self.arrival
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn cpu_bursts(&self) -> &[u64] {
        &self.cpu_bursts
    }

    pub fn io_bursts(&self) -> &[u64] {
        &self.io_bursts
    }

    pub fn burst_index(&self) -> usize {
        self.burst_index
    }

    pub fn is_io_burst(&self) -> bool {
        self.burst_index % 2 == 1
    }

    fn current_sequence(&self) -> &[u64] {
        if self.is_io_burst() {
            &self.io_bursts
        } else {
            &self.cpu_bursts
        }
    }

    /// 当前下标是否仍指向对应序列中的一个有效突发
    pub fn has_more_bursts(&self) -> bool {
        self.burst_index / 2 < self.current_sequence().len()
    }

    /// 当前 CPU 突发的总长度；处于 I/O 突发时为 0
    pub fn current_cpu_burst(&self) -> u64 {
        if self.is_io_burst() {
            return 0;
        }
        self.cpu_bursts
            .get(self.burst_index / 2)
            .copied()
            .unwrap_or(0)
    }

    pub fn remaining_in_burst(&self) -> u64 {
        self.remaining
    }

    /// `now` 时刻的实际剩余时间：计数器加上当前 CPU 分配中尚未用掉的部分。
    pub fn remaining_at(&self, now: SimTime) -> u64 {
        match self.grant {
            Some(g) => self
                .remaining
                .saturating_add(g.len - g.consumed_at(now)),
            None => self.remaining,
        }
    }

    /// 减少当前突发的剩余时间（截断到 0）。不计入任何统计量。
    pub fn decrement_remaining_time(&mut self, delta: u64) {
        self.remaining = self.remaining.saturating_sub(delta);
    }

    /// 进入下一个突发，并从对应序列装载剩余时间；序列耗尽时置 0。
    pub fn move_to_next_burst(&mut self) {
        self.burst_index += 1;
        self.remaining = self
            .current_sequence()
            .get(self.burst_index / 2)
            .copied()
            .unwrap_or(0);
    }

    /// 状态迁移。`now` 用于等待时间记账。
    ///
    /// # Panics
    ///
    /// 迁移不在状态机中时 panic。
    pub fn set_state(&mut self, next: ProcessState, now: SimTime) {
        assert!(
            self.state.can_transition_to(next),
            "process {}: illegal transition {} -> {}",
            self.id,
            self.state,
            next
        );
        if let Some(since) = self.ready_since.take() {
            self.wait_time = self.wait_time.saturating_add(now.since(since));
        }
        if next == ProcessState::Ready {
            self.ready_since = Some(now);
        }
        self.state = next;
    }

    /// 为当前 CPU 突发分配 `len` 个时间单位，并立即从剩余时间中扣除。
    pub fn grant_cpu(&mut self, now: SimTime, len: u64) -> CpuGrant {
        debug_assert_eq!(self.state, ProcessState::Running);
        self.grants_issued += 1;
        let grant = CpuGrant {
            seq: self.grants_issued,
            start: now,
            len,
        };
        self.decrement_remaining_time(len);
        self.grant = Some(grant);
        grant
    }

    pub fn grant(&self) -> Option<CpuGrant> {
        self.grant
    }

    /// 收回当前 CPU 分配；未用完的部分退回剩余时间。返回实际用掉的时间。
    pub fn revoke_grant(&mut self, now: SimTime) -> u64 {
        let Some(g) = self.grant.take() else {
            return 0;
        };
        let used = g.consumed_at(now);
        self.remaining = self.remaining.saturating_add(g.len - used);
        used
    }

    /// 仅首次调用生效
    pub fn set_start_time(&mut self, at: SimTime) {
        if self.start_time.is_none() {
            self.start_time = Some(at);
        }
    }

    pub fn set_finish_time(&mut self, at: SimTime) {
        self.finish_time = Some(at);
    }

    pub fn add_service_time(&mut self, units: u64) {
        self.service_time = self.service_time.saturating_add(units);
    }

    pub fn add_io_time(&mut self, units: u64) {
        self.io_time = self.io_time.saturating_add(units);
    }

    pub fn start_time(&self) -> Option<SimTime> {
        self.start_time
    }

    pub fn finish_time(&self) -> Option<SimTime> {
        self.finish_time
    }

    pub fn service_time(&self) -> u64 {
        self.service_time
    }

    pub fn io_time(&self) -> u64 {
        self.io_time
    }

    pub fn wait_time(&self) -> u64 {
        self.wait_time
    }

    pub fn total_cpu_time(&self) -> u64 {
        self.cpu_bursts.iter().sum()
    }

    pub fn total_io_time(&self) -> u64 {
        self.io_bursts.iter().sum()
    }

    /// 周转时间；尚未结束的进程返回 `None`
    pub fn turnaround_time(&self) -> Option<u64> {
        self.finish_time.map(|f| f.since(self.arrival))
    }
}

//! 仿真事件
//!
//! 事件一旦创建便不可变，只由 `Simulator` 创建，且只被消费一次。

use super::time::SimTime;
use crate::process::Pid;

/// 事件类型。声明顺序即同一时刻下的处理优先级（越靠前越先处理）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventType {
    ProcessArrival,
    CpuBurstCompletion,
    IoBurstCompletion,
    TimeSliceExpired,
    ProcessPreempted,
}

impl EventType {
    /// 同一时刻的排序等级
    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            EventType::ProcessArrival => "Process Arrival",
            EventType::CpuBurstCompletion => "CPU Burst Completion",
            EventType::IoBurstCompletion => "I/O Burst Completion",
            EventType::TimeSliceExpired => "Time Slice Expired",
            EventType::ProcessPreempted => "Process Preempted",
        }
    }
}

/// 一条待处理的仿真事件。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    kind: EventType,
    at: SimTime,
    pid: Pid,
    /// 事件所属的 CPU 分配序号（仅运行相关事件携带）
    grant: Option<u64>,
}

impl Event {
    pub fn new(kind: EventType, at: SimTime, pid: Pid) -> Self {
        Self {
            kind,
            at,
            pid,
            grant: None,
        }
    }

    /// 绑定到某次 CPU 分配；分配失效后该事件会被丢弃。
    pub fn for_grant(kind: EventType, at: SimTime, pid: Pid, grant: u64) -> Self {
        Self {
            kind,
            at,
            pid,
            grant: Some(grant),
        }
    }

    pub fn kind(&self) -> EventType {
        self.kind
    }

    pub fn at(&self) -> SimTime {
        self.at
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn grant(&self) -> Option<u64> {
        self.grant
    }
}

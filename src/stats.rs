//! 统计信息
//!
//! 一次仿真运行的累积量与逐进程快照，以及文本报告格式。

use crate::process::{Process, ProcessState};
use serde::Serialize;
use std::fmt::Write as _;

/// 单个进程的只读快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessReport {
    pub id: u32,
    pub state: ProcessState,
    pub arrival_time: u64,
    pub start_time: Option<u64>,
    pub service_time: u64,
    pub io_time: u64,
    pub wait_time: u64,
    /// 未结束的进程为 `None`
    pub turnaround_time: Option<u64>,
    pub finish_time: Option<u64>,
}

impl From<&Process> for ProcessReport {
    fn from(p: &Process) -> Self {
        Self {
            id: p.id(),
            state: p.state(),
            arrival_time: p.arrival_time().0,
            start_time: p.start_time().map(|t| t.0),
            service_time: p.service_time(),
            io_time: p.io_time(),
            wait_time: p.wait_time(),
            turnaround_time: p.turnaround_time(),
            finish_time: p.finish_time().map(|t| t.0),
        }
    }
}

/// 仿真统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total_time: u64,
    pub cpu_busy_time: u64,
    pub process_switch_time: u64,
    pub processes: Vec<ProcessReport>,
}

impl Statistics {
    pub fn set_total_time(&mut self, t: u64) {
        self.total_time = t;
    }

    pub fn add_cpu_busy_time(&mut self, units: u64) {
        self.cpu_busy_time = self.cpu_busy_time.saturating_add(units);
    }

    pub fn add_process_switch_time(&mut self, units: u64) {
        self.process_switch_time = self.process_switch_time.saturating_add(units);
    }

    pub fn record_processes<'a>(&mut self, procs: impl IntoIterator<Item = &'a Process>) {
        self.processes = procs.into_iter().map(ProcessReport::from).collect();
    }

    /// CPU 利用率（百分比，四舍五入）；`total_time == 0` 时为 0。
    pub fn cpu_utilization(&self) -> u64 {
        if self.total_time == 0 {
            return 0;
        }
        debug_assert!(
            self.cpu_busy_time <= self.total_time,
            "cpu busy time {} exceeds total time {}",
            self.cpu_busy_time,
            self.total_time
        );
        let pct = self.cpu_busy_time as f64 / self.total_time as f64 * 100.0;
        pct.round() as u64
    }

    /// 默认报告：总时间与 CPU 利用率
    pub fn render_default(&self, name: &str) -> String {
        format!(
            "{name}:\nTotal Time required is {} time units\nCPU Utilization is {}%\n",
            self.total_time,
            self.cpu_utilization()
        )
    }

    /// 详细报告：额外列出每个进程的时间信息
    pub fn render_detailed(&self, name: &str) -> String {
        let mut out = format!(
            "{name}:\nTotal Time required is {} units\nCPU Utilization is {}%\n",
            self.total_time,
            self.cpu_utilization()
        );
        for p in &self.processes {
            // 未结束的进程用 -1 占位
            let turnaround = p.turnaround_time.map_or(-1, |t| t as i64);
            let finish = p.finish_time.map_or(-1, |t| t as i64);
            let _ = writeln!(
                out,
                "Process {}: arrival time: {} service time: {} units I/O time: {} units turnaround time: {} units finish time: {} units",
                p.id, p.arrival_time, p.service_time, p.io_time, turnaround, finish
            );
        }
        out
    }
}

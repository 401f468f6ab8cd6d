//! 工作负载描述
//!
//! 已校验的进程描述值对象，以及文本格式、JSON 格式与随机生成三种来源。
//! 每次仿真运行都从这里克隆出新的 `Process`，workload 本身不会被修改。

mod error;
mod random;
mod text;

pub use error::WorkloadError;
pub use random::{RandomOpts, generate};
pub use text::parse_text;

use crate::process::Process;
use crate::sim::SimTime;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    /// 每次切换进程的固定开销
    #[serde(default)]
    pub switch_overhead: u64,
    pub processes: Vec<ProcessSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    pub id: u32,
    #[serde(default)]
    pub arrival: u64,
    pub cpu_bursts: Vec<u64>,
    /// 长度必须为 `cpu_bursts.len() - 1`
    #[serde(default)]
    pub io_bursts: Vec<u64>,
}

impl ProcessSpec {
    /// Build from an alternating `cpu, io, cpu, ..., cpu` list.
    pub fn from_alternating(id: u32, arrival: u64, bursts: &[u64]) -> Self {
        let cpu_bursts = bursts.iter().step_by(2).copied().collect();
        let io_bursts = bursts.iter().skip(1).step_by(2).copied().collect();
        Self {
            id,
            arrival,
            cpu_bursts,
            io_bursts,
        }
    }

    pub fn validate(&self) -> Result<(), WorkloadError> {
        if self.cpu_bursts.is_empty() {
            return Err(WorkloadError::NoCpuBursts { id: self.id });
        }
        if self.io_bursts.len() + 1 != self.cpu_bursts.len() {
            return Err(WorkloadError::BurstCountMismatch {
                id: self.id,
                cpu: self.cpu_bursts.len(),
                io: self.io_bursts.len(),
            });
        }
        Ok(())
    }

    pub fn to_process(&self) -> Process {
        Process::new(
            self.id,
            SimTime(self.arrival),
            self.cpu_bursts.clone(),
            self.io_bursts.clone(),
        )
    }
}

impl Workload {
    pub fn validate(&self) -> Result<(), WorkloadError> {
        let mut seen = HashSet::new();
        for p in &self.processes {
            p.validate()?;
            if !seen.insert(p.id) {
                return Err(WorkloadError::DuplicateId { id: p.id });
            }
        }
        Ok(())
    }

    pub fn from_json_str(raw: &str) -> Result<Self, WorkloadError> {
        let wl: Workload = serde_json::from_str(raw)?;
        wl.validate()?;
        Ok(wl)
    }

    /// 从文件加载：`.json` 扩展名按 JSON 解析，其余按文本格式解析。
    pub fn load(path: &Path) -> Result<Self, WorkloadError> {
        let raw = std::fs::read_to_string(path).map_err(|source| WorkloadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&raw)
        } else {
            parse_text(&raw)
        }
    }
}

//! 策略目录
//!
//! 按名称选择调度策略；无法识别的名称回退为 FCFS。

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{FcfsScheduler, RoundRobinScheduler, Scheduler, SjfScheduler, SrtnScheduler};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Policy {
    Fcfs,
    Sjf,
    Srtn,
    RoundRobin { quantum: u64 },
}

/// 未指定策略时依次运行的集合
pub const DEFAULT_POLICIES: [Policy; 6] = [
    Policy::Fcfs,
    Policy::Sjf,
    Policy::Srtn,
    Policy::RoundRobin { quantum: 10 },
    Policy::RoundRobin { quantum: 50 },
    Policy::RoundRobin { quantum: 100 },
];

impl Policy {
    /// 解析策略标签（FCFS / SJF / SRTN / RR<quantum>），大小写不敏感。
    pub fn parse(label: &str) -> Option<Policy> {
        let upper = label.trim().to_ascii_uppercase();
        match upper.as_str() {
            "FCFS" => Some(Policy::Fcfs),
            "SJF" => Some(Policy::Sjf),
            "SRTN" => Some(Policy::Srtn),
            _ => {
                let quantum: u64 = upper.strip_prefix("RR")?.parse().ok()?;
                (quantum > 0).then_some(Policy::RoundRobin { quantum })
            }
        }
    }

    /// 与 [`Policy::parse`] 相同，但无法识别时回退为 FCFS。
    pub fn from_name(label: &str) -> Policy {
        Self::parse(label).unwrap_or_else(|| {
            debug!(label, "未知调度策略，回退为 FCFS");
            Policy::Fcfs
        })
    }

    /// 短标签，如 `RR10`
    pub fn label(&self) -> String {
        match self {
            Policy::Fcfs => "FCFS".to_string(),
            Policy::Sjf => "SJF".to_string(),
            Policy::Srtn => "SRTN".to_string(),
            Policy::RoundRobin { quantum } => format!("RR{quantum}"),
        }
    }

    /// 报告中使用的完整名称
    pub fn display_name(&self) -> String {
        match self {
            Policy::Fcfs => "First Come First Serve".to_string(),
            Policy::Sjf => "Shortest Job First".to_string(),
            Policy::Srtn => "Shortest Remaining Time Next".to_string(),
            Policy::RoundRobin { quantum } => format!("Round Robin (quantum={quantum})"),
        }
    }

    /// 为一次仿真运行创建独立的调度器实例
    pub fn build(&self) -> Box<dyn Scheduler> {
        match *self {
            Policy::Fcfs => Box::new(FcfsScheduler::new()),
            Policy::Sjf => Box::new(SjfScheduler::new()),
            Policy::Srtn => Box::new(SrtnScheduler::new()),
            Policy::RoundRobin { quantum } => Box::new(RoundRobinScheduler::new(quantum)),
        }
    }
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_name())
    }
}

//! 仿真时间类型
//!
//! 定义虚拟时钟上的时间点。时长统一使用 `u64` 时间单位。

use serde::{Deserialize, Serialize};

/// 仿真时间（抽象时间单位）。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    /// 当前时间之后 `units` 个时间单位
    pub fn after(self, units: u64) -> SimTime {
        SimTime(self.0.saturating_add(units))
    }

    /// 从 `earlier` 到 `self` 经过的时间单位；`earlier` 更晚时为 0
    pub fn since(self, earlier: SimTime) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::fmt::Display for SimTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

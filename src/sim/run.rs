//! 按策略运行一次完整仿真
//!
//! 每次运行都从 workload 重新构建进程表与调度器，运行之间不共享可变状态。

use super::simulator::{Simulator, Transition};
use crate::sched::Policy;
use crate::stats::Statistics;
use crate::workload::Workload;
use serde::Serialize;
use tracing::info;

/// 单个策略的运行结果
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub policy: String,
    pub name: String,
    pub cpu_utilization: u64,
    pub statistics: Statistics,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub transitions: Vec<Transition>,
}

impl RunReport {
    pub fn render(&self, detailed: bool) -> String {
        if detailed {
            self.statistics.render_detailed(&self.name)
        } else {
            self.statistics.render_default(&self.name)
        }
    }
}

#[tracing::instrument(skip_all, fields(policy = %policy.label()))]
pub fn run_policy(policy: Policy, workload: &Workload, record_transitions: bool) -> RunReport {
    let mut sim = Simulator::new(policy.build(), workload.switch_overhead);
    if record_transitions {
        sim = sim.with_transition_log();
    }
    for spec in &workload.processes {
        sim.add_process(spec.to_process());
    }

    let statistics = sim.run().clone();
    info!(
        total_time = statistics.total_time,
        cpu_utilization = statistics.cpu_utilization(),
        "策略运行结束"
    );

    RunReport {
        policy: policy.label(),
        name: policy.display_name(),
        cpu_utilization: statistics.cpu_utilization(),
        statistics,
        transitions: sim.transitions().to_vec(),
    }
}

//! 随机工作负载
//!
//! 到达间隔服从指数分布（向上取整），突发长度与突发个数均匀分布。

use super::{ProcessSpec, Workload};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;

#[derive(Debug, Clone)]
pub struct RandomOpts {
    pub processes: u32,
    pub switch_overhead: u64,
    pub mean_interarrival: f64,
    pub cpu_burst: RangeInclusive<u64>,
    pub io_burst: RangeInclusive<u64>,
    pub cpu_bursts_per_process: RangeInclusive<usize>,
}

impl Default for RandomOpts {
    fn default() -> Self {
        Self {
            processes: 50,
            switch_overhead: 5,
            mean_interarrival: 50.0,
            cpu_burst: 5..=500,
            io_burst: 30..=1000,
            cpu_bursts_per_process: 10..=30,
        }
    }
}

/// 用固定种子生成，结果可复现。进程 id 从 1 开始。
pub fn generate(opts: &RandomOpts, seed: u64) -> Workload {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut arrival = 0u64;
    let mut processes = Vec::with_capacity(opts.processes as usize);

    for id in 1..=opts.processes {
        // 逆变换采样：1 - u 落在 (0, 1]
        let u: f64 = rng.random();
        let gap = (-opts.mean_interarrival * (1.0 - u).ln()).ceil();
        arrival = arrival.saturating_add(gap.max(0.0) as u64);

        let n = rng.random_range(opts.cpu_bursts_per_process.clone()).max(1);
        let cpu_bursts: Vec<u64> = (0..n)
            .map(|_| rng.random_range(opts.cpu_burst.clone()))
            .collect();
        let io_bursts: Vec<u64> = (1..n)
            .map(|_| rng.random_range(opts.io_burst.clone()))
            .collect();

        processes.push(ProcessSpec {
            id,
            arrival,
            cpu_bursts,
            io_bursts,
        });
    }

    Workload {
        switch_overhead: opts.switch_overhead,
        processes,
    }
}

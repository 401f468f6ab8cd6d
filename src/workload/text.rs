//! 文本格式
//!
//! ```text
//! <进程数> <切换开销>
//! <id> <到达时间> <CPU 突发数>
//! <突发序号> <CPU 时间> [<I/O 时间>]    (最后一个突发没有 I/O 时间)
//! ```
//!
//! 所有字段以空白分隔，换行不敏感。

use super::{ProcessSpec, Workload, WorkloadError};
use std::str::{FromStr, SplitWhitespace};

struct Tokens<'a> {
    it: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn next<T: FromStr>(&mut self, what: &'static str) -> Result<T, WorkloadError> {
        let tok = self
            .it
            .next()
            .ok_or(WorkloadError::UnexpectedEof { what })?;
        tok.parse().map_err(|_| WorkloadError::InvalidNumber {
            what,
            token: tok.to_string(),
        })
    }
}

pub fn parse_text(raw: &str) -> Result<Workload, WorkloadError> {
    let mut t = Tokens {
        it: raw.split_whitespace(),
    };
    let count: usize = t.next("process count")?;
    let switch_overhead: u64 = t.next("process switch time")?;

    let mut processes = Vec::with_capacity(count);
    for _ in 0..count {
        let id: u32 = t.next("process id")?;
        let arrival: u64 = t.next("arrival time")?;
        let bursts: usize = t.next("CPU burst count")?;

        let mut cpu_bursts = Vec::with_capacity(bursts);
        let mut io_bursts = Vec::with_capacity(bursts.saturating_sub(1));
        for j in 0..bursts {
            // 突发序号只用于可读性
            let _: u64 = t.next("burst number")?;
            cpu_bursts.push(t.next("CPU burst time")?);
            if j + 1 < bursts {
                io_bursts.push(t.next("I/O burst time")?);
            }
        }
        processes.push(ProcessSpec {
            id,
            arrival,
            cpu_bursts,
            io_bursts,
        });
    }

    let wl = Workload {
        switch_overhead,
        processes,
    };
    wl.validate()?;
    Ok(wl)
}

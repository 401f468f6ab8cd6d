//! 进程表
//!
//! 一次仿真运行独占的进程 arena；事件、就绪队列与阻塞集合只保存 `Pid`。

use super::id::Pid;
use super::model::Process;
use std::ops::{Index, IndexMut};

#[derive(Debug, Default, Clone)]
pub struct ProcessTable {
    procs: Vec<Process>,
}

impl ProcessTable {
    pub fn insert(&mut self, p: Process) -> Pid {
        let pid = Pid(self.procs.len());
        self.procs.push(p);
        pid
    }

    pub fn get(&self, pid: Pid) -> Option<&Process> {
        self.procs.get(pid.0)
    }

    pub fn len(&self) -> usize {
        self.procs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pid, &Process)> {
        self.procs.iter().enumerate().map(|(i, p)| (Pid(i), p))
    }
}

impl Index<Pid> for ProcessTable {
    type Output = Process;

    fn index(&self, pid: Pid) -> &Process {
        &self.procs[pid.0]
    }
}

impl IndexMut<Pid> for ProcessTable {
    fn index_mut(&mut self, pid: Pid) -> &mut Process {
        &mut self.procs[pid.0]
    }
}

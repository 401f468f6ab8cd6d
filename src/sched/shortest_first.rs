//! 按键值升序出队的就绪结构，SJF 与 SRTN 共用。
//!
//! 排序规则：键值小者优先；键值相同按入队顺序（FIFO）。

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::process::Pid;

#[derive(Debug, Default)]
pub struct ShortestFirstQueue {
    next_seq: u64,
    heap: BinaryHeap<Reverse<(u64, u64, Pid)>>,
}

impl ShortestFirstQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: u64, pid: Pid) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.heap.push(Reverse((key, seq, pid)));
    }

    pub fn pop(&mut self) -> Option<Pid> {
        self.heap.pop().map(|Reverse((_, _, pid))| pid)
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.heap.iter().any(|Reverse((_, _, p))| *p == pid)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

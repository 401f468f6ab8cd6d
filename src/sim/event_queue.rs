//! 事件队列
//!
//! 按 `(时间, 事件类型等级, 入队序号)` 排序的最小堆。

use super::event::Event;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// 事件的全序比较：先比较时间，再比较事件类型等级。
///
/// 两者都相等时返回 `Equal`，由队列用入队序号兜底，保证结果可复现。
pub fn event_order(a: &Event, b: &Event) -> Ordering {
    a.at()
        .cmp(&b.at())
        .then_with(|| a.kind().rank().cmp(&b.kind().rank()))
}

struct QueuedEvent {
    seq: u64,
    ev: Event,
}

// BinaryHeap 是 max-heap；我们需要最小时间优先，因此反向比较。
impl Ord for QueuedEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        event_order(&self.ev, &other.ev)
            .then_with(|| self.seq.cmp(&other.seq))
            .reverse()
    }
}

impl PartialOrd for QueuedEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueuedEvent {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl Eq for QueuedEvent {}

/// 仿真事件队列
#[derive(Default)]
pub struct EventQueue {
    next_seq: u64,
    q: BinaryHeap<QueuedEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入事件，O(log n)
    pub fn push(&mut self, ev: Event) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.q.push(QueuedEvent { seq, ev });
    }

    /// 取出最早的事件。
    ///
    /// # Panics
    ///
    /// 队列为空时 panic：调用方必须先检查 [`EventQueue::has_events`]。
    pub fn pop(&mut self) -> Event {
        match self.q.pop() {
            Some(item) => item.ev,
            None => panic!("EventQueue::pop on an empty queue"),
        }
    }

    pub fn peek(&self) -> Option<&Event> {
        self.q.peek().map(|item| &item.ev)
    }

    pub fn has_events(&self) -> bool {
        !self.q.is_empty()
    }

    pub fn len(&self) -> usize {
        self.q.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q.is_empty()
    }
}

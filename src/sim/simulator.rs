//! 仿真器
//!
//! 虚拟时间事件循环：维护时钟、唯一的运行槽、阻塞集合与事件队列，
//! 驱动进程状态机，并把就绪/派发决策委托给调度器。

use super::event::{Event, EventType};
use super::event_queue::EventQueue;
use super::time::SimTime;
use crate::process::{Pid, Process, ProcessState, ProcessTable};
use crate::sched::{Scheduler, TimeSlice};
use crate::stats::Statistics;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, trace};

/// 一次状态迁移记录（verbose 输出用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub at: SimTime,
    pub process: u32,
    pub from: ProcessState,
    pub to: ProcessState,
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "At time {}: Process {} moves from {} to {}",
            self.at, self.process, self.from, self.to
        )
    }
}

/// 事件驱动的 CPU 调度仿真器。每次运行独占自己的调度器、进程表与事件队列。
pub struct Simulator {
    now: SimTime,
    switch_overhead: u64,
    procs: ProcessTable,
    scheduler: Box<dyn Scheduler>,
    queue: EventQueue,
    running: Option<Pid>,
    /// 阻塞中的进程 -> 预计 I/O 完成时间
    blocked: BTreeMap<Pid, SimTime>,
    stats: Statistics,
    transitions: Option<Vec<Transition>>,
    events_processed: u64,
    last_event_at: SimTime,
}

impl Simulator {
    pub fn new(scheduler: Box<dyn Scheduler>, switch_overhead: u64) -> Self {
        Self {
            now: SimTime::ZERO,
            switch_overhead,
            procs: ProcessTable::default(),
            scheduler,
            queue: EventQueue::new(),
            running: None,
            blocked: BTreeMap::new(),
            stats: Statistics::default(),
            transitions: None,
            events_processed: 0,
            last_event_at: SimTime::ZERO,
        }
    }

    /// 记录每一次状态迁移
    pub fn with_transition_log(mut self) -> Self {
        self.transitions = Some(Vec::new());
        self
    }

    /// 登记一个 NEW 进程，并在其到达时间调度 PROCESS_ARRIVAL。
    pub fn add_process(&mut self, p: Process) -> Pid {
        debug_assert_eq!(p.state(), ProcessState::New);
        let at = p.arrival_time();
        let pid = self.procs.insert(p);
        self.queue
            .push(Event::new(EventType::ProcessArrival, at, pid));
        trace!(?pid, arrival = %at, "登记进程");
        pid
    }

    /// 获取当前仿真时间
    pub fn now(&self) -> SimTime {
        self.now
    }

    pub fn running(&self) -> Option<Pid> {
        self.running
    }

    pub fn is_blocked(&self, pid: Pid) -> bool {
        self.blocked.contains_key(&pid)
    }

    /// 阻塞进程预计完成 I/O 的时间
    pub fn io_completion_time(&self, pid: Pid) -> Option<SimTime> {
        self.blocked.get(&pid).copied()
    }

    pub fn blocked_count(&self) -> usize {
        self.blocked.len()
    }

    pub fn process(&self, pid: Pid) -> &Process {
        &self.procs[pid]
    }

    pub fn processes(&self) -> &ProcessTable {
        &self.procs
    }

    pub fn scheduler(&self) -> &dyn Scheduler {
        self.scheduler.as_ref()
    }

    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    pub fn transitions(&self) -> &[Transition] {
        self.transitions.as_deref().unwrap_or(&[])
    }

    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }

    pub fn has_pending_events(&self) -> bool {
        self.queue.has_events()
    }

    /// 处理一个事件；队列为空时返回 false。
    pub fn step(&mut self) -> bool {
        if !self.queue.has_events() {
            return false;
        }
        let ev = self.queue.pop();
        // 切换开销可能已把时钟推过事件时间，时钟不回退
        self.now = self.now.max(ev.at());
        self.last_event_at = self.now;
        self.events_processed += 1;

        debug!(
            event_num = self.events_processed,
            now = %self.now,
            scheduled_at = %ev.at(),
            kind = ev.kind().label(),
            pid = ev.pid().0,
            remaining_queue = self.queue.len(),
            "执行事件"
        );

        self.process_event(ev);
        true
    }

    /// 处理所有时间不晚于 `until` 的事件，不做收尾统计。
    pub fn run_until(&mut self, until: SimTime) {
        while let Some(top) = self.queue.peek() {
            if top.at() > until {
                break;
            }
            self.step();
        }
    }

    /// 运行所有事件直到队列为空，并返回最终统计。
    #[tracing::instrument(skip(self))]
    pub fn run(&mut self) -> &Statistics {
        info!(processes = self.procs.len(), "▶️  开始运行仿真");

        while self.step() {}

        debug_assert!(
            self.procs
                .iter()
                .all(|(_, p)| p.state() == ProcessState::Terminated),
            "event queue drained with unfinished processes"
        );
        // 末尾的切换开销不计入总时间
        self.stats.set_total_time(self.last_event_at.0);
        self.stats.record_processes(self.procs.iter().map(|(_, p)| p));

        info!(
            total_events = self.events_processed,
            final_time = %self.last_event_at,
            cpu_busy = self.stats.cpu_busy_time,
            "✅ 仿真完成"
        );
        &self.stats
    }

    fn process_event(&mut self, ev: Event) {
        let pid = ev.pid();
        match ev.kind() {
            EventType::ProcessArrival => self.on_arrival(pid),
            EventType::IoBurstCompletion => self.on_io_burst_completion(pid),
            kind => {
                // 运行相关事件只对仍然有效的 CPU 分配生效
                if !self.holds_grant(pid, ev.grant()) {
                    debug!(kind = kind.label(), pid = pid.0, "丢弃过期事件");
                    return;
                }
                match kind {
                    EventType::CpuBurstCompletion => self.on_cpu_burst_completion(pid),
                    EventType::TimeSliceExpired => self.on_time_slice_expired(pid),
                    EventType::ProcessPreempted => self.on_preempted(pid),
                    EventType::ProcessArrival | EventType::IoBurstCompletion => unreachable!(),
                }
            }
        }
    }

    fn holds_grant(&self, pid: Pid, grant: Option<u64>) -> bool {
        self.running == Some(pid)
            && grant.is_some()
            && self.procs[pid].grant().map(|g| g.seq) == grant
    }

    fn on_arrival(&mut self, pid: Pid) {
        self.transition(pid, ProcessState::Ready);
        self.admit(pid);
    }

    fn on_cpu_burst_completion(&mut self, pid: Pid) {
        let used = self.procs[pid].revoke_grant(self.now);
        self.procs[pid].add_service_time(used);
        self.stats.add_cpu_busy_time(used);

        self.procs[pid].move_to_next_burst();
        if self.procs[pid].has_more_bursts() {
            let io = self.procs[pid].remaining_in_burst();
            let done_at = self.now.after(io);
            self.transition(pid, ProcessState::Blocked);
            self.blocked.insert(pid, done_at);
            self.queue
                .push(Event::new(EventType::IoBurstCompletion, done_at, pid));
        } else {
            self.transition(pid, ProcessState::Terminated);
            self.procs[pid].set_finish_time(self.now);
        }

        self.running = None;
        self.charge_process_switch();
        self.schedule_next_process();
    }

    fn on_io_burst_completion(&mut self, pid: Pid) {
        let p = &mut self.procs[pid];
        let io = p.remaining_in_burst();
        p.add_io_time(io);
        p.decrement_remaining_time(io);
        self.blocked.remove(&pid);

        self.procs[pid].move_to_next_burst();
        self.transition(pid, ProcessState::Ready);
        self.admit(pid);
    }

    fn on_time_slice_expired(&mut self, pid: Pid) {
        let used = self.procs[pid].revoke_grant(self.now);
        self.procs[pid].add_service_time(used);
        self.stats.add_cpu_busy_time(used);

        self.transition(pid, ProcessState::Ready);
        self.scheduler.add_process(pid, &self.procs[pid]);
        self.running = None;
        self.charge_process_switch();
        self.schedule_next_process();
    }

    /// 抢占本身不计切换开销
    fn on_preempted(&mut self, pid: Pid) {
        let used = self.procs[pid].revoke_grant(self.now);
        self.procs[pid].add_service_time(used);
        self.stats.add_cpu_busy_time(used);

        self.transition(pid, ProcessState::Ready);
        self.scheduler.add_process(pid, &self.procs[pid]);
        self.running = None;
        self.schedule_next_process();
    }

    /// 新就绪进程：必要时调度抢占事件，交给调度器，CPU 空闲则派发。
    fn admit(&mut self, pid: Pid) {
        if let Some(run) = self.running {
            let running = &self.procs[run];
            if self
                .scheduler
                .should_preempt(running, &self.procs[pid], self.now)
            {
                if let Some(grant) = running.grant() {
                    debug!(
                        now = %self.now,
                        running = running.id(),
                        arriving = self.procs[pid].id(),
                        "调度抢占事件"
                    );
                    self.queue.push(Event::for_grant(
                        EventType::ProcessPreempted,
                        self.now,
                        run,
                        grant.seq,
                    ));
                }
            }
        }

        self.scheduler.add_process(pid, &self.procs[pid]);

        if self.running.is_none() {
            self.schedule_next_process();
        }
    }

    fn charge_process_switch(&mut self) {
        self.now = self.now.after(self.switch_overhead);
        self.stats.add_process_switch_time(self.switch_overhead);
    }

    /// 派发：CPU 空闲且有就绪进程时取出一个并分配 CPU。
    fn schedule_next_process(&mut self) {
        if self.running.is_some() {
            return;
        }
        let Some(pid) = self.scheduler.next_process() else {
            return;
        };

        self.transition(pid, ProcessState::Running);
        let now = self.now;
        let slice = self.scheduler.time_slice();
        let p = &mut self.procs[pid];
        p.set_start_time(now);

        let remaining = p.remaining_in_burst();
        let (kind, len) = match slice {
            TimeSlice::Quantum(q) if remaining > q => (EventType::TimeSliceExpired, q),
            _ => (EventType::CpuBurstCompletion, remaining),
        };
        let grant = p.grant_cpu(now, len);
        self.queue
            .push(Event::for_grant(kind, grant.end(), pid, grant.seq));
        self.running = Some(pid);

        debug!(
            now = %now,
            process = self.procs[pid].id(),
            slice = len,
            next = kind.label(),
            ready_left = self.scheduler.len(),
            "派发进程"
        );
    }

    fn transition(&mut self, pid: Pid, to: ProcessState) {
        let p = &mut self.procs[pid];
        let from = p.state();
        p.set_state(to, self.now);
        trace!(now = %self.now, process = p.id(), %from, %to, "状态迁移");
        if let Some(log) = self.transitions.as_mut() {
            log.push(Transition {
                at: self.now,
                process: p.id(),
                from,
                to,
            });
        }
    }
}

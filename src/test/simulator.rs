use crate::process::{Pid, ProcessState};
use crate::sched::{DEFAULT_POLICIES, Policy};
use crate::sim::{SimTime, Simulator, run_policy};
use crate::workload::{ProcessSpec, RandomOpts, Workload, generate};

fn sim(policy: Policy, overhead: u64, specs: &[ProcessSpec]) -> Simulator {
    let mut sim = Simulator::new(policy.build(), overhead).with_transition_log();
    for s in specs {
        sim.add_process(s.to_process());
    }
    sim
}

fn spec(id: u32, arrival: u64, bursts: &[u64]) -> ProcessSpec {
    ProcessSpec::from_alternating(id, arrival, bursts)
}

/// 按派发顺序列出进程 id
fn dispatch_order(sim: &Simulator) -> Vec<u32> {
    sim.transitions()
        .iter()
        .filter(|t| t.to == ProcessState::Running)
        .map(|t| t.process)
        .collect()
}

#[test]
fn fcfs_dispatches_in_arrival_order() {
    let mut s = sim(
        Policy::Fcfs,
        0,
        &[spec(1, 0, &[30]), spec(2, 5, &[20]), spec(3, 10, &[10])],
    );
    let stats = s.run().clone();

    assert_eq!(dispatch_order(&s), vec![1, 2, 3]);
    assert_eq!(stats.total_time, 60);
    assert_eq!(stats.cpu_utilization(), 100);

    let starts: Vec<_> = stats.processes.iter().map(|p| p.start_time).collect();
    assert_eq!(starts, vec![Some(0), Some(30), Some(50)]);
    let waits: Vec<_> = stats.processes.iter().map(|p| p.wait_time).collect();
    assert_eq!(waits, vec![0, 25, 40]);
}

#[test]
fn srtn_preempts_the_instant_a_shorter_process_arrives() {
    let mut s = sim(
        Policy::Srtn,
        0,
        &[spec(1, 0, &[100]), spec(2, 0, &[40])],
    );
    s.run_until(SimTime::ZERO);

    assert_eq!(s.now(), SimTime::ZERO);
    assert_eq!(s.running(), Some(Pid(1)));
    assert_eq!(s.process(Pid(0)).state(), ProcessState::Ready);
    assert_eq!(s.process(Pid(0)).remaining_in_burst(), 100);
    assert_eq!(s.process(Pid(1)).state(), ProcessState::Running);
    assert_eq!(s.scheduler().len(), 1);

    let at_zero: Vec<_> = s
        .transitions()
        .iter()
        .map(|t| (t.process, t.from, t.to))
        .collect();
    use ProcessState::*;
    assert_eq!(
        at_zero,
        vec![
            (1, New, Ready),
            (1, Ready, Running),
            (2, New, Ready),
            (1, Running, Ready),
            (2, Ready, Running),
        ]
    );

    let stats = s.run().clone();
    assert_eq!(stats.total_time, 140);
    assert_eq!(stats.processes[0].finish_time, Some(140));
    assert_eq!(stats.processes[0].service_time, 100);
    assert_eq!(stats.processes[0].start_time, Some(0));
    assert_eq!(stats.processes[1].finish_time, Some(40));
    // 2 次到达、1 次抢占、2 次完成，外加 1 个被丢弃的过期完成事件
    assert_eq!(s.events_processed(), 6);
}

#[test]
fn srtn_preemption_mid_burst_returns_unused_time() {
    let mut s = sim(
        Policy::Srtn,
        0,
        &[spec(1, 0, &[100]), spec(2, 30, &[40])],
    );
    s.run_until(SimTime(30));
    assert_eq!(s.running(), Some(Pid(1)));
    assert_eq!(s.process(Pid(0)).remaining_in_burst(), 70);
    assert_eq!(s.process(Pid(0)).service_time(), 30);

    let stats = s.run().clone();
    assert_eq!(stats.processes[0].finish_time, Some(140));
    assert_eq!(stats.processes[0].service_time, 100);
    assert_eq!(stats.processes[0].wait_time, 40);
    assert_eq!(stats.processes[1].turnaround_time, Some(40));
    assert_eq!(stats.cpu_busy_time, 140);
}

#[test]
fn srtn_process_returning_from_io_can_preempt() {
    let mut s = sim(
        Policy::Srtn,
        0,
        &[spec(1, 0, &[5, 10, 5]), spec(2, 1, &[50])],
    );
    let stats = s.run().clone();

    assert!(s.transitions().iter().any(|t| t.at == SimTime(15)
        && t.process == 2
        && t.from == ProcessState::Running
        && t.to == ProcessState::Ready));
    assert_eq!(stats.processes[0].finish_time, Some(20));
    assert_eq!(stats.processes[0].io_time, 10);
    assert_eq!(stats.processes[1].finish_time, Some(60));
    assert_eq!(stats.processes[1].service_time, 50);
    assert_eq!(stats.total_time, 60);
}

#[test]
fn sjf_picks_shortest_burst_at_dispatch_without_preempting() {
    let mut s = sim(
        Policy::Sjf,
        0,
        &[spec(1, 0, &[50]), spec(2, 1, &[30]), spec(3, 2, &[10])],
    );
    let stats = s.run().clone();

    assert_eq!(dispatch_order(&s), vec![1, 3, 2]);
    let finish: Vec<_> = stats.processes.iter().map(|p| p.finish_time).collect();
    assert_eq!(finish, vec![Some(50), Some(90), Some(60)]);
}

#[test]
fn round_robin_slices_a_single_burst_into_quanta() {
    let mut s = sim(Policy::RoundRobin { quantum: 10 }, 0, &[spec(1, 0, &[25])]);

    s.run_until(SimTime(10));
    assert_eq!(s.running(), Some(Pid(0)));
    assert_eq!(s.process(Pid(0)).service_time(), 10);
    // 下一个时间片已经扣除
    assert_eq!(s.process(Pid(0)).remaining_in_burst(), 5);

    let stats = s.run().clone();
    let expirations = s
        .transitions()
        .iter()
        .filter(|t| t.from == ProcessState::Running && t.to == ProcessState::Ready)
        .count();
    assert_eq!(expirations, 2);
    assert_eq!(stats.processes[0].finish_time, Some(25));
    assert_eq!(stats.processes[0].service_time, 25);
    assert_eq!(stats.cpu_utilization(), 100);
}

#[test]
fn switch_overhead_is_charged_on_completion_and_quantum_expiry() {
    let mut s = sim(Policy::RoundRobin { quantum: 10 }, 2, &[spec(1, 0, &[25])]);
    let stats = s.run().clone();

    assert_eq!(stats.processes[0].finish_time, Some(29));
    assert_eq!(stats.total_time, 29);
    assert_eq!(stats.process_switch_time, 6);
    assert_eq!(stats.cpu_busy_time, 25);
    assert_eq!(stats.cpu_utilization(), 86);
}

#[test]
fn arrival_is_handled_before_completion_at_the_same_time() {
    let mut s = sim(Policy::Fcfs, 3, &[spec(1, 0, &[10]), spec(2, 10, &[5])]);
    let stats = s.run().clone();

    let first_at_ten: Vec<_> = s
        .transitions()
        .iter()
        .filter(|t| t.at == SimTime(10))
        .map(|t| (t.process, t.to))
        .collect();
    assert_eq!(
        first_at_ten,
        vec![(2, ProcessState::Ready), (1, ProcessState::Terminated)]
    );
    assert_eq!(stats.processes[1].start_time, Some(13));
    assert_eq!(stats.processes[1].wait_time, 3);
    assert_eq!(stats.processes[1].finish_time, Some(18));
    assert_eq!(stats.total_time, 18);
    assert_eq!(stats.process_switch_time, 6);
}

#[test]
fn clock_never_runs_backwards_past_switch_overhead() {
    let mut s = sim(Policy::Fcfs, 10, &[spec(1, 0, &[5]), spec(2, 7, &[5])]);
    let stats = s.run().clone();

    assert_eq!(stats.processes[1].start_time, Some(15));
    assert_eq!(stats.processes[1].finish_time, Some(20));
    assert_eq!(stats.processes[1].turnaround_time, Some(13));
    assert_eq!(stats.total_time, 20);
    assert_eq!(stats.cpu_utilization(), 50);
}

#[test]
fn io_bursts_block_and_conserve_time() {
    let mut s = sim(
        Policy::Fcfs,
        0,
        &[spec(1, 0, &[10, 15, 20]), spec(2, 5, &[30])],
    );

    s.run_until(SimTime(20));
    assert!(s.is_blocked(Pid(0)));
    assert_eq!(s.io_completion_time(Pid(0)), Some(SimTime(25)));
    assert_eq!(s.io_completion_time(Pid(1)), None);
    assert_eq!(s.blocked_count(), 1);
    assert_eq!(s.process(Pid(0)).state(), ProcessState::Blocked);
    assert_eq!(s.running(), Some(Pid(1)));

    let stats = s.run().clone();
    assert_eq!(s.blocked_count(), 0);
    assert_eq!(s.io_completion_time(Pid(0)), None);
    let p1 = &stats.processes[0];
    assert_eq!((p1.service_time, p1.io_time), (30, 15));
    assert_eq!(p1.turnaround_time, Some(60));
    assert_eq!(stats.processes[1].turnaround_time, Some(35));
    assert_eq!(stats.total_time, 60);
    assert_eq!(stats.cpu_utilization(), 100);
}

#[test]
fn every_policy_terminates_and_conserves_burst_time() {
    let opts = RandomOpts {
        processes: 12,
        ..RandomOpts::default()
    };
    let workload = generate(&opts, 7);

    for policy in DEFAULT_POLICIES {
        let report = run_policy(policy, &workload, false);
        let stats = &report.statistics;
        assert!(stats.cpu_utilization() <= 100, "{}", report.policy);
        assert_eq!(stats.processes.len(), workload.processes.len());

        for (p, spec) in stats.processes.iter().zip(&workload.processes) {
            assert_eq!(p.state, ProcessState::Terminated, "{}", report.policy);
            assert_eq!(p.service_time, spec.cpu_bursts.iter().sum::<u64>());
            assert_eq!(p.io_time, spec.io_bursts.iter().sum::<u64>());
            let finish = p.finish_time.expect("finished");
            assert!(finish >= p.arrival_time);
            assert_eq!(p.turnaround_time, Some(finish - p.arrival_time));
        }
        let busy: u64 = stats.processes.iter().map(|p| p.service_time).sum();
        assert_eq!(stats.cpu_busy_time, busy);
    }
}

#[test]
fn runs_with_different_policies_do_not_share_state() {
    let workload = Workload {
        switch_overhead: 0,
        processes: vec![spec(1, 0, &[100]), spec(2, 30, &[40])],
    };

    let fcfs = run_policy(Policy::Fcfs, &workload, false);
    let srtn = run_policy(Policy::Srtn, &workload, false);
    let fcfs_again = run_policy(Policy::Fcfs, &workload, false);

    assert_eq!(fcfs.statistics.processes[1].turnaround_time, Some(110));
    assert_eq!(srtn.statistics.processes[1].turnaround_time, Some(40));
    assert_eq!(fcfs.statistics, fcfs_again.statistics);
    assert_eq!(workload.processes[0].cpu_bursts, vec![100]);
}

#[test]
fn empty_workload_has_zero_utilization() {
    let mut s = sim(Policy::Fcfs, 5, &[]);
    let stats = s.run();
    assert_eq!(stats.total_time, 0);
    assert_eq!(stats.cpu_utilization(), 0);
    assert!(!s.has_pending_events());
}

#[test]
fn transition_lines_read_like_a_trace() {
    let report = run_policy(
        Policy::Fcfs,
        &Workload {
            switch_overhead: 0,
            processes: vec![spec(1, 0, &[5])],
        },
        true,
    );
    let lines: Vec<String> = report.transitions.iter().map(|t| t.to_string()).collect();
    assert_eq!(
        lines,
        vec![
            "At time 0: Process 1 moves from new to ready",
            "At time 0: Process 1 moves from ready to running",
            "At time 5: Process 1 moves from running to terminated",
        ]
    );
}

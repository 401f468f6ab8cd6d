use crate::process::{Process, ProcessState};
use crate::sim::SimTime;
use crate::stats::{ProcessReport, Statistics};

fn finished(id: u32, arrival: u64, finish: u64) -> Process {
    let mut p = Process::new(id, SimTime(arrival), vec![4], vec![]);
    p.set_state(ProcessState::Ready, SimTime(arrival));
    p.set_state(ProcessState::Running, SimTime(arrival));
    p.add_service_time(4);
    p.set_state(ProcessState::Terminated, SimTime(finish));
    p.set_finish_time(SimTime(finish));
    p
}

#[test]
fn utilization_is_rounded_and_zero_without_time() {
    let mut stats = Statistics::default();
    assert_eq!(stats.cpu_utilization(), 0);

    stats.add_cpu_busy_time(2);
    stats.set_total_time(3);
    assert_eq!(stats.cpu_utilization(), 67);

    stats.set_total_time(2);
    assert_eq!(stats.cpu_utilization(), 100);
}

#[test]
fn default_report_lists_total_time_and_utilization() {
    let mut stats = Statistics::default();
    stats.set_total_time(200);
    stats.add_cpu_busy_time(150);
    assert_eq!(
        stats.render_default("First Come First Serve"),
        "First Come First Serve:\nTotal Time required is 200 time units\nCPU Utilization is 75%\n"
    );
}

#[test]
fn detailed_report_has_one_line_per_process() {
    let done = finished(3, 2, 10);
    let pending = Process::new(4, SimTime(5), vec![1], vec![]);

    let mut stats = Statistics::default();
    stats.set_total_time(10);
    stats.add_cpu_busy_time(4);
    stats.record_processes([&done, &pending]);

    let out = stats.render_detailed("Shortest Job First");
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "Shortest Job First:");
    assert_eq!(lines[1], "Total Time required is 10 units");
    assert_eq!(lines[2], "CPU Utilization is 40%");
    assert_eq!(
        lines[3],
        "Process 3: arrival time: 2 service time: 4 units I/O time: 0 units turnaround time: 8 units finish time: 10 units"
    );
    assert!(lines[4].ends_with("turnaround time: -1 units finish time: -1 units"));
}

#[test]
fn process_report_snapshots_process_fields() {
    let r = ProcessReport::from(&finished(3, 2, 10));
    assert_eq!(r.id, 3);
    assert_eq!(r.state, ProcessState::Terminated);
    assert_eq!(r.start_time, None);
    assert_eq!(r.turnaround_time, Some(8));
    assert_eq!(r.finish_time, Some(10));
}

#[test]
fn statistics_serialize_with_snake_case_states() {
    let mut stats = Statistics::default();
    stats.record_processes([&finished(1, 0, 4)]);
    let v = serde_json::to_value(&stats).expect("serialize stats");
    assert_eq!(v["processes"][0]["state"], "terminated");
    assert_eq!(v["processes"][0]["turnaround_time"], 4);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "exceeds total time")]
fn busy_time_beyond_total_time_is_not_clamped() {
    let mut stats = Statistics::default();
    stats.set_total_time(10);
    stats.add_cpu_busy_time(11);
    stats.cpu_utilization();
}

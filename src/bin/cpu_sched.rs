//! CPU 调度仿真
//!
//! 读取工作负载（文件 / stdin / 随机生成），按一个或多个调度策略分别运行并输出统计。

use clap::Parser;
use cpusched_rs::sched::{DEFAULT_POLICIES, Policy};
use cpusched_rs::sim::{RunReport, run_policy};
use cpusched_rs::workload::{self, RandomOpts, Workload, WorkloadError};
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

#[derive(Debug, Parser)]
#[command(
    name = "cpu-sched",
    about = "Simulate CPU scheduling (FCFS / SJF / SRTN / Round Robin) over a process workload"
)]
struct Args {
    /// FCFS, SJF, SRTN, RR (= RR10, RR50, RR100) or RR<quantum>; defaults to all
    #[arg(short, long)]
    algorithm: Option<String>,

    /// Print per-process statistics
    #[arg(short, long)]
    detailed: bool,

    /// Print every process state transition
    #[arg(short, long)]
    verbose: bool,

    /// Workload file (`.json` or the text format); defaults to stdin when piped
    #[arg(long)]
    input: Option<PathBuf>,

    /// Ignore stdin and generate a random workload
    #[arg(long)]
    random: bool,

    /// Seed for the random workload (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of processes in the random workload
    #[arg(long, default_value_t = 50)]
    processes: u32,

    /// Emit reports as a JSON array instead of text
    #[arg(long)]
    json: bool,
}

fn select_policies(algorithm: Option<&str>) -> Option<Vec<Policy>> {
    let Some(label) = algorithm else {
        return Some(DEFAULT_POLICIES.to_vec());
    };
    if label.eq_ignore_ascii_case("RR") {
        return Some(DEFAULT_POLICIES[3..].to_vec());
    }
    Policy::parse(label).map(|p| vec![p])
}

fn load_workload(args: &Args) -> Result<Workload, WorkloadError> {
    if let Some(path) = &args.input {
        return Workload::load(path);
    }
    let stdin = std::io::stdin();
    if !args.random && !stdin.is_terminal() {
        let mut raw = String::new();
        stdin
            .lock()
            .read_to_string(&mut raw)
            .map_err(|source| WorkloadError::Io {
                path: PathBuf::from("<stdin>"),
                source,
            })?;
        return workload::parse_text(&raw);
    }

    let seed = args.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    });
    info!(seed, processes = args.processes, "生成随机工作负载");
    let opts = RandomOpts {
        processes: args.processes,
        ..RandomOpts::default()
    };
    Ok(workload::generate(&opts, seed))
}

fn main() -> ExitCode {
    // 日志写到 stderr，stdout 只留给报告
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();

    let Some(policies) = select_policies(args.algorithm.as_deref()) else {
        eprintln!(
            "Invalid algorithm: {}",
            args.algorithm.as_deref().unwrap_or_default()
        );
        eprintln!("Valid algorithms are: FCFS, SJF, SRTN, RR");
        return ExitCode::FAILURE;
    };

    let workload = match load_workload(&args) {
        Ok(wl) => wl,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    info!(
        processes = workload.processes.len(),
        switch_overhead = workload.switch_overhead,
        "工作负载已加载"
    );

    let reports: Vec<RunReport> = policies
        .iter()
        .map(|&policy| run_policy(policy, &workload, args.verbose))
        .collect();

    if args.json {
        match serde_json::to_string_pretty(&reports) {
            Ok(out) => println!("{out}"),
            Err(err) => {
                eprintln!("error: failed to encode reports: {err}");
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    for (i, report) in reports.iter().enumerate() {
        if i > 0 {
            println!();
        }
        for t in &report.transitions {
            println!("{t}");
        }
        print!("{}", report.render(args.detailed));
    }
    ExitCode::SUCCESS
}

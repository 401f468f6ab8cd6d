pub mod process;
pub mod sched;
pub mod sim;
pub mod stats;
pub mod workload;

#[cfg(test)]
mod test;

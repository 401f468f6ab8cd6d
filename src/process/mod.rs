//! 进程模块
//!
//! 进程状态机与进程表。

mod id;
mod model;
mod table;

pub use id::Pid;
pub use model::{CpuGrant, Process, ProcessState};
pub use table::ProcessTable;

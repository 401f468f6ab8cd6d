//! 标识符类型
//!
//! 进程表中的槽位句柄。

/// 进程句柄：`ProcessTable` 中的下标
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pid(pub usize);

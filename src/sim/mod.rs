//! 仿真核心模块
//!
//! 此模块包含事件驱动仿真的核心组件：仿真时间、事件、事件队列与仿真器。

// 子模块声明
mod event;
mod event_queue;
mod run;
mod simulator;
mod time;

// 重新导出公共接口
pub use event::{Event, EventType};
pub use event_queue::{EventQueue, event_order};
pub use run::{RunReport, run_policy};
pub use simulator::{Simulator, Transition};
pub use time::SimTime;

//! 排队策略（Queue disciplines）
//!
//! 目前只有 FIFO 的等待队列，保存尚未开始服务的顾客的到达时间。

mod wait_line;

pub use wait_line::WaitLine;

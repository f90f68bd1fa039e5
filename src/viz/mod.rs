//! 快照记录（用于离线回放或实时仪表盘）
//!
//! 引擎只产生快照，不关心如何展示：
//! - `SnapshotLogger` 收集到内存，运行结束后写成 JSON 数组
//! - `ChannelSink` 把快照副本发给另一个线程，发送永不阻塞

mod channel;
mod logger;

pub use channel::ChannelSink;
pub use logger::SnapshotLogger;

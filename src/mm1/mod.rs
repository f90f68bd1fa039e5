//! 单服务台单队列（M/M/1）模型
//!
//! 服务台、FIFO 等待队列、统计累加器，以及驱动它们的引擎。

mod config;
mod engine;
mod snapshot;
mod state;
mod stats;
mod world;

pub use config::SimConfig;
pub use engine::{Engine, StopHandle, Summary, Termination};
pub use snapshot::{NullSink, Snapshot, SnapshotSink, Throttle};
pub use state::ServerState;
pub use stats::Accumulator;
pub use world::Mm1World;

//! 只读快照
//!
//! 快照是在事件边界上复制出来的值，消费者（可视化、日志）拿不到引擎内部的可变引用。

use serde::{Deserialize, Serialize};

use super::state::ServerState;
use super::world::Mm1World;
use crate::sim::{EventKind, Simulator};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub clock: f64,
    /// 刚执行的事件类型；运行开始前为 `None`
    pub event: Option<EventKind>,
    /// 已执行的事件数
    pub events: u64,
    pub server_state: ServerState,
    pub queue_length: usize,
    pub n_arrivals: u64,
    pub n_served: u64,
    pub avg_wait: f64,
    pub time_avg_queue: f64,
    pub utilization: f64,
    pub max_queue_length: usize,
}

impl Snapshot {
    pub fn capture(sim: &Simulator, world: &Mm1World, event: Option<EventKind>) -> Self {
        let now = sim.now();
        let stats = world.stats();
        Self {
            clock: now.as_f64(),
            event,
            events: sim.dispatched(),
            server_state: world.server(),
            queue_length: world.line().len(),
            n_arrivals: stats.n_arrivals,
            n_served: stats.n_served,
            avg_wait: stats.avg_wait(),
            time_avg_queue: stats.time_avg_queue(now),
            utilization: stats.utilization(now),
            max_queue_length: world.line().max_len(),
        }
    }
}

/// 快照消费者。`emit` 不应阻塞引擎。
pub trait SnapshotSink {
    fn emit(&mut self, snapshot: Snapshot);
}

impl<F: FnMut(Snapshot)> SnapshotSink for F {
    fn emit(&mut self, snapshot: Snapshot) {
        self(snapshot)
    }
}

/// 丢弃所有快照
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl SnapshotSink for NullSink {
    fn emit(&mut self, _snapshot: Snapshot) {}
}

/// 每 `every` 个事件放行一次快照。只影响发出频率，不影响统计量。
#[derive(Debug, Clone, Copy)]
pub struct Throttle {
    every: u64,
    since_emit: u64,
}

impl Throttle {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            since_emit: 0,
        }
    }

    /// 记录一个事件，返回本次是否应发出快照
    pub fn tick(&mut self) -> bool {
        self.since_emit += 1;
        if self.since_emit >= self.every {
            self.since_emit = 0;
            true
        } else {
            false
        }
    }

    /// 自上次发出以来是否有未发出的事件
    pub fn has_unemitted(&self) -> bool {
        self.since_emit > 0
    }

    pub fn every(&self) -> u64 {
        self.every
    }
}

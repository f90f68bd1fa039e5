//! 调度事件
//!
//! 定义调度事件结构及其优先级比较。

use super::event::{Event, EventKind};
use super::time::SimTime;
use std::cmp::Ordering;

/// 调度事件，包含执行时间、事件类型和序列号。
#[derive(Debug, Clone, Copy)]
pub struct ScheduledEvent {
    pub(crate) at: SimTime,
    pub(crate) kind: EventKind,
    pub(crate) seq: u64,
}

impl ScheduledEvent {
    pub fn event(&self) -> Event {
        Event {
            kind: self.kind,
            time: self.at,
        }
    }

    fn key(&self) -> (SimTime, u8, u64) {
        (self.at, self.kind.rank(), self.seq)
    }
}

// BinaryHeap 是 max-heap；我们需要 (time, rank, seq) 最小者优先，因此反向比较。
impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key()).reverse()
    }
}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ScheduledEvent {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ScheduledEvent {}

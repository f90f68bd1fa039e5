//! 事件
//!
//! 事件是带标签的值 `{kind, time}`。同一时刻的事件按 `EventKind::rank` 决定先后。

use serde::{Deserialize, Serialize};

use super::time::SimTime;

/// 事件类型。新增类型时需要同时给出 `rank`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Arrival,
    Departure,
}

impl EventKind {
    pub const ALL: [EventKind; 2] = [EventKind::Arrival, EventKind::Departure];

    /// 同时刻的先后次序：数值小的先执行。到达先于离开。
    pub fn rank(self) -> u8 {
        match self {
            EventKind::Arrival => 0,
            EventKind::Departure => 1,
        }
    }

    /// 事件队列中每种事件的槽位，与 `rank` 无关
    pub(crate) fn index(self) -> usize {
        match self {
            EventKind::Arrival => 0,
            EventKind::Departure => 1,
        }
    }
}

/// 已出队、待分发的事件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub kind: EventKind,
    pub time: SimTime,
}

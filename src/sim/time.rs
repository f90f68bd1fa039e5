//! 仿真时间类型
//!
//! 逻辑时间，与墙钟无关。

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// 仿真时间（实数，单位由调用方决定）。
///
/// `NEVER`（正无穷）表示“未调度”，它比任何有限时间都晚。
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);
    pub const NEVER: SimTime = SimTime(f64::INFINITY);

    pub fn as_f64(self) -> f64 {
        self.0
    }

    pub fn is_never(self) -> bool {
        self.0 == f64::INFINITY
    }

    /// 当前时刻之后 `duration` 的时刻
    pub fn after(self, duration: f64) -> SimTime {
        SimTime(self.0 + duration)
    }

    /// 自 `earlier` 起经过的时长；时间倒退时为负
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

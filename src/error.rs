//! 错误类型
//!
//! 仿真核心不存在可重试的错误：不变量被破坏、随机数流耗尽、配置非法，都会终止本次运行。

use thiserror::Error;

use crate::sim::{EventKind, SimTime};

/// 构造阶段（处理任何事件之前）被拒绝的配置。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be a positive finite number, got {value}")]
    NonPositiveMean { name: &'static str, value: f64 },
    #[error("snapshot_every must be at least 1")]
    ZeroSnapshotEvery,
    #[error("invalid {stream} distribution: {reason}")]
    InvalidDistribution {
        stream: &'static str,
        reason: String,
    },
}

/// 仿真运行期错误。除 `Config` 外均表示引擎自身缺陷或随机数源失效，对本次运行是致命的。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("clock regression: now={now:?}, next event at={at:?}")]
    ClockRegression { now: SimTime, at: SimTime },
    #[error("negative wait: arrived at {arrived:?}, service started at {started:?}")]
    NegativeWait { arrived: SimTime, started: SimTime },
    #[error("{kind:?} already pending at {pending:?}, refusing to schedule another at {requested:?}")]
    DoubleSchedule {
        kind: EventKind,
        pending: SimTime,
        requested: SimTime,
    },
    #[error("{stream} variate stream exhausted")]
    VariateExhausted { stream: &'static str },
    #[error("{stream} variate must be a non-negative finite duration, got {value}")]
    InvalidVariate { stream: &'static str, value: f64 },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

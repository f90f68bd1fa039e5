use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::variate::{ExpVariates, INTERARRIVAL, SERVICE};

/// 引擎构造时读取的配置。可从 JSON 加载，缺省字段取默认值。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    pub interarrival_mean: f64,
    pub service_mean: f64,
    pub seed: u64,
    /// 服务完成 `horizon` 位顾客后停止；`None` 表示一直运行直到外部停止
    pub horizon: Option<u64>,
    /// 每执行多少个事件发出一次快照
    pub snapshot_every: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            interarrival_mean: 2.0,
            service_mean: 1.0,
            seed: 42,
            horizon: None,
            snapshot_every: 5,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive_mean(INTERARRIVAL, self.interarrival_mean)?;
        positive_mean(SERVICE, self.service_mean)?;
        if self.snapshot_every == 0 {
            return Err(ConfigError::ZeroSnapshotEvery);
        }
        Ok(())
    }

    /// 按配置构造指数分布的随机变量源
    pub fn exp_variates(&self) -> Result<ExpVariates, ConfigError> {
        ExpVariates::new(self.interarrival_mean, self.service_mean, self.seed)
    }
}

fn positive_mean(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveMean { name, value })
    }
}

//! 统计累加器
//!
//! 每个事件恰好更新一次；派生指标是累加器的纯函数，可随时重复计算。

use serde::{Deserialize, Serialize};

use crate::sim::SimTime;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Accumulator {
    /// ∫ Q(t) dt，Q 为等待队列长度（不含正在服务者）
    pub area_q: f64,
    /// ∫ B(t) dt，B 为服务台忙碌指示
    pub area_busy: f64,
    /// 已开始服务的顾客等待时间之和
    pub total_wait: f64,
    pub max_wait: f64,
    pub n_started: u64,
    pub n_arrivals: u64,
    pub n_served: u64,
}

impl Accumulator {
    /// 以刚过去这段时间内保持的状态累加面积
    pub fn advance(&mut self, elapsed: f64, queue_len: usize, busy: bool) {
        self.area_q += queue_len as f64 * elapsed;
        if busy {
            self.area_busy += elapsed;
        }
    }

    pub fn record_wait(&mut self, wait: f64) {
        self.total_wait += wait;
        self.max_wait = self.max_wait.max(wait);
        self.n_started += 1;
    }

    /// 平均等待时间 d̄；尚无顾客开始服务时为 0
    pub fn avg_wait(&self) -> f64 {
        if self.n_started == 0 {
            0.0
        } else {
            self.total_wait / self.n_started as f64
        }
    }

    /// 时间平均队长 Q̄；时钟为 0 时为 0
    pub fn time_avg_queue(&self, clock: SimTime) -> f64 {
        per_unit_time(self.area_q, clock)
    }

    /// 服务台利用率（忙碌时间占比）
    pub fn utilization(&self, clock: SimTime) -> f64 {
        per_unit_time(self.area_busy, clock)
    }
}

fn per_unit_time(area: f64, clock: SimTime) -> f64 {
    if clock.as_f64() > 0.0 {
        area / clock.as_f64()
    } else {
        0.0
    }
}

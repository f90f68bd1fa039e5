//! 世界 trait
//!
//! 定义仿真世界接口。

use super::event::Event;
use super::simulator::Simulator;
use crate::error::SimError;

/// 仿真世界：由业务层实现（例如 M/M/1 的服务台、等待队列和统计量）。
pub trait World {
    /// 时钟即将前进 `elapsed`。此时世界状态仍是上一事件之后、本事件之前的状态。
    fn on_advance(&mut self, _elapsed: f64) {}

    /// 分发一个事件；`sim.now()` 已等于 `ev.time`。
    fn handle(&mut self, ev: Event, sim: &mut Simulator) -> Result<(), SimError>;

    fn on_tick(&mut self, _sim: &Simulator) {}
}

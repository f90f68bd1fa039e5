//! 随机变量源
//!
//! 引擎只要求两条相互独立、同分布的非负时长流；具体分布对引擎不透明。

mod exponential;
mod scripted;

pub use exponential::ExpVariates;
pub use scripted::ScriptedVariates;

use crate::error::SimError;

pub const INTERARRIVAL: &str = "interarrival";
pub const SERVICE: &str = "service";

/// 到达间隔与服务时长的来源。给定种子时必须可复现。
pub trait VariateSource: Send {
    fn next_interarrival(&mut self) -> Result<f64, SimError>;
    fn next_service(&mut self) -> Result<f64, SimError>;
}

impl<V: VariateSource + ?Sized> VariateSource for Box<V> {
    fn next_interarrival(&mut self) -> Result<f64, SimError> {
        (**self).next_interarrival()
    }

    fn next_service(&mut self) -> Result<f64, SimError> {
        (**self).next_service()
    }
}

/// 拒绝负数、NaN 和无穷大。
pub fn checked(stream: &'static str, value: f64) -> Result<f64, SimError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SimError::InvalidVariate { stream, value })
    }
}

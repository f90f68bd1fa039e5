//! FIFO 等待队列
//!
//! 只包含已到达但尚未开始服务的顾客，不含正在服务的那一位。

use std::collections::VecDeque;

use crate::sim::SimTime;

#[derive(Debug, Default, Clone)]
pub struct WaitLine {
    q: VecDeque<SimTime>,
    max_len: usize,
}

impl WaitLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// 顾客在 `arrived` 时刻排到队尾
    pub fn join(&mut self, arrived: SimTime) {
        self.q.push_back(arrived);
        self.max_len = self.max_len.max(self.q.len());
    }

    /// 队首顾客开始服务，返回其到达时间
    pub fn begin_service(&mut self) -> Option<SimTime> {
        self.q.pop_front()
    }

    pub fn head(&self) -> Option<SimTime> {
        self.q.front().copied()
    }

    pub fn len(&self) -> usize {
        self.q.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q.is_empty()
    }

    /// 运行以来观察到的最大队长
    pub fn max_len(&self) -> usize {
        self.max_len
    }
}

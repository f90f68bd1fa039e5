//! 仿真器
//!
//! 定义事件驱动仿真器，维护当前时间与事件队列。

use super::event::{Event, EventKind};
use super::event_queue::EventQueue;
use super::time::SimTime;
use super::world::World;
use crate::error::SimError;
use tracing::debug;

/// 事件驱动仿真器：维护当前时间与事件队列。
#[derive(Debug, Default)]
pub struct Simulator {
    now: SimTime,
    dispatched: u64,
    queue: EventQueue,
}

impl Simulator {
    /// 获取当前仿真时间
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// 已分发的事件数
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    /// 调度事件在指定时间执行
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn schedule(&mut self, kind: EventKind, at: SimTime) -> Result<(), SimError> {
        self.queue.schedule(kind, at)
    }

    /// 调度事件在当前时间之后 `delay` 执行
    pub fn schedule_in(&mut self, kind: EventKind, delay: f64) -> Result<(), SimError> {
        self.schedule(kind, self.now.after(delay))
    }

    pub fn reschedule(&mut self, kind: EventKind, at: SimTime) -> Option<SimTime> {
        self.queue.reschedule(kind, at)
    }

    pub fn cancel(&mut self, kind: EventKind) -> Option<SimTime> {
        self.queue.cancel(kind)
    }

    pub fn pending(&self, kind: EventKind) -> SimTime {
        self.queue.pending(kind)
    }

    pub fn peek_next(&mut self) -> Option<Event> {
        self.queue.peek_next()
    }

    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }

    /// 执行一个事件：出队、检查时钟不倒退、按经过的时长通知世界、推进时钟、分发。
    ///
    /// 队列为空时返回 `Ok(None)`。
    pub fn step(&mut self, world: &mut dyn World) -> Result<Option<Event>, SimError> {
        let Some(ev) = self.queue.pop_next() else {
            return Ok(None);
        };

        let elapsed = ev.time.since(self.now);
        // NaN 也视为倒退
        if !(elapsed >= 0.0) {
            return Err(SimError::ClockRegression {
                now: self.now,
                at: ev.time,
            });
        }

        world.on_advance(elapsed);
        self.now = ev.time;
        self.dispatched += 1;

        debug!(
            event_num = self.dispatched,
            kind = ?ev.kind,
            now = self.now.as_f64(),
            elapsed,
            "执行事件"
        );

        world.handle(ev, self)?;
        world.on_tick(self);
        Ok(Some(ev))
    }

    /// 运行直到事件队列为空或下一个事件晚于 `until`，返回执行的事件数。
    ///
    /// 时钟停在最后一个被执行事件的时间，不会被推进到 `until`。
    pub fn run_until(&mut self, until: SimTime, world: &mut dyn World) -> Result<u64, SimError> {
        let mut count = 0;
        while let Some(next) = self.queue.peek_next() {
            if next.time > until {
                break;
            }
            self.step(world)?;
            count += 1;
        }
        Ok(count)
    }
}

//! 仿真引擎
//!
//! 每次构造对应一次运行：拥有仿真器与 M/M/1 世界，按事件推进，按节流频率发出快照，
//! 在达到顾客数上限、外部请求停止或事件队列耗尽时终止。

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::config::SimConfig;
use super::snapshot::{Snapshot, SnapshotSink, Throttle};
use super::world::Mm1World;
use crate::error::SimError;
use crate::sim::{Event, EventKind, Simulator};
use crate::variate::VariateSource;

/// 协作式停止信号：在两次迭代之间检查，不会打断正在执行的事件。
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// 已服务顾客数达到上限
    Horizon,
    /// 外部请求停止
    Stopped,
    /// 没有待执行事件
    Drained,
    /// 不变量被破坏或随机数源失效；状态已不可信，不再推进
    Failed,
}

/// 运行结束（或任意时刻）的汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub clock: f64,
    pub events: u64,
    pub n_arrivals: u64,
    pub n_started: u64,
    pub n_served: u64,
    pub avg_wait: f64,
    pub max_wait: f64,
    pub time_avg_queue: f64,
    pub utilization: f64,
    pub max_queue_length: usize,
    pub termination: Option<Termination>,
}

#[derive(Debug)]
pub struct Engine {
    config: SimConfig,
    sim: Simulator,
    world: Mm1World,
    throttle: Throttle,
    stop: StopHandle,
    last_event: Option<EventKind>,
    termination: Option<Termination>,
}

impl Engine {
    /// 使用配置中的指数分布参数与种子构造引擎
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        let variates = config.exp_variates()?;
        Self::with_variates(config, variates)
    }

    /// 使用外部注入的随机变量源构造引擎；配置中的分布参数仅做校验
    pub fn with_variates(
        config: SimConfig,
        variates: impl VariateSource + 'static,
    ) -> Result<Self, SimError> {
        config.validate()?;

        let mut sim = Simulator::default();
        let mut world = Mm1World::new(Box::new(variates));
        world.start(&mut sim)?;

        Ok(Self {
            throttle: Throttle::new(config.snapshot_every),
            config,
            sim,
            world,
            stop: StopHandle::default(),
            last_event: None,
            termination: None,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn simulator(&self) -> &Simulator {
        &self.sim
    }

    pub fn world(&self) -> &Mm1World {
        &self.world
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    pub fn is_terminated(&self) -> bool {
        self.termination.is_some()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.sim, &self.world, self.last_event)
    }

    pub fn summary(&self) -> Summary {
        let now = self.sim.now();
        let stats = self.world.stats();
        Summary {
            clock: now.as_f64(),
            events: self.sim.dispatched(),
            n_arrivals: stats.n_arrivals,
            n_started: stats.n_started,
            n_served: stats.n_served,
            avg_wait: stats.avg_wait(),
            max_wait: stats.max_wait,
            time_avg_queue: stats.time_avg_queue(now),
            utilization: stats.utilization(now),
            max_queue_length: self.world.line().max_len(),
            termination: self.termination,
        }
    }

    /// 执行一次迭代。已终止（或本次判定终止）时返回 `Ok(None)`。
    ///
    /// 返回 `Err` 后引擎以 `Termination::Failed` 终止，之后的调用都返回 `Ok(None)`。
    pub fn step(&mut self, sink: &mut dyn SnapshotSink) -> Result<Option<Event>, SimError> {
        if self.termination.is_some() {
            return Ok(None);
        }
        if let Some(reason) = self.stop_condition() {
            self.terminate(reason, sink);
            return Ok(None);
        }

        let stepped = match self.sim.step(&mut self.world) {
            Ok(stepped) => stepped,
            Err(e) => {
                error!(error = %e, now = self.sim.now().as_f64(), "仿真中止");
                self.termination = Some(Termination::Failed);
                return Err(e);
            }
        };
        let Some(ev) = stepped else {
            self.terminate(Termination::Drained, sink);
            return Ok(None);
        };
        self.last_event = Some(ev.kind);

        if self.throttle.tick() {
            sink.emit(self.snapshot());
        }
        if self.horizon_reached() {
            self.terminate(Termination::Horizon, sink);
        }
        Ok(Some(ev))
    }

    /// 运行到终止
    #[tracing::instrument(skip(self, sink))]
    pub fn run(&mut self, sink: &mut dyn SnapshotSink) -> Result<Summary, SimError> {
        self.run_with(sink, |_| {})
    }

    /// 运行到终止；每次迭代之后调用 `between`（例如插入墙钟延迟以便观看动画）。
    pub fn run_with(
        &mut self,
        sink: &mut dyn SnapshotSink,
        mut between: impl FnMut(&Engine),
    ) -> Result<Summary, SimError> {
        info!(
            interarrival_mean = self.config.interarrival_mean,
            service_mean = self.config.service_mean,
            seed = self.config.seed,
            horizon = ?self.config.horizon,
            snapshot_every = self.config.snapshot_every,
            "▶️  开始运行仿真"
        );

        while self.step(sink)?.is_some() {
            between(self);
        }

        let summary = self.summary();
        info!(
            termination = ?summary.termination,
            total_events = summary.events,
            final_time = summary.clock,
            served = summary.n_served,
            avg_wait = summary.avg_wait,
            time_avg_queue = summary.time_avg_queue,
            "✅ 仿真完成"
        );
        Ok(summary)
    }

    fn horizon_reached(&self) -> bool {
        self.config
            .horizon
            .is_some_and(|n| self.world.stats().n_served >= n)
    }

    fn stop_condition(&self) -> Option<Termination> {
        if self.horizon_reached() {
            Some(Termination::Horizon)
        } else if self.stop.is_stopped() {
            Some(Termination::Stopped)
        } else {
            None
        }
    }

    fn terminate(&mut self, reason: Termination, sink: &mut dyn SnapshotSink) {
        debug!(?reason, now = self.sim.now().as_f64(), "终止");
        self.termination = Some(reason);
        // 最后一次更新：节流跳过的尾部事件也要体现在快照里
        if self.throttle.has_unemitted() {
            self.throttle = Throttle::new(self.throttle.every());
            sink.emit(self.snapshot());
        }
    }
}

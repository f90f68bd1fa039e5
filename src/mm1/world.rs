//! M/M/1 世界
//!
//! 持有服务台、等待队列、统计累加器和随机变量源；只由 `Simulator` 分发的事件修改。

use tracing::trace;

use super::state::ServerState;
use super::stats::Accumulator;
use crate::error::SimError;
use crate::queue::WaitLine;
use crate::sim::{Event, EventKind, SimTime, Simulator, World};
use crate::variate::{self, INTERARRIVAL, SERVICE, VariateSource};

pub struct Mm1World {
    server: ServerState,
    line: WaitLine,
    stats: Accumulator,
    variates: Box<dyn VariateSource>,
}

impl std::fmt::Debug for Mm1World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mm1World")
            .field("server", &self.server)
            .field("line", &self.line)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl Mm1World {
    pub fn new(variates: Box<dyn VariateSource>) -> Self {
        Self {
            server: ServerState::Idle,
            line: WaitLine::new(),
            stats: Accumulator::default(),
            variates,
        }
    }

    pub fn server(&self) -> ServerState {
        self.server
    }

    pub fn line(&self) -> &WaitLine {
        &self.line
    }

    pub fn stats(&self) -> &Accumulator {
        &self.stats
    }

    /// 系统内顾客数（排队 + 服务中）
    pub fn in_system(&self) -> usize {
        self.line.len() + self.server.in_service()
    }

    /// 调度第一个到达事件
    pub fn start(&mut self, sim: &mut Simulator) -> Result<(), SimError> {
        self.schedule_next_arrival(sim)
    }

    fn schedule_next_arrival(&mut self, sim: &mut Simulator) -> Result<(), SimError> {
        let gap = variate::checked(INTERARRIVAL, self.variates.next_interarrival()?)?;
        sim.schedule_in(EventKind::Arrival, gap)
    }

    /// 顾客开始服务：记录等待时间并调度其离开
    fn start_service(&mut self, arrived: SimTime, sim: &mut Simulator) -> Result<(), SimError> {
        let now = sim.now();
        let wait = now.since(arrived);
        if !(wait >= 0.0) {
            return Err(SimError::NegativeWait {
                arrived,
                started: now,
            });
        }
        self.stats.record_wait(wait);
        self.server = ServerState::Busy;

        let service = variate::checked(SERVICE, self.variates.next_service()?)?;
        trace!(wait, service, "开始服务");
        sim.schedule_in(EventKind::Departure, service)
    }

    fn on_arrival(&mut self, sim: &mut Simulator) -> Result<(), SimError> {
        self.stats.n_arrivals += 1;
        self.schedule_next_arrival(sim)?;

        match self.server {
            ServerState::Idle => self.start_service(sim.now(), sim),
            ServerState::Busy => {
                self.line.join(sim.now());
                Ok(())
            }
        }
    }

    fn on_departure(&mut self, sim: &mut Simulator) -> Result<(), SimError> {
        self.stats.n_served += 1;

        match self.line.begin_service() {
            Some(arrived) => self.start_service(arrived, sim),
            None => {
                self.server = ServerState::Idle;
                Ok(())
            }
        }
    }
}

impl World for Mm1World {
    fn on_advance(&mut self, elapsed: f64) {
        self.stats
            .advance(elapsed, self.line.len(), self.server.is_busy());
    }

    fn handle(&mut self, ev: Event, sim: &mut Simulator) -> Result<(), SimError> {
        match ev.kind {
            EventKind::Arrival => self.on_arrival(sim),
            EventKind::Departure => self.on_departure(sim),
        }
    }
}

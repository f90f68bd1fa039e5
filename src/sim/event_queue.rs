//! 事件队列（timing routine）
//!
//! 以 `(time, kind rank, seq)` 为键的最小堆。每种事件至多一个有效实例；
//! 被 `reschedule`/`cancel` 作废的堆条目在出队时惰性丢弃。

use super::event::{Event, EventKind};
use super::scheduled_event::ScheduledEvent;
use super::time::SimTime;
use crate::error::SimError;
use std::collections::BinaryHeap;
use tracing::trace;

#[derive(Debug, Default)]
pub struct EventQueue {
    next_seq: u64,
    heap: BinaryHeap<ScheduledEvent>,
    live: [Option<ScheduledEvent>; EventKind::ALL.len()],
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入新事件。若该类型已有未执行的实例，返回 `DoubleSchedule`。
    pub fn schedule(&mut self, kind: EventKind, at: SimTime) -> Result<(), SimError> {
        if let Some(pending) = self.live[kind.index()] {
            return Err(SimError::DoubleSchedule {
                kind,
                pending: pending.at,
                requested: at,
            });
        }
        self.insert(kind, at);
        Ok(())
    }

    /// 替换该类型的待执行事件，返回被替换的时间（若有）。
    pub fn reschedule(&mut self, kind: EventKind, at: SimTime) -> Option<SimTime> {
        let prev = self.live[kind.index()].map(|p| p.at);
        self.insert(kind, at);
        prev
    }

    /// 取消该类型的待执行事件
    pub fn cancel(&mut self, kind: EventKind) -> Option<SimTime> {
        self.live[kind.index()].take().map(|p| p.at)
    }

    /// 该类型待执行事件的时间；没有则为 `SimTime::NEVER`
    pub fn pending(&self, kind: EventKind) -> SimTime {
        self.live[kind.index()].map_or(SimTime::NEVER, |p| p.at)
    }

    pub fn peek_next(&mut self) -> Option<Event> {
        self.discard_stale();
        self.heap.peek().map(ScheduledEvent::event)
    }

    pub fn pop_next(&mut self) -> Option<Event> {
        self.discard_stale();
        let top = self.heap.pop()?;
        self.live[top.kind.index()] = None;
        Some(top.event())
    }

    /// 有效（未被作废）的待执行事件数
    pub fn len(&self) -> usize {
        self.live.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(&mut self, kind: EventKind, at: SimTime) {
        let entry = ScheduledEvent {
            at,
            kind,
            seq: self.next_seq,
        };
        self.next_seq = self.next_seq.wrapping_add(1);
        trace!(?kind, ?at, seq = entry.seq, "调度事件");
        self.live[kind.index()] = Some(entry);
        self.heap.push(entry);
    }

    fn is_live(&self, entry: &ScheduledEvent) -> bool {
        self.live[entry.kind.index()].is_some_and(|p| p.seq == entry.seq)
    }

    fn discard_stale(&mut self) {
        while let Some(top) = self.heap.peek() {
            if self.is_live(top) {
                break;
            }
            self.heap.pop();
        }
    }
}

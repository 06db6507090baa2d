//! 事件内核
//!
//! 维护当前仿真时间与事件队列。实体只通过 `now`/`schedule`/`schedule_now`
//! 与内核交互：所有"挂起"都表达为调度一个未来事件。

use super::entity::EntityId;
use super::event::SimEvent;
use super::scheduled_event::ScheduledEvent;
use super::time::SimTime;
use std::collections::BinaryHeap;
use tracing::trace;

/// 事件内核：当前时间 + 按 (at, seq) 排序的事件队列。
#[derive(Default)]
pub struct Kernel {
    now: SimTime,
    next_seq: u64,
    q: BinaryHeap<ScheduledEvent>,
}

impl Kernel {
    /// 获取当前仿真时间
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// 调度事件在 `delay` 之后投递到目标实体。
    pub fn schedule(&mut self, target: EntityId, delay: SimTime, ev: SimEvent) {
        let at = self.now + delay;
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        trace!(now = ?self.now, ?at, seq, to = ?target, tag = ?ev.tag(), "调度事件");
        self.q.push(ScheduledEvent {
            at,
            seq,
            target,
            ev,
        });
    }

    /// 在当前时间戳内投递（排在已入队的同时间戳事件之后）。
    pub fn schedule_now(&mut self, target: EntityId, ev: SimEvent) {
        self.schedule(target, SimTime::ZERO, ev);
    }

    pub(crate) fn peek_at(&self) -> Option<SimTime> {
        self.q.peek().map(|item| item.at)
    }

    /// 取出下一个事件并推进时钟。
    pub(crate) fn pop(&mut self) -> Option<ScheduledEvent> {
        let item = self.q.pop()?;
        self.now = item.at;
        Some(item)
    }

    pub(crate) fn advance_to(&mut self, at: SimTime) {
        self.now = self.now.max(at);
    }

    pub fn pending(&self) -> usize {
        self.q.len()
    }
}

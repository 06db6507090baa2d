//! 仿真引擎
//!
//! 实体注册表 + 主循环：从内核取事件，派发给目标实体，
//! 队列排空后向所有实体广播 EndOfSimulation。

use super::entity::{Entity, EntityId};
use super::error::SimError;
use super::event::SimEvent;
use super::kernel::Kernel;
use super::time::SimTime;
use tracing::{debug, info};

/// 仿真引擎：内核 + 实体。
#[derive(Default)]
pub struct Engine {
    pub kernel: Kernel,
    entities: Vec<Box<dyn Entity>>,
    started: bool,
}

impl Engine {
    /// 注册一个实体。构造闭包会收到分配好的实体 id。
    pub fn add_entity<E, F>(&mut self, build: F) -> EntityId
    where
        E: Entity + 'static,
        F: FnOnce(EntityId) -> E,
    {
        let id = EntityId(self.entities.len());
        self.entities.push(Box::new(build(id)));
        id
    }

    pub fn entity(&self, id: EntityId) -> &dyn Entity {
        self.entities[id.0].as_ref()
    }

    pub fn entity_mut(&mut self, id: EntityId) -> &mut dyn Entity {
        self.entities[id.0].as_mut()
    }

    // 启动钩子只跑一次，分段运行时不会重复握手。
    fn ensure_started(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        for entity in &mut self.entities {
            entity.start(&mut self.kernel);
        }
    }

    /// 运行直到事件队列为空或时钟到达 `until`。
    ///
    /// `until` 为 `SimTime::MAX` 时视为"跑到事件耗尽"，不推进时钟。
    pub fn run_until(&mut self, until: SimTime) -> Result<(), SimError> {
        self.ensure_started();

        let mut event_count = 0u64;
        while let Some(at) = self.kernel.peek_at() {
            if at > until {
                break;
            }
            let item = self.kernel.pop().expect("peek then pop");
            event_count += 1;
            debug!(
                event_num = event_count,
                now = ?self.kernel.now(),
                target = ?item.target,
                tag = ?item.ev.tag(),
                remaining_queue = self.kernel.pending(),
                "执行事件"
            );
            let slot = self
                .entities
                .get_mut(item.target.0)
                .ok_or(SimError::UnknownEntity(item.target))?;
            slot.process_event(item.ev, &mut self.kernel)?;
        }
        if until != SimTime::MAX {
            self.kernel.advance_to(until);
        }

        info!(total_events = event_count, final_time = ?self.kernel.now(), "✅ 仿真完成");
        Ok(())
    }

    /// 运行所有事件直到队列为空，然后广播 EndOfSimulation。
    pub fn run(&mut self) -> Result<(), SimError> {
        info!("▶️  开始运行仿真");
        self.run_until(SimTime::MAX)?;
        self.finish()
    }

    /// 向所有实体广播 EndOfSimulation（总结、收尾日志）。
    pub fn finish(&mut self) -> Result<(), SimError> {
        for entity in &mut self.entities {
            entity.process_event(SimEvent::EndOfSimulation, &mut self.kernel)?;
        }
        Ok(())
    }
}

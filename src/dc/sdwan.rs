//! SD-WAN 实体
//!
//! 连接边缘与云子拓扑的软件定义广域网，自身也是一个 SDN 域：
//! 在数据中心网关之间传输边缘到云的流。

use super::controller::SdnController;
use crate::sim::{Entity, EntityId, Kernel, SimError, SimEvent};
use tracing::trace;

/// SD-WAN 域。
pub struct SdWan {
    id: EntityId,
    name: String,
    broker: EntityId,
    controller: SdnController,
}

impl SdWan {
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        broker: EntityId,
        controller: SdnController,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            broker,
            controller,
        }
    }

    pub fn controller(&self) -> &SdnController {
        &self.controller
    }
}

impl Entity for SdWan {
    fn id(&self) -> EntityId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }

    fn process_event(&mut self, ev: SimEvent, kernel: &mut Kernel) -> Result<(), SimError> {
        match ev {
            SimEvent::SdwanTransmit { flow } => {
                let tx = self.controller.transmit(&flow)?;
                kernel.schedule(self.id, tx.delay, SimEvent::ReleaseChannels { links: tx.links });
                kernel.schedule(
                    self.broker,
                    tx.delay,
                    SimEvent::SdwanTransmissionAck { flow },
                );
                Ok(())
            }
            SimEvent::ReleaseChannels { links } => {
                self.controller.release(&links);
                Ok(())
            }
            other => {
                trace!(sdwan = %self.name, tag = ?other.tag(), "忽略与 SD-WAN 无关的事件");
                Ok(())
            }
        }
    }
}

//! IoT 设备实体
//!
//! 收到感知指令后构造一条流并请求 broker 解析 MEL 目的地。
//! 每次感知消耗电量；耗尽即死亡，仅通知 broker 一次。

use crate::broker::{Flow, FlowId, IdGen, WorkflowId};
use crate::net::NetId;
use crate::sim::{Entity, EntityId, Kernel, SimError, SimEvent};
use tracing::{trace, warn};

/// 设备电池：线性损耗模型。
#[derive(Debug, Clone)]
pub struct Battery {
    pub level: f64,
    pub sensing_drain: f64,
}

impl Battery {
    pub fn new(capacity: f64, sensing_drain: f64) -> Self {
        Self {
            level: capacity,
            sensing_drain,
        }
    }

    /// 扣一次感知的电量；电量不足返回 false。
    pub fn drain(&mut self) -> bool {
        if self.level < self.sensing_drain {
            return false;
        }
        self.level -= self.sensing_drain;
        true
    }
}

/// IoT 设备。
pub struct IoTDevice {
    id: EntityId,
    net_id: NetId,
    name: String,
    broker: EntityId,
    battery: Battery,
    alive: bool,
    flow_ids: IdGen,
    workflow_ids: IdGen,
    sensed: u64,
}

impl IoTDevice {
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        net_id: NetId,
        broker: EntityId,
        battery: Battery,
        flow_ids: IdGen,
        workflow_ids: IdGen,
    ) -> Self {
        Self {
            id,
            net_id,
            name: name.into(),
            broker,
            battery,
            alive: true,
            flow_ids,
            workflow_ids,
            sensed: 0,
        }
    }

    pub fn net_id(&self) -> NetId {
        self.net_id
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn sensed(&self) -> u64 {
        self.sensed
    }
}

impl Entity for IoTDevice {
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
            SimEvent::Sensing(order) => {
                if !self.alive {
                    return Ok(());
                }
                if !self.battery.drain() {
                    self.alive = false;
                    warn!(device = %self.name, "🔋 电量耗尽，设备死亡");
                    kernel.schedule_now(self.broker, SimEvent::DeviceDied { device: self.id });
                    return Ok(());
                }
                self.sensed += 1;
                let mut flow = Flow::new(
                    FlowId(self.flow_ids.next()),
                    order.app_id,
                    order.app_name,
                    self.name.clone(),
                    order.mel_name,
                    self.net_id,
                    WorkflowId(self.workflow_ids.next()),
                    kernel.now(),
                );
                flow.add_packet_size(order.output_size);
                trace!(device = %self.name, flow = ?flow.id, bytes = flow.packet_size, "感知数据出发");
                kernel.schedule_now(self.broker, SimEvent::MelResolution { flow });
                Ok(())
            }
            other => {
                trace!(device = %self.name, tag = ?other.tag(), "忽略与设备无关的事件");
                Ok(())
            }
        }
    }
}

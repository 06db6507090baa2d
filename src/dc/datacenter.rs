//! 数据中心实体
//!
//! 应答启动握手，承接流传输与计算单元执行；边缘到云的建路请求
//! 转交挂接的 SD-WAN。

use super::controller::SdnController;
use crate::sim::{Entity, EntityId, Kernel, SimError, SimEvent, SimTime};
use tracing::{debug, trace};

/// 数据中心运行统计。
#[derive(Debug, Default, Clone)]
pub struct DcStats {
    pub flows_transmitted: u64,
    pub bytes_transmitted: u64,
    pub units_executed: u64,
}

/// 数据中心（边缘或云）。
pub struct Datacenter {
    id: EntityId,
    name: String,
    /// 每 VM 执行速率（MI/s）
    mips: u64,
    broker: EntityId,
    sdwan: Option<EntityId>,
    controller: SdnController,
    stats: DcStats,
}

// ceil(length / mips) 秒 -> 纳秒
fn exec_time(length_mi: u64, mips: u64) -> SimTime {
    if mips == 0 {
        return SimTime(u64::MAX / 4);
    }
    let nanos = ((length_mi as u128).saturating_mul(1_000_000_000u128) + (mips as u128 - 1))
        / mips as u128;
    SimTime(nanos.min(u64::MAX as u128) as u64)
}

impl Datacenter {
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        mips: u64,
        broker: EntityId,
        controller: SdnController,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            mips,
            broker,
            sdwan: None,
            controller,
            stats: DcStats::default(),
        }
    }

    pub fn set_sdwan(&mut self, sdwan: EntityId) {
        self.sdwan = Some(sdwan);
    }

    pub fn controller(&self) -> &SdnController {
        &self.controller
    }

    /// 运行中下发新路径时使用。
    pub fn controller_mut(&mut self) -> &mut SdnController {
        &mut self.controller
    }

    pub fn stats(&self) -> &DcStats {
        &self.stats
    }
}

impl Entity for Datacenter {
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
            SimEvent::ResourceCharacteristicsRequest { requester } => {
                kernel.schedule_now(
                    requester,
                    SimEvent::ResourceCharacteristicsResponse {
                        datacenter: self.id,
                    },
                );
                Ok(())
            }
            SimEvent::VmCreate { vm, name } => {
                // VM 在拓扑装配时已就位，这里按协议应答确认。
                debug!(dc = %self.name, %name, ?vm, "VM 创建");
                kernel.schedule_now(
                    self.broker,
                    SimEvent::VmCreateAck {
                        datacenter: self.id,
                        vm,
                    },
                );
                Ok(())
            }
            SimEvent::TransmitIotData { flow } => {
                let tx = self.controller.transmit(&flow)?;
                self.stats.flows_transmitted += 1;
                self.stats.bytes_transmitted += flow.packet_size;
                kernel.schedule(self.id, tx.delay, SimEvent::ReleaseChannels { links: tx.links });
                kernel.schedule(self.broker, tx.delay, SimEvent::TransmissionAck { flow });
                Ok(())
            }
            SimEvent::ComputeSubmit { unit } => {
                let t = exec_time(unit.length, self.mips);
                debug!(dc = %self.name, unit = ?unit.id, length = unit.length, ?t, "⚙️  执行计算单元");
                self.stats.units_executed += 1;
                kernel.schedule(self.broker, t, SimEvent::ComputeReturn { unit });
                Ok(())
            }
            SimEvent::BuildRoute { flow } => {
                let sdwan = self.sdwan.ok_or_else(|| SimError::NoSdwan(self.name.clone()))?;
                kernel.schedule_now(sdwan, SimEvent::SdwanTransmit { flow });
                Ok(())
            }
            SimEvent::ReleaseChannels { links } => {
                self.controller.release(&links);
                Ok(())
            }
            SimEvent::EndOfSimulation => {
                debug!(
                    dc = %self.name,
                    flows = self.stats.flows_transmitted,
                    bytes = self.stats.bytes_transmitted,
                    units = self.stats.units_executed,
                    "数据中心运行总结"
                );
                Ok(())
            }
            other => {
                trace!(dc = %self.name, tag = ?other.tag(), "忽略与数据中心无关的事件");
                Ok(())
            }
        }
    }
}

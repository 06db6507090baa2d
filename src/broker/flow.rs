//! 流类型
//!
//! 一个流水线阶段在途的一段数据（device->mel 或 mel->vm）。
//! 短生命周期：被下一个处理方消费，不保留。

use super::app::AppId;
use super::workflow::WorkflowId;
use crate::net::NetId;
use crate::sim::{EntityId, SimTime};

/// 流标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlowId(pub u64);

/// 在途数据流。
///
/// `dest` 从 None 恰好解析一次到具体端点，之后才允许进入传输。
#[derive(Debug, Clone)]
pub struct Flow {
    pub id: FlowId,
    pub app_id: AppId,
    pub app_name: String,
    pub origin_name: String,
    /// 目的名：抽象 MEL 名在解析后被具体实例名覆写。
    pub dest_name: String,
    pub source: NetId,
    pub dest: Option<NetId>,
    pub datacenter: Option<EntityId>,
    pub datacenter_name: Option<String>,
    /// 可累加的载荷大小（bytes）
    pub packet_size: u64,
    pub submit_time: SimTime,
    pub workflow: WorkflowId,
}

impl Flow {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: FlowId,
        app_id: AppId,
        app_name: impl Into<String>,
        origin_name: impl Into<String>,
        dest_name: impl Into<String>,
        source: NetId,
        workflow: WorkflowId,
        submit_time: SimTime,
    ) -> Self {
        Self {
            id,
            app_id,
            app_name: app_name.into(),
            origin_name: origin_name.into(),
            dest_name: dest_name.into(),
            source,
            dest: None,
            datacenter: None,
            datacenter_name: None,
            packet_size: 0,
            submit_time,
            workflow,
        }
    }

    pub fn add_packet_size(&mut self, bytes: u64) {
        self.packet_size = self.packet_size.saturating_add(bytes);
    }
}

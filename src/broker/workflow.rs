//! 工作流日志
//!
//! 以流水线实例 id 为键的 append-only 事件日志，取代在流、edgelet、
//! cloudlet 之间共享可变标签对象。broker 独占写入，整个运行期间不释放
//! （作为审计轨迹）。

use std::collections::HashMap;

use super::compute::ComputeId;
use super::flow::FlowId;
use crate::sim::SimTime;

/// 流水线实例标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkflowId(pub u64);

/// 流水线实例经历的一件事。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowEvent {
    /// 感知数据提交进入流水线
    Submitted { at: SimTime },
    /// 解析出的源数据中心
    SourceDc { name: String },
    /// 边缘计算单元入队
    EdgeletQueued { unit: ComputeId },
    /// 边缘到云的流启动
    EdgeToCloudFlow { flow: FlowId },
    /// 云计算单元入队
    CloudletQueued { unit: ComputeId },
    /// 最后一段处理返回，流水线结束
    Finished { at: SimTime },
}

/// 全部流水线实例的事件日志。
#[derive(Debug, Default)]
pub struct WorkflowLog {
    entries: HashMap<WorkflowId, Vec<WorkflowEvent>>,
}

impl WorkflowLog {
    pub fn append(&mut self, id: WorkflowId, ev: WorkflowEvent) {
        self.entries.entry(id).or_default().push(ev);
    }

    pub fn events(&self, id: WorkflowId) -> &[WorkflowEvent] {
        self.entries.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn submit_time(&self, id: WorkflowId) -> Option<SimTime> {
        self.events(id).iter().find_map(|ev| match ev {
            WorkflowEvent::Submitted { at } => Some(*at),
            _ => None,
        })
    }

    pub fn finish_time(&self, id: WorkflowId) -> Option<SimTime> {
        self.events(id).iter().find_map(|ev| match ev {
            WorkflowEvent::Finished { at } => Some(*at),
            _ => None,
        })
    }

    pub fn ids(&self) -> impl Iterator<Item = WorkflowId> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 已走完整条流水线的实例数。
    pub fn completed_count(&self) -> usize {
        self.entries
            .values()
            .filter(|evs| {
                evs.iter()
                    .any(|ev| matches!(ev, WorkflowEvent::Finished { .. }))
            })
            .count()
    }
}

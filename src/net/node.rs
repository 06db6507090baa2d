//! 节点类型
//!
//! 定义拓扑节点。主机类节点在带宽公式中强制 channel 数为 1
//! （点对点主机链路不参与信道共享）。

use super::id::NodeId;

/// 节点类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Host,
    Switch,
}

impl NodeKind {
    pub fn is_host(&self) -> bool {
        matches!(self, NodeKind::Host)
    }
}

/// 拓扑节点
#[derive(Debug)]
pub struct TopoNode {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
}

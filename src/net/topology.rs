//! 拓扑管理
//!
//! 单个 SDN 域的节点/链路存储：命名节点、同一节点对之间的并行链路、
//! 网络端点挂接点、信道登记。只由所属控制器写入。

use std::collections::HashMap;

use super::id::{LinkId, NetId, NodeId};
use super::link::Link;
use super::node::{NodeKind, TopoNode};
use crate::sim::SimTime;

// 无向键：按 id 归一化节点对。
fn pair(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a.0 <= b.0 { (a, b) } else { (b, a) }
}

/// 一个 SDN 域的拓扑
#[derive(Default)]
pub struct Topology {
    nodes: Vec<TopoNode>,
    links: Vec<Link>,
    by_name: HashMap<String, NodeId>,
    adjacent: HashMap<(NodeId, NodeId), Vec<LinkId>>,
    attachments: HashMap<NetId, NodeId>,
}

impl Topology {
    /// 添加主机节点
    pub fn add_host(&mut self, name: impl Into<String>) -> NodeId {
        self.add_node(name.into(), NodeKind::Host)
    }

    /// 添加交换机节点
    pub fn add_switch(&mut self, name: impl Into<String>) -> NodeId {
        self.add_node(name.into(), NodeKind::Switch)
    }

    fn add_node(&mut self, name: String, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.by_name.insert(name.clone(), id);
        self.nodes.push(TopoNode { id, name, kind });
        id
    }

    /// 连接两个节点（无向链路；同一节点对可重复调用形成并行链路）
    pub fn connect(
        &mut self,
        a: NodeId,
        b: NodeId,
        bandwidth_bps: u64,
        latency: SimTime,
    ) -> LinkId {
        let id = LinkId(self.links.len());
        self.links.push(Link::new(id, a, b, bandwidth_bps, latency));
        self.adjacent.entry(pair(a, b)).or_default().push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> &TopoNode {
        &self.nodes[id.0]
    }

    pub fn link(&self, id: LinkId) -> &Link {
        &self.links[id.0]
    }

    pub fn node_by_name(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    /// 两节点之间的所有并行链路（无序；声明顺序稳定）。
    pub fn links_between(&self, a: NodeId, b: NodeId) -> &[LinkId] {
        self.adjacent
            .get(&pair(a, b))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 把一个网络端点（设备/VM）挂接到拓扑节点。
    pub fn attach(&mut self, endpoint: NetId, node: NodeId) {
        self.attachments.insert(endpoint, node);
    }

    pub fn attachment(&self, endpoint: NetId) -> Option<NodeId> {
        self.attachments.get(&endpoint).copied()
    }

    /// 在链路上登记一个传输信道。
    pub fn register_channel(&mut self, link: LinkId) {
        self.links[link.0].channels += 1;
    }

    /// 释放链路上的一个传输信道。
    pub fn release_channel(&mut self, link: LinkId) {
        let l = &mut self.links[link.0];
        l.channels = l.channels.saturating_sub(1);
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}

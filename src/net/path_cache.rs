//! 路径缓存
//!
//! 纯数据结构：按名字和按 id 两套键存放已解析的路径与逐跳链路。
//! 由 SdnRoutingPolicy 独占持有；清空后必须用新的命名路径重新填充。

use std::collections::HashMap;

use super::id::{LinkId, NetId, NodeId};

/// 四张表：id 键/名字键 × 节点路径/链路序列。
#[derive(Debug, Default)]
pub struct PathCache {
    routes_by_id: HashMap<(NetId, NetId), Vec<NodeId>>,
    links_by_id: HashMap<(NetId, NetId), Vec<LinkId>>,
    routes_by_name: HashMap<(String, String), Vec<NodeId>>,
    links_by_name: HashMap<(String, String), Vec<LinkId>>,
}

impl PathCache {
    /// 清空全部四张表。
    pub fn clear(&mut self) {
        self.routes_by_id.clear();
        self.links_by_id.clear();
        self.routes_by_name.clear();
        self.links_by_name.clear();
    }

    pub fn insert_named(
        &mut self,
        src: impl Into<String>,
        dst: impl Into<String>,
        nodes: Vec<NodeId>,
        links: Vec<LinkId>,
    ) {
        let key = (src.into(), dst.into());
        self.links_by_name.insert(key.clone(), links);
        self.routes_by_name.insert(key, nodes);
    }

    pub fn named_route(&self, src: &str, dst: &str) -> Option<(&[NodeId], &[LinkId])> {
        let key = (src.to_string(), dst.to_string());
        let nodes = self.routes_by_name.get(&key)?;
        let links = self.links_by_name.get(&key)?;
        Some((nodes.as_slice(), links.as_slice()))
    }

    pub fn insert_resolved(
        &mut self,
        src: NetId,
        dst: NetId,
        nodes: Vec<NodeId>,
        links: Vec<LinkId>,
    ) {
        self.links_by_id.insert((src, dst), links);
        self.routes_by_id.insert((src, dst), nodes);
    }

    pub fn route(&self, src: NetId, dst: NetId) -> Option<&[NodeId]> {
        self.routes_by_id.get(&(src, dst)).map(Vec::as_slice)
    }

    pub fn links(&self, src: NetId, dst: NetId) -> Option<&[LinkId]> {
        self.links_by_id.get(&(src, dst)).map(Vec::as_slice)
    }

    pub fn named_len(&self) -> usize {
        self.routes_by_name.len()
    }

    pub fn resolved_len(&self) -> usize {
        self.routes_by_id.len()
    }
}

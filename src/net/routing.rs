//! SDN 路由策略
//!
//! 不自行计算最短路：只把预先下发的候选命名路径物化到 id 键缓存，
//! 并在并行链路之间按有效带宽做逐跳选择。
//!
//! 注意存放方向：`set_new_paths` 收到的路径按 source→dest 书写，
//! 缓存时节点序列与链路序列都反转，键也取反转后的端点对——
//! 下发 `[A, B, C]` 得到名字键 `(C, A)`、节点序列 `[C, B, A]`。
//! 调用方以"与流量方向相反"的写法声明候选路径。

use thiserror::Error;
use tracing::debug;

use super::id::{LinkId, NetId, NodeId};
use super::path_cache::PathCache;
use super::topology::Topology;

/// 拓扑配置错误：不可重试，立即中止。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoutingError {
    #[error("path unexpectedly missing between {src} and {dst}")]
    MissingPath { src: String, dst: String },

    #[error("expected link between {from} and {to}")]
    MissingLink { from: String, to: String },

    #[error("unknown topology node: {0}")]
    UnknownNode(String),
}

/// SDN 路由策略：独占一个 PathCache。
#[derive(Debug, Default)]
pub struct SdnRoutingPolicy {
    cache: PathCache,
}

impl SdnRoutingPolicy {
    pub fn cache(&self) -> &PathCache {
        &self.cache
    }

    /// 下发新的候选路径集合。
    ///
    /// 清空全部缓存，然后逐路径：对每对相邻节点在并行链路中选择
    /// 有效带宽最高者。有效带宽 = 总带宽 / channel 数；任一端为主机类
    /// 节点或链路尚无登记信道时 channel 数取 1，否则取现有数 + 1
    /// （为本路径预留一个新信道）。相邻节点间缺链路视为拓扑配置错误。
    pub fn set_new_paths(
        &mut self,
        topo: &Topology,
        paths: &[Vec<String>],
    ) -> Result<(), RoutingError> {
        self.cache.clear();
        for path in paths {
            if path.len() < 2 {
                continue;
            }
            let mut nodes = Vec::with_capacity(path.len());
            for name in path {
                let id = topo
                    .node_by_name(name)
                    .ok_or_else(|| RoutingError::UnknownNode(name.clone()))?;
                nodes.push(id);
            }

            let mut chosen = Vec::with_capacity(nodes.len() - 1);
            for hop in nodes.windows(2) {
                let (a, b) = (hop[0], hop[1]);
                chosen.push(self.pick_link(topo, a, b)?);
            }

            nodes.reverse();
            chosen.reverse();
            let src = path.last().expect("len checked").clone();
            let dst = path.first().expect("len checked").clone();
            debug!(%src, %dst, hops = chosen.len(), "缓存命名路径");
            self.cache.insert_named(src, dst, nodes, chosen);
        }
        Ok(())
    }

    // 并行链路之间的逐跳选择；严格大于，先到者胜，顺序即声明顺序。
    fn pick_link(
        &self,
        topo: &Topology,
        a: NodeId,
        b: NodeId,
    ) -> Result<LinkId, RoutingError> {
        let candidates = topo.links_between(a, b);
        if candidates.is_empty() {
            return Err(RoutingError::MissingLink {
                from: topo.node(a).name.clone(),
                to: topo.node(b).name.clone(),
            });
        }
        let endpoint_is_host = topo.node(a).kind.is_host() || topo.node(b).kind.is_host();
        let mut best: Option<(LinkId, u64)> = None;
        for &lid in candidates {
            let link = topo.link(lid);
            let channels = if link.channels == 0 || endpoint_is_host {
                1
            } else {
                link.channels + 1
            };
            let effective = link.bandwidth_bps / channels as u64;
            if best.is_none_or(|(_, bw)| effective > bw) {
                best = Some((lid, effective));
            }
        }
        Ok(best.expect("candidates non-empty").0)
    }

    /// 为一条流物化路径。
    ///
    /// id 键命中直接返回缓存；未命中时把 (src, dst) 的命名路径翻译成
    /// id 键条目后返回。命名路径缺失是致命错误——本策略从不自行计算路径。
    pub fn build_route(
        &mut self,
        topo: &Topology,
        src: NodeId,
        dst: NodeId,
        flow_origin: NetId,
        flow_dest: NetId,
    ) -> Result<Vec<NodeId>, RoutingError> {
        if let Some(route) = self.cache.route(flow_origin, flow_dest) {
            return Ok(route.to_vec());
        }
        let src_name = &topo.node(src).name;
        let dst_name = &topo.node(dst).name;
        let (nodes, links) =
            self.cache
                .named_route(src_name, dst_name)
                .ok_or_else(|| RoutingError::MissingPath {
                    src: src_name.clone(),
                    dst: dst_name.clone(),
                })?;
        let nodes = nodes.to_vec();
        let links = links.to_vec();
        self.cache
            .insert_resolved(flow_origin, flow_dest, nodes.clone(), links);
        Ok(nodes)
    }

    /// 纯缓存读：仅在对应 id 对至少经历过一次 `build_route` 后有值。
    pub fn get_route(&self, src: NetId, dst: NetId) -> Option<&[NodeId]> {
        self.cache.route(src, dst)
    }

    /// 纯缓存读：同上，返回逐跳选定的链路。
    pub fn get_links(&self, src: NetId, dst: NetId) -> Option<&[LinkId]> {
        self.cache.links(src, dst)
    }
}

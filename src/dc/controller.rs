//! SDN 控制器
//!
//! 一个 SDN 域（边缘数据中心、云数据中心或 SD-WAN）恰好一个控制器：
//! 持有该域的拓扑与路由策略，负责为流建路、登记信道并计算传输时延。

use crate::broker::Flow;
use crate::net::{LinkId, RoutingError, SdnRoutingPolicy, Topology};
use crate::sim::{SimError, SimTime};
use tracing::debug;

/// 一次传输的结果：投递时延 + 占用的链路（用于事后释放信道）。
#[derive(Debug)]
pub struct Transmission {
    pub delay: SimTime,
    pub links: Vec<LinkId>,
}

/// 域控制器。
pub struct SdnController {
    name: String,
    topology: Topology,
    policy: SdnRoutingPolicy,
}

impl SdnController {
    pub fn new(name: impl Into<String>, topology: Topology) -> Self {
        Self {
            name: name.into(),
            topology,
            policy: SdnRoutingPolicy::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn topology_mut(&mut self) -> &mut Topology {
        &mut self.topology
    }

    pub fn policy(&self) -> &SdnRoutingPolicy {
        &self.policy
    }

    /// 下发候选路径集合（清空并重建路径缓存）。
    pub fn set_new_paths(&mut self, paths: &[Vec<String>]) -> Result<(), RoutingError> {
        let Self {
            topology, policy, ..
        } = self;
        policy.set_new_paths(topology, paths)
    }

    /// 为流建路并登记信道。
    ///
    /// 时延 = 逐跳传播时延之和 + 最慢链路上的序列化时间
    /// （按登记后的有效带宽计算）。
    pub fn transmit(&mut self, flow: &Flow) -> Result<Transmission, SimError> {
        let dest = flow
            .dest
            .ok_or(SimError::UnresolvedFlowDestination(flow.id))?;
        let src_node = self
            .topology
            .attachment(flow.source)
            .ok_or_else(|| RoutingError::UnknownNode(flow.origin_name.clone()))?;
        let dst_node = self
            .topology
            .attachment(dest)
            .ok_or_else(|| RoutingError::UnknownNode(flow.dest_name.clone()))?;

        let Self {
            topology,
            policy,
            name,
        } = self;
        policy.build_route(topology, src_node, dst_node, flow.source, dest)?;
        let links = policy
            .get_links(flow.source, dest)
            .expect("links cached by build_route")
            .to_vec();

        for &lid in &links {
            topology.register_channel(lid);
        }
        let mut propagation = SimTime::ZERO;
        let mut serialization = SimTime::ZERO;
        for &lid in &links {
            let link = topology.link(lid);
            propagation = propagation + link.latency;
            serialization = serialization.max(link.tx_time(flow.packet_size));
        }
        let delay = propagation + serialization;
        debug!(
            controller = %name,
            flow = ?flow.id,
            hops = links.len(),
            ?delay,
            "🛰️  流进入传输"
        );
        Ok(Transmission { delay, links })
    }

    /// 释放一次传输占用的信道。
    pub fn release(&mut self, links: &[LinkId]) {
        for &lid in links {
            self.topology.release_channel(lid);
        }
    }
}

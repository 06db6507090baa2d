//! 边缘/云/SD-WAN 拓扑构建
//!
//! 三个 SDN 域各自独立成拓扑。候选路径按"与流量方向相反"的写法
//! 声明（见路由策略的反转存放约定），每个方向都给出一条。

use crate::net::{NodeId, Topology};
use crate::sim::SimTime;

fn gbps_to_bps(g: u64) -> u64 {
    g.saturating_mul(1_000_000_000)
}

/// 边缘数据中心拓扑配置
#[derive(Debug, Clone)]
pub struct EdgeOpts {
    pub mels: u32,
    pub link_gbps: u64,
    pub link_latency: SimTime,
}

impl Default for EdgeOpts {
    fn default() -> Self {
        Self {
            mels: 2,
            link_gbps: 1,
            link_latency: SimTime::from_micros(50),
        }
    }
}

/// 边缘域构建结果
pub struct EdgeBuild {
    pub topology: Topology,
    pub paths: Vec<Vec<String>>,
    pub gateway: NodeId,
    /// IoT 设备的接入交换机
    pub iot_access: NodeId,
    /// 每个 MEL 实例一台主机，下标即实例序号 - 1
    pub mel_hosts: Vec<NodeId>,
}

/// 构建边缘数据中心拓扑
///
/// 结构：iot_gw -- edge_sw -- edge_host_i，edge_sw -- edge_gw
pub fn build_edge_dc(opts: &EdgeOpts) -> EdgeBuild {
    let mut t = Topology::default();
    let gateway = t.add_switch("edge_gw");
    let sw = t.add_switch("edge_sw");
    let iot_access = t.add_switch("iot_gw");

    let bps = gbps_to_bps(opts.link_gbps);
    t.connect(iot_access, sw, bps, opts.link_latency);
    t.connect(sw, gateway, bps, opts.link_latency);

    let mut mel_hosts = Vec::with_capacity(opts.mels as usize);
    let mut paths = Vec::new();
    for i in 1..=opts.mels {
        let host_name = format!("edge_host_{i}");
        let host = t.add_host(host_name.clone());
        t.connect(sw, host, bps, opts.link_latency);
        mel_hosts.push(host);
        // 设备 -> MEL 方向（反向书写）
        paths.push(vec![
            host_name.clone(),
            "edge_sw".to_string(),
            "iot_gw".to_string(),
        ]);
        // MEL -> 设备方向
        paths.push(vec![
            "iot_gw".to_string(),
            "edge_sw".to_string(),
            host_name,
        ]);
    }

    EdgeBuild {
        topology: t,
        paths,
        gateway,
        iot_access,
        mel_hosts,
    }
}

/// 云数据中心拓扑配置
#[derive(Debug, Clone)]
pub struct CloudOpts {
    pub vms: u32,
    pub link_gbps: u64,
    pub link_latency: SimTime,
}

impl Default for CloudOpts {
    fn default() -> Self {
        Self {
            vms: 1,
            link_gbps: 10,
            link_latency: SimTime::from_micros(20),
        }
    }
}

/// 云域构建结果
pub struct CloudBuild {
    pub topology: Topology,
    pub paths: Vec<Vec<String>>,
    pub gateway: NodeId,
    pub vm_hosts: Vec<NodeId>,
}

/// 构建云数据中心拓扑
///
/// 结构：cloud_gw -- cloud_sw -- cloud_host_i
pub fn build_cloud_dc(opts: &CloudOpts) -> CloudBuild {
    let mut t = Topology::default();
    let gateway = t.add_switch("cloud_gw");
    let sw = t.add_switch("cloud_sw");

    let bps = gbps_to_bps(opts.link_gbps);
    t.connect(gateway, sw, bps, opts.link_latency);

    let mut vm_hosts = Vec::with_capacity(opts.vms as usize);
    let mut paths = Vec::new();
    for i in 1..=opts.vms {
        let host_name = format!("cloud_host_{i}");
        let host = t.add_host(host_name.clone());
        t.connect(sw, host, bps, opts.link_latency);
        vm_hosts.push(host);
        paths.push(vec![
            host_name.clone(),
            "cloud_sw".to_string(),
            "cloud_gw".to_string(),
        ]);
        paths.push(vec![
            "cloud_gw".to_string(),
            "cloud_sw".to_string(),
            host_name,
        ]);
    }

    CloudBuild {
        topology: t,
        paths,
        gateway,
        vm_hosts,
    }
}

/// SD-WAN 拓扑配置：网关之间的并行链路逐条给出带宽。
#[derive(Debug, Clone)]
pub struct WanOpts {
    pub parallel_link_gbps: Vec<u64>,
    pub link_latency: SimTime,
}

impl Default for WanOpts {
    fn default() -> Self {
        Self {
            parallel_link_gbps: vec![10],
            link_latency: SimTime::from_millis(2),
        }
    }
}

/// SD-WAN 域构建结果
pub struct WanBuild {
    pub topology: Topology,
    pub paths: Vec<Vec<String>>,
    pub edge_gateway: NodeId,
    pub cloud_gateway: NodeId,
}

/// 构建 SD-WAN 拓扑
///
/// 结构：wan_edge_gw == wan_cloud_gw（并行链路）
pub fn build_sdwan(opts: &WanOpts) -> WanBuild {
    let mut t = Topology::default();
    let edge_gateway = t.add_switch("wan_edge_gw");
    let cloud_gateway = t.add_switch("wan_cloud_gw");

    for &gbps in &opts.parallel_link_gbps {
        t.connect(edge_gateway, cloud_gateway, gbps_to_bps(gbps), opts.link_latency);
    }

    let paths = vec![
        // 边缘 -> 云方向（反向书写）
        vec!["wan_cloud_gw".to_string(), "wan_edge_gw".to_string()],
        // 云 -> 边缘方向
        vec!["wan_edge_gw".to_string(), "wan_cloud_gw".to_string()],
    ];

    WanBuild {
        topology: t,
        paths,
        edge_gateway,
        cloud_gateway,
    }
}

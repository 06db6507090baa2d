//! 场景配置
//!
//! 描述一次仿真的拓扑规模与应用目录，JSON 反序列化后交给
//! `demo::build_scenario` 组装实体。字段缺省值在组装时填充。

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub schema_version: u32,
    #[serde(default)]
    pub meta: Option<ScenarioMeta>,
    pub edge: EdgeDcSpec,
    pub cloud: CloudDcSpec,
    #[serde(default)]
    pub sdwan: SdwanSpec,
    pub devices: Vec<DeviceSpec>,
    pub apps: Vec<AppSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioMeta {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// 边缘数据中心：每个 MEL 实例占一台主机。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeDcSpec {
    #[serde(default)]
    pub name: Option<String>,
    pub mels: u32,
    /// 每 VM 执行速率（MI/s）
    #[serde(default)]
    pub mips: Option<u64>,
    #[serde(default)]
    pub link_gbps: Option<u64>,
    #[serde(default)]
    pub link_latency_us: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudDcSpec {
    #[serde(default)]
    pub name: Option<String>,
    pub vms: u32,
    #[serde(default)]
    pub mips: Option<u64>,
    #[serde(default)]
    pub link_gbps: Option<u64>,
    #[serde(default)]
    pub link_latency_us: Option<u64>,
}

/// SD-WAN：数据中心网关之间的并行链路（Gbps 逐条给出）。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SdwanSpec {
    #[serde(default)]
    pub parallel_link_gbps: Option<Vec<u64>>,
    #[serde(default)]
    pub link_latency_us: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceSpec {
    pub name: String,
    /// 电池初始电量；耗尽后设备死亡，感知停止。
    #[serde(default)]
    pub battery_capacity: Option<f64>,
    /// 每次感知消耗的电量
    #[serde(default)]
    pub sensing_drain: Option<f64>,
}

/// 一条应用流水线：device -> mel -> vm。
///
/// `mel` 以 `.*` 结尾表示抽象名，由 MEL 路由策略在流时刻解析。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSpec {
    pub name: String,
    pub device: String,
    pub mel: String,
    pub vm: String,
    pub data_rate_ms: u64,
    pub start_ms: u64,
    pub stop_ms: u64,
    /// 设备每次感知产生的数据量（bytes）
    #[serde(default)]
    pub device_output_bytes: Option<u64>,
    /// 边缘计算单元长度（MI）
    pub edgelet_mi: u64,
    /// 云计算单元长度（MI）
    pub cloudlet_mi: u64,
    /// MEL 处理后转发到云的数据量（bytes）
    #[serde(default)]
    pub mel_output_bytes: Option<u64>,
}

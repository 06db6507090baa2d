//! 应用描述
//!
//! 一条逻辑应用流水线：device -> mel -> vm。静态字段来自场景目录，
//! 派生字段在全部 VM 创建确认到齐后一次性解析。

use crate::net::NetId;
use crate::sim::{EntityId, SimTime};

/// 应用标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AppId(pub u64);

/// 应用描述符
#[derive(Debug, Clone)]
pub struct AppDescriptor {
    pub id: AppId,
    pub name: String,
    pub iot_device_name: String,
    /// 逻辑 MEL 名；以 `.*` 结尾表示抽象名，流时刻才解析到实例。
    pub mel_name: String,
    pub vm_name: String,
    pub data_rate: SimTime,
    pub start_generation: SimTime,
    pub stop_generation: SimTime,
    /// 设备每次感知产生的数据量（bytes）
    pub device_output_size: u64,
    /// 边缘计算单元长度（MI）
    pub edgelet_size: u64,
    /// 云计算单元长度（MI）
    pub cloudlet_size: u64,
    /// MEL 转发到云的数据量（bytes）
    pub mel_output_size: u64,

    // 以下字段在启动解析时恰好填充一次
    pub iot_device: Option<EntityId>,
    pub mel: Option<NetId>,
    pub cloud_vm: Option<NetId>,
    pub edge_dc: Option<EntityId>,
    pub edge_dc_name: Option<String>,
    pub cloud_dc: Option<EntityId>,
    pub cloud_dc_name: Option<String>,
    pub start_time: Option<SimTime>,
    pub device_died: bool,
}

impl AppDescriptor {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: AppId,
        name: impl Into<String>,
        iot_device_name: impl Into<String>,
        mel_name: impl Into<String>,
        vm_name: impl Into<String>,
        data_rate: SimTime,
        start_generation: SimTime,
        stop_generation: SimTime,
        device_output_size: u64,
        edgelet_size: u64,
        cloudlet_size: u64,
        mel_output_size: u64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            iot_device_name: iot_device_name.into(),
            mel_name: mel_name.into(),
            vm_name: vm_name.into(),
            data_rate,
            start_generation,
            stop_generation,
            device_output_size,
            edgelet_size,
            cloudlet_size,
            mel_output_size,
            iot_device: None,
            mel: None,
            cloud_vm: None,
            edge_dc: None,
            edge_dc_name: None,
            cloud_dc: None,
            cloud_dc_name: None,
            start_time: None,
            device_died: false,
        }
    }
}

/// broker 发给设备的感知指令：设备据此构造流。
#[derive(Debug, Clone)]
pub struct SensingOrder {
    pub app_id: AppId,
    pub app_name: String,
    pub mel_name: String,
    pub output_size: u64,
}

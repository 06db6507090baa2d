//! 事件类型
//!
//! 以封闭的 enum 表示所有带标签的仿真事件，派发时做穷尽匹配，
//! 避免开放式整数 tag 空间带来的漏处理。

use super::entity::EntityId;
use crate::broker::{AppId, ComputeUnit, Flow, SensingOrder};
use crate::net::{LinkId, NetId};

/// 事件标签（不携带数据，用于日志与诊断）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    ResourceCharacteristicsRequest,
    ResourceCharacteristicsResponse,
    VmCreate,
    VmCreateAck,
    GenerateData,
    Sensing,
    MelResolution,
    TransmitIotData,
    TransmissionAck,
    BuildRoute,
    SdwanTransmit,
    SdwanTransmissionAck,
    ComputeSubmit,
    ComputeReturn,
    ReleaseChannels,
    DeviceDied,
    EndOfSimulation,
}

/// 带数据的仿真事件。
///
/// 每个变体对应状态机中的一次入站派发；kernel 只负责按时间序投递，
/// 语义全部在目标实体的 `process_event` 中。
#[derive(Debug, Clone)]
pub enum SimEvent {
    /// broker -> datacenter：启动握手，请求资源特征。
    ResourceCharacteristicsRequest { requester: EntityId },
    /// datacenter -> broker：资源特征应答。
    ResourceCharacteristicsResponse { datacenter: EntityId },
    /// broker -> datacenter：请求创建一个 VM/MEL。
    VmCreate { vm: NetId, name: String },
    /// datacenter -> broker：VM 创建确认。
    VmCreateAck { datacenter: EntityId, vm: NetId },
    /// broker 自消息：应用数据生成节拍。
    GenerateData { app: AppId },
    /// broker -> device：产生一次感知数据。
    Sensing(SensingOrder),
    /// device -> broker：请求解析抽象 MEL 目的地。
    MelResolution { flow: Flow },
    /// broker -> edge datacenter：传输 IoT 数据流。
    TransmitIotData { flow: Flow },
    /// datacenter -> broker：边缘传输完成确认。
    TransmissionAck { flow: Flow },
    /// broker -> edge datacenter：为边缘到云的流建路。
    BuildRoute { flow: Flow },
    /// edge datacenter -> SD-WAN：跨域传输。
    SdwanTransmit { flow: Flow },
    /// SD-WAN -> broker：跨域传输完成确认。
    SdwanTransmissionAck { flow: Flow },
    /// broker -> datacenter：提交计算单元（edgelet/cloudlet）。
    ComputeSubmit { unit: ComputeUnit },
    /// datacenter -> broker：计算单元执行完毕。
    ComputeReturn { unit: ComputeUnit },
    /// 控制器自消息：释放传输占用的链路信道。
    ReleaseChannels { links: Vec<LinkId> },
    /// device -> broker：设备电量耗尽。
    DeviceDied { device: EntityId },
    /// 引擎在事件队列排空后广播。
    EndOfSimulation,
}

impl SimEvent {
    pub fn tag(&self) -> Tag {
        match self {
            SimEvent::ResourceCharacteristicsRequest { .. } => Tag::ResourceCharacteristicsRequest,
            SimEvent::ResourceCharacteristicsResponse { .. } => {
                Tag::ResourceCharacteristicsResponse
            }
            SimEvent::VmCreate { .. } => Tag::VmCreate,
            SimEvent::VmCreateAck { .. } => Tag::VmCreateAck,
            SimEvent::GenerateData { .. } => Tag::GenerateData,
            SimEvent::Sensing(_) => Tag::Sensing,
            SimEvent::MelResolution { .. } => Tag::MelResolution,
            SimEvent::TransmitIotData { .. } => Tag::TransmitIotData,
            SimEvent::TransmissionAck { .. } => Tag::TransmissionAck,
            SimEvent::BuildRoute { .. } => Tag::BuildRoute,
            SimEvent::SdwanTransmit { .. } => Tag::SdwanTransmit,
            SimEvent::SdwanTransmissionAck { .. } => Tag::SdwanTransmissionAck,
            SimEvent::ComputeSubmit { .. } => Tag::ComputeSubmit,
            SimEvent::ComputeReturn { .. } => Tag::ComputeReturn,
            SimEvent::ReleaseChannels { .. } => Tag::ReleaseChannels,
            SimEvent::DeviceDied { .. } => Tag::DeviceDied,
            SimEvent::EndOfSimulation => Tag::EndOfSimulation,
        }
    }
}

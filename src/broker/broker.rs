//! 编排状态机
//!
//! broker 持有应用目录、名字注册表、MEL 路由策略与工作流日志，
//! 仅通过带标签事件驱动每条应用流水线：
//! 感知 -> 边缘路由 -> 边缘处理 -> 云路由 -> 云处理 -> 完成。
//! 每次状态转移由一个入站事件触发，产生至多一个出站调度。

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, info, trace, warn};

use super::app::{AppDescriptor, AppId, SensingOrder};
use super::compute::{ComputeId, ComputeUnit};
use super::flow::{Flow, FlowId};
use super::ids::IdGen;
use super::registry::{LookupError, Registry};
use super::workflow::{WorkflowEvent, WorkflowLog};
use crate::mel::MelRoutingPolicy;
use crate::net::NetId;
use crate::sim::{Entity, EntityId, Kernel, SimError, SimEvent};

/// 运行统计（JSON 摘要输出用）。
#[derive(Debug, Default, Clone, Serialize)]
pub struct BrokerStats {
    pub flows_routed: u64,
    pub edgelets_submitted: u64,
    pub cloudlets_submitted: u64,
    pub units_completed: u64,
}

/// 编排 broker。
pub struct Broker {
    id: EntityId,
    name: String,
    apps: Vec<AppDescriptor>,
    registry: Registry,
    mel_routing: Box<dyn MelRoutingPolicy>,
    datacenters: Vec<EntityId>,
    pending_characteristics: HashSet<EntityId>,
    vms_to_create: HashMap<EntityId, Vec<(NetId, String)>>,
    vms_requested: usize,
    vms_acked: usize,
    flow_ids: IdGen,
    compute_ids: IdGen,
    workflows: WorkflowLog,
    stats: BrokerStats,
}

impl Broker {
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        mel_routing: Box<dyn MelRoutingPolicy>,
        flow_ids: IdGen,
        compute_ids: IdGen,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            apps: Vec::new(),
            registry: Registry::default(),
            mel_routing,
            datacenters: Vec::new(),
            pending_characteristics: HashSet::new(),
            vms_to_create: HashMap::new(),
            vms_requested: 0,
            vms_acked: 0,
            flow_ids,
            compute_ids,
            workflows: WorkflowLog::default(),
            stats: BrokerStats::default(),
        }
    }

    /// 登记一个数据中心及其 VM 清单（拓扑装配时调用）。
    pub fn add_datacenter(
        &mut self,
        dc: EntityId,
        name: impl Into<String>,
        vms: Vec<(NetId, String)>,
    ) {
        let name = name.into();
        self.registry.register_datacenter(dc, name);
        for (vm, vm_name) in &vms {
            self.registry.register_vm(vm_name.clone(), *vm, dc);
        }
        self.datacenters.push(dc);
        self.vms_to_create.insert(dc, vms);
    }

    pub fn add_iot_device(&mut self, name: impl Into<String>, device: EntityId) {
        self.registry.register_device(name, device);
    }

    /// 提交应用目录。
    pub fn submit_apps(&mut self, apps: Vec<AppDescriptor>) {
        self.apps = apps;
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn workflows(&self) -> &WorkflowLog {
        &self.workflows
    }

    pub fn stats(&self) -> &BrokerStats {
        &self.stats
    }

    pub fn apps(&self) -> &[AppDescriptor] {
        &self.apps
    }

    fn app_by_id(&self, id: AppId) -> Result<&AppDescriptor, LookupError> {
        self.apps
            .iter()
            .find(|app| app.id == id)
            .ok_or(LookupError::UnknownApp(id))
    }

    // 全部 VM 创建确认到齐：恰好一次地解析每个应用的派生字段，
    // 并调度第一次数据生成节拍。
    fn resolve_apps(&mut self, kernel: &mut Kernel) -> Result<(), SimError> {
        info!(apps = self.apps.len(), "🚀 全部 VM 已创建，解析应用目录");
        let broker_id = self.id;
        let Self {
            apps,
            registry,
            mel_routing,
            ..
        } = self;
        for app in apps.iter_mut() {
            app.iot_device = Some(registry.device_id(&app.iot_device_name)?);

            // 抽象 MEL 名留到流时刻解析，所属边缘数据中心同样悬置。
            if !mel_routing.test(&app.mel_name) {
                let mel = registry.vm_id(&app.mel_name)?;
                app.mel = Some(mel);
                match registry.datacenter_of_vm(mel) {
                    Some(dc) => {
                        app.edge_dc = Some(dc);
                        app.edge_dc_name = registry.datacenter_name(dc).map(str::to_string);
                    }
                    None => warn!(app = %app.name, mel = %app.mel_name, "MEL 无所属数据中心"),
                }
            }

            let cloud_vm = registry.vm_id(&app.vm_name)?;
            app.cloud_vm = Some(cloud_vm);
            match registry.datacenter_of_vm(cloud_vm) {
                Some(dc) => {
                    app.cloud_dc = Some(dc);
                    app.cloud_dc_name = registry.datacenter_name(dc).map(str::to_string);
                }
                None => warn!(app = %app.name, vm = %app.vm_name, "云 VM 无所属数据中心"),
            }

            if app.start_time.is_none() {
                app.start_time = Some(kernel.now());
            }
            let delay = app.data_rate + app.start_generation;
            kernel.schedule(broker_id, delay, SimEvent::GenerateData { app: app.id });
        }
        Ok(())
    }

    // 生成节拍：窗口内（下界含、上界不含）且设备存活才发感知，
    // 并续排下一拍；否则静默停止。
    fn generate_iot_data(&self, app_id: AppId, kernel: &mut Kernel) -> Result<(), SimError> {
        let app = self.app_by_id(app_id)?;
        let now = kernel.now();
        if now >= app.start_generation && now < app.stop_generation && !app.device_died {
            let Some(device) = app.iot_device else {
                return Err(LookupError::UnknownDevice(app.iot_device_name.clone()).into());
            };
            kernel.schedule_now(
                device,
                SimEvent::Sensing(SensingOrder {
                    app_id,
                    app_name: app.name.clone(),
                    mel_name: app.mel_name.clone(),
                    output_size: app.device_output_size,
                }),
            );
            kernel.schedule(self.id, app.data_rate, SimEvent::GenerateData { app: app_id });
        } else {
            trace!(app = %app.name, ?now, "生成窗口外或设备死亡，停止节拍");
        }
        Ok(())
    }

    // 解析流的抽象 MEL 目的地，盖上数据中心戳，转交目标数据中心传输。
    fn mel_resolution(&mut self, mut flow: Flow, kernel: &mut Kernel) -> Result<(), SimError> {
        let mel_name = flow.dest_name.clone();
        let concrete = if self.mel_routing.test(&mel_name) {
            let instance = self.mel_routing.apply(&mel_name, &self.registry)?;
            debug!(logical = %mel_name, %instance, "🧭 MEL 抽象名解析");
            flow.dest_name = instance.clone();
            instance
        } else {
            mel_name
        };

        let mel_id = self.registry.vm_id(&concrete)?;
        let dc = self
            .registry
            .datacenter_of_vm(mel_id)
            .ok_or(SimError::UnresolvedDatacenter(mel_id))?;
        let dc_name = self.registry.datacenter_name(dc).map(str::to_string);

        flow.dest = Some(mel_id);
        flow.datacenter = Some(dc);
        flow.datacenter_name = dc_name.clone();

        self.workflows.append(
            flow.workflow,
            WorkflowEvent::Submitted {
                at: flow.submit_time,
            },
        );
        if let Some(name) = dc_name {
            self.workflows
                .append(flow.workflow, WorkflowEvent::SourceDc { name });
        }
        self.stats.flows_routed += 1;
        kernel.schedule_now(dc, SimEvent::TransmitIotData { flow });
        Ok(())
    }

    // 边缘传输完成：按应用构造非终段 edgelet，提交目标数据中心执行。
    fn ask_mel_to_process_data(&mut self, flow: Flow, kernel: &mut Kernel) -> Result<(), SimError> {
        let length = self.app_by_id(flow.app_id)?.edgelet_size;
        let vm = flow
            .dest
            .ok_or(SimError::UnresolvedFlowDestination(flow.id))?;
        let dc = flow
            .datacenter
            .ok_or(SimError::UnresolvedDatacenter(vm))?;
        let unit = ComputeUnit::new(
            ComputeId(self.compute_ids.next()),
            flow.app_id,
            vm,
            length,
            false,
            flow.workflow,
        );
        self.workflows
            .append(flow.workflow, WorkflowEvent::EdgeletQueued { unit: unit.id });
        self.stats.edgelets_submitted += 1;
        kernel.schedule_now(dc, SimEvent::ComputeSubmit { unit });
        Ok(())
    }

    // 计算单元返回：非终段接着把边缘结果送往云端，终段收尾。
    fn process_compute_return(
        &mut self,
        unit: ComputeUnit,
        kernel: &mut Kernel,
    ) -> Result<(), SimError> {
        self.stats.units_completed += 1;
        if !unit.is_final {
            return self.ask_mel_to_send_data_to_cloud(unit, kernel);
        }
        let at = kernel.now();
        self.workflows
            .append(unit.workflow, WorkflowEvent::Finished { at });
        info!(workflow = ?unit.workflow, ?at, "✅ 流水线完成");
        Ok(())
    }

    // 构造边缘到云的流（目的 VM 在此恰好解析一次），请求建路。
    fn ask_mel_to_send_data_to_cloud(
        &mut self,
        unit: ComputeUnit,
        kernel: &mut Kernel,
    ) -> Result<(), SimError> {
        let app = self.app_by_id(unit.app_id)?;
        let dest = self.registry.vm_id(&app.vm_name)?;
        let mut flow = Flow::new(
            FlowId(self.flow_ids.next()),
            app.id,
            app.name.clone(),
            app.mel_name.clone(),
            app.vm_name.clone(),
            unit.vm,
            unit.workflow,
            kernel.now(),
        );
        flow.dest = Some(dest);
        flow.add_packet_size(app.mel_output_size);

        let mel_dc = self
            .registry
            .datacenter_of_vm(unit.vm)
            .ok_or(SimError::UnresolvedDatacenter(unit.vm))?;
        self.workflows
            .append(unit.workflow, WorkflowEvent::EdgeToCloudFlow { flow: flow.id });
        kernel.schedule_now(mel_dc, SimEvent::BuildRoute { flow });
        Ok(())
    }

    // SD-WAN 传输完成：构造终段 cloudlet，提交云数据中心执行。
    fn ask_cloud_vm_to_process_data(
        &mut self,
        flow: Flow,
        kernel: &mut Kernel,
    ) -> Result<(), SimError> {
        let length = self.app_by_id(flow.app_id)?.cloudlet_size;
        let vm = flow
            .dest
            .ok_or(SimError::UnresolvedFlowDestination(flow.id))?;
        let dc = self
            .registry
            .datacenter_of_vm(vm)
            .ok_or(SimError::UnresolvedDatacenter(vm))?;
        let unit = ComputeUnit::new(
            ComputeId(self.compute_ids.next()),
            flow.app_id,
            vm,
            length,
            true,
            flow.workflow,
        );
        self.workflows
            .append(flow.workflow, WorkflowEvent::CloudletQueued { unit: unit.id });
        self.stats.cloudlets_submitted += 1;
        kernel.schedule_now(dc, SimEvent::ComputeSubmit { unit });
        Ok(())
    }

    fn mark_device_died(&mut self, device: EntityId) {
        for app in &mut self.apps {
            if app.iot_device == Some(device) {
                warn!(app = %app.name, ?device, "🔋 设备死亡，应用停止生成");
                app.device_died = true;
            }
        }
    }
}

impl Entity for Broker {
    fn id(&self) -> EntityId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }

    // 启动握手：向每个数据中心请求资源特征。
    fn start(&mut self, kernel: &mut Kernel) {
        self.pending_characteristics = self.datacenters.iter().copied().collect();
        for &dc in &self.datacenters {
            kernel.schedule_now(
                dc,
                SimEvent::ResourceCharacteristicsRequest { requester: self.id },
            );
        }
    }

    fn process_event(&mut self, ev: SimEvent, kernel: &mut Kernel) -> Result<(), SimError> {
        match ev {
            SimEvent::ResourceCharacteristicsResponse { datacenter } => {
                let known = self.pending_characteristics.remove(&datacenter);
                if known && self.pending_characteristics.is_empty() {
                    // 特征齐了，请求创建全部 VM。
                    let mut requested = 0;
                    for (&dc, vms) in &self.vms_to_create {
                        for (vm, name) in vms {
                            kernel.schedule_now(
                                dc,
                                SimEvent::VmCreate {
                                    vm: *vm,
                                    name: name.clone(),
                                },
                            );
                            requested += 1;
                        }
                    }
                    self.vms_requested = requested;
                    self.vms_acked = 0;
                    debug!(requested, "请求创建 VM");
                }
                Ok(())
            }
            SimEvent::VmCreateAck { datacenter, vm } => {
                trace!(?datacenter, ?vm, "VM 创建确认");
                self.vms_acked += 1;
                if self.vms_acked == self.vms_requested {
                    self.resolve_apps(kernel)?;
                }
                Ok(())
            }
            SimEvent::GenerateData { app } => self.generate_iot_data(app, kernel),
            SimEvent::MelResolution { flow } => self.mel_resolution(flow, kernel),
            SimEvent::TransmissionAck { flow } => self.ask_mel_to_process_data(flow, kernel),
            SimEvent::ComputeReturn { unit } => self.process_compute_return(unit, kernel),
            SimEvent::SdwanTransmissionAck { flow } => {
                self.ask_cloud_vm_to_process_data(flow, kernel)
            }
            SimEvent::DeviceDied { device } => {
                self.mark_device_died(device);
                Ok(())
            }
            SimEvent::EndOfSimulation => {
                info!(
                    workflows = self.workflows.len(),
                    completed = self.workflows.completed_count(),
                    flows_routed = self.stats.flows_routed,
                    units_completed = self.stats.units_completed,
                    "📊 broker 运行总结"
                );
                Ok(())
            }
            other => {
                trace!(tag = ?other.tag(), "忽略与 broker 无关的事件");
                Ok(())
            }
        }
    }
}

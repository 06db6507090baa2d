//! 名字解析
//!
//! 可读名（设备、VM/MEL、数据中心）到数字 id 的双向映射。
//! 查不到的名字是致命错误（拓扑配置问题）；VM 找不到所属数据中心
//! 返回显式 None，由调用方决定升格。

use std::collections::HashMap;

use super::app::AppId;
use crate::net::NetId;
use crate::sim::EntityId;
use thiserror::Error;

/// 名字/ id 查找失败。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("unknown iot device name: {0}")]
    UnknownDevice(String),

    #[error("unknown vm name: {0}")]
    UnknownVm(String),

    #[error("no app registered with id {0:?}")]
    UnknownApp(AppId),

    #[error("no deployed instances match abstract name {0}")]
    NoMelInstances(String),
}

/// 名字注册表：broker 独占写入，路由策略只读。
#[derive(Debug, Default)]
pub struct Registry {
    devices: HashMap<String, EntityId>,
    vms: HashMap<String, NetId>,
    dc_vms: HashMap<EntityId, Vec<NetId>>,
    dc_names: HashMap<EntityId, String>,
}

impl Registry {
    pub fn register_device(&mut self, name: impl Into<String>, id: EntityId) {
        self.devices.insert(name.into(), id);
    }

    pub fn register_datacenter(&mut self, id: EntityId, name: impl Into<String>) {
        self.dc_names.insert(id, name.into());
        self.dc_vms.entry(id).or_default();
    }

    pub fn register_vm(&mut self, name: impl Into<String>, vm: NetId, datacenter: EntityId) {
        self.vms.insert(name.into(), vm);
        self.dc_vms.entry(datacenter).or_default().push(vm);
    }

    pub fn device_id(&self, name: &str) -> Result<EntityId, LookupError> {
        self.devices
            .get(name)
            .copied()
            .ok_or_else(|| LookupError::UnknownDevice(name.to_string()))
    }

    pub fn vm_id(&self, name: &str) -> Result<NetId, LookupError> {
        self.vms
            .get(name)
            .copied()
            .ok_or_else(|| LookupError::UnknownVm(name.to_string()))
    }

    /// 已注册的全部 VM/MEL 名（MEL 路由策略的实例发现视图）。
    pub fn vm_names(&self) -> impl Iterator<Item = &str> {
        self.vms.keys().map(String::as_str)
    }

    /// 扫描各数据中心的 VM 列表找所属数据中心。
    /// None 表示无主——不再用哨兵 0 顶替。
    pub fn datacenter_of_vm(&self, vm: NetId) -> Option<EntityId> {
        self.dc_vms
            .iter()
            .find(|(_, vms)| vms.contains(&vm))
            .map(|(dc, _)| *dc)
    }

    pub fn datacenter_name(&self, id: EntityId) -> Option<&str> {
        self.dc_names.get(&id).map(String::as_str)
    }
}

//! 实体 trait
//!
//! 仿真实体（broker、设备、数据中心、SD-WAN）的统一派发接口。
//! 实体不继承内核类型，而是在每次派发时借用 `&mut Kernel`。

use super::error::SimError;
use super::event::SimEvent;
use super::kernel::Kernel;
use std::any::Any;

/// 实体标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub usize);

/// 仿真实体：单一事件入口 + 可选的启动钩子。
pub trait Entity: Any {
    /// 获取实体标识符
    fn id(&self) -> EntityId;

    /// 获取实体名称
    fn name(&self) -> &str;

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// 主循环开始前调用一次（broker 在此发起启动握手）。
    fn start(&mut self, _kernel: &mut Kernel) {}

    /// 处理一个入站事件。返回 Err 表示致命错误，引擎中止运行。
    fn process_event(&mut self, ev: SimEvent, kernel: &mut Kernel) -> Result<(), SimError>;
}

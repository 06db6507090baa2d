//! broker 模块
//!
//! 编排状态机及其数据模型：应用目录、流、计算单元、工作流日志、
//! 名字注册表与 id 生成器。

// 子模块声明
mod app;
#[allow(clippy::module_inception)]
mod broker;
mod compute;
mod flow;
mod ids;
mod registry;
mod workflow;

// 重新导出公共接口
pub use app::{AppDescriptor, AppId, SensingOrder};
pub use broker::{Broker, BrokerStats};
pub use compute::{ComputeId, ComputeUnit};
pub use flow::{Flow, FlowId};
pub use ids::IdGen;
pub use registry::{LookupError, Registry};
pub use workflow::{WorkflowEvent, WorkflowId, WorkflowLog};

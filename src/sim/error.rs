//! 错误类型
//!
//! 运行期致命错误的汇总类型。拓扑配置错误与查找失败都会中止运行，
//! 并携带指明缺失对象的诊断信息。

use super::entity::EntityId;
use crate::broker::{FlowId, LookupError};
use crate::net::{NetId, RoutingError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Routing(#[from] RoutingError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("event targeted unknown entity {0:?}")]
    UnknownEntity(EntityId),

    /// 原实现中 VM 找不到所属数据中心时静默返回哨兵 0；
    /// 这里升格为显式错误，测试可以据此发现被误路由的流。
    #[error("no datacenter owns vm {0:?}")]
    UnresolvedDatacenter(NetId),

    #[error("flow {0:?} reached transmission with an unresolved destination")]
    UnresolvedFlowDestination(FlowId),

    #[error("datacenter {0} has no SD-WAN attached")]
    NoSdwan(String),
}

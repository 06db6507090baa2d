//! 网络模块
//!
//! 此模块包含 SDN 域的网络基础设施：节点、链路、拓扑、路径缓存与路由策略。

// 子模块声明
mod id;
mod link;
mod node;
mod path_cache;
mod routing;
mod topology;

// 重新导出公共接口
pub use id::{LinkId, NetId, NodeId};
pub use link::Link;
pub use node::{NodeKind, TopoNode};
pub use path_cache::PathCache;
pub use routing::{RoutingError, SdnRoutingPolicy};
pub use topology::Topology;

//! MEL 路由模块
//!
//! 抽象逻辑组件名到已部署实例名的解析策略。

// 子模块声明
mod direct;
mod policy;
mod round_robin;

// 重新导出公共接口
pub use direct::DirectMelPolicy;
pub use policy::MelRoutingPolicy;
pub use round_robin::RoundRobinMelPolicy;

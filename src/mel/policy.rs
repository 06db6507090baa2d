//! MEL 路由策略 trait
//!
//! 把抽象逻辑组件名解析成一个已部署实例名的能力接口。
//! 契约：同样的 apply 序列给出同样的结果；返回的名字必须能被
//! 名字注册表映射到 id。

use crate::broker::{LookupError, Registry};

/// MEL 路由策略。
pub trait MelRoutingPolicy {
    /// 该逻辑名是否需要动态解析（false 表示已是具体实例名）。
    fn test(&self, logical: &str) -> bool;

    /// 在 broker 当前名字映射的只读视图下选出一个具体实例名。
    fn apply(&mut self, logical: &str, registry: &Registry) -> Result<String, LookupError>;
}

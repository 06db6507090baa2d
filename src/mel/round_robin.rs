//! 轮转 MEL 路由
//!
//! 抽象名形如 `MEL.*`：去掉 `.*` 后缀，在注册表里发现所有
//! `MEL.<数字>` 实例，按名字排序后逐个轮转。

use std::collections::HashMap;

use super::policy::MelRoutingPolicy;
use crate::broker::{LookupError, Registry};
use tracing::debug;

/// 每个抽象名维护独立游标的轮转策略。
#[derive(Debug, Default)]
pub struct RoundRobinMelPolicy {
    cursor: HashMap<String, usize>,
}

// `prefix.<digits>` 才算实例；"MEL.backup" 之类不参与轮转。
fn is_instance_of(prefix: &str, name: &str) -> bool {
    name.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('.'))
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

impl MelRoutingPolicy for RoundRobinMelPolicy {
    fn test(&self, logical: &str) -> bool {
        logical.ends_with(".*")
    }

    fn apply(&mut self, logical: &str, registry: &Registry) -> Result<String, LookupError> {
        let prefix = logical.strip_suffix(".*").unwrap_or(logical);
        let mut instances: Vec<&str> = registry
            .vm_names()
            .filter(|name| is_instance_of(prefix, name))
            .collect();
        if instances.is_empty() {
            return Err(LookupError::NoMelInstances(logical.to_string()));
        }
        // HashMap 迭代序不稳定，排序保证轮转确定性。
        instances.sort_unstable();

        let pos = self.cursor.entry(logical.to_string()).or_insert(0);
        let chosen = instances[*pos % instances.len()].to_string();
        *pos = (*pos + 1) % instances.len();
        debug!(%logical, %chosen, candidates = instances.len(), "轮转选择 MEL 实例");
        Ok(chosen)
    }
}

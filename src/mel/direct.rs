//! 直连 MEL 路由
//!
//! 透传实现：所有名字都视为具体实例，不做任何解析。

use super::policy::MelRoutingPolicy;
use crate::broker::{LookupError, Registry};

/// 透传策略。
#[derive(Debug, Default)]
pub struct DirectMelPolicy;

impl MelRoutingPolicy for DirectMelPolicy {
    fn test(&self, _logical: &str) -> bool {
        false
    }

    fn apply(&mut self, logical: &str, _registry: &Registry) -> Result<String, LookupError> {
        Ok(logical.to_string())
    }
}

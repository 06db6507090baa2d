//! 计算单元
//!
//! 代表一段数据在边缘（edgelet）或云端（cloudlet）主机上的处理任务。

use super::app::AppId;
use super::workflow::WorkflowId;
use crate::net::NetId;

// 任务的文件/输出大小固定，与处理长度无关。
const FILE_SIZE: u64 = 30;
const OUTPUT_SIZE: u64 = 1;

/// 计算单元标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComputeId(pub u64);

/// 可调度的计算单元。`is_final` 为真表示云端最后一段处理，
/// 返回时整条流水线结束。
#[derive(Debug, Clone)]
pub struct ComputeUnit {
    pub id: ComputeId,
    pub app_id: AppId,
    pub vm: NetId,
    /// 处理长度（MI）
    pub length: u64,
    pub file_size: u64,
    pub output_size: u64,
    pub is_final: bool,
    pub workflow: WorkflowId,
}

impl ComputeUnit {
    pub fn new(
        id: ComputeId,
        app_id: AppId,
        vm: NetId,
        length: u64,
        is_final: bool,
        workflow: WorkflowId,
    ) -> Self {
        Self {
            id,
            app_id,
            vm,
            length,
            file_size: FILE_SIZE,
            output_size: OUTPUT_SIZE,
            is_final,
            workflow,
        }
    }
}

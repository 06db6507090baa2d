//! 标识符类型
//!
//! 定义拓扑节点、链路与网络端点的唯一标识符。

/// 拓扑节点标识符（单个 SDN 域内）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// 链路标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkId(pub usize);

/// 网络端点标识符：IoT 设备、MEL、云 VM 共用的数字 id 空间。
///
/// 名字解析器把可读名映射到这个空间；PathCache 的 id 键也在这里。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetId(pub u64);

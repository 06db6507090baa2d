//! IoT 模块
//!
//! 边缘侧的数据源：IoT 设备实体与电池模型。

// 子模块声明
mod device;

// 重新导出公共接口
pub use device::{Battery, IoTDevice};

//! 数据中心模块
//!
//! 数据中心与 SD-WAN 实体及其域控制器。

// 子模块声明
mod controller;
mod datacenter;
mod sdwan;

// 重新导出公共接口
pub use controller::{SdnController, Transmission};
pub use datacenter::{Datacenter, DcStats};
pub use sdwan::SdWan;

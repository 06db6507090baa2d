//! 拓扑构建模块
//!
//! 各 SDN 域的程序化构建函数。

pub mod edge_cloud;

pub use edge_cloud::{
    CloudBuild, CloudOpts, EdgeBuild, EdgeOpts, WanBuild, WanOpts, build_cloud_dc, build_edge_dc,
    build_sdwan,
};

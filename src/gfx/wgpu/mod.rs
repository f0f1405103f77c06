//! wgpu 图形后端
//!
//! # 模块结构
//!
//! - `upload` - 顶点布局转换和顶点缓冲上传

mod upload;

pub use upload::{vertex_attributes, vertex_format, GpuMesh};

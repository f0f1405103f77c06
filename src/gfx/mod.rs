//! 图形后端模块
//!
//! 加载器本身不接触 GPU。本模块提供调用方在加载成功后使用的上传步骤：
//! - wgpu：把模型的顶点布局转换为 `wgpu::VertexBufferLayout`，并上传顶点数据

pub mod wgpu;

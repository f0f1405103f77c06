//! DistModel - 几何加载与顶点组装
//!
//! 把几何描述文件（三角形列表或 OBJ 子集）加载为可直接上传到 GPU 的交错顶点缓冲。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（日志、配置、场景描述、错误处理）
//! - `math`: 数学类型和平面法线计算
//! - `geometry`: 源文件解析、顶点格式、顶点组装、模型和文本转储
//! - `gfx`: 把加载好的模型上传到 wgpu 顶点缓冲
//!
//! # 使用示例
//!
//! ```no_run
//! use dist_model::geometry::{Grammar, LoadOptions, Model, VertexFormat};
//!
//! let options = LoadOptions::new(VertexFormat::new(Grammar::TriangleList).with_vertex_color());
//! let model = Model::load("models/triangle.txt", &options)?;
//!
//! assert_eq!(model.vertex_count(), model.triangle_count() * 3);
//! println!("{}", model);
//! # Ok::<(), dist_model::core::MeshLoadError>(())
//! ```

pub mod core;
pub mod math;
pub mod geometry;
pub mod gfx;

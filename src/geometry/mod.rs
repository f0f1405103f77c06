/// 几何体加载和顶点组装模块
///
/// 把几何描述文件（三角形列表或 OBJ 子集）转换为扁平的、可直接上传到 GPU 的交错顶点缓冲。
///
/// # 模块结构
///
/// - `source`: 读取源文件
/// - `loaders`: 两种语法的解析器
/// - `vertex`: 顶点格式描述符、布局和顶点记录
/// - `assembler`: 展开面引用、计算平面法线、写入颜色
/// - `mesh`: 交错顶点缓冲及其构建器
/// - `model`: 持有顶点缓冲的模型
/// - `dump`: 文本转储
///
/// # 架构设计
///
/// ```text
/// 文件 (三角形列表/OBJ)
///     ↓
/// source::read_all (文本)
///     ↓
/// Loader (TriangleListLoader/ObjLoader)
///     ↓
/// Geometry (原始图元)
///     ↓
/// Assembler
///     ↓
/// Model { VertexBuffer }
///     ↓
/// gfx::wgpu::upload (上传到GPU，由调用方执行)
/// ```

pub mod source;
pub mod vertex;
pub mod mesh;
pub mod loaders;
pub mod assembler;
pub mod model;
pub mod dump;

// 重新导出常用类型
pub use vertex::{AttributeKind, Grammar, VertexFormat, VertexLayout, VertexRecord};
pub use mesh::VertexBuffer;
pub use model::{LoadOptions, Model};

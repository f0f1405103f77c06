/// 模型：加载完成的顶点缓冲的唯一所有者
///
/// 加载流程是一次同步调用：读取文件 → 解析 → 组装 → 返回完整的模型，或者返回错误。
/// 不存在部分加载的模型。
///
/// `Model` 不实现 `Clone`，缓冲随模型一起移动，在模型销毁时释放一次。
/// 加载完成后只提供只读访问。
///
/// # 使用示例
///
/// ```rust,no_run
/// use dist_model::geometry::model::{LoadOptions, Model};
/// use dist_model::geometry::vertex::{Grammar, VertexFormat};
///
/// let options = LoadOptions::new(VertexFormat::new(Grammar::ObjPositionNormal));
/// let model = Model::load("models/cube.obj", &options)?;
///
/// println!("三角形数: {}", model.triangle_count());
/// println!("{}", model); // 文本转储
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
use super::assembler::Assembler;
use super::loaders::{load_geometry, parse_geometry, Geometry};
use super::mesh::VertexBuffer;
use super::vertex::{VertexFormat, VertexLayout};
use crate::core::error::MeshLoadError;
use crate::core::scene::Transform;
use crate::math::Color;
use std::fmt;
use std::path::Path;

/// 加载选项
///
/// 颜色和变换由调用方提供；加载器只把颜色写入缓冲（格式要求时），变换原样保存。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadOptions {
    pub format: VertexFormat,
    pub color: Color,
    pub transform: Transform,
}

impl LoadOptions {
    pub fn new(format: VertexFormat) -> Self {
        Self {
            format,
            color: Color::WHITE,
            transform: Transform::default(),
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }
}

/// 加载完成的模型
#[derive(Debug)]
pub struct Model {
    name: String,
    format: VertexFormat,
    color: Color,
    transform: Transform,
    buffer: VertexBuffer,
}

impl Model {
    /// 从文件加载模型
    ///
    /// # 错误
    ///
    /// - `MeshLoadError::FileNotFound` / `MeshLoadError::Io`：文件不存在或无法读取
    /// - `MeshLoadError::Parse`：内容不符合所选语法，包含文件路径和出错位置
    pub fn load(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Self, MeshLoadError> {
        let path = path.as_ref();
        let _span = tracing::debug_span!("load_model", path = %path.display()).entered();

        let geometry = load_geometry(path, options.format.grammar)?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Unnamed");

        let model = Self::from_geometry(name, &geometry, options)?;

        crate::loader_info!(
            path = %path.display(),
            grammar = options.format.grammar.name(),
            triangles = model.triangle_count(),
            vertices = model.vertex_count(),
            bytes = model.byte_size(),
            "Model loaded"
        );

        Ok(model)
    }

    /// 从内存中的文本加载模型
    pub fn from_source(
        name: impl Into<String>,
        source: &str,
        options: &LoadOptions,
    ) -> Result<Self, MeshLoadError> {
        let geometry = parse_geometry(source, options.format.grammar)?;
        Self::from_geometry(name, &geometry, options)
    }

    /// 从已解析的图元组装模型
    pub fn from_geometry(
        name: impl Into<String>,
        geometry: &Geometry,
        options: &LoadOptions,
    ) -> Result<Self, MeshLoadError> {
        let buffer = Assembler::new(options.format, options.color).assemble(geometry)?;

        Ok(Self {
            name: name.into(),
            format: options.format,
            color: options.color,
            transform: options.transform,
            buffer,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn format(&self) -> VertexFormat {
        self.format
    }

    /// 顶点布局：步长和每个属性的偏移
    pub fn layout(&self) -> &VertexLayout {
        self.buffer.layout()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.buffer.triangle_count()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.buffer.vertex_count()
    }

    /// 缓冲字节大小
    #[inline]
    pub fn byte_size(&self) -> usize {
        self.buffer.byte_size()
    }

    /// 只读的顶点数据
    pub fn vertices(&self) -> &[f32] {
        self.buffer.as_slice()
    }

    /// 只读的字节视图，用于上传到GPU
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_bytes()
    }

    /// 第 `index` 个顶点记录
    pub fn vertex(&self, index: usize) -> Option<&[f32]> {
        self.buffer.vertex(index)
    }

    pub fn buffer(&self) -> &VertexBuffer {
        &self.buffer
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::dump::write_dump(f, &self.buffer)
    }
}

/// 顶点缓冲模块
///
/// 定义CPU侧的交错顶点缓冲：一段连续的 f32，按三角形顺序存放 `三角形数 × 3` 个顶点记录。
///
/// # 架构说明
///
/// - **组装阶段**：`VertexBufferBuilder` 逐个写入顶点记录，所有写入都做边界检查
/// - **加载完成后**：`VertexBuffer` 不可变，只提供只读视图
/// - **GPU侧**：渲染器把 `as_bytes()` 上传到GPU缓冲区（见 `gfx::wgpu`）
///
/// 缓冲不实现 `Clone`，始终只有一个所有者。

use super::vertex::{AttributeKind, VertexLayout, VertexRecord};
use crate::core::error::MeshLoadError;
use std::mem::size_of;

/// 每个三角形的顶点数
pub const VERTICES_PER_FACE: usize = 3;

/// 交错顶点缓冲
#[derive(Debug)]
pub struct VertexBuffer {
    data: Vec<f32>,
    layout: VertexLayout,
    vertex_count: usize,
}

impl VertexBuffer {
    /// 缓冲布局
    #[inline]
    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    /// 获取顶点数量
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// 获取三角形数量
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.vertex_count / VERTICES_PER_FACE
    }

    /// 字节大小：顶点数 × 步长 × 4，没有填充
    #[inline]
    pub fn byte_size(&self) -> usize {
        self.data.len() * size_of::<f32>()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 只读的 f32 视图
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// 只读的字节视图，用于上传到GPU
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// 第 `index` 个顶点记录
    pub fn vertex(&self, index: usize) -> Option<&[f32]> {
        let stride = self.layout.stride();
        let start = index.checked_mul(stride)?;
        let end = start.checked_add(stride)?;
        self.data.get(start..end)
    }

    /// 按顶点迭代
    pub fn vertices(&self) -> std::slice::ChunksExact<'_, f32> {
        // 步长至少包含位置和法线，不会为 0
        self.data.chunks_exact(self.layout.stride().max(1))
    }

    /// 验证缓冲的有效性
    ///
    /// 检查：
    /// - 顶点数量是3的倍数
    /// - 数据长度正好等于 顶点数 × 步长
    pub fn validate(&self) -> Result<(), String> {
        if self.vertex_count % VERTICES_PER_FACE != 0 {
            return Err(format!(
                "顶点数量必须是3的倍数，当前为: {}",
                self.vertex_count
            ));
        }

        let expected = self.vertex_count * self.layout.stride();
        if self.data.len() != expected {
            return Err(format!(
                "缓冲长度 {} 与 {} 个顶点 × 步长 {} 不一致",
                self.data.len(),
                self.vertex_count,
                self.layout.stride()
            ));
        }

        Ok(())
    }
}

/// 顶点缓冲构建器
///
/// 预先知道顶点总数；`finish` 时检查是否写满。
#[derive(Debug)]
pub struct VertexBufferBuilder {
    data: Vec<f32>,
    layout: VertexLayout,
    expected_vertices: usize,
    written: usize,
}

impl VertexBufferBuilder {
    /// 创建一个带容量预分配的构建器
    pub fn new(layout: VertexLayout, expected_vertices: usize) -> Self {
        Self {
            data: vec![0.0; expected_vertices * layout.stride()],
            layout,
            expected_vertices,
            written: 0,
        }
    }

    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    /// 已写入的顶点数
    pub fn len(&self) -> usize {
        self.written
    }

    pub fn is_empty(&self) -> bool {
        self.written == 0
    }

    /// 写入下一个顶点记录
    ///
    /// 记录中的属性必须与布局完全一致：布局有 UV/颜色槽位时记录必须提供，反之亦然。
    pub fn push(&mut self, record: &VertexRecord) -> Result<(), MeshLoadError> {
        if record.uv.is_some() && !self.layout.has(AttributeKind::Uv) {
            return Err(MeshLoadError::InvalidGeometry(
                "顶点格式没有 UV 槽位".to_string(),
            ));
        }
        if record.color.is_some() && !self.layout.has(AttributeKind::Color) {
            return Err(MeshLoadError::InvalidGeometry(
                "顶点格式没有颜色槽位".to_string(),
            ));
        }

        let stride = self.layout.stride();
        let base = self.written * stride;

        let slot = self.data.get_mut(base..base + stride).ok_or_else(|| {
            MeshLoadError::InvalidGeometry(format!(
                "顶点 {} 超出预分配的 {} 个顶点",
                self.written, self.expected_vertices
            ))
        })?;

        for attribute in self.layout.attributes() {
            let values = record.attribute(attribute.kind).ok_or_else(|| {
                MeshLoadError::InvalidGeometry(format!(
                    "顶点 {} 缺少 {:?} 属性",
                    self.written, attribute.kind
                ))
            })?;

            let target = slot
                .get_mut(attribute.offset..attribute.offset + attribute.components)
                .ok_or_else(|| {
                    MeshLoadError::InvalidGeometry(format!(
                        "{:?} 属性超出顶点步长 {}",
                        attribute.kind, stride
                    ))
                })?;
            target.copy_from_slice(values);
        }

        self.written += 1;
        Ok(())
    }

    /// 完成构建
    pub fn finish(self) -> Result<VertexBuffer, MeshLoadError> {
        if self.written != self.expected_vertices {
            return Err(MeshLoadError::InvalidGeometry(format!(
                "只写入了 {} 个顶点，预期 {} 个",
                self.written, self.expected_vertices
            )));
        }

        let buffer = VertexBuffer {
            data: self.data,
            layout: self.layout,
            vertex_count: self.written,
        };

        buffer.validate().map_err(MeshLoadError::InvalidGeometry)?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::vertex::{Grammar, VertexFormat};

    fn triangle_records() -> [VertexRecord; 3] {
        [
            VertexRecord::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
            VertexRecord::new([1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
            VertexRecord::new([0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
        ]
    }

    #[test]
    fn test_build_interleaved_buffer() {
        let layout = VertexFormat::new(Grammar::TriangleList).layout();
        let mut builder = VertexBufferBuilder::new(layout, 3);
        for record in &triangle_records() {
            builder.push(record).unwrap();
        }
        let buffer = builder.finish().unwrap();

        assert_eq!(buffer.vertex_count(), 3);
        assert_eq!(buffer.triangle_count(), 1);
        assert_eq!(buffer.byte_size(), 3 * 6 * 4);
        assert_eq!(buffer.as_bytes().len(), buffer.byte_size());
        assert_eq!(buffer.vertex(1), Some(&[1.0, 0.0, 0.0, 0.0, 0.0, 1.0][..]));
        assert_eq!(buffer.vertex(3), None);
        assert_eq!(buffer.vertex(usize::MAX), None);
        assert_eq!(buffer.vertex(usize::MAX / 6 + 1), None);
        assert_eq!(buffer.vertices().count(), 3);
    }

    #[test]
    fn test_push_beyond_capacity_fails() {
        let layout = VertexFormat::new(Grammar::TriangleList).layout();
        let mut builder = VertexBufferBuilder::new(layout, 3);
        for record in &triangle_records() {
            builder.push(record).unwrap();
        }

        let extra = VertexRecord::new([0.0; 3], [0.0; 3]);
        assert!(builder.push(&extra).is_err());
    }

    #[test]
    fn test_missing_attribute_fails() {
        let layout = VertexFormat::new(Grammar::ObjPositionUvNormal).layout();
        let mut builder = VertexBufferBuilder::new(layout, 3);

        let record = VertexRecord::new([0.0; 3], [0.0, 0.0, 1.0]);
        assert!(matches!(
            builder.push(&record),
            Err(MeshLoadError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_unexpected_attribute_fails() {
        let layout = VertexFormat::new(Grammar::TriangleList).layout();
        let mut builder = VertexBufferBuilder::new(layout, 3);

        let mut record = VertexRecord::new([0.0; 3], [0.0, 0.0, 1.0]);
        record.color = Some([1.0, 1.0, 1.0]);
        assert!(builder.push(&record).is_err());
    }

    #[test]
    fn test_incomplete_buffer_fails() {
        let layout = VertexFormat::new(Grammar::TriangleList).layout();
        let mut builder = VertexBufferBuilder::new(layout, 3);
        builder.push(&triangle_records()[0]).unwrap();

        assert!(builder.finish().is_err());
    }

    #[test]
    fn test_empty_buffer() {
        let layout = VertexFormat::new(Grammar::TriangleList).layout();
        let buffer = VertexBufferBuilder::new(layout, 0).finish().unwrap();

        assert!(buffer.is_empty());
        assert_eq!(buffer.triangle_count(), 0);
        assert_eq!(buffer.byte_size(), 0);
    }
}

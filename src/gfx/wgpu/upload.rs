//! 顶点缓冲上传
//!
//! 把 [`Model`] 的交错顶点数据上传为 wgpu 顶点缓冲。
//! 着色器位置按布局中的属性顺序分配：position = 0, normal = 1, 之后依次为 uv、color。
//!
//! ```rust,ignore
//! let mesh = GpuMesh::upload(&device, &model)?;
//!
//! // 创建渲染管线时
//! buffers: &[mesh.buffer_layout()],
//!
//! // 渲染时
//! mesh.draw(&mut render_pass);
//! ```

use tracing::debug;
use wgpu::util::DeviceExt;

use crate::core::error::{DistModelError, Result};
use crate::geometry::model::Model;
use crate::geometry::vertex::VertexLayout;

/// 属性分量数对应的 wgpu 顶点格式
pub fn vertex_format(components: usize) -> Option<wgpu::VertexFormat> {
    match components {
        1 => Some(wgpu::VertexFormat::Float32),
        2 => Some(wgpu::VertexFormat::Float32x2),
        3 => Some(wgpu::VertexFormat::Float32x3),
        4 => Some(wgpu::VertexFormat::Float32x4),
        _ => None,
    }
}

/// 把顶点布局转换为 wgpu 顶点属性
pub fn vertex_attributes(layout: &VertexLayout) -> Result<Vec<wgpu::VertexAttribute>> {
    layout
        .attributes()
        .iter()
        .enumerate()
        .map(|(location, attribute)| {
            let format = vertex_format(attribute.components).ok_or_else(|| {
                DistModelError::Graphics(format!(
                    "{:?} attribute has unsupported component count {}",
                    attribute.kind, attribute.components
                ))
            })?;

            Ok(wgpu::VertexAttribute {
                offset: attribute.byte_offset() as wgpu::BufferAddress,
                shader_location: location as u32,
                format,
            })
        })
        .collect()
}

/// 已上传到GPU的模型顶点缓冲
pub struct GpuMesh {
    buffer: wgpu::Buffer,
    vertex_count: u32,
    array_stride: wgpu::BufferAddress,
    attributes: Vec<wgpu::VertexAttribute>,
}

impl GpuMesh {
    /// 上传模型的顶点数据
    pub fn upload(device: &wgpu::Device, model: &Model) -> Result<Self> {
        let vertex_count = u32::try_from(model.vertex_count()).map_err(|_| {
            DistModelError::Graphics(format!(
                "model '{}' has too many vertices ({})",
                model.name(),
                model.vertex_count()
            ))
        })?;
        let attributes = vertex_attributes(model.layout())?;

        debug!(
            model = model.name(),
            vertices = vertex_count,
            bytes = model.byte_size(),
            "Creating vertex buffer"
        );
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(model.name()),
            contents: model.as_bytes(),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Ok(Self {
            buffer,
            vertex_count,
            array_stride: model.layout().stride_bytes() as wgpu::BufferAddress,
            attributes,
        })
    }

    /// 渲染管线使用的顶点缓冲布局
    pub fn buffer_layout(&self) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: self.array_stride,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &self.attributes,
        }
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// 绑定到槽位 0 并绘制全部三角形
    pub fn draw<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        if self.vertex_count == 0 {
            return;
        }
        render_pass.set_vertex_buffer(0, self.buffer.slice(..));
        render_pass.draw(0..self.vertex_count, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::vertex::{Grammar, VertexFormat};
    use std::mem::size_of;

    #[test]
    fn test_attributes_for_flat_shaded_model() {
        let layout = VertexFormat::new(Grammar::TriangleList).layout();
        let attributes = vertex_attributes(&layout).unwrap();

        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes[0].offset, 0);
        assert_eq!(attributes[0].format, wgpu::VertexFormat::Float32x3);
        assert_eq!(attributes[1].offset, size_of::<[f32; 3]>() as wgpu::BufferAddress);
        assert_eq!(attributes[1].shader_location, 1);
    }

    #[test]
    fn test_attributes_for_textured_colored_model() {
        let layout = VertexFormat::new(Grammar::ObjPositionUvNormal)
            .with_vertex_color()
            .layout();
        let attributes = vertex_attributes(&layout).unwrap();

        assert_eq!(attributes.len(), 4);
        assert_eq!(attributes[2].format, wgpu::VertexFormat::Float32x2);
        assert_eq!(attributes[2].offset, 24);
        assert_eq!(attributes[3].format, wgpu::VertexFormat::Float32x3);
        assert_eq!(attributes[3].offset, 32);
        assert_eq!(layout.stride_bytes(), 44);
    }

    #[test]
    fn test_vertex_format_mapping() {
        assert_eq!(vertex_format(2), Some(wgpu::VertexFormat::Float32x2));
        assert_eq!(vertex_format(0), None);
        assert_eq!(vertex_format(5), None);
    }
}

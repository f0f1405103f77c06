/// 顶点属性组装
///
/// 把解析得到的图元展开为交错的顶点缓冲：每个源三角形/面连续写入 3 个顶点记录，
/// 顺序与源文件一致。
///
/// - 位置总是从源数据复制
/// - 法线：格式提供法线索引时直接复制；否则用三角形的三个位置计算平面法线，三个顶点共用
/// - UV：格式提供时复制
/// - 颜色：格式要求时写入模型的常量颜色
///
/// 不调整绕序，也不剔除退化三角形：面积为零的三角形得到 NaN 法线。
use super::loaders::{Geometry, ObjGeometry, TriangleList};
use super::mesh::{VertexBuffer, VertexBufferBuilder, VERTICES_PER_FACE};
use super::vertex::{NormalSource, VertexFormat, VertexRecord};
use crate::core::error::MeshLoadError;
use crate::math::geometry::{face_normal, is_degenerate};
use crate::math::Color;

/// 顶点组装器
pub struct Assembler {
    format: VertexFormat,
    color: Color,
}

impl Assembler {
    pub fn new(format: VertexFormat, color: Color) -> Self {
        Self { format, color }
    }

    /// 组装顶点缓冲
    pub fn assemble(&self, geometry: &Geometry) -> Result<VertexBuffer, MeshLoadError> {
        let (grammar_is_obj, triangle_count) = match geometry {
            Geometry::TriangleList(list) => (false, list.triangle_count()),
            Geometry::Obj(obj) => (true, obj.triangle_count()),
        };
        if grammar_is_obj != self.format.grammar.is_obj() {
            return Err(MeshLoadError::InvalidGeometry(format!(
                "geometry does not match grammar '{}'",
                self.format.grammar.name()
            )));
        }

        let mut builder =
            VertexBufferBuilder::new(self.format.layout(), triangle_count * VERTICES_PER_FACE);

        let degenerate = match geometry {
            Geometry::TriangleList(list) => self.assemble_triangle_list(list, &mut builder)?,
            Geometry::Obj(obj) => self.assemble_obj(obj, &mut builder)?,
        };

        if degenerate > 0 {
            crate::loader_warn!(
                degenerate,
                triangles = triangle_count,
                "Zero-area triangles produce undefined (NaN) normals"
            );
        }

        builder.finish()
    }

    /// 三角形列表：复制位置，按三角形计算法线
    fn assemble_triangle_list(
        &self,
        list: &TriangleList,
        builder: &mut VertexBufferBuilder,
    ) -> Result<usize, MeshLoadError> {
        let mut degenerate = 0;

        for triangle in list.triangles() {
            let normal = face_normal(triangle[0], triangle[1], triangle[2]);
            if is_degenerate(&normal) {
                degenerate += 1;
            }

            for &position in triangle {
                builder.push(&self.record(position, normal, None))?;
            }
        }

        Ok(degenerate)
    }

    /// OBJ：按面引用查表
    fn assemble_obj(
        &self,
        obj: &ObjGeometry,
        builder: &mut VertexBufferBuilder,
    ) -> Result<usize, MeshLoadError> {
        let mut degenerate = 0;

        for face in obj.faces() {
            let mut positions = [[0.0f32; 3]; 3];
            for (position, group) in positions.iter_mut().zip(&face.refs) {
                *position = obj.position(group).ok_or_else(|| {
                    MeshLoadError::InvalidGeometry(format!(
                        "face on line {} references a missing position",
                        face.line
                    ))
                })?;
            }

            let normals = match self.format.normal_source() {
                NormalSource::Sourced => {
                    let mut normals = [[0.0f32; 3]; 3];
                    for (normal, group) in normals.iter_mut().zip(&face.refs) {
                        *normal = obj.normal(group).ok_or_else(|| {
                            MeshLoadError::InvalidGeometry(format!(
                                "face on line {} has no normal index",
                                face.line
                            ))
                        })?;
                    }
                    normals
                }
                NormalSource::Computed => {
                    let normal = face_normal(positions[0], positions[1], positions[2]);
                    if is_degenerate(&normal) {
                        degenerate += 1;
                    }
                    [normal; 3]
                }
            };

            for ((group, position), normal) in face.refs.iter().zip(positions).zip(normals) {
                let uv = if self.format.grammar.has_uv() {
                    Some(obj.uv(group).ok_or_else(|| {
                        MeshLoadError::InvalidGeometry(format!(
                            "face on line {} has no uv index",
                            face.line
                        ))
                    })?)
                } else {
                    None
                };
                builder.push(&self.record(position, normal, uv))?;
            }
        }

        Ok(degenerate)
    }

    fn record(&self, position: [f32; 3], normal: [f32; 3], uv: Option<[f32; 2]>) -> VertexRecord {
        VertexRecord {
            position,
            normal,
            uv,
            color: self.format.vertex_color.then(|| self.color.to_array()),
        }
    }
}

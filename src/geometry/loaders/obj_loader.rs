/// OBJ 文件加载器
///
/// 支持 Wavefront OBJ 的一个子集：`v`、`vn`、`vt`、`f` 四种记录，其余记录（注释、材质、
/// 对象/组名等）全部忽略。面必须已经是三角形。
///
/// # 两遍解析
///
/// 1. **分类**：逐行按标签把记录放进各自的表（位置、法线、UV、面），面只解析出原始的 1 基索引
/// 2. **解析引用**：所有表都完整之后，再把面的索引转换为 0 基并做边界检查
///
/// OBJ 允许面引用文件后面才声明的顶点，所以不能边读边解析引用。
use super::{Geometry, GeometryLoader};
use crate::core::error::{ParseError, ParseErrorKind, Table};
use crate::geometry::vertex::Grammar;

/// 面引用记号的语法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceSyntax {
    /// `p`
    Position,
    /// `p/t`
    PositionUv,
    /// `p//n`
    PositionNormal,
    /// `p/t/n`
    PositionUvNormal,
}

impl FaceSyntax {
    pub fn for_grammar(grammar: Grammar) -> Option<Self> {
        match grammar {
            Grammar::TriangleList => None,
            Grammar::ObjPosition => Some(FaceSyntax::Position),
            Grammar::ObjPositionUv => Some(FaceSyntax::PositionUv),
            Grammar::ObjPositionNormal => Some(FaceSyntax::PositionNormal),
            Grammar::ObjPositionUvNormal => Some(FaceSyntax::PositionUvNormal),
        }
    }
}

/// 一个面顶点引用的一组索引
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexGroup {
    pub position: usize,
    pub uv: Option<usize>,
    pub normal: Option<usize>,
}

/// 三角形面
///
/// 在 [`ObjGeometry`] 中，索引已经是 0 基并且保证在各自表的范围内。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    /// 面所在的行号（从 1 开始）
    pub line: usize,
    pub refs: [IndexGroup; 3],
}

/// 第一遍的结果：按标签分好的记录，面索引尚未检查
#[derive(Debug, Default)]
struct ObjRecords {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    uvs: Vec<[f32; 2]>,
    faces: Vec<Face>,
}

/// 解析完成的 OBJ 几何数据
#[derive(Debug, Clone, PartialEq)]
pub struct ObjGeometry {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    uvs: Vec<[f32; 2]>,
    faces: Vec<Face>,
    syntax: FaceSyntax,
}

impl ObjGeometry {
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    pub fn uvs(&self) -> &[[f32; 2]] {
        &self.uvs
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn syntax(&self) -> FaceSyntax {
        self.syntax
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    /// 按 0 基索引查位置表，越界或没有该索引时返回 `None`
    pub fn position(&self, group: &IndexGroup) -> Option<[f32; 3]> {
        self.positions.get(group.position).copied()
    }

    pub fn normal(&self, group: &IndexGroup) -> Option<[f32; 3]> {
        group.normal.and_then(|i| self.normals.get(i).copied())
    }

    pub fn uv(&self, group: &IndexGroup) -> Option<[f32; 2]> {
        group.uv.and_then(|i| self.uvs.get(i).copied())
    }
}

/// OBJ 格式加载器
pub struct ObjLoader {
    syntax: FaceSyntax,
}

impl ObjLoader {
    pub fn new(syntax: FaceSyntax) -> Self {
        Self { syntax }
    }

    /// 解析 OBJ 文本
    pub fn parse(&self, source: &str) -> Result<ObjGeometry, ParseError> {
        let records = self.classify(source)?;

        tracing::debug!(
            positions = records.positions.len(),
            normals = records.normals.len(),
            uvs = records.uvs.len(),
            faces = records.faces.len(),
            "OBJ records classified"
        );

        self.resolve(records)
    }

    /// 第一遍：按标签分类
    fn classify(&self, source: &str) -> Result<ObjRecords, ParseError> {
        let mut records = ObjRecords::default();

        for (index, raw_line) in source.lines().enumerate() {
            let line = index + 1;
            let content = match raw_line.find('#') {
                Some(pos) => &raw_line[..pos],
                None => raw_line,
            };

            let mut tokens = content.split_whitespace();
            let Some(tag) = tokens.next() else {
                continue;
            };

            // 按完整标签匹配，`vn`/`vt` 不会被当作 `v`
            match tag {
                "vn" => records.normals.push(parse_components("vn", tokens, line)?),
                "vt" => records.uvs.push(parse_components("vt", tokens, line)?),
                "v" => records.positions.push(parse_components("v", tokens, line)?),
                "f" => records.faces.push(self.parse_face(tokens, line)?),
                _ => {}
            }
        }

        Ok(records)
    }

    fn parse_face<'a>(
        &self,
        tokens: impl Iterator<Item = &'a str>,
        line: usize,
    ) -> Result<Face, ParseError> {
        let tokens: Vec<&str> = tokens.collect();
        if tokens.len() != 3 {
            return Err(ParseError::at_line(
                line,
                ParseErrorKind::UnsupportedFaceArity(tokens.len()),
            ));
        }

        let mut refs = [IndexGroup {
            position: 0,
            uv: None,
            normal: None,
        }; 3];
        for (group, token) in refs.iter_mut().zip(&tokens) {
            *group = self.parse_reference(token, line)?;
        }

        Ok(Face { line, refs })
    }

    /// 解析一个面引用记号，得到 1 基索引
    fn parse_reference(&self, token: &str, line: usize) -> Result<IndexGroup, ParseError> {
        let malformed =
            || ParseError::at_line(line, ParseErrorKind::MalformedFaceToken(token.to_string()));

        match self.syntax {
            FaceSyntax::Position => {
                if token.contains('/') {
                    return Err(malformed());
                }
                Ok(IndexGroup {
                    position: parse_index(token, line)?,
                    uv: None,
                    normal: None,
                })
            }
            FaceSyntax::PositionNormal => {
                let (position, normal) = token.split_once("//").ok_or_else(malformed)?;
                if position.contains('/') || normal.contains('/') {
                    return Err(malformed());
                }
                Ok(IndexGroup {
                    position: parse_index(position, line)?,
                    uv: None,
                    normal: Some(parse_index(normal, line)?),
                })
            }
            FaceSyntax::PositionUv => {
                let parts: Vec<&str> = token.split('/').collect();
                let [position, uv] = parts[..] else {
                    return Err(malformed());
                };
                Ok(IndexGroup {
                    position: parse_index(position, line)?,
                    uv: Some(parse_index(uv, line)?),
                    normal: None,
                })
            }
            FaceSyntax::PositionUvNormal => {
                let parts: Vec<&str> = token.split('/').collect();
                let [position, uv, normal] = parts[..] else {
                    return Err(malformed());
                };
                Ok(IndexGroup {
                    position: parse_index(position, line)?,
                    uv: Some(parse_index(uv, line)?),
                    normal: Some(parse_index(normal, line)?),
                })
            }
        }
    }

    /// 第二遍：所有表都完整后，把面索引转换为 0 基并检查范围
    fn resolve(&self, records: ObjRecords) -> Result<ObjGeometry, ParseError> {
        let ObjRecords {
            positions,
            normals,
            uvs,
            faces,
        } = records;

        let mut resolved = Vec::with_capacity(faces.len());
        for face in faces {
            let mut refs = face.refs;
            for group in refs.iter_mut() {
                group.position =
                    resolve_index(group.position, Table::Position, positions.len(), face.line)?;
                if let Some(uv) = group.uv {
                    group.uv = Some(resolve_index(uv, Table::Uv, uvs.len(), face.line)?);
                }
                if let Some(normal) = group.normal {
                    group.normal =
                        Some(resolve_index(normal, Table::Normal, normals.len(), face.line)?);
                }
            }
            resolved.push(Face {
                line: face.line,
                refs,
            });
        }

        Ok(ObjGeometry {
            positions,
            normals,
            uvs,
            faces: resolved,
            syntax: self.syntax,
        })
    }
}

impl GeometryLoader for ObjLoader {
    fn parse_str(&self, source: &str) -> Result<Geometry, ParseError> {
        self.parse(source).map(Geometry::Obj)
    }

    fn supported_extensions(&self) -> &'static [&'static str] {
        &["obj"]
    }
}

/// 解析记录的前 `N` 个浮点分量，多余的分量（例如 `w`）忽略
fn parse_components<'a, const N: usize>(
    tag: &'static str,
    tokens: impl Iterator<Item = &'a str>,
    line: usize,
) -> Result<[f32; N], ParseError> {
    let mut values = [0.0f32; N];
    let mut found = 0;

    for (slot, token) in values.iter_mut().zip(tokens) {
        *slot = token.parse().map_err(|_| {
            ParseError::at_line(line, ParseErrorKind::InvalidNumber(token.to_string()))
        })?;
        found += 1;
    }

    if found < N {
        return Err(ParseError::at_line(
            line,
            ParseErrorKind::MissingComponents {
                tag,
                expected: N,
                found,
            },
        ));
    }

    Ok(values)
}

/// 解析 1 基索引
fn parse_index(token: &str, line: usize) -> Result<usize, ParseError> {
    match token.parse::<usize>() {
        Ok(index) if index >= 1 => Ok(index),
        _ => Err(ParseError::at_line(
            line,
            ParseErrorKind::InvalidIndex(token.to_string()),
        )),
    }
}

/// 1 基索引转换为 0 基，并检查是否在表内
fn resolve_index(index: usize, table: Table, len: usize, line: usize) -> Result<usize, ParseError> {
    if len == 0 {
        return Err(ParseError::at_line(line, ParseErrorKind::EmptyTable(table)));
    }
    if index == 0 || index > len {
        return Err(ParseError::at_line(
            line,
            ParseErrorKind::IndexOutOfRange { table, index, len },
        ));
    }
    Ok(index - 1)
}

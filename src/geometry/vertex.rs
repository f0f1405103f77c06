/// 顶点格式定义模块
///
/// 用一个小的格式描述符代替“每种文件格式一个模型类型”：
/// 描述符决定源文件语法、输出顶点包含哪些属性、属性顺序，以及法线是从文件读取还是计算得到。
///
/// # 属性顺序
///
/// 固定为 Position(3), Normal(3), [Uv(2)], [Color(3)]，
/// 位置总是在偏移 0 处，步长等于所有属性分量数之和。

use serde::{Deserialize, Serialize};
use std::mem::size_of;

/// 源文件语法
///
/// 由调用方选择，加载器不根据内容自动识别。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grammar {
    /// 三角形列表：`T` 后跟 `T * 9` 个位置分量
    TriangleList,

    /// OBJ，面引用只有位置：`f 1 2 3`
    ObjPosition,

    /// OBJ，面引用为 `位置/UV`
    ObjPositionUv,

    /// OBJ，面引用为 `位置//法线`
    ObjPositionNormal,

    /// OBJ，面引用为 `位置/UV/法线`
    ObjPositionUvNormal,
}

impl Grammar {
    pub const ALL: [Grammar; 5] = [
        Grammar::TriangleList,
        Grammar::ObjPosition,
        Grammar::ObjPositionUv,
        Grammar::ObjPositionNormal,
        Grammar::ObjPositionUvNormal,
    ];

    /// 配置文件和命令行中使用的名称
    pub fn name(&self) -> &'static str {
        match self {
            Grammar::TriangleList => "triangle_list",
            Grammar::ObjPosition => "obj_position",
            Grammar::ObjPositionUv => "obj_position_uv",
            Grammar::ObjPositionNormal => "obj_position_normal",
            Grammar::ObjPositionUvNormal => "obj_position_uv_normal",
        }
    }

    /// 从名称解析
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.name() == name)
    }

    pub fn is_obj(&self) -> bool {
        !matches!(self, Grammar::TriangleList)
    }

    /// 面引用是否包含 UV 索引
    pub fn has_uv(&self) -> bool {
        matches!(self, Grammar::ObjPositionUv | Grammar::ObjPositionUvNormal)
    }

    /// 面引用是否包含法线索引
    pub fn has_normals(&self) -> bool {
        matches!(self, Grammar::ObjPositionNormal | Grammar::ObjPositionUvNormal)
    }
}

/// 顶点属性类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Position,
    Normal,
    Uv,
    Color,
}

impl AttributeKind {
    /// 分量数量
    pub fn components(&self) -> usize {
        match self {
            AttributeKind::Uv => 2,
            _ => 3,
        }
    }
}

/// 法线来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalSource {
    /// 从源文件的法线表复制
    Sourced,

    /// 由三角形的三个位置计算（平面着色）
    Computed,
}

/// 顶点格式描述符
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexFormat {
    pub grammar: Grammar,

    /// 是否在每个顶点写入模型颜色
    pub vertex_color: bool,
}

impl VertexFormat {
    pub fn new(grammar: Grammar) -> Self {
        Self {
            grammar,
            vertex_color: false,
        }
    }

    /// 在每个顶点后附加颜色属性
    pub fn with_vertex_color(mut self) -> Self {
        self.vertex_color = true;
        self
    }

    pub fn normal_source(&self) -> NormalSource {
        if self.grammar.has_normals() {
            NormalSource::Sourced
        } else {
            NormalSource::Computed
        }
    }

    /// 按固定顺序列出属性
    pub fn attributes(&self) -> Vec<AttributeKind> {
        let mut kinds = vec![AttributeKind::Position, AttributeKind::Normal];
        if self.grammar.has_uv() {
            kinds.push(AttributeKind::Uv);
        }
        if self.vertex_color {
            kinds.push(AttributeKind::Color);
        }
        kinds
    }

    pub fn layout(&self) -> VertexLayout {
        VertexLayout::new(&self.attributes())
    }
}

/// 单个属性在顶点记录中的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeLayout {
    pub kind: AttributeKind,

    /// 分量数量
    pub components: usize,

    /// 相对顶点起始处的偏移（以 f32 计）
    pub offset: usize,
}

impl AttributeLayout {
    /// 以字节计的偏移
    pub fn byte_offset(&self) -> usize {
        self.offset * size_of::<f32>()
    }
}

/// 交错顶点缓冲的布局
///
/// 这正是 GPU 顶点输入描述需要的信息：步长以及每个属性的偏移。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    attributes: Vec<AttributeLayout>,
    stride: usize,
}

impl VertexLayout {
    pub fn new(kinds: &[AttributeKind]) -> Self {
        let mut offset = 0;
        let attributes = kinds
            .iter()
            .map(|&kind| {
                let attribute = AttributeLayout {
                    kind,
                    components: kind.components(),
                    offset,
                };
                offset += attribute.components;
                attribute
            })
            .collect();

        Self {
            attributes,
            stride: offset,
        }
    }

    /// 每个顶点的 f32 数量
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// 每个顶点的字节数
    #[inline]
    pub fn stride_bytes(&self) -> usize {
        self.stride * size_of::<f32>()
    }

    pub fn attributes(&self) -> &[AttributeLayout] {
        &self.attributes
    }

    pub fn attribute(&self, kind: AttributeKind) -> Option<&AttributeLayout> {
        self.attributes.iter().find(|a| a.kind == kind)
    }

    pub fn has(&self, kind: AttributeKind) -> bool {
        self.attribute(kind).is_some()
    }

    /// 属性偏移（以 f32 计）
    pub fn offset(&self, kind: AttributeKind) -> Option<usize> {
        self.attribute(kind).map(|a| a.offset)
    }
}

/// 一个输出顶点的全部属性
///
/// 组装阶段的中间值；写入缓冲时按布局交错排列。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexRecord {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: Option<[f32; 2]>,
    pub color: Option<[f32; 3]>,
}

impl VertexRecord {
    #[inline]
    pub fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self {
            position,
            normal,
            uv: None,
            color: None,
        }
    }

    /// 取出某个属性的分量
    pub fn attribute(&self, kind: AttributeKind) -> Option<&[f32]> {
        match kind {
            AttributeKind::Position => Some(&self.position),
            AttributeKind::Normal => Some(&self.normal),
            AttributeKind::Uv => self.uv.as_ref().map(|uv| uv.as_slice()),
            AttributeKind::Color => self.color.as_ref().map(|c| c.as_slice()),
        }
    }
}

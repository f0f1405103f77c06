/// 几何源加载器模块
///
/// 提供统一的解析接口和两种语法的具体实现。
///
/// # 支持的语法
///
/// - **三角形列表**：三角形数量 + 顶点位置（`TriangleListLoader`）
/// - **OBJ 子集**：`v`/`vn`/`vt`/`f` 记录，四种面引用语法（`ObjLoader`）
///
/// 语法由调用方选择（[`Grammar`]），不根据文件内容猜测。
///
/// # 使用示例
///
/// ```rust,no_run
/// use dist_model::geometry::loaders::load_geometry;
/// use dist_model::geometry::vertex::Grammar;
/// use std::path::Path;
///
/// let geometry = load_geometry(Path::new("models/cube.obj"), Grammar::ObjPositionNormal)?;
/// println!("三角形数: {}", geometry.triangle_count());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
use crate::core::error::{MeshLoadError, ParseError};
use crate::geometry::source;
use crate::geometry::vertex::Grammar;
use std::path::Path;

pub mod obj_loader;
pub mod triangle_list;

// 重新导出加载器
pub use obj_loader::{FaceSyntax, ObjGeometry, ObjLoader};
pub use triangle_list::{TriangleList, TriangleListLoader};

/// 解析得到的原始几何图元
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// 三角形列表：只有位置
    TriangleList(TriangleList),

    /// OBJ：图元表 + 已检查的面引用
    Obj(ObjGeometry),
}

impl Geometry {
    pub fn triangle_count(&self) -> usize {
        match self {
            Geometry::TriangleList(list) => list.triangle_count(),
            Geometry::Obj(obj) => obj.triangle_count(),
        }
    }
}

/// 几何源加载器 trait
///
/// 所有语法的加载器都实现此 trait。
///
/// # 实现要求
///
/// - 只解析文本，不涉及 GPU 资源
/// - 出错时立即返回，不做任何恢复
pub trait GeometryLoader {
    /// 从文本解析
    fn parse_str(&self, source: &str) -> Result<Geometry, ParseError>;

    /// 获取常见的文件扩展名列表（小写，不含点号）
    fn supported_extensions(&self) -> &'static [&'static str];

    /// 从内存数据解析
    fn load_from_memory(&self, data: &[u8]) -> Result<Geometry, MeshLoadError> {
        let text = std::str::from_utf8(data).map_err(|e| MeshLoadError::Io {
            path: "<memory>".into(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;
        Ok(self.parse_str(text)?)
    }
}

/// 根据语法选择加载器
pub fn loader_for(grammar: Grammar) -> Box<dyn GeometryLoader> {
    match FaceSyntax::for_grammar(grammar) {
        Some(syntax) => Box::new(ObjLoader::new(syntax)),
        None => Box::new(TriangleListLoader),
    }
}

/// 按指定语法解析文本
pub fn parse_geometry(source: &str, grammar: Grammar) -> Result<Geometry, ParseError> {
    loader_for(grammar).parse_str(source)
}

/// 读取并解析几何文件
///
/// # 错误
///
/// - 文件不存在或无法读取
/// - 文本不符合所选语法（错误信息中包含文件路径和行号/记号序号）
pub fn load_geometry(path: &Path, grammar: Grammar) -> Result<Geometry, MeshLoadError> {
    let loader = loader_for(grammar);

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    if let Some(extension) = extension {
        if !loader.supported_extensions().contains(&extension.as_str()) {
            crate::loader_warn!(
                path = %path.display(),
                grammar = grammar.name(),
                "File extension '.{}' is unusual for this grammar",
                extension
            );
        }
    }

    let text = source::read_all(path)?;
    loader.parse_str(&text).map_err(|e| e.with_path(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ParseErrorKind;

    #[test]
    fn test_supported_extensions() {
        assert!(loader_for(Grammar::ObjPositionNormal)
            .supported_extensions()
            .contains(&"obj"));
        assert!(loader_for(Grammar::TriangleList)
            .supported_extensions()
            .contains(&"txt"));
    }

    #[test]
    fn test_parse_geometry_dispatches_on_grammar() {
        let list = parse_geometry("1 0 0 0 1 0 0 0 1 0", Grammar::TriangleList).unwrap();
        assert!(matches!(list, Geometry::TriangleList(_)));

        let obj = parse_geometry("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n", Grammar::ObjPosition)
            .unwrap();
        assert!(matches!(obj, Geometry::Obj(_)));
        assert_eq!(obj.triangle_count(), 1);
    }

    #[test]
    fn test_same_text_different_grammar() {
        // OBJ 文本按三角形列表解析会失败，语法不会自动识别
        let err = parse_geometry("v 0 0 0\n", Grammar::TriangleList).unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::InvalidTriangleCount(_)));
    }

    #[test]
    fn test_load_from_memory() {
        let loader = loader_for(Grammar::TriangleList);
        let geometry = loader.load_from_memory(b"1 0 0 0 1 0 0 0 1 0").unwrap();
        assert_eq!(geometry.triangle_count(), 1);

        assert!(matches!(
            loader.load_from_memory(&[0xff, 0xfe]),
            Err(MeshLoadError::Io { .. })
        ));
        assert!(matches!(
            loader.load_from_memory(b"2 0 0 0"),
            Err(MeshLoadError::Source(_))
        ));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = load_geometry(Path::new("nonexistent.obj"), Grammar::ObjPosition);
        assert!(matches!(result, Err(MeshLoadError::FileNotFound(_))));
    }
}

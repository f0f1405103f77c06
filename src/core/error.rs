//! 错误处理模块
//!
//! 定义了几何加载器中使用的统一错误类型。
//!
//! # 错误分类
//!
//! - **IO 错误**：模型文件不存在或无法完整读取（`MeshLoadError::FileNotFound` / `MeshLoadError::Io`）
//! - **解析错误**：数值格式错误、记录长度不对、面的顶点数不是 3、
//!   索引越界、引用了空表（`MeshLoadError::Parse`，内含 [`ParseError`]）
//!
//! 两类错误都不做本地恢复：加载直接失败，不会返回残缺的模型。

use std::fmt;
use std::path::PathBuf;

/// 统一的 Result 类型
pub type Result<T> = std::result::Result<T, DistModelError>;

/// 顶层错误类型
#[derive(Debug)]
pub enum DistModelError {
    /// 配置错误
    Config(ConfigError),

    /// 网格加载错误
    MeshLoading(MeshLoadError),

    /// 图形后端错误（上传顶点缓冲）
    Graphics(String),
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

/// 网格加载相关的错误
#[derive(Debug)]
pub enum MeshLoadError {
    /// 文件不存在
    FileNotFound(PathBuf),

    /// 文件存在但读取失败（权限、非 UTF-8 内容等）
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// 解析失败，附带出错的文件路径
    Parse { path: PathBuf, error: ParseError },

    /// 内存中的源数据解析失败（没有文件路径）
    Source(ParseError),

    /// 组装出的几何数据与顶点格式不一致
    InvalidGeometry(String),
}

/// 解析错误发生的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// 行号（从 1 开始，OBJ 语法）
    Line(usize),

    /// 记号序号（从 1 开始，三角形列表语法）
    Token(usize),

    /// 文件末尾
    EndOfInput,
}

/// 几何源数据的解析错误
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub location: Location,
    pub kind: ParseErrorKind,
}

/// 解析错误的具体类别
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// 三角形列表缺少开头的三角形数量
    MissingTriangleCount,

    /// 三角形数量不是非负整数
    InvalidTriangleCount(String),

    /// 数值记号无法解析为浮点数
    InvalidNumber(String),

    /// 记号数量不足
    UnexpectedEnd { expected: usize, found: usize },

    /// 声明的数据之后还有多余的记号
    TrailingData(String),

    /// 记录的分量数量不足（例如 `v 1 2`）
    MissingComponents {
        tag: &'static str,
        expected: usize,
        found: usize,
    },

    /// 面不是三角形
    UnsupportedFaceArity(usize),

    /// 面引用记号与当前 OBJ 变体的语法不匹配
    MalformedFaceToken(String),

    /// 索引不是正整数
    InvalidIndex(String),

    /// 索引超出目标表范围
    IndexOutOfRange {
        table: Table,
        index: usize,
        len: usize,
    },

    /// 面引用了一个没有任何条目的表
    EmptyTable(Table),
}

/// OBJ 中的图元表
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Position,
    Normal,
    Uv,
}

impl ParseError {
    pub fn new(location: Location, kind: ParseErrorKind) -> Self {
        Self { location, kind }
    }

    pub fn at_line(line: usize, kind: ParseErrorKind) -> Self {
        Self::new(Location::Line(line), kind)
    }

    pub fn at_token(token: usize, kind: ParseErrorKind) -> Self {
        Self::new(Location::Token(token), kind)
    }

    /// 附上文件路径，转换为加载错误
    pub fn with_path(self, path: impl Into<PathBuf>) -> MeshLoadError {
        MeshLoadError::Parse {
            path: path.into(),
            error: self,
        }
    }
}

impl fmt::Display for DistModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistModelError::Config(e) => write!(f, "Configuration error: {}", e),
            DistModelError::MeshLoading(e) => write!(f, "Mesh loading error: {}", e),
            DistModelError::Graphics(msg) => write!(f, "Graphics error: {}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for MeshLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshLoadError::FileNotFound(path) => {
                write!(f, "Mesh file not found: {}", path.display())
            }
            MeshLoadError::Io { path, source } => {
                write!(f, "Failed to read mesh '{}': {}", path.display(), source)
            }
            MeshLoadError::Parse { path, error } => {
                write!(f, "Failed to parse mesh '{}': {}", path.display(), error)
            }
            MeshLoadError::Source(error) => write!(f, "Failed to parse mesh: {}", error),
            MeshLoadError::InvalidGeometry(msg) => write!(f, "Invalid geometry data: {}", msg),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Line(line) => write!(f, "line {}", line),
            Location::Token(token) => write!(f, "token {}", token),
            Location::EndOfInput => write!(f, "end of input"),
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Table::Position => "position",
            Table::Normal => "normal",
            Table::Uv => "uv",
        };
        f.write_str(name)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.kind)
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::MissingTriangleCount => write!(f, "missing triangle count"),
            ParseErrorKind::InvalidTriangleCount(token) => {
                write!(f, "invalid triangle count '{}'", token)
            }
            ParseErrorKind::InvalidNumber(token) => write!(f, "invalid number '{}'", token),
            ParseErrorKind::UnexpectedEnd { expected, found } => write!(
                f,
                "unexpected end of data: expected {} values, found {}",
                expected, found
            ),
            ParseErrorKind::TrailingData(token) => {
                write!(f, "unexpected data after last triangle: '{}'", token)
            }
            ParseErrorKind::MissingComponents {
                tag,
                expected,
                found,
            } => write!(
                f,
                "'{}' record needs {} components, found {}",
                tag, expected, found
            ),
            ParseErrorKind::UnsupportedFaceArity(count) => write!(
                f,
                "face has {} vertex references, only triangles are supported",
                count
            ),
            ParseErrorKind::MalformedFaceToken(token) => {
                write!(f, "malformed face reference '{}'", token)
            }
            ParseErrorKind::InvalidIndex(token) => write!(f, "invalid index '{}'", token),
            ParseErrorKind::IndexOutOfRange { table, index, len } => write!(
                f,
                "{} index {} out of range (table has {} entries)",
                table, index, len
            ),
            ParseErrorKind::EmptyTable(table) => {
                write!(f, "face references empty {} table", table)
            }
        }
    }
}

impl std::error::Error for DistModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DistModelError::MeshLoading(e) => Some(e),
            DistModelError::Config(e) => Some(e),
            DistModelError::Graphics(_) => None,
        }
    }
}

impl std::error::Error for MeshLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MeshLoadError::Io { source, .. } => Some(source),
            MeshLoadError::Parse { error, .. } | MeshLoadError::Source(error) => Some(error),
            _ => None,
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for ParseError {}

// 实现 From trait 以便于错误转换
impl From<ConfigError> for DistModelError {
    fn from(err: ConfigError) -> Self {
        DistModelError::Config(err)
    }
}

impl From<MeshLoadError> for DistModelError {
    fn from(err: MeshLoadError) -> Self {
        DistModelError::MeshLoading(err)
    }
}

impl From<ParseError> for MeshLoadError {
    fn from(err: ParseError) -> Self {
        MeshLoadError::Source(err)
    }
}

impl From<ParseError> for DistModelError {
    fn from(err: ParseError) -> Self {
        DistModelError::MeshLoading(MeshLoadError::Source(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display_names_line() {
        let err = ParseError::at_line(
            7,
            ParseErrorKind::IndexOutOfRange {
                table: Table::Uv,
                index: 3,
                len: 2,
            },
        );
        assert_eq!(
            err.to_string(),
            "line 7: uv index 3 out of range (table has 2 entries)"
        );
    }

    #[test]
    fn test_parse_error_with_path() {
        let err = ParseError::at_token(4, ParseErrorKind::InvalidNumber("x".into()))
            .with_path("models/cube.txt");
        let message = err.to_string();
        assert!(message.contains("models/cube.txt"));
        assert!(message.contains("token 4"));
    }

    #[test]
    fn test_error_conversion_chain() {
        let err: DistModelError =
            ParseError::new(Location::EndOfInput, ParseErrorKind::MissingTriangleCount).into();
        assert!(matches!(
            err,
            DistModelError::MeshLoading(MeshLoadError::Source(_))
        ));
        assert!(std::error::Error::source(&err).is_some());
    }
}

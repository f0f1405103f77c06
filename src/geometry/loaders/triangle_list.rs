/// 三角形列表加载器
///
/// 文件格式（空白分隔的 ASCII）：
///
/// ```text
/// 1
/// 0 0 0
/// 1 0 0
/// 0 1 0
/// ```
///
/// 第一个记号是三角形数量 `T`，之后正好是 `T × 3 × 3` 个浮点数，
/// 即 `T × 3` 个顶点的位置。文件中没有法线、UV 或颜色，这些在组装阶段生成。
use super::{Geometry, GeometryLoader};
use crate::core::error::{Location, ParseError, ParseErrorKind};
use crate::geometry::mesh::VERTICES_PER_FACE;

/// 位置分量数
const POSITION_COMPONENTS: usize = 3;

/// 预分配上限，防止错误的三角形数量导致巨大的分配
const MAX_PREALLOCATED_VERTICES: usize = 1 << 20;

/// 解析后的三角形列表
///
/// 每 3 个连续位置组成一个三角形，顺序与文件一致。
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleList {
    positions: Vec<[f32; 3]>,
}

impl TriangleList {
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / VERTICES_PER_FACE
    }

    #[inline]
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// 按三角形迭代
    pub fn triangles(&self) -> impl Iterator<Item = &[[f32; 3]]> {
        self.positions.chunks_exact(VERTICES_PER_FACE)
    }
}

/// 三角形列表格式加载器
pub struct TriangleListLoader;

impl TriangleListLoader {
    /// 解析三角形列表文本
    pub fn parse(source: &str) -> Result<TriangleList, ParseError> {
        let mut tokens = source.split_whitespace().enumerate();

        let (_, count_token) = tokens.next().ok_or_else(|| {
            ParseError::new(Location::EndOfInput, ParseErrorKind::MissingTriangleCount)
        })?;

        let invalid_count = || {
            ParseError::at_token(1, ParseErrorKind::InvalidTriangleCount(count_token.to_string()))
        };
        let triangle_count: usize = count_token.parse().map_err(|_| invalid_count())?;
        let vertex_count = triangle_count
            .checked_mul(VERTICES_PER_FACE)
            .ok_or_else(invalid_count)?;
        let expected = vertex_count
            .checked_mul(POSITION_COMPONENTS)
            .ok_or_else(invalid_count)?;

        let mut positions = Vec::with_capacity(vertex_count.min(MAX_PREALLOCATED_VERTICES));
        let mut found = 0;
        for _ in 0..vertex_count {
            let mut position = [0.0f32; 3];
            for component in position.iter_mut() {
                let (index, token) = tokens.next().ok_or_else(|| {
                    ParseError::new(
                        Location::EndOfInput,
                        ParseErrorKind::UnexpectedEnd { expected, found },
                    )
                })?;
                *component = token.parse().map_err(|_| {
                    ParseError::at_token(index + 1, ParseErrorKind::InvalidNumber(token.to_string()))
                })?;
                found += 1;
            }
            positions.push(position);
        }

        if let Some((index, token)) = tokens.next() {
            return Err(ParseError::at_token(
                index + 1,
                ParseErrorKind::TrailingData(token.to_string()),
            ));
        }

        tracing::debug!(triangles = triangle_count, "Parsed triangle list");
        Ok(TriangleList { positions })
    }
}

impl GeometryLoader for TriangleListLoader {
    fn parse_str(&self, source: &str) -> Result<Geometry, ParseError> {
        Self::parse(source).map(Geometry::TriangleList)
    }

    fn supported_extensions(&self) -> &'static [&'static str] {
        &["txt", "tri"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_triangle_across_lines() {
        let list = TriangleListLoader::parse("1 \n 0 0 0 \n 1 0 0 \n 0 1 0").unwrap();

        assert_eq!(list.triangle_count(), 1);
        assert_eq!(
            list.positions(),
            &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]
        );
    }

    #[test]
    fn test_parse_two_triangles_keeps_order() {
        let source = "2\n0 0 0 1 0 0 0 1 0\n5 5 5 6 5 5 5 6 5.5\n";
        let list = TriangleListLoader::parse(source).unwrap();

        assert_eq!(list.triangle_count(), 2);
        let triangles: Vec<_> = list.triangles().collect();
        assert_eq!(triangles[1][2], [5.0, 6.0, 5.5]);
    }

    #[test]
    fn test_zero_triangles() {
        let list = TriangleListLoader::parse("0\n").unwrap();
        assert_eq!(list.triangle_count(), 0);
    }

    #[test]
    fn test_empty_source() {
        let err = TriangleListLoader::parse("  \n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingTriangleCount);
    }

    #[test]
    fn test_invalid_count() {
        let err = TriangleListLoader::parse("-1 0 0 0").unwrap_err();
        assert_eq!(err.location, Location::Token(1));
        assert!(matches!(err.kind, ParseErrorKind::InvalidTriangleCount(_)));

        assert!(TriangleListLoader::parse("1.5 0 0 0").is_err());
    }

    #[test]
    fn test_short_stream() {
        let err = TriangleListLoader::parse("1 0 0 0 1 0 0 0 1").unwrap_err();
        assert_eq!(err.location, Location::EndOfInput);
        assert_eq!(
            err.kind,
            ParseErrorKind::UnexpectedEnd {
                expected: 9,
                found: 8
            }
        );
    }

    #[test]
    fn test_declared_count_does_not_match_data() {
        assert!(TriangleListLoader::parse("1 0 0 0 1 0 0 0 0 1 0").is_err());
        assert!(TriangleListLoader::parse("2 0 0 0 1 0 0 0 1 0").is_err());
    }

    #[test]
    fn test_trailing_data() {
        let err = TriangleListLoader::parse("1 0 0 0 1 0 0 0 1 0 7").unwrap_err();
        assert_eq!(err.location, Location::Token(11));
        assert_eq!(err.kind, ParseErrorKind::TrailingData("7".to_string()));
    }

    #[test]
    fn test_malformed_number() {
        let err = TriangleListLoader::parse("1 0 0 0 1 x 0 0 1 0").unwrap_err();
        assert_eq!(err.location, Location::Token(6));
        assert_eq!(err.kind, ParseErrorKind::InvalidNumber("x".to_string()));
    }

    #[test]
    fn test_huge_count_does_not_preallocate() {
        let err = TriangleListLoader::parse("99999999999 0 0 0").unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::UnexpectedEnd { .. }));
    }
}

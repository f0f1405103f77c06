/// 顶点缓冲的文本转储
///
/// 用于调试和黄金文件测试。每个顶点一行，属性按布局顺序分组：
///
/// ```text
/// [   0.0000000,    0.0000000,    0.0000000] [   0.0000000,    0.0000000,    1.0000000]
/// [   1.0000000,    0.0000000,    0.0000000] [   0.0000000,    0.0000000,    1.0000000]
/// [   0.0000000,    1.0000000,    0.0000000] [   0.0000000,    0.0000000,    1.0000000]
/// 1 3 72
/// ```
///
/// 最后一行是 `三角形数 顶点数 字节数`。转储只在小数精度上有损。
use super::mesh::VertexBuffer;
use crate::core::error::{Location, ParseError, ParseErrorKind};
use std::fmt::{self, Write};

/// 每个分量的宽度
const SCALAR_WIDTH: usize = 12;

/// 小数位数
const SCALAR_PRECISION: usize = 7;

/// 把缓冲写成转储文本
pub fn write_dump<W: Write>(out: &mut W, buffer: &VertexBuffer) -> fmt::Result {
    let layout = buffer.layout();

    for vertex in buffer.vertices() {
        for (i, attribute) in layout.attributes().iter().enumerate() {
            if i > 0 {
                out.write_char(' ')?;
            }
            out.write_char('[')?;
            let values = &vertex[attribute.offset..attribute.offset + attribute.components];
            for (j, value) in values.iter().enumerate() {
                if j > 0 {
                    out.write_str(", ")?;
                }
                write!(out, "{:>width$.prec$}", value, width = SCALAR_WIDTH, prec = SCALAR_PRECISION)?;
            }
            out.write_char(']')?;
        }
        out.write_char('\n')?;
    }

    write!(
        out,
        "{} {} {}",
        buffer.triangle_count(),
        buffer.vertex_count(),
        buffer.byte_size()
    )
}

/// 转储为字符串
pub fn dump(buffer: &VertexBuffer) -> String {
    let mut text = String::new();
    // 写入 String 不会失败
    let _ = write_dump(&mut text, buffer);
    text
}

/// 读回转储中的数值部分（除最后一行外的全部分量）
pub fn parse_payload(text: &str) -> Result<Vec<f32>, ParseError> {
    let lines: Vec<&str> = text.lines().collect();
    let payload = match lines.split_last() {
        Some((_, payload)) => payload,
        None => return Ok(Vec::new()),
    };

    let mut values = Vec::new();
    for (index, line) in payload.iter().enumerate() {
        let cleaned = line.replace(['[', ']', ','], " ");
        for token in cleaned.split_whitespace() {
            let value = token.parse().map_err(|_| {
                ParseError::at_line(index + 1, ParseErrorKind::InvalidNumber(token.to_string()))
            })?;
            values.push(value);
        }
    }

    Ok(values)
}

/// 读回转储的最后一行：`(三角形数, 顶点数, 字节数)`
pub fn parse_trailer(text: &str) -> Result<(usize, usize, usize), ParseError> {
    let line_count = text.lines().count();
    let trailer = text.lines().last().ok_or_else(|| {
        ParseError::new(
            Location::EndOfInput,
            ParseErrorKind::UnexpectedEnd {
                expected: 3,
                found: 0,
            },
        )
    })?;

    let numbers = trailer
        .split_whitespace()
        .map(|token| {
            token.parse::<usize>().map_err(|_| {
                ParseError::at_line(line_count, ParseErrorKind::InvalidNumber(token.to_string()))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    match numbers[..] {
        [triangles, vertices, bytes] => Ok((triangles, vertices, bytes)),
        _ => Err(ParseError::at_line(
            line_count,
            ParseErrorKind::UnexpectedEnd {
                expected: 3,
                found: numbers.len(),
            },
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::model::{LoadOptions, Model};
    use crate::geometry::vertex::{Grammar, VertexFormat};
    use crate::math::Color;

    fn triangle_model() -> Model {
        let options = LoadOptions::new(VertexFormat::new(Grammar::TriangleList));
        Model::from_source("triangle", "1 \n 0 0 0 \n 1 0 0 \n 0 1 0", &options).unwrap()
    }

    #[test]
    fn test_dump_format() {
        let text = triangle_model().to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[1],
            "[   1.0000000,    0.0000000,    0.0000000] [   0.0000000,    0.0000000,    1.0000000]"
        );
        assert_eq!(lines[3], "1 3 72");
    }

    #[test]
    fn test_dump_groups_uv_in_pairs() {
        let source = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0.25 0.75\nvn 0 0 1\nf 1/1/1 2/1/1 3/1/1\n";
        let options = LoadOptions::new(VertexFormat::new(Grammar::ObjPositionUvNormal));
        let model = Model::from_source("uv", source, &options).unwrap();

        let first = model.to_string().lines().next().unwrap().to_string();
        assert!(first.ends_with("[   0.2500000,    0.7500000]"));
        assert_eq!(first.matches('[').count(), 3);
    }

    #[test]
    fn test_payload_roundtrip() {
        let options = LoadOptions::new(VertexFormat::new(Grammar::TriangleList).with_vertex_color())
            .with_color(Color::rgb(1.0, 0.5, 0.31));
        let source = "2\n0.125 -3.5 7 1 0 0 0 1 0\n-1.5 2.25 0.333 4 4 4 1 9 2\n";
        let model = Model::from_source("pair", source, &options).unwrap();

        let text = dump(model.buffer());
        let values = parse_payload(&text).unwrap();

        assert_eq!(values.len(), model.vertices().len());
        for (parsed, original) in values.iter().zip(model.vertices()) {
            assert!((parsed - original).abs() < 1e-6, "{} != {}", parsed, original);
        }
        assert_eq!(
            parse_trailer(&text).unwrap(),
            (model.triangle_count(), model.vertex_count(), model.byte_size())
        );
    }

    #[test]
    fn test_dump_of_degenerate_triangle_roundtrips_nan() {
        let options = LoadOptions::new(VertexFormat::new(Grammar::TriangleList));
        let model = Model::from_source("flat", "1 0 0 0 1 1 1 2 2 2", &options).unwrap();

        let values = parse_payload(&model.to_string()).unwrap();
        assert!(values[3].is_nan());
    }

    #[test]
    fn test_empty_model_dump() {
        let options = LoadOptions::new(VertexFormat::new(Grammar::TriangleList));
        let model = Model::from_source("empty", "0", &options).unwrap();

        let text = model.to_string();
        assert_eq!(text, "0 0 0");
        assert!(parse_payload(&text).unwrap().is_empty());
        assert_eq!(parse_trailer(&text).unwrap(), (0, 0, 0));
    }

    #[test]
    fn test_parse_payload_rejects_garbage() {
        assert!(parse_payload("[   1.0000000, oops]\n1 3 72").is_err());
        assert!(parse_trailer("1 3").is_err());
    }
}

/// 源文件读取
///
/// 把整个几何文件读入内存，不做任何转换。文件句柄在返回前关闭，解析阶段不再持有任何外部资源。

use crate::core::error::MeshLoadError;
use std::path::Path;

/// 读取整个文件为文本
///
/// # 错误
///
/// - `MeshLoadError::FileNotFound`：路径不存在
/// - `MeshLoadError::Io`：文件无法完整读取（权限、非 UTF-8 内容等）
pub fn read_all(path: &Path) -> Result<String, MeshLoadError> {
    if !path.exists() {
        return Err(MeshLoadError::FileNotFound(path.to_path_buf()));
    }

    let text = std::fs::read_to_string(path).map_err(|source| MeshLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), bytes = text.len(), "Read geometry source");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "dist_model_source_{}_{}",
            std::process::id(),
            name
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_read_all_returns_contents_verbatim() {
        let contents = "1 \n 0 0 0 \n 1 0 0 \n 0 1 0\r\n";
        let path = temp_file("verbatim.txt", contents.as_bytes());

        let text = read_all(&path).unwrap();
        assert_eq!(text, contents);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_all(Path::new("nonexistent/model.obj"));
        assert!(matches!(result, Err(MeshLoadError::FileNotFound(_))));
    }

    #[test]
    fn test_read_invalid_utf8() {
        let path = temp_file("binary.obj", &[0x76, 0x20, 0xff, 0xfe, 0x0a]);

        let result = read_all(&path);
        assert!(matches!(result, Err(MeshLoadError::Io { .. })));

        std::fs::remove_file(path).ok();
    }
}

//! 输出写入服务 - 业务能力层
//!
//! 先写入同目录下的临时文件，成功后再重命名到目标路径；失败时目标路径保持原样

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{AppError, AppResult};

/// 输出写入服务
pub struct OutputWriter {
    output_path: PathBuf,
}

impl OutputWriter {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// 原子地写入完整文档
    pub async fn write(&self, bytes: Vec<u8>) -> AppResult<()> {
        let path = self.output_path.clone();
        debug!("写入 {} 字节到 {}", bytes.len(), path.display());

        let result = tokio::task::spawn_blocking({
            let path = path.clone();
            move || persist_atomically(&path, &bytes)
        })
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
        .and_then(|inner| inner);

        result.map_err(|source| AppError::Output { path, source })
    }
}

fn persist_atomically(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    // 临时文件在 drop 时自动删除
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_creates_file_and_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("score.pdf");

        OutputWriter::new(&path).write(b"%PDF-1.7".to_vec()).await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.7");
        // 只留下目标文件，没有残留临时文件
        let entries = std::fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[tokio::test]
    async fn test_write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("score.pdf");
        std::fs::write(&path, b"old").unwrap();

        OutputWriter::new(&path).write(b"new".to_vec()).await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"new");
    }

    #[tokio::test]
    async fn test_write_into_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();

        let err = OutputWriter::new(blocker.join("score.pdf"))
            .write(b"x".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Output { .. }));
    }
}

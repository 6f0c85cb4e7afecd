use crate::cli::{CollisionPolicy, PdfQuality};
use crate::error::{ConvertError, Result};
use std::path::{Path, PathBuf};

/// 一括変換の設定
///
/// ルートフォルダは構築時に渡す。設定ファイルや環境変数は読まない。
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    pub root: PathBuf,
    pub pdf_quality: PdfQuality,
    pub collision: CollisionPolicy,
    pub show_progress: bool,
}

impl ConverterConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            pdf_quality: PdfQuality::default(),
            collision: CollisionPolicy::default(),
            show_progress: false,
        }
    }

    pub fn with_pdf_quality(mut self, quality: PdfQuality) -> Self {
        self.pdf_quality = quality;
        self
    }

    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision = policy;
        self
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// ルートフォルダの存在確認（I/Oを始める前に呼ぶ）
    pub fn validate(&self) -> Result<()> {
        validate_root(&self.root)
    }
}

fn validate_root(root: &Path) -> Result<()> {
    if !root.exists() {
        return Err(ConvertError::FolderNotFound(root.display().to_string()));
    }
    if !root.is_dir() {
        return Err(ConvertError::NotADirectory(root.display().to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConverterConfig::new("/tmp/whatever");
        assert_eq!(config.pdf_quality, PdfQuality::Medium);
        assert_eq!(config.collision, CollisionPolicy::Overwrite);
        assert!(!config.show_progress);
    }

    #[test]
    fn test_validate_missing_root() {
        let config = ConverterConfig::new("/nonexistent/folder/12345");
        assert!(matches!(config.validate(), Err(ConvertError::FolderNotFound(_))));
    }

    #[test]
    fn test_validate_file_as_root() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("note.txt");
        std::fs::write(&file, "x").unwrap();

        let config = ConverterConfig::new(&file);
        assert!(matches!(config.validate(), Err(ConvertError::NotADirectory(_))));
    }
}

pub mod layout;
pub mod pdf;

use crate::cli::{CollisionPolicy, PdfQuality};
use crate::error::{ConvertError, Result};
use crate::report::{DocumentReport, ItemOutcome, ItemReport};
use crate::scanner;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// 出力PDFの拡張子
pub const DOCUMENT_EXTENSION: &str = "pdf";

/// 出力PDFか判定（大文字小文字を区別しない）
pub fn is_document_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(DOCUMENT_EXTENSION))
        .unwrap_or(false)
}

/// 1回の実行中に書き出したPDFを覚えておき、衝突時の扱いを決める
#[derive(Debug)]
pub struct OutputPlanner {
    root: PathBuf,
    policy: CollisionPolicy,
    written: HashSet<PathBuf>,
}

impl OutputPlanner {
    pub fn new(root: &Path, policy: CollisionPolicy) -> Self {
        Self {
            root: root.to_path_buf(),
            policy,
            written: HashSet::new(),
        }
    }

    /// PDF名から書き出し先を決める
    ///
    /// - overwrite: そのまま（既存ファイルは上書き）
    /// - rename: 空くまで `_2`, `_3` ... を付ける
    /// - fail: 既に存在すれば `OutputExists`
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        let candidate = self.path_for(name);

        match self.policy {
            CollisionPolicy::Overwrite => {
                if self.is_taken(&candidate) {
                    tracing::debug!("上書き: {}", candidate.display());
                }
                Ok(candidate)
            }
            CollisionPolicy::Fail => {
                if self.is_taken(&candidate) {
                    Err(ConvertError::OutputExists(candidate.display().to_string()))
                } else {
                    Ok(candidate)
                }
            }
            CollisionPolicy::Rename => {
                let mut path = candidate;
                let mut n = 2;
                while self.is_taken(&path) {
                    path = self.path_for(&format!("{}_{}", name, n));
                    n += 1;
                }
                Ok(path)
            }
        }
    }

    pub fn mark_written(&mut self, path: &Path) {
        self.written.insert(path.to_path_buf());
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.{}", name, DOCUMENT_EXTENSION))
    }

    fn is_taken(&self, path: &Path) -> bool {
        self.written.contains(path) || path.exists()
    }
}

/// フォルダ直下の画像から1つのPDFを作ってルートに書き出す
///
/// 画像単位の失敗はスキップして続行する。全画像が失敗しても0ページのPDFを書き出す。
pub fn export_folder(
    root: &Path,
    folder: &Path,
    planner: &mut OutputPlanner,
    quality: PdfQuality,
) -> DocumentReport {
    let name = scanner::document_name(root, folder);

    let output = match planner.resolve(&name) {
        Ok(path) => path,
        Err(e) => {
            tracing::warn!("PDFを書き出しません: {} ({})", folder.display(), e);
            return DocumentReport {
                folder: folder.to_path_buf(),
                output: root.join(format!("{}.{}", name, DOCUMENT_EXTENSION)),
                pages: 0,
                images: Vec::new(),
                outcome: ItemOutcome::skipped(e),
            };
        }
    };

    let images = match scanner::list_images(folder) {
        Ok(images) => images,
        Err(e) => {
            tracing::warn!("フォルダを読めません: {} ({})", folder.display(), e);
            Vec::new()
        }
    };

    let mut builder = pdf::PdfBuilder::new(&name, quality);
    let mut image_reports = Vec::with_capacity(images.len());

    for image_path in &images {
        match builder.add_image(image_path) {
            Ok(()) => {
                tracing::debug!("ページ追加: {}", image_path.display());
                image_reports.push(ItemReport::done(image_path));
            }
            Err(e) => {
                let file_name = image_path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                tracing::warn!("画像をスキップ: {} ({})", image_path.display(), e);
                println!("  ⚠️ {} をスキップ: {}", file_name, e);
                image_reports.push(ItemReport::skipped(image_path, &e));
            }
        }
    }

    let pages = builder.page_count();
    let outcome = match builder.save(&output) {
        Ok(()) => {
            planner.mark_written(&output);
            ItemOutcome::Done
        }
        Err(e) => {
            tracing::warn!("PDF保存エラー: {} ({})", output.display(), e);
            ItemOutcome::skipped(e)
        }
    };

    DocumentReport {
        folder: folder.to_path_buf(),
        output,
        pages,
        images: image_reports,
        outcome,
    }
}

//! 一括変換
//!
//! ## 処理フロー
//! 1. ZIP展開（展開後にZIPを削除）
//! 2. 画像を含むフォルダの検出
//! 3. フォルダごとにPDFを生成してルートへ出力
//! 4. PDF以外のファイルとサブフォルダを削除
//!
//! 各フェーズ内の失敗は項目単位でスキップし、フェーズの順序は変わらない。

use crate::config::ConverterConfig;
use crate::error::Result;
use crate::export::{self, OutputPlanner};
use crate::report::RunSummary;
use crate::{archive, cleanup, scanner};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

#[derive(Debug)]
pub struct BatchConverter {
    config: ConverterConfig,
}

impl BatchConverter {
    /// ルートフォルダが存在しなければ、ファイル操作を始める前にここで失敗する
    pub fn new(config: ConverterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn root(&self) -> &Path {
        &self.config.root
    }

    /// 4フェーズをすべて実行する。開始後はエラーを返さない
    pub fn convert(&self) -> RunSummary {
        let root = self.root();
        let mut summary = RunSummary::new(root);

        // 1. ZIP展開
        println!("[1/4] ZIPファイルを展開中...");
        summary.archives = archive::expand_archives(root);
        println!("✔ {}件のZIPを展開\n", summary.archives_expanded());

        // 2. フォルダ検出（展開がすべて終わってから）
        println!("[2/4] 画像フォルダを検索中...");
        let folders = scanner::find_image_folders(root);
        let total = folders.len();
        println!("✔ {}件のフォルダで画像を検出\n", total);

        // 3. PDF生成
        println!("[3/4] PDFを生成中... (品質: {})", self.config.pdf_quality);
        let progress = self.progress_bar(total as u64);
        let mut planner = OutputPlanner::new(root, self.config.collision);

        for (idx, folder) in folders.iter().enumerate() {
            let name = scanner::document_name(root, folder);
            let line = format!("[{}/{}] ➜ {}.{}", idx + 1, total, name, export::DOCUMENT_EXTENSION);
            if progress.is_hidden() {
                println!("{}", line);
            } else {
                progress.println(line);
            }
            progress.set_message(name);

            let report = export::export_folder(root, folder, &mut planner, self.config.pdf_quality);
            tracing::debug!(
                "{} → {} ({}ページ, スキップ{}枚)",
                folder.display(),
                report.output.display(),
                report.pages,
                report.skipped_images()
            );
            summary.documents.push(report);
            progress.inc(1);
        }
        progress.finish_and_clear();
        println!("✔ {}件のPDFを出力\n", summary.documents_written());

        // 4. 後片付け
        println!("[4/4] PDF以外を削除中...");
        summary.cleanup = cleanup::sweep(root);
        println!(
            "✔ ファイル{}件・フォルダ{}件を削除",
            summary.cleanup.removed_files, summary.cleanup.removed_dirs
        );

        summary.finish();
        summary
    }

    fn progress_bar(&self, total: u64) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let bar = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}") {
            bar.set_style(style);
        }
        bar
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;

    #[test]
    fn test_new_fails_for_missing_root() {
        let result = BatchConverter::new(ConverterConfig::new("/nonexistent/path/12345"));
        assert!(matches!(result, Err(ConvertError::FolderNotFound(_))));
    }

    #[test]
    fn test_convert_empty_root() {
        let dir = tempfile::tempdir().unwrap();
        let converter = BatchConverter::new(ConverterConfig::new(dir.path())).unwrap();

        let summary = converter.convert();
        assert!(summary.archives.is_empty());
        assert!(summary.documents.is_empty());
        assert!(summary.finished_at.is_some());
        assert!(dir.path().exists());
    }
}

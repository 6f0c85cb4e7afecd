//! 実行結果モジュール
//!
//! 各フェーズの項目単位の結果（成功/スキップ）を集約する。
//! 失敗しても処理全体は止めず、ここに理由を残す。

use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::PathBuf;

/// 1項目（ZIP、画像、PDF、削除対象）の処理結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ItemOutcome {
    Done,
    Skipped { reason: String },
}

impl ItemOutcome {
    pub fn skipped(reason: impl std::fmt::Display) -> Self {
        ItemOutcome::Skipped {
            reason: reason.to_string(),
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, ItemOutcome::Done)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemReport {
    pub path: PathBuf,
    pub outcome: ItemOutcome,
}

impl ItemReport {
    pub fn done(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            outcome: ItemOutcome::Done,
        }
    }

    pub fn skipped(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        Self {
            path: path.into(),
            outcome: ItemOutcome::skipped(reason),
        }
    }
}

/// フォルダ1つ分のPDF生成結果
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReport {
    pub folder: PathBuf,
    /// 実際に書き出したパス（衝突時はリネーム後）
    pub output: PathBuf,
    pub pages: usize,
    pub images: Vec<ItemReport>,
    pub outcome: ItemOutcome,
}

impl DocumentReport {
    pub fn skipped_images(&self) -> usize {
        self.images.iter().filter(|i| !i.outcome.is_done()).count()
    }
}

/// 後片付けの結果
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupReport {
    pub removed_files: usize,
    pub removed_dirs: usize,
    /// 削除できなかった項目のみ
    pub failures: Vec<ItemReport>,
}

/// 1回の一括変換の結果
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub root: PathBuf,
    pub started_at: DateTime<Local>,
    pub finished_at: Option<DateTime<Local>>,
    pub archives: Vec<ItemReport>,
    pub documents: Vec<DocumentReport>,
    pub cleanup: CleanupReport,
}

impl RunSummary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            started_at: Local::now(),
            finished_at: None,
            archives: Vec::new(),
            documents: Vec::new(),
            cleanup: CleanupReport::default(),
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Local::now());
    }

    pub fn archives_expanded(&self) -> usize {
        self.archives.iter().filter(|a| a.outcome.is_done()).count()
    }

    pub fn documents_written(&self) -> usize {
        self.documents.iter().filter(|d| d.outcome.is_done()).count()
    }

    /// スキップされた項目の総数（ZIP・画像・PDF・削除失敗）
    pub fn skipped_count(&self) -> usize {
        let archives = self.archives.len() - self.archives_expanded();
        let images: usize = self.documents.iter().map(|d| d.skipped_images()).sum();
        let documents = self.documents.len() - self.documents_written();
        archives + images + documents + self.cleanup.failures.len()
    }

    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

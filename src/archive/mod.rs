//! ZIP展開モジュール
//!
//! ルート以下のZIPをその場で展開し、展開に成功したZIPは削除する。
//! 走査と展開を分け、1回の走査中に展開結果が見えることはない。
//! ZIP内のZIPは次のラウンドで展開する。

use crate::error::Result;
use crate::report::ItemReport;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const ARCHIVE_EXTENSIONS: &[&str] = &["zip"];

/// 入れ子ZIPの展開ラウンド上限
pub const MAX_ROUNDS: usize = 16;

/// 拡張子（大文字小文字を区別しない）でZIPか判定
pub fn is_archive_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| ARCHIVE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// ルート以下のZIPファイルを走査順（ファイル名順）で列挙
pub fn find_archives(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_archive_path(e.path()))
        .map(|e| e.into_path())
        .collect()
}

/// ルート以下のZIPをすべて展開して削除する
///
/// 失敗したZIPは残したまま次へ進み、同じ実行中に再試行しない。
pub fn expand_archives(root: &Path) -> Vec<ItemReport> {
    let mut reports = Vec::new();
    let mut failed: HashSet<PathBuf> = HashSet::new();

    for round in 1..=MAX_ROUNDS {
        let pending: Vec<PathBuf> = find_archives(root)
            .into_iter()
            .filter(|p| !failed.contains(p))
            .collect();

        if pending.is_empty() {
            return reports;
        }

        tracing::debug!("展開ラウンド {}: {}件", round, pending.len());

        for archive in pending {
            let relative = archive.strip_prefix(root).unwrap_or(&archive).to_path_buf();
            match extract_and_remove(&archive) {
                Ok(count) => {
                    println!("📦 展開して削除: {} ({}件)", relative.display(), count);
                    reports.push(ItemReport::done(archive));
                }
                Err(e) => {
                    tracing::warn!("ZIP展開エラー: {} ({})", archive.display(), e);
                    println!("⚠️ 展開に失敗: {} ({})", relative.display(), e);
                    reports.push(ItemReport::skipped(&archive, &e));
                    failed.insert(archive);
                }
            }
        }
    }

    let leftover = find_archives(root)
        .into_iter()
        .filter(|p| !failed.contains(p))
        .count();
    if leftover > 0 {
        tracing::warn!(
            "展開ラウンド上限({})に達しました。未展開のZIP: {}件",
            MAX_ROUNDS,
            leftover
        );
    }

    reports
}

/// ZIPを同じフォルダへ展開し、成功したらZIPを削除する
///
/// 戻り値は書き出したファイル数。途中で失敗した場合、展開済みのファイルは残る。
pub fn extract_and_remove(archive_path: &Path) -> Result<usize> {
    let target = archive_path.parent().unwrap_or_else(|| Path::new("."));
    let count = extract_into(archive_path, target)?;
    fs::remove_file(archive_path)?;
    Ok(count)
}

fn extract_into(archive_path: &Path, target: &Path) -> Result<usize> {
    let file = File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(file)?;
    let mut written = 0;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;

        // ルート外へ出るエントリ名（絶対パス、..）は書き出さない
        let Some(relative) = entry.enclosed_name() else {
            tracing::warn!(
                "不正なエントリ名をスキップ: {} ({})",
                entry.name(),
                archive_path.display()
            );
            continue;
        };
        let out_path = target.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&out_path)?;
        io::copy(&mut entry, &mut out)?;
        written += 1;

        tracing::debug!("展開: {}", out_path.display());
    }

    Ok(written)
}

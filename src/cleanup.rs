//! 後片付けモジュール
//!
//! 子→親の順にルート以下を走査し、PDF以外のファイルを削除してから
//! サブフォルダを中身ごと削除する。ルート自身は残す。

use crate::export::is_document_path;
use crate::report::{CleanupReport, ItemReport};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

pub fn sweep(root: &Path) -> CleanupReport {
    let mut report = CleanupReport::default();

    for entry in WalkDir::new(root)
        .contents_first(true)
        .sort_by_file_name()
        .into_iter()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
                tracing::warn!("走査エラー: {}", e);
                report.failures.push(ItemReport::skipped(path, e));
                continue;
            }
        };

        let path = entry.path();

        if entry.file_type().is_dir() {
            if entry.depth() == 0 {
                continue;
            }
            // 削除に失敗したファイルや残ったPDFもまとめて消す
            match fs::remove_dir_all(path) {
                Ok(()) => {
                    report.removed_dirs += 1;
                    tracing::debug!("フォルダ削除: {}", path.display());
                }
                Err(e) => {
                    tracing::warn!("フォルダを削除できません: {} ({})", path.display(), e);
                    println!("⚠️ フォルダを削除できません: {} ({})", path.display(), e);
                    report.failures.push(ItemReport::skipped(path, e));
                }
            }
            continue;
        }

        if is_document_path(path) {
            continue;
        }

        match fs::remove_file(path) {
            Ok(()) => {
                report.removed_files += 1;
                tracing::debug!("ファイル削除: {}", path.display());
            }
            Err(e) => {
                let file_name = entry.file_name().to_string_lossy();
                tracing::warn!("ファイルを削除できません: {} ({})", path.display(), e);
                println!("⚠️ ファイルを削除できません: {} ({})", file_name, e);
                report.failures.push(ItemReport::skipped(path, e));
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sweep_keeps_only_root_pdfs() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("a/deep")).unwrap();
        fs::write(root.join("keep.pdf"), b"%PDF").unwrap();
        fs::write(root.join("KEEP2.PDF"), b"%PDF").unwrap();
        fs::write(root.join("notes.txt"), b"x").unwrap();
        fs::write(root.join("a/1.png"), b"x").unwrap();
        fs::write(root.join("a/inner.pdf"), b"%PDF").unwrap();
        fs::write(root.join("a/deep/2.jpg"), b"x").unwrap();

        let report = sweep(root);

        assert!(report.failures.is_empty());
        assert_eq!(report.removed_files, 3);
        assert_eq!(report.removed_dirs, 2);

        let mut remaining: Vec<_> = fs::read_dir(root)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        remaining.sort();
        assert_eq!(remaining, vec!["KEEP2.PDF", "keep.pdf"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_sweep_records_failures_and_continues() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let root = dir.path();
        let locked = root.join("locked");
        fs::create_dir_all(locked.join("inner")).unwrap();
        fs::write(locked.join("inner/1.png"), b"x").unwrap();
        fs::write(locked.join("stray.txt"), b"x").unwrap();
        fs::write(root.join("other.txt"), b"x").unwrap();
        fs::write(root.join("keep.pdf"), b"%PDF").unwrap();

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

        // rootユーザーなどは読み取り専用フォルダにも書けるので検証できない
        let write_check = locked.join("write_check");
        if fs::write(&write_check, b"x").is_ok() {
            fs::remove_file(&write_check).ok();
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let report = sweep(root);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let failed: Vec<_> = report.failures.iter().map(|f| f.path.clone()).collect();
        assert!(failed.contains(&locked.join("inner")), "失敗が記録されていない: {:?}", failed);
        assert!(failed.contains(&locked.join("stray.txt")), "失敗が記録されていない: {:?}", failed);
        assert!(failed.contains(&locked));
        assert!(report.failures.iter().all(|f| !f.outcome.is_done()));

        // 失敗後も走査は続き、他のファイルは削除される
        assert_eq!(report.removed_files, 2);
        assert!(!locked.join("inner/1.png").exists());
        assert!(!root.join("other.txt").exists());
        assert!(root.join("keep.pdf").exists());
        assert!(locked.join("stray.txt").exists());
    }

    #[test]
    fn test_sweep_empty_root() {
        let dir = tempdir().unwrap();
        let report = sweep(dir.path());
        assert_eq!(report.removed_files, 0);
        assert_eq!(report.removed_dirs, 0);
        assert!(dir.path().exists());
    }
}

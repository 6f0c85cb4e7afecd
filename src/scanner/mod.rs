use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp"];

/// ルート自身のフォルダ名が取れない場合のPDF名
const ROOT_FALLBACK_NAME: &str = "root";

/// 拡張子（大文字小文字を区別しない）で画像か判定
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// フォルダ直下の画像をファイル名の昇順で返す
pub fn list_images(folder: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut images = Vec::new();

    for entry in std::fs::read_dir(folder)? {
        let path = entry?.path();
        if path.is_file() && is_image_path(&path) {
            images.push(path);
        }
    }

    // ファイル名でソート
    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(images)
}

/// 画像を1枚以上直接含むフォルダを列挙（ルートを含む）
///
/// 親フォルダが子フォルダより先に並ぶ（前順走査、同階層はファイル名順）。
pub fn find_image_folders(root: &Path) -> Vec<PathBuf> {
    let mut folders = Vec::new();

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!("走査できない項目をスキップ: {}", err);
                None
            }
        })
    {
        if !entry.file_type().is_dir() {
            continue;
        }

        let has_image = match std::fs::read_dir(entry.path()) {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .any(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false) && is_image_path(&e.path())),
            Err(err) => {
                tracing::warn!("フォルダを読めません: {} ({})", entry.path().display(), err);
                false
            }
        };

        if has_image {
            folders.push(entry.into_path());
        }
    }

    folders
}

/// フォルダのルートからの相対パスを `_` でつないだPDF名（拡張子なし）
///
/// `root/a/b` → `a_b`。ルート自身はルートのフォルダ名を使う。
pub fn document_name(root: &Path, folder: &Path) -> String {
    let relative = folder.strip_prefix(root).unwrap_or(folder);

    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        // "." などはフォルダ名が取れないので正規化してから取る
        let canonical = root.canonicalize().ok();
        return root
            .file_name()
            .or_else(|| canonical.as_deref().and_then(Path::file_name))
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| ROOT_FALLBACK_NAME.to_string());
    }

    parts.join("_")
}

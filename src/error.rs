use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("ディレクトリではありません: {0}")]
    NotADirectory(String),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP展開エラー: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("画像読み込みエラー: {0}")]
    Image(#[from] image::ImageError),

    #[error("PDF生成エラー: {0}")]
    PdfGeneration(String),

    #[error("出力ファイルが既に存在します: {0}")]
    OutputExists(String),

    #[error("JSON出力エラー: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConvertError>;

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "folder-pdf")]
#[command(about = "ZIPを展開し、フォルダごとの画像を1つのPDFにまとめて後片付けする", long_about = None)]
pub struct Cli {
    /// 処理対象のルートフォルダ
    #[arg(required = true)]
    pub folder: PathBuf,

    /// PDF画像品質 (high/medium/low)
    #[arg(long, default_value = "medium")]
    pub pdf_quality: PdfQuality,

    /// 出力PDF名が衝突した場合の扱い (overwrite/rename/fail)
    #[arg(long, default_value = "overwrite")]
    pub on_collision: CollisionPolicy,

    /// 実行結果をJSONで保存
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// プログレスバーを表示しない
    #[arg(long)]
    pub no_progress: bool,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// PDF画像品質設定（中間JPEGの品質）
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PdfQuality {
    /// 高品質: 90%
    High,
    /// 中品質: 75%（デフォルト）
    #[default]
    Medium,
    /// 低品質: 60%
    Low,
}

impl PdfQuality {
    /// JPEG品質 (0-100)
    pub fn jpeg_quality(&self) -> u8 {
        match self {
            PdfQuality::High => 90,
            PdfQuality::Medium => 75,
            PdfQuality::Low => 60,
        }
    }
}

impl std::str::FromStr for PdfQuality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" | "h" => Ok(PdfQuality::High),
            "medium" | "med" | "m" => Ok(PdfQuality::Medium),
            "low" | "l" => Ok(PdfQuality::Low),
            _ => Err(format!("Unknown quality: {}. Use high, medium, or low", s)),
        }
    }
}

impl std::fmt::Display for PdfQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PdfQuality::High => write!(f, "high"),
            PdfQuality::Medium => write!(f, "medium"),
            PdfQuality::Low => write!(f, "low"),
        }
    }
}

/// 出力PDF名の衝突時の扱い
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// 警告なしで上書き（デフォルト）
    #[default]
    Overwrite,
    /// `_2`, `_3` ... を付けて別名で保存
    Rename,
    /// 保存せずスキップ
    Fail,
}

impl std::str::FromStr for CollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "overwrite" => Ok(CollisionPolicy::Overwrite),
            "rename" => Ok(CollisionPolicy::Rename),
            "fail" | "skip" => Ok(CollisionPolicy::Fail),
            _ => Err(format!("Unknown collision policy: {}. Use overwrite, rename, or fail", s)),
        }
    }
}

impl std::fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollisionPolicy::Overwrite => write!(f, "overwrite"),
            CollisionPolicy::Rename => write!(f, "rename"),
            CollisionPolicy::Fail => write!(f, "fail"),
        }
    }
}

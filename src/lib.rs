//! folder-to-pdf
//!
//! ルートフォルダ以下のZIPを展開し、画像をフォルダ単位で1つのPDFにまとめて
//! ルートへ出力する。最後にPDF以外のファイルとサブフォルダを削除する。

pub mod archive;
pub mod cleanup;
pub mod cli;
pub mod config;
pub mod converter;
pub mod error;
pub mod export;
pub mod report;
pub mod scanner;

pub use config::ConverterConfig;
pub use converter::BatchConverter;
pub use error::{ConvertError, Result};
pub use report::{ItemOutcome, RunSummary};

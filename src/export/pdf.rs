use super::layout::{ImagePlacement, A4_HEIGHT_MM, A4_WIDTH_MM, IMAGE_DPI};
use crate::cli::PdfQuality;
use crate::error::{ConvertError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, DynamicImage};
use printpdf::{Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, Pt, RawImage, XObjectTransform};
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// 中間JPEGのサフィックス（元のファイル名の後ろに付ける）
const INTERMEDIATE_SUFFIX: &str = ".jpg";

/// 既存ファイルと衝突した場合に試す別名の数
const MAX_INTERMEDIATE_ATTEMPTS: usize = 100;

/// 画像1枚 = 1ページのPDFを組み立てる
pub struct PdfBuilder {
    doc: PdfDocument,
    pages: Vec<PdfPage>,
    quality: PdfQuality,
}

impl PdfBuilder {
    pub fn new(title: &str, quality: PdfQuality) -> Self {
        Self {
            doc: PdfDocument::new(title),
            pages: Vec::new(),
            quality,
        }
    }

    /// 画像を1ページとして追加
    ///
    /// RGB以外はRGBに変換し、元画像の隣に中間JPEGを書き出してから埋め込む。
    /// 中間JPEGは成功・失敗どちらの場合もこの関数を抜ける時点で削除される。
    pub fn add_image(&mut self, image_path: &Path) -> Result<()> {
        let image = image::open(image_path)?;
        let rgb = if image.color() == ColorType::Rgb8 {
            image
        } else {
            DynamicImage::ImageRgb8(image.to_rgb8())
        };

        let intermediate = IntermediateJpeg::create(image_path, &rgb, self.quality.jpeg_quality())?;
        let bytes = fs::read(intermediate.path())?;

        let mut warnings = Vec::new();
        let raw = RawImage::decode_from_bytes(&bytes, &mut warnings)
            .map_err(|e| ConvertError::PdfGeneration(format!("画像埋め込みエラー: {}", e)))?;
        if !warnings.is_empty() {
            tracing::debug!("{}: 埋め込み時の警告 {}件", image_path.display(), warnings.len());
        }

        let placement = ImagePlacement::fit_width(raw.width, raw.height);
        tracing::debug!(
            "{}: {}x{}px → {:.1}x{:.1}pt",
            image_path.display(),
            raw.width,
            raw.height,
            placement.width_pt,
            placement.height_pt
        );
        let image_id = self.doc.add_image(&raw);

        let ops = vec![Op::UseXobject {
            id: image_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(placement.x_pt)),
                translate_y: Some(Pt(placement.y_pt)),
                scale_x: Some(placement.scale),
                scale_y: Some(placement.scale),
                dpi: Some(IMAGE_DPI),
                ..Default::default()
            },
        }];

        self.pages
            .push(PdfPage::new(Mm(A4_WIDTH_MM), Mm(A4_HEIGHT_MM), ops));

        Ok(())
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// PDFを書き出す（ページ0枚でも書き出す）。既存ファイルは上書き
    pub fn save(mut self, output_path: &Path) -> Result<()> {
        let mut warnings = Vec::new();
        let bytes = self
            .doc
            .with_pages(self.pages)
            .save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            tracing::debug!("{}: 保存時の警告 {}件", output_path.display(), warnings.len());
        }

        let file = File::create(output_path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(&bytes)?;
        writer.flush()?;

        Ok(())
    }
}

/// 元画像の隣に置く中間JPEG。スコープを抜けると削除される
///
/// 自分で新規作成したファイルだけを持つ。既存ファイルは上書きも削除もしない。
struct IntermediateJpeg {
    path: PathBuf,
}

impl IntermediateJpeg {
    fn create(source: &Path, image: &DynamicImage, quality: u8) -> Result<Self> {
        let (path, file) = create_new_intermediate(source)?;
        let guard = Self { path };

        let mut writer = BufWriter::new(file);
        image.write_with_encoder(JpegEncoder::new_with_quality(&mut writer, quality))?;
        writer.flush()?;

        Ok(guard)
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for IntermediateJpeg {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("中間ファイルを削除できません: {} ({})", self.path.display(), e);
            }
        }
    }
}

/// `photo.png` → `photo.png.jpg`（attempt >= 1 は `photo.png.1.jpg` ...）
fn intermediate_path(source: &Path, attempt: usize) -> PathBuf {
    let mut name = OsString::from(source.as_os_str());
    if attempt > 0 {
        name.push(format!(".{}", attempt));
    }
    name.push(INTERMEDIATE_SUFFIX);
    PathBuf::from(name)
}

/// まだ存在しない中間ファイル名を選んで新規作成する
fn create_new_intermediate(source: &Path) -> io::Result<(PathBuf, File)> {
    for attempt in 0..MAX_INTERMEDIATE_ATTEMPTS {
        let path = intermediate_path(source, attempt);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                tracing::debug!("中間ファイル名が使用済み: {}", path.display());
            }
            Err(e) => return Err(e),
        }
    }

    Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("中間ファイル名を確保できません: {}", source.display()),
    ))
}

//! ページレイアウト
//!
//! A4縦、左上から (10mm, 10mm) の位置に、幅 = ページ幅 - 左右余白 で画像を置く。
//! 高さは縦横比を保って決まる（ページからはみ出しても縮めない）。

/// A4サイズ（mm）
pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

/// 余白（mm）。画像の配置位置も兼ねる
pub const MARGIN_MM: f32 = 10.0;

/// 画像幅（mm）
pub const IMAGE_WIDTH_MM: f32 = A4_WIDTH_MM - MARGIN_MM * 2.0; // 190mm

/// mm → pt変換 (1mm = 72/25.4 pt ≈ 2.835pt)
pub const MM_TO_PT: f32 = 72.0 / 25.4;

/// 埋め込み画像のDPI。72dpiにすると 1px = 1pt になる
pub const IMAGE_DPI: f32 = 72.0;

/// mm → pt 変換
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * MM_TO_PT
}

/// 1ページ分の画像配置（pt、PDF座標系＝左下原点）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlacement {
    pub x_pt: f32,
    pub y_pt: f32,
    pub width_pt: f32,
    pub height_pt: f32,
    /// IMAGE_DPI基準の拡大率
    pub scale: f32,
}

impl ImagePlacement {
    /// 画像ピクセルサイズから配置を計算
    pub fn fit_width(width_px: usize, height_px: usize) -> Self {
        let width_pt = mm_to_pt(IMAGE_WIDTH_MM);
        let scale = if width_px == 0 {
            1.0
        } else {
            width_pt / width_px as f32
        };
        let height_pt = height_px as f32 * scale;

        // 上端を余白位置に合わせる
        let y_pt = mm_to_pt(A4_HEIGHT_MM - MARGIN_MM) - height_pt;

        Self {
            x_pt: mm_to_pt(MARGIN_MM),
            y_pt,
            width_pt,
            height_pt,
            scale,
        }
    }
}

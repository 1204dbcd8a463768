//=========================================================================
// Text Rasterization
//=========================================================================
//
// Renders a single line of text into an `ImageData` with `fontdue`.
//
// Labels are static, so widgets rasterize once at construction and blit
// the cached image every frame.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{Color, ImageData};
use crate::core::resources::SizedFont;

//=== Public API ==========================================================

/// Rasterizes `text` on one line in `color`.
///
/// The image is exactly as wide as the summed glyph advances and as tall as
/// the font's ascent minus descent. Returns `None` for empty text.
pub fn rasterize_text(font: &SizedFont, text: &str, color: Color) -> Option<ImageData> {
    if text.is_empty() {
        return None;
    }

    let px = font.size();
    let face = font.face();

    let (ascent, descent) = face
        .horizontal_line_metrics(px)
        .map(|m| (m.ascent, m.descent))
        .unwrap_or((px * 0.8, -px * 0.2));

    let glyphs: Vec<_> = text.chars().map(|ch| face.rasterize(ch, px)).collect();

    let advance: f32 = glyphs.iter().map(|(m, _)| m.advance_width).sum();
    let width = advance.ceil().max(1.0) as u32;
    let height = (ascent - descent).ceil().max(1.0) as u32;

    let mut rgba = vec![0u8; (width as usize) * (height as usize) * 4];
    let mut pen_x = 0.0f32;

    for (metrics, coverage) in &glyphs {
        let origin_x = (pen_x + metrics.xmin as f32).round() as i32;
        let origin_y = (ascent - (metrics.height as i32 + metrics.ymin) as f32).round() as i32;

        for row in 0..metrics.height {
            for col in 0..metrics.width {
                let cov = coverage[row * metrics.width + col];
                if cov == 0 {
                    continue;
                }

                let x = origin_x + col as i32;
                let y = origin_y + row as i32;
                if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
                    continue;
                }

                let idx = ((y as usize) * (width as usize) + x as usize) * 4;
                let alpha = ((cov as u16 * color.a as u16) / 255) as u8;

                // Overlapping glyph edges keep the stronger coverage.
                if alpha > rgba[idx + 3] {
                    rgba[idx..idx + 4].copy_from_slice(&[color.r, color.g, color.b, alpha]);
                }
            }
        }

        pen_x += metrics.advance_width;
    }

    ImageData::from_rgba8(width, height, rgba)
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resources::testing::font_dir;
    use crate::core::resources::ResourceCache;

    #[test]
    fn empty_text_has_no_image() {
        let dir = font_dir("ui");
        let cache = ResourceCache::load(dir.path(), 24);
        let font = cache.font_default("ui").unwrap();

        assert!(rasterize_text(&font, "", Color::WHITE).is_none());
    }

    #[test]
    fn label_spans_advances_and_line_height() {
        let dir = font_dir("ui");
        let cache = ResourceCache::load(dir.path(), 24);
        let font = cache.font_default("ui").unwrap();

        let short = rasterize_text(&font, "Go", Color::WHITE).unwrap();
        let long = rasterize_text(&font, "Show image", Color::WHITE).unwrap();

        assert!(short.width() > 0);
        assert!(long.width() > short.width());
        assert_eq!(short.height(), long.height());
        assert!(short.height() >= 12 && short.height() <= 60, "height {}", short.height());
    }

    #[test]
    fn larger_size_gives_larger_label() {
        let dir = font_dir("ui");
        let cache = ResourceCache::load(dir.path(), 24);

        let small = rasterize_text(&cache.font("ui", 12).unwrap(), "Quit", Color::WHITE).unwrap();
        let large = rasterize_text(&cache.font("ui", 48).unwrap(), "Quit", Color::WHITE).unwrap();

        assert!(large.width() > small.width());
        assert!(large.height() > small.height());
    }
}

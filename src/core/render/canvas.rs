//=========================================================================
// Canvas
//=========================================================================
//
// CPU drawing surface backed by a `tiny_skia::Pixmap`.
//
// The platform layer copies `Canvas::pixels()` into the `pixels` frame
// buffer once per tick. Because the canvas is always cleared to an opaque
// color before drawing, its premultiplied bytes equal straight RGBA.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::warn;
use tiny_skia::{FilterQuality, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform};

//=== Internal Dependencies ===============================================

use super::{Color, ImageData, Rect, Surface};

//=== Canvas ==============================================================

/// Owned RGBA frame that implements [`Surface`].
pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    /// Creates a transparent canvas. Returns `None` for a zero-sized frame.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Pixmap::new(width, height).map(|pixmap| Self { pixmap })
    }

    /// Raw RGBA bytes, row-major, `width * height * 4` long.
    pub fn pixels(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Reads one pixel as premultiplied RGBA, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixmap.pixel(x, y).map(|c| [c.red(), c.green(), c.blue(), c.alpha()])
    }

    fn solid_paint(color: Color) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(color.to_skia());
        paint.anti_alias = false;
        paint
    }
}

impl Surface for Canvas {
    fn size(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }

    fn clear(&mut self, color: Color) {
        self.pixmap.fill(color.to_skia());
    }

    fn blit(&mut self, image: &ImageData, x: i32, y: i32) {
        self.pixmap.draw_pixmap(
            x,
            y,
            image.pixmap().as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    fn blit_scaled(&mut self, image: &ImageData, dest: Rect) {
        if image.width() == 0 || image.height() == 0 {
            return;
        }

        let sx = dest.w / image.width() as f32;
        let sy = dest.h / image.height() as f32;
        let transform = Transform::from_row(sx, 0.0, 0.0, sy, dest.x, dest.y);
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };

        self.pixmap
            .draw_pixmap(0, 0, image.pixmap().as_ref(), &paint, transform, None);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(skia_rect) = to_skia_rect(rect) else {
            warn!("Skipping degenerate fill rect {:?}", rect);
            return;
        };

        self.pixmap.fill_rect(
            skia_rect,
            &Self::solid_paint(color),
            Transform::identity(),
            None,
        );
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        let Some(skia_rect) = to_skia_rect(rect) else {
            warn!("Skipping degenerate stroke rect {:?}", rect);
            return;
        };

        let path = PathBuilder::from_rect(skia_rect);
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };

        self.pixmap.stroke_path(
            &path,
            &Self::solid_paint(color),
            &stroke,
            Transform::identity(),
            None,
        );
    }
}

//--- Helpers -------------------------------------------------------------

fn to_skia_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    if rect.w <= 0.0 || rect.h <= 0.0 {
        return None;
    }
    tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.w, rect.h)
}

//=========================================================================
// Unit Tests
//=========================================================================

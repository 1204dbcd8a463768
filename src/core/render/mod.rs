//=========================================================================
// Render
//=========================================================================
//
// Drawing-surface boundary used by the application loop, scenes and
// widgets.
//
// Architecture:
//   Scene::render(&dyn Surface) ──► Canvas (tiny-skia pixmap)
//                                      ↓
//                               Platform presents via `pixels`
//
// The core only needs: clear, blit, blit-scaled, filled rectangle and
// rectangle outline. Presentation is owned by the host.
//
//=========================================================================

//=== Module Declarations =================================================

mod canvas;
pub mod text;

//=== Public API ==========================================================

pub use canvas::Canvas;

//=== External Dependencies ===============================================

use tiny_skia::Pixmap;

//=== Color ===============================================================

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub(crate) fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

//=== Rect ================================================================

/// Axis-aligned rectangle in surface pixels (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Builds a rectangle of size `(w, h)` centered on `(cx, cy)`.
    pub fn from_center(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        Self::new(cx - w / 2.0, cy - h / 2.0, w, h)
    }

    /// Center point of the rectangle.
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Point-in-rect test. The right and bottom edges are exclusive.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }
}

//=== ImageData ===========================================================

/// A decoded image surface ready to be blitted.
///
/// Pixels are stored premultiplied in a `tiny_skia::Pixmap`, the same
/// layout the [`Canvas`] draws into, so blits never convert formats.
#[derive(Debug, Clone)]
pub struct ImageData {
    pixmap: Pixmap,
}

impl ImageData {
    /// Builds an image from straight (non-premultiplied) RGBA8 pixels.
    ///
    /// Returns `None` when the dimensions are zero or do not match the
    /// buffer length.
    pub fn from_rgba8(width: u32, height: u32, mut rgba: Vec<u8>) -> Option<Self> {
        if rgba.len() != (width as usize) * (height as usize) * 4 {
            return None;
        }

        for px in rgba.chunks_exact_mut(4) {
            let a = px[3] as u16;
            px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
            px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
            px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
        }

        let size = tiny_skia::IntSize::from_wh(width, height)?;
        Pixmap::from_vec(rgba, size).map(|pixmap| Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub(crate) fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}

//=== Surface Trait =======================================================

/// Host-provided 2D drawing surface.
///
/// Scenes and widgets only ever draw through this trait; the application
/// loop owns the concrete surface and presents it after each tick.
pub trait Surface {
    /// Surface size in pixels as `(width, height)`.
    fn size(&self) -> (u32, u32);

    /// Fills the whole surface with `color`.
    fn clear(&mut self, color: Color);

    /// Draws `image` unscaled with its top-left corner at `(x, y)`.
    fn blit(&mut self, image: &ImageData, x: i32, y: i32);

    /// Draws `image` stretched to cover `dest`.
    fn blit_scaled(&mut self, image: &ImageData, dest: Rect);

    /// Draws a filled rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draws a rectangle outline `width` pixels thick.
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32);
}

//=========================================================================
// Test Support
//=========================================================================

/// Recording surface double shared by unit tests across the crate.
#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum DrawCall {
        Clear(Color),
        Blit { w: u32, h: u32, x: i32, y: i32 },
        BlitScaled { w: u32, h: u32, dest: Rect },
        FillRect(Rect, Color),
        StrokeRect(Rect, Color, f32),
    }

    pub(crate) struct RecordingSurface {
        pub width: u32,
        pub height: u32,
        pub calls: Vec<DrawCall>,
    }

    impl RecordingSurface {
        pub(crate) fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                calls: Vec::new(),
            }
        }

        pub(crate) fn fills(&self) -> Vec<Color> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    DrawCall::FillRect(_, color) => Some(*color),
                    _ => None,
                })
                .collect()
        }
    }

    impl Surface for RecordingSurface {
        fn size(&self) -> (u32, u32) {
            (self.width, self.height)
        }

        fn clear(&mut self, color: Color) {
            self.calls.push(DrawCall::Clear(color));
        }

        fn blit(&mut self, image: &ImageData, x: i32, y: i32) {
            self.calls.push(DrawCall::Blit {
                w: image.width(),
                h: image.height(),
                x,
                y,
            });
        }

        fn blit_scaled(&mut self, image: &ImageData, dest: Rect) {
            self.calls.push(DrawCall::BlitScaled {
                w: image.width(),
                h: image.height(),
                dest,
            });
        }

        fn fill_rect(&mut self, rect: Rect, color: Color) {
            self.calls.push(DrawCall::FillRect(rect, color));
        }

        fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
            self.calls.push(DrawCall::StrokeRect(rect, color, width));
        }
    }

    /// Solid-color test image.
    pub(crate) fn solid_image(width: u32, height: u32) -> ImageData {
        let rgba = vec![255u8; (width * height * 4) as usize];
        ImageData::from_rgba8(width, height, rgba).expect("valid test image")
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_from_center_places_origin() {
        let rect = Rect::from_center(100.0, 50.0, 40.0, 20.0);
        assert_eq!(rect, Rect::new(80.0, 40.0, 40.0, 20.0));
        assert_eq!(rect.center(), (100.0, 50.0));
    }

    #[test]
    fn rect_contains_is_edge_exclusive() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(0.0, 0.0));
        assert!(rect.contains(9.9, 9.9));
        assert!(!rect.contains(10.0, 5.0));
        assert!(!rect.contains(5.0, 10.0));
        assert!(!rect.contains(-0.1, 5.0));
    }

    #[test]
    fn image_rejects_mismatched_buffer() {
        assert!(ImageData::from_rgba8(2, 2, vec![0; 15]).is_none());
        assert!(ImageData::from_rgba8(0, 0, Vec::new()).is_none());
    }

    #[test]
    fn image_premultiplies_alpha() {
        let image = ImageData::from_rgba8(1, 1, vec![255, 128, 0, 128]).unwrap();
        let px = image.pixmap().data();
        assert_eq!(px[3], 128);
        assert_eq!(px[0], 128);
        assert_eq!(px[1], 64);
        assert_eq!(px[2], 0);
    }

    #[test]
    fn color_constants() {
        assert_eq!(Color::BLACK, Color::rgba(0, 0, 0, 255));
        assert_eq!(Color::WHITE.a, 255);
    }
}

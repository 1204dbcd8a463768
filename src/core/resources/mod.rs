//=========================================================================
// Resources
//=========================================================================
//
// Process-wide, load-once resource store.
//
// Architecture:
//   assets/ ──walkdir──► classify by extension ──► decode
//                                                    ↓
//                         ResourceCache { stem → Resource }
//                                                    ↓
//   scenes / widgets ◄── typed lookup (image / font(size) / sound)
//
// Fonts are kept as deferred descriptors and materialized per point
// size on first use.
//
//=========================================================================

//=== Module Declarations =================================================

mod cache;
mod error;

//=== Public API ==========================================================

pub use cache::ResourceCache;
pub use error::ResourceError;

//=== External Dependencies ===============================================

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::render::ImageData;

//=== ResourceKind ========================================================

/// Classification assigned to each file from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Image,
    Font,
    Sound,
}

impl ResourceKind {
    /// Classifies a path by (case-insensitive) extension.
    ///
    /// Returns `None` for unsupported or missing extensions.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" | "jpg" | "jpeg" | "bmp" | "gif" => Some(Self::Image),
            "ttf" | "otf" => Some(Self::Font),
            "wav" | "mp3" | "ogg" => Some(Self::Sound),
            _ => None,
        }
    }
}

//=== SoundBuffer =========================================================

/// Fully decoded audio clip (interleaved `f32` samples).
pub struct SoundBuffer {
    channels: u16,
    sample_rate: u32,
    samples: Vec<f32>,
}

impl SoundBuffer {
    pub fn new(channels: u16, sample_rate: u32, samples: Vec<f32>) -> Self {
        Self {
            channels,
            sample_rate,
            samples,
        }
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Playback length derived from sample count, channels and rate.
    pub fn duration(&self) -> Duration {
        if self.channels == 0 || self.sample_rate == 0 {
            return Duration::ZERO;
        }
        let frames = self.samples.len() as f64 / self.channels as f64;
        Duration::from_secs_f64(frames / self.sample_rate as f64)
    }
}

impl fmt::Debug for SoundBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoundBuffer")
            .field("channels", &self.channels)
            .field("sample_rate", &self.sample_rate)
            .field("samples", &self.samples.len())
            .finish()
    }
}

//=== SizedFont ===========================================================

/// A font face materialized at one point size.
pub struct SizedFont {
    name: String,
    face: Arc<fontdue::Font>,
    size: u32,
}

impl SizedFont {
    pub(crate) fn new(name: String, face: Arc<fontdue::Font>, size: u32) -> Self {
        Self { name, face, size }
    }

    /// Logical name of the font resource.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Point size as requested from the cache.
    pub fn point_size(&self) -> u32 {
        self.size
    }

    /// Pixel size used for rasterization.
    pub fn size(&self) -> f32 {
        self.size as f32
    }

    pub(crate) fn face(&self) -> &fontdue::Font {
        &self.face
    }
}

impl fmt::Debug for SizedFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SizedFont")
            .field("name", &self.name)
            .field("size", &self.size)
            .finish()
    }
}

//=== Resource ============================================================

/// Stored form of a cache entry.
#[derive(Debug)]
pub(crate) enum Resource {
    Image(Arc<ImageData>),
    /// Deferred font descriptor: only the path is kept until first use.
    Font(PathBuf),
    Sound(Arc<SoundBuffer>),
}

impl Resource {
    pub(crate) fn kind(&self) -> ResourceKind {
        match self {
            Self::Image(_) => ResourceKind::Image,
            Self::Font(_) => ResourceKind::Font,
            Self::Sound(_) => ResourceKind::Sound,
        }
    }
}

//=== ResourceRef =========================================================

/// Handle returned by untyped lookups. Cloning shares the cached data.
#[derive(Debug, Clone)]
pub enum ResourceRef {
    Image(Arc<ImageData>),
    Font(Arc<SizedFont>),
    Sound(Arc<SoundBuffer>),
}

impl ResourceRef {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Image(_) => ResourceKind::Image,
            Self::Font(_) => ResourceKind::Font,
            Self::Sound(_) => ResourceKind::Sound,
        }
    }

    /// Returns `true` when both handles point at the same cached object.
    pub fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Image(a), Self::Image(b)) => Arc::ptr_eq(a, b),
            (Self::Font(a), Self::Font(b)) => Arc::ptr_eq(a, b),
            (Self::Sound(a), Self::Sound(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

//=========================================================================
// Test Support
//=========================================================================


//=========================================================================
// Unit Tests
//=========================================================================

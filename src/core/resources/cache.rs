//=========================================================================
// Resource Cache
//=========================================================================
//
// Loads every supported file under a root directory once and indexes it
// by file stem.
//
// Policies:
// - Walk order is sorted by file name, so loads are deterministic
// - Name collisions: first registered wins, the later file is skipped
// - Unsupported extensions and undecodable files are logged and skipped
// - Fonts are decoded lazily and memoized per (name, point size)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use log::{debug, error, info, warn};
use rodio::Source;
use walkdir::WalkDir;

//=== Internal Dependencies ===============================================

use super::{Resource, ResourceError, ResourceKind, ResourceRef, SizedFont, SoundBuffer};
use crate::core::render::ImageData;

//=== Entry ===============================================================

#[derive(Debug)]
struct Entry {
    path: PathBuf,
    resource: Resource,
}

/// Lazily materialized fonts.
#[derive(Default)]
struct FontMemo {
    /// Parsed faces, one per font name.
    faces: HashMap<String, Arc<fontdue::Font>>,
    /// Sized handles, one per (name, point size).
    sized: HashMap<(String, u32), Arc<SizedFont>>,
}

//=== ResourceCache =======================================================

/// Read-only store of decoded resources, keyed by logical name.
///
/// Built once before the application loop starts and shared by reference
/// (or `Arc`) with every scene that needs it. The only interior mutation
/// is the font memo, which never changes which names resolve.
pub struct ResourceCache {
    root: PathBuf,
    entries: HashMap<String, Entry>,
    default_font_size: u32,
    fonts: Mutex<FontMemo>,
}

impl ResourceCache {
    //--- Construction -----------------------------------------------------

    /// Creates an empty cache (no files scanned).
    pub fn empty(default_font_size: u32) -> Self {
        Self {
            root: PathBuf::new(),
            entries: HashMap::new(),
            default_font_size,
            fonts: Mutex::new(FontMemo::default()),
        }
    }

    /// Recursively scans `root` and loads every supported file.
    ///
    /// Never fails: a missing root yields an empty cache, and individual
    /// files that cannot be classified or decoded are logged and skipped.
    pub fn load(root: impl AsRef<Path>, default_font_size: u32) -> Self {
        let root = root.as_ref();
        let mut cache = Self::empty(default_font_size);
        cache.root = root.to_path_buf();

        if !root.is_dir() {
            warn!("Resource directory {} does not exist, cache is empty", root.display());
            return cache;
        }

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable resource entry: {}", e);
                    continue;
                }
            };

            if entry.file_type().is_file() {
                cache.load_entry(entry.path());
            }
        }

        info!(
            "Resource cache ready: {} resources from {}",
            cache.entries.len(),
            root.display()
        );
        cache
    }

    fn load_entry(&mut self, path: &Path) {
        let Some(kind) = ResourceKind::from_path(path) else {
            warn!("Unsupported resource type: {}", path.display());
            return;
        };

        let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
            warn!("Resource file name is not valid UTF-8: {}", path.display());
            return;
        };

        if let Some(existing) = self.entries.get(name) {
            warn!(
                "Resource name collision on '{}': keeping {}, skipping {}",
                name,
                existing.path.display(),
                path.display()
            );
            return;
        }

        match Self::decode(path, kind) {
            Ok(resource) => {
                debug!("Loaded {:?} '{}' from {}", kind, name, path.display());
                self.entries.insert(
                    name.to_owned(),
                    Entry {
                        path: path.to_path_buf(),
                        resource,
                    },
                );
            }
            Err(e) => error!("{}", e),
        }
    }

    fn decode(path: &Path, kind: ResourceKind) -> Result<Resource, ResourceError> {
        match kind {
            ResourceKind::Image => Self::decode_image(path).map(|img| Resource::Image(Arc::new(img))),
            ResourceKind::Font => Ok(Resource::Font(path.to_path_buf())),
            ResourceKind::Sound => Self::decode_sound(path).map(|snd| Resource::Sound(Arc::new(snd))),
        }
    }

    fn decode_image(path: &Path) -> Result<ImageData, ResourceError> {
        let load_failed = |message: String| ResourceError::LoadFailed {
            path: path.to_path_buf(),
            kind: ResourceKind::Image,
            message,
        };

        let rgba = image::open(path)
            .map_err(|e| load_failed(e.to_string()))?
            .to_rgba8();
        let (width, height) = rgba.dimensions();

        ImageData::from_rgba8(width, height, rgba.into_raw())
            .ok_or_else(|| load_failed(format!("empty image ({}x{})", width, height)))
    }

    fn decode_sound(path: &Path) -> Result<SoundBuffer, ResourceError> {
        let load_failed = |message: String| ResourceError::LoadFailed {
            path: path.to_path_buf(),
            kind: ResourceKind::Sound,
            message,
        };

        let file = File::open(path).map_err(|e| load_failed(e.to_string()))?;
        let decoder =
            rodio::Decoder::new(BufReader::new(file)).map_err(|e| load_failed(e.to_string()))?;

        let channels: u16 = decoder.channels().into();
        let sample_rate: u32 = decoder.sample_rate().into();
        let samples: Vec<f32> = decoder.collect();

        Ok(SoundBuffer::new(channels, sample_rate, samples))
    }

    //--- Registration -----------------------------------------------------

    /// Registers an already decoded image under `name`.
    ///
    /// Follows the same first-wins policy as directory loading and returns
    /// `false` when the name is taken.
    pub fn insert_image(&mut self, name: impl Into<String>, image: ImageData) -> bool {
        let name = name.into();
        if self.entries.contains_key(&name) {
            warn!("Resource name collision on '{}': keeping existing entry", name);
            return false;
        }

        self.entries.insert(
            name,
            Entry {
                path: PathBuf::new(),
                resource: Resource::Image(Arc::new(image)),
            },
        );
        true
    }

    //--- Queries ----------------------------------------------------------

    /// Directory this cache was loaded from (empty for [`Self::empty`]).
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Kind of the resource registered under `name`, if any.
    pub fn kind_of(&self, name: &str) -> Option<ResourceKind> {
        self.entries.get(name).map(|entry| entry.resource.kind())
    }

    /// Point size used by [`Self::get`] for fonts.
    pub fn default_font_size(&self) -> u32 {
        self.default_font_size
    }

    //--- Lookup -----------------------------------------------------------

    /// Untyped lookup. Fonts are materialized at the default size.
    pub fn get(&self, name: &str) -> Result<ResourceRef, ResourceError> {
        let entry = self.entry(name)?;
        match &entry.resource {
            Resource::Image(image) => Ok(ResourceRef::Image(Arc::clone(image))),
            Resource::Sound(sound) => Ok(ResourceRef::Sound(Arc::clone(sound))),
            Resource::Font(_) => self.font(name, self.default_font_size).map(ResourceRef::Font),
        }
    }

    /// Looks up an image by name.
    pub fn image(&self, name: &str) -> Result<Arc<ImageData>, ResourceError> {
        match &self.entry(name)?.resource {
            Resource::Image(image) => Ok(Arc::clone(image)),
            other => Err(Self::wrong_kind(name, ResourceKind::Image, other.kind())),
        }
    }

    /// Looks up a decoded sound by name.
    pub fn sound(&self, name: &str) -> Result<Arc<SoundBuffer>, ResourceError> {
        match &self.entry(name)?.resource {
            Resource::Sound(sound) => Ok(Arc::clone(sound)),
            other => Err(Self::wrong_kind(name, ResourceKind::Sound, other.kind())),
        }
    }

    /// Looks up a font at `size` points, decoding it on first use.
    ///
    /// The same `(name, size)` pair always returns the same `Arc`.
    pub fn font(&self, name: &str, size: u32) -> Result<Arc<SizedFont>, ResourceError> {
        let path = match &self.entry(name)?.resource {
            Resource::Font(path) => path,
            other => return Err(Self::wrong_kind(name, ResourceKind::Font, other.kind())),
        };

        if size == 0 {
            let err = ResourceError::InvalidFontSize {
                name: name.to_owned(),
                size,
            };
            error!("{}", err);
            return Err(err);
        }

        let mut memo = self.fonts.lock().unwrap_or_else(PoisonError::into_inner);

        let key = (name.to_owned(), size);
        if let Some(font) = memo.sized.get(&key) {
            return Ok(Arc::clone(font));
        }

        let face = match memo.faces.get(name) {
            Some(face) => Arc::clone(face),
            None => {
                let face = Arc::new(Self::decode_font(path).inspect_err(|e| error!("{}", e))?);
                debug!("Decoded font '{}' from {}", name, path.display());
                memo.faces.insert(name.to_owned(), Arc::clone(&face));
                face
            }
        };

        let sized = Arc::new(SizedFont::new(name.to_owned(), face, size));
        memo.sized.insert(key, Arc::clone(&sized));
        Ok(sized)
    }

    /// Looks up a font at the cache's default point size.
    pub fn font_default(&self, name: &str) -> Result<Arc<SizedFont>, ResourceError> {
        self.font(name, self.default_font_size)
    }

    //--- Internal Helpers -------------------------------------------------

    fn entry(&self, name: &str) -> Result<&Entry, ResourceError> {
        self.entries.get(name).ok_or_else(|| {
            let err = ResourceError::NotFound {
                name: name.to_owned(),
            };
            error!("{}", err);
            err
        })
    }

    fn wrong_kind(name: &str, expected: ResourceKind, actual: ResourceKind) -> ResourceError {
        let err = ResourceError::WrongKind {
            name: name.to_owned(),
            expected,
            actual,
        };
        error!("{}", err);
        err
    }

    fn decode_font(path: &Path) -> Result<fontdue::Font, ResourceError> {
        let bytes = std::fs::read(path).map_err(|e| ResourceError::LoadFailed {
            path: path.to_path_buf(),
            kind: ResourceKind::Font,
            message: e.to_string(),
        })?;

        fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default()).map_err(|e| {
            ResourceError::InvalidFormat {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })
    }

    #[cfg(test)]
    fn memoized_fonts(&self) -> usize {
        self.fonts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .sized
            .len()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

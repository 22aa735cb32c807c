//! Glyph catalogs: the set of pre-rendered character images a document is
//! drawn from.
//!
//! A catalog is loaded from a directory of PNG files, one per character,
//! named `<character>.png`. The character key is the lowercased file stem;
//! lookups lowercase their argument, so `A.png` serves both `a` and `A` in
//! the input text. Catalogs are plain immutable values and are rebuilt from
//! disk on every render call rather than cached.

use crate::error::{PenscriptError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A single character's pre-rendered image and its pixel dimensions.
#[derive(Debug, Clone)]
pub struct Glyph {
    key: char,
    path: PathBuf,
    width: u32,
    height: u32,
}

impl Glyph {
    pub fn new(key: char, path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            key,
            path: path.into(),
            width,
            height,
        }
    }

    /// The lowercase character this glyph renders.
    pub fn key(&self) -> char {
        self.key
    }

    /// Path of the source PNG.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Width in source pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in source pixels.
    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Mapping from character key to [`Glyph`], plus the maximum glyph height
/// across the set.
#[derive(Debug, Clone, Default)]
pub struct GlyphCatalog {
    glyphs: HashMap<char, Glyph>,
    max_height: u32,
}

impl GlyphCatalog {
    /// Scans `dir` and builds a catalog from every qualifying PNG in it.
    ///
    /// Files are visited in lexicographic filename order; when two files map
    /// to the same key (`A.png` and `a.png`), the later one wins. Files that
    /// are not `.png` (extension matched case-insensitively) or whose stem is
    /// not a single character after lowercasing are skipped. An empty
    /// directory yields an empty catalog, which is not an error — layout will
    /// simply drop every character.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read or if a qualifying
    /// image cannot be opened.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut paths = Vec::new();

        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            let is_png = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
            if path.is_file() && is_png {
                paths.push(path);
            }
        }

        // Deterministic collision policy: lexicographic order, last wins.
        paths.sort();

        let mut glyphs = HashMap::new();
        let mut max_height = 0;

        for path in paths {
            let Some(key) = key_from_stem(&path) else {
                debug!(path = %path.display(), "skipping glyph file without a single-character stem");
                continue;
            };

            let (width, height) = image::image_dimensions(&path).map_err(|e| {
                PenscriptError::InvalidImage(format!("{}: {e}", path.display()))
            })?;

            max_height = max_height.max(height);
            glyphs.insert(key, Glyph::new(key, path, width, height));
        }

        debug!(dir = %dir.display(), count = glyphs.len(), max_height, "loaded glyph catalog");

        Ok(Self { glyphs, max_height })
    }

    /// Builds a catalog from glyphs constructed elsewhere. Later glyphs win
    /// on key collisions, matching [`GlyphCatalog::load`].
    pub fn from_glyphs(glyphs: impl IntoIterator<Item = Glyph>) -> Self {
        let mut catalog = Self::default();
        for glyph in glyphs {
            catalog.max_height = catalog.max_height.max(glyph.height);
            catalog.glyphs.insert(glyph.key, glyph);
        }
        catalog
    }

    /// Looks up the glyph for `ch`, case-insensitively.
    ///
    /// Returns `None` for characters with no registered glyph and for
    /// characters whose lowercase form is not a single character.
    pub fn get(&self, ch: char) -> Option<&Glyph> {
        let mut lower = ch.to_lowercase();
        let key = lower.next()?;
        if lower.next().is_some() {
            return None;
        }
        self.glyphs.get(&key)
    }

    /// Tallest glyph height in source pixels, 0 for an empty catalog.
    pub fn max_height(&self) -> u32 {
        self.max_height
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Registered character keys, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = char> + '_ {
        self.glyphs.keys().copied()
    }
}

/// Lowercased single-character file stem, or `None` if the stem does not
/// reduce to exactly one character.
fn key_from_stem(path: &Path) -> Option<char> {
    let stem = path.file_stem()?.to_str()?;
    let lowered: Vec<char> = stem.to_lowercase().chars().collect();
    match lowered.as_slice() {
        [single] => Some(*single),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_of(entries: &[(char, u32, u32)]) -> GlyphCatalog {
        GlyphCatalog::from_glyphs(
            entries
                .iter()
                .map(|&(key, w, h)| Glyph::new(key, format!("{key}.png"), w, h)),
        )
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = GlyphCatalog::default();
        assert!(catalog.is_empty());
        assert_eq!(catalog.max_height(), 0);
        assert!(catalog.get('a').is_none());
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let catalog = catalog_of(&[('a', 10, 20)]);
        assert_eq!(catalog.get('a').unwrap().key(), 'a');
        assert_eq!(catalog.get('A').unwrap().key(), 'a');
        assert!(catalog.get('b').is_none());
    }

    #[test]
    fn test_max_height_tracks_tallest() {
        let catalog = catalog_of(&[('a', 10, 20), ('b', 10, 35), ('c', 10, 5)]);
        assert_eq!(catalog.max_height(), 35);
    }

    #[test]
    fn test_from_glyphs_last_wins() {
        let catalog = GlyphCatalog::from_glyphs([
            Glyph::new('a', "A.png", 10, 10),
            Glyph::new('a', "a.png", 30, 40),
        ]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get('a').unwrap().width(), 30);
    }

    #[test]
    fn test_key_from_stem() {
        assert_eq!(key_from_stem(Path::new("a.png")), Some('a'));
        assert_eq!(key_from_stem(Path::new("Q.png")), Some('q'));
        assert_eq!(key_from_stem(Path::new("dot.png")), None);
        assert_eq!(key_from_stem(Path::new("İ.png")), None); // lowers to two chars
    }
}

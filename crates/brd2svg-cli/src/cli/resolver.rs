//! Package-to-artwork lookup.
//!
//! Each component names a package; the matching artwork lives at
//! `<subparts_dir>/<package>.svg`. Lookups are cached by package name so a
//! board with forty identical resistors reads and validates the asset once.
//! Failures are cached too, so a missing package warns a single time.

use brd2svg::Artwork;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub struct ArtworkResolver {
    dir: PathBuf,
    cache: HashMap<String, Option<Artwork>>,
}

impl ArtworkResolver {
    pub fn new(dir: &Path) -> Self {
        Self { dir: dir.to_path_buf(), cache: HashMap::new() }
    }

    /// Look up the artwork for `package`, loading it on first use.
    pub fn resolve(&mut self, package: &str) -> Option<&Artwork> {
        if !self.cache.contains_key(package) {
            let loaded = self.load(package);
            self.cache.insert(package.to_string(), loaded);
        }
        self.cache.get(package).and_then(|entry| entry.as_ref())
    }

    fn load(&self, package: &str) -> Option<Artwork> {
        let path = self.dir.join(format!("{}.svg", package));
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                log::warn!("Cannot read {}: {}", path.display(), err);
                return None;
            }
        };
        match Artwork::parse(&content) {
            Ok(artwork) => Some(artwork),
            Err(err) => {
                log::warn!("Invalid SVG in {}: {}", path.display(), err);
                None
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("brd2svg-resolver-{}", name));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn resolves_existing_package() {
        let dir = temp_dir("hit");
        fs::write(dir.join("RES_0805.svg"), r#"<svg><rect x="1" y="2"/></svg>"#).unwrap();

        let mut resolver = ArtworkResolver::new(&dir);
        assert!(resolver.resolve("RES_0805").is_some());
        // Second lookup hits the cache
        assert!(resolver.resolve("RES_0805").is_some());
    }

    #[test]
    fn missing_package_is_none() {
        let dir = temp_dir("miss");
        let mut resolver = ArtworkResolver::new(&dir);
        assert!(resolver.resolve("NOPE").is_none());
        assert!(resolver.resolve("NOPE").is_none());
    }

    #[test]
    fn malformed_asset_is_none() {
        let dir = temp_dir("malformed");
        fs::write(dir.join("BAD.svg"), "<svg><rect</svg>").unwrap();
        let mut resolver = ArtworkResolver::new(&dir);
        assert!(resolver.resolve("BAD").is_none());
    }
}

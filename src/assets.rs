//! Asset catalog with placeholder fallback
//!
//! Missing or unreadable files never abort the game. Each failure logs a
//! warning and registers a placeholder, so every [`SpriteId`] lookup resolves
//! and gameplay code never handles load errors.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::render::SpriteId;

/// Handle to one loaded (or substituted) image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drawable {
    pub sprite: SpriteId,
    pub path: PathBuf,
    /// Bytes on disk; zero for placeholders
    pub len: u64,
    pub placeholder: bool,
}

pub struct AssetCatalog {
    entries: HashMap<SpriteId, Drawable>,
}

impl AssetCatalog {
    /// Load every sprite under `root`, substituting placeholders for
    /// anything missing
    pub fn load(root: &Path) -> Self {
        let mut entries = HashMap::new();
        let mut placeholders = 0;
        for sprite in SpriteId::ALL {
            let path = root.join(sprite.file_name());
            let drawable = match fs::metadata(&path) {
                Ok(meta) if meta.is_file() => Drawable {
                    sprite,
                    path: path.clone(),
                    len: meta.len(),
                    placeholder: false,
                },
                Ok(_) => {
                    warn!("asset {} is not a file, using placeholder", path.display());
                    placeholders += 1;
                    Drawable {
                        sprite,
                        path: path.clone(),
                        len: 0,
                        placeholder: true,
                    }
                }
                Err(err) => {
                    warn!(
                        "failed to load asset {}: {err}, using placeholder",
                        path.display()
                    );
                    placeholders += 1;
                    Drawable {
                        sprite,
                        path: path.clone(),
                        len: 0,
                        placeholder: true,
                    }
                }
            };
            entries.insert(sprite, drawable);
        }
        info!(
            "loaded {} assets, {placeholders} placeholders",
            entries.len() - placeholders
        );
        Self { entries }
    }

    /// Lookup never fails; placeholders stand in for missing files
    pub fn get(&self, sprite: SpriteId) -> &Drawable {
        &self.entries[&sprite]
    }

    pub fn placeholder_count(&self) -> usize {
        self.entries.values().filter(|d| d.placeholder).count()
    }
}

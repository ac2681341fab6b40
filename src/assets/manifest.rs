//! Build manifest parsing and content-hash extraction.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while turning a manifest into asset hashes.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("manifest has no .{ext} file for chunk `{chunk}`")]
    MissingChunk { chunk: String, ext: String },
}

/// Files emitted for one chunk: a single filename or a list of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ChunkAssets {
    Single(String),
    Many(Vec<String>),
}

impl ChunkAssets {
    /// The filename to take the hash from. A list is filtered to the first
    /// entry ending in `.<ext>`.
    pub fn file_for(&self, ext: &str) -> Option<&str> {
        match self {
            ChunkAssets::Single(name) => Some(name),
            ChunkAssets::Many(names) => {
                let suffix = format!(".{ext}");
                names
                    .iter()
                    .find(|name| name.ends_with(&suffix))
                    .map(String::as_str)
            }
        }
    }
}

/// The subset of a build manifest this server reads.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub assets_by_chunk_name: HashMap<String, ChunkAssets>,
}

impl Manifest {
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Content hash of `chunk`'s `.<ext>` file.
    pub fn hash(&self, chunk: &str, ext: &str) -> Result<String, ManifestError> {
        self.assets_by_chunk_name
            .get(chunk)
            .and_then(|assets| assets.file_for(ext))
            .map(|file| extract_hash(file, chunk, ext))
            .ok_or_else(|| ManifestError::MissingChunk {
                chunk: chunk.to_string(),
                ext: ext.to_string(),
            })
    }
}

/// Strip the extension and the chunk-name prefix from a built filename,
/// leaving the content hash: `bundle.abc123.js` → `abc123`.
pub fn extract_hash(filename: &str, chunk: &str, ext: &str) -> String {
    filename
        .replacen(&format!(".{ext}"), "", 1)
        .replacen(&format!("{chunk}."), "", 1)
}

/// Content hashes of the four bundles a page references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssetHashes {
    pub bundle: String,
    pub styles: String,
    pub vendor: String,
    pub vendor_styles: String,
}

impl AssetHashes {
    pub fn from_manifest(manifest: &Manifest) -> Result<Self, ManifestError> {
        Ok(Self {
            bundle: manifest.hash("bundle", "js")?,
            styles: manifest.hash("styles", "css")?,
            vendor: manifest.hash("vendor", "js")?,
            vendor_styles: manifest.hash("vendor", "css")?,
        })
    }

    /// Read and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest = Manifest::from_json(&content).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_manifest(&manifest)
    }
}

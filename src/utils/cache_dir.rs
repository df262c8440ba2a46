use crate::error::{Error, IoContext, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "npm-locate";
const CONFIG_FILE: &str = "config.json";
const SOURCE_DOCUMENT: &str = "index.json";
const INDEX_FILE: &str = "index.db";

/// Application configuration stored in the cache directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Bulk listing endpoint of the registry
    #[serde(default = "default_registry_url")]
    pub registry_url: String,

    /// Base of the cross-reference link emitted by `--trends`
    #[serde(default = "default_trends_url")]
    pub trends_url: String,

    /// Token placed between package names in the cross-reference link
    #[serde(default = "default_trends_separator")]
    pub trends_separator: String,

    /// Largest result set that still gets a cross-reference link
    #[serde(default = "default_trends_limit")]
    pub trends_limit: usize,
}

fn default_registry_url() -> String {
    "https://registry.npmjs.org/-/all".to_string()
}

fn default_trends_url() -> String {
    "https://www.npmtrends.com/".to_string()
}

fn default_trends_separator() -> String {
    "-vs-".to_string()
}

fn default_trends_limit() -> usize {
    10
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            registry_url: default_registry_url(),
            trends_url: default_trends_url(),
            trends_separator: default_trends_separator(),
            trends_limit: default_trends_limit(),
        }
    }
}

impl AppConfig {
    /// Load config from the cache directory, or return default if not found
    pub fn load(cache: &CacheDir) -> Result<Self> {
        let config_path = cache.config_path();

        let content = match fs::read_to_string(&config_path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(Error::io(&config_path, e)),
        };

        serde_json::from_str(&content).map_err(|e| Error::Parse {
            path: config_path,
            message: e.to_string(),
        })
    }
}

/// The directory holding the downloaded document and the compacted index.
///
/// Resolved once at startup and passed to every stage, so tests can point the
/// whole pipeline at a temporary directory.
#[derive(Debug, Clone)]
pub struct CacheDir {
    root: PathBuf,
}

impl CacheDir {
    /// Use `root` as the cache directory without touching the file system
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the platform cache directory, or use the override if given
    pub fn resolve(override_root: Option<PathBuf>) -> Result<Self> {
        if let Some(root) = override_root {
            return Ok(Self::new(root));
        }

        // macOS: ~/Library/Caches, Windows: %LOCALAPPDATA%,
        // elsewhere: $XDG_CACHE_HOME or ~/.cache
        let base = dirs::cache_dir().ok_or_else(|| {
            Error::io(
                Path::new(APP_NAME),
                io::Error::new(
                    io::ErrorKind::NotFound,
                    "could not determine the cache directory",
                ),
            )
        })?;

        Ok(Self::new(base.join(APP_NAME)))
    }

    /// Create the directory; an existing directory is not an error
    pub fn ensure(&self) -> Result<()> {
        match fs::create_dir_all(&self.root) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && self.root.is_dir() => Ok(()),
            Err(e) => Err(e).at(&self.root),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Installed copy of the registry's bulk document
    pub fn source_document(&self) -> PathBuf {
        self.root.join(SOURCE_DOCUMENT)
    }

    /// Compacted index queried on every invocation
    pub fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILE)
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }
}

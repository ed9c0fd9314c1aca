use std::fs;
use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;
use thiserror::Error;

use crate::ident::{ASSET_NAME_LENGTH, generate};

/// Prefix of the paths handed back to callers for use in `src` fields.
pub const URL_PREFIX: &str = "/storage/";

pub const OCTET_STREAM: &str = "application/octet-stream";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("asset not found: {0}")]
    NotFound(String),
    #[error("path escapes the storage root: {0}")]
    Traversal(String),
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T, E = StorageError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub bytes: Arc<[u8]>,
    pub content_type: &'static str,
}

/// Content type inferred from the file extension, case-insensitively.
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        _ => OCTET_STREAM,
    }
}

/// Uploaded images under one root directory. Generated names keep the
/// original extension; reads are confined to the root and cached.
pub struct AssetStore {
    root: PathBuf,
    cache: Mutex<LruCache<PathBuf, Asset>>,
}

impl AssetStore {
    /// Opens (and creates, if needed) the storage root.
    pub fn open(root: impl AsRef<Path>, cache_capacity: usize) -> Result<Self> {
        let root = root.as_ref();
        fs::create_dir_all(root)?;
        let root = root.canonicalize()?;
        let capacity = NonZeroUsize::new(cache_capacity).unwrap_or(NonZeroUsize::MIN);

        Ok(Self {
            root,
            cache: Mutex::new(LruCache::new(capacity)),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Stores `bytes` under a fresh name and returns its `/storage/...` path.
    pub fn put(&self, original_name: &str, bytes: &[u8]) -> Result<String> {
        let extension = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default();
        let name = format!("{}{}", generate(ASSET_NAME_LENGTH), extension);
        let path = self.root.join(&name);

        fs::write(&path, bytes)?;
        self.cache.lock().pop(&path);
        log::info!("stored {} ({} bytes) as {}", original_name, bytes.len(), name);

        Ok(format!("{}{}", URL_PREFIX, name))
    }

    /// Resolves a `/storage/<name>` (or bare `<name>`) path to its bytes.
    pub fn get(&self, requested: &str) -> Result<Asset> {
        let path = self.resolve(requested)?;

        if let Some(asset) = self.cache.lock().get(&path) {
            return Ok(asset.clone());
        }

        let asset = Asset {
            bytes: fs::read(&path)?.into(),
            content_type: content_type_for(&path),
        };
        self.cache.lock().put(path, asset.clone());
        Ok(asset)
    }

    fn resolve(&self, requested: &str) -> Result<PathBuf> {
        let relative = requested
            .strip_prefix(URL_PREFIX)
            .unwrap_or(requested)
            .trim_start_matches('/');
        if relative.is_empty() {
            return Err(StorageError::NotFound(requested.to_string()));
        }

        let canonical = match self.root.join(relative).canonicalize() {
            Ok(path) => path,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(requested.to_string()));
            }
            Err(err) => return Err(err.into()),
        };

        if !canonical.starts_with(&self.root) {
            log::warn!("rejected storage lookup outside root: {}", requested);
            return Err(StorageError::Traversal(requested.to_string()));
        }
        if !canonical.is_file() {
            return Err(StorageError::NotFound(requested.to_string()));
        }
        Ok(canonical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, AssetStore) {
        let dir = TempDir::new().expect("tempdir");
        let store = AssetStore::open(dir.path().join("storage"), 4).expect("open store");
        (dir, store)
    }

    #[test]
    fn put_keeps_extension_and_returns_storage_path() {
        let (_dir, store) = store();
        let url = store.put("holiday.photo.PNG", b"png-bytes").expect("put");

        let name = url.strip_prefix(URL_PREFIX).expect("prefixed");
        assert!(name.ends_with(".PNG"));
        assert_eq!(name.len(), ASSET_NAME_LENGTH + ".PNG".len());
        assert!(store.root().join(name).is_file());
    }

    #[test]
    fn put_without_extension_has_bare_name() {
        let (_dir, store) = store();
        let url = store.put("blob", b"x").expect("put");
        assert_eq!(url.len(), URL_PREFIX.len() + ASSET_NAME_LENGTH);
    }

    #[test]
    fn get_round_trips_with_content_type() {
        let (_dir, store) = store();
        let url = store.put("cat.jpeg", b"meow").expect("put");

        let asset = store.get(&url).expect("get by url");
        assert_eq!(&*asset.bytes, b"meow");
        assert_eq!(asset.content_type, "image/jpeg");

        let bare = url.trim_start_matches(URL_PREFIX);
        assert_eq!(store.get(bare).expect("get by name"), asset);
    }

    #[test]
    fn content_types_follow_extension() {
        assert_eq!(content_type_for(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("a.JPEG")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("a.png")), "image/png");
        assert_eq!(content_type_for(Path::new("a.gif")), "image/gif");
        assert_eq!(content_type_for(Path::new("a.webp")), OCTET_STREAM);
        assert_eq!(content_type_for(Path::new("noext")), OCTET_STREAM);
    }

    #[test]
    fn traversal_outside_root_is_rejected() {
        let (dir, store) = store();
        fs::write(dir.path().join("secret.txt"), b"top secret").expect("write outside");

        for attempt in ["../secret.txt", "/storage/../secret.txt", "/storage/../../etc/passwd"] {
            match store.get(attempt) {
                Err(StorageError::Traversal(_)) | Err(StorageError::NotFound(_)) => {}
                other => panic!("{attempt}: expected rejection, got {other:?}"),
            }
        }
        assert!(matches!(
            store.get("../secret.txt"),
            Err(StorageError::Traversal(_))
        ));
    }

    #[test]
    fn missing_asset_is_not_found() {
        let (_dir, store) = store();
        assert!(matches!(store.get("/storage/nope.png"), Err(StorageError::NotFound(_))));
        assert!(matches!(store.get("/storage/"), Err(StorageError::NotFound(_))));
    }

    #[test]
    fn cache_serves_repeat_reads_and_put_invalidates() {
        let (_dir, store) = store();
        let url = store.put("a.gif", b"one").expect("put");
        let first = store.get(&url).expect("first read");

        let path = store.root().join(url.trim_start_matches(URL_PREFIX));
        fs::write(&path, b"two").expect("overwrite behind the cache");
        assert_eq!(store.get(&url).expect("cached read"), first);

        store.cache.lock().pop(&path);
        assert_eq!(&*store.get(&url).expect("fresh read").bytes, b"two");
    }
}

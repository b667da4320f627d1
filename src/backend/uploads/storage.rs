/**
 * Upload Storage
 *
 * Persists uploaded payloads under the upload directory.
 *
 * # Naming
 *
 * Stored files are named `<ingest millis>_<8 hex chars>_<sanitized name>`,
 * so two uploads of `cat.png` in the same millisecond still get distinct
 * files. The sanitized name is capped at `MAX_NAME_BYTES`, keeping its
 * extension, so the stored and temporary names stay under the 255-byte
 * limit common to filesystems.
 *
 * # Atomicity
 *
 * Bytes are written to a hidden `.<name>.part` file, synced, then renamed
 * into place. A failed write removes the temporary file, so a stored name
 * either refers to a complete payload or does not exist.
 */
use crate::shared::message::now_millis;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// URL prefix under which stored files are served
pub const UPLOAD_URL_PREFIX: &str = "/uploads";

const FALLBACK_FILENAME: &str = "upload";

/// Longest sanitized name kept in a stored filename
pub const MAX_NAME_BYTES: usize = 150;

const MAX_EXTENSION_BYTES: usize = 16;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to prepare upload directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to store upload {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A payload that has been written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub stored_name: String,
    pub path: PathBuf,
    /// Content reference placed in the chat message
    pub url: String,
    pub size: usize,
}

/// Directory-backed payload store
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the upload directory if it does not exist yet
    pub async fn ensure_dir(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| StorageError::Directory {
                path: self.dir.clone(),
                source,
            })
    }

    /// Write `data` under a collision-resistant name derived from `filename`
    pub async fn persist(&self, filename: &str, data: &[u8]) -> Result<StoredFile, StorageError> {
        let short_id = uuid::Uuid::new_v4().simple().to_string();
        let stored_name = format!(
            "{}_{}_{}",
            now_millis(),
            &short_id[..8],
            sanitize_filename(filename)
        );
        let path = self.dir.join(&stored_name);
        let temp_path = self.dir.join(format!(".{}.part", stored_name));

        if let Err(source) = write_synced(&temp_path, data).await {
            discard(&temp_path).await;
            return Err(StorageError::Write { path, source });
        }
        if let Err(source) = fs::rename(&temp_path, &path).await {
            discard(&temp_path).await;
            return Err(StorageError::Write { path, source });
        }

        tracing::info!(
            stored_name = %stored_name,
            size_bytes = data.len(),
            "[Upload] Payload stored"
        );

        Ok(StoredFile {
            url: format!("{}/{}", UPLOAD_URL_PREFIX, stored_name),
            stored_name,
            path,
            size: data.len(),
        })
    }
}

async fn write_synced(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(data).await?;
    file.sync_all().await?;
    Ok(())
}

async fn discard(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!("[Upload] Failed to remove temporary file {}: {}", path.display(), e);
        }
    }
}

/// Reduce a client-supplied filename to a safe single path component
///
/// Directory parts are dropped, whitespace becomes `_`, and control
/// characters are removed. Names left empty (or made only of dots) fall
/// back to `upload`. Long names are cut to `MAX_NAME_BYTES` on a char
/// boundary with the extension preserved.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();

    if cleaned.chars().all(|c| c == '.') {
        FALLBACK_FILENAME.to_string()
    } else {
        truncate_name(cleaned)
    }
}

fn truncate_name(name: String) -> String {
    if name.len() <= MAX_NAME_BYTES {
        return name;
    }

    let extension = name
        .rfind('.')
        .filter(|&dot| dot > 0 && name.len() - dot <= MAX_EXTENSION_BYTES)
        .map(|dot| &name[dot..])
        .unwrap_or("");
    let stem = &name[..name.len() - extension.len()];

    let mut cut = (MAX_NAME_BYTES - extension.len()).min(stem.len());
    while !stem.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}{}", &stem[..cut], extension)
}

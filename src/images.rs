//! On-disk image storage.
//!
//! Images are stored flat under `image_dir` as `<sha256-hex>.jpg`, where the
//! hash is taken over the bytes the client submitted. Every upload is decoded
//! and re-encoded as JPEG before it is written.

use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::ImageFormat;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::config::StorageConfig;

pub const IMAGE_SUFFIX: &str = ".jpg";

#[derive(Debug, Error)]
pub enum ImageStoreError {
    #[error("{0}")]
    InvalidName(String),
    #[error("not a valid JPEG: {0}")]
    Decode(#[source] image::ImageError),
    #[error("failed to encode JPEG: {0}")]
    Encode(#[source] image::ImageError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("default image missing at {}", .0.display())]
    PlaceholderMissing(PathBuf),
    #[error("local image paths are disabled")]
    LocalPathsDisabled,
    #[error("image task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type ImageStoreResult<T> = Result<T, ImageStoreError>;

/// Outcome of looking up a requested image name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedImage {
    Stored(PathBuf),
    Placeholder(PathBuf),
}

impl ResolvedImage {
    pub fn path(&self) -> &Path {
        match self {
            ResolvedImage::Stored(p) | ResolvedImage::Placeholder(p) => p,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, ResolvedImage::Placeholder(_))
    }
}

#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
    placeholder: PathBuf,
    quality: u8,
    allow_local_paths: bool,
}

/// Lowercase hex SHA-256 of `bytes`.
pub fn content_hash(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

fn reencode_jpeg(bytes: &[u8], quality: u8) -> ImageStoreResult<Vec<u8>> {
    let img = image::load_from_memory_with_format(bytes, ImageFormat::Jpeg).map_err(ImageStoreError::Decode)?;
    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, quality);
    img.write_with_encoder(encoder).map_err(ImageStoreError::Encode)?;
    Ok(out)
}

/// Accepts only plain `*.jpg` file names.
pub fn validate_image_name(name: &str) -> ImageStoreResult<()> {
    if !name.ends_with(IMAGE_SUFFIX) {
        return Err(ImageStoreError::InvalidName("Image path does not end with .jpg".to_string()));
    }
    if name.contains('/') || name.contains('\\') || name.contains("..") || name.contains('\0') {
        return Err(ImageStoreError::InvalidName("Image name must be a plain file name".to_string()));
    }
    Ok(())
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>, default_image: &str, quality: u8, allow_local_paths: bool) -> Self {
        let dir = dir.into();
        let placeholder = dir.join(default_image);
        Self {
            dir,
            placeholder,
            quality,
            allow_local_paths,
        }
    }

    pub fn from_config(cfg: &StorageConfig) -> Self {
        Self {
            dir: cfg.image_dir.clone(),
            placeholder: cfg.default_image_path(),
            quality: cfg.jpeg_quality,
            allow_local_paths: cfg.allow_local_paths,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn placeholder(&self) -> &Path {
        &self.placeholder
    }

    /// Creates the image directory; a missing placeholder is only logged.
    pub async fn ensure_dirs(&self) -> ImageStoreResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        if !is_file(&self.placeholder).await {
            tracing::warn!(
                "Default image {} is missing; requests for unknown images will return 404",
                self.placeholder.display()
            );
        }
        Ok(())
    }

    /// Stores `bytes` as `<sha256>.jpg` and returns that file name.
    pub async fn save(&self, bytes: Vec<u8>) -> ImageStoreResult<String> {
        let quality = self.quality;
        let (file_name, encoded) = tokio::task::spawn_blocking(move || {
            let file_name = format!("{}{}", content_hash(&bytes), IMAGE_SUFFIX);
            let encoded = reencode_jpeg(&bytes, quality)?;
            Ok::<_, ImageStoreError>((file_name, encoded))
        })
        .await??;

        tokio::fs::create_dir_all(&self.dir).await?;
        let target = self.dir.join(&file_name);
        // Write-then-rename so concurrent uploads of the same bytes never expose a partial file
        let tmp = self.dir.join(format!(".{}.{}.tmp", file_name, uuid::Uuid::new_v4()));
        tokio::fs::write(&tmp, &encoded).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &target).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        tracing::debug!("Stored image {} ({} bytes)", target.display(), encoded.len());
        Ok(file_name)
    }

    /// Reads an image that already lives on the server's filesystem.
    pub async fn read_source(&self, path: &str) -> ImageStoreResult<Vec<u8>> {
        if !self.allow_local_paths {
            return Err(ImageStoreError::LocalPathsDisabled);
        }
        Ok(tokio::fs::read(path).await?)
    }

    /// Maps a requested name to a file on disk, falling back to the placeholder.
    pub async fn resolve(&self, name: &str) -> ImageStoreResult<ResolvedImage> {
        validate_image_name(name)?;

        let path = self.dir.join(name);
        if is_file(&path).await {
            return Ok(ResolvedImage::Stored(path));
        }

        tracing::debug!("Image not found: {}", path.display());
        if is_file(&self.placeholder).await {
            Ok(ResolvedImage::Placeholder(self.placeholder.clone()))
        } else {
            Err(ImageStoreError::PlaceholderMissing(self.placeholder.clone()))
        }
    }
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path).await.map(|m| m.is_file()).unwrap_or(false)
}

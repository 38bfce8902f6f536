use tempfile::TempDir;

use super::support::sample_jpeg;
use crate::config::AppConfig;
use crate::images::{content_hash, validate_image_name, ImageStore, ImageStoreError, ResolvedImage};

fn store(dir: &TempDir) -> ImageStore {
    ImageStore::new(dir.path().join("images"), "default.jpg", 75, true)
}

#[test]
fn test_from_config_uses_configured_placeholder() {
    let mut config = AppConfig::default();
    config.storage.image_dir = "/srv/items/images".into();
    config.storage.default_image = "fallback.jpg".to_string();

    let images = ImageStore::from_config(&config.storage);
    assert_eq!(images.dir(), config.storage.image_dir.as_path());
    assert_eq!(images.placeholder(), config.storage.default_image_path().as_path());
    assert_eq!(images.placeholder(), std::path::Path::new("/srv/items/images/fallback.jpg"));
}

#[test]
fn test_content_hash_is_sha256_hex() {
    assert_eq!(
        content_hash(b"abc"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[tokio::test]
async fn test_save_names_file_by_source_hash() {
    let dir = TempDir::new().unwrap();
    let images = store(&dir);
    let bytes = sample_jpeg(10);

    let name = images.save(bytes.clone()).await.unwrap();
    assert_eq!(name, format!("{}.jpg", content_hash(&bytes)));

    let written = std::fs::read(images.dir().join(&name)).unwrap();
    // Re-encoded output is still a JPEG
    assert!(image::load_from_memory_with_format(&written, image::ImageFormat::Jpeg).is_ok());
}

#[tokio::test]
async fn test_save_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let images = store(&dir);
    let bytes = sample_jpeg(11);

    let first = images.save(bytes.clone()).await.unwrap();
    let first_bytes = std::fs::read(images.dir().join(&first)).unwrap();
    let second = images.save(bytes).await.unwrap();
    let second_bytes = std::fs::read(images.dir().join(&second)).unwrap();

    assert_eq!(first, second);
    assert_eq!(first_bytes, second_bytes);

    // No temp files left behind
    let entries = std::fs::read_dir(images.dir()).unwrap().count();
    assert_eq!(entries, 1);
}

#[tokio::test]
async fn test_different_content_gets_different_names() {
    let dir = TempDir::new().unwrap();
    let images = store(&dir);

    let a = images.save(sample_jpeg(1)).await.unwrap();
    let b = images.save(sample_jpeg(200)).await.unwrap();
    assert_ne!(a, b);
}

#[tokio::test]
async fn test_save_rejects_non_jpeg() {
    let dir = TempDir::new().unwrap();
    let images = store(&dir);

    let err = images.save(b"definitely not a jpeg".to_vec()).await.unwrap_err();
    assert!(matches!(err, ImageStoreError::Decode(_)));
}

#[test]
fn test_validate_image_name() {
    assert!(validate_image_name("abc.jpg").is_ok());
    assert!(matches!(validate_image_name("x.png"), Err(ImageStoreError::InvalidName(_))));
    assert!(matches!(validate_image_name("x.jpeg"), Err(ImageStoreError::InvalidName(_))));
    assert!(matches!(validate_image_name("../secret.jpg"), Err(ImageStoreError::InvalidName(_))));
    assert!(matches!(validate_image_name("a/b.jpg"), Err(ImageStoreError::InvalidName(_))));
    assert!(matches!(validate_image_name("a\\b.jpg"), Err(ImageStoreError::InvalidName(_))));
}

#[tokio::test]
async fn test_resolve_existing_and_missing() {
    let dir = TempDir::new().unwrap();
    let images = store(&dir);
    images.ensure_dirs().await.unwrap();
    std::fs::write(images.placeholder(), sample_jpeg(0)).unwrap();

    let name = images.save(sample_jpeg(5)).await.unwrap();
    let resolved = images.resolve(&name).await.unwrap();
    assert_eq!(resolved, ResolvedImage::Stored(images.dir().join(&name)));
    assert!(!resolved.is_placeholder());

    let fallback = images.resolve("missing.jpg").await.unwrap();
    assert!(fallback.is_placeholder());
    assert_eq!(fallback.path(), images.placeholder());
}

#[tokio::test]
async fn test_resolve_without_placeholder() {
    let dir = TempDir::new().unwrap();
    let images = store(&dir);
    images.ensure_dirs().await.unwrap();

    let err = images.resolve("missing.jpg").await.unwrap_err();
    assert!(matches!(err, ImageStoreError::PlaceholderMissing(_)));
}

#[tokio::test]
async fn test_read_source_respects_local_path_setting() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("src.jpg");
    std::fs::write(&source, b"bytes").unwrap();
    let source = source.display().to_string();

    let allowed = store(&dir);
    assert_eq!(allowed.read_source(&source).await.unwrap(), b"bytes");

    let denied = ImageStore::new(dir.path().join("images"), "default.jpg", 75, false);
    assert!(matches!(
        denied.read_source(&source).await,
        Err(ImageStoreError::LocalPathsDisabled)
    ));
}

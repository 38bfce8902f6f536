use std::path::{Path, PathBuf};

use serde::Deserialize;

const DEFAULTS: &str = include_str!("../config/default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub body_limit_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding `<sha256>.jpg` files and the placeholder.
    pub image_dir: PathBuf,
    /// Placeholder file name, relative to `image_dir`.
    pub default_image: String,
    pub jpeg_quality: u8,
    /// Whether `image=<path>` form values may name files on the server's disk.
    pub allow_local_paths: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub front_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub cors: CorsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        // Fallback: parse the embedded default TOML
        match ::config::Config::builder()
            .add_source(::config::File::from_str(DEFAULTS, ::config::FileFormat::Toml))
            .build()
        {
            Ok(cfg) => match cfg.try_deserialize() {
                Ok(app_cfg) => app_cfg,
                Err(e) => {
                    eprintln!("FATAL: Failed to deserialize default config: {}", e);
                    panic!("Failed to deserialize default config: {}", e);
                }
            },
            Err(e) => {
                eprintln!("FATAL: Failed to parse default config: {}", e);
                panic!("Failed to parse default config: {}", e);
            }
        }
    }
}

impl StorageConfig {
    pub fn default_image_path(&self) -> PathBuf {
        self.image_dir.join(&self.default_image)
    }
}

pub fn load() -> anyhow::Result<AppConfig> {
    // Load .env first (optional)
    let _ = dotenvy::dotenv();

    let mut builder = ::config::Config::builder()
        .add_source(::config::File::from_str(DEFAULTS, ::config::FileFormat::Toml))
        // Optional local file: item-listing.toml (in CWD)
        .add_source(::config::File::with_name("item-listing").required(false));

    if let Ok(custom_path) = std::env::var("ITEM_LISTING_CONFIG") {
        builder = builder.add_source(::config::File::with_name(&custom_path).required(false));
    }
    builder = builder.add_source(::config::Environment::with_prefix("ITEM_LISTING").separator("__"));

    // FRONT_URL is the historical knob for the allowed CORS origin and wins over everything else
    builder = builder.set_override_option("cors.front_url", std::env::var("FRONT_URL").ok())?;

    let cfg = builder.build()?;
    let app_cfg: AppConfig = cfg.try_deserialize()?;
    validate(&app_cfg)?;
    Ok(app_cfg)
}

pub fn validate(cfg: &AppConfig) -> anyhow::Result<()> {
    if cfg.server.port == 0 {
        return Err(anyhow::anyhow!("invalid server.port: {}", cfg.server.port));
    }
    #[cfg(unix)]
    if cfg.server.port < 1024 {
        tracing::warn!("Using privileged port {} - may require elevated permissions", cfg.server.port);
    }
    if cfg.server.body_limit_bytes == 0 {
        return Err(anyhow::anyhow!("server.body_limit_bytes must be > 0"));
    }

    if cfg.storage.image_dir.as_os_str().is_empty() {
        return Err(anyhow::anyhow!("storage.image_dir must not be empty"));
    }
    if !(1..=100).contains(&cfg.storage.jpeg_quality) {
        return Err(anyhow::anyhow!(
            "storage.jpeg_quality must be in 1..=100, got {}",
            cfg.storage.jpeg_quality
        ));
    }
    if !cfg.storage.default_image.ends_with(".jpg") {
        return Err(anyhow::anyhow!("storage.default_image must end with .jpg"));
    }

    let origin = cfg.cors.front_url.as_str();
    if !(origin.starts_with("http://") || origin.starts_with("https://")) {
        return Err(anyhow::anyhow!("cors.front_url must be an http(s) origin: {}", origin));
    }
    if axum::http::HeaderValue::from_str(origin).is_err() {
        return Err(anyhow::anyhow!("cors.front_url is not a valid header value: {}", origin));
    }

    Ok(())
}

pub fn ensure_sqlite_parent_dir(url: &str) -> anyhow::Result<()> {
    if let Some(path) = url.strip_prefix("sqlite://") {
        // sqlite:///C:/... on Windows
        #[cfg(windows)]
        let path = {
            let bytes = path.as_bytes();
            if bytes.len() >= 3 && bytes[0] == b'/' && bytes[2] == b':' && bytes[1].is_ascii_alphabetic() {
                &path[1..]
            } else {
                path
            }
        };
        let path = path.split('?').next().unwrap_or(path);
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }
    Ok(())
}

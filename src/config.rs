use serde::Deserialize;

const DEFAULTS: &str = include_str!("../config/default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    /// Rows per page in the file list.
    pub page_size: usize,
    /// Directory holding the built web UI (index.html + wasm bundle).
    pub dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    pub max_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub ui: UiConfig,
    pub upload: UploadConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        // Fallback: parse the embedded default TOML
        match from_embedded() {
            Ok(app_cfg) => app_cfg,
            Err(e) => panic!("Failed to parse embedded default config: {}", e),
        }
    }
}

fn from_embedded() -> anyhow::Result<AppConfig> {
    let cfg = ::config::Config::builder()
        .add_source(::config::File::from_str(DEFAULTS, ::config::FileFormat::Toml))
        .build()?;
    Ok(cfg.try_deserialize()?)
}

/// Loads the configuration (embedded defaults -> building-files.toml -> BUILDING_FILES_CONFIG -> env/.env).
pub fn load() -> anyhow::Result<AppConfig> {
    // Load .env first (optional)
    let _ = dotenvy::dotenv();

    let mut builder = ::config::Config::builder()
        .add_source(::config::File::from_str(DEFAULTS, ::config::FileFormat::Toml))
        // Optional local file: building-files.toml (in CWD)
        .add_source(::config::File::with_name("building-files").required(false));

    if let Ok(custom_path) = std::env::var("BUILDING_FILES_CONFIG") {
        builder = builder.add_source(::config::File::with_name(&custom_path).required(false));
    }
    // Environment variables last to have highest precedence
    builder = builder.add_source(::config::Environment::with_prefix("BUILDING_FILES").separator("__"));

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

    if cfg.ui.page_size == 0 || cfg.ui.page_size > 500 {
        return Err(anyhow::anyhow!("ui.page_size must be in 1..=500"));
    }
    if cfg.upload.max_bytes == 0 {
        return Err(anyhow::anyhow!("upload.max_bytes must be > 0"));
    }

    Ok(())
}

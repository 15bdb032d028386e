use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_EMBEDDING_MODEL: &str = "voyage-3.5";
pub const DEFAULT_EMBEDDING_DIMENSION: u32 = 1024;
pub const DEFAULT_COMPLETION_MODEL: &str = "deepseek-chat";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub embedding: EmbeddingConfig,

    #[serde(default)]
    pub completion: CompletionConfig,

    #[serde(default)]
    pub chunking: ChunkingConfig,

    #[serde(default)]
    pub retrieval: RetrievalConfig,

    #[serde(default)]
    pub extraction: ExtractionConfig,
}

impl Config {
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::config_dir().map(|p| p.join("docchat").join("config.toml"))
    }

    pub fn load() -> Result<Self, ConfigError> {
        if let Some(path) = Self::config_path()
            && path.exists()
        {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            return Ok(config);
        }
        Ok(Self::default())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed by the CORS layer (local frontend dev servers).
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:3000".to_string(),
        "http://localhost:5174".to_string(),
        "http://127.0.0.1:5173".to_string(),
        "http://127.0.0.1:3000".to_string(),
        "http://127.0.0.1:5174".to_string(),
    ]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Environment variable holding the Postgres connection URL.
    #[serde(default = "default_database_url_env")]
    pub url_env: String,

    #[serde(default = "default_pool_max")]
    pub pool_max: u32,

    #[serde(default = "default_pool_acquire_timeout")]
    pub pool_acquire_timeout: u32,
}

fn default_database_url_env() -> String {
    "DATABASE_URL".to_string()
}

fn default_pool_max() -> u32 {
    5
}

fn default_pool_acquire_timeout() -> u32 {
    30
}

impl DatabaseConfig {
    pub fn url(&self) -> Result<String, ConfigError> {
        std::env::var(&self.url_env).map_err(|_| ConfigError::MissingEnv(self.url_env.clone()))
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url_env: default_database_url_env(),
            pool_max: default_pool_max(),
            pool_acquire_timeout: default_pool_acquire_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    #[serde(default = "default_embedding_base_url")]
    pub base_url: String,

    #[serde(default = "default_embedding_model")]
    pub model: String,

    /// Output dimensionality of the configured model. Fixed for the lifetime
    /// of a deployment; stored vectors are invalid under a different model.
    #[serde(default = "default_embedding_dimension")]
    pub dimension: u32,

    /// Environment variable holding the provider API key.
    #[serde(default = "default_embedding_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_embedding_timeout")]
    pub timeout_secs: u64,
}

fn default_embedding_base_url() -> String {
    "https://api.voyageai.com".to_string()
}

fn default_embedding_model() -> String {
    DEFAULT_EMBEDDING_MODEL.to_string()
}

fn default_embedding_dimension() -> u32 {
    DEFAULT_EMBEDDING_DIMENSION
}

fn default_embedding_api_key_env() -> String {
    "VOYAGE_API_KEY".to_string()
}

fn default_embedding_timeout() -> u64 {
    60
}

impl EmbeddingConfig {
    pub fn api_key(&self) -> Result<String, ConfigError> {
        std::env::var(&self.api_key_env)
            .map_err(|_| ConfigError::MissingEnv(self.api_key_env.clone()))
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: default_embedding_base_url(),
            model: default_embedding_model(),
            dimension: default_embedding_dimension(),
            api_key_env: default_embedding_api_key_env(),
            timeout_secs: default_embedding_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    #[serde(default = "default_completion_base_url")]
    pub base_url: String,

    #[serde(default = "default_completion_model")]
    pub model: String,

    #[serde(default = "default_completion_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_completion_timeout")]
    pub timeout_secs: u64,
}

fn default_completion_base_url() -> String {
    "https://api.deepseek.com".to_string()
}

fn default_completion_model() -> String {
    DEFAULT_COMPLETION_MODEL.to_string()
}

fn default_completion_api_key_env() -> String {
    "DEEPSEEK_API_KEY".to_string()
}

fn default_completion_timeout() -> u64 {
    120
}

impl CompletionConfig {
    pub fn api_key(&self) -> Result<String, ConfigError> {
        std::env::var(&self.api_key_env)
            .map_err(|_| ConfigError::MissingEnv(self.api_key_env.clone()))
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: default_completion_base_url(),
            model: default_completion_model(),
            api_key_env: default_completion_api_key_env(),
            timeout_secs: default_completion_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Soft chunk size bound in characters, not tokens.
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
}

fn default_max_chars() -> usize {
    2000
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chars: default_max_chars(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    #[serde(default = "default_top_k")]
    pub top_k: u32,
}

fn default_top_k() -> u32 {
    5
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Fall back to OCR when a PDF has no embedded text layer.
    #[serde(default = "default_enable_ocr")]
    pub enable_ocr: bool,

    #[serde(default = "default_ocr_languages")]
    pub ocr_languages: Vec<String>,
}

fn default_enable_ocr() -> bool {
    true
}

fn default_ocr_languages() -> Vec<String> {
    vec!["eng".to_string()]
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            enable_ocr: default_enable_ocr(),
            ocr_languages: default_ocr_languages(),
        }
    }
}

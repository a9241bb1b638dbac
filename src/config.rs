use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Top-level application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Recipe provider settings
    #[serde(default)]
    pub provider: ProviderSettings,
    /// Where liked recipes are persisted
    #[serde(default)]
    pub storage: StorageSettings,
    /// Number of search results shown per page
    #[serde(default = "default_results_per_page")]
    pub results_per_page: u32,
    /// Servings a freshly loaded recipe starts with
    #[serde(default = "default_servings")]
    pub default_servings: u32,
}

/// Settings for the HTTP recipe provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderSettings {
    /// Base URL of the recipe API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    /// Directory holding the stored values
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
    /// Key the liked recipes are stored under
    #[serde(default = "default_likes_key")]
    pub likes_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: ProviderSettings::default(),
            storage: StorageSettings::default(),
            results_per_page: default_results_per_page(),
            default_servings: default_servings(),
        }
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            likes_key: default_likes_key(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://forkify-api.herokuapp.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("recipe_box_data")
}

fn default_likes_key() -> String {
    crate::likes::LIKES_KEY.to_string()
}

fn default_results_per_page() -> u32 {
    crate::pagination::RESULTS_PER_PAGE
}

fn default_servings() -> u32 {
    4
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_BOX__ prefix
    /// 2. recipe_box.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_BOX__PROVIDER__BASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration, see [`AppConfig::load`]
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe_box").required(false))
        .add_source(
            Environment::with_prefix("RECIPE_BOX")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;
    // Both must be at least 1
    config.results_per_page = config.results_per_page.max(1);
    config.default_servings = config.default_servings.max(1);
    Ok(config)
}

// Configuration module for imdb-mini-api
// Layers defaults, an optional TOML file and environment variables

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

const APP_NAME: &str = "imdb-mini-api";
const CONFIG_FILENAME: &str = "config.toml";

/// TOML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Server configuration
    pub server: ServerConfig,

    /// Upstream IMDb endpoints and HTTP client settings
    pub provider: ProviderConfig,

    /// Search defaults
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server port (default: 8000)
    pub port: u16,

    /// Bind address (default: 0.0.0.0)
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            bind_address: "0.0.0.0".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Base of the suggestion (search) API
    pub suggestion_base_url: String,

    /// GraphQL endpoint used for title details
    pub graphql_url: String,

    /// Timeout for each outbound request, in seconds (default: 10)
    pub timeout_secs: u64,

    /// User-Agent sent upstream
    pub user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            suggestion_base_url: "https://v2.sg.media-imdb.com/suggestion".to_string(),
            graphql_url: "https://caching.graphql.imdb.com/".to_string(),
            timeout_secs: 10,
            user_agent: format!("{}/{}", APP_NAME, env!("CARGO_PKG_VERSION")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Results returned when `limit` is not given (default: 10)
    pub default_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { default_limit: 10 }
    }
}

/// Application configuration - combines TOML file with environment overrides
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server port
    pub port: u16,

    /// Bind address
    pub bind_address: String,

    /// IMDb client settings
    pub provider: ProviderConfig,

    /// Search defaults
    pub search: SearchConfig,

    /// Config file that was loaded, if any
    pub config_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_file(ConfigFile::default(), None)
    }
}

impl AppConfig {
    /// Load configuration from TOML file and environment
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. TOML config file
    /// 3. Default values
    pub fn load() -> Self {
        let config_path = Self::find_config_dir().join(CONFIG_FILENAME);
        let (config_file, loaded) = Self::load_config_file(&config_path);

        let mut config = Self::from_file(config_file, loaded.then_some(config_path));
        config.apply_env();
        config
    }

    fn from_file(file: ConfigFile, config_file: Option<PathBuf>) -> Self {
        Self {
            port: file.server.port,
            bind_address: file.server.bind_address,
            provider: file.provider,
            search: file.search,
            config_file,
        }
    }

    /// Find the config directory (for locating config.toml)
    fn find_config_dir() -> PathBuf {
        // Environment variable takes priority
        if let Ok(path) = std::env::var("IMDB_MINI_API_CONFIG_DIR") {
            return PathBuf::from(path);
        }

        // Then XDG config dir
        if let Some(dir) = dirs::config_dir() {
            return dir.join(APP_NAME);
        }

        // Fallback to current directory
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }

    /// Load and parse the TOML config file. The flag is false when defaults were used.
    fn load_config_file(config_path: &std::path::Path) -> (ConfigFile, bool) {
        if !config_path.exists() {
            tracing::debug!(
                "No config file found at {}, using defaults",
                config_path.display()
            );
            return (ConfigFile::default(), false);
        }

        match std::fs::read_to_string(config_path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded configuration from {}", config_path.display());
                    (config, true)
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to parse config file {}: {}. Using defaults.",
                        config_path.display(),
                        e
                    );
                    (ConfigFile::default(), false)
                }
            },
            Err(e) => {
                tracing::warn!(
                    "Failed to read config file {}: {}. Using defaults.",
                    config_path.display(),
                    e
                );
                (ConfigFile::default(), false)
            }
        }
    }

    fn parse(contents: &str) -> Result<ConfigFile, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Apply environment overrides on top of file values
    fn apply_env(&mut self) {
        if let Some(port) = std::env::var("IMDB_MINI_API_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
        {
            self.port = port;
        }

        if let Ok(addr) = std::env::var("IMDB_MINI_API_BIND_ADDRESS") {
            self.bind_address = addr;
        }

        if let Ok(url) = std::env::var("IMDB_SUGGESTION_URL") {
            self.provider.suggestion_base_url = url;
        }

        if let Ok(url) = std::env::var("IMDB_GRAPHQL_URL") {
            self.provider.graphql_url = url;
        }

        if let Some(secs) = std::env::var("IMDB_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            self.provider.timeout_secs = secs;
        }

        if let Ok(agent) = std::env::var("IMDB_USER_AGENT") {
            self.provider.user_agent = agent;
        }
    }

    /// Address the server binds to
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.bind_address, self.port).parse()
    }

    /// Log configuration status
    pub fn log_config(&self) {
        match &self.config_file {
            Some(path) => tracing::info!("Configuration file: {}", path.display()),
            None => tracing::info!("Configuration file: none (defaults + environment)"),
        }
        tracing::info!("Server listening on {}:{}", self.bind_address, self.port);
        tracing::info!("IMDb suggestion API: {}", self.provider.suggestion_base_url);
        tracing::info!("IMDb GraphQL API: {}", self.provider.graphql_url);
        tracing::debug!(
            "Upstream timeout: {}s, user agent: {}",
            self.provider.timeout_secs,
            self.provider.user_agent
        );
        tracing::debug!("Default search limit: {}", self.search.default_limit);
    }
}

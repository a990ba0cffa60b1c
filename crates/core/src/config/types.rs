use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub query: QueryConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory served for paths outside the API (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    3000
}

/// Backing JSON file configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
    /// Seed an empty collection when the file does not exist yet.
    #[serde(default = "default_create_if_missing")]
    pub create_if_missing: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            create_if_missing: default_create_if_missing(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("movies.json")
}

fn default_create_if_missing() -> bool {
    true
}

/// How search text is compared against field values.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Lower-cased substring containment.
    #[default]
    Substring,
    /// Ordered subsequence: every character of the word appears in the
    /// value in order, other characters may sit in between.
    Fuzzy,
}

/// Query engine configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryConfig {
    /// Page size used when the request does not carry one.
    #[serde(default = "default_page_size")]
    pub default_size: u32,
    /// Upper bound for client supplied page sizes.
    #[serde(default = "default_max_size")]
    pub max_size: u32,
    #[serde(default)]
    pub match_mode: MatchMode,
    /// Number of compiled fuzzy patterns kept around.
    #[serde(default = "default_pattern_cache_capacity")]
    pub pattern_cache_capacity: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_size: default_page_size(),
            max_size: default_max_size(),
            match_mode: MatchMode::default(),
            pattern_cache_capacity: default_pattern_cache_capacity(),
        }
    }
}

fn default_page_size() -> u32 {
    10
}

fn default_max_size() -> u32 {
    100
}

fn default_pattern_cache_capacity() -> usize {
    256
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 9000
static_dir = "./static"

[store]
path = "/data/movies.json"
create_if_missing = false

[query]
default_size = 20
max_size = 50
match_mode = "fuzzy"
pattern_cache_capacity = 16
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host.to_string(), "127.0.0.1");
        assert_eq!(
            config.server.static_dir.as_ref().unwrap().to_str().unwrap(),
            "./static"
        );
        assert_eq!(config.store.path.to_str().unwrap(), "/data/movies.json");
        assert!(!config.store.create_if_missing);
        assert_eq!(config.query.default_size, 20);
        assert_eq!(config.query.max_size, 50);
        assert_eq!(config.query.match_mode, MatchMode::Fuzzy);
        assert_eq!(config.query.pattern_cache_capacity, 16);
    }

    #[test]
    fn test_deserialize_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
        assert!(config.server.static_dir.is_none());
        assert_eq!(config.store.path.to_str().unwrap(), "movies.json");
        assert!(config.store.create_if_missing);
        assert_eq!(config.query.default_size, 10);
        assert_eq!(config.query.max_size, 100);
        assert_eq!(config.query.match_mode, MatchMode::Substring);
    }

    #[test]
    fn test_deserialize_unknown_match_mode_fails() {
        let toml = r#"
[query]
match_mode = "regex"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_match_mode_serialization() {
        assert_eq!(
            serde_json::to_string(&MatchMode::Substring).unwrap(),
            "\"substring\""
        );
        assert_eq!(
            serde_json::to_string(&MatchMode::Fuzzy).unwrap(),
            "\"fuzzy\""
        );
    }
}

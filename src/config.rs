//! Configuration file parser for ~/.config/marquee/config.toml.
//!
//! The config file is optional — a missing file yields `Config::default()`,
//! which reproduces the stock six-category home feed. Unknown keys are
//! silently ignored by serde, though we log a warning when the file contains
//! potential typos.
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config file exceeds maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),

    /// Category list violates a feed invariant.
    #[error("Invalid category configuration: {0}")]
    Categories(String),
}

// ============================================================================
// Category Queries
// ============================================================================

/// One configured category row: display label (also the mapping key), the
/// pre-built query route, and whether this category supplies the spotlight.
/// Static configuration, never mutated at runtime.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryQuery {
    pub title: String,
    pub route: String,
    #[serde(default)]
    pub spotlight: bool,
}

const LIST_SUFFIX: &str =
    "language=en-US&append_to_response=images,content_ratings&include_image_language=en";

fn default_categories() -> Vec<CategoryQuery> {
    let query = |title: &str, route: String, spotlight: bool| CategoryQuery {
        title: title.to_string(),
        route,
        spotlight,
    };
    vec![
        query(
            "Trending Movies",
            format!("/trending/movie/week?{LIST_SUFFIX}"),
            true,
        ),
        query(
            "Trending TV Shows",
            format!("/trending/tv/week?{LIST_SUFFIX}"),
            false,
        ),
        query(
            "Top Rated Movies",
            format!("/movie/top_rated?page=1&{LIST_SUFFIX}"),
            false,
        ),
        query(
            "Top Rated TV Shows",
            format!("/tv/top_rated?page=1&{LIST_SUFFIX}"),
            false,
        ),
        query(
            "Popular Movies",
            format!("/movie/popular?page=1&{LIST_SUFFIX}"),
            false,
        ),
        query(
            "Popular TV Shows",
            format!("/tv/popular?page=1&{LIST_SUFFIX}"),
            false,
        ),
    ]
}

// ============================================================================
// Configuration Struct
// ============================================================================

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
/// Missing keys fall back to `Default::default()`.
///
/// Custom Debug impl masks `api_key` to prevent secret leakage in logs and
/// error messages.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the metadata API.
    pub base_url: String,

    /// Base URL prepended to image paths when rendering.
    pub image_base_url: String,

    /// Bearer token for the metadata API (alternative to the MARQUEE_API_KEY
    /// env var; the env var takes precedence).
    pub api_key: Option<String>,

    /// How long a cached feed snapshot stays fresh, in milliseconds.
    pub staleness_window_ms: u64,

    /// Maximum continue-watching cards shown in the home row.
    pub continue_watching_visible: usize,

    /// Ordered category rows. Exactly one must set `spotlight = true`.
    pub categories: Vec<CategoryQuery>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://api.themoviedb.org/3".to_string(),
            image_base_url: "https://image.tmdb.org/t/p/original".to_string(),
            api_key: None,
            staleness_window_ms: 300_000, // 5 minutes
            continue_watching_visible: 8,
            categories: default_categories(),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("image_base_url", &self.image_base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("staleness_window_ms", &self.staleness_window_ms)
            .field("continue_watching_visible", &self.continue_watching_visible)
            .field("categories", &self.categories)
            .finish()
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → silently accepted, logged as warning
    /// - Category invariant violations → `Err(ConfigError::Categories)`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        // Check file size before reading to avoid slurping a corrupted file.
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Race: file deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        // Parse as a raw table first to warn about unknown keys (typos)
        if let Ok(raw) = content.parse::<toml::Table>() {
            let known_keys = [
                "base_url",
                "image_base_url",
                "api_key",
                "staleness_window_ms",
                "continue_watching_visible",
                "categories",
            ];
            for key in raw.keys() {
                if !known_keys.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        tracing::info!(
            path = %path.display(),
            categories = config.categories.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Enforce the feed invariants the rest of the crate relies on:
    /// a non-empty category list with exactly one spotlight-eligible entry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.categories.is_empty() {
            return Err(ConfigError::Categories(
                "at least one category is required".to_string(),
            ));
        }
        let eligible = self
            .categories
            .iter()
            .filter(|query| query.spotlight)
            .count();
        if eligible != 1 {
            return Err(ConfigError::Categories(format!(
                "exactly one category must set spotlight = true (found {eligible})"
            )));
        }
        Ok(())
    }

    /// Staleness window as a `Duration`.
    pub fn staleness_window(&self) -> Duration {
        Duration::from_millis(self.staleness_window_ms)
    }

    /// Full image URL for a catalog-relative image path.
    pub fn image_url(&self, path: &str) -> String {
        format!("{}{}", self.image_base_url.trim_end_matches('/'), path)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.staleness_window_ms, 300_000);
        assert_eq!(config.staleness_window(), Duration::from_secs(300));
        assert_eq!(config.continue_watching_visible, 8);
        assert_eq!(config.categories.len(), 6);
        assert!(config.api_key.is_none());
        config.validate().unwrap();
    }

    #[test]
    fn test_default_spotlight_is_trending_movies() {
        let config = Config::default();
        let eligible: Vec<&CategoryQuery> = config
            .categories
            .iter()
            .filter(|query| query.spotlight)
            .collect();
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].title, "Trending Movies");
    }

    #[test]
    fn test_missing_file_returns_default() {
        let path = Path::new("/tmp/marquee_test_nonexistent_config.toml");
        let config = Config::load(path).unwrap();
        assert_eq!(config.categories.len(), 6);
    }

    #[test]
    fn test_empty_file_returns_default() {
        let dir = std::env::temp_dir().join("marquee_config_test_empty");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.staleness_window_ms, 300_000);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_partial_config_uses_defaults_for_missing() {
        let dir = std::env::temp_dir().join("marquee_config_test_partial");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "staleness_window_ms = 60000\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.staleness_window_ms, 60_000);
        assert_eq!(config.categories.len(), 6); // default rows kept

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_full_config() {
        let dir = std::env::temp_dir().join("marquee_config_test_full");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");

        let content = r#"
base_url = "https://proxy.example.com/v3"
api_key = "test-key-123"
staleness_window_ms = 120000
continue_watching_visible = 4

[[categories]]
title = "Fresh"
route = "/trending/movie/day"
spotlight = true

[[categories]]
title = "Classics"
route = "/movie/top_rated"
"#;
        std::fs::write(&path, content).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.base_url, "https://proxy.example.com/v3");
        assert_eq!(config.api_key.as_deref(), Some("test-key-123"));
        assert_eq!(config.categories.len(), 2);
        assert!(config.categories[0].spotlight);
        assert!(!config.categories[1].spotlight);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let dir = std::env::temp_dir().join("marquee_config_test_invalid");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "this is not [valid toml").unwrap();

        let result = Config::load(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_zero_spotlight_categories_rejected() {
        let dir = std::env::temp_dir().join("marquee_config_test_no_spotlight");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(
            &path,
            "[[categories]]\ntitle = \"Only\"\nroute = \"/movie/popular\"\n",
        )
        .unwrap();

        let result = Config::load(&path);
        assert!(matches!(result, Err(ConfigError::Categories(_))));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_multiple_spotlight_categories_rejected() {
        let mut config = Config::default();
        config.categories[1].spotlight = true;
        assert!(matches!(config.validate(), Err(ConfigError::Categories(_))));
    }

    #[test]
    fn test_empty_category_list_rejected() {
        let mut config = Config::default();
        config.categories.clear();
        assert!(matches!(config.validate(), Err(ConfigError::Categories(_))));
    }

    #[test]
    fn test_too_large_file_rejected() {
        let dir = std::env::temp_dir().join("marquee_config_test_too_large");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");

        let content = "a".repeat(1_048_577);
        std::fs::write(&path, content).unwrap();

        let result = Config::load(&path);
        assert!(matches!(result, Err(ConfigError::TooLarge(_))));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_debug_masks_api_key() {
        let config = Config {
            api_key: Some("super-secret-key-12345".to_string()),
            ..Config::default()
        };

        let debug_output = format!("{:?}", config);
        assert!(!debug_output.contains("super-secret-key-12345"));
        assert!(debug_output.contains("[REDACTED]"));
    }

    #[test]
    fn test_image_url_joins_paths() {
        let config = Config::default();
        assert_eq!(
            config.image_url("/abc.jpg"),
            "https://image.tmdb.org/t/p/original/abc.jpg"
        );
    }
}

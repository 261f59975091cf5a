use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::workspace::WorkspaceSettings;

/// Application configuration loaded from environment variables.
/// Start-up fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Holds the working copy and the `saves/` directory.
    pub data_dir: PathBuf,
    pub translation_concurrency: usize,
    pub undo_depth: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            data_dir: std::env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            translation_concurrency: parse_env("TRANSLATION_CONCURRENCY", 8)?,
            undo_depth: parse_env("UNDO_DEPTH", 50)?,
        })
    }

    pub fn saves_dir(&self) -> PathBuf {
        self.data_dir.join("saves")
    }

    pub fn working_copy_path(&self) -> PathBuf {
        self.data_dir.join("current.json")
    }

    pub fn workspace_settings(&self) -> WorkspaceSettings {
        WorkspaceSettings {
            undo_depth: self.undo_depth,
            translation_concurrency: self.translation_concurrency,
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_default_and_error() {
        // Keys unique to this test so parallel tests cannot interfere.
        std::env::remove_var("SMARTCV_TEST_UNSET");
        assert_eq!(parse_env::<u16>("SMARTCV_TEST_UNSET", 8080).unwrap(), 8080);

        std::env::set_var("SMARTCV_TEST_BAD", "eighty");
        assert!(parse_env::<u16>("SMARTCV_TEST_BAD", 8080).is_err());

        std::env::set_var("SMARTCV_TEST_GOOD", " 12 ");
        assert_eq!(parse_env::<usize>("SMARTCV_TEST_GOOD", 8).unwrap(), 12);
    }

    #[test]
    fn test_derived_paths() {
        let config = Config {
            gemini_api_key: "k".to_string(),
            port: 8080,
            rust_log: "info".to_string(),
            data_dir: PathBuf::from("/tmp/smartcv"),
            translation_concurrency: 4,
            undo_depth: 10,
        };
        assert_eq!(config.saves_dir(), PathBuf::from("/tmp/smartcv/saves"));
        assert_eq!(
            config.working_copy_path(),
            PathBuf::from("/tmp/smartcv/current.json")
        );
        assert_eq!(config.workspace_settings().undo_depth, 10);
    }
}

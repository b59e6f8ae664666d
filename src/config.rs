use crate::error::{AutoFormError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 抽出サービスの既定アドレス
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// 環境変数によるベースURL上書き
pub const BASE_URL_ENV: &str = "AUTOFORM_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    /// リクエストのタイムアウト秒数（未設定なら無制限）
    pub timeout_seconds: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout_seconds: None,
        }
    }
}

impl Config {
    /// 設定ファイルを読み込み、環境変数の上書きを適用する（送信用）
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;
        config.apply_env_override(std::env::var(BASE_URL_ENV).ok());
        Ok(config)
    }

    /// 設定ファイルの値だけを読む（保存し直す編集用）
    pub fn load_file() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 環境変数の値でベースURLを上書きする（空白のみなら無視）
    pub fn apply_env_override(&mut self, value: Option<String>) {
        if let Some(url) = value {
            let url = url.trim();
            if !url.is_empty() {
                self.base_url = url.to_string();
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| AutoFormError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("autoform").join("config.json"))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds
            .filter(|&seconds| seconds > 0)
            .map(Duration::from_secs)
    }

    pub fn set_base_url(&mut self, url: String) -> Result<()> {
        let url = url.trim();
        if url.is_empty() {
            return Err(AutoFormError::Config("ベースURLが空です".into()));
        }
        reqwest::Url::parse(url)
            .map_err(|e| AutoFormError::Config(format!("不正なURL {}: {}", url, e)))?;
        self.base_url = url.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            base_url: "http://10.0.0.5:9000".into(),
            timeout_seconds: Some(30),
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"timeout_seconds": 5}"#).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.base_url, DEFAULT_BASE_URL);
        assert_eq!(loaded.timeout_seconds, Some(5));
    }

    #[test]
    fn test_env_override_only_applies_in_memory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        Config::default().save_to(&path).unwrap();

        let mut overridden = Config::load_from(&path).unwrap();
        overridden.apply_env_override(Some(" http://temporary-override:1234 ".into()));
        assert_eq!(overridden.base_url, "http://temporary-override:1234");

        // 設定編集はファイルの値から始めるので、上書き値は保存されない
        let mut edited = Config::load_from(&path).unwrap();
        edited.timeout_seconds = Some(10);
        edited.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.base_url, DEFAULT_BASE_URL);
        assert_eq!(reloaded.timeout_seconds, Some(10));
    }

    #[test]
    fn test_env_override_ignores_blank_and_missing() {
        let mut config = Config::default();
        config.apply_env_override(None);
        config.apply_env_override(Some("   ".into()));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_load_file_skips_env_override() {
        let dir = tempdir().unwrap();
        std::env::set_var("HOME", dir.path());
        std::env::set_var(BASE_URL_ENV, "http://temporary-override:1234");

        let mut config = Config::load().unwrap();
        assert_eq!(config.base_url, "http://temporary-override:1234");

        config = Config::load_file().unwrap();
        config.timeout_seconds = Some(10);
        config.save().unwrap();
        std::env::remove_var(BASE_URL_ENV);

        let reloaded = Config::load().unwrap();
        assert_eq!(reloaded.base_url, DEFAULT_BASE_URL);
        assert_eq!(reloaded.timeout_seconds, Some(10));
    }

    #[test]
    fn test_zero_timeout_means_no_timeout() {
        let config = Config {
            base_url: DEFAULT_BASE_URL.into(),
            timeout_seconds: Some(0),
        };
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_set_base_url_validates() {
        let mut config = Config::default();
        assert!(config.set_base_url("not a url".into()).is_err());
        assert!(config.set_base_url("   ".into()).is_err());
        config.set_base_url(" http://extractor:8000 ".into()).unwrap();
        assert_eq!(config.base_url, "http://extractor:8000");
    }
}

//! エディタ設定
//!
//! JSON 設定ファイルの読み込み。ファイルが無ければ既定値を使う

use crate::error::{ConfigError, NanoError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 設定ファイルの場所を上書きする環境変数
pub const CONFIG_ENV: &str = "MINI_NANO_CONFIG";

/// エディタ設定
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// ステータスメッセージの表示時間（秒）
    pub message_ttl_secs: u64,
    /// エスケープシーケンス読み取り時の1バイトあたりの待ち時間（ミリ秒）
    pub input_timeout_ms: u64,
    /// ログ出力先
    pub log_file: Option<PathBuf>,
    /// ログレベル
    pub log_level: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            message_ttl_secs: 5,
            input_timeout_ms: 100,
            log_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl EditorConfig {
    /// ステータスメッセージの表示時間
    pub fn message_ttl(&self) -> Duration {
        Duration::from_secs(self.message_ttl_secs)
    }

    /// 入力待ちのタイムアウト
    pub fn input_timeout(&self) -> Duration {
        Duration::from_millis(self.input_timeout_ms)
    }

    /// 既定の設定ファイルパス
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("mini-nano").join("config.json"))
    }

    /// 既定の場所から読み込む（ファイルが無ければ既定値）
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// 指定パスから読み込む
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json(&content).map_err(|err| match err {
            NanoError::Config(ConfigError::InvalidFile { reason, .. }) => {
                NanoError::Config(ConfigError::InvalidFile {
                    path: path.display().to_string(),
                    reason,
                })
            }
            other => other,
        })?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// JSON 文字列から設定を構築して検証
    pub fn from_json(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content).map_err(|err| {
            NanoError::Config(ConfigError::InvalidFile {
                path: "<inline>".to_string(),
                reason: err.to_string(),
            })
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.input_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "input_timeout_ms".to_string(),
                value: "0".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

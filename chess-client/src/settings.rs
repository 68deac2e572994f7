//! 客户端设置模块
//!
//! 设置以 JSON 保存在用户配置目录下，命令行参数可覆盖其中的值。

use std::path::{Path, PathBuf};

use protocol::NetworkConfig;
use serde::{Deserialize, Serialize};

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// 用作 tracing 过滤指令
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

/// 客户端设置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// 服务器地址
    pub network: NetworkConfig,
    pub log_level: LogLevel,
    /// 显示棋盘坐标
    pub show_labels: bool,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            log_level: LogLevel::default(),
            show_labels: true,
        }
    }
}

impl ClientSettings {
    /// 获取设置文件路径
    pub fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("chess-client");
            path.push("settings.json");
            path
        })
    }

    /// 从默认位置加载设置
    pub fn load() -> Self {
        match Self::settings_path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::warn!("No config directory, using default settings");
                Self::default()
            }
        }
    }

    /// 从文件加载设置，文件缺失或无效时使用默认值
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!("Settings file {:?} not found, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(settings) => {
                    tracing::debug!("Loaded settings: {:?}", path);
                    settings
                }
                Err(e) => {
                    tracing::warn!("Invalid settings file: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Cannot read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// 保存到默认位置
    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::settings_path().ok_or_else(|| anyhow::anyhow!("no config directory"))?;
        self.save_to(&path)
    }

    /// 保存设置到文件
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::info!("Settings saved: {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = ClientSettings::load_from(&dir.path().join("settings.json"));
        assert_eq!(settings, ClientSettings::default());
        assert_eq!(settings.network.port, 8080);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let settings = ClientSettings {
            network: NetworkConfig {
                host: "chess.local".to_string(),
                port: 9000,
            },
            log_level: LogLevel::Debug,
            show_labels: false,
        };
        settings.save_to(&path).unwrap();

        assert_eq!(ClientSettings::load_from(&path), settings);
    }

    #[test]
    fn test_partial_and_invalid_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        std::fs::write(&path, r#"{"log_level": "warn"}"#).unwrap();
        let settings = ClientSettings::load_from(&path);
        assert_eq!(settings.log_level, LogLevel::Warn);
        assert!(settings.show_labels);

        std::fs::write(&path, "not json").unwrap();
        assert_eq!(ClientSettings::load_from(&path), ClientSettings::default());
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!("DEBUG".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert!("loud".parse::<LogLevel>().is_err());
        assert_eq!(LogLevel::Trace.as_filter(), "trace");
    }
}

// ==========================================
// 采样排班看板 - 会话配置
// ==========================================
// 职责: 远端接口地址、班组名单、界面语言等配置的加载与覆写
// 优先级: 环境变量 > 配置文件 > 默认值
// 存储: JSON 文件 (默认位于系统配置目录)
// ==========================================

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

// ==========================================
// 配置键 (环境变量)
// ==========================================
pub mod config_keys {
    /// 远端接口基础地址
    pub const ENV_API_URL: &str = "PLANNER_API_URL";
    /// 界面语言
    pub const ENV_LOCALE: &str = "PLANNER_LOCALE";
}

/// 默认远端接口地址 (本机服务端口 5000)
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";

/// 默认语言
pub const DEFAULT_LOCALE: &str = "pt-BR";

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误: {0}")]
    ParseError(String),

    #[error("配置值无效 (key: {key}): {message}")]
    InvalidValue { key: String, message: String },
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// PlannerConfig - 会话配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub api_base_url: String,              // 远端接口基础地址
    pub request_timeout_secs: Option<u64>, // 请求超时 (None = 使用传输层默认行为)
    pub teams: Vec<String>,                // 班组名单 (显示顺序)
    pub locale: String,                    // 界面语言
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: None,
            teams: vec!["R1".to_string(), "R2".to_string()],
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl PlannerConfig {
    /// 加载配置
    ///
    /// # 参数
    /// - path: 配置文件路径 (None 或文件不存在时使用默认值)
    ///
    /// # 返回
    /// - Ok: 应用环境变量覆写后的配置
    /// - Err: 文件存在但无法读取/解析,或配置值无效
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(p) if p.exists() => Self::from_file(p)?,
            Some(p) => {
                tracing::debug!("配置文件不存在, 使用默认配置: {}", p.display());
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// 从 JSON 文件读取
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&raw)
    }

    /// 从 JSON 字符串读取 (缺失字段取默认值)
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 应用覆写 (lookup 通常为环境变量读取)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(config_keys::ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            tracing::debug!("配置覆写: {}={}", config_keys::ENV_API_URL, url);
            self.api_base_url = url.trim().to_string();
        }
        if let Some(locale) = lookup(config_keys::ENV_LOCALE).filter(|v| !v.trim().is_empty()) {
            tracing::debug!("配置覆写: {}={}", config_keys::ENV_LOCALE, locale);
            self.locale = locale.trim().to_string();
        }
    }

    /// 校验配置值
    pub fn validate(&self) -> ConfigResult<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "api_base_url".to_string(),
                message: "不能为空".to_string(),
            });
        }
        if self.teams.iter().all(|t| t.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                key: "teams".to_string(),
                message: "至少需要一个班组".to_string(),
            });
        }
        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: "request_timeout_secs".to_string(),
                message: "必须大于 0".to_string(),
            });
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// 默认配置文件路径: <系统配置目录>/collection-planner/config.json
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("collection-planner").join("config.json"))
}

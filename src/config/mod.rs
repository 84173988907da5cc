// ==========================================
// 采样排班看板 - 配置层
// ==========================================
// 职责: 会话配置加载,支持文件 + 环境变量覆写
// ==========================================

pub mod planner_config;

// 重导出核心配置
pub use planner_config::{
    config_keys, default_config_path, ConfigError, ConfigResult, PlannerConfig,
    DEFAULT_API_BASE_URL, DEFAULT_LOCALE,
};

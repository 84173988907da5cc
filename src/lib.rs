// ==========================================
// 采样排班看板 (Cronograma de Coleta) - 核心库
// ==========================================
// 系统定位: 月度采样排班看板
//   客户名单 → 拖拽到 (日, 班组) 槽位 → 保存/复制上月
// 数据流:
//   BoardLoader 加载 → PlannerSession 翻译手势 → AllocationBoard 发布事件
//   → BoardView 重绘 → PersistenceGateway 保存快照 / 拉取上月计划
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "pt-BR");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 看板规则
pub mod engine;

// 导入层 - 原始载荷解析
pub mod importer;

// 配置层
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 远端保存/复制接口
pub mod api;

// 应用层 - 交互适配
pub mod app;

// 导出层 - 月度网格
pub mod export;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    Allocation, ClientId, ClientRecord, ClientStatus, DragPayload, Outcome, Period,
    PreviousAllocation, SlotKey, SnapshotEntry,
};

// 引擎
pub use engine::{AllocationBoard, BoardError, BoardLoader, ClientDirectory, LoadReport, SlotCatalog};

// API
pub use api::{GatewayError, PersistenceGateway};

// 交互层
pub use app::{AdapterError, BoardView, PlannerSession};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Cronograma de Coleta";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}

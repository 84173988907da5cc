// ==========================================
// 采样排班看板 - 持久化网关
// ==========================================
// 职责: 看板快照 ↔ 远端保存/复制接口 的适配
// 红线:
// 1. 网关只在调用期间借用看板,不持有
// 2. 网络失败不修改看板 (复制结果由调用方在校验后应用)
// 3. 不自动重试
// ==========================================

use crate::api::dto::SavePlanRequest;
use crate::api::error::{GatewayError, GatewayResult};
use crate::api::planning_api::{HttpPlanningApi, PlanningApi};
use crate::config::PlannerConfig;
use crate::domain::allocation::PreviousAllocation;
use crate::domain::period::Period;
use crate::engine::board::AllocationBoard;
use std::sync::Arc;

/// 持久化网关
#[derive(Clone)]
pub struct PersistenceGateway {
    api: Arc<dyn PlanningApi>,
}

impl PersistenceGateway {
    pub fn new(api: Arc<dyn PlanningApi>) -> Self {
        Self { api }
    }

    /// 使用 HTTP 客户端创建网关
    pub fn http(config: &PlannerConfig) -> GatewayResult<Self> {
        Ok(Self::new(Arc::new(HttpPlanningApi::new(config)?)))
    }

    /// 保存看板
    ///
    /// # 返回
    /// - Ok(mensagem): 服务端确认消息
    /// - Err(GatewayError): 失败消息 (服务端 mensagem 原样透传)
    pub async fn save(&self, period: Period, board: &AllocationBoard) -> GatewayResult<String> {
        ensure_period(period)?;

        let request = SavePlanRequest::new(period, board.snapshot());
        let entry_count = request.entries.len();
        tracing::info!("保存计划: period={}, entries={}", period, entry_count);

        match self.api.save_plan(&request).await {
            Ok(message) => {
                tracing::info!("保存成功: period={}, message={}", period, message);
                Ok(message)
            }
            Err(e) => {
                tracing::warn!("保存失败: period={}, code={}, error={}", period, e.code(), e);
                Err(e)
            }
        }
    }

    /// 拉取上月计划 (不修改看板)
    pub async fn fetch_previous(&self, period: Period) -> GatewayResult<Vec<PreviousAllocation>> {
        ensure_period(period)?;

        match self.api.fetch_previous(period).await {
            Ok(items) => {
                tracing::info!(
                    "上月计划拉取成功: period={}, source={}, items={}",
                    period,
                    period.previous(),
                    items.len()
                );
                Ok(items)
            }
            Err(e) => {
                tracing::warn!("上月计划拉取失败: period={}, code={}, error={}", period, e.code(), e);
                Err(e)
            }
        }
    }
}

fn ensure_period(period: Period) -> GatewayResult<()> {
    match Period::new(period.year, period.month) {
        Some(_) => Ok(()),
        None => Err(GatewayError::InvalidPeriod {
            year: period.year,
            month: period.month,
        }),
    }
}

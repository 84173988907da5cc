// ==========================================
// 采样排班看板 - 远端计划接口
// ==========================================
// 职责: 定义远端保存/复制接口 trait, 并提供基于 reqwest 的 HTTP 实现
// 接口:
// - POST /api/salvar_planejamento
// - GET  /api/copiar_mes_anterior/{ano}/{mes}  (上月由服务端推算)
// ==========================================

use crate::api::dto::{SavePlanRequest, ServerMessage};
use crate::api::error::{GatewayError, GatewayResult};
use crate::config::PlannerConfig;
use crate::domain::allocation::PreviousAllocation;
use crate::domain::period::Period;
use crate::i18n::t_with_args;
use crate::importer::parse_previous_items;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;

/// 保存接口路径
pub const SAVE_PATH: &str = "/api/salvar_planejamento";

/// 复制上月接口路径
pub const COPY_PREVIOUS_PATH: &str = "/api/copiar_mes_anterior";

// ==========================================
// PlanningApi Trait
// ==========================================

/// 远端计划接口
///
/// 由 `PersistenceGateway` 调用; 测试中以 mock 替换
#[async_trait]
pub trait PlanningApi: Send + Sync {
    /// 保存整月计划
    ///
    /// # 返回
    /// - Ok(mensagem): 服务端确认消息 (原样透传)
    /// - Err: 传输失败或服务端拒绝
    async fn save_plan(&self, request: &SavePlanRequest) -> GatewayResult<String>;

    /// 拉取上月计划
    ///
    /// # 参数
    /// - period: 当前周期 (上月由服务端推算)
    async fn fetch_previous(&self, period: Period) -> GatewayResult<Vec<PreviousAllocation>>;
}

// ==========================================
// HttpPlanningApi - HTTP 实现
// ==========================================

/// 基于 reqwest 的远端接口客户端
#[derive(Debug, Clone)]
pub struct HttpPlanningApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPlanningApi {
    /// 由配置创建客户端
    pub fn new(config: &PlannerConfig) -> GatewayResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 拼接接口地址
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn copy_previous_url(&self, period: Period) -> String {
        format!(
            "{}/{}/{}",
            self.url(COPY_PREVIOUS_PATH),
            period.year,
            period.month
        )
    }
}

#[async_trait]
impl PlanningApi for HttpPlanningApi {
    async fn save_plan(&self, request: &SavePlanRequest) -> GatewayResult<String> {
        let response = self
            .client
            .post(self.url(SAVE_PATH))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let parsed: Option<ServerMessage> = serde_json::from_str(&body).ok();

        match parsed {
            Some(msg) if status.is_success() && !msg.is_error_status() => {
                let text = msg.message.unwrap_or_default();
                if text.is_empty() {
                    tracing::warn!("保存成功响应缺少 mensagem 字段");
                }
                Ok(text)
            }
            Some(msg) => Err(GatewayError::Server {
                status: status.as_u16(),
                message: msg
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| status_message(status)),
            }),
            None if status.is_success() => Err(GatewayError::InvalidResponse(format!(
                "HTTP {}: 响应体不是有效的 JSON",
                status.as_u16()
            ))),
            None => Err(GatewayError::Server {
                status: status.as_u16(),
                message: status_message(status),
            }),
        }
    }

    async fn fetch_previous(&self, period: Period) -> GatewayResult<Vec<PreviousAllocation>> {
        let response = self.client.get(self.copy_previous_url(period)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Server {
                status: status.as_u16(),
                message: status_message(status),
            });
        }

        // 完整读取并校验后才交给调用方
        let body = response.text().await?;
        parse_previous_items(&body).map_err(|e| GatewayError::InvalidResponse(e.to_string()))
    }
}

/// 由状态码生成错误消息
fn status_message(status: StatusCode) -> String {
    let detail = match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    };
    t_with_args("gateway.server_status", &[("status", &detail)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let mut config = PlannerConfig::default();
        config.api_base_url = "http://localhost:5000/".to_string();
        let api = HttpPlanningApi::new(&config).unwrap();

        assert_eq!(api.url(SAVE_PATH), "http://localhost:5000/api/salvar_planejamento");
        assert_eq!(
            api.copy_previous_url(Period::new(2025, 1).unwrap()),
            "http://localhost:5000/api/copiar_mes_anterior/2025/1"
        );
    }
}

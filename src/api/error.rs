// ==========================================
// 采样排班看板 - 接口层错误类型
// ==========================================
// 职责: 远端保存/复制接口的错误分类
// 红线: 错误消息原样展示给操作员 (服务端 mensagem 不做改写)
//       网络失败视为错误结果,不自动重试
// ==========================================

use thiserror::Error;

/// 远端接口错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// 传输层失败 (连接、超时、读取响应体)
    #[error("{0}")]
    Transport(String),

    /// 服务端返回非成功状态
    #[error("{message}")]
    Server { status: u16, message: String },

    /// 成功响应但内容无法解析
    #[error("响应格式错误: {0}")]
    InvalidResponse(String),

    /// 排班周期无效 (请求未发出)
    #[error("无效的排班周期: ano={year}, mes={month}")]
    InvalidPeriod { year: i32, month: u32 },
}

impl GatewayError {
    /// 展示给操作员的消息
    pub fn message(&self) -> String {
        match self {
            GatewayError::Server { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP 状态码 (仅服务端错误)
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 是否为连接类错误 (界面显示 "连接错误" 标题)
    pub fn is_transport(&self) -> bool {
        matches!(self, GatewayError::Transport(_))
    }

    /// 错误代码
    pub fn code(&self) -> &'static str {
        match self {
            GatewayError::Transport(_) => "TRANSPORT_ERROR",
            GatewayError::Server { .. } => "SERVER_ERROR",
            GatewayError::InvalidResponse(_) => "INVALID_RESPONSE",
            GatewayError::InvalidPeriod { .. } => "INVALID_PERIOD",
        }
    }
}

// 实现 From<reqwest::Error>
impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Transport(err.to_string())
    }
}

/// Result 类型别名
pub type GatewayResult<T> = Result<T, GatewayError>;

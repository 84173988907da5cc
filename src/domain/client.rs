// ==========================================
// 采样排班看板 - 客户领域模型
// ==========================================

use crate::domain::serde_utils::de_lenient_i64;
use crate::domain::types::ClientId;
use serde::{Deserialize, Serialize};

// ==========================================
// ClientRecord - 客户档案
// ==========================================
// 不可变,由 ClientDirectory 持有
// 线上格式: {id, nome}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
    #[serde(deserialize_with = "de_lenient_i64")]
    pub id: ClientId, // 客户ID
    #[serde(rename = "nome")]
    pub name: String, // 显示名称
}

impl ClientRecord {
    pub fn new(id: ClientId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

// ==========================================
// 采样排班看板 - 拖拽载荷
// ==========================================
// 交互适配器实例之间传递的数据包: {id, nome, labExterno?}
// labExterno 缺失视为 false
// ==========================================

use crate::domain::serde_utils::{de_flag, de_lenient_i64};
use crate::domain::types::ClientId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragPayload {
    #[serde(deserialize_with = "de_lenient_i64")]
    pub id: ClientId, // 客户ID
    #[serde(rename = "nome")]
    pub name: String, // 显示名称
    #[serde(
        rename = "labExterno",
        default,
        deserialize_with = "de_flag",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub external_lab: bool,
}

impl DragPayload {
    pub fn new(id: ClientId, name: impl Into<String>, external_lab: bool) -> Self {
        Self {
            id,
            name: name.into(),
            external_lab,
        }
    }
}

// ==========================================
// 采样排班看板 - 远端接口数据传输对象
// ==========================================
// 保存接口: POST {ano, mes, planejamento: [{dia, id_cliente, equipe, lab_externo}]}
// 响应体:   {status: "sucesso"|"erro", mensagem}
// ==========================================

use crate::domain::allocation::SnapshotEntry;
use crate::domain::period::Period;
use serde::{Deserialize, Serialize};

/// 保存请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavePlanRequest {
    #[serde(rename = "ano")]
    pub year: i32,
    #[serde(rename = "mes")]
    pub month: u32,
    #[serde(rename = "planejamento")]
    pub entries: Vec<SnapshotEntry>,
}

impl SavePlanRequest {
    pub fn new(period: Period, entries: Vec<SnapshotEntry>) -> Self {
        Self {
            year: period.year,
            month: period.month,
            entries,
        }
    }
}

/// 服务端消息响应
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerMessage {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "mensagem", alias = "message")]
    pub message: Option<String>,
}

impl ServerMessage {
    /// 服务端显式标记失败
    pub fn is_error_status(&self) -> bool {
        matches!(self.status.as_deref(), Some("erro") | Some("error"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_request_wire_format() {
        let request = SavePlanRequest::new(
            Period::new(2025, 3).unwrap(),
            vec![SnapshotEntry {
                day: 5,
                client_id: 1,
                team: "R1".to_string(),
                external_lab: false,
            }],
        );
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "ano": 2025,
                "mes": 3,
                "planejamento": [{"dia": 5, "id_cliente": 1, "equipe": "R1", "lab_externo": false}]
            })
        );
    }

    #[test]
    fn test_server_message_aliases() {
        let msg: ServerMessage =
            serde_json::from_str(r#"{"status": "erro", "mensagem": "Dados incompletos recebidos."}"#).unwrap();
        assert!(msg.is_error_status());
        assert_eq!(msg.message.as_deref(), Some("Dados incompletos recebidos."));

        let msg: ServerMessage = serde_json::from_str(r#"{"message": "conflict"}"#).unwrap();
        assert_eq!(msg.message.as_deref(), Some("conflict"));
        assert!(!msg.is_error_status());
    }
}

// ==========================================
// 采样排班看板 - 外部载荷解析
// ==========================================
// 职责: 会话输入 (客户名单/初始计划)、上月复制响应、拖拽载荷 → 领域类型
// 容错:
// - 初始计划无法解析时返回空计划 (会话以空看板启动,不中止)
// - 日期键可为字符串或整数; 非数字键跳过
// - lab_externo 兼容 true/false/0/1/null
// ==========================================

use crate::domain::allocation::{InitialPlan, PlanRecord, PreviousAllocation};
use crate::domain::client::ClientRecord;
use crate::domain::drag::DragPayload;
use crate::importer::error::{ImportError, ImportResult};
use serde_json::Value;
use std::path::Path;

/// 读取文本文件
pub fn read_file(path: &Path) -> ImportResult<String> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(std::fs::read_to_string(path)?)
}

/// 解析客户名单 `[{id, nome}]`
pub fn parse_roster(json: &str) -> ImportResult<Vec<ClientRecord>> {
    serde_json::from_str::<Vec<ClientRecord>>(json)
        .map_err(|e| ImportError::InvalidRoster(e.to_string()))
}

/// 解析初始计划 (宽松)
///
/// 整体无法解析时记录警告并返回空计划
pub fn parse_initial_plan(json: &str) -> InitialPlan {
    match try_parse_initial_plan(json) {
        Ok(plan) => plan,
        Err(e) => {
            tracing::warn!("初始计划解析失败, 以空看板启动: {}", e);
            InitialPlan::new()
        }
    }
}

/// 解析初始计划 (顶层严格,条目宽松)
///
/// # 格式
/// `{"<dia>": [{id_cliente, equipe, lab_externo}, ...], ...}`
///
/// # 返回
/// - Ok: 日 → 记录列表; 非数字日期键与无法解析的条目被跳过
/// - Err: 顶层不是 JSON 对象
pub fn try_parse_initial_plan(json: &str) -> ImportResult<InitialPlan> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| ImportError::invalid_json("planejamento", &e))?;

    let map = match value {
        Value::Object(map) => map,
        Value::Null => return Ok(InitialPlan::new()),
        other => {
            return Err(ImportError::InvalidJson {
                source_name: "planejamento".to_string(),
                message: format!("期望 JSON 对象, 实际: {}", json_kind(&other)),
            })
        }
    };

    let mut plan = InitialPlan::new();
    for (key, entries) in map {
        let day = match key.trim().parse::<u32>() {
            Ok(day) => day,
            Err(_) => {
                tracing::warn!("初始计划中存在非数字日期键, 已跳过: {}", key);
                continue;
            }
        };

        let items = match entries {
            Value::Array(items) => items,
            other => {
                tracing::warn!("日期 {} 的记录不是数组, 已跳过: {}", day, json_kind(&other));
                continue;
            }
        };

        let records = plan.entry(day).or_default();
        for item in items {
            match serde_json::from_value::<PlanRecord>(item) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!("日期 {} 存在无法解析的记录, 已跳过: {}", day, e),
            }
        }
    }

    Ok(plan)
}

/// 解析上月复制接口响应 `[{dia, id_cliente, equipe, lab_externo}]`
///
/// 空数组合法 (复制 0 条)
pub fn parse_previous_items(json: &str) -> ImportResult<Vec<PreviousAllocation>> {
    serde_json::from_str::<Vec<PreviousAllocation>>(json)
        .map_err(|e| ImportError::invalid_json("copiar_mes_anterior", &e))
}

/// 解析拖拽载荷 `{id, nome, labExterno?}`
pub fn parse_drag_payload(json: &str) -> ImportResult<DragPayload> {
    serde_json::from_str::<DragPayload>(json)
        .map_err(|e| ImportError::InvalidDragPayload(e.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roster() {
        let roster = parse_roster(r#"[{"id": 1, "nome": "Acme"}, {"id": "2", "nome": "Beta"}]"#).unwrap();
        assert_eq!(roster, vec![ClientRecord::new(1, "Acme"), ClientRecord::new(2, "Beta")]);

        assert!(matches!(
            parse_roster(r#"{"id": 1}"#),
            Err(ImportError::InvalidRoster(_))
        ));
    }

    #[test]
    fn test_parse_initial_plan_keys_and_order() {
        let json = r#"{
            "10": [{"id_cliente": 3, "equipe": "R2"}],
            "5": [
                {"id_cliente": 1, "equipe": "R1", "lab_externo": true},
                {"id_cliente": 2, "equipe": "R1", "lab_externo": 0}
            ],
            "abc": [{"id_cliente": 4, "equipe": "R1"}]
        }"#;
        let plan = parse_initial_plan(json);

        let days: Vec<u32> = plan.keys().copied().collect();
        assert_eq!(days, vec![5, 10]);
        assert_eq!(plan[&5].len(), 2);
        assert!(plan[&5][0].external_lab);
        assert!(!plan[&5][1].external_lab);
    }

    #[test]
    fn test_malformed_plan_yields_empty() {
        assert!(parse_initial_plan("{not json").is_empty());
        assert!(parse_initial_plan("[1, 2]").is_empty());
        assert!(parse_initial_plan("null").is_empty());
        assert!(try_parse_initial_plan("[1, 2]").is_err());
    }

    #[test]
    fn test_bad_records_are_skipped() {
        let json = r#"{"3": [{"equipe": "R1"}, {"id_cliente": 7, "equipe": "R1"}], "4": "x"}"#;
        let plan = parse_initial_plan(json);
        assert_eq!(plan[&3].len(), 1);
        assert_eq!(plan[&3][0].client_id, 7);
        assert!(!plan.contains_key(&4));
    }

    #[test]
    fn test_parse_previous_items() {
        let items = parse_previous_items(r#"[{"dia": 3, "id_cliente": 9, "equipe": "B"}]"#).unwrap();
        assert_eq!(items, vec![PreviousAllocation::new(3, 9, "B", false)]);

        assert!(parse_previous_items("[]").unwrap().is_empty());
        assert!(parse_previous_items("{}").is_err());
    }

    #[test]
    fn test_parse_drag_payload() {
        let payload = parse_drag_payload(r#"{"id": "5", "nome": "Gama", "labExterno": true}"#).unwrap();
        assert_eq!(payload, DragPayload::new(5, "Gama", true));

        assert!(matches!(
            parse_drag_payload("garbage"),
            Err(ImportError::InvalidDragPayload(_))
        ));
    }
}
